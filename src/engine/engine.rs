use crate::account::AccountRegistry;
use crate::engine::state::ViewState;
use crate::error::StatementError;
use crate::filter::{filter_transactions, ResultSet};
use crate::query::SearchRequest;
use crate::schema::Schema;
use crate::source::StatementSource;

use futures_util::future::try_join_all;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Completed(Arc<ResultSet>),
    /// A newer search started before this one finished; its outcome was dropped.
    Superseded { generation: u64 },
}

/// Runs searches across accounts and publishes the resulting [`ViewState`].
///
/// The engine is the only writer of the state. Each search takes a new
/// generation number and only publishes while it is still the newest one.
pub struct SearchEngine<S> {
    source: S,
    registry: AccountRegistry,
    schema: Schema,
    generation: AtomicU64,
    state: watch::Sender<ViewState>,
}

impl<S: StatementSource> SearchEngine<S> {
    pub fn new(source: S, registry: AccountRegistry, schema: Schema) -> Self {
        let (state, _) = watch::channel(ViewState::idle());
        Self {
            source,
            registry,
            schema,
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, StatementError> {
        // Invalid input never reaches the source or the published state
        let (query, accounts) = request.validate(&self.registry)?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish(generation, |current| current.loading(generation));
        debug!(generation, accounts = accounts.len(), "Search started");

        let fetched = try_join_all(accounts.iter().map(|account| self.source.fetch(account))).await;

        let outcome = fetched.and_then(|texts| {
            let mut results = ResultSet::default();
            for (account, text) in accounts.iter().zip(texts) {
                let filtered = filter_transactions(&text, &query, &self.schema)?;
                debug!(
                    account = %account,
                    rows = filtered.len(),
                    skipped = filtered.skipped,
                    "Filtered statement"
                );
                results.extend(filtered);
            }
            Ok(results)
        });

        match outcome {
            Ok(results) => {
                let results = Arc::new(results);
                let published = self.publish(generation, |_| {
                    ViewState::populated(generation, Arc::clone(&results))
                });
                if !published {
                    debug!(generation, "Discarding superseded search results");
                    return Ok(SearchOutcome::Superseded { generation });
                }

                info!(
                    generation,
                    rows = results.len(),
                    skipped = results.skipped,
                    "Search completed"
                );
                Ok(SearchOutcome::Completed(results))
            }
            Err(e) => {
                let message = e.to_string();
                let published =
                    self.publish(generation, |current| current.failed(generation, message));
                if !published {
                    debug!(generation, error = %e, "Discarding superseded search failure");
                    return Ok(SearchOutcome::Superseded { generation });
                }

                debug!(generation, error = %e, "Search failed");
                Err(e)
            }
        }
    }

    /// Replaces the state unless a newer search has already published.
    fn publish<F>(&self, generation: u64, next: F) -> bool
    where
        F: FnOnce(&ViewState) -> ViewState,
    {
        self.state.send_if_modified(|state| {
            if state.generation > generation || self.generation.load(Ordering::SeqCst) > generation
            {
                return false;
            }
            *state = next(state);
            true
        })
    }
}
