use crate::filter::ResultSet;

use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading,
    Populated,
    Failed(String),
}

/// Snapshot published to renderers. Every transition replaces the whole
/// value; `results` always holds the last successful Result Set.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub generation: u64,
    pub phase: Phase,
    pub results: Arc<ResultSet>,
}

impl ViewState {
    pub fn idle() -> Self {
        Self {
            generation: 0,
            phase: Phase::Idle,
            results: Arc::new(ResultSet::default()),
        }
    }

    pub fn loading(&self, generation: u64) -> Self {
        Self {
            generation,
            phase: Phase::Loading,
            results: Arc::clone(&self.results),
        }
    }

    pub fn populated(generation: u64, results: Arc<ResultSet>) -> Self {
        Self {
            generation,
            phase: Phase::Populated,
            results,
        }
    }

    pub fn failed(&self, generation: u64, message: String) -> Self {
        Self {
            generation,
            phase: Phase::Failed(message),
            results: Arc::clone(&self.results),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::idle()
    }
}
