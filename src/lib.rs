pub mod account;
pub mod config;
pub mod date;
pub mod engine;
pub mod error;
pub mod filter;
pub mod query;
pub mod render;
pub mod schema;
pub mod source;
pub mod transaction;

pub use account::{Account, AccountRegistry};
pub use engine::{Phase, SearchEngine, SearchOutcome, ViewState};
pub use error::StatementError;
pub use filter::{aggregate_for_chart, filter_transactions, ChartSeries, ResultSet};
pub use query::{Query, SearchRequest};
pub use schema::Schema;
pub use transaction::TransactionRow;

use std::fs;
use std::path::Path;

/// Filters a single statement file from disk.
pub fn filter_statement_file(
    path: impl AsRef<Path>,
    query: &Query,
    schema: &Schema,
) -> Result<ResultSet, StatementError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| StatementError::Io {
        path: path.display().to_string(),
        source,
    })?;
    filter_transactions(&String::from_utf8_lossy(&bytes), query, schema)
}
