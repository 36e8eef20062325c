use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatementError {
    #[error("No account selected")]
    NoAccountSelected,

    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Missing {0} date")]
    MissingDate(&'static str),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Failed to fetch statement for {account}: HTTP {status}")]
    FetchStatus {
        account: String,
        status: reqwest::StatusCode,
    },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column '{column}' in header (found: {found})")]
    MissingColumn { column: String, found: String },

    #[error("Invalid date '{value}': {message}")]
    InvalidDate { value: String, message: String },

    #[error("Malformed row: {message}")]
    MalformedRow { message: String },

    #[error("Config error: {0}")]
    Config(String),
}
