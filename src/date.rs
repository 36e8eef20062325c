use crate::error::StatementError;

use chrono::NaiveDate;

pub const STATEMENT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a statement date such as `15/03/2023`.
///
/// Slash-separated formats must contain exactly two `/` separators; anything
/// else is rejected up front instead of being handed to chrono.
pub fn parse_statement_date(value: &str, format: &str) -> Result<NaiveDate, StatementError> {
    let value = value.trim();
    let invalid = |message: String| StatementError::InvalidDate {
        value: value.to_string(),
        message,
    };

    if value.is_empty() {
        return Err(invalid("empty date".to_string()));
    }

    let expected = format.matches('/').count();
    if expected > 0 && value.matches('/').count() != expected {
        return Err(invalid(format!("expected {} '/' separators", expected)));
    }

    NaiveDate::parse_from_str(value, format).map_err(|e| invalid(e.to_string()))
}

/// Dates typed on the command line: `DD/MM/YYYY` like the statements, or ISO `YYYY-MM-DD`.
pub fn parse_input_date(value: &str) -> Result<NaiveDate, StatementError> {
    if value.contains('-') {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
            StatementError::InvalidDate {
                value: value.to_string(),
                message: e.to_string(),
            }
        })
    } else {
        parse_statement_date(value, STATEMENT_DATE_FORMAT)
    }
}
