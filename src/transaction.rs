use crate::date::parse_statement_date;
use crate::error::StatementError;
use crate::schema::Schema;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

/// One statement line. Amount cells are kept as written; only the date is
/// interpreted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub date: NaiveDate,
    /// Date exactly as written in the statement, used for chart labels.
    pub raw_date: String,
    pub description: String,
    pub debit: String,
    pub credit: String,
    pub balance: String,
}

impl TransactionRow {
    pub fn debit_amount(&self) -> Option<Decimal> {
        parse_amount(&self.debit)
    }

    pub fn credit_amount(&self) -> Option<Decimal> {
        parse_amount(&self.credit)
    }

    pub fn balance_amount(&self) -> Option<Decimal> {
        parse_amount(&self.balance)
    }
}

/// Schema fields of one CSV record, still as text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRow<'r> {
    pub date: &'r str,
    pub description: &'r str,
    pub debit: &'r str,
    pub credit: &'r str,
    pub balance: &'r str,
}

impl RawRow<'_> {
    pub fn parse(&self, schema: &Schema) -> Result<TransactionRow, StatementError> {
        Ok(TransactionRow {
            date: parse_statement_date(self.date, &schema.date_format)?,
            raw_date: self.date.trim().to_string(),
            description: self.description.trim().to_string(),
            debit: self.debit.trim().to_string(),
            credit: self.credit.trim().to_string(),
            balance: self.balance.trim().to_string(),
        })
    }
}

/// Numeric reading of an amount cell. Thousands separators are ignored;
/// empty or non-numeric text has no amount.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    Decimal::from_str(&value.replace(',', "")).ok()
}
