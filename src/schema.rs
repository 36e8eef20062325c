use crate::date::STATEMENT_DATE_FORMAT;
use crate::error::StatementError;
use crate::transaction::RawRow;

use csv::StringRecord;
use serde::{Deserialize, Serialize};

/// Column names expected in a statement header, plus the date format of the
/// date column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub date: String,
    pub description: String,
    pub debit: String,
    pub credit: String,
    pub balance: String,
    pub date_format: String,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            description: "Description".to_string(),
            debit: "Debit".to_string(),
            credit: "Credit".to_string(),
            balance: "Balance".to_string(),
            date_format: STATEMENT_DATE_FORMAT.to_string(),
        }
    }
}

impl Schema {
    /// Locates every schema column in `headers`. Matching is exact and
    /// case-sensitive.
    pub fn resolve(&self, headers: &StringRecord) -> Result<ColumnMap, StatementError> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| StatementError::MissingColumn {
                    column: column.to_string(),
                    found: headers.iter().collect::<Vec<_>>().join(","),
                })
        };

        Ok(ColumnMap {
            date: find(&self.date)?,
            description: find(&self.description)?,
            debit: find(&self.debit)?,
            credit: find(&self.credit)?,
            balance: find(&self.balance)?,
        })
    }
}

/// Header positions of the schema columns within one statement file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub description: usize,
    pub debit: usize,
    pub credit: usize,
    pub balance: usize,
}

impl ColumnMap {
    pub fn extract<'r>(&self, record: &'r StringRecord) -> Result<RawRow<'r>, StatementError> {
        let field = |index: usize, name: &str| {
            record.get(index).ok_or_else(|| StatementError::MalformedRow {
                message: format!(
                    "missing {} field at position {} (record has {} fields)",
                    name,
                    index + 1,
                    record.len()
                ),
            })
        };

        Ok(RawRow {
            date: field(self.date, "date")?,
            description: field(self.description, "description")?,
            debit: field(self.debit, "debit")?,
            credit: field(self.credit, "credit")?,
            balance: field(self.balance, "balance")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_header() {
        let headers = StringRecord::from(vec!["Date", "Description", "Debit", "Credit", "Balance"]);
        let map = Schema::default().resolve(&headers).unwrap();
        assert_eq!(map.date, 0);
        assert_eq!(map.balance, 4);
    }

    #[test]
    fn test_resolve_reordered_and_extra_columns() {
        let headers = StringRecord::from(vec![
            "Ref", "Balance", "Description", "Date", "Credit", "Debit",
        ]);
        let map = Schema::default().resolve(&headers).unwrap();
        assert_eq!(map.date, 3);
        assert_eq!(map.description, 2);
        assert_eq!(map.debit, 5);
        assert_eq!(map.credit, 4);
        assert_eq!(map.balance, 1);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let headers = StringRecord::from(vec!["date", "Description", "Debit", "Credit", "Balance"]);
        match Schema::default().resolve(&headers) {
            Err(StatementError::MissingColumn { column, found }) => {
                assert_eq!(column, "Date");
                assert_eq!(found, "date,Description,Debit,Credit,Balance");
            }
            _ => panic!("Expected MissingColumn error"),
        }
    }

    #[test]
    fn test_resolve_custom_names() {
        let schema = Schema {
            date: "Txn Date".to_string(),
            description: "Narration".to_string(),
            debit: "Withdrawal".to_string(),
            credit: "Deposit".to_string(),
            balance: "Closing Balance".to_string(),
            ..Schema::default()
        };
        let headers = StringRecord::from(vec![
            "Txn Date", "Narration", "Withdrawal", "Deposit", "Closing Balance",
        ]);
        assert!(schema.resolve(&headers).is_ok());
    }

    #[test]
    fn test_extract_short_record() {
        let headers = StringRecord::from(vec!["Date", "Description", "Debit", "Credit", "Balance"]);
        let map = Schema::default().resolve(&headers).unwrap();
        let record = StringRecord::from(vec!["01/02/2023", "Coffee"]);
        assert!(matches!(
            map.extract(&record),
            Err(StatementError::MalformedRow { .. })
        ));
    }
}
