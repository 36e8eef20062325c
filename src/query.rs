use crate::account::{Account, AccountRegistry};
use crate::error::StatementError;
use crate::transaction::TransactionRow;

use chrono::NaiveDate;

/// Keyword and inclusive date range applied to every selected account.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    keyword: String,
    start: NaiveDate,
    end: NaiveDate,
}

impl Query {
    pub fn new(
        keyword: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, StatementError> {
        if start > end {
            return Err(StatementError::InvalidRange { start, end });
        }

        Ok(Self {
            keyword: keyword.into().to_lowercase(),
            start,
            end,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn matches(&self, row: &TransactionRow) -> bool {
        row.description.to_lowercase().contains(&self.keyword)
            && row.date >= self.start
            && row.date <= self.end
    }
}

/// Unvalidated search input as collected from the user.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub keyword: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub accounts: Vec<String>,
}

impl SearchRequest {
    pub fn validate(
        &self,
        registry: &AccountRegistry,
    ) -> Result<(Query, Vec<Account>), StatementError> {
        if self.accounts.is_empty() {
            return Err(StatementError::NoAccountSelected);
        }
        let accounts = registry.select(&self.accounts)?;

        let start = self.start.ok_or(StatementError::MissingDate("start"))?;
        let end = self.end.ok_or(StatementError::MissingDate("end"))?;
        let query = Query::new(self.keyword.clone(), start, end)?;

        Ok((query, accounts))
    }
}
