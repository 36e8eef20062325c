use crate::error::StatementError;

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Account(String);

impl Account {
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Path of this account's statement relative to the source base.
    pub fn file_path(&self) -> String {
        format!("csvFiles/{}.csv", self.0)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of account codes a search may select from.
#[derive(Debug, Clone)]
pub struct AccountRegistry {
    known: Vec<String>,
}

impl AccountRegistry {
    pub fn new<I, S>(names: I) -> Result<Self, StatementError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut known: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !is_valid_token(&name) {
                return Err(StatementError::Config(format!(
                    "account code '{}' must be a short lowercase token",
                    name
                )));
            }
            if !known.contains(&name) {
                known.push(name);
            }
        }
        Ok(Self { known })
    }

    pub fn names(&self) -> &[String] {
        &self.known
    }

    /// Resolves user-selected names into accounts, keeping the order of
    /// first selection and dropping repeats.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Account>, StatementError> {
        let mut selected: Vec<Account> = Vec::new();

        for name in names {
            let name = name.as_ref().trim();
            if !self.known.iter().any(|k| k == name) {
                return Err(StatementError::UnknownAccount(name.to_string()));
            }
            if !selected.iter().any(|a| a.0 == name) {
                selected.push(Account(name.to_string()));
            }
        }

        if selected.is_empty() {
            return Err(StatementError::NoAccountSelected);
        }

        Ok(selected)
    }
}

fn is_valid_token(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 32
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
