use crate::account::Account;
use crate::error::StatementError;
use crate::source::StatementSource;

use std::path::{Path, PathBuf};
use tracing::debug;

/// Statements laid out on disk as `<base>/csvFiles/<account>.csv`.
#[derive(Debug, Clone)]
pub struct DirSource {
    base: PathBuf,
}

impl DirSource {
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, account: &Account) -> PathBuf {
        self.base.join(account.file_path())
    }
}

impl StatementSource for DirSource {
    async fn fetch(&self, account: &Account) -> Result<String, StatementError> {
        let path = self.path_for(account);
        debug!(account = %account, path = %path.display(), "Reading statement");

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| StatementError::Io {
                path: path.display().to_string(),
                source,
            })?;

        // Non-UTF-8 exports (Latin-1 and the like) decode lossily, matching HttpSource
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
