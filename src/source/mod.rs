pub mod dir;
pub mod http;

pub use dir::DirSource;
pub use http::HttpSource;

use crate::account::Account;
use crate::error::StatementError;

use std::future::Future;

/// Read-only supplier of raw statement text, one CSV blob per account.
pub trait StatementSource: Send + Sync {
    fn fetch(
        &self,
        account: &Account,
    ) -> impl Future<Output = Result<String, StatementError>> + Send;
}

/// Source chosen from a configured base: an `http(s)://` URL or a directory.
#[derive(Debug, Clone)]
pub enum AnySource {
    Dir(DirSource),
    Http(HttpSource),
}

impl AnySource {
    pub fn from_base(base: &str) -> Result<Self, StatementError> {
        if base.starts_with("http://") || base.starts_with("https://") {
            Ok(Self::Http(HttpSource::new(base)?))
        } else {
            Ok(Self::Dir(DirSource::new(base)))
        }
    }
}

impl StatementSource for AnySource {
    async fn fetch(&self, account: &Account) -> Result<String, StatementError> {
        match self {
            Self::Dir(source) => source.fetch(account).await,
            Self::Http(source) => source.fetch(account).await,
        }
    }
}
