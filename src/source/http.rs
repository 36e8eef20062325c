use crate::account::Account;
use crate::error::StatementError;
use crate::source::StatementSource;

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Statements served statically under `<base>/csvFiles/<account>.csv`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: String,
    client: Client,
}

impl HttpSource {
    pub fn new(base: &str) -> Result<Self, StatementError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url_for(&self, account: &Account) -> String {
        format!("{}/{}", self.base, account.file_path())
    }
}

impl StatementSource for HttpSource {
    async fn fetch(&self, account: &Account) -> Result<String, StatementError> {
        let url = self.url_for(account);
        debug!(account = %account, url = %url, "Fetching statement");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatementError::FetchStatus {
                account: account.name().to_string(),
                status,
            });
        }

        Ok(response.text().await?)
    }
}
