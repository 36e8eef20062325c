use crate::account::AccountRegistry;
use crate::error::StatementError;
use crate::schema::Schema;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "passbook.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory or `http(s)://` URL holding `csvFiles/<account>.csv`.
    pub base: String,
    pub accounts: Vec<String>,
    pub columns: Schema,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base: ".".to_string(),
            accounts: vec!["axis".to_string(), "hdfc".to_string(), "icici".to_string()],
            columns: Schema::default(),
        }
    }
}

impl Config {
    pub fn registry(&self) -> Result<AccountRegistry, StatementError> {
        AccountRegistry::new(self.accounts.iter().cloned())
    }
}

/// Loads `path`, or `passbook.toml` from the working directory when no path
/// is given. A missing default file yields [`Config::default`]; a missing
/// explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, StatementError> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                return Ok(Config::default());
            }
            p
        }
    };

    let s = fs::read_to_string(&p).map_err(|source| StatementError::Io {
        path: p.display().to_string(),
        source,
    })?;
    parse_config(&s)
}

pub fn parse_config(s: &str) -> Result<Config, StatementError> {
    let cfg: Config = toml::from_str(s).map_err(|e| StatementError::Config(e.to_string()))?;
    if cfg.accounts.is_empty() {
        return Err(StatementError::Config("no accounts configured".to_string()));
    }
    Ok(cfg)
}

/// Writes the default configuration to `path`, leaving an existing file alone.
/// Returns whether a file was written.
pub fn init_config(path: &Path) -> Result<bool, StatementError> {
    if path.exists() {
        return Ok(false);
    }

    let s = toml::to_string_pretty(&Config::default())
        .map_err(|e| StatementError::Config(e.to_string()))?;
    fs::write(path, s).map_err(|source| StatementError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(true)
}
