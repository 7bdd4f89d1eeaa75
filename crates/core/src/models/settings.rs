use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::CoreError;

/// Default Alpha Vantage query endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Default location of the persisted state file, relative to the working
/// directory.
pub const DEFAULT_PORTFOLIO_PATH: &str = "portfolio.json";

/// Runtime settings for the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Alpha Vantage API key. The public "demo" key only answers for a few
    /// symbols, so real use needs a personal key.
    pub api_key: String,

    /// Quote service endpoint.
    pub base_url: String,

    /// Where the portfolio JSON lives.
    pub portfolio_path: PathBuf,

    /// Per-request timeout for quote lookups.
    pub request_timeout_secs: u64,

    /// Fall back to Yahoo Finance when Alpha Vantage has no answer.
    pub enable_fallback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: "demo".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            portfolio_path: PathBuf::from(DEFAULT_PORTFOLIO_PATH),
            request_timeout_secs: 30,
            enable_fallback: false,
        }
    }
}

impl Settings {
    /// Reject settings that cannot possibly work.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.api_key.trim().is_empty() {
            return Err(CoreError::Config("api_key must not be empty".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "base_url '{}' must be an http(s) URL",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        if self.portfolio_path.as_os_str().is_empty() {
            return Err(CoreError::Config("portfolio_path must not be empty".into()));
        }
        Ok(())
    }
}
