use std::path::Path;

use crate::errors::CoreError;
use crate::models::portfolio::Portfolio;

/// Load/persist the portfolio as a single JSON document.
///
/// Every save rewrites the file wholesale. There is no merge with what is
/// on disk and no protection against a second writer.
pub struct StorageManager;

impl StorageManager {
    /// Serialize a portfolio to its JSON document.
    pub fn save_to_string(portfolio: &Portfolio) -> Result<String, CoreError> {
        serde_json::to_string_pretty(portfolio)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))
    }

    /// Parse a portfolio from its JSON document.
    pub fn load_from_str(json: &str) -> Result<Portfolio, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize portfolio: {e}")))
    }

    /// Write the portfolio to `path`, replacing the file.
    pub fn save_to_file(portfolio: &Portfolio, path: impl AsRef<Path>) -> Result<(), CoreError> {
        let path = path.as_ref();
        let json = Self::save_to_string(portfolio)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), holdings = portfolio.len(), "portfolio saved");
        Ok(())
    }

    /// Read the portfolio from `path`. A missing file is an empty portfolio.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Portfolio, CoreError> {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no saved portfolio, starting empty");
                return Ok(Portfolio::new());
            }
            Err(e) => return Err(e.into()),
        };
        let portfolio = Self::load_from_str(&json)?;
        tracing::info!(path = %path.display(), holdings = portfolio.len(), "portfolio loaded");
        Ok(portfolio)
    }
}
