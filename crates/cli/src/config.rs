//! Settings loading.
//!
//! Precedence, lowest to highest: built-in defaults, TOML file,
//! environment (`ALPHAVANTAGE_API_KEY`, `PORTFOLIO_FILE`), command-line
//! flags.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use portfolio_tracker_core::models::settings::Settings;

/// Settings file looked up in the working directory when `--config` is not
/// given. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "portfolio-tracker.toml";

pub const ENV_API_KEY: &str = "ALPHAVANTAGE_API_KEY";
pub const ENV_PORTFOLIO_FILE: &str = "PORTFOLIO_FILE";

/// Parse settings from TOML. Unknown keys are rejected so typos surface.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents).context("Invalid settings file")?;
    Ok(settings)
}

/// Read settings from `path`. An explicit path must exist; the default one
/// may be absent.
pub fn load_settings_file(path: Option<&Path>) -> Result<Settings> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => parse_settings(&contents)
            .with_context(|| format!("Failed to load {}", path.display())),
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Settings::default())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Apply environment overrides. `lookup` is `std::env::var` in production.
pub fn apply_env<F>(mut settings: Settings, lookup: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
        settings.api_key = key;
    }
    if let Some(file) = lookup(ENV_PORTFOLIO_FILE).filter(|f| !f.trim().is_empty()) {
        settings.portfolio_path = PathBuf::from(file);
    }
    settings
}

/// Full resolution: file, then environment, then the `--file` flag.
pub fn resolve(config: Option<&Path>, file_override: Option<&Path>) -> Result<Settings> {
    let settings = load_settings_file(config)?;
    let mut settings = apply_env(settings, |name| std::env::var(name).ok());
    if let Some(file) = file_override {
        settings.portfolio_path = file.to_path_buf();
    }
    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_toml_is_defaults() {
        assert_eq!(parse_settings("").unwrap(), Settings::default());
    }

    #[test]
    fn toml_overrides_fields() {
        let s = parse_settings(
            r#"
            api_key = "ABC123"
            portfolio_path = "data/holdings.json"
            enable_fallback = true
            "#,
        )
        .unwrap();
        assert_eq!(s.api_key, "ABC123");
        assert_eq!(s.portfolio_path, PathBuf::from("data/holdings.json"));
        assert!(s.enable_fallback);
        assert_eq!(s.request_timeout_secs, 30);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(parse_settings("api_key = ").is_err());
        assert!(parse_settings("request_timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_settings("apikey = \"typo\"").is_err());
    }

    #[test]
    fn env_overrides_file() {
        let env: HashMap<&str, &str> = [
            (ENV_API_KEY, "FROM_ENV"),
            (ENV_PORTFOLIO_FILE, "/tmp/p.json"),
        ]
        .into_iter()
        .collect();
        let s = apply_env(Settings::default(), |k| env.get(k).map(|v| v.to_string()));
        assert_eq!(s.api_key, "FROM_ENV");
        assert_eq!(s.portfolio_path, PathBuf::from("/tmp/p.json"));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let s = apply_env(Settings::default(), |_| Some("  ".to_string()));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_settings_file(Some(&missing)).is_err());
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "api_key = \"K\"\nrequest_timeout_secs = 5\n").unwrap();
        let s = load_settings_file(Some(&path)).unwrap();
        assert_eq!(s.api_key, "K");
        assert_eq!(s.request_timeout_secs, 5);
    }
}
