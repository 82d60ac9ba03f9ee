//! Application configuration: optional JSON file plus environment overrides

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory name used under the per-user config and data directories
pub const APP_DIR: &str = "velostream";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Credential for the metadata service; empty means requests will fail
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub history_path: PathBuf,
    /// Interval between simulated progress ticks
    pub tick_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-3-flash-preview".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            history_path: default_history_path(),
            tick_interval_ms: 400,
        }
    }
}

impl AppConfig {
    /// Loads `config.json` from the user config directory (if present),
    /// then applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match dirs::config_dir() {
            Some(dir) => Self::from_file(&dir.join(APP_DIR).join("config.json"))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads a config file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("GEMINI_API_KEY").or_else(|| lookup("API_KEY")) {
            self.api_key = key;
        }
        if let Some(model) = lookup("VELOSTREAM_MODEL") {
            self.model = model;
        }
        if let Some(base) = lookup("VELOSTREAM_API_BASE") {
            self.api_base = base;
        }
        if let Some(path) = lookup("VELOSTREAM_HISTORY_PATH") {
            self.history_path = PathBuf::from(path);
        }
    }
}

fn default_history_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("history.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::from_file(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.tick_interval_ms, 400);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"model": "gemini-2.5-flash", "tick_interval_ms": 100}"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.api_base, AppConfig::default().api_base);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn environment_overrides_win() {
        let env: HashMap<&str, &str> = [
            ("API_KEY", "fallback"),
            ("GEMINI_API_KEY", "primary"),
            ("VELOSTREAM_HISTORY_PATH", "/tmp/h.json"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_key, "primary");
        assert_eq!(config.history_path, PathBuf::from("/tmp/h.json"));
        assert_eq!(config.model, "gemini-3-flash-preview");
    }

    #[test]
    fn api_key_fallback_variable() {
        let mut config = AppConfig::default();
        config.apply_overrides(|k| (k == "API_KEY").then(|| "legacy".to_string()));
        assert_eq!(config.api_key, "legacy");
    }
}
