//! # Configuration Persistence
//!
//! Save and load client settings to/from disk.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Lexora backend.
    pub api_url: String,

    /// Base directory for client data, including the session store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Platform data directory, with a dot-directory fallback when none is
/// available.
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("lexora"))
        .unwrap_or_else(|| PathBuf::from(".lexora"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    /// Returns the config file path.
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lexora").join("config.json"))
    }

    /// Returns the directory for the durable session store.
    #[must_use]
    pub fn session_dir(&self) -> PathBuf {
        self.data_dir.join("session")
    }

    /// Loads configuration from disk, or returns defaults if not found.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            tracing::warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    tracing::info!(?path, "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(?path, error = %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Saves configuration to disk.
    pub fn save(&self) -> Result<(), String> {
        let Some(path) = Self::config_path() else {
            return Err("Could not determine config directory".to_string());
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                return Err(format!("Failed to create config directory: {}", e));
            }
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(&path, contents).map_err(|e| format!("Failed to write config: {}", e))?;

        tracing::info!(?path, "Saved configuration");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert!(config.data_dir.ends_with("lexora"));
        assert!(config.session_dir().ends_with("session"));
    }

    #[test]
    fn test_data_dir_is_configurable() {
        let json = r#"{"api_url": "https://lexora.example", "data_dir": "/srv/lexora-data"}"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.api_url, "https://lexora.example");
        assert_eq!(config.data_dir, PathBuf::from("/srv/lexora-data"));
        assert_eq!(
            config.session_dir(),
            PathBuf::from("/srv/lexora-data/session")
        );
    }

    #[test]
    fn test_missing_data_dir_falls_back_to_default() {
        let json = r#"{"api_url": "https://lexora.example"}"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.data_dir, default_data_dir());
    }

    #[test]
    fn test_round_trip_preserves_data_dir() {
        let config = Config {
            api_url: "https://lexora.example".to_string(),
            data_dir: PathBuf::from("/tmp/lexora-test"),
        };

        let json = serde_json::to_string(&config).unwrap();
        let restored: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.api_url, config.api_url);
        assert_eq!(restored.data_dir, config.data_dir);
    }
}
