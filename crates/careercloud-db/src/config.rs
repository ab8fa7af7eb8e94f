//! # Application Settings
//!
//! Loaded once at startup from `appsettings.json`:
//!
//! ```json
//! {
//!   "ConnectionStrings": { "DataConnection": "sqlite://careercloud.db" },
//!   "Backend": "session"
//! }
//! ```
//!
//! `CAREERCLOUD_DATA_CONNECTION` in the environment replaces the connection
//! string from the file. A missing file, malformed JSON or an empty
//! connection string is a startup error.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable overriding `ConnectionStrings.DataConnection`.
pub const CONNECTION_ENV: &str = "CAREERCLOUD_DATA_CONNECTION";

/// Which `DataRepository` implementation `Database::repository` hands out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// One connection per call, one autocommit statement per item.
    Statement,
    /// Shared pooled session, one transaction per batch, eager loading.
    #[default]
    Session,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Statement => "statement",
            Backend::Session => "session",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConnectionStrings {
    #[serde(default)]
    pub data_connection: String,
}

/// Parsed `appsettings.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    pub connection_strings: ConnectionStrings,

    #[serde(default)]
    pub backend: Backend,
}

impl Settings {
    /// Reads and validates a settings file, then applies the environment
    /// override.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading settings");

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Settings::from_json(&raw)?;

        if let Ok(value) = env::var(CONNECTION_ENV) {
            debug!("Connection string overridden from environment");
            settings.connection_strings.data_connection = value;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Parses settings JSON without touching the environment or validating.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.connection_strings.data_connection.trim().is_empty() {
            return Err(ConfigError::MissingRequired(
                "ConnectionStrings.DataConnection".to_string(),
            ));
        }
        Ok(())
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_strings.data_connection
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let settings = Settings::from_json(
            r#"{"ConnectionStrings":{"DataConnection":"sqlite://cc.db"},"Backend":"statement"}"#,
        )
        .unwrap();
        assert_eq!(settings.connection_string(), "sqlite://cc.db");
        assert_eq!(settings.backend, Backend::Statement);
    }

    #[test]
    fn test_backend_defaults_to_session() {
        let settings =
            Settings::from_json(r#"{"ConnectionStrings":{"DataConnection":"cc.db"}}"#).unwrap();
        assert_eq!(settings.backend, Backend::Session);
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ConnectionStrings:").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_empty_connection_string_rejected() {
        let settings =
            Settings::from_json(r#"{"ConnectionStrings":{"DataConnection":"  "}}"#).unwrap();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::MissingRequired(_))
        ));
    }
}
