//! [`Config`]-related definitions.

use std::path::PathBuf;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote backend configuration.
    pub api: Api,

    /// Session vault configuration.
    pub vault: Vault,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Remote backend configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Origin of the remote backend (scheme, host and port).
    ///
    /// Explicit configuration: the origin is never derived from the runtime
    /// environment.
    #[default("http://127.0.0.1:8080".to_owned())]
    pub base_url: String,
}

/// Session vault configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Vault {
    /// Path of the session file.
    ///
    /// An empty value selects the default location under the user's
    /// configuration directory.
    #[default(String::new())]
    pub file: String,
}

impl Vault {
    /// Returns the resolved path of the session file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        if self.file.is_empty() {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("taskboard")
                .join("session.json")
        } else {
            PathBuf::from(&self.file)
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Log {
    /// Minimum level of the logged messages.
    #[default(Level::Info)]
    pub level: Level,
}

/// Level of logged messages.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Errors only.
    Error,

    /// Warnings and above.
    Warn,

    /// Informational messages and above.
    Info,

    /// Debug messages and above.
    Debug,

    /// Everything.
    Trace,
}

impl From<Level> for tracing::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => Self::ERROR,
            Level::Warn => Self::WARN,
            Level::Info => Self::INFO,
            Level::Debug => Self::DEBUG,
            Level::Trace => Self::TRACE,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Config;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://127.0.0.1:8080");
        assert!(config
            .vault
            .path()
            .ends_with("taskboard/session.json"));
    }
}
