//! Error types for settings loading and saving.

use std::fmt;

/// Errors that can occur while loading or saving plugin settings.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading or writing the settings file.
    Io(std::io::Error),
    /// YAML parsing or serialization error.
    Parse(serde_yaml_ng::Error),
    /// The file parsed but holds an unusable value.
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "settings io error: {err}"),
            ConfigError::Parse(err) => write!(f, "settings parse error: {err}"),
            ConfigError::Validation(msg) => write!(f, "invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_yaml_ng::Error> for ConfigError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        ConfigError::Parse(err)
    }
}
