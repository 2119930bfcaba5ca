//! Plugin settings: the liveness grace period and compatibility switches.

use crate::defaults;
use crate::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime settings for the macro chaining plugin.
///
/// Stored as YAML in the plugin's config directory. A missing file yields
/// defaults (and writes them back); missing fields fall back to the same
/// defaults, so old files keep working when new fields are added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSettings {
    /// Milliseconds the execution cursor may stay idle before the active
    /// macro is considered finished and the chain record is dropped.
    #[serde(default = "defaults::liveness_grace_ms")]
    pub liveness_grace_ms: u64,

    /// Route both bank spellings of the run command to the shared bank,
    /// matching the plugin's historical behavior. Off by default.
    #[serde(default = "defaults::bool_false")]
    pub legacy_run_bank: bool,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            liveness_grace_ms: defaults::liveness_grace_ms(),
            legacy_run_bank: defaults::bool_false(),
        }
    }
}

impl ChainSettings {
    /// The grace period as a [`Duration`].
    pub fn liveness_grace(&self) -> Duration {
        Duration::from_millis(self.liveness_grace_ms)
    }

    /// Default settings file path: `<config dir>/macro-chain/settings.yaml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("macro-chain")
            .join("settings.yaml")
    }

    /// Loads settings from the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// validated, or if writing a fresh default file fails.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Loads settings from `path`; a missing file yields defaults and writes
    /// them back so the user has something to edit.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            log::info!("loading chain settings from {}", path.display());
            let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
            let settings: ChainSettings =
                serde_yaml_ng::from_str(&contents).map_err(ConfigError::Parse)?;
            settings.validate()?;
            Ok(settings)
        } else {
            log::info!("no settings at {}, writing defaults", path.display());
            let settings = Self::default();
            settings.save_to(path)?;
            Ok(settings)
        }
    }

    /// Saves settings to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }

    /// Saves settings to `path` atomically (temp file, then rename).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::Parse)?;
        let tmp = path.with_extension("yaml.tmp");
        fs::write(&tmp, &yaml).map_err(ConfigError::Io)?;
        fs::rename(&tmp, path).map_err(ConfigError::Io)?;
        log::debug!("saved chain settings to {}", path.display());
        Ok(())
    }

    /// Rejects values the liveness policy cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the grace period is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.liveness_grace_ms == 0 {
            return Err(ConfigError::Validation(
                "liveness_grace_ms must be greater than zero".into(),
            ));
        }
        if self.liveness_grace_ms > 60_000 {
            log::warn!(
                "liveness_grace_ms of {} is unusually long; finished chains will linger",
                self.liveness_grace_ms
            );
        }
        Ok(())
    }
}
