//! Matching configuration
//!
//! Tunable ranking constants, loaded from TOML. Lookup order is:
//! explicit path, `FIELDMATCH_CONFIG`, `./.fieldmatch.toml`, then
//! `~/.config/fieldmatch/config.toml` (XDG standard). Every field has a
//! default, so an empty file or no file at all yields the stock behaviour.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// A value is out of range
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Offending key
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Top-level config file layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Matching engine settings
    #[serde(default)]
    pub matching: MatchingConfig,
}

/// Tunable constants for scoring, ranking and proximity queries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchingConfig {
    /// Active workload at which an agent counts as overloaded
    pub max_workload: usize,

    /// Distance at or below which an agent counts as nearby
    pub nearby_threshold_km: f64,

    /// Age at which a location sample becomes stale
    pub freshness_threshold_minutes: u32,

    /// Assumed travel speed for arrival estimates
    pub average_speed_kmh: f64,

    /// Default number of results for nearest-agent queries
    pub max_results: usize,

    /// Radius for the nearby-agent search
    pub search_radius_km: f64,

    /// Window for due-soon reminders
    pub due_soon_days: u32,

    /// Skip agents whose availability is `offline` when ranking
    pub exclude_offline: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_workload: 20,
            nearby_threshold_km: 15.0,
            freshness_threshold_minutes: 30,
            average_speed_kmh: 30.0,
            max_results: 5,
            search_radius_km: 30.0,
            due_soon_days: 3,
            exclude_offline: false,
        }
    }
}

impl MatchingConfig {
    /// Check every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_workload == 0 {
            return Err(invalid("max_workload", "must be at least 1"));
        }
        if self.max_results == 0 {
            return Err(invalid("max_results", "must be at least 1"));
        }
        non_negative("nearby_threshold_km", self.nearby_threshold_km)?;
        non_negative("search_radius_km", self.search_radius_km)?;
        if !(self.average_speed_kmh.is_finite() && self.average_speed_kmh > 0.0) {
            return Err(invalid("average_speed_kmh", "must be a positive number"));
        }
        Ok(())
    }

    /// Parse a TOML document containing a `[matching]` table
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        file.matching.validate()?;
        Ok(file.matching)
    }

    /// Load from a specific file; the file must exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded matching config from {}", path.display());
        Self::from_toml_str(&content, path)
    }

    /// Resolve and load the effective configuration
    ///
    /// An explicit path (or `FIELDMATCH_CONFIG`) must exist. Project and
    /// global files are optional and fall through to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        if let Some(path) = paths::config_from_env() {
            return Self::load_from(&path);
        }
        for path in [paths::project_config(), paths::global_config()] {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        log::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Render as a TOML document with a `[matching]` table
    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(&ConfigFile { matching: *self })?)
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a non-negative number"))
    }
}
