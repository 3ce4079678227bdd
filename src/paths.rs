//! Centralized path definitions for fieldmatch
//!
//! Single source of truth for every filesystem path the CLI touches.
//!
//! ## Layout
//!
//! ```text
//! project/
//! ├── .fieldmatch.toml        # Project config (optional)
//! └── fieldmatch.json         # Default agent/task snapshot
//!
//! ~/.config/fieldmatch/
//! └── config.toml             # Global config (optional)
//! ```

use std::path::PathBuf;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "FIELDMATCH_CONFIG";

/// Project configuration filename
pub const PROJECT_CONFIG: &str = ".fieldmatch.toml";

/// Default snapshot filename
pub const DEFAULT_SNAPSHOT: &str = "fieldmatch.json";

/// Global config subdirectory name
const APP_DIR: &str = "fieldmatch";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Path from `FIELDMATCH_CONFIG`, if set and non-empty
#[must_use]
pub fn config_from_env() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Path to the project config in the current directory
#[must_use]
pub fn project_config() -> PathBuf {
    PathBuf::from(PROJECT_CONFIG)
}

/// Global config directory (`~/.config/fieldmatch`)
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

/// Global config file path
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}

/// Default snapshot path in the current directory
#[must_use]
pub fn default_snapshot() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT)
}
