//! Path utilities for loopfill configuration files

use std::path::PathBuf;

/// Get the loopfill config directory
///
/// Returns: `<platform config dir>/loopfill` (e.g. `~/.config/loopfill`),
/// or `./loopfill` when the platform has no config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("loopfill")
}

/// Get the default config file path
///
/// Returns: `<config dir>/loopfill/config.yaml`
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}
