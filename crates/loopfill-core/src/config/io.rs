//! Generic configuration I/O utilities
//!
//! YAML loading and saving for any serializable configuration type.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Read and parse a YAML config file
///
/// Returns `Ok(None)` when nothing exists at `path`. A file that exists but
/// cannot be read or parsed is an error naming the path.
pub fn try_load_config<T>(path: &Path) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config = serde_yaml::from_str::<T>(&contents)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    log::info!("try_load_config: Loaded config from {:?}", path);
    Ok(Some(config))
}

/// Load configuration from a YAML file, falling back to defaults
///
/// A missing file yields the defaults silently; an unreadable or invalid one
/// logs a warning first. Use [`try_load_config`] when the caller named the
/// file explicitly and a bad one should stop the run.
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    log::debug!("load_config: Loading from {:?}", path);

    match try_load_config(path) {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::debug!("load_config: Config file doesn't exist, using defaults");
            T::default()
        }
        Err(e) => {
            log::warn!("load_config: {:#}, using defaults", e);
            T::default()
        }
    }
}

/// Save configuration to a YAML file
///
/// Creates parent directories if they don't exist.
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    log::debug!("save_config: Saving to {:?}", path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;
    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::info!("save_config: Config saved to {:?}", path);
    Ok(())
}
