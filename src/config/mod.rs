//! Configuration loading and saving.
//!
//! Saves are atomic: the file is written to a temporary sibling and
//! renamed into place, so a crash mid-write never leaves a truncated
//! config behind.

mod settings;

pub use settings::{EncoderSettings, PathSettings, ReleaseSettings, Settings, WorkerSettings};

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load settings from a TOML file.
///
/// Returns `ConfigError::NotFound` if the file doesn't exist.
pub fn load(path: &Path) -> ConfigResult<Settings> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let settings = toml::from_str(&content)?;
    Ok(settings)
}

/// Load settings, writing a default config file if none exists.
pub fn load_or_create(path: &Path) -> ConfigResult<Settings> {
    match load(path) {
        Err(ConfigError::NotFound(_)) => {
            let settings = Settings::default();
            save(path, &settings)?;
            tracing::info!("Created default config at {}", path.display());
            Ok(settings)
        }
        other => other,
    }
}

/// Save settings atomically (write to temp file, then rename).
pub fn save(path: &Path, settings: &Settings) -> ConfigResult<()> {
    let content = toml::to_string_pretty(settings)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("toml.tmp");
    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&temp_path, path)?;

    Ok(())
}
