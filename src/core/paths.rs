// src/core/paths.rs

use crate::constants::{APP_DIR, COMMANDS_DIRNAME, SETTINGS_FILENAME, SETTINGS_PATH_ENV};
use lazy_static::lazy_static;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

lazy_static! {
    static ref APP_CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Could not create config directory at '{path}': {source}")]
    ConfigDirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to expand path '{path}': {reason}")]
    Expansion { path: String, reason: String },
}

/// Returns the application configuration directory (`~/.config/gm-handbook` on Linux).
/// Creates it if it doesn't exist.
///
/// Memoized: the first call computes and caches the path, later calls return the
/// cached value.
pub fn get_app_config_dir() -> Result<PathBuf, PathError> {
    let mut cached_path_guard = APP_CONFIG_DIR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(path) = &*cached_path_guard {
        return Ok(path.clone());
    }

    let config_path = dirs::config_dir()
        .ok_or(PathError::ConfigDirNotFound)?
        .join(APP_DIR);

    if !config_path.exists() {
        fs::create_dir_all(&config_path).map_err(|e| PathError::ConfigDirCreation {
            path: config_path.display().to_string(),
            source: e,
        })?;
    }

    *cached_path_guard = Some(config_path.clone());
    Ok(config_path)
}

/// Path of the settings file. `GMH_CONFIG` wins over the config directory.
pub fn get_settings_path() -> Result<PathBuf, PathError> {
    if let Ok(explicit) = std::env::var(SETTINGS_PATH_ENV)
        && !explicit.trim().is_empty()
    {
        log::debug!("Using settings file from ${}: {}", SETTINGS_PATH_ENV, explicit);
        return expand_path(&explicit);
    }
    get_app_config_dir().map(|dir| dir.join(SETTINGS_FILENAME))
}

/// Default location of the catalog documents.
pub fn get_default_commands_dir() -> Result<PathBuf, PathError> {
    get_app_config_dir().map(|dir| dir.join(COMMANDS_DIRNAME))
}

/// Expands `~` and environment variables (`$VAR`, `${VAR}`) in a user-supplied path.
pub fn expand_path(template: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(template).map_err(|e| PathError::Expansion {
        path: template.to_string(),
        reason: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}
