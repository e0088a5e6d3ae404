// src/system/settings.rs

use crate::{
    core::paths::{self, PathError},
    models::{CommandTab, PlayerSettings, Settings, TransportSettings},
};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    #[error("Failed to parse settings file '{}': {source}", .path.display())]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to serialize settings to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Loads the settings from their default location (see [`paths::get_settings_path`]).
pub fn load_settings() -> Result<Settings, SettingsError> {
    let path = paths::get_settings_path()?;
    load_settings_from(&path)
}

/// Loads the settings at `path`. A missing file is created with the defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    if !path.exists() {
        log::debug!(
            "Settings file '{}' not found, writing defaults.",
            path.display()
        );
        let default_settings = generate_default_settings()?;
        save_settings_to(path, &default_settings)?;
        return Ok(default_settings);
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| SettingsError::TomlParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `settings` to `path`, creating the parent directory if needed.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let toml_string = toml::to_string_pretty(settings)?;
    fs::write(path, toml_string)?;
    Ok(())
}

/// The directory holding the catalog documents, with `~` and `$VAR` expanded.
pub fn resolve_commands_dir(settings: &Settings) -> Result<PathBuf, SettingsError> {
    Ok(paths::expand_path(&settings.commands_dir)?)
}

fn generate_default_settings() -> Result<Settings, SettingsError> {
    let commands_dir = paths::get_default_commands_dir()?;
    Ok(Settings {
        commands_dir: commands_dir.display().to_string(),
        default_tab: CommandTab::default(),
        player: PlayerSettings::default(),
        transport: TransportSettings::default(),
    })
}
