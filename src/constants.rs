// src/constants.rs

/// Suffix of the legacy selection keys that toggle the slider widget of a number argument.
/// Keys carrying it are never substituted into a template.
pub const SLIDER_TOGGLE_SUFFIX: &str = "-useSlider";

/// Select value meaning "no option chosen". Setting it clears the selection.
pub const NONE_SELECTED: &str = "none-selected";

/// The name of the application directory inside the platform config directory.
pub const APP_DIR: &str = "gm-handbook";

/// The name of the settings file (inside the app config directory).
pub const SETTINGS_FILENAME: &str = "settings.toml";

/// The name of the directory holding the catalog documents (inside the app config directory).
pub const COMMANDS_DIRNAME: &str = "commands";

/// Environment variable that points at an alternative settings file.
pub const SETTINGS_PATH_ENV: &str = "GMH_CONFIG";

/// Default `limit` for remote handbook searches when the body template omits it.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
