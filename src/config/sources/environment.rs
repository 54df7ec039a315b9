//! Environment variable source: MACTRANS_CONFIG overrides the settings file location.

use std::path::PathBuf;

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "MACTRANS_CONFIG";

/// Settings file path from the environment, if set and non-empty.
pub fn config_path_override() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
