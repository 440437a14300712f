//! Settings file location and serialization.

use crate::config::AppState;
use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "debugfolio";
const SETTINGS_FILE: &str = "settings.json";

fn settings_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .ok_or_else(|| ConfigError::ValidationFailed("Cannot determine config directory".to_string()))?;
    Ok(base.join(APP_DIR))
}

/// Get the global settings path: ~/.config/debugfolio/settings.json
pub fn get_global_settings_path() -> Result<PathBuf, ConfigError> {
    Ok(settings_dir()?.join(SETTINGS_FILE))
}

/// Ensure the global settings directory exists
pub fn ensure_settings_dir_exists() -> Result<(), ConfigError> {
    fs::create_dir_all(settings_dir()?).map_err(ConfigError::IoError)
}

/// Read settings JSON from `path`.
pub fn read_settings_file(path: &Path) -> Result<AppState, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound(path.display().to_string())
        } else {
            ConfigError::IoError(e)
        }
    })?;

    let state: AppState = serde_json::from_str(&content).map_err(ConfigError::InvalidJson)?;
    Ok(state)
}

/// Write settings JSON to `path`, creating parent directories.
pub fn write_settings_file(state: &AppState, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(ConfigError::IoError)?;
        }
    }

    let json_content = serde_json::to_string_pretty(state).map_err(ConfigError::InvalidJson)?;
    fs::write(path, json_content).map_err(ConfigError::IoError)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_path_ends_with_app_dir() {
        if let Ok(path) = get_global_settings_path() {
            assert!(path.ends_with("debugfolio/settings.json"));
        }
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = read_settings_file(Path::new("/nonexistent/path/settings.json"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
