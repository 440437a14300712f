//! Configuration module for application settings.
//!
//! # Module Structure
//!
//! - `loader`: Resolves the settings location and reads/writes JSON files
//!
//! # Settings Management
//!
//! `SettingsManager` persists `AppState` to `~/.config/debugfolio/settings.json`.
//! Missing files yield defaults; unparseable files are logged and replaced by
//! defaults rather than aborting startup.

pub mod loader;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// What happens to a running analysis cycle when a different project is selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReselectPolicy {
    /// Tear the cycle down
    #[default]
    Stop,
    /// Start a fresh cycle against the new project
    Restart,
    /// Keep ticking against the new project's listing
    Continue,
}

impl ReselectPolicy {
    pub const ALL: [ReselectPolicy; 3] = [ReselectPolicy::Stop, ReselectPolicy::Restart, ReselectPolicy::Continue];
}

impl fmt::Display for ReselectPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReselectPolicy::Stop => write!(f, "Stop"),
            ReselectPolicy::Restart => write!(f, "Restart"),
            ReselectPolicy::Continue => write!(f, "Continue"),
        }
    }
}

/// Persisted application settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    // UI Customization Settings
    /// 0 = debugger palette, 1 = egui dark, 2 = egui light
    pub theme_idx: usize,
    pub ui_font_size: f32,
    pub show_console: bool,

    // Analysis behaviour
    pub reselect_policy: ReselectPolicy,

    // Data locations
    /// Directory the resume dump is written to; platform download dir when empty
    pub export_dir: String,
    /// Optional portfolio JSON replacing the builtin data set
    pub portfolio_path: String,

    // Debug Settings
    pub debug_logging: bool,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            theme_idx: 0,
            ui_font_size: 12.0,
            show_console: true,
            reselect_policy: ReselectPolicy::Stop,
            export_dir: String::new(),
            portfolio_path: String::new(),
            debug_logging: false,
        }
    }
}

impl AppState {
    /// Directory the resume dump should be written to
    pub fn export_target(&self) -> PathBuf {
        if !self.export_dir.is_empty() {
            return PathBuf::from(&self.export_dir);
        }
        dirs::download_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn portfolio_file(&self) -> Option<PathBuf> {
        if self.portfolio_path.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(self.portfolio_path.trim()))
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug_logging {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }

    /// Reject values the UI cannot render
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.theme_idx > 2 {
            return Err(ConfigError::ValidationFailed(format!(
                "unknown theme index {}",
                self.theme_idx
            )));
        }
        if !(8.0..=32.0).contains(&self.ui_font_size) {
            return Err(ConfigError::ValidationFailed(format!(
                "font size {} outside 8-32pt",
                self.ui_font_size
            )));
        }
        Ok(())
    }
}

/// Settings persistence for AppState
pub struct SettingsManager;

impl SettingsManager {
    /// Load AppState from the global settings path, or return defaults if the file doesn't exist
    pub fn load() -> Result<AppState, ConfigError> {
        let path = loader::get_global_settings_path()?;
        Self::load_from(&path)
    }

    /// Load AppState from `path`
    ///
    /// ERROR HANDLING: parse or validation failures log a warning and return
    /// defaults, so a stale settings file never prevents startup.
    pub fn load_from(path: &Path) -> Result<AppState, ConfigError> {
        match loader::read_settings_file(path) {
            Ok(state) => match state.validate() {
                Ok(()) => Ok(state),
                Err(e) => {
                    log::warn!("[Config] Invalid settings in {}, falling back to defaults: {}", path.display(), e);
                    Ok(AppState::default())
                }
            },
            Err(ConfigError::FileNotFound(_)) => Ok(AppState::default()),
            Err(ConfigError::InvalidJson(e)) => {
                log::warn!("[Config] Failed to parse {}, falling back to defaults: {}", path.display(), e);
                Ok(AppState::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Save AppState to the global settings path
    pub fn save(state: &AppState) -> Result<(), ConfigError> {
        loader::ensure_settings_dir_exists()?;
        let path = loader::get_global_settings_path()?;
        Self::save_to(state, &path)
    }

    pub fn save_to(state: &AppState, path: &Path) -> Result<(), ConfigError> {
        state.validate()?;
        loader::write_settings_file(state, path)?;
        log::info!("[Config] Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_app_state_default() {
        let state = AppState::default();
        assert_eq!(state.reselect_policy, ReselectPolicy::Stop);
        assert_eq!(state.theme_idx, 0);
        assert!(state.validate().is_ok());
        assert!(state.portfolio_file().is_none());
        assert_eq!(state.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");

        let mut state = AppState::default();
        state.reselect_policy = ReselectPolicy::Restart;
        state.export_dir = "/tmp/dumps".to_string();
        state.debug_logging = true;

        SettingsManager::save_to(&state, &path).expect("save should succeed");
        let loaded = SettingsManager::load_from(&path).expect("load should succeed");
        assert_eq!(loaded, state);
        assert_eq!(loaded.export_target(), PathBuf::from("/tmp/dumps"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = SettingsManager::load_from(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, AppState::default());
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let loaded = SettingsManager::load_from(&path).unwrap();
        assert_eq!(loaded, AppState::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "reselect_policy": "continue" }"#).unwrap();
        let loaded = SettingsManager::load_from(&path).unwrap();
        assert_eq!(loaded.reselect_policy, ReselectPolicy::Continue);
        assert_eq!(loaded.ui_font_size, 12.0);
    }

    #[test]
    fn test_invalid_theme_rejected_on_save() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = AppState::default();
        state.theme_idx = 9;
        let result = SettingsManager::save_to(&state, &temp_dir.path().join("s.json"));
        assert!(matches!(result, Err(ConfigError::ValidationFailed(_))));
    }
}
