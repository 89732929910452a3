pub mod constants;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::paths;

/// Application configuration, stored as `config.json` in the app data dir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub version: String,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub shortcuts: ShortcutConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub always_on_top: bool,
    /// Exclude the overlay from screen capture and screen sharing
    pub stealth: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            always_on_top: true,
            stealth: true,
        }
    }
}

/// Global accelerators, in `Modifier+Key` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortcutConfig {
    pub toggle_visibility: String,
    pub screenshot: String,
    pub toggle_voice: String,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            toggle_visibility: "Alt+H".to_string(),
            screenshot: "Alt+S".to_string(),
            toggle_voice: "Alt+A".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: true,
        }
    }
}

/// Credential backend endpoint. Authentication is disabled while unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
}

impl AuthConfig {
    pub fn is_configured(&self) -> bool {
        matches!((&self.url, &self.anon_key), (Some(u), Some(k)) if !u.is_empty() && !k.is_empty())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            window: WindowConfig::default(),
            shortcuts: ShortcutConfig::default(),
            logging: LoggingConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from the app data dir, or create the default if missing
    pub fn load() -> Result<Self> {
        let config_file = paths::get_config_file()?;
        Self::load_from(&config_file)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

            let config: AppConfig =
                serde_json::from_str(&contents).context("Failed to parse config file")?;

            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save config to the app data dir
    pub fn save(&self) -> Result<()> {
        let config_file = paths::get_config_file()?;
        self.save_to(&config_file)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = serde_json::to_string_pretty(&self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.window.always_on_top);
        assert!(config.window.stealth);
        assert_eq!(config.shortcuts.toggle_visibility, "Alt+H");
        assert_eq!(config.shortcuts.screenshot, "Alt+S");
        assert_eq!(config.shortcuts.toggle_voice, "Alt+A");
        assert_eq!(config.logging.level, "info");
        assert!(!config.auth.is_configured());
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = AppConfig::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_round_trip_keeps_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.shortcuts.screenshot = "CmdOrCtrl+Shift+S".to_string();
        config.window.stealth = false;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.shortcuts.screenshot, "CmdOrCtrl+Shift+S");
        assert!(!loaded.window.stealth);
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"version": "0.0.1"}"#).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.version, "0.0.1");
        assert_eq!(loaded.shortcuts, ShortcutConfig::default());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }
}
