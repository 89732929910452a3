use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the application data directory based on platform
pub fn get_app_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        // Try dirs::home_dir() first, then fall back to HOME environment variable
        let home = dirs::home_dir()
            .or_else(|| std::env::var("HOME").ok().map(PathBuf::from))
            .context("Failed to get home directory - neither dirs::home_dir() nor HOME env var worked")?;
        Ok(home.join("Library/Application Support/BuzzOverlay"))
    }

    #[cfg(target_os = "windows")]
    {
        let app_data = std::env::var("APPDATA").context("APPDATA environment variable not set")?;
        Ok(PathBuf::from(app_data).join("BuzzOverlay"))
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let config_dir = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .or_else(|| std::env::var("HOME").ok().map(|home| PathBuf::from(home).join(".config")))
            .context("Failed to locate a config directory")?;
        Ok(config_dir.join("buzz-overlay"))
    }
}

/// Get the path to the logs directory
pub fn get_logs_dir() -> Result<PathBuf> {
    Ok(get_app_data_dir()?.join("logs"))
}

/// Get the path to the config file
pub fn get_config_file() -> Result<PathBuf> {
    Ok(get_app_data_dir()?.join("config.json"))
}

/// Get the path to the user settings file (tutorial flag, display choice, languages)
pub fn get_settings_file() -> Result<PathBuf> {
    Ok(get_app_data_dir()?.join("settings.json"))
}

/// Get the path to the persisted auth session
pub fn get_auth_session_file() -> Result<PathBuf> {
    Ok(get_app_data_dir()?.join("auth-session.json"))
}

/// Create all necessary directories
pub fn ensure_directories_exist() -> Result<()> {
    let app_dir = get_app_data_dir()?;

    std::fs::create_dir_all(&app_dir).context("Failed to create app data directory")?;

    std::fs::create_dir_all(app_dir.join("logs")).context("Failed to create logs directory")?;

    Ok(())
}
