use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{HostError, HostResult};

/// User settings persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub has_seen_tutorial: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_display: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_lang: Option<String>,
    /// Keys written by other versions, kept on round-trip
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Settings {
    /// Opening message describing the user's language preferences, if a code
    /// language is set.
    pub fn context_message(&self) -> Option<String> {
        let code = self.code_lang.as_deref().map(str::trim).filter(|c| !c.is_empty())?;
        let output = output_language_name(self.output_lang.as_deref().unwrap_or("en"));

        let mut chars = code.chars();
        let code = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };

        Some(format!(
            "I'm currently working on a {} problem. Please provide all explanations and responses in {}.",
            code, output
        ))
    }
}

fn output_language_name(code: &str) -> &'static str {
    match code {
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "zh" => "Chinese",
        "ja" => "Japanese",
        _ => "English",
    }
}

/// Key-value persistence for [`Settings`].
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> HostResult<Settings>;
    async fn persist(&self, settings: &Settings) -> HostResult<()>;
}

/// Stores settings as pretty-printed JSON in a single file.
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location in the app data dir
    pub fn at_default_location() -> anyhow::Result<Self> {
        Ok(Self::new(crate::paths::get_settings_file()?))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn load(&self) -> HostResult<Settings> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let settings: Settings = serde_json::from_str(&contents)?;
                debug!("Loaded settings from {:?}", self.path);
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No settings file at {:?}, using defaults", self.path);
                Ok(Settings::default())
            }
            Err(e) => Err(HostError::from(e)),
        }
    }

    async fn persist(&self, settings: &Settings) -> HostResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(settings)?;
        tokio::fs::write(&self.path, contents).await?;
        debug!("Persisted settings to {:?}", self.path);
        Ok(())
    }
}
