use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ShortcutConfig;

/// Commands bound to global key combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShortcutCommand {
    ToggleVisibility,
    Screenshot,
    ToggleVoice,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcceleratorError {
    #[error("empty accelerator")]
    Empty,
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
    #[error("accelerator '{0}' has no key")]
    MissingKey(String),
}

const MODIFIERS: &[&str] = &[
    "alt",
    "option",
    "shift",
    "ctrl",
    "control",
    "cmd",
    "command",
    "super",
    "cmdorctrl",
    "commandorcontrol",
];

/// Check that an accelerator reads `Modifier+...+Key` and normalise spacing.
pub fn parse_accelerator(raw: &str) -> Result<String, AcceleratorError> {
    let parts: Vec<&str> = raw.split('+').map(str::trim).collect();
    if parts.iter().all(|p| p.is_empty()) {
        return Err(AcceleratorError::Empty);
    }

    let (key, modifiers) = parts
        .split_last()
        .ok_or(AcceleratorError::Empty)?;
    if key.is_empty() || MODIFIERS.contains(&key.to_ascii_lowercase().as_str()) {
        return Err(AcceleratorError::MissingKey(raw.to_string()));
    }
    for modifier in modifiers {
        if !MODIFIERS.contains(&modifier.to_ascii_lowercase().as_str()) {
            return Err(AcceleratorError::UnknownModifier(modifier.to_string()));
        }
    }

    Ok(parts.join("+"))
}

/// Accelerator/command pairs to register, skipping invalid entries.
pub fn bindings(config: &ShortcutConfig) -> Vec<(String, ShortcutCommand)> {
    [
        (&config.toggle_visibility, ShortcutCommand::ToggleVisibility),
        (&config.screenshot, ShortcutCommand::Screenshot),
        (&config.toggle_voice, ShortcutCommand::ToggleVoice),
    ]
    .into_iter()
    .filter_map(|(raw, command)| match parse_accelerator(raw) {
        Ok(accelerator) => Some((accelerator, command)),
        Err(e) => {
            tracing::warn!("Skipping shortcut for {:?}: {}", command, e);
            None
        }
    })
    .collect()
}
