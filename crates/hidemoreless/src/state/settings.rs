//! Application settings

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::i18n::Lang;

/// Hider behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HiderSettings {
    /// Switch off the document's "hide rest of model" when a command hides levels
    pub disable_hide_rest: bool,
    /// Restore the depth after the host's save close/reopen round-trip
    pub reconcile_saves: bool,
    /// Prefix for status bar messages
    pub status_prefix: String,
}

impl Default for HiderSettings {
    fn default() -> Self {
        Self {
            disable_hide_rest: true,
            reconcile_saves: true,
            status_prefix: "HideMoreLess".to_string(),
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppSettings {
    /// Status text language
    #[serde(default)]
    pub language: Lang,
    /// Hider settings
    #[serde(default)]
    pub hider: HiderSettings,
}

impl AppSettings {
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "hidemoreless", "hidemoreless")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the config dir, or return default if not found
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("{e}; using default settings"),
                }
            }
        }
        Self::default()
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings {}: {e}", path.display()))?;
        serde_json::from_str(&json)
            .map_err(|e| format!("Failed to parse settings {}: {e}", path.display()))
    }

    /// Save settings to the config dir
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            tracing::warn!("No config directory; settings not saved");
            return;
        };
        match self.save_to(&path) {
            Ok(()) => tracing::info!("Saved settings to {}", path.display()),
            Err(e) => tracing::error!("{e}"),
        }
    }

    /// Write settings as pretty JSON to an explicit file, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config dir {}: {e}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {e}"))?;
        std::fs::write(path, json)
            .map_err(|e| format!("Failed to write settings {}: {e}", path.display()))
    }
}
