//! Guard settings and their persistence.
//!
//! Settings are read from TOML. When no explicit path is given they come from
//! the platform configuration folder:
//! - macOS: ~/Library/Application Support/dev.pageguard.pageguard/
//! - Windows: %APPDATA%/pageguard/pageguard/config/
//! - Linux: ~/.config/pageguard/

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::host::Hue;
use crate::messages::{Locale, Messages};

const APP_QUALIFIER: &str = "dev";
const APP_ORG: &str = "pageguard";
const APP_NAME: &str = "pageguard";
const CONFIG_FILENAME: &str = "settings.toml";

// ============================================================================
// Main Settings Struct
// ============================================================================

/// Everything a page controller can be tuned with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardSettings {
    pub markers: MarkerSettings,
    pub appearance: AppearanceSettings,
    pub messages: MessageSettings,
}

impl GuardSettings {
    /// Wording for the configured locale with overrides applied.
    pub fn resolved_messages(&self) -> Messages {
        let mut messages = Messages::for_locale(self.messages.locale);
        let overrides = &self.messages;
        if let Some(text) = &overrides.concurrent_edit {
            messages.concurrent_edit = text.clone();
        }
        if let Some(text) = &overrides.confirm_destructive {
            messages.confirm_destructive = text.clone();
        }
        if let Some(text) = &overrides.cancel_label {
            messages.cancel_label = text.clone();
        }
        if let Some(text) = &overrides.range_violation {
            messages.range_violation = text.clone();
        }
        if let Some(text) = &overrides.unbounded_above {
            messages.unbounded_above = text.clone();
        }
        if let Some(text) = &overrides.unbounded_below {
            messages.unbounded_below = text.clone();
        }
        messages
    }

    /// CSS color for a hue.
    pub fn hue_color(&self, hue: Hue) -> &str {
        match hue {
            Hue::Error => &self.appearance.error_hue,
            Hue::Neutral => &self.appearance.neutral_hue,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

// ============================================================================
// Markup markers
// ============================================================================

/// How guarded elements are recognized in markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSettings {
    /// Path segment identifying edit links.
    pub edit_segment: String,
    /// Path segment identifying destructive form actions.
    pub delete_segment: String,
    /// Class of secondary buttons checked for the cancel label.
    pub secondary_class: String,
    /// Attribute that marks a control as an explicit cancel control.
    pub cancel_attribute: String,
    /// Also treat secondary buttons whose text contains the cancel label as
    /// cancel controls.
    pub legacy_cancel_label: bool,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            edit_segment: "/edit/".to_string(),
            delete_segment: "/delete/".to_string(),
            secondary_class: "btn-secondary".to_string(),
            cancel_attribute: "data-editor-cancel".to_string(),
            legacy_cancel_label: true,
        }
    }
}

// ============================================================================
// Appearance
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceSettings {
    /// Border color of a field that failed a check.
    pub error_hue: String,
    /// Border color of a field that passed.
    pub neutral_hue: String,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            error_hue: "#e74c3c".to_string(),
            neutral_hue: "#ddd".to_string(),
        }
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Locale selection plus optional per-sentence overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageSettings {
    pub locale: Locale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrent_edit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_destructive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_violation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unbounded_above: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unbounded_below: Option<String>,
}

// ============================================================================
// Persistence
// ============================================================================

/// Get the path to the default settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings.
///
/// An explicit path must exist and parse. Without one, the default file is
/// used when present and defaults are returned otherwise.
pub fn load_settings(path: Option<&Path>) -> Result<GuardSettings> {
    if let Some(path) = path {
        let content = fs::read_to_string(path)?;
        let settings = GuardSettings::from_toml_str(&content)?;
        tracing::info!("Loaded settings from {:?}", path);
        return Ok(settings);
    }

    let Some(path) = settings_path() else {
        tracing::warn!("Could not determine settings path, using defaults");
        return Ok(GuardSettings::default());
    };

    match fs::read_to_string(&path) {
        Ok(content) => match GuardSettings::from_toml_str(&content) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {:?}", path);
                Ok(settings)
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                Ok(GuardSettings::default())
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No settings file found at {:?}, using defaults", path);
            Ok(GuardSettings::default())
        }
        Err(e) => Err(e.into()),
    }
}
