//! Application settings file
//!
//! A small JSON document with three sections:
//!
//! ```json
//! {
//!   "metadata": { "version": "0.1.0", "build_date": "", "compatible_version": "" },
//!   "localization": { "primary_language": "zh_CN", "available_languages": ["zh_CN", "en_US"], "zh_CN": "中文" },
//!   "system": { "initialized": false, "last_loaded": "", "link_path": "" }
//! }
//! ```
//!
//! Missing fields take their defaults. A missing or unreadable file yields
//! the default settings; the problem is logged, not returned.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::config::{write_atomic, ConfigError};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Metadata {
    pub version: String,
    pub build_date: String,
    pub compatible_version: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            build_date: String::new(),
            compatible_version: String::new(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Localization {
    pub primary_language: String,
    pub available_languages: Vec<String>,
    /// Display name per language code, stored inline (`"en_US": "English"`)
    #[serde(flatten)]
    pub display_names: BTreeMap<String, String>,
}

impl Default for Localization {
    fn default() -> Self {
        let display_names = [("zh_CN", "中文"), ("en_US", "English")]
            .into_iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect();

        Self {
            primary_language: "zh_CN".to_string(),
            available_languages: vec!["zh_CN".to_string(), "en_US".to_string()],
            display_names,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct SystemState {
    pub initialized: bool,
    /// Date of the last successful load, `YYYY.MM.DD`
    pub last_loaded: String,
    /// Linked manifest file; empty when nothing is linked
    pub link_path: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Settings {
    pub metadata: Metadata,
    pub localization: Localization,
    pub system: SystemState,
}

impl Settings {
    /// Display name for a language code, falling back to the code itself.
    pub fn language_display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.localization
            .display_names
            .get(code)
            .map(String::as_str)
            .unwrap_or(code)
    }

    pub fn link_path(&self) -> Option<PathBuf> {
        if self.system.link_path.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.system.link_path))
        }
    }
}

/// Settings bound to the file they are persisted in
///
/// Every setter saves immediately.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Loads settings from `path`, falling back to defaults.
    pub fn load(path: PathBuf) -> Self {
        let settings = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "unreadable settings, using defaults");
                Settings::default()
            }),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no settings file, using defaults");
                Settings::default()
            }
        };

        Self { path, settings }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Writes the settings as pretty JSON (atomic).
    pub fn save(&self) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(&self.settings)?;
        write_atomic(&self.path, &json)
    }

    pub fn set_primary_language(&mut self, language: &str) -> Result<(), ConfigError> {
        self.settings.localization.primary_language = language.to_string();
        self.save()
    }

    pub fn set_link_path(&mut self, path: &Path) -> Result<(), ConfigError> {
        self.settings.system.link_path = path.display().to_string();
        self.save()
    }

    pub fn mark_initialized(&mut self) -> Result<(), ConfigError> {
        self.settings.system.initialized = true;
        self.save()
    }

    /// Records today's date as the last load.
    pub fn touch_last_loaded(&mut self) -> Result<(), ConfigError> {
        self.settings.system.last_loaded = Local::now().format("%Y.%m.%d").to_string();
        self.save()
    }
}
