//! Plugin settings management
//!
//! Settings come from two tiers: an override object stored in the view's own
//! settings under the plugin name, and the persisted settings file. The two
//! are merged by [`resolve`], with the view tier winning key by key.

use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Name the plugin is known by in view settings and file names
pub const PLUGIN_NAME: &str = "JsPrettier";

/// File name of the persisted settings
pub const SETTINGS_FILE: &str = "JsPrettier.sublime-settings";

/// Settings understood by the formatter command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    /// Options handed to the formatter as-is (`printWidth`, `semi`, ...)
    pub config: Map<String, Value>,
    /// Extra search-path entries used to locate the formatter runtime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_path: Option<String>,
}

impl PluginSettings {
    /// Parse settings from a loosely typed override object
    ///
    /// Keys with the wrong shape are ignored rather than failing the whole
    /// object.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let config = object
            .get("config")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let node_path = object
            .get("node_path")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { config, node_path }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    pub fn with_node_path(mut self, node_path: impl Into<String>) -> Self {
        self.node_path = Some(node_path.into());
        self
    }
}

/// Merge view-level overrides over the file-level defaults
pub fn resolve(view_overrides: Option<&PluginSettings>, file_defaults: &PluginSettings) -> PluginSettings {
    let Some(overrides) = view_overrides else {
        return file_defaults.clone();
    };

    let mut config = file_defaults.config.clone();
    for (key, value) in &overrides.config {
        config.insert(key.clone(), value.clone());
    }

    PluginSettings {
        config,
        node_path: overrides
            .node_path
            .clone()
            .or_else(|| file_defaults.node_path.clone()),
    }
}

/// Loads the persisted settings file
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: PluginSettings,
}

impl SettingsManager {
    /// Create a settings manager for the settings file inside `settings_dir`
    pub fn new(settings_dir: impl AsRef<Path>) -> Self {
        Self {
            settings_path: settings_dir.as_ref().join(SETTINGS_FILE),
            current: PluginSettings::default(),
        }
    }

    /// Load settings from disk, or fall back to defaults if the file is
    /// missing or unparsable
    pub fn load(&mut self) -> Result<&PluginSettings> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            self.current = self.parse_or_default(&content);
        } else {
            self.current = PluginSettings::default();
        }
        Ok(&self.current)
    }

    fn parse_or_default(&self, content: &str) -> PluginSettings {
        match serde_json::from_str::<PluginSettings>(content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    path = %self.settings_path.display(),
                    "Failed to parse settings file, using defaults: {}",
                    e
                );
                PluginSettings::default()
            }
        }
    }
}
