//! Live per-view settings

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Indentation width used when the view does not carry a usable `tab_size`
pub const DEFAULT_TAB_SIZE: u32 = 2;

/// Settings attached to a single view.
///
/// This is a loosely typed JSON object, mirroring how editors expose view
/// settings: any key may be present, with any value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewSettings {
    values: Map<String, Value>,
}

impl ViewSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`ViewSettings::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// The indentation width currently in effect for the view
    ///
    /// Accepts positive integers and numeric strings; anything else falls
    /// back to [`DEFAULT_TAB_SIZE`].
    pub fn tab_size(&self) -> u32 {
        let parsed = match self.values.get("tab_size") {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        parsed
            .filter(|&size| size > 0)
            .and_then(|size| u32::try_from(size).ok())
            .unwrap_or(DEFAULT_TAB_SIZE)
    }

    /// Per-view override object stored under `plugin_name`, if it is an object
    pub fn plugin_overrides(&self, plugin_name: &str) -> Option<&Map<String, Value>> {
        self.values.get(plugin_name).and_then(Value::as_object)
    }
}
