//! Formatter options for a single invocation

use crate::Result;
use serde::Serialize;
use serde_json::{Map, Value};

/// Option name the formatter reads the indentation width from
pub const TAB_WIDTH_KEY: &str = "tabWidth";

/// The merged option set passed to the formatter.
///
/// Built once per command invocation and never mutated afterwards. The
/// indentation width always comes from the live view, whatever the stored
/// settings say.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormatConfig {
    options: Map<String, Value>,
}

impl FormatConfig {
    /// Combine configured options with the view's indentation width
    pub fn new(options: &Map<String, Value>, tab_width: u32) -> Self {
        let mut options = options.clone();
        options.insert(TAB_WIDTH_KEY.to_string(), Value::from(tab_width));
        Self { options }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn tab_width(&self) -> Option<u64> {
        self.options.get(TAB_WIDTH_KEY).and_then(Value::as_u64)
    }

    /// Compact JSON form handed to the formatter on its command line
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.options)?)
    }
}
