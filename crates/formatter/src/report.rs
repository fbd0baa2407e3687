//! User-visible error reporting

use std::sync::Mutex;

/// Title line every error message starts with
pub const ERROR_TITLE: &str = "JsPrettier Error";

/// Surfaces errors to the user, typically as a modal dialog
pub trait ErrorReporter {
    fn error_message(&self, message: &str);
}

/// Lay out an error body under the plugin's title
pub fn dialog_text(body: &str) -> String {
    format!("{}\n\n{}", ERROR_TITLE, body)
}

/// Keeps every reported message for the host to show later
#[derive(Debug, Default)]
pub struct CollectingReporter {
    messages: Mutex<Vec<String>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages
            .lock()
            .map(|messages| messages.is_empty())
            .unwrap_or(true)
    }
}

impl ErrorReporter for CollectingReporter {
    fn error_message(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for &R {
    fn error_message(&self, message: &str) {
        (**self).error_message(message)
    }
}
