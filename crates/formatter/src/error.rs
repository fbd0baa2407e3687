//! Error types for formatting operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    /// The buffer has never been saved, so there is no directory to run in
    #[error("The current view/buffer must be Saved before running JsPrettier.")]
    NoPersistedIdentity,

    /// The formatter runtime could not be started
    #[error(
        "{runtime} program path not found! Please ensure the path to {runtime} \
         is set in your $PATH env variable by running `{runtime} -v` from the command-line."
    )]
    ToolNotFound {
        runtime: String,
        #[source]
        source: std::io::Error,
    },

    /// The formatter ran but wrote nothing usable; carries its diagnostic output
    #[error("{0}")]
    FormatterDiagnostic(String),

    #[error("Buffer error: {0}")]
    Edit(#[from] edit_engine::EditError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FormatError {
    pub fn tool_not_found(runtime: impl Into<String>, source: std::io::Error) -> Self {
        Self::ToolNotFound {
            runtime: runtime.into(),
            source,
        }
    }

    pub fn diagnostic(message: impl Into<String>) -> Self {
        Self::FormatterDiagnostic(message.into())
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;
