//! Store - Plugin settings persistence
//!
//! This crate loads the plugin settings file and resolves the
//! effective settings for a view from its overrides and the file defaults.

mod error;
mod settings;

pub use error::*;
pub use settings::*;
