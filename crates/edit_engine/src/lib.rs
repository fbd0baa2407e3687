//! Edit Engine - Buffers, ranges, selection and view settings
//!
//! This crate implements the editor-side model a command operates on:
//! character-addressed ranges, the ordered selection set, the `Buffer`
//! trait and an in-memory buffer implementation.

mod buffer;
mod error;
mod range;
mod selection;
mod view_settings;

pub use buffer::*;
pub use error::*;
pub use range::*;
pub use selection::*;
pub use view_settings::*;
