//! Error types for buffer editing

use crate::Range;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Range {range} is outside the buffer (length {len})")]
    OutOfBounds { range: Range, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EditError>;
