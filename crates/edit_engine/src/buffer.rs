//! Editor buffers
//!
//! [`Buffer`] is the surface a command sees of the view it runs in: the file
//! identity, the text, the current selection and the live view settings.
//! [`TextBuffer`] is an in-memory implementation backed by a `String`.

use crate::{EditError, Range, Result, Selection, ViewSettings};
use std::path::{Path, PathBuf};

/// Editor-facing view of a document
pub trait Buffer {
    /// Path the buffer was last saved to, `None` for never-saved buffers
    fn file_name(&self) -> Option<&Path>;

    /// Length of the text in characters
    fn size(&self) -> usize;

    /// Text covered by `range`
    fn substr(&self, range: Range) -> Result<String>;

    /// Replace the text covered by `range`, returning the range now
    /// occupied by `text`
    fn replace(&mut self, range: Range, text: &str) -> Result<Range>;

    fn selection(&self) -> &Selection;

    fn settings(&self) -> &ViewSettings;

    /// Range covering the whole text
    fn full_range(&self) -> Range {
        Range::new(0, self.size())
    }
}

/// A buffer held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    path: Option<PathBuf>,
    text: String,
    selection: Selection,
    settings: ViewSettings,
    dirty: bool,
}

impl TextBuffer {
    /// Create an unsaved buffer holding `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Create a buffer that claims to be backed by `path` without touching disk
    pub fn with_path(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Load a buffer from a file on disk
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = std::fs::read_to_string(&path)?;
        tracing::debug!(path = %path.display(), chars = text.chars().count(), "opened buffer");
        Ok(Self::with_path(path, text))
    }

    /// Write the text back to the buffer's path
    pub fn save(&mut self) -> Result<()> {
        if let Some(path) = &self.path {
            std::fs::write(path, &self.text)?;
            self.dirty = false;
            tracing::debug!(path = %path.display(), "saved buffer");
        }
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn settings_mut(&mut self) -> &mut ViewSettings {
        &mut self.settings
    }

    /// Builder-style selection setter
    pub fn with_selection(mut self, ranges: impl IntoIterator<Item = Range>) -> Self {
        self.selection = Selection::from_ranges(ranges);
        self
    }

    /// Builder-style settings setter
    pub fn with_settings(mut self, settings: ViewSettings) -> Self {
        self.settings = settings;
        self
    }

    fn byte_range(&self, range: Range) -> Result<std::ops::Range<usize>> {
        let out_of_bounds = || EditError::OutOfBounds {
            range,
            len: self.text.chars().count(),
        };
        let start = self.byte_offset(range.start).ok_or_else(out_of_bounds)?;
        let end = self.byte_offset(range.end).ok_or_else(out_of_bounds)?;
        Ok(start..end)
    }

    fn byte_offset(&self, char_offset: usize) -> Option<usize> {
        self.text
            .char_indices()
            .map(|(index, _)| index)
            .chain(std::iter::once(self.text.len()))
            .nth(char_offset)
    }

    /// Carry the selection across an edit of `replaced` that produced `inserted`
    fn adjust_selection(&mut self, replaced: Range, inserted: Range) {
        let delta = inserted.end as isize - replaced.end as isize;
        let adjusted: Vec<Range> = self
            .selection
            .iter()
            .map(|&range| {
                if range.end <= replaced.start && range != replaced {
                    range
                } else if range.start >= replaced.end && range != replaced {
                    range.shifted(delta)
                } else {
                    let start = range.start.min(replaced.start);
                    let end = range.end.max(replaced.end);
                    Range::new(start, Range::caret(end).shifted(delta).end.max(start))
                }
            })
            .collect();
        self.selection = Selection::from_ranges(adjusted);
    }
}

impl Buffer for TextBuffer {
    fn file_name(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn size(&self) -> usize {
        self.text.chars().count()
    }

    fn substr(&self, range: Range) -> Result<String> {
        let bytes = self.byte_range(range)?;
        Ok(self.text[bytes].to_string())
    }

    fn replace(&mut self, range: Range, text: &str) -> Result<Range> {
        let bytes = self.byte_range(range)?;
        self.text.replace_range(bytes, text);
        self.dirty = true;

        let inserted = Range::new(range.start, range.start + text.chars().count());
        self.adjust_selection(range, inserted);
        Ok(inserted)
    }

    fn selection(&self) -> &Selection {
        &self.selection
    }

    fn settings(&self) -> &ViewSettings {
        &self.settings
    }
}
