//! Text edits produced by a formatting engine

use similar::{ChangeTag, TextDiff};

/// Edit that does not fit the text it is applied to
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// The edit reaches past the end of the text
    #[error("edit at {offset}+{length} is out of bounds for text of length {text_len}")]
    OutOfBounds {
        /// Edit start
        offset: usize,
        /// Replaced length
        length: usize,
        /// Text length
        text_len: usize,
    },

    /// The edit starts before the previous edit ended
    #[error("edit at {offset} overlaps previous edit ending at {previous_end}")]
    Overlapping {
        /// Edit start
        offset: usize,
        /// End of the previous edit
        previous_end: usize,
    },

    /// An edit boundary falls inside a multi-byte character
    #[error("edit boundary {0} is not on a character boundary")]
    NotCharBoundary(usize),
}

/// Replace `length` bytes at `offset` with `text`
///
/// Insertions have a zero length, deletions an empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceEdit {
    /// Byte offset in the original text
    pub offset: usize,
    /// Number of original bytes replaced
    pub length: usize,
    /// Replacement text
    pub text: String,
}

impl ReplaceEdit {
    /// Create a replacement
    #[must_use]
    pub fn new(offset: usize, length: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            length,
            text: text.into(),
        }
    }

    /// End offset in the original text
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }
}

/// Ordered, non-overlapping set of edits against one original text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextEdit {
    edits: Vec<ReplaceEdit>,
}

impl TextEdit {
    /// Edit set that changes nothing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an edit; edits must be added in ascending offset order
    #[must_use]
    pub fn with(mut self, edit: ReplaceEdit) -> Self {
        self.edits.push(edit);
        self
    }

    /// Whether applying this edit set is a no-op
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Number of edits
    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Individual edits in application order
    pub fn iter(&self) -> impl Iterator<Item = &ReplaceEdit> {
        self.edits.iter()
    }

    /// Derive the line-level edits that turn `original` into `formatted`
    #[must_use]
    pub fn between(original: &str, formatted: &str) -> Self {
        let diff = TextDiff::from_lines(original, formatted);

        let mut edits = Vec::new();
        let mut offset = 0;
        let mut pending: Option<ReplaceEdit> = None;

        for change in diff.iter_all_changes() {
            let value = change.value();
            match change.tag() {
                ChangeTag::Equal => {
                    edits.extend(pending.take());
                    offset += value.len();
                }
                ChangeTag::Delete => {
                    pending
                        .get_or_insert_with(|| ReplaceEdit::new(offset, 0, String::new()))
                        .length += value.len();
                    offset += value.len();
                }
                ChangeTag::Insert => {
                    pending
                        .get_or_insert_with(|| ReplaceEdit::new(offset, 0, String::new()))
                        .text
                        .push_str(value);
                }
            }
        }
        edits.extend(pending);

        Self { edits }
    }

    /// Apply every edit to `original` in one pass
    ///
    /// # Errors
    ///
    /// Returns an error if an edit is out of bounds, overlaps its predecessor
    /// or splits a character.
    pub fn apply(&self, original: &str) -> Result<String, EditError> {
        let mut output = String::with_capacity(original.len());
        let mut cursor = 0;

        for edit in &self.edits {
            if edit.offset < cursor {
                return Err(EditError::Overlapping {
                    offset: edit.offset,
                    previous_end: cursor,
                });
            }
            if edit.end() > original.len() {
                return Err(EditError::OutOfBounds {
                    offset: edit.offset,
                    length: edit.length,
                    text_len: original.len(),
                });
            }
            for boundary in [edit.offset, edit.end()] {
                if !original.is_char_boundary(boundary) {
                    return Err(EditError::NotCharBoundary(boundary));
                }
            }

            output.push_str(&original[cursor..edit.offset]);
            output.push_str(&edit.text);
            cursor = edit.end();
        }

        output.push_str(&original[cursor..]);
        Ok(output)
    }
}

impl FromIterator<ReplaceEdit> for TextEdit {
    fn from_iter<T: IntoIterator<Item = ReplaceEdit>>(iter: T) -> Self {
        Self {
            edits: iter.into_iter().collect(),
        }
    }
}
