use super::color::Color;
use super::note::{Note, DEFAULT_COLOR_HEX};
use crate::error::ValidationError;

/// User input for a new or edited note, before it is allowed near the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub color_hex: String,
    pub tags: Vec<String>,
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            color_hex: DEFAULT_COLOR_HEX.to_string(),
            tags: Vec::new(),
        }
    }
}

impl NoteDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Start an edit from the currently loaded version of a note.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            color_hex: note.color_hex.clone(),
            tags: note.tags.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        self.color_hex.parse::<Color>()?;
        Ok(())
    }

    /// Validate and build the note to persist. The title is kept as typed;
    /// tags are normalized.
    pub fn into_note(self, id: impl Into<String>) -> Result<Note, ValidationError> {
        self.validate()?;
        Ok(Note {
            id: id.into(),
            title: self.title,
            content: self.content,
            color_hex: self.color_hex,
            tags: normalize_tags(&self.tags),
        })
    }
}

/// Split a comma-separated tag field into trimmed, non-empty tags.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize tags given one per entry, where each entry may itself be a
/// comma-separated list. Order is preserved.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter().flat_map(|t| parse_tags(t)).collect()
}
