// src/entity/note.rs
use serde::{Deserialize, Serialize};

use super::color::{Color, FALLBACK_COLOR};

/// Color written for notes that never had one chosen.
pub const DEFAULT_COLOR_HEX: &str = "#FFFFFF";

/// A single note as stored in the collection.
///
/// Field names on the wire are camelCase (`colorHex`). Records missing a
/// field deserialize with the same defaults a fresh note gets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub color_hex: String,
    pub tags: Vec<String>,
}

impl Default for Note {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            content: String::new(),
            color_hex: DEFAULT_COLOR_HEX.to_string(),
            tags: Vec::new(),
        }
    }
}

impl Note {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Color used when rendering this note. Never fails: unparseable
    /// values fall back to light gray.
    pub fn display_color(&self) -> Color {
        self.color_hex.parse().unwrap_or(FALLBACK_COLOR)
    }

    /// Short id prefix for human-facing output.
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(7) {
            Some((end, _)) => &self.id[..end],
            None => &self.id,
        }
    }
}
