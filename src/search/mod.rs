//! Client-side note filtering.
//!
//! Filtering is a pure view over an already loaded slice of notes; it never
//! touches the store or the controller's state.

use crate::entity::Note;

/// True if `query` appears, ignoring case, in the note's title, content,
/// or any of its tags. An empty query matches every note.
pub fn matches(note: &Note, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    contains(&note.title) || contains(&note.content) || note.tags.iter().any(|t| contains(t))
}

/// The notes matching `query`, in their original order.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    notes.iter().filter(|n| matches(n, query)).collect()
}
