mod color;
mod draft;
mod note;

pub use color::{is_valid_hex, Color, FALLBACK_COLOR};
pub use draft::{normalize_tags, parse_tags, NoteDraft};
pub use note::{Note, DEFAULT_COLOR_HEX};
