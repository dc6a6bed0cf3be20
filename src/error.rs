use thiserror::Error;

/// A draft was rejected before it reached the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    BlankTitle,

    #[error("Invalid hex color '{0}'. Expected #RRGGBB or #AARRGGBB")]
    InvalidColor(String),
}

/// Any failure of a round trip against the note collection.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Not in a notepad project. Run 'notepad init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .notepad/ to reinitialize.")]
    AlreadyInitialized,

    #[error("Cannot update a note without an id")]
    MissingId,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Loro error: {0}")]
    Loro(#[from] loro::LoroError),

    #[error("Loro encode error: {0}")]
    LoroEncode(#[from] loro::LoroEncodeError),
}

#[derive(Error, Debug)]
pub enum NotepadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Id prefix '{0}' matches more than one note")]
    AmbiguousId(String),

    #[error("Use --force to delete in non-interactive mode")]
    ConfirmationRequired,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NotepadError>;
