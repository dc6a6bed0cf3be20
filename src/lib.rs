pub mod cli;
pub mod config;
pub mod controller;
pub mod entity;
pub mod error;
pub mod search;
pub mod storage;

pub use config::StoreConfig;
pub use controller::{ControllerFailure, NoteController, Operation, SubmitOutcome};
pub use entity::{Color, Note, NoteDraft};
pub use error::{NotepadError, Result, StorageError, ValidationError};
pub use storage::{LoroCollection, MemoryCollection, NoteStore, Record, RemoteCollection};
