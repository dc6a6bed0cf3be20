//! Note persistence against a keyed document collection.
//!
//! [`NoteStore`] owns id assignment and record (de)serialization. The
//! collection behind it is anything implementing [`RemoteCollection`]:
//! [`LoroCollection`] on disk, or [`MemoryCollection`] in process.

mod loro_store;
mod memory;

pub use loro_store::{LoroCollection, NOTEPAD_DIR};
pub use memory::MemoryCollection;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::entity::Note;
use crate::error::StorageError;

/// A flat mapping of field names to primitive values.
pub type Record = serde_json::Map<String, Value>;

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// A keyed document collection. Each call is one atomic round trip.
#[async_trait]
pub trait RemoteCollection: Send + Sync {
    /// Write `record` under `key`, replacing whatever was there.
    async fn set(&self, key: &str, record: Record) -> StorageResult<()>;

    /// Remove the record at `key`. Missing keys are not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Fetch every record, all or nothing.
    async fn get_all(&self) -> StorageResult<Vec<Record>>;
}

/// CRUD for notes on top of a [`RemoteCollection`].
pub struct NoteStore<C> {
    collection: C,
}

impl<C: RemoteCollection> NoteStore<C> {
    pub fn new(collection: C) -> Self {
        Self { collection }
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// Persist `note` under a freshly generated id and return that id.
    /// Any id already on `note` is ignored.
    pub async fn create(&self, note: &Note) -> StorageResult<String> {
        let id = Uuid::new_v4().to_string();
        let record = to_record(&Note {
            id: id.clone(),
            ..note.clone()
        })?;

        debug!(id = %id, title = %note.title, "creating note");
        self.collection.set(&id, record).await?;
        Ok(id)
    }

    /// Overwrite the full record at `note.id` (last write wins).
    ///
    /// The id is not checked for prior existence: updating an unknown id
    /// writes a new record under it.
    pub async fn update(&self, note: &Note) -> StorageResult<()> {
        if note.id.is_empty() {
            return Err(StorageError::MissingId);
        }

        debug!(id = %note.id, "updating note");
        self.collection.set(&note.id, to_record(note)?).await
    }

    /// Remove the note at `id`. Idempotent.
    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        debug!(id = %id, "deleting note");
        self.collection.delete(id).await
    }

    /// Every note in the collection, in collection order.
    pub async fn list_all(&self) -> StorageResult<Vec<Note>> {
        let records = self.collection.get_all().await?;
        debug!(count = records.len(), "fetched note records");

        records.into_iter().map(from_record).collect()
    }
}

fn to_record(note: &Note) -> StorageResult<Record> {
    match serde_json::to_value(note)? {
        Value::Object(map) => Ok(map),
        other => Err(StorageError::Transport(format!(
            "note serialized to a non-record value: {other}"
        ))),
    }
}

fn from_record(record: Record) -> StorageResult<Note> {
    Ok(serde_json::from_value(Value::Object(record))?)
}
