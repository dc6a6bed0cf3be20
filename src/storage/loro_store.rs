use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use loro::{LoroDoc, LoroList, LoroMap, LoroValue};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use super::{Record, RemoteCollection, StorageResult};
use crate::config::StoreConfig;
use crate::error::StorageError;

pub const NOTEPAD_DIR: &str = ".notepad";

/// A note collection kept in a Loro document, snapshotted to disk after
/// every mutation.
///
/// Mutations are applied to a fork of the document and only replace it once
/// the snapshot is on disk, so a failed write leaves nothing behind.
///
/// Records are stored as one map container per key under a top-level map
/// named after the collection.
pub struct LoroCollection {
    doc: Mutex<LoroDoc>,
    dir: PathBuf,
    path: PathBuf,
    collection: String,
}

impl LoroCollection {
    /// Create `.notepad/` under `root` with an empty document.
    pub fn init(root: &Path, config: &StoreConfig) -> StorageResult<Self> {
        let dir = root.join(NOTEPAD_DIR);

        if dir.exists() {
            return Err(StorageError::AlreadyInitialized);
        }

        fs::create_dir_all(&dir)?;

        let doc = LoroDoc::new();
        let path = dir.join(&config.data_file);
        save_snapshot(&doc, &path)?;

        Ok(Self {
            doc: Mutex::new(doc),
            dir,
            path,
            collection: config.collection.clone(),
        })
    }

    /// Open the document of an existing project.
    pub fn open(root: &Path, config: &StoreConfig) -> StorageResult<Self> {
        let dir = root.join(NOTEPAD_DIR);
        let path = dir.join(&config.data_file);

        if !path.exists() {
            return Err(StorageError::NotInitialized);
        }

        let bytes = fs::read(&path)?;
        let doc = LoroDoc::new();
        doc.import(&bytes)?;

        Ok(Self {
            doc: Mutex::new(doc),
            dir,
            path,
            collection: config.collection.clone(),
        })
    }

    /// The `.notepad/` directory of this project.
    pub fn notepad_dir(&self) -> &Path {
        &self.dir
    }

    pub fn collection_name(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl RemoteCollection for LoroCollection {
    async fn set(&self, key: &str, record: Record) -> StorageResult<()> {
        let mut doc = self.doc.lock().await;
        let next = doc.fork();
        let records = next.get_map(self.collection.as_str());

        // Inserting a fresh container drops every field of the old record.
        let entity = records.insert_container(key, LoroMap::new())?;
        write_record(&entity, &record)?;

        next.commit();
        save_snapshot(&next, &self.path)?;
        *doc = next;
        debug!(key = %key, collection = %self.collection, "record written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let mut doc = self.doc.lock().await;
        if doc.get_map(self.collection.as_str()).get(key).is_none() {
            return Ok(());
        }

        let next = doc.fork();
        next.get_map(self.collection.as_str()).delete(key)?;
        next.commit();
        save_snapshot(&next, &self.path)?;
        *doc = next;
        debug!(key = %key, collection = %self.collection, "record deleted");
        Ok(())
    }

    async fn get_all(&self) -> StorageResult<Vec<Record>> {
        let doc = self.doc.lock().await;
        let records = doc.get_map(self.collection.as_str());

        let mut keyed: Vec<(String, Record)> = Vec::new();
        if let LoroValue::Map(map) = records.get_deep_value() {
            for (key, value) in map.iter() {
                match to_json(value) {
                    Value::Object(record) => keyed.push((key.to_string(), record)),
                    _ => {
                        return Err(StorageError::Transport(format!(
                            "record '{key}' is not a map"
                        )))
                    }
                }
            }
        }
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(keyed.into_iter().map(|(_, record)| record).collect())
    }
}

fn save_snapshot(doc: &LoroDoc, path: &Path) -> StorageResult<()> {
    let bytes = doc.export(loro::ExportMode::Snapshot)?;
    fs::write(path, bytes)?;
    Ok(())
}

fn write_record(entity: &LoroMap, record: &Record) -> StorageResult<()> {
    for (field, value) in record {
        match value {
            Value::Null => {}
            Value::Bool(b) => {
                entity.insert(field, *b)?;
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    entity.insert(field, i)?;
                } else if let Some(f) = n.as_f64() {
                    entity.insert(field, f)?;
                }
            }
            Value::String(s) => {
                entity.insert(field, s.clone())?;
            }
            Value::Array(items) => {
                let list = entity.insert_container(field, LoroList::new())?;
                for item in items {
                    match item {
                        Value::String(s) => list.push(s.clone())?,
                        other => list.push(other.to_string())?,
                    }
                }
            }
            Value::Object(_) => {
                return Err(StorageError::Transport(format!(
                    "field '{field}' is not a primitive value"
                )));
            }
        }
    }
    Ok(())
}

fn to_json(value: &LoroValue) -> Value {
    match value {
        LoroValue::Bool(b) => Value::Bool(*b),
        LoroValue::I64(n) => Value::from(*n),
        LoroValue::Double(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        LoroValue::String(s) => Value::String(s.to_string()),
        LoroValue::List(items) => Value::Array(items.iter().map(to_json).collect()),
        LoroValue::Map(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.to_string(), to_json(v)))
                .collect(),
        ),
        _ => Value::Null,
    }
}
