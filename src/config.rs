use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Where notes live inside a notepad project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name of the document collection holding the notes.
    pub collection: String,
    /// Snapshot file name inside `.notepad/`.
    pub data_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            collection: "notes".to_string(),
            data_file: "loro.db".to_string(),
        }
    }
}

impl StoreConfig {
    pub const FILE_NAME: &'static str = "config.json";

    pub fn with_collection(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ..Self::default()
        }
    }

    /// Read `config.json` from `dir`, or the defaults if there is none.
    pub fn load(dir: &Path) -> Result<Self, StorageError> {
        let path = dir.join(Self::FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, dir: &Path) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(Self::FILE_NAME), text)?;
        Ok(())
    }
}
