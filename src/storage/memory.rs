use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Record, RemoteCollection, StorageResult};
use crate::error::StorageError;

/// An in-process collection.
///
/// Can be told to fail every call, or to delay every call, to stand in for
/// an unreliable or slow remote.
#[derive(Debug, Default)]
pub struct MemoryCollection {
    records: Mutex<BTreeMap<String, Record>>,
    failing: AtomicBool,
    latency: Option<Duration>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency` before touching the records.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    async fn round_trip(&self) -> StorageResult<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Transport("collection unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteCollection for MemoryCollection {
    async fn set(&self, key: &str, record: Record) -> StorageResult<()> {
        self.round_trip().await?;
        self.records.lock().await.insert(key.to_string(), record);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.round_trip().await?;
        self.records.lock().await.remove(key);
        Ok(())
    }

    async fn get_all(&self) -> StorageResult<Vec<Record>> {
        self.round_trip().await?;
        Ok(self.records.lock().await.values().cloned().collect())
    }
}
