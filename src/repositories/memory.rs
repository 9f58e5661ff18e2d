//! Record store en memoria
//!
//! Backend para tests y desarrollo local. Mismo contrato que el backend
//! de Redis, incluida la semántica de versiones.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Entity, RecordStore, Versioned};
use crate::utils::errors::{version_conflict_error, AppResult};

/// Store en memoria: mapa id -> registro versionado detrás de un RwLock
pub struct MemoryStore<R> {
    records: Arc<RwLock<HashMap<String, Versioned<R>>>>,
}

impl<R> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for MemoryStore<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

#[async_trait]
impl<R: Entity> RecordStore<R> for MemoryStore<R> {
    async fn get(&self, id: &str) -> AppResult<Option<Versioned<R>>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn put(&self, record: R) -> AppResult<Versioned<R>> {
        let mut records = self.records.write().await;
        let version = records.get(record.id()).map_or(0, |v| v.version) + 1;
        let versioned = Versioned { version, record };
        records.insert(versioned.record.id().to_string(), versioned.clone());
        Ok(versioned)
    }

    async fn compare_and_swap(&self, expected_version: u64, record: R) -> AppResult<Versioned<R>> {
        let mut records = self.records.write().await;
        let current = records.get(record.id()).map_or(0, |v| v.version);
        if current != expected_version {
            return Err(version_conflict_error(R::KIND, record.id(), expected_version));
        }
        let versioned = Versioned {
            version: expected_version + 1,
            record,
        };
        records.insert(versioned.record.id().to_string(), versioned.clone());
        Ok(versioned)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut records = self.records.write().await;
        records.remove(id);
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Versioned<R>>> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }
}
