use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::draft::{DraftStore, StorageError};
use super::factory::{DraftStoreFactory, StoreConfig};

/// Process-local draft store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn write(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn read(
        &self,
        key: &str,
    ) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn delete(
        &self,
        key: &str,
    ) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Registers [`MemoryDraftStore`] under the `memory` backend name. The
/// connection string is ignored; every call yields a fresh, empty store.
pub struct MemoryDraftStoreFactory;

#[async_trait]
impl DraftStoreFactory for MemoryDraftStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &StoreConfig,
    ) -> Result<Box<dyn DraftStore>, StorageError> {
        Ok(Box::new(MemoryDraftStore::new()))
    }
}
