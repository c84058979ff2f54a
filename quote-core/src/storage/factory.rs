use std::collections::HashMap;

use async_trait::async_trait;

use super::draft::{DraftStore, StorageError};

/// Backend-agnostic draft store configuration.
///
/// `backend` must match the [`DraftStoreFactory::backend_name`] of a
/// registered factory. `connection_string` is passed to that factory unchanged.
///
/// | backend    | connection_string examples |
/// |------------|----------------------------|
/// | `sqlite`   | `drafts.db`, `:memory:`    |
/// | `memory`   | ignored                    |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "drafts.db".to_string(),
        }
    }
}

/// One implementation per storage backend, registered with a
/// [`DraftStoreRegistry`] at startup.
#[async_trait]
pub trait DraftStoreFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Opens (or creates) the store described by `config`.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn DraftStore>, StorageError>;
}

/// Draft store factories keyed by backend name.
pub struct DraftStoreRegistry {
    factories: HashMap<&'static str, Box<dyn DraftStoreFactory>>,
}

impl DraftStoreRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A factory with the same name replaces the one already registered.
    pub fn register(
        &mut self,
        factory: Box<dyn DraftStoreFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names, sorted.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Opens a store with the factory registered for `config.backend`.
    ///
    /// # Errors
    /// * [`StorageError::Configuration`] if no factory matches.
    /// * Any error the chosen factory returns.
    pub async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn DraftStore>, StorageError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                StorageError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for DraftStoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}
