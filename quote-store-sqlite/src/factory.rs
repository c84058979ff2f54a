use async_trait::async_trait;
use quote_core::storage::{DraftStore, DraftStoreFactory, StorageError, StoreConfig};
use tracing::info;

use crate::repository::SqliteDraftStore;

/// [`DraftStoreFactory`] for SQLite.
///
/// Register it to make the `"sqlite"` backend available:
///
/// ```rust,no_run
/// use quote_core::storage::DraftStoreRegistry;
/// use quote_store_sqlite::SqliteDraftStoreFactory;
///
/// let mut registry = DraftStoreRegistry::new();
/// registry.register(Box::new(SqliteDraftStoreFactory));
/// ```
pub struct SqliteDraftStoreFactory;

#[async_trait]
impl DraftStoreFactory for SqliteDraftStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Opens `config.connection_string` and applies migrations.
    ///
    /// A bare file path is created if it does not exist; `":memory:"` gives
    /// an ephemeral database.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn DraftStore>, StorageError> {
        let store = SqliteDraftStore::new(&config.connection_string)
            .await
            .map_err(|e| StorageError::Connection(format!("{e:#}")))?;
        store
            .run_migrations()
            .await
            .map_err(|e| StorageError::Storage(format!("{e:#}")))?;

        info!(location = %config.connection_string, "sqlite draft store ready");
        Ok(Box::new(store))
    }
}
