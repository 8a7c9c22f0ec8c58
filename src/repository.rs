//! Repository - Backend selection and dispatch
//!
//! TigerStyle: Chosen once at startup, forwarded unchanged. No retries, no
//! caching; the selected backend owns those concerns.

use std::sync::Arc;

use crate::config::{BackendKind, StoreConfig};
use crate::storage::{Item, ItemId, MemoryBackend, NewItem, StorageBackend, StorageResult};

/// The CRUD facade handed to request handlers.
///
/// Cheap to clone; every clone talks to the same backend.
#[derive(Debug, Clone)]
pub struct Repository {
    backend: Arc<dyn StorageBackend>,
}

impl Repository {
    /// Build the backend named by `config`.
    ///
    /// # Errors
    /// Returns the backend's connection error, or
    /// `StorageError::Unsupported` if the backend is not compiled in.
    pub async fn connect(config: &StoreConfig) -> StorageResult<Self> {
        let repository = match config.backend {
            BackendKind::Memory => Self::in_memory(),
            BackendKind::MongoDb => Self::mongodb(config).await?,
        };

        tracing::info!(backend = repository.backend_name(), "Repository initialized");
        Ok(repository)
    }

    #[cfg(feature = "mongodb")]
    async fn mongodb(config: &StoreConfig) -> StorageResult<Self> {
        let backend = crate::storage::MongoBackend::connect(&config.mongodb).await?;
        Ok(Self::from_backend(Arc::new(backend)))
    }

    #[cfg(not(feature = "mongodb"))]
    async fn mongodb(_config: &StoreConfig) -> StorageResult<Self> {
        Err(crate::storage::StorageError::Unsupported(
            "built without the `mongodb` feature".to_string(),
        ))
    }

    /// Seeded in-memory repository.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_backend(Arc::new(MemoryBackend::new()))
    }

    /// Wrap an already constructed backend.
    #[must_use]
    pub fn from_backend(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Name of the selected backend.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// All items in storage order.
    pub async fn list(&self) -> StorageResult<Vec<Item>> {
        self.backend.list().await
    }

    /// Item with `id`, or `None` if absent.
    pub async fn get(&self, id: ItemId) -> StorageResult<Option<Item>> {
        self.backend.get(id).await
    }

    /// Store `item` under the next free id and return it.
    pub async fn create(&self, item: NewItem) -> StorageResult<Item> {
        self.backend.create(item).await
    }

    /// Overwrite title and done of an existing item.
    ///
    /// # Errors
    /// `StorageError::ItemNotFound` if no item has `item.id`.
    pub async fn update(&self, item: &Item) -> StorageResult<Item> {
        self.backend.update(item).await
    }

    /// Remove the item with `id`; `false` if there was none.
    pub async fn delete(&self, id: ItemId) -> StorageResult<bool> {
        self.backend.delete(id).await
    }

    /// Number of stored items.
    pub async fn count(&self) -> StorageResult<usize> {
        self.backend.count().await
    }
}
