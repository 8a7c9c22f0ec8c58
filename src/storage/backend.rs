//! StorageBackend - The CRUD contract every backend satisfies

use async_trait::async_trait;

use super::error::StorageResult;
use super::item::{Item, ItemId, NewItem};

/// Storage backend for to-do items.
///
/// TigerStyle: Absence is a value, not an error. Only `update` treats a
/// missing id as a failure.
#[async_trait]
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;

    /// All items, in backend order.
    async fn list(&self) -> StorageResult<Vec<Item>>;

    /// The item with `id`, or `None`.
    async fn get(&self, id: ItemId) -> StorageResult<Option<Item>>;

    /// Store a new item under `max id + 1` (or 1) and return it.
    async fn create(&self, item: NewItem) -> StorageResult<Item>;

    /// Overwrite `title` and `done` of the stored item with `item.id`.
    ///
    /// Fails with `StorageError::ItemNotFound` if no such item exists.
    async fn update(&self, item: &Item) -> StorageResult<Item>;

    /// Remove the item with `id`. Returns whether anything was removed.
    async fn delete(&self, id: ItemId) -> StorageResult<bool>;

    /// Number of stored items.
    async fn count(&self) -> StorageResult<usize>;
}
