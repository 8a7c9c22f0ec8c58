//! MemoryBackend - In-process storage
//!
//! TigerStyle: One ordered collection, one lock. Every read-modify-write
//! runs under a single write guard.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::backend::StorageBackend;
use super::error::{StorageError, StorageResult};
use super::item::{next_id, seed_items, validate_title, Item, ItemId, NewItem};

/// In-memory storage backend.
///
/// Clones share the same collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    items: Arc<RwLock<Vec<Item>>>,
}

impl MemoryBackend {
    /// Create a backend holding the seed items.
    #[must_use]
    pub fn new() -> Self {
        tracing::info!("Seeding in-memory collection");
        Self::with_items(seed_items())
    }

    /// Create a backend with no items.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a backend holding `items`, in order.
    #[must_use]
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> StorageResult<Vec<Item>> {
        Ok(self.items.read().await.clone())
    }

    async fn get(&self, id: ItemId) -> StorageResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn create(&self, item: NewItem) -> StorageResult<Item> {
        validate_title(&item.title)?;

        let mut items = self.items.write().await;
        let count_before = items.len();

        let id = next_id(items.iter().map(|existing| existing.id).max())?;
        let created = item.into_item(id);
        items.push(created.clone());

        // Postcondition
        assert_eq!(items.len(), count_before + 1, "create must add exactly one item");

        tracing::debug!(id, "Created item");
        Ok(created)
    }

    async fn update(&self, item: &Item) -> StorageResult<Item> {
        let mut items = self.items.write().await;
        let existing = items
            .iter_mut()
            .find(|existing| existing.id == item.id)
            .ok_or(StorageError::ItemNotFound { id: item.id })?;

        // Only a changed title is checked; stored titles are served as-is
        if existing.title != item.title {
            validate_title(&item.title)?;
        }

        existing.done = item.done;
        existing.title.clone_from(&item.title);

        tracing::debug!(id = item.id, done = item.done, "Updated item");
        Ok(existing.clone())
    }

    async fn delete(&self, id: ItemId) -> StorageResult<bool> {
        let mut items = self.items.write().await;

        match items.iter().position(|item| item.id == id) {
            Some(index) => {
                items.remove(index);
                tracing::debug!(id, "Deleted item");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> StorageResult<usize> {
        Ok(self.items.read().await.len())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[Item]) -> Vec<ItemId> {
        items.iter().map(|item| item.id).collect()
    }

    #[tokio::test]
    async fn test_new_is_seeded() {
        let backend = MemoryBackend::new();
        let items = backend.list().await.unwrap();

        assert_eq!(items, seed_items());
    }

    #[tokio::test]
    async fn test_list_empty() {
        let backend = MemoryBackend::empty();
        assert!(backend.list().await.unwrap().is_empty());
        assert_eq!(backend.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_on_empty_starts_at_one() {
        let backend = MemoryBackend::empty();
        let created = backend.create(NewItem::new("first")).await.unwrap();

        assert_eq!(created.id, 1);
        assert!(!created.done);
    }

    #[tokio::test]
    async fn test_create_uses_max_plus_one() {
        let backend = MemoryBackend::with_items(vec![
            Item::new(5, "five", false),
            Item::new(2, "two", true),
        ]);

        let created = backend.create(NewItem::new("next")).await.unwrap();
        assert_eq!(created.id, 6);
        assert_eq!(ids(&backend.list().await.unwrap()), vec![5, 2, 6]);
    }

    #[tokio::test]
    async fn test_creates_have_unique_ids() {
        let backend = MemoryBackend::new();
        for i in 0..10 {
            backend.create(NewItem::new(format!("task {i}"))).await.unwrap();
        }

        let mut all = ids(&backend.list().await.unwrap());
        assert_eq!(all.len(), 12);
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 12);
    }

    #[tokio::test]
    async fn test_create_rejects_long_title() {
        let backend = MemoryBackend::new();
        let result = backend
            .create(NewItem::new("x".repeat(crate::constants::ITEM_TITLE_BYTES_MAX + 1)))
            .await;

        assert!(matches!(result, Err(StorageError::InvalidItem(_))));
        assert_eq!(backend.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_after_max_id_is_error() {
        let backend = MemoryBackend::with_items(vec![Item::new(ItemId::MAX, "last", false)]);

        let result = backend.create(NewItem::new("next")).await;

        assert!(matches!(result, Err(StorageError::Internal(_))));
        assert_eq!(backend.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_over_non_positive_ids_starts_at_one() {
        let legacy: Item = serde_json::from_str(r#"{"id": -3, "title": "legacy"}"#).unwrap();
        let backend = MemoryBackend::with_items(vec![legacy]);

        let created = backend.create(NewItem::new("next")).await.unwrap();

        assert_eq!(created, Item::new(1, "next", false));
        assert_eq!(ids(&backend.list().await.unwrap()), vec![-3, 1]);
    }

    #[tokio::test]
    async fn test_update_keeps_stored_overlong_title() {
        let title = "x".repeat(crate::constants::ITEM_TITLE_BYTES_MAX + 1);
        let stored: Item =
            serde_json::from_value(serde_json::json!({"id": 1, "title": title})).unwrap();
        let backend = MemoryBackend::with_items(vec![stored.clone()]);

        let mut item = stored;
        item.mark_done();
        let updated = backend.update(&item).await.unwrap();
        assert!(updated.done);

        // A new overlong title is still rejected
        item.title.push('y');
        assert!(matches!(
            backend.update(&item).await,
            Err(StorageError::InvalidItem(_))
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_new_overlong_title() {
        let backend = MemoryBackend::new();
        let title = "x".repeat(crate::constants::ITEM_TITLE_BYTES_MAX + 1);
        let item = Item { id: 1, done: false, title };

        assert!(matches!(
            backend.update(&item).await,
            Err(StorageError::InvalidItem(_))
        ));
        assert_eq!(backend.get(1).await.unwrap(), Some(Item::new(1, "Item A", false)));
    }

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get(99).await.unwrap(), None);
        assert_eq!(backend.get(1).await.unwrap().map(|i| i.title), Some("Item A".into()));
    }

    #[tokio::test]
    async fn test_update_missing_does_not_mutate() {
        let backend = MemoryBackend::new();
        let before = backend.list().await.unwrap();

        let result = backend.update(&Item::new(42, "ghost", true)).await;

        assert!(matches!(result, Err(StorageError::ItemNotFound { id: 42 })));
        assert_eq!(backend.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let backend = MemoryBackend::new();
        let mut item = backend.get(2).await.unwrap().unwrap();
        item.mark_done();

        let first = backend.update(&item).await.unwrap();
        let second = backend.update(&item).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, Item::new(2, "Item B", true));
    }

    #[tokio::test]
    async fn test_update_keeps_position() {
        let backend = MemoryBackend::new();
        backend.update(&Item::new(1, "Renamed", false)).await.unwrap();

        let items = backend.list().await.unwrap();
        assert_eq!(items[0], Item::new(1, "Renamed", false));
        assert_eq!(items[1], Item::new(2, "Item B", false));
    }

    #[tokio::test]
    async fn test_delete() {
        let backend = MemoryBackend::new();

        assert!(backend.delete(1).await.unwrap());
        assert_eq!(ids(&backend.list().await.unwrap()), vec![2]);

        assert!(!backend.delete(1).await.unwrap());
        assert_eq!(backend.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_collection() {
        let backend = MemoryBackend::new();
        let clone = backend.clone();

        clone.create(NewItem::new("shared")).await.unwrap();
        assert_eq!(backend.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_creates_never_collide() {
        let backend = MemoryBackend::empty();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let backend = backend.clone();
                tokio::spawn(async move { backend.create(NewItem::new(format!("t{i}"))).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut all = ids(&backend.list().await.unwrap());
        all.sort_unstable();
        assert_eq!(all, (1..=32).collect::<Vec<_>>());
    }
}
