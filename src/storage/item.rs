//! Item - The to-do record
//!
//! TigerStyle: Explicit fields, id owned by the backend.

use serde::{Deserialize, Serialize};

use super::error::{StorageError, StorageResult};
use crate::constants::{ITEM_ID_FIRST, ITEM_TITLE_BYTES_MAX};

/// Item identifier. Positive, assigned by the backend on create.
pub type ItemId = i64;

// =============================================================================
// Item
// =============================================================================

/// A to-do item.
///
/// Serialized as `{"id": <int>, "done": <bool>, "title": <string>}`, both on
/// the wire and as a MongoDB document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier, unique within the collection
    pub id: ItemId,
    /// Completion flag
    #[serde(default)]
    pub done: bool,
    /// Title of the task
    pub title: String,
}

impl Item {
    /// Create an item with an explicit id.
    ///
    /// # Panics
    /// Panics if the id is not positive or the title exceeds its limit.
    #[must_use]
    pub fn new(id: ItemId, title: impl Into<String>, done: bool) -> Self {
        let title = title.into();

        // Preconditions
        assert!(id >= ITEM_ID_FIRST, "item id must be positive, got {id}");
        assert!(
            title.len() <= ITEM_TITLE_BYTES_MAX,
            "title {} bytes exceeds max {}",
            title.len(),
            ITEM_TITLE_BYTES_MAX
        );

        Self { id, done, title }
    }

    /// Mark the item as done. Nothing else changes.
    pub fn mark_done(&mut self) {
        self.done = true;
    }
}

// =============================================================================
// New Item
// =============================================================================

/// Payload for creating an item.
///
/// Any `id` the caller sends is ignored; the backend assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    /// Title of the task
    pub title: String,
    /// Completion flag
    #[serde(default)]
    pub done: bool,
}

impl NewItem {
    /// Create a pending item payload.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            done: false,
        }
    }

    /// Attach the backend-assigned id.
    ///
    /// The id comes from `next_id` and the title from `validate_title`;
    /// neither is re-asserted here.
    #[must_use]
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            done: self.done,
            title: self.title,
        }
    }
}

/// Reject titles the backends will not store.
///
/// # Errors
/// Returns `StorageError::InvalidItem` if the title exceeds its limit.
pub fn validate_title(title: &str) -> StorageResult<()> {
    if title.len() > ITEM_TITLE_BYTES_MAX {
        return Err(StorageError::InvalidItem(format!(
            "title {} bytes exceeds max {}",
            title.len(),
            ITEM_TITLE_BYTES_MAX
        )));
    }
    Ok(())
}

// =============================================================================
// Id Assignment
// =============================================================================

/// Items every backend starts with when its collection is empty.
#[must_use]
pub fn seed_items() -> Vec<Item> {
    vec![
        Item::new(1, "Item A", false),
        Item::new(2, "Item B", false),
    ]
}

/// Next id for a collection whose largest id is `max_id`.
///
/// Never below `ITEM_ID_FIRST`, even if stored ids are not positive.
///
/// # Errors
/// Returns `StorageError::Internal` if the largest id is `ItemId::MAX`.
pub fn next_id(max_id: Option<ItemId>) -> StorageResult<ItemId> {
    match max_id {
        Some(max) => max
            .checked_add(1)
            .map(|id| id.max(ITEM_ID_FIRST))
            .ok_or_else(|| StorageError::internal(format!("item id space exhausted at {max}"))),
        None => Ok(ITEM_ID_FIRST),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_done() {
        let mut item = Item::new(1, "Test", false);

        assert!(!item.done);
        item.mark_done();

        assert!(item.done);
        assert_eq!(item.id, 1);
        assert_eq!(item.title, "Test");
    }

    #[test]
    fn test_item_json_shape() {
        let item = Item::new(3, "Item X", false);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": 3, "done": false, "title": "Item X"})
        );
    }

    #[test]
    fn test_new_item_ignores_id_and_defaults_done() {
        let new: NewItem = serde_json::from_str(r#"{"id": 99, "title": "Buy milk"}"#).unwrap();

        assert_eq!(new.title, "Buy milk");
        assert!(!new.done);

        let item = new.into_item(7);
        assert_eq!(item.id, 7);
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(None).unwrap(), ITEM_ID_FIRST);
        assert_eq!(next_id(Some(2)).unwrap(), 3);
    }

    #[test]
    fn test_next_id_clamps_non_positive() {
        assert_eq!(next_id(Some(-3)).unwrap(), ITEM_ID_FIRST);
        assert_eq!(next_id(Some(0)).unwrap(), ITEM_ID_FIRST);
    }

    #[test]
    fn test_next_id_overflow_is_error() {
        assert!(matches!(
            next_id(Some(ItemId::MAX)),
            Err(StorageError::Internal(_))
        ));
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("short").is_ok());
        assert!(matches!(
            validate_title(&"x".repeat(ITEM_TITLE_BYTES_MAX + 1)),
            Err(StorageError::InvalidItem(_))
        ));
    }

    #[test]
    fn test_seed_items() {
        let seed = seed_items();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0], Item::new(1, "Item A", false));
        assert_eq!(seed[1], Item::new(2, "Item B", false));
    }

    #[test]
    #[should_panic(expected = "positive")]
    fn test_item_id_must_be_positive() {
        let _ = Item::new(0, "zero", false);
    }

    #[test]
    #[should_panic(expected = "title")]
    fn test_item_title_too_long() {
        let _ = Item::new(1, "x".repeat(ITEM_TITLE_BYTES_MAX + 1), false);
    }
}
