//! Storage - Backend Trait and Implementations
//!
//! TigerStyle: One CRUD contract, two interchangeable backends.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    StorageBackend Trait                      │
//! └─────────────────────────────────────────────────────────────┘
//!          ↑                              ↑
//!          │                              │
//! ┌────────┴────────┐           ┌────────┴────────┐
//! │  MemoryBackend  │           │  MongoBackend   │
//! │  (in-process)   │           │ (document store)│
//! └─────────────────┘           └─────────────────┘
//! ```
//!
//! Both backends assign ids as `max existing id + 1`, starting at 1, and
//! both start from the same two seed items when their collection is empty.

mod backend;
mod error;
mod item;
mod memory;

#[cfg(feature = "mongodb")]
mod mongo;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use item::{next_id, seed_items, validate_title, Item, ItemId, NewItem};
pub use memory::MemoryBackend;

#[cfg(feature = "mongodb")]
pub use mongo::MongoBackend;
