//! todo-api - To-do list HTTP service
//!
//! TigerStyle: A small REST service whose storage can be swapped at startup.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  api          axum router + handlers        │
//! ├─────────────────────────────────────────────┤
//! │  repository   backend chosen once at start  │
//! ├─────────────────────────────────────────────┤
//! │  storage      MemoryBackend │ MongoBackend  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use todo_api::{api, Repository};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let app = api::router(Repository::in_memory());
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:13000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod constants;
pub mod repository;
pub mod storage;

pub use config::{BackendKind, Config, ConfigError, MongoConfig, StoreConfig};
pub use repository::Repository;
pub use storage::{Item, ItemId, NewItem, StorageBackend, StorageError, StorageResult};
