//! MongoBackend - Document-store storage
//!
//! TigerStyle: One pooled client for the process lifetime, every operation
//! bounded by a timeout.
//!
//! # Document Shape
//!
//! ```text
//! { "_id": ObjectId, "id": Int64, "done": Boolean, "title": String }
//! ```
//!
//! A unique index on `id` is created at startup. `_id` is ignored on read.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::{ClientOptions, FindOneOptions, IndexOptions, InsertManyOptions};
use mongodb::{Client, Collection, IndexModel};

use super::backend::StorageBackend;
use super::error::{StorageError, StorageResult};
use super::item::{next_id, seed_items, validate_title, Item, ItemId, NewItem};
use crate::config::MongoConfig;

// =============================================================================
// MongoBackend
// =============================================================================

/// MongoDB storage backend.
///
/// The driver's `Client` is a connection pool; each call checks a
/// connection out and returns it when the operation completes.
#[derive(Debug, Clone)]
pub struct MongoBackend {
    client: Client,
    collection: Collection<Item>,
    timeout: Duration,
}

impl MongoBackend {
    /// Connect, verify the server answers, ensure the index, and seed an
    /// empty collection.
    ///
    /// # Errors
    /// Returns `StorageError::InvalidConfig` if a setting is out of bounds,
    /// or `StorageError::Connection` if the URI cannot be parsed or the
    /// server cannot be reached within the timeout.
    pub async fn connect(config: &MongoConfig) -> StorageResult<Self> {
        config
            .validate()
            .map_err(|e| StorageError::InvalidConfig(e.to_string()))?;

        let timeout = Duration::from_secs(config.timeout_secs);

        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| StorageError::connection(format!("invalid mongodb uri: {e}")))?;
        options.app_name = Some(crate::constants::APP_NAME.to_string());
        options.max_pool_size = Some(config.pool_size);
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)
            .map_err(|e| StorageError::connection(format!("failed to create client: {e}")))?;
        let collection = client
            .database(&config.database)
            .collection::<Item>(&config.collection);

        let backend = Self {
            client,
            collection,
            timeout,
        };

        backend.ping(&config.database).await?;
        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            pool_size = config.pool_size,
            "Connected to MongoDB"
        );

        backend.ensure_index().await?;
        backend.seed_if_empty().await?;

        Ok(backend)
    }

    /// Round-trip a `ping` command.
    async fn ping(&self, database: &str) -> StorageResult<()> {
        let db = self.client.database(database);
        self.bounded("ping", async {
            db.run_command(doc! { "ping": 1 }, None)
                .await
                .map_err(|e| StorageError::connection(format!("ping failed: {e}")))
        })
        .await?;
        Ok(())
    }

    /// Unique index on the item id.
    async fn ensure_index(&self) -> StorageResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.bounded("create_index", async {
            self.collection
                .create_index(index, None)
                .await
                .map_err(write_error("failed to create index"))
        })
        .await?;
        Ok(())
    }

    /// Insert the seed items if the collection holds nothing.
    ///
    /// Returns the number of items inserted.
    pub async fn seed_if_empty(&self) -> StorageResult<usize> {
        if self.count().await? > 0 {
            return Ok(0);
        }

        tracing::info!("Seeding MongoDB collection");

        let seed = seed_items();
        let options = InsertManyOptions::builder().ordered(false).build();
        let result = self
            .bounded("seed", async {
                self.collection
                    .insert_many(&seed, options)
                    .await
                    .map_err(write_error("failed to seed items"))
            })
            .await?;

        tracing::info!(count = result.inserted_ids.len(), "Seeded items");
        Ok(result.inserted_ids.len())
    }

    /// Remove every item.
    pub async fn clear(&self) -> StorageResult<()> {
        self.bounded("clear", async {
            self.collection
                .delete_many(Document::new(), None)
                .await
                .map_err(write_error("failed to clear items"))
        })
        .await?;
        Ok(())
    }

    /// Largest stored id, if any.
    async fn max_id(&self) -> StorageResult<Option<ItemId>> {
        let options = FindOneOptions::builder().sort(doc! { "id": -1 }).build();
        let last = self
            .bounded("max_id", async {
                self.collection
                    .find_one(None, options)
                    .await
                    .map_err(read_error("failed to find last item"))
            })
            .await?;

        Ok(last.map(|item| item.id))
    }

    /// Run `operation` under the configured timeout.
    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> StorageResult<T>
    where
        F: Future<Output = StorageResult<T>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(operation, "MongoDB operation timed out");
                Err(StorageError::Timeout {
                    operation,
                    secs: self.timeout.as_secs(),
                })
            }
        }
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Driver errors that mean the server is unreachable.
fn is_connection_error(e: &MongoError) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::ConnectionPoolCleared { .. }
    )
}

fn read_error(context: &'static str) -> impl FnOnce(MongoError) -> StorageError {
    move |e| {
        if is_connection_error(&e) {
            StorageError::connection(format!("{context}: {e}"))
        } else {
            StorageError::read(format!("{context}: {e}"))
        }
    }
}

fn write_error(context: &'static str) -> impl FnOnce(MongoError) -> StorageError {
    move |e| {
        if is_connection_error(&e) {
            StorageError::connection(format!("{context}: {e}"))
        } else {
            StorageError::write(format!("{context}: {e}"))
        }
    }
}

// =============================================================================
// StorageBackend Implementation
// =============================================================================

#[async_trait]
impl StorageBackend for MongoBackend {
    fn name(&self) -> &'static str {
        "mongodb"
    }

    async fn list(&self) -> StorageResult<Vec<Item>> {
        self.bounded("list", async {
            let cursor = self
                .collection
                .find(None, None)
                .await
                .map_err(read_error("failed to list items"))?;
            cursor
                .try_collect::<Vec<Item>>()
                .await
                .map_err(read_error("failed to decode items"))
        })
        .await
    }

    async fn get(&self, id: ItemId) -> StorageResult<Option<Item>> {
        self.bounded("get", async {
            self.collection
                .find_one(doc! { "id": id }, None)
                .await
                .map_err(read_error("failed to get item"))
        })
        .await
    }

    async fn create(&self, item: NewItem) -> StorageResult<Item> {
        validate_title(&item.title)?;

        let id = next_id(self.max_id().await?)?;
        let created = item.into_item(id);

        self.bounded("create", async {
            self.collection
                .insert_one(&created, None)
                .await
                .map_err(write_error("failed to insert item"))
        })
        .await?;

        tracing::debug!(id, "Created item");
        Ok(created)
    }

    async fn update(&self, item: &Item) -> StorageResult<Item> {
        // Only a changed title is checked; stored titles are served as-is
        if let Err(e) = validate_title(&item.title) {
            match self.get(item.id).await? {
                None => return Err(StorageError::ItemNotFound { id: item.id }),
                Some(stored) if stored.title == item.title => {}
                Some(_) => return Err(e),
            }
        }

        let filter = doc! { "id": item.id };
        let update = doc! { "$set": { "done": item.done, "title": item.title.as_str() } };

        let result = self
            .bounded("update", async {
                self.collection
                    .update_one(filter, update, None)
                    .await
                    .map_err(write_error("failed to update item"))
            })
            .await?;

        // matched, not modified: re-applying the same update still succeeds
        if result.matched_count == 0 {
            return Err(StorageError::ItemNotFound { id: item.id });
        }

        tracing::debug!(id = item.id, done = item.done, "Updated item");
        Ok(item.clone())
    }

    async fn delete(&self, id: ItemId) -> StorageResult<bool> {
        let result = self
            .bounded("delete", async {
                self.collection
                    .delete_one(doc! { "id": id }, None)
                    .await
                    .map_err(write_error("failed to delete item"))
            })
            .await?;

        tracing::debug!(id, deleted = result.deleted_count, "Deleted item");
        Ok(result.deleted_count > 0)
    }

    async fn count(&self) -> StorageResult<usize> {
        let count = self
            .bounded("count", async {
                self.collection
                    .count_documents(None, None)
                    .await
                    .map_err(read_error("failed to count items"))
            })
            .await?;

        usize::try_from(count).map_err(|e| StorageError::internal(e.to_string()))
    }
}

// =============================================================================
// Tests (require running MongoDB)
// =============================================================================
