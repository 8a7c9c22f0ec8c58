//! TigerStyle Constants
//!
//! Every limit and default lives here, named with its unit and bound.

// =============================================================================
// Application
// =============================================================================

/// Application name
pub const APP_NAME: &str = "todo-api";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP bind address
pub const HTTP_BIND_ADDRESS_DEFAULT: &str = "127.0.0.1:13000";

// =============================================================================
// Items
// =============================================================================

/// First id handed out by an empty collection
pub const ITEM_ID_FIRST: i64 = 1;

/// Maximum item title length in bytes
pub const ITEM_TITLE_BYTES_MAX: usize = 1_024;

// =============================================================================
// MongoDB
// =============================================================================

/// Default MongoDB connection URI
pub const MONGODB_URI_DEFAULT: &str = "mongodb://localhost:27017";

/// Default database name
pub const MONGODB_DATABASE_DEFAULT: &str = "todo";

/// Default collection name
pub const MONGODB_COLLECTION_DEFAULT: &str = "items";

/// Default connection pool size
pub const MONGODB_POOL_SIZE_DEFAULT: u32 = 10;

/// Maximum connection pool size
pub const MONGODB_POOL_SIZE_MAX: u32 = 100;

/// Default per-operation timeout in seconds
pub const OPERATION_TIMEOUT_SECS_DEFAULT: u64 = 30;

/// Maximum per-operation timeout in seconds
pub const OPERATION_TIMEOUT_SECS_MAX: u64 = 300;
