//! Configuration
//!
//! TigerStyle: Every setting has a flag, an environment fallback, and a
//! bounded default. A `.env` file is loaded before parsing.

use clap::{Parser, ValueEnum};

use crate::constants::{
    APP_NAME, HTTP_BIND_ADDRESS_DEFAULT, MONGODB_COLLECTION_DEFAULT, MONGODB_DATABASE_DEFAULT,
    MONGODB_POOL_SIZE_DEFAULT, MONGODB_POOL_SIZE_MAX, MONGODB_URI_DEFAULT,
    OPERATION_TIMEOUT_SECS_DEFAULT, OPERATION_TIMEOUT_SECS_MAX,
};

// =============================================================================
// Backend Selection
// =============================================================================

/// Which storage backend serves the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// In-process collection, seeded on startup
    #[default]
    Memory,
    /// MongoDB collection
    #[value(name = "mongodb", aliases = ["document-store", "mongo"])]
    MongoDb,
}

impl BackendKind {
    /// Get string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::MongoDb => "mongodb",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// CLI
// =============================================================================

/// To-do list HTTP service
#[derive(Parser, Debug, Clone)]
#[command(name = APP_NAME)]
#[command(about = "To-do list HTTP service with in-memory or MongoDB storage")]
#[command(version)]
pub struct Config {
    /// HTTP bind address
    #[arg(short, long, env = "TODO_BIND", default_value = HTTP_BIND_ADDRESS_DEFAULT)]
    pub bind: String,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub store: StoreConfig,
}

/// Storage settings.
#[derive(clap::Args, Debug, Clone)]
pub struct StoreConfig {
    /// Storage backend
    #[arg(long, env = "TODO_BACKEND", value_enum, default_value_t = BackendKind::Memory)]
    pub backend: BackendKind,

    #[command(flatten)]
    pub mongodb: MongoConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Memory,
            mongodb: MongoConfig::default(),
        }
    }
}

/// MongoDB connection settings.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    /// MongoDB connection URI
    #[arg(long = "mongodb-uri", env = "TODO_MONGODB_URI", default_value = MONGODB_URI_DEFAULT)]
    pub uri: String,

    /// MongoDB database name
    #[arg(
        long = "mongodb-database",
        env = "TODO_MONGODB_DATABASE",
        default_value = MONGODB_DATABASE_DEFAULT
    )]
    pub database: String,

    /// MongoDB collection name
    #[arg(
        long = "mongodb-collection",
        env = "TODO_MONGODB_COLLECTION",
        default_value = MONGODB_COLLECTION_DEFAULT
    )]
    pub collection: String,

    /// Maximum pooled connections
    #[arg(
        long = "mongodb-pool-size",
        env = "TODO_MONGODB_POOL_SIZE",
        default_value_t = MONGODB_POOL_SIZE_DEFAULT
    )]
    pub pool_size: u32,

    /// Per-operation timeout in seconds
    #[arg(
        long = "operation-timeout-secs",
        env = "TODO_OPERATION_TIMEOUT_SECS",
        default_value_t = OPERATION_TIMEOUT_SECS_DEFAULT
    )]
    pub timeout_secs: u64,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: MONGODB_URI_DEFAULT.to_string(),
            database: MONGODB_DATABASE_DEFAULT.to_string(),
            collection: MONGODB_COLLECTION_DEFAULT.to_string(),
            pool_size: MONGODB_POOL_SIZE_DEFAULT,
            timeout_secs: OPERATION_TIMEOUT_SECS_DEFAULT,
        }
    }
}

// =============================================================================
// Loading and Validation
// =============================================================================

impl Config {
    /// Load `.env` (if present), then parse flags and environment.
    #[must_use]
    pub fn load() -> Self {
        // Missing .env is fine
        let _ = dotenvy::dotenv();
        Self::parse()
    }

    /// Check every bound.
    ///
    /// # Errors
    /// Returns `ConfigError` naming the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind
            .parse::<std::net::SocketAddr>()
            .map_err(|e| ConfigError::InvalidBind(format!("{}: {e}", self.bind)))?;

        if self.store.backend == BackendKind::MongoDb {
            self.store.mongodb.validate()?;
        }

        Ok(())
    }
}

impl MongoConfig {
    /// Check URI scheme, names, pool size and timeout.
    ///
    /// # Errors
    /// Returns `ConfigError` naming the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.uri.starts_with("mongodb://") || self.uri.starts_with("mongodb+srv://")) {
            return Err(ConfigError::InvalidMongoUri(self.uri.clone()));
        }
        if self.database.is_empty() {
            return Err(ConfigError::Empty("mongodb database"));
        }
        if self.collection.is_empty() {
            return Err(ConfigError::Empty("mongodb collection"));
        }
        if self.pool_size == 0 || self.pool_size > MONGODB_POOL_SIZE_MAX {
            return Err(ConfigError::OutOfRange {
                name: "mongodb pool size",
                value: u64::from(self.pool_size),
                min: 1,
                max: u64::from(MONGODB_POOL_SIZE_MAX),
            });
        }
        if self.timeout_secs == 0 || self.timeout_secs > OPERATION_TIMEOUT_SECS_MAX {
            return Err(ConfigError::OutOfRange {
                name: "operation timeout",
                value: self.timeout_secs,
                min: 1,
                max: OPERATION_TIMEOUT_SECS_MAX,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address: {0}")]
    InvalidBind(String),

    #[error("mongodb uri must start with mongodb:// or mongodb+srv://, got {0}")]
    InvalidMongoUri(String),

    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("{name} {value} outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

// =============================================================================
// Tests
// =============================================================================
