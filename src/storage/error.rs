//! Storage errors
//!
//! TigerStyle: One error type for every backend, explicit variants.

use super::item::ItemId;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors returned by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Update target does not exist
    #[error("item not found: {id}")]
    ItemNotFound {
        /// Id that was looked up
        id: ItemId,
    },

    /// Item failed validation before reaching the backend
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// Backend could not be reached
    #[error("connection error: {0}")]
    Connection(String),

    /// Read failed
    #[error("read error: {0}")]
    Read(String),

    /// Write failed
    #[error("write error: {0}")]
    Write(String),

    /// Operation did not finish in time
    #[error("{operation} timed out after {secs}s")]
    Timeout {
        /// Operation name
        operation: &'static str,
        /// Configured timeout
        secs: u64,
    },

    /// Backend settings rejected before connecting
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Backend is not compiled into this build
    #[error("unsupported backend: {0}")]
    Unsupported(String),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a read error.
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    /// Create a write error.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True when the backend itself is failing, as opposed to the request.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Read(_) | Self::Write(_) | Self::Timeout { .. }
        )
    }
}
