//! HTTP API
//!
//! TigerStyle: Thin routing over the repository.
//!
//! | Method | Path      | Action            |
//! |--------|-----------|-------------------|
//! | GET    | `/`       | list items        |
//! | POST   | `/`       | create item       |
//! | GET    | `/health` | health check      |
//! | GET    | `/{id}`   | get item          |
//! | PUT    | `/{id}`   | mark item done    |
//! | DELETE | `/{id}`   | delete item       |

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::*;

use std::time::Instant;

use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::repository::Repository;

// =============================================================================
// State
// =============================================================================

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Selected repository
    pub repository: Repository,
    started_at: Instant,
}

impl AppState {
    /// Create state around a repository.
    #[must_use]
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was created.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl ErrorResponse {
    /// Create an error body.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Server status
    pub status: String,
    /// Server version
    pub version: String,
    /// Selected backend
    pub backend: String,
    /// Number of stored items
    pub items_count: usize,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

// =============================================================================
// Router
// =============================================================================

/// Build the router with request tracing.
pub fn router(repository: Repository) -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/health", get(health_check))
        .route(
            "/:id",
            get(get_item).put(complete_item).delete(delete_item),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(repository))
}
