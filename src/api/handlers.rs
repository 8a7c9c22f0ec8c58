//! HTTP request handlers
//!
//! Axum handlers for the to-do API. Each one forwards to the repository
//! and maps the outcome to a status code.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::error::ApiError;
use super::{AppState, HealthResponse};
use crate::constants::APP_VERSION;
use crate::storage::{Item, ItemId, NewItem};

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// List all items
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    let items = state.repository.list().await?;
    Ok(Json(items))
}

/// Create an item from `{title}`
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let Json(new_item) = payload?;

    let created = state.repository.create(new_item).await?;
    tracing::info!(id = created.id, "Item created");

    Ok(Json(created))
}

/// Get one item
pub async fn get_item(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> ApiResult<Json<Item>> {
    let Path(id) = id?;

    state
        .repository
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// Mark an item done
pub async fn complete_item(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> ApiResult<Json<Item>> {
    let Path(id) = id?;

    let mut item = state
        .repository
        .get(id)
        .await?
        .ok_or(ApiError::NotFound(id))?;
    item.mark_done();

    // Deleted between get and update surfaces as ItemNotFound -> 404
    let updated = state.repository.update(&item).await?;
    tracing::info!(id, "Item marked done");

    Ok(Json(updated))
}

/// Delete an item. Absent ids succeed too.
pub async fn delete_item(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;

    let deleted = state.repository.delete(id).await?;
    tracing::info!(id, deleted, "Item delete requested");

    Ok(StatusCode::OK)
}

/// Health check
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let items_count = state.repository.count().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        backend: state.repository.backend_name().to_string(),
        items_count,
        uptime_secs: state.uptime_secs(),
    }))
}
