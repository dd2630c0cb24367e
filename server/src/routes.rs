//! HTTP handlers for the pet record API.
//!
//! Each handler forwards its input to the store and maps the outcome to the
//! `{message}` / `{message, error}` bodies clients already depend on. Store
//! failures are logged with their kind, then collapsed into a 500.

use std::time::Instant;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::record::RecordInput;
use crate::store::{SharedStore, StoreError};

pub const RECORDS_PATH: &str = "/api/records/petRecords";
const RECORD_PATH: &str = "/api/records/petRecords/{id}";

pub const ADDED: &str = "Pet record added successfully";
pub const ADD_FAILED: &str = "Failed to add pet record";
pub const LIST_FAILED: &str = "Failed to fetch pet records";
pub const FETCH_FAILED: &str = "Failed to fetch pet record";
pub const UPDATED: &str = "Pet record updated successfully";
pub const UPDATE_FAILED: &str = "Failed to update pet record";
pub const DELETED: &str = "Pet record deleted successfully";
pub const DELETE_FAILED: &str = "Failed to delete pet record";

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    /// Answer a lookup of a missing id with 404 instead of `200 null`.
    pub strict_not_found: bool,
}

impl AppState {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            strict_not_found: false,
        }
    }

    pub fn with_strict_not_found(mut self, strict: bool) -> Self {
        self.strict_not_found = strict;
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(RECORDS_PATH, get(list_records).post(create_record))
        .route(
            RECORD_PATH,
            get(get_record).put(update_record).delete(delete_record),
        )
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn create_record(State(state): State<AppState>, Json(input): Json<RecordInput>) -> Response {
    match state.store.insert(input).await {
        Ok(record) => {
            tracing::info!(id = %record.id, "pet record added");
            confirm(StatusCode::CREATED, ADDED)
        }
        Err(err) => failure(ADD_FAILED, err),
    }
}

async fn list_records(State(state): State<AppState>) -> Response {
    match state.store.list().await {
        Ok(records) => {
            tracing::debug!(count = records.len(), "listed pet records");
            (StatusCode::OK, Json(records)).into_response()
        }
        Err(err) => failure(LIST_FAILED, err),
    }
}

async fn get_record(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.find(&id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) if state.strict_not_found => failure(FETCH_FAILED, StoreError::NotFound),
        Ok(None) => {
            tracing::debug!(%id, "no pet record matched");
            (StatusCode::OK, Json(Value::Null)).into_response()
        }
        Err(err) => failure(FETCH_FAILED, err),
    }
}

async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<RecordInput>,
) -> Response {
    match state.store.replace(&id, input).await {
        Ok(previous) => {
            tracing::info!(%id, matched = previous.is_some(), "pet record updated");
            confirm(StatusCode::OK, UPDATED)
        }
        Err(err) => failure(UPDATE_FAILED, err),
    }
}

async fn delete_record(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.remove(&id).await {
        Ok(removed) => {
            tracing::info!(%id, matched = removed.is_some(), "pet record deleted");
            confirm(StatusCode::OK, DELETED)
        }
        Err(err) => failure(DELETE_FAILED, err),
    }
}

fn confirm(status: StatusCode, message: &'static str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn failure(message: &'static str, err: StoreError) -> Response {
    let status = match err {
        StoreError::NotFound => StatusCode::NOT_FOUND,
        StoreError::ValidationFailed(_) | StoreError::StorageUnavailable(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    tracing::warn!(kind = err.kind(), error = %err, "{message}");
    (
        status,
        Json(json!({
            "message": message,
            "error": err.to_string(),
        })),
    )
        .into_response()
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_input_accepts_empty_body() {
        let input: RecordInput = serde_json::from_str("{}").unwrap();
        assert!(input.pet_name.is_none());
        assert!(input.pet_age.is_none());
    }

    #[test]
    fn validation_failure_maps_to_500() {
        let resp = failure(ADD_FAILED, StoreError::ValidationFailed(vec!["petName".into()]));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn storage_failure_maps_to_500() {
        let resp = failure(LIST_FAILED, StoreError::StorageUnavailable("disk full".into()));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_maps_to_404() {
        let resp = failure(FETCH_FAILED, StoreError::NotFound);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
