//! HTTP query surface
//!
//! - `GET /autocomplete?term=<query>` - keyword search
//! - `GET /status` - service statistics
//! - `GET /health` - readiness
//! - `POST /reload` - rebuild from the configured source

use crate::error::{InvalidQuery, ServiceError};
use crate::query::validate_term;
use crate::server::protocol::{
    AutocompleteParams, AutocompleteResponse, ErrorDetail, ErrorResponse, ReloadResponse,
    StatusResponse,
};
use crate::server::service::CatalogService;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Instant;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CatalogService>,
    /// Caller-side minimum length of the whole search term
    pub min_term_len: usize,
}

/// Errors returned by handlers
#[derive(Debug)]
pub enum ApiError {
    InvalidQuery(InvalidQuery),
    NotReady,
    /// Blocking task failed to complete
    Internal(String),
}

impl ApiError {
    fn to_status_and_payload(&self) -> (StatusCode, ErrorResponse) {
        let (status, code, message) = match self {
            Self::InvalidQuery(e) => (StatusCode::BAD_REQUEST, "INVALID_QUERY", e.to_string()),
            Self::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NOT_READY",
                "Catalog is not loaded".to_string(),
            ),
            Self::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                message.clone(),
            ),
        };

        (
            status,
            ErrorResponse {
                error: ErrorDetail {
                    code: code.to_string(),
                    message,
                },
            },
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, payload) = self.to_status_and_payload();
        (status, Json(payload)).into_response()
    }
}

impl From<InvalidQuery> for ApiError {
    fn from(e: InvalidQuery) -> Self {
        ApiError::InvalidQuery(e)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotReady => ApiError::NotReady,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/autocomplete", get(handle_autocomplete))
        .route("/status", get(handle_status))
        .route("/health", get(handle_health))
        .route("/reload", post(handle_reload))
        .with_state(state)
}

async fn handle_autocomplete(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteParams>,
) -> Result<Json<AutocompleteResponse>, ApiError> {
    let start = Instant::now();
    let term = validate_term(params.term.as_deref(), state.min_term_len)?.to_string();

    // The key scan is CPU bound and grows with the catalog
    let service = Arc::clone(&state.service);
    let query = term.clone();
    let outcome = tokio::task::spawn_blocking(move || service.search(&query))
        .await
        .map_err(|e| ApiError::Internal(format!("search task failed: {e}")))??;
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    tracing::debug!(
        term = %term,
        results = outcome.records.len(),
        generation = outcome.generation,
        cached = outcome.cached,
        duration_ms,
        "autocomplete"
    );

    Ok(Json(AutocompleteResponse {
        count: outcome.records.len(),
        results: outcome.records,
        generation: outcome.generation,
        cached: outcome.cached,
        duration_ms,
    }))
}

async fn handle_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(state.service.status())
}

async fn handle_health(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.service.is_ready() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    }
}

async fn handle_reload(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, ApiError> {
    let service = Arc::clone(&state.service);
    let result = tokio::task::spawn_blocking(move || service.reload())
        .await
        .map_err(|e| ApiError::Internal(format!("reload task failed: {e}")))?;

    let response = match result {
        Ok(report) => ReloadResponse {
            success: true,
            message: format!("Reloaded {} records", report.records),
            generation: Some(report.generation),
            records: report.records,
        },
        Err(e) => {
            let current = state.service.snapshot();
            ReloadResponse {
                success: false,
                message: format!("Failed to reload: {e}"),
                generation: current.as_ref().map(|g| g.number()),
                records: current.as_ref().map(|g| g.catalog().len()).unwrap_or(0),
            }
        }
    };

    Ok(Json(response))
}
