//! Request handlers.

use std::time::Instant;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::http::response::error_response;
use crate::http::server::AppState;
use crate::trace::{TraceEnvelope, TraceError};

/// `GET /api/v1/trace/ethereum/{tx_hash}`
pub async fn trace_transaction(
    State(state): State<AppState>,
    tx_hash: Result<Path<String>, PathRejection>,
) -> Result<Json<TraceEnvelope>, TraceError> {
    let Path(tx_hash) = tx_hash.map_err(|e| TraceError::InvalidInput(e.body_text()))?;
    let start = Instant::now();

    tracing::debug!(tx_hash = %tx_hash, "Tracing transaction");

    match state.translator.handle(tx_hash.clone()).await {
        Ok(envelope) => {
            tracing::info!(
                tx_hash = %tx_hash,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Trace served"
            );
            Ok(Json(envelope))
        }
        Err(e) => {
            match &e {
                TraceError::InvalidInput(_) | TraceError::UpstreamRpc(_) => {
                    tracing::debug!(tx_hash = %tx_hash, error = %e, "Trace rejected")
                }
                _ => tracing::warn!(tx_hash = %tx_hash, error = %e, "Trace failed"),
            }
            Err(e)
        }
    }
}

/// `GET /api/v1/trace/ethereum` with no hash segment.
pub async fn missing_tx_hash() -> TraceError {
    TraceError::InvalidInput("transaction hash is empty".to_string())
}

/// Liveness probe. Does not contact the upstream node.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "not_found")
}

pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed")
}
