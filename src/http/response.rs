//! Response shaping and error mapping.
//!
//! # Responsibilities
//! - Map trace failures to HTTP status codes
//! - Render every failure as `{"ok": false, "error": ...}`
//!
//! # Design Decisions
//! - Upstream failures are 502, a missed deadline is 504
//! - Node-reported RPC errors are the caller's problem (400) and carry the
//!   node's message

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::trace::TraceError;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub ok: bool,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// Build an error response with the given status and error string.
pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (status, Json(ErrorEnvelope::new(error))).into_response()
}

impl TraceError {
    pub fn status(&self) -> StatusCode {
        match self {
            TraceError::InvalidInput(_) | TraceError::UpstreamRpc(_) => StatusCode::BAD_REQUEST,
            TraceError::UpstreamUnreachable(_)
            | TraceError::UpstreamStatus(_)
            | TraceError::UpstreamMalformed(_) => StatusCode::BAD_GATEWAY,
            TraceError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            TraceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TraceError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(TraceError::InvalidInput("".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(TraceError::UpstreamRpc("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(TraceError::UpstreamUnreachable("x".into()).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(TraceError::UpstreamMalformed("x".into()).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(TraceError::UpstreamStatus(500).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(TraceError::UpstreamTimeout.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn test_error_body() {
        let response = TraceError::UpstreamMalformed("missing field `preimages`".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"ok": false, "error": "upstream_malformed_response"}));
    }
}
