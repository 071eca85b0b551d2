//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, CORS header)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::trace::{TraceError, TraceTranslator, CHAIN};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<TraceTranslator>,
}

/// HTTP server for the trace gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, TraceError> {
        let translator = TraceTranslator::new(&config.upstream, &config.trace)?;
        let state = AppState {
            translator: Arc::new(translator),
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let trace_base = format!("/api/v1/trace/{}", CHAIN);

        Router::new()
            .route(&format!("{}/{{tx_hash}}", trace_base), get(handlers::trace_transaction))
            .route(&trace_base, get(handlers::missing_tx_hash))
            .route(&format!("{}/", trace_base), get(handlers::missing_tx_hash))
            .route("/health", get(handlers::health))
            .fallback(handlers::not_found)
            .method_not_allowed_fallback(handlers::method_not_allowed)
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
    }

    /// Run the server on `listener` until `shutdown` fires, then drain
    /// in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.rpc_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving the gateway without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    fn unreachable_config() -> GatewayConfig {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut config = GatewayConfig::default();
        config.upstream.rpc_url = format!("http://{}", addr);
        config.upstream.timeout_secs = 5;
        config
    }

    async fn get(uri: &str) -> axum::response::Response {
        let server = HttpServer::new(unreachable_config()).unwrap();
        server
            .router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = get("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(json_body(response).await, serde_json::json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_missing_hash_is_invalid_input() {
        for uri in ["/api/v1/trace/ethereum", "/api/v1/trace/ethereum/"] {
            let response = get(uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
            assert_eq!(json_body(response).await["error"], "invalid_input");
        }
    }

    #[tokio::test]
    async fn test_encoded_whitespace_is_invalid_input() {
        let response = get("/api/v1/trace/ethereum/0x%20abc").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "invalid_input");
    }

    #[tokio::test]
    async fn test_unreachable_upstream() {
        let response = get("/api/v1/trace/ethereum/0xabc").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"ok": false, "error": "upstream_unreachable"})
        );
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = get("/api/v1/trace/polygon/0xabc").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(json_body(response).await["error"], "not_found");
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let server = HttpServer::new(unreachable_config()).unwrap();
        let response = server
            .router()
            .oneshot(
                Request::post("/api/v1/trace/ethereum/0xabc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json_body(response).await["error"], "method_not_allowed");
    }

    #[tokio::test]
    async fn test_request_id_generated_and_propagated() {
        let response = get("/health").await;
        assert!(response.headers().contains_key("x-request-id"));

        let server = HttpServer::new(unreachable_config()).unwrap();
        let response = server
            .router()
            .oneshot(
                Request::get("/health")
                    .header("x-request-id", "client-id-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "client-id-1");
    }
}
