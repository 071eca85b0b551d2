//! Upstream JSON-RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - POST JSON-RPC 2.0 requests to the configured node
//! - Enforce a deadline on every call
//! - Classify transport, protocol and decoding failures

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::timeout;

use crate::config::UpstreamConfig;
use crate::upstream::types::{JsonRpcRequest, JsonRpcResponse, UpstreamError, UpstreamResult};

/// JSON-RPC client for the upstream execution-client node.
///
/// Cloning is cheap; clones share the underlying connection pool. Dropping
/// the future returned by [`UpstreamClient::call`] aborts the request.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url: url::Url,
    timeout_duration: Duration,
}

impl UpstreamClient {
    /// Create a new client from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            UpstreamError::Config(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .no_proxy()
            .build()
            .map_err(|e| UpstreamError::Config(e.to_string()))?;

        Ok(Self {
            http,
            url,
            timeout_duration: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Call `method` with `params` and decode the `result` member as `T`.
    ///
    /// A non-success HTTP status fails the call whatever the body says. On
    /// success statuses a JSON-RPC `error` object takes precedence over any
    /// `result`.
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> UpstreamResult<T> {
        let request = JsonRpcRequest::new(method, params);
        let start = Instant::now();

        tracing::debug!(upstream = %self.url, method, "Sending upstream request");

        let outcome = match timeout(self.timeout_duration, self.send(&request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(UpstreamError::Timeout(self.timeout_duration)),
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &outcome {
            Ok(_) => tracing::debug!(method, elapsed_ms, "Upstream request completed"),
            Err(e) => tracing::warn!(upstream = %self.url, method, elapsed_ms, error = %e, "Upstream request failed"),
        }

        outcome
    }

    async fn send<T: DeserializeOwned>(&self, request: &JsonRpcRequest<'_>) -> UpstreamResult<T> {
        let response = self
            .http
            .post(self.url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        decode_response(status, &body)
    }

    fn transport_error(&self, e: reqwest::Error) -> UpstreamError {
        if e.is_timeout() {
            UpstreamError::Timeout(self.timeout_duration)
        } else {
            UpstreamError::Unreachable(e.to_string())
        }
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("url", &self.url.as_str())
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}

/// Classify a complete upstream HTTP response.
fn decode_response<T: DeserializeOwned>(status: reqwest::StatusCode, body: &[u8]) -> UpstreamResult<T> {
    if !status.is_success() {
        return Err(UpstreamError::Status(status.as_u16()));
    }

    let envelope = serde_json::from_slice::<JsonRpcResponse>(body)
        .map_err(|e| UpstreamError::Malformed(format!("body is not a JSON-RPC response: {}", e)))?;

    if let Some(error) = envelope.error {
        return Err(UpstreamError::Rpc {
            code: error.code,
            message: error
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "upstream_rpc_error".to_string()),
        });
    }

    let result = envelope
        .result
        .ok_or_else(|| UpstreamError::Malformed("response has no result".to_string()))?;

    serde_json::from_value(result).map_err(|e| UpstreamError::Malformed(e.to_string()))
}
