//! JSON-RPC wire types and upstream error definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Protocol version sent on every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Identifier used for every outbound call. One call is made per inbound
/// request, so ids never need to be correlated.
pub const REQUEST_ID: u64 = 1;

/// Outbound JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: REQUEST_ID,
            method,
            params,
        }
    }
}

/// Inbound JSON-RPC response envelope. `jsonrpc` and `id` are tolerated when
/// absent since some nodes omit them on error paths.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct JsonRpcError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Errors that can occur while calling the upstream node.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Client could not be constructed from configuration.
    #[error("invalid upstream client configuration: {0}")]
    Config(String),

    /// Connection or transport failure.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// No complete response within the deadline.
    #[error("upstream timed out after {0:?}")]
    Timeout(Duration),

    /// Non-success HTTP status without a JSON-RPC error body.
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// Body is not JSON-RPC, or the result does not have the expected shape.
    #[error("malformed upstream response: {0}")]
    Malformed(String),

    /// The node answered with a JSON-RPC error object.
    #[error("upstream rpc error {code:?}: {message}")]
    Rpc { code: Option<i64>, message: String },
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
