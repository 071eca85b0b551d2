//! Trace request and result shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The only chain this gateway serves.
pub const CHAIN: &str = "ethereum";

/// JSON-RPC method invoked on the upstream node.
pub const TRACE_METHOD: &str = "debug_traceTransaction";

/// An inbound trace request. The hash is opaque and forwarded as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRequest {
    pub tx_hash: String,
}

/// The `result` member of a `debug_traceTransaction` response produced by
/// the openchain tracer. Unknown members are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TraceResult {
    /// Top-level call record, including nested children.
    pub entrypoint: Map<String, Value>,
    /// Hash to revealed pre-image.
    pub preimages: Map<String, Value>,
    /// Addresses touched during execution.
    pub addresses: Addresses,
}

/// Touched addresses, as either a plain list or the tracer's per-address
/// code hash map. Both are passed through unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Addresses {
    List(Vec<String>),
    ByAddress(Map<String, Value>),
}

/// Outbound success body: `{"ok": true, "result": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEnvelope {
    pub ok: bool,
    pub result: TraceOutput,
}

/// Normalized trace returned to browsers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceOutput {
    pub chain: &'static str,
    pub entrypoint: Map<String, Value>,
    pub preimages: Map<String, Value>,
    pub addresses: Addresses,
    pub txhash: String,
}

impl TraceEnvelope {
    /// Wrap an upstream result, echoing the inbound hash unchanged.
    pub fn new(request: TraceRequest, trace: TraceResult) -> Self {
        Self {
            ok: true,
            result: TraceOutput {
                chain: CHAIN,
                entrypoint: trace.entrypoint,
                preimages: trace.preimages,
                addresses: trace.addresses,
                txhash: request.tx_hash,
            },
        }
    }
}
