//! Upstream node integration subsystem.
//!
//! # Data Flow
//! ```text
//! UpstreamConfig (RPC URL, timeouts)
//!     → client.rs (HTTP POST, deadline, classification)
//!     → types.rs (JSON-RPC envelopes, UpstreamError)
//! ```
//!
//! # Constraints
//! - Exactly one request per call, never retried
//! - Every call has a deadline
//! - A JSON-RPC `error` object is checked before `result`

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, UpstreamError, UpstreamResult};
