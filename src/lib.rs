//! Trace gateway library.
//!
//! Serves `GET /api/v1/trace/ethereum/{tx_hash}` by calling
//! `debug_traceTransaction` on an upstream node and reshaping the result
//! into a CORS-enabled JSON envelope.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod trace;
pub mod upstream;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use trace::{TraceError, TraceTranslator};
