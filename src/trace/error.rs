//! Failure kinds of the trace translation path.

use thiserror::Error;

use crate::upstream::UpstreamError;

/// Every way a trace request can fail.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The path segment was rejected before contacting the upstream node.
    #[error("invalid transaction hash: {0}")]
    InvalidInput(String),

    /// Connection to the upstream node failed.
    #[error("upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    /// The upstream node did not answer within the deadline.
    #[error("upstream timed out")]
    UpstreamTimeout,

    /// The upstream node answered with a non-success HTTP status.
    #[error("upstream returned HTTP {0}")]
    UpstreamStatus(u16),

    /// The body was not JSON-RPC or the trace lacked a required field.
    #[error("malformed upstream response: {0}")]
    UpstreamMalformed(String),

    /// The node reported a JSON-RPC error, e.g. an unknown transaction.
    #[error("{0}")]
    UpstreamRpc(String),

    /// The gateway itself is misconfigured.
    #[error("gateway misconfigured: {0}")]
    Internal(String),
}

impl TraceError {
    /// Stable identifier placed in the `error` member of the response.
    /// RPC errors surface the node's own message instead.
    pub fn code(&self) -> &str {
        match self {
            TraceError::InvalidInput(_) => "invalid_input",
            TraceError::UpstreamUnreachable(_) => "upstream_unreachable",
            TraceError::UpstreamTimeout => "upstream_timeout",
            TraceError::UpstreamStatus(_) => "upstream_bad_status",
            TraceError::UpstreamMalformed(_) => "upstream_malformed_response",
            TraceError::UpstreamRpc(message) => message.as_str(),
            TraceError::Internal(_) => "internal_error",
        }
    }
}

impl From<UpstreamError> for TraceError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Config(reason) => TraceError::Internal(reason),
            UpstreamError::Unreachable(reason) => TraceError::UpstreamUnreachable(reason),
            UpstreamError::Timeout(_) => TraceError::UpstreamTimeout,
            UpstreamError::Status(status) => TraceError::UpstreamStatus(status),
            UpstreamError::Malformed(reason) => TraceError::UpstreamMalformed(reason),
            UpstreamError::Rpc { message, .. } => TraceError::UpstreamRpc(message),
        }
    }
}
