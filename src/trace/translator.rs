//! Translation of an inbound transaction hash into a normalized trace.

use serde_json::json;

use crate::config::{TraceConfig, UpstreamConfig};
use crate::trace::error::TraceError;
use crate::trace::types::{TraceEnvelope, TraceRequest, TraceResult, TRACE_METHOD};
use crate::upstream::UpstreamClient;

/// Turns a transaction hash into a [`TraceEnvelope`] with one upstream call.
#[derive(Debug, Clone)]
pub struct TraceTranslator {
    client: UpstreamClient,
    tracer: String,
    max_tx_hash_len: usize,
}

impl TraceTranslator {
    pub fn new(upstream: &UpstreamConfig, trace: &TraceConfig) -> Result<Self, TraceError> {
        Ok(Self {
            client: UpstreamClient::new(upstream)?,
            tracer: upstream.tracer.clone(),
            max_tx_hash_len: trace.max_tx_hash_len,
        })
    }

    /// Trace `tx_hash` on the upstream node.
    ///
    /// The hash is forwarded verbatim and echoed back as `txhash`.
    pub async fn handle(&self, tx_hash: String) -> Result<TraceEnvelope, TraceError> {
        let request = self.validate(tx_hash)?;

        let params = json!([request.tx_hash, { "tracer": self.tracer }]);
        let trace: TraceResult = self.client.call(TRACE_METHOD, params).await?;

        Ok(TraceEnvelope::new(request, trace))
    }

    /// Structural checks only; the upstream node owns the hash format.
    pub fn validate(&self, tx_hash: String) -> Result<TraceRequest, TraceError> {
        if tx_hash.trim().is_empty() {
            return Err(TraceError::InvalidInput("transaction hash is empty".to_string()));
        }
        if tx_hash.len() > self.max_tx_hash_len {
            return Err(TraceError::InvalidInput(format!(
                "transaction hash exceeds {} bytes",
                self.max_tx_hash_len
            )));
        }
        if tx_hash.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TraceError::InvalidInput(
                "transaction hash contains whitespace or control characters".to_string(),
            ));
        }
        Ok(TraceRequest { tx_hash })
    }
}
