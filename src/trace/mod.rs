//! Trace translation subsystem.
//!
//! # Data Flow
//! ```text
//! tx hash (path segment)
//!     → translator.rs (structural validation)
//!     → upstream client (debug_traceTransaction)
//!     → types.rs (typed TraceResult, TraceEnvelope)
//!     → error.rs (TraceError on any failure)
//! ```

pub mod error;
pub mod translator;
pub mod types;

pub use error::TraceError;
pub use translator::TraceTranslator;
pub use types::{Addresses, TraceEnvelope, TraceOutput, TraceRequest, TraceResult, CHAIN};
