//! Observability subsystem.
//!
//! All subsystems emit `tracing` events; HTTP spans carry the request ID.

pub mod logging;

pub use logging::init_logging;
