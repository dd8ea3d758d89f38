//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! interception (controller, method, request inspector)
//!     → tracing events (debug / warn / error)
//!     → logging.rs subscriber (EnvFilter, pretty or JSON)
//!     → non-blocking writer → stdout and/or rolling file
//! ```
//!
//! # Design Decisions
//! - Structured logging through the tracing crate
//! - Request ID flows into every interception event
//! - Log writes are handed to a background worker so requests never wait on I/O

pub mod logging;

pub use logging::{init_logging, LogGuard};
