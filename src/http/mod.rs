//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request_id.rs (assign / propagate x-request-id)
//!     → controller handlers (demo), wrapped by the interceptors
//!     → Send to client
//! ```

pub mod request_id;
pub mod server;

pub use request_id::{propagate_request_id_layer, set_request_id_layer, MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
