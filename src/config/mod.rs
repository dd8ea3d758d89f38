//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (CALL_LOGGER_*)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → read once at startup to decide which interceptors are installed
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Both interception flags default to enabled when unset
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_config, CliOverrides, ConfigError};
pub use schema::AppConfig;
pub use schema::LogFormat;
pub use schema::LoggingConfig;
pub use schema::ObservabilityConfig;
pub use schema::ServerConfig;
