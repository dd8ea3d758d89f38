//! Request and method call logging for axum services.
//!
//! Three interception points, each opted into explicitly:
//! - the request inspector ([`interception::RequestInfo`]) logs redacted headers and the URL
//! - the controller wrapper ([`interception::ControllerLogger`]) logs handler calls and responses
//! - the method wrapper ([`interception::MethodLogger`]) logs entry/exit of [`interception::Loggable`] methods

pub mod config;
pub mod demo;
pub mod http;
pub mod interception;
pub mod lifecycle;
pub mod observability;

#[doc(hidden)]
pub mod test_support;

pub use config::AppConfig;
pub use http::HttpServer;
pub use interception::Interceptors;
pub use lifecycle::Shutdown;
