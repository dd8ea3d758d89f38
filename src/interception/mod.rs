//! Interception subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → RequestInfo extractor (request.rs, per request)
//!     → controller handler
//!         → ControllerLogger (controller.rs): headers, URL, args
//!         → service methods marked Loggable
//!             → MethodLogger (method.rs): entry, exit
//!         → ControllerLogger: response body or failure
//!     → response
//! ```
//!
//! # Design Decisions
//! - Interception is explicit: handlers and methods opt in at the call site
//! - Each wrapper is installed or not from config, read once at startup
//! - Logging is best-effort; nothing here changes the wrapped call's outcome

pub mod controller;
pub mod invocation;
pub mod json;
pub mod method;
pub mod request;
pub mod response;

use std::future::Future;

use crate::config::LoggingConfig;

pub use controller::{ControllerCall, ControllerLogger};
pub use invocation::{Arg, Invocation, UploadedFile};
pub use json::{LogError, ToJson, UNSERIALIZABLE};
pub use method::{Loggable, MethodCall, MethodLogger};
pub use request::{RequestInfo, RequestInspector};
pub use response::{ApiResponse, BinaryResponse, LogResponse, LoggedBody};

/// The wrappers installed for this process.
#[derive(Debug, Clone)]
pub struct Interceptors {
    controller: Option<ControllerLogger>,
    method: Option<MethodLogger>,
}

impl Default for Interceptors {
    fn default() -> Self {
        Self::from_config(&LoggingConfig::default())
    }
}

impl Interceptors {
    pub fn from_config(config: &LoggingConfig) -> Self {
        let controller = config.controller_logging_enabled.then(|| {
            ControllerLogger::new(RequestInspector::new(config.authorization_prefix_len))
        });
        let method = config.method_logging_enabled.then(MethodLogger::new);
        Self { controller, method }
    }

    /// No wrapper installed.
    pub fn none() -> Self {
        Self {
            controller: None,
            method: None,
        }
    }

    pub fn controller_logger(&self) -> Option<&ControllerLogger> {
        self.controller.as_ref()
    }

    pub fn method_logger(&self) -> Option<&MethodLogger> {
        self.method.as_ref()
    }

    /// Start a controller call. Logs nothing if controller logging is off.
    pub fn controller(&self, request: &RequestInfo, invocation: Invocation<'_>) -> ControllerCall {
        match &self.controller {
            Some(logger) => logger.enter(request, invocation),
            None => ControllerCall::disabled(),
        }
    }

    /// Run a controller call through the controller wrapper, if installed.
    pub fn around_controller<F, Fut, R>(
        &self,
        request: &RequestInfo,
        invocation: Invocation<'_>,
        proceed: F,
    ) -> impl Future<Output = R>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = R>,
        R: LogResponse,
    {
        self.controller(request, invocation).run(proceed)
    }

    /// Start a marked method call. Logs nothing if method logging is off.
    pub fn method(&self, loggable: &Loggable, invocation: Invocation<'_>) -> MethodCall {
        match &self.method {
            Some(logger) => logger.enter(loggable, invocation),
            None => MethodCall::disabled(),
        }
    }
}
