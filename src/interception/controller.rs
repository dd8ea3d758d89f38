//! Controller call logging.
//!
//! # Responsibilities
//! - Log request headers and URL before a controller runs
//! - Log the receiver, method and (non-upload) arguments
//! - Log the response body, or the failure, once the controller returns
//!
//! # Design Decisions
//! - Uploaded files are skipped from the argument list, other args still logged
//! - Binary response bodies are logged as an empty string
//! - Rendering failures are replaced with a marker; they never reach the caller
//!
//! Controllers opt in explicitly, either with [`ControllerLogger::around`] or
//! with the [`ControllerLogger::enter`] / [`ControllerCall::finish`] pair when
//! the call needs to move its arguments.

use std::future::Future;

use crate::interception::invocation::{Arg, Invocation};
use crate::interception::json::{to_json_or_marker, UNSERIALIZABLE};
use crate::interception::request::{RequestInfo, RequestInspector};
use crate::interception::response::{LogResponse, LoggedBody};

/// Wraps controller invocations with request/response logging.
#[derive(Debug, Clone, Default)]
pub struct ControllerLogger {
    inspector: RequestInspector,
}

impl ControllerLogger {
    pub fn new(inspector: RequestInspector) -> Self {
        Self { inspector }
    }

    /// Log the call, run it, log the outcome and hand the result back untouched.
    ///
    /// The request and the invocation are consumed before the returned future
    /// is polled, so they never need to outlive the call.
    pub fn around<F, Fut, R>(
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
        self.enter(request, invocation).run(proceed)
    }

    /// Log the request and the invocation. The returned handle logs the outcome.
    pub fn enter(&self, request: &RequestInfo, invocation: Invocation<'_>) -> ControllerCall {
        self.inspector.log_headers(request);

        let request_id = request.request_id().map(str::to_string);
        let receiver = invocation.receiver();
        let method = invocation.method();

        if tracing::enabled!(tracing::Level::DEBUG) {
            let url = request.url();
            let arguments = render_arguments(invocation.args());
            tracing::debug!(
                request_id = request_id.as_deref().unwrap_or("-"),
                receiver,
                method,
                url = url.as_str(),
                "requestUrl: {}\nmethod invoked {} : {}() arguments : {}",
                url,
                receiver,
                method,
                arguments
            );
        }

        ControllerCall::active(receiver, method, request_id)
    }
}

/// An in-flight controller call whose outcome is still to be logged.
#[derive(Debug)]
#[must_use = "call `finish` with the controller's result"]
pub struct ControllerCall {
    inner: Option<ActiveCall>,
}

#[derive(Debug)]
struct ActiveCall {
    receiver: &'static str,
    method: &'static str,
    request_id: Option<String>,
}

impl ControllerCall {
    fn active(receiver: &'static str, method: &'static str, request_id: Option<String>) -> Self {
        Self {
            inner: Some(ActiveCall {
                receiver,
                method,
                request_id,
            }),
        }
    }

    /// A call that logs nothing; used when controller logging is not installed.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }

    /// Await the controller and log its outcome.
    pub async fn run<F, Fut, R>(self, proceed: F) -> R
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = R>,
        R: LogResponse,
    {
        let result = proceed().await;
        self.finish(&result);
        result
    }

    /// Log the response body, or the failure, of the controller.
    pub fn finish<R: LogResponse + ?Sized>(self, result: &R) {
        let Some(call) = self.inner else {
            return;
        };
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        let request_id = call.request_id.as_deref().unwrap_or("-");

        match result.failure() {
            None => {
                let response = render_response(result.logged_body());
                tracing::debug!(
                    request_id,
                    receiver = call.receiver,
                    method = call.method,
                    "{} : {}() Response : {}",
                    call.receiver,
                    call.method,
                    response
                );
            }
            Some(error) => {
                tracing::debug!(
                    request_id,
                    receiver = call.receiver,
                    method = call.method,
                    error = error.as_str(),
                    "{} : {}() Failed : {}",
                    call.receiver,
                    call.method,
                    error
                );
            }
        }
    }
}

/// JSON array of every argument except uploaded files.
///
/// An argument that fails to serialize is replaced by the marker as a JSON
/// string; the rest of the array is still rendered.
fn render_arguments(args: &[Arg<'_>]) -> String {
    let values: Vec<String> = args
        .iter()
        .filter_map(|arg| match arg {
            Arg::Json(value) => Some(value.to_json_text().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Controller argument could not be rendered");
                format!("\"{}\"", UNSERIALIZABLE)
            })),
            Arg::Upload(_) => None,
        })
        .collect();
    format!("[{}]", values.join(","))
}

fn render_response(body: LoggedBody<'_>) -> String {
    match body {
        LoggedBody::Json(value) => to_json_or_marker(value),
        LoggedBody::Binary | LoggedBody::Empty => String::new(),
    }
}
