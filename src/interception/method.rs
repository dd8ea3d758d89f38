//! Entry/exit logging for marked methods.
//!
//! A method opts in by declaring a [`Loggable`] marker and routing its body
//! through a [`MethodCall`]:
//!
//! ```ignore
//! const FIND_USER: Loggable = Loggable::new().show_data(true);
//!
//! let call = interceptors.method(&FIND_USER, Invocation::of::<Self>("find_user").arg(&id));
//! call.try_run(|| self.users.get(id).cloned().ok_or(NotFound(id)))
//! ```

use std::fmt::{self, Display, Write as _};
use std::future::Future;

use serde::Serialize;

use crate::interception::invocation::{Arg, Invocation};
use crate::interception::json::{to_json_or_marker, ToJson};

/// Marker attached to a method whose calls are logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Loggable {
    label: Option<&'static str>,
    show_data: bool,
}

impl Loggable {
    pub const fn new() -> Self {
        Self {
            label: None,
            show_data: false,
        }
    }

    /// Free-text label, attached to every event as the `label` field.
    pub const fn label(self, label: &'static str) -> Self {
        Self {
            label: Some(label),
            ..self
        }
    }

    /// Include arguments and results in the log lines.
    pub const fn show_data(self, show_data: bool) -> Self {
        Self { show_data, ..self }
    }

    pub fn label_text(&self) -> Option<&'static str> {
        self.label
    }

    pub fn shows_data(&self) -> bool {
        self.show_data
    }
}

/// Logs entry to and exit from [`Loggable`] methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodLogger;

impl MethodLogger {
    pub fn new() -> Self {
        Self
    }

    /// Log the entry into a method. The returned handle logs the exit.
    pub fn enter(&self, loggable: &Loggable, invocation: Invocation<'_>) -> MethodCall {
        let declaring_type = invocation.declaring_type();
        let method = invocation.method();

        if tracing::enabled!(tracing::Level::DEBUG) {
            let mut message = format!("Entering method: {}.{}", declaring_type, method);
            if loggable.show_data {
                append_arguments(&mut message, invocation.args());
            }
            tracing::debug!(
                label = loggable.label.unwrap_or_default(),
                declaring_type,
                method,
                "{}",
                message
            );
        }

        MethodCall {
            inner: Some(ActiveMethod {
                declaring_type,
                method,
                loggable: *loggable,
            }),
        }
    }
}

/// Argument list for the entry line. Stops at the first uploaded file.
fn append_arguments(message: &mut String, args: &[Arg<'_>]) {
    for (index, arg) in args.iter().enumerate() {
        let value = match arg {
            Arg::Json(value) => value,
            Arg::Upload(_) => break,
        };
        let _ = write!(message, ". Argument {}: {}", index, to_json_or_marker(*value));
    }
}

/// A method call whose exit is still to be logged.
#[derive(Debug)]
#[must_use = "log the outcome with `exit`, `exit_with_error` or one of the `run` helpers"]
pub struct MethodCall {
    inner: Option<ActiveMethod>,
}

#[derive(Debug)]
struct ActiveMethod {
    declaring_type: &'static str,
    method: &'static str,
    loggable: Loggable,
}

impl MethodCall {
    /// A call that logs nothing; used when method logging is not installed.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }

    /// Log a normal return.
    pub fn exit(self, result: &dyn ToJson) {
        let Some(call) = self.inner else {
            return;
        };
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        let rendered = if call.loggable.show_data {
            to_json_or_marker(result)
        } else {
            String::new()
        };
        tracing::debug!(
            label = call.loggable.label.unwrap_or_default(),
            declaring_type = call.declaring_type,
            method = call.method,
            "Exiting method: {}.{}. Result: {}",
            call.declaring_type,
            call.method,
            rendered
        );
    }

    /// Log a return through the error path.
    pub fn exit_with_error(self, error: &dyn Display) {
        let Some(call) = self.inner else {
            return;
        };
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        let detail = ErrorDetail {
            error,
            show: call.loggable.show_data,
        };
        tracing::debug!(
            label = call.loggable.label.unwrap_or_default(),
            declaring_type = call.declaring_type,
            method = call.method,
            "Exiting method: {}.{}. Error{}",
            call.declaring_type,
            call.method,
            detail
        );
    }

    pub fn run<T, F>(self, f: F) -> T
    where
        T: Serialize,
        F: FnOnce() -> T,
    {
        let output = f();
        self.exit(&output);
        output
    }

    pub fn try_run<T, E, F>(self, f: F) -> Result<T, E>
    where
        T: Serialize,
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        let output = f();
        self.log_result(&output);
        output
    }

    pub async fn run_async<T, Fut>(self, fut: Fut) -> T
    where
        T: Serialize,
        Fut: Future<Output = T>,
    {
        let output = fut.await;
        self.exit(&output);
        output
    }

    pub async fn try_run_async<T, E, Fut>(self, fut: Fut) -> Result<T, E>
    where
        T: Serialize,
        E: Display,
        Fut: Future<Output = Result<T, E>>,
    {
        let output = fut.await;
        self.log_result(&output);
        output
    }

    fn log_result<T: Serialize, E: Display>(self, output: &Result<T, E>) {
        match output {
            Ok(value) => self.exit(value),
            Err(error) => self.exit_with_error(error),
        }
    }
}

struct ErrorDetail<'a> {
    error: &'a dyn Display,
    show: bool,
}

impl Display for ErrorDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.show {
            write!(f, ": {}", self.error)
        } else {
            Ok(())
        }
    }
}
