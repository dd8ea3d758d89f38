//! Handler results and how they appear in log lines.
//!
//! # Design Decisions
//! - `ApiResponse` is the status + body envelope returned by controllers
//! - Binary bodies are never rendered, only acknowledged
//! - `Result` outcomes are logged on both paths

use std::fmt;

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::interception::json::ToJson;

/// What part of a result is written to the log.
#[derive(Clone, Copy)]
pub enum LoggedBody<'a> {
    Json(&'a dyn ToJson),
    Binary,
    Empty,
}

impl fmt::Debug for LoggedBody<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggedBody::Json(_) => f.write_str("Json(..)"),
            LoggedBody::Binary => f.write_str("Binary"),
            LoggedBody::Empty => f.write_str("Empty"),
        }
    }
}

/// Results that the controller wrapper knows how to log.
pub trait LogResponse {
    fn logged_body(&self) -> LoggedBody<'_>;

    /// Description of a failed outcome, `None` on success.
    fn failure(&self) -> Option<String> {
        None
    }
}

/// Status code plus JSON body.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    status: StatusCode,
    headers: HeaderMap,
    body: T,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, body: T) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body,
        }
    }

    pub fn ok(body: T) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn created(body: T) -> Self {
        Self::new(StatusCode::CREATED, body)
    }

    pub fn with_header(mut self, name: header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body)).into_response();
        response.headers_mut().extend(self.headers);
        response
    }
}

impl<T: Serialize> LogResponse for ApiResponse<T> {
    fn logged_body(&self) -> LoggedBody<'_> {
        LoggedBody::Json(&self.body)
    }
}

/// Status code plus raw bytes.
#[derive(Debug, Clone)]
pub struct BinaryResponse {
    status: StatusCode,
    content_type: HeaderValue,
    data: Bytes,
}

impl BinaryResponse {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: HeaderValue::from_static("application/octet-stream"),
            data: data.into(),
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_content_type(mut self, content_type: HeaderValue) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

impl IntoResponse for BinaryResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, self.content_type)],
            self.data,
        )
            .into_response()
    }
}

impl LogResponse for BinaryResponse {
    fn logged_body(&self) -> LoggedBody<'_> {
        LoggedBody::Binary
    }
}

impl<T: Serialize> LogResponse for Json<T> {
    fn logged_body(&self) -> LoggedBody<'_> {
        LoggedBody::Json(&self.0)
    }
}

impl LogResponse for String {
    fn logged_body(&self) -> LoggedBody<'_> {
        LoggedBody::Json(self)
    }
}

impl LogResponse for &'static str {
    fn logged_body(&self) -> LoggedBody<'_> {
        LoggedBody::Json(self)
    }
}

impl LogResponse for () {
    fn logged_body(&self) -> LoggedBody<'_> {
        LoggedBody::Empty
    }
}

impl LogResponse for StatusCode {
    fn logged_body(&self) -> LoggedBody<'_> {
        LoggedBody::Empty
    }
}

impl<R: LogResponse> LogResponse for (StatusCode, R) {
    fn logged_body(&self) -> LoggedBody<'_> {
        self.1.logged_body()
    }
}

impl<R, E> LogResponse for Result<R, E>
where
    R: LogResponse,
    E: fmt::Display,
{
    fn logged_body(&self) -> LoggedBody<'_> {
        match self {
            Ok(r) => r.logged_body(),
            Err(_) => LoggedBody::Empty,
        }
    }

    fn failure(&self) -> Option<String> {
        match self {
            Ok(r) => r.failure(),
            Err(e) => Some(e.to_string()),
        }
    }
}
