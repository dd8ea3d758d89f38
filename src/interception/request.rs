//! Request inspection.
//!
//! # Responsibilities
//! - Snapshot the in-flight request (path, query, headers) per call
//! - Redact sensitive headers before they reach a log line
//! - Render the request URL in `path:query` form
//!
//! # Design Decisions
//! - `RequestInfo` is an extractor, so every handler gets its own copy
//! - `Cookie` is dropped, `Authorization` is cut to a short prefix
//! - Header names are compared case-insensitively

use std::collections::BTreeMap;
use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap, Uri};

use crate::http::X_REQUEST_ID;
use crate::interception::json::to_json_string;

/// Default number of `Authorization` characters kept in logs.
pub const DEFAULT_AUTHORIZATION_PREFIX: usize = 10;

const ELLIPSIS: &str = "...";

/// Metadata of the request currently being handled.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    path: String,
    query: Option<String>,
    headers: HeaderMap,
}

impl RequestInfo {
    pub fn new(uri: &Uri, headers: &HeaderMap) -> Self {
        Self {
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            headers: headers.clone(),
        }
    }

    pub fn from_parts(parts: &Parts) -> Self {
        Self::new(&parts.uri, &parts.headers)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Request ID assigned by the request ID layer, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
    }

    /// Request path, followed by `:query` when a non-blank query is present.
    pub fn url(&self) -> String {
        match self.query() {
            Some(query) if !query.trim().is_empty() => format!("{}:{}", self.path, query),
            _ => self.path.clone(),
        }
    }

    /// Headers as an ordered list of single-entry maps, with `Cookie` removed
    /// and `Authorization` truncated to `prefix_len` characters.
    pub fn redacted_headers(&self, prefix_len: usize) -> Vec<BTreeMap<String, String>> {
        self.headers
            .iter()
            .filter(|(name, _)| *name != header::COOKIE)
            .map(|(name, value)| {
                let value = String::from_utf8_lossy(value.as_bytes());
                let value = if *name == header::AUTHORIZATION {
                    truncate_authorization(&value, prefix_len)
                } else {
                    value.into_owned()
                };
                BTreeMap::from([(name.as_str().to_string(), value)])
            })
            .collect()
    }
}

impl<S> FromRequestParts<S> for RequestInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// Keep at most `prefix_len` characters of a credential and mark the cut.
pub fn truncate_authorization(value: &str, prefix_len: usize) -> String {
    let mut truncated: String = value.chars().take(prefix_len).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Emits the redacted header list of a request.
#[derive(Debug, Clone)]
pub struct RequestInspector {
    authorization_prefix: usize,
}

impl Default for RequestInspector {
    fn default() -> Self {
        Self::new(DEFAULT_AUTHORIZATION_PREFIX)
    }
}

impl RequestInspector {
    pub fn new(authorization_prefix: usize) -> Self {
        Self {
            authorization_prefix,
        }
    }

    /// Log the redacted headers at debug level. Never fails.
    pub fn log_headers(&self, request: &RequestInfo) {
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        let headers = request.redacted_headers(self.authorization_prefix);
        match to_json_string(&headers) {
            Ok(json) => tracing::debug!(
                request_id = request.request_id().unwrap_or("-"),
                "{}",
                json
            ),
            Err(e) => tracing::error!(error = %e, "Error converting headers to JSON"),
        }
    }
}
