//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use call_logger::{AppConfig, HttpServer};
use tower::ServiceExt;

pub use call_logger::test_support::capture_logs;

pub const BOUNDARY: &str = "call-logger-test-boundary";

/// Router built the way the binary builds it.
pub fn app(config: AppConfig) -> Router {
    HttpServer::new(config).router()
}

/// Send one request through the router without a socket.
pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// `multipart/form-data` body with a `user` JSON part and a `file` part.
pub fn multipart_body(user_json: &str, file_name: &str, file: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"user\"\r\n\
             Content-Type: application/json\r\n\r\n{json}\r\n",
            b = BOUNDARY,
            json = user_json
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n",
            b = BOUNDARY,
            name = file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(file);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// `POST /users` with the given headers and multipart content.
pub fn create_user_request(
    user_json: &str,
    file: &[u8],
    headers: &[(&str, &str)],
) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/users")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder
        .body(Body::from(multipart_body(user_json, "avatar.png", file)))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}
