//! User resources served by the demo controller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("user {0} not found")]
    NotFound(u64),

    #[error("user {0} has no avatar")]
    NoAvatar(u64),

    #[error("invalid user: {0}")]
    Invalid(String),

    #[error("invalid form: {0}")]
    Form(String),
}

impl UserError {
    pub fn status(&self) -> StatusCode {
        match self {
            UserError::NotFound(_) | UserError::NoAvatar(_) => StatusCode::NOT_FOUND,
            UserError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            UserError::Form(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
