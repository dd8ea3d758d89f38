//! Demo user API.
//!
//! A small controller + service pair showing both interception points in
//! place: handlers go through the controller logger, service methods carry
//! `Loggable` markers.

pub mod controller;
pub mod model;
pub mod service;

use axum::routing::get;
use axum::Router;

use crate::http::AppState;

pub use controller::UserController;
pub use model::{ListParams, UserDto, UserError};
pub use service::UserService;

/// Routes of the demo API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(UserController::list_users).post(UserController::create_user),
        )
        .route("/users/{id}", get(UserController::get_user))
        .route("/users/{id}/avatar", get(UserController::get_avatar))
        .route("/health", get(controller::health))
}
