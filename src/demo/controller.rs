//! User controller. Each handler opts into controller logging explicitly.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderValue};

use crate::demo::model::{ListParams, UserDto, UserError};
use crate::http::AppState;
use crate::interception::{ApiResponse, BinaryResponse, Invocation, RequestInfo, UploadedFile};

/// Handlers serving `/users`.
pub struct UserController;

/// Parsed `POST /users` form: a `user` JSON part and a `file` part.
struct CreateUserForm {
    user: UserDto,
    file: UploadedFile,
}

impl CreateUserForm {
    async fn read(mut multipart: Multipart) -> Result<Self, UserError> {
        let mut user = None;
        let mut file = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| UserError::Form(e.to_string()))?
        {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("user") => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| UserError::Form(e.to_string()))?;
                    let parsed: UserDto = serde_json::from_slice(&bytes)
                        .map_err(|e| UserError::Form(format!("user part: {}", e)))?;
                    user = Some(parsed);
                }
                Some("file") => {
                    let field_name = "file".to_string();
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| UserError::Form(e.to_string()))?;
                    file = Some(UploadedFile {
                        field_name,
                        file_name,
                        content_type,
                        data,
                    });
                }
                _ => {}
            }
        }

        match (user, file) {
            (Some(user), Some(file)) => Ok(Self { user, file }),
            (None, _) => Err(UserError::Form("missing `user` part".into())),
            (_, None) => Err(UserError::Form("missing `file` part".into())),
        }
    }
}

impl UserController {
    pub async fn create_user(
        State(state): State<AppState>,
        request: RequestInfo,
        multipart: Multipart,
    ) -> Result<ApiResponse<UserDto>, UserError> {
        let CreateUserForm { user, file } = CreateUserForm::read(multipart).await?;

        let call = state.interceptors.controller(
            &request,
            Invocation::of::<Self>("create_user").arg(&user).upload(&file),
        );
        let result = state.users.create_user(user, file).map(|created| {
            let location = created
                .id
                .and_then(|id| HeaderValue::from_str(&format!("/users/{}", id)).ok());
            let response = ApiResponse::created(created);
            match location {
                Some(location) => response.with_header(header::LOCATION, location),
                None => response,
            }
        });
        call.finish(&result);
        result
    }

    pub async fn get_user(
        State(state): State<AppState>,
        request: RequestInfo,
        Path(id): Path<u64>,
    ) -> Result<ApiResponse<UserDto>, UserError> {
        state
            .interceptors
            .around_controller(
                &request,
                Invocation::of::<Self>("get_user").arg(&id),
                || async { state.users.find_user(id).map(ApiResponse::ok) },
            )
            .await
    }

    pub async fn list_users(
        State(state): State<AppState>,
        request: RequestInfo,
        Query(params): Query<ListParams>,
    ) -> ApiResponse<Vec<UserDto>> {
        state
            .interceptors
            .around_controller(
                &request,
                Invocation::of::<Self>("list_users").arg(&params),
                || async { ApiResponse::ok(state.users.list_users(params.limit)) },
            )
            .await
    }

    pub async fn get_avatar(
        State(state): State<AppState>,
        request: RequestInfo,
        Path(id): Path<u64>,
    ) -> Result<BinaryResponse, UserError> {
        state
            .interceptors
            .around_controller(
                &request,
                Invocation::of::<Self>("get_avatar").arg(&id),
                || async {
                    state.users.avatar(id).map(|(content_type, data)| {
                        let response = BinaryResponse::new(data);
                        match content_type.and_then(|ct| HeaderValue::from_str(&ct).ok()) {
                            Some(content_type) => response.with_content_type(content_type),
                            None => response,
                        }
                    })
                },
            )
            .await
    }
}

/// Liveness probe. Not routed through the controller logger.
pub async fn health() -> &'static str {
    "ok"
}
