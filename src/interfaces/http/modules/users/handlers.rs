//! User CRUD handlers
//!
//! Thin wrappers that delegate to `UserService` from the application/identity
//! layer. Each request results in exactly one database statement.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{UserDto, UserRequest};
use crate::application::UserService;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{
    domain_error, ApiError, ErrorResponse, MessageResponse, ValidatedJson,
};

/// User handler state: concrete over `UserRepository` for Axum compatibility.
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService<UserRepository>>,
    /// Include password hashes in `GET /users`
    pub expose_password_hash: bool,
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User created", body = MessageResponse),
        (status = 400, description = "Email domain not accepted", body = ErrorResponse),
        (status = 409, description = "Violates a unique constraint", body = ErrorResponse),
        (status = 422, description = "Malformed body or email", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .user_service
        .create_user(request.into())
        .await
        .map_err(domain_error)?;

    Ok(Json(MessageResponse::new("user created successfully")))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "Users",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserDto),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state
        .user_service
        .get_user(user_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(UserDto::public(user)))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Every user, ordered by id", body = Vec<UserDto>)
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let users = state
        .user_service
        .list_users()
        .await
        .map_err(domain_error)?;

    let to_dto = if state.expose_password_hash {
        UserDto::with_hash
    } else {
        UserDto::public
    };

    Ok(Json(users.into_iter().map(to_dto).collect()))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}",
    tag = "Users",
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User replaced (no-op when the id does not exist)", body = MessageResponse),
        (status = 422, description = "Malformed body or email", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Path(user_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .user_service
        .update_user(user_id, request.into())
        .await
        .map_err(domain_error)?;

    Ok(Json(MessageResponse::new("user updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "Users",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted (no-op when the id does not exist)", body = MessageResponse)
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Path(user_id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .user_service
        .delete_user(user_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(MessageResponse::new("user deleted successfully")))
}
