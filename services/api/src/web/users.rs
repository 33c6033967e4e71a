//! services/api/src/web/users.rs
//!
//! User endpoints.

use crate::error::ApiError;
use crate::web::dto::{CreateUserRequest, ErrorResponse, UserResponse};
use crate::web::extract::{ApiJson, ApiPath};
use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use uuid::Uuid;

/// Create a new user.
#[utoipa::path(
    post,
    path = "/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Invalid user name", body = ErrorResponse)
    )
)]
pub async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.create_user(&req.name).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.get_user(id).await?;
    Ok(Json(user.into()))
}
