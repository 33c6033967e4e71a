//! services/api/src/web/subjects.rs
//!
//! Subject endpoints.

use crate::error::ApiError;
use crate::web::dto::{ErrorResponse, SubjectRequest, SubjectResponse};
use crate::web::extract::{ApiJson, ApiPath};
use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use uuid::Uuid;

/// Create a subject for a user.
#[utoipa::path(
    post,
    path = "/v1/users/{userId}/subjects",
    tag = "Subjects",
    request_body = SubjectRequest,
    params(("userId" = Uuid, Path, description = "User ID")),
    responses(
        (status = 201, description = "Subject created", body = SubjectResponse),
        (status = 400, description = "Invalid subject name", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "The user already has a subject with this name", body = ErrorResponse)
    )
)]
pub async fn create_subject_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<SubjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let subject = state.subjects.create_subject(user_id, &req.name).await?;
    Ok((StatusCode::CREATED, Json(SubjectResponse::from(subject))))
}

/// List a user's subjects, oldest first.
#[utoipa::path(
    get,
    path = "/v1/users/{userId}/subjects",
    tag = "Subjects",
    params(("userId" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's subjects", body = [SubjectResponse]),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn list_subjects_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Vec<SubjectResponse>>, ApiError> {
    let subjects = state.subjects.list_subjects(user_id).await?;
    Ok(Json(subjects.into_iter().map(Into::into).collect()))
}

/// Rename a subject.
#[utoipa::path(
    put,
    path = "/v1/subjects/{id}",
    tag = "Subjects",
    request_body = SubjectRequest,
    params(("id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject updated", body = SubjectResponse),
        (status = 400, description = "Invalid subject name", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse),
        (status = 409, description = "Name already in use", body = ErrorResponse)
    )
)]
pub async fn update_subject_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<SubjectRequest>,
) -> Result<Json<SubjectResponse>, ApiError> {
    let subject = state.subjects.update_subject(id, &req.name).await?;
    Ok(Json(subject.into()))
}

/// Delete a subject together with its logs, goal and notes.
#[utoipa::path(
    delete,
    path = "/v1/subjects/{id}",
    tag = "Subjects",
    params(("id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 204, description = "Subject deleted"),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    )
)]
pub async fn delete_subject_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.subjects.delete_subject(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
