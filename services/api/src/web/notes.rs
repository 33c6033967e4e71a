//! services/api/src/web/notes.rs
//!
//! Note endpoints.

use crate::error::ApiError;
use crate::web::dto::{ErrorResponse, NoteRequest, NoteResponse};
use crate::web::extract::{ApiJson, ApiPath};
use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/v1/users/{userId}/subjects/{subjectId}/notes",
    tag = "Notes",
    request_body = NoteRequest,
    params(
        ("userId" = Uuid, Path, description = "User ID"),
        ("subjectId" = Uuid, Path, description = "Subject ID")
    ),
    responses(
        (status = 201, description = "Note created", body = NoteResponse),
        (status = 400, description = "Invalid title, content or tags", body = ErrorResponse),
        (status = 404, description = "User or subject not found", body = ErrorResponse)
    )
)]
pub async fn create_note_handler(
    State(state): State<Arc<AppState>>,
    ApiPath((user_id, subject_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(req): ApiJson<NoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state
        .notes
        .create_note(user_id, subject_id, &req.title, &req.content, req.tags)
        .await?;
    Ok((StatusCode::CREATED, Json(NoteResponse::from(note))))
}

#[utoipa::path(
    get,
    path = "/v1/users/{userId}/subjects/{subjectId}/notes",
    tag = "Notes",
    params(
        ("userId" = Uuid, Path, description = "User ID"),
        ("subjectId" = Uuid, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Notes for the subject, newest first", body = [NoteResponse]),
        (status = 404, description = "User or subject not found", body = ErrorResponse)
    )
)]
pub async fn list_notes_handler(
    State(state): State<Arc<AppState>>,
    ApiPath((user_id, subject_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    let notes = state.notes.list_notes(user_id, subject_id).await?;
    Ok(Json(notes.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/v1/notes/{id}",
    tag = "Notes",
    params(("id" = Uuid, Path, description = "Note ID")),
    responses(
        (status = 200, description = "The note", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    )
)]
pub async fn get_note_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<NoteResponse>, ApiError> {
    let note = state.notes.get_note(id).await?;
    Ok(Json(note.into()))
}

#[utoipa::path(
    put,
    path = "/v1/notes/{id}",
    tag = "Notes",
    request_body = NoteRequest,
    params(("id" = Uuid, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Note updated", body = NoteResponse),
        (status = 400, description = "Invalid title, content or tags", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    )
)]
pub async fn update_note_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<NoteRequest>,
) -> Result<Json<NoteResponse>, ApiError> {
    let note = state
        .notes
        .update_note(id, &req.title, &req.content, req.tags)
        .await?;
    Ok(Json(note.into()))
}

#[utoipa::path(
    delete,
    path = "/v1/notes/{id}",
    tag = "Notes",
    params(("id" = Uuid, Path, description = "Note ID")),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 404, description = "Note not found", body = ErrorResponse)
    )
)]
pub async fn delete_note_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.notes.delete_note(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
