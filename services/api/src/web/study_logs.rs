//! services/api/src/web/study_logs.rs
//!
//! Study log endpoints.

use crate::error::ApiError;
use crate::web::dto::{CreateStudyLogRequest, ErrorResponse, StudyLogQuery, StudyLogResponse};
use crate::web::rest::{parse_date, start_of_day};
use crate::web::extract::{ApiJson, ApiPath, ApiQuery};
use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use studytrack_core::ports::StudyLogFilter;
use uuid::Uuid;

/// Record a study session.
#[utoipa::path(
    post,
    path = "/v1/users/{userId}/study-logs",
    tag = "StudyLogs",
    request_body = CreateStudyLogRequest,
    params(("userId" = Uuid, Path, description = "User ID")),
    responses(
        (status = 201, description = "Study log created", body = StudyLogResponse),
        (status = 400, description = "Minutes out of range", body = ErrorResponse),
        (status = 404, description = "User or subject not found", body = ErrorResponse)
    )
)]
pub async fn create_study_log_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<CreateStudyLogRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let log = state
        .study_logs
        .create_study_log(user_id, req.subject_id, req.studied_at, req.minutes, &req.note)
        .await?;
    Ok((StatusCode::CREATED, Json(StudyLogResponse::from(log))))
}

/// List a user's study logs, newest first.
#[utoipa::path(
    get,
    path = "/v1/users/{userId}/study-logs",
    tag = "StudyLogs",
    params(("userId" = Uuid, Path, description = "User ID"), StudyLogQuery),
    responses(
        (status = 200, description = "Matching study logs", body = [StudyLogResponse]),
        (status = 400, description = "Malformed date", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn list_study_logs_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<StudyLogQuery>,
) -> Result<Json<Vec<StudyLogResponse>>, ApiError> {
    let filter = to_filter(&query)?;
    let logs = state.study_logs.list_study_logs(user_id, &filter).await?;
    Ok(Json(logs.into_iter().map(Into::into).collect()))
}

/// Delete a study log.
#[utoipa::path(
    delete,
    path = "/v1/study-logs/{id}",
    tag = "StudyLogs",
    params(("id" = Uuid, Path, description = "Study log ID")),
    responses(
        (status = 204, description = "Study log deleted"),
        (status = 404, description = "Study log not found", body = ErrorResponse)
    )
)]
pub async fn delete_study_log_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.study_logs.delete_study_log(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `from` starts at midnight of its day; `to` ends at the following midnight.
fn to_filter(query: &StudyLogQuery) -> Result<StudyLogFilter, ApiError> {
    let from = match &query.from {
        Some(raw) => Some(start_of_day(parse_date("from", raw)?)),
        None => None,
    };
    let to = match &query.to {
        Some(raw) => {
            let day_after = parse_date("to", raw)?
                .succ_opt()
                .ok_or_else(|| ApiError::BadRequest("'to' date is out of range".to_string()))?;
            Some(start_of_day(day_after))
        }
        None => None,
    };
    Ok(StudyLogFilter {
        from,
        to,
        subject_id: query.subject_id,
    })
}
