//! services/api/src/web/goals.rs
//!
//! Goal endpoints. A subject has at most one goal; PUT replaces it.

use crate::error::ApiError;
use crate::web::dto::{ErrorResponse, GoalResponse, UpsertGoalRequest};
use crate::web::extract::{ApiJson, ApiPath};
use crate::web::state::AppState;
use axum::{
    extract::State,
    response::Json,
};
use std::sync::Arc;
use uuid::Uuid;

/// Create or replace the weekly goal for a subject.
#[utoipa::path(
    put,
    path = "/v1/users/{userId}/goals/{subjectId}",
    tag = "Goals",
    request_body = UpsertGoalRequest,
    params(
        ("userId" = Uuid, Path, description = "User ID"),
        ("subjectId" = Uuid, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Goal stored", body = GoalResponse),
        (status = 400, description = "Invalid target or date range", body = ErrorResponse),
        (status = 404, description = "User or subject not found", body = ErrorResponse)
    )
)]
pub async fn upsert_goal_handler(
    State(state): State<Arc<AppState>>,
    ApiPath((user_id, subject_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(req): ApiJson<UpsertGoalRequest>,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal = state
        .goals
        .upsert_goal(
            user_id,
            subject_id,
            req.target_minutes_per_week,
            req.start_date,
            req.end_date,
        )
        .await?;
    Ok(Json(goal.into()))
}

/// List a user's goals.
#[utoipa::path(
    get,
    path = "/v1/users/{userId}/goals",
    tag = "Goals",
    params(("userId" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's goals", body = [GoalResponse]),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn list_goals_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Vec<GoalResponse>>, ApiError> {
    let goals = state.goals.list_goals(user_id).await?;
    Ok(Json(goals.into_iter().map(Into::into).collect()))
}
