//! services/api/src/web/stats.rs
//!
//! The weekly statistics endpoint.

use crate::error::ApiError;
use crate::web::dto::{ErrorResponse, WeeklyStatsQuery, WeeklyStatsResponse};
use crate::web::rest::parse_date;
use crate::web::extract::{ApiPath, ApiQuery};
use crate::web::state::AppState;
use axum::{
    extract::State,
    response::Json,
};
use std::sync::Arc;
use uuid::Uuid;

/// Get weekly study statistics.
///
/// Covers `[weekStart, weekStart + 7 days)` in UTC. Every subject the user owns
/// is listed, including those with nothing logged that week.
#[utoipa::path(
    get,
    path = "/v1/users/{userId}/stats/weekly",
    tag = "Stats",
    params(("userId" = Uuid, Path, description = "User ID"), WeeklyStatsQuery),
    responses(
        (status = 200, description = "Per-subject totals for the week", body = WeeklyStatsResponse),
        (status = 400, description = "Missing or malformed weekStart", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn weekly_stats_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<WeeklyStatsQuery>,
) -> Result<Json<WeeklyStatsResponse>, ApiError> {
    let raw = query
        .week_start
        .ok_or_else(|| ApiError::BadRequest("weekStart is required".to_string()))?;
    let week_start = parse_date("weekStart", &raw)?;

    let stats = state.stats.weekly_stats(user_id, week_start).await?;
    Ok(Json(stats.into()))
}
