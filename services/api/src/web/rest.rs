//! services/api/src/web/rest.rs
//!
//! Assembles the REST API: the router, the master definition for the OpenAPI
//! specification, and small helpers shared by the handlers.

use crate::error::ApiError;
use crate::web::{dto, goals, middleware, notes, stats, study_logs, subjects, users};
use crate::web::state::AppState;
use axum::{
    http::{header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE}, HeaderValue, Method},
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use std::any::Any;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    info(title = "StudyTrack API", description = "Learning progress tracking REST API"),
    paths(
        users::create_user_handler,
        users::get_user_handler,
        subjects::create_subject_handler,
        subjects::list_subjects_handler,
        subjects::update_subject_handler,
        subjects::delete_subject_handler,
        study_logs::create_study_log_handler,
        study_logs::list_study_logs_handler,
        study_logs::delete_study_log_handler,
        goals::upsert_goal_handler,
        goals::list_goals_handler,
        notes::create_note_handler,
        notes::list_notes_handler,
        notes::get_note_handler,
        notes::update_note_handler,
        notes::delete_note_handler,
        stats::weekly_stats_handler,
    ),
    components(schemas(
        dto::CreateUserRequest,
        dto::UserResponse,
        dto::SubjectRequest,
        dto::SubjectResponse,
        dto::CreateStudyLogRequest,
        dto::StudyLogResponse,
        dto::UpsertGoalRequest,
        dto::GoalResponse,
        dto::NoteRequest,
        dto::NoteResponse,
        dto::WeeklyStatsResponse,
        dto::SubjectWeeklyStatsResponse,
        dto::ErrorResponse,
    )),
    tags(
        (name = "Users"),
        (name = "Subjects"),
        (name = "StudyLogs"),
        (name = "Goals"),
        (name = "Notes"),
        (name = "Stats", description = "Aggregated weekly statistics")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Router
//=========================================================================================

/// Builds the complete application: versioned API routes, request logging,
/// CORS and the Swagger UI.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let v1 = Router::new()
        .route("/users", post(users::create_user_handler))
        .route("/users/{user_id}", get(users::get_user_handler))
        .route(
            "/users/{user_id}/subjects",
            post(subjects::create_subject_handler).get(subjects::list_subjects_handler),
        )
        .route(
            "/subjects/{id}",
            put(subjects::update_subject_handler).delete(subjects::delete_subject_handler),
        )
        .route(
            "/users/{user_id}/study-logs",
            post(study_logs::create_study_log_handler).get(study_logs::list_study_logs_handler),
        )
        .route(
            "/study-logs/{id}",
            axum::routing::delete(study_logs::delete_study_log_handler),
        )
        .route("/users/{user_id}/goals", get(goals::list_goals_handler))
        .route(
            "/users/{user_id}/goals/{subject_id}",
            put(goals::upsert_goal_handler),
        )
        .route(
            "/users/{user_id}/subjects/{subject_id}/notes",
            post(notes::create_note_handler).get(notes::list_notes_handler),
        )
        .route(
            "/notes/{id}",
            get(notes::get_note_handler)
                .put(notes::update_note_handler)
                .delete(notes::delete_note_handler),
        )
        .route("/users/{user_id}/stats/weekly", get(stats::weekly_stats_handler));

    let api_router = Router::new()
        .nest("/v1", v1)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(axum_middleware::from_fn(middleware::log_requests))
        .layer(cors)
        .with_state(state);

    // Merge the API router with the Swagger UI router for a complete application.
    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Turns a handler panic into the standard 500 body.
fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::Internal("request handler panicked".to_string()).into_response()
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([ACCEPT, AUTHORIZATION, CONTENT_TYPE])
}

//=========================================================================================
// Shared Helpers
//=========================================================================================

/// Parses a `YYYY-MM-DD` parameter, naming it in the error message.
pub fn parse_date(name: &str, raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ApiError::BadRequest(format!("invalid {} format, expected YYYY-MM-DD", name))
    })
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates_only() {
        assert_eq!(
            parse_date("weekStart", "2024-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        let err = parse_date("weekStart", "2024-13-01").unwrap_err();
        assert_eq!(err.to_string(), "invalid weekStart format, expected YYYY-MM-DD");
        assert!(parse_date("weekStart", "").is_err());
    }

    #[tokio::test]
    async fn panics_become_json_server_errors() {
        use axum::{body::Body, http::{Request, StatusCode}};
        use http_body_util::BodyExt;
        use tower::ServiceExt;

        async fn boom() -> &'static str {
            panic!("boom")
        }

        let app: Router = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(panic_response));
        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "internal server error");
    }

    #[test]
    fn openapi_document_lists_the_stats_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/v1/users/{userId}/stats/weekly"));
        assert!(doc.paths.paths.contains_key("/v1/notes/{id}"));
    }
}
