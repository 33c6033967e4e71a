//! services/api/src/web/dto.rs
//!
//! Request and response payloads for the REST API, and their conversions
//! from domain types. Field names are camelCase on the wire.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use studytrack_core::domain::{Goal, Note, StudyLog, Subject, SubjectWeeklyStats, User, WeeklyStats};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

//=========================================================================================
// Users
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// 1 to 100 characters.
    pub name: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

//=========================================================================================
// Subjects
//=========================================================================================

/// Used for both creating and renaming a subject.
#[derive(Deserialize, ToSchema)]
pub struct SubjectRequest {
    /// 1 to 200 characters, unique per user.
    pub name: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Subject> for SubjectResponse {
    fn from(s: Subject) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            name: s.name,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

//=========================================================================================
// Study Logs
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudyLogRequest {
    pub subject_id: Uuid,
    pub studied_at: DateTime<Utc>,
    /// Between 1 and 1440.
    pub minutes: i32,
    #[serde(default)]
    pub note: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudyLogResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject_id: Uuid,
    pub studied_at: DateTime<Utc>,
    pub minutes: i32,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl From<StudyLog> for StudyLogResponse {
    fn from(l: StudyLog) -> Self {
        Self {
            id: l.id,
            user_id: l.user_id,
            subject_id: l.subject_id,
            studied_at: l.studied_at,
            minutes: l.minutes,
            note: l.note,
            created_at: l.created_at,
        }
    }
}

/// Query parameters for listing study logs. Dates are `YYYY-MM-DD`;
/// `to` includes the whole named day.
#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StudyLogQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub subject_id: Option<Uuid>,
}

//=========================================================================================
// Goals
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertGoalRequest {
    /// Must be greater than 0.
    pub target_minutes_per_week: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject_id: Uuid,
    pub target_minutes_per_week: i32,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Goal> for GoalResponse {
    fn from(g: Goal) -> Self {
        Self {
            id: g.id,
            user_id: g.user_id,
            subject_id: g.subject_id,
            target_minutes_per_week: g.target_minutes_per_week,
            start_date: g.start_date,
            end_date: g.end_date,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

//=========================================================================================
// Notes
//=========================================================================================

/// Used for both creating and updating a note.
#[derive(Deserialize, ToSchema)]
pub struct NoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(n: Note) -> Self {
        Self {
            id: n.id,
            subject_id: n.subject_id,
            user_id: n.user_id,
            title: n.title,
            content: n.content,
            tags: n.tags,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

//=========================================================================================
// Weekly Stats
//=========================================================================================

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WeeklyStatsQuery {
    /// First day of the week, `YYYY-MM-DD`. Any weekday is accepted.
    pub week_start: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectWeeklyStatsResponse {
    pub subject_id: Uuid,
    pub subject_name: String,
    pub total_minutes: i64,
    /// 0 if the subject has no goal.
    pub target_minutes_per_week: i32,
    /// Percentage of the target reached, unrounded and not capped at 100.
    pub achievement_rate: f64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStatsResponse {
    pub week_start: NaiveDate,
    pub subjects: Vec<SubjectWeeklyStatsResponse>,
    pub total_minutes: i64,
}

impl From<SubjectWeeklyStats> for SubjectWeeklyStatsResponse {
    fn from(s: SubjectWeeklyStats) -> Self {
        Self {
            subject_id: s.subject_id,
            subject_name: s.subject_name,
            total_minutes: s.total_minutes,
            target_minutes_per_week: s.target_minutes_per_week,
            achievement_rate: s.achievement_rate,
        }
    }
}

impl From<WeeklyStats> for WeeklyStatsResponse {
    fn from(s: WeeklyStats) -> Self {
        Self {
            week_start: s.week_start,
            subjects: s.subjects.into_iter().map(Into::into).collect(),
            total_minutes: s.total_minutes,
        }
    }
}

/// Generic error body: `{"error": "..."}`.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
