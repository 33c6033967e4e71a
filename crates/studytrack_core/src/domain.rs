//! crates/studytrack_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.
//! Constructors validate their input and fail before anything is persisted.

use crate::error::{DomainError, DomainResult};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

pub const MAX_USER_NAME_LEN: usize = 100;
pub const MAX_SUBJECT_NAME_LEN: usize = 200;
pub const MIN_STUDY_MINUTES: i32 = 1;
pub const MAX_STUDY_MINUTES: i32 = 1440;
pub const MAX_NOTE_TITLE_LEN: usize = 200;
pub const MAX_NOTE_CONTENT_LEN: usize = 10_000;
pub const MAX_NOTE_TAGS: usize = 10;
pub const MAX_NOTE_TAG_LEN: usize = 50;

//=========================================================================================
// Entities
//=========================================================================================

/// Represents a user of the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: &str) -> DomainResult<Self> {
        validate_name("user name", name, MAX_USER_NAME_LEN)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// A named learning topic owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subject {
    pub fn new(user_id: Uuid, name: &str) -> DomainResult<Self> {
        validate_name("subject name", name, MAX_SUBJECT_NAME_LEN)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Renames the subject. The owner never changes.
    pub fn rename(&mut self, name: &str) -> DomainResult<()> {
        validate_name("subject name", name, MAX_SUBJECT_NAME_LEN)?;
        self.name = name.to_string();
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// A timestamped record of minutes spent on a subject.
/// Immutable once created; it can only be deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject_id: Uuid,
    pub studied_at: DateTime<Utc>,
    pub minutes: i32,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl StudyLog {
    pub fn new(
        user_id: Uuid,
        subject_id: Uuid,
        studied_at: DateTime<Utc>,
        minutes: i32,
        note: &str,
    ) -> DomainResult<Self> {
        validate_minutes(minutes)?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            subject_id,
            studied_at,
            minutes,
            note: note.to_string(),
            created_at: Utc::now(),
        })
    }
}

/// A weekly target for one subject, with an optional effective date range.
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject_id: Uuid,
    pub target_minutes_per_week: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(
        user_id: Uuid,
        subject_id: Uuid,
        target_minutes_per_week: i32,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> DomainResult<Self> {
        if target_minutes_per_week <= 0 {
            return Err(DomainError::validation(
                "target minutes per week must be greater than 0",
            ));
        }
        // An end date equal to the start date is a one-day goal and is accepted.
        if matches!(end_date, Some(end) if end < start_date) {
            return Err(DomainError::validation("end date must be after start date"));
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            subject_id,
            target_minutes_per_week,
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
        })
    }
}

/// A free-form note attached to a subject.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(
        user_id: Uuid,
        subject_id: Uuid,
        title: &str,
        content: &str,
        tags: Vec<String>,
    ) -> DomainResult<Self> {
        validate_note(title, content, &tags)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            subject_id,
            user_id,
            title: title.to_string(),
            content: content.to_string(),
            tags,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update(&mut self, title: &str, content: &str, tags: Vec<String>) -> DomainResult<()> {
        validate_note(title, content, &tags)?;
        self.title = title.to_string();
        self.content = content.to_string();
        self.tags = tags;
        self.updated_at = Utc::now();
        Ok(())
    }
}

//=========================================================================================
// Aggregation Output (never persisted)
//=========================================================================================

/// Study totals for one week, one row per subject the user owns.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyStats {
    pub week_start: NaiveDate,
    pub subjects: Vec<SubjectWeeklyStats>,
    pub total_minutes: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectWeeklyStats {
    pub subject_id: Uuid,
    pub subject_name: String,
    pub total_minutes: i64,
    /// 0 when the subject has no goal.
    pub target_minutes_per_week: i32,
    /// Unclamped percentage; 0 when there is no target.
    pub achievement_rate: f64,
}

//=========================================================================================
// Validators
//=========================================================================================

fn validate_name(field: &str, value: &str, max_len: usize) -> DomainResult<()> {
    if value.is_empty() {
        return Err(DomainError::validation(format!("{} is required", field)));
    }
    if value.chars().count() > max_len {
        return Err(DomainError::validation(format!(
            "{} must be {} characters or less",
            field, max_len
        )));
    }
    Ok(())
}

fn validate_minutes(minutes: i32) -> DomainResult<()> {
    if minutes < MIN_STUDY_MINUTES {
        return Err(DomainError::validation("minutes must be greater than 0"));
    }
    if minutes > MAX_STUDY_MINUTES {
        return Err(DomainError::validation(format!(
            "minutes must be {} or less",
            MAX_STUDY_MINUTES
        )));
    }
    Ok(())
}

fn validate_note(title: &str, content: &str, tags: &[String]) -> DomainResult<()> {
    validate_name("note title", title, MAX_NOTE_TITLE_LEN)?;
    if content.chars().count() > MAX_NOTE_CONTENT_LEN {
        return Err(DomainError::validation(format!(
            "note content must be {} characters or less",
            MAX_NOTE_CONTENT_LEN
        )));
    }
    if tags.len() > MAX_NOTE_TAGS {
        return Err(DomainError::validation(format!(
            "note tags must be {} or less",
            MAX_NOTE_TAGS
        )));
    }
    if tags.iter().any(|tag| tag.chars().count() > MAX_NOTE_TAG_LEN) {
        return Err(DomainError::validation(format!(
            "each tag must be {} characters or less",
            MAX_NOTE_TAG_LEN
        )));
    }
    Ok(())
}
