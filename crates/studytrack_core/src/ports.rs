//! crates/studytrack_core/src/ports.rs
//!
//! Defines the persistence contracts (traits) the use-cases depend on.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of any particular database.

use crate::domain::{Goal, Note, StudyLog, Subject, User};
use crate::error::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

//=========================================================================================
// Query Filters
//=========================================================================================

/// Optional constraints for listing a user's study logs.
/// When both bounds are given the range is half-open: `from <= studied_at < to`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudyLogFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub subject_id: Option<Uuid>,
}

impl StudyLogFilter {
    /// A filter covering `[from, to)` across all subjects.
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            subject_id: None,
        }
    }

    pub fn matches(&self, log: &StudyLog) -> bool {
        self.from.map_or(true, |from| log.studied_at >= from)
            && self.to.map_or(true, |to| log.studied_at < to)
            && self.subject_id.map_or(true, |id| log.subject_id == id)
    }
}

//=========================================================================================
// Repository Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> DomainResult<()>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<User>;
}

#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// Fails with `Conflict` if the user already has a subject with this name.
    async fn create(&self, subject: &Subject) -> DomainResult<()>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Subject>;

    /// Lists the user's subjects, oldest first.
    async fn list_by_user(&self, user_id: Uuid) -> DomainResult<Vec<Subject>>;

    async fn update(&self, subject: &Subject) -> DomainResult<()>;

    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}

#[async_trait]
pub trait StudyLogRepository: Send + Sync {
    async fn create(&self, log: &StudyLog) -> DomainResult<()>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<StudyLog>;

    /// Lists the user's logs matching every constraint in `filter`, newest first.
    async fn list_by_user(
        &self,
        user_id: Uuid,
        filter: &StudyLogFilter,
    ) -> DomainResult<Vec<StudyLog>>;

    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}

#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Stores the goal, replacing any existing goal for the same (user, subject).
    /// Returns the stored row, which keeps the id of the goal it replaced.
    async fn upsert(&self, goal: &Goal) -> DomainResult<Goal>;

    async fn list_by_user(&self, user_id: Uuid) -> DomainResult<Vec<Goal>>;
}

#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create(&self, note: &Note) -> DomainResult<()>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Note>;

    async fn list_by_subject(&self, subject_id: Uuid) -> DomainResult<Vec<Note>>;

    async fn update(&self, note: &Note) -> DomainResult<()>;

    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
