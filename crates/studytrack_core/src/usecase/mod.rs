//! crates/studytrack_core/src/usecase/mod.rs
//!
//! Application services. Each one owns the repository handles it needs and
//! enforces the rules that span more than one entity: that the user exists,
//! and that a referenced subject belongs to the caller.

pub mod goal;
pub mod note;
pub mod stats;
pub mod study_log;
pub mod subject;
pub mod user;

pub use goal::GoalService;
pub use note::NoteService;
pub use stats::StatsService;
pub use study_log::StudyLogService;
pub use subject::SubjectService;
pub use user::UserService;

use crate::domain::Subject;
use crate::error::{DomainError, DomainResult};
use crate::ports::{SubjectRepository, UserRepository};
use uuid::Uuid;

async fn ensure_user_exists(users: &dyn UserRepository, user_id: Uuid) -> DomainResult<()> {
    users.find_by_id(user_id).await.map(|_| ())
}

/// Loads a subject and checks it belongs to `user_id`.
/// Another user's subject is reported as missing, not as forbidden.
async fn owned_subject(
    subjects: &dyn SubjectRepository,
    user_id: Uuid,
    subject_id: Uuid,
) -> DomainResult<Subject> {
    let subject = subjects.find_by_id(subject_id).await?;
    if subject.user_id != user_id {
        return Err(DomainError::not_found("subject"));
    }
    Ok(subject)
}
