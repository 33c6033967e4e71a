use super::{ensure_user_exists, owned_subject};
use crate::domain::StudyLog;
use crate::error::DomainResult;
use crate::ports::{StudyLogFilter, StudyLogRepository, SubjectRepository, UserRepository};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct StudyLogService {
    study_logs: Arc<dyn StudyLogRepository>,
    users: Arc<dyn UserRepository>,
    subjects: Arc<dyn SubjectRepository>,
}

impl StudyLogService {
    pub fn new(
        study_logs: Arc<dyn StudyLogRepository>,
        users: Arc<dyn UserRepository>,
        subjects: Arc<dyn SubjectRepository>,
    ) -> Self {
        Self {
            study_logs,
            users,
            subjects,
        }
    }

    /// Records a study session. The subject must belong to `user_id`.
    pub async fn create_study_log(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        studied_at: DateTime<Utc>,
        minutes: i32,
        note: &str,
    ) -> DomainResult<StudyLog> {
        ensure_user_exists(self.users.as_ref(), user_id).await?;
        owned_subject(self.subjects.as_ref(), user_id, subject_id).await?;

        let log = StudyLog::new(user_id, subject_id, studied_at, minutes, note)?;
        self.study_logs.create(&log).await?;
        debug!(study_log_id = %log.id, %user_id, %subject_id, minutes, "Study log created");
        Ok(log)
    }

    pub async fn list_study_logs(
        &self,
        user_id: Uuid,
        filter: &StudyLogFilter,
    ) -> DomainResult<Vec<StudyLog>> {
        ensure_user_exists(self.users.as_ref(), user_id).await?;
        self.study_logs.list_by_user(user_id, filter).await
    }

    pub async fn delete_study_log(&self, id: Uuid) -> DomainResult<()> {
        self.study_logs.find_by_id(id).await?;
        self.study_logs.delete(id).await
    }
}
