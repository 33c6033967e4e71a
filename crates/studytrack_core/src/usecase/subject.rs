use super::ensure_user_exists;
use crate::domain::Subject;
use crate::error::DomainResult;
use crate::ports::{SubjectRepository, UserRepository};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct SubjectService {
    subjects: Arc<dyn SubjectRepository>,
    users: Arc<dyn UserRepository>,
}

impl SubjectService {
    pub fn new(subjects: Arc<dyn SubjectRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { subjects, users }
    }

    pub async fn create_subject(&self, user_id: Uuid, name: &str) -> DomainResult<Subject> {
        ensure_user_exists(self.users.as_ref(), user_id).await?;
        let subject = Subject::new(user_id, name)?;
        self.subjects.create(&subject).await?;
        debug!(subject_id = %subject.id, %user_id, "Subject created");
        Ok(subject)
    }

    pub async fn list_subjects(&self, user_id: Uuid) -> DomainResult<Vec<Subject>> {
        ensure_user_exists(self.users.as_ref(), user_id).await?;
        self.subjects.list_by_user(user_id).await
    }

    pub async fn update_subject(&self, id: Uuid, name: &str) -> DomainResult<Subject> {
        let mut subject = self.subjects.find_by_id(id).await?;
        subject.rename(name)?;
        self.subjects.update(&subject).await?;
        debug!(subject_id = %subject.id, "Subject renamed");
        Ok(subject)
    }

    pub async fn delete_subject(&self, id: Uuid) -> DomainResult<()> {
        self.subjects.find_by_id(id).await?;
        self.subjects.delete(id).await?;
        debug!(subject_id = %id, "Subject deleted");
        Ok(())
    }
}
