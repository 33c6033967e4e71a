use super::{ensure_user_exists, owned_subject};
use crate::domain::Note;
use crate::error::DomainResult;
use crate::ports::{NoteRepository, SubjectRepository, UserRepository};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct NoteService {
    notes: Arc<dyn NoteRepository>,
    subjects: Arc<dyn SubjectRepository>,
    users: Arc<dyn UserRepository>,
}

impl NoteService {
    pub fn new(
        notes: Arc<dyn NoteRepository>,
        subjects: Arc<dyn SubjectRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            notes,
            subjects,
            users,
        }
    }

    pub async fn create_note(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        title: &str,
        content: &str,
        tags: Vec<String>,
    ) -> DomainResult<Note> {
        ensure_user_exists(self.users.as_ref(), user_id).await?;
        owned_subject(self.subjects.as_ref(), user_id, subject_id).await?;

        let note = Note::new(user_id, subject_id, title, content, tags)?;
        self.notes.create(&note).await?;
        debug!(note_id = %note.id, %user_id, %subject_id, "Note created");
        Ok(note)
    }

    pub async fn get_note(&self, id: Uuid) -> DomainResult<Note> {
        self.notes.find_by_id(id).await
    }

    pub async fn list_notes(&self, user_id: Uuid, subject_id: Uuid) -> DomainResult<Vec<Note>> {
        ensure_user_exists(self.users.as_ref(), user_id).await?;
        owned_subject(self.subjects.as_ref(), user_id, subject_id).await?;
        self.notes.list_by_subject(subject_id).await
    }

    pub async fn update_note(
        &self,
        id: Uuid,
        title: &str,
        content: &str,
        tags: Vec<String>,
    ) -> DomainResult<Note> {
        let mut note = self.notes.find_by_id(id).await?;
        note.update(title, content, tags)?;
        self.notes.update(&note).await?;
        debug!(note_id = %note.id, "Note updated");
        Ok(note)
    }

    pub async fn delete_note(&self, id: Uuid) -> DomainResult<()> {
        self.notes.find_by_id(id).await?;
        self.notes.delete(id).await?;
        debug!(note_id = %id, "Note deleted");
        Ok(())
    }
}
