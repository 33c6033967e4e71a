//! crates/studytrack_core/src/memory.rs
//!
//! An in-memory implementation of every repository port, with the same
//! semantics the PostgreSQL adapter provides (unique subject names per user,
//! one goal per subject, half-open log filters, cascade on subject delete).
//! Compiled for tests and behind the `test-utils` feature.

use crate::domain::{Goal, Note, StudyLog, Subject, User};
use crate::error::{DomainError, DomainResult};
use crate::ports::{
    GoalRepository, NoteRepository, StudyLogFilter, StudyLogRepository, SubjectRepository,
    UserRepository,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    subjects: HashMap<Uuid, Subject>,
    study_logs: HashMap<Uuid, StudyLog>,
    goals: HashMap<(Uuid, Uuid), Goal>,
    notes: HashMap<Uuid, Note>,
}

/// A cloneable handle to a shared in-memory store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every operation fails with `DomainError::Internal`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> DomainResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::internal("storage unavailable"));
        }
        Ok(())
    }
}

//=========================================================================================
// Port Implementations
//=========================================================================================

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> DomainResult<()> {
        self.check_available()?;
        self.tables.write().await.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<User> {
        self.check_available()?;
        self.tables
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("user"))
    }
}

fn name_taken(tables: &Tables, subject: &Subject) -> bool {
    tables
        .subjects
        .values()
        .any(|s| s.user_id == subject.user_id && s.name == subject.name && s.id != subject.id)
}

#[async_trait]
impl SubjectRepository for InMemoryStore {
    async fn create(&self, subject: &Subject) -> DomainResult<()> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if name_taken(&tables, subject) {
            return Err(DomainError::conflict(
                "subject with this name already exists for this user",
            ));
        }
        tables.subjects.insert(subject.id, subject.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Subject> {
        self.check_available()?;
        self.tables
            .read()
            .await
            .subjects
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("subject"))
    }

    async fn list_by_user(&self, user_id: Uuid) -> DomainResult<Vec<Subject>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut subjects: Vec<Subject> = tables
            .subjects
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        subjects.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(subjects)
    }

    async fn update(&self, subject: &Subject) -> DomainResult<()> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if !tables.subjects.contains_key(&subject.id) {
            return Err(DomainError::not_found("subject"));
        }
        if name_taken(&tables, subject) {
            return Err(DomainError::conflict(
                "subject with this name already exists for this user",
            ));
        }
        tables.subjects.insert(subject.id, subject.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        tables
            .subjects
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("subject"))?;
        tables.study_logs.retain(|_, log| log.subject_id != id);
        tables.goals.retain(|(_, subject_id), _| *subject_id != id);
        tables.notes.retain(|_, note| note.subject_id != id);
        Ok(())
    }
}

#[async_trait]
impl StudyLogRepository for InMemoryStore {
    async fn create(&self, log: &StudyLog) -> DomainResult<()> {
        self.check_available()?;
        self.tables.write().await.study_logs.insert(log.id, log.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<StudyLog> {
        self.check_available()?;
        self.tables
            .read()
            .await
            .study_logs
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("study log"))
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        filter: &StudyLogFilter,
    ) -> DomainResult<Vec<StudyLog>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut logs: Vec<StudyLog> = tables
            .study_logs
            .values()
            .filter(|log| log.user_id == user_id && filter.matches(log))
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.studied_at.cmp(&a.studied_at));
        Ok(logs)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.check_available()?;
        self.tables
            .write()
            .await
            .study_logs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("study log"))
    }
}

#[async_trait]
impl GoalRepository for InMemoryStore {
    async fn upsert(&self, goal: &Goal) -> DomainResult<Goal> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let key = (goal.user_id, goal.subject_id);
        let stored = match tables.goals.get(&key) {
            Some(existing) => Goal {
                id: existing.id,
                created_at: existing.created_at,
                ..goal.clone()
            },
            None => goal.clone(),
        };
        tables.goals.insert(key, stored.clone());
        Ok(stored)
    }

    async fn list_by_user(&self, user_id: Uuid) -> DomainResult<Vec<Goal>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut goals: Vec<Goal> = tables
            .goals
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(goals)
    }
}

#[async_trait]
impl NoteRepository for InMemoryStore {
    async fn create(&self, note: &Note) -> DomainResult<()> {
        self.check_available()?;
        self.tables.write().await.notes.insert(note.id, note.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Note> {
        self.check_available()?;
        self.tables
            .read()
            .await
            .notes
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("note"))
    }

    async fn list_by_subject(&self, subject_id: Uuid) -> DomainResult<Vec<Note>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut notes: Vec<Note> = tables
            .notes
            .values()
            .filter(|n| n.subject_id == subject_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn update(&self, note: &Note) -> DomainResult<()> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        match tables.notes.get_mut(&note.id) {
            Some(slot) => {
                *slot = note.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("note")),
        }
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.check_available()?;
        self.tables
            .write()
            .await
            .notes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("note"))
    }
}
