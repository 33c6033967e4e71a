//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use std::sync::Arc;
use studytrack_core::ports::{
    GoalRepository, NoteRepository, StudyLogRepository, SubjectRepository, UserRepository,
};
use studytrack_core::usecase::{
    GoalService, NoteService, StatsService, StudyLogService, SubjectService, UserService,
};

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub users: UserService,
    pub subjects: SubjectService,
    pub study_logs: StudyLogService,
    pub goals: GoalService,
    pub notes: NoteService,
    pub stats: StatsService,
}

impl AppState {
    /// Wires every use-case service to a single store implementing all ports.
    pub fn new<S>(store: Arc<S>, config: Arc<Config>) -> Self
    where
        S: UserRepository
            + SubjectRepository
            + StudyLogRepository
            + GoalRepository
            + NoteRepository
            + 'static,
    {
        let users: Arc<dyn UserRepository> = store.clone();
        let subjects: Arc<dyn SubjectRepository> = store.clone();
        let study_logs: Arc<dyn StudyLogRepository> = store.clone();
        let goals: Arc<dyn GoalRepository> = store.clone();
        let notes: Arc<dyn NoteRepository> = store;

        Self {
            config,
            users: UserService::new(users.clone()),
            subjects: SubjectService::new(subjects.clone(), users.clone()),
            study_logs: StudyLogService::new(study_logs.clone(), users.clone(), subjects.clone()),
            goals: GoalService::new(goals.clone(), users.clone(), subjects.clone()),
            notes: NoteService::new(notes, subjects.clone(), users.clone()),
            stats: StatsService::new(users, subjects, study_logs, goals),
        }
    }
}
