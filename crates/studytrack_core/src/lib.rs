pub mod domain;
pub mod error;
pub mod ports;
pub mod stats;
pub mod usecase;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use domain::{Goal, Note, StudyLog, Subject, SubjectWeeklyStats, User, WeeklyStats};
pub use error::{DomainError, DomainResult};
pub use ports::{
    GoalRepository, NoteRepository, StudyLogFilter, StudyLogRepository, SubjectRepository,
    UserRepository,
};
pub use stats::{aggregate_weekly_stats, WeekWindow};
pub use usecase::{GoalService, NoteService, StatsService, StudyLogService, SubjectService, UserService};
