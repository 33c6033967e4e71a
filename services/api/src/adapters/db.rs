//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, the concrete implementation
//! of the repository ports from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use studytrack_core::domain::{Goal, Note, StudyLog, Subject, User};
use studytrack_core::error::{DomainError, DomainResult};
use studytrack_core::ports::{
    GoalRepository, NoteRepository, StudyLogFilter, StudyLogRepository, SubjectRepository,
    UserRepository,
};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements every repository port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

/// Translates a `sqlx` error into the domain taxonomy.
fn map_db_error(entity: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| match e {
        sqlx::Error::RowNotFound => DomainError::not_found(entity),
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            DomainError::conflict(format!("{} with this name already exists for this user", entity))
        }
        _ => DomainError::internal(e.to_string()),
    }
}

fn ensure_affected(rows: u64, entity: &str) -> DomainResult<()> {
    if rows == 0 {
        return Err(DomainError::not_found(entity));
    }
    Ok(())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            id: self.id,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(FromRow)]
struct SubjectRecord {
    id: Uuid,
    user_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl SubjectRecord {
    fn to_domain(self) -> Subject {
        Subject {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(FromRow)]
struct StudyLogRecord {
    id: Uuid,
    user_id: Uuid,
    subject_id: Uuid,
    studied_at: DateTime<Utc>,
    minutes: i32,
    note: String,
    created_at: DateTime<Utc>,
}
impl StudyLogRecord {
    fn to_domain(self) -> StudyLog {
        StudyLog {
            id: self.id,
            user_id: self.user_id,
            subject_id: self.subject_id,
            studied_at: self.studied_at,
            minutes: self.minutes,
            note: self.note,
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct GoalRecord {
    id: Uuid,
    user_id: Uuid,
    subject_id: Uuid,
    target_minutes_per_week: i32,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl GoalRecord {
    fn to_domain(self) -> Goal {
        Goal {
            id: self.id,
            user_id: self.user_id,
            subject_id: self.subject_id,
            target_minutes_per_week: self.target_minutes_per_week,
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(FromRow)]
struct NoteRecord {
    id: Uuid,
    subject_id: Uuid,
    user_id: Uuid,
    title: String,
    content: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl NoteRecord {
    fn to_domain(self) -> Note {
        Note {
            id: self.id,
            subject_id: self.subject_id,
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            tags: self.tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

//=========================================================================================
// Repository Trait Implementations
//=========================================================================================

#[async_trait]
impl UserRepository for DbAdapter {
    async fn create(&self, user: &User) -> DomainResult<()> {
        sqlx::query("INSERT INTO users (id, name, created_at, updated_at) VALUES ($1, $2, $3, $4)")
            .bind(user.id)
            .bind(&user.name)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error("user"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("user"))?;
        Ok(record.to_domain())
    }
}

#[async_trait]
impl SubjectRepository for DbAdapter {
    async fn create(&self, subject: &Subject) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO subjects (id, user_id, name, created_at, updated_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(subject.id)
        .bind(subject.user_id)
        .bind(&subject.name)
        .bind(subject.created_at)
        .bind(subject.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error("subject"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Subject> {
        let record = sqlx::query_as::<_, SubjectRecord>(
            "SELECT id, user_id, name, created_at, updated_at FROM subjects WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("subject"))?;
        Ok(record.to_domain())
    }

    async fn list_by_user(&self, user_id: Uuid) -> DomainResult<Vec<Subject>> {
        let records = sqlx::query_as::<_, SubjectRecord>(
            "SELECT id, user_id, name, created_at, updated_at FROM subjects WHERE user_id = $1 ORDER BY created_at ASC, name ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error("subject"))?;

        let subjects = records.into_iter().map(|r| r.to_domain()).collect();
        Ok(subjects)
    }

    async fn update(&self, subject: &Subject) -> DomainResult<()> {
        let result = sqlx::query("UPDATE subjects SET name = $1, updated_at = $2 WHERE id = $3")
            .bind(&subject.name)
            .bind(subject.updated_at)
            .bind(subject.id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error("subject"))?;
        ensure_affected(result.rows_affected(), "subject")
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error("subject"))?;
        ensure_affected(result.rows_affected(), "subject")
    }
}

#[async_trait]
impl StudyLogRepository for DbAdapter {
    async fn create(&self, log: &StudyLog) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO study_logs (id, user_id, subject_id, studied_at, minutes, note, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(log.id)
        .bind(log.user_id)
        .bind(log.subject_id)
        .bind(log.studied_at)
        .bind(log.minutes)
        .bind(&log.note)
        .bind(log.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error("study log"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<StudyLog> {
        let record = sqlx::query_as::<_, StudyLogRecord>(
            "SELECT id, user_id, subject_id, studied_at, minutes, note, created_at FROM study_logs WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("study log"))?;
        Ok(record.to_domain())
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        filter: &StudyLogFilter,
    ) -> DomainResult<Vec<StudyLog>> {
        // The filter is dynamic, so the statement is assembled per call.
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT id, user_id, subject_id, studied_at, minutes, note, created_at FROM study_logs WHERE user_id = ",
        );
        query.push_bind(user_id);
        if let Some(from) = filter.from {
            query.push(" AND studied_at >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            query.push(" AND studied_at < ").push_bind(to);
        }
        if let Some(subject_id) = filter.subject_id {
            query.push(" AND subject_id = ").push_bind(subject_id);
        }
        query.push(" ORDER BY studied_at DESC");

        let records = query
            .build_query_as::<StudyLogRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error("study log"))?;

        let logs = records.into_iter().map(|r| r.to_domain()).collect();
        Ok(logs)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM study_logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error("study log"))?;
        ensure_affected(result.rows_affected(), "study log")
    }
}

#[async_trait]
impl GoalRepository for DbAdapter {
    async fn upsert(&self, goal: &Goal) -> DomainResult<Goal> {
        let record = sqlx::query_as::<_, GoalRecord>(
            r#"
            INSERT INTO goals (id, user_id, subject_id, target_minutes_per_week, start_date, end_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, subject_id) DO UPDATE SET
                target_minutes_per_week = EXCLUDED.target_minutes_per_week,
                start_date = EXCLUDED.start_date,
                end_date = EXCLUDED.end_date,
                updated_at = EXCLUDED.updated_at
            RETURNING id, user_id, subject_id, target_minutes_per_week, start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(goal.id)
        .bind(goal.user_id)
        .bind(goal.subject_id)
        .bind(goal.target_minutes_per_week)
        .bind(goal.start_date)
        .bind(goal.end_date)
        .bind(goal.created_at)
        .bind(goal.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("goal"))?;
        Ok(record.to_domain())
    }

    async fn list_by_user(&self, user_id: Uuid) -> DomainResult<Vec<Goal>> {
        let records = sqlx::query_as::<_, GoalRecord>(
            "SELECT id, user_id, subject_id, target_minutes_per_week, start_date, end_date, created_at, updated_at FROM goals WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error("goal"))?;

        let goals = records.into_iter().map(|r| r.to_domain()).collect();
        Ok(goals)
    }
}

#[async_trait]
impl NoteRepository for DbAdapter {
    async fn create(&self, note: &Note) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO notes (id, subject_id, user_id, title, content, tags, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(note.id)
        .bind(note.subject_id)
        .bind(note.user_id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(&note.tags)
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error("note"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Note> {
        let record = sqlx::query_as::<_, NoteRecord>(
            "SELECT id, subject_id, user_id, title, content, tags, created_at, updated_at FROM notes WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("note"))?;
        Ok(record.to_domain())
    }

    async fn list_by_subject(&self, subject_id: Uuid) -> DomainResult<Vec<Note>> {
        let records = sqlx::query_as::<_, NoteRecord>(
            "SELECT id, subject_id, user_id, title, content, tags, created_at, updated_at FROM notes WHERE subject_id = $1 ORDER BY created_at DESC",
        )
        .bind(subject_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error("note"))?;

        let notes = records.into_iter().map(|r| r.to_domain()).collect();
        Ok(notes)
    }

    async fn update(&self, note: &Note) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE notes SET title = $1, content = $2, tags = $3, updated_at = $4 WHERE id = $5",
        )
        .bind(&note.title)
        .bind(&note.content)
        .bind(&note.tags)
        .bind(note.updated_at)
        .bind(note.id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error("note"))?;
        ensure_affected(result.rows_affected(), "note")
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error("note"))?;
        ensure_affected(result.rows_affected(), "note")
    }
}
