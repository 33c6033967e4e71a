use super::{ensure_user_exists, owned_subject};
use crate::domain::Goal;
use crate::error::DomainResult;
use crate::ports::{GoalRepository, SubjectRepository, UserRepository};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct GoalService {
    goals: Arc<dyn GoalRepository>,
    users: Arc<dyn UserRepository>,
    subjects: Arc<dyn SubjectRepository>,
}

impl GoalService {
    pub fn new(
        goals: Arc<dyn GoalRepository>,
        users: Arc<dyn UserRepository>,
        subjects: Arc<dyn SubjectRepository>,
    ) -> Self {
        Self {
            goals,
            users,
            subjects,
        }
    }

    /// Sets the weekly target for a subject, replacing any previous goal.
    /// No history is kept.
    pub async fn upsert_goal(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        target_minutes_per_week: i32,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> DomainResult<Goal> {
        ensure_user_exists(self.users.as_ref(), user_id).await?;
        owned_subject(self.subjects.as_ref(), user_id, subject_id).await?;

        let goal = Goal::new(
            user_id,
            subject_id,
            target_minutes_per_week,
            start_date,
            end_date,
        )?;
        let stored = self.goals.upsert(&goal).await?;
        debug!(goal_id = %stored.id, %subject_id, target_minutes_per_week, "Goal stored");
        Ok(stored)
    }

    pub async fn list_goals(&self, user_id: Uuid) -> DomainResult<Vec<Goal>> {
        ensure_user_exists(self.users.as_ref(), user_id).await?;
        self.goals.list_by_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use crate::usecase::{SubjectService, UserService};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    async fn setup() -> (GoalService, SubjectService, Uuid) {
        let store = Arc::new(InMemoryStore::new());
        let user = UserService::new(store.clone())
            .create_user("Alice")
            .await
            .unwrap();
        (
            GoalService::new(store.clone(), store.clone(), store.clone()),
            SubjectService::new(store.clone(), store),
            user.id,
        )
    }

    #[tokio::test]
    async fn upsert_replaces_previous_goal() {
        let (goals, subjects, user_id) = setup().await;
        let math = subjects.create_subject(user_id, "Math").await.unwrap();

        let first = goals
            .upsert_goal(user_id, math.id, 200, date(1, 1), None)
            .await
            .unwrap();
        let second = goals
            .upsert_goal(user_id, math.id, 300, date(2, 1), Some(date(3, 1)))
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        let listed = goals.list_goals(user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].target_minutes_per_week, 300);
        assert_eq!(listed[0].end_date, Some(date(3, 1)));
    }

    #[tokio::test]
    async fn zero_target_is_rejected() {
        let (goals, subjects, user_id) = setup().await;
        let math = subjects.create_subject(user_id, "Math").await.unwrap();
        let err = goals
            .upsert_goal(user_id, math.id, 0, date(1, 1), None)
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(goals.list_goals(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn same_start_and_end_date_is_accepted() {
        let (goals, subjects, user_id) = setup().await;
        let math = subjects.create_subject(user_id, "Math").await.unwrap();
        let goal = goals
            .upsert_goal(user_id, math.id, 60, date(1, 1), Some(date(1, 1)))
            .await
            .unwrap();
        assert_eq!(goal.start_date, goal.end_date.unwrap());
    }

    #[tokio::test]
    async fn foreign_subject_is_not_found() {
        let (goals, subjects, user_id) = setup().await;
        let err = goals
            .upsert_goal(user_id, Uuid::new_v4(), 60, date(1, 1), None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(subjects.list_subjects(user_id).await.unwrap().is_empty());
    }
}
