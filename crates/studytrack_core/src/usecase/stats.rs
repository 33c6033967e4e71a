use super::ensure_user_exists;
use crate::domain::WeeklyStats;
use crate::error::DomainResult;
use crate::ports::{GoalRepository, StudyLogRepository, SubjectRepository, UserRepository};
use crate::stats::{aggregate_weekly_stats, WeekWindow};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

/// Read-only service computing weekly study statistics.
#[derive(Clone)]
pub struct StatsService {
    users: Arc<dyn UserRepository>,
    subjects: Arc<dyn SubjectRepository>,
    study_logs: Arc<dyn StudyLogRepository>,
    goals: Arc<dyn GoalRepository>,
}

impl StatsService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        subjects: Arc<dyn SubjectRepository>,
        study_logs: Arc<dyn StudyLogRepository>,
        goals: Arc<dyn GoalRepository>,
    ) -> Self {
        Self {
            users,
            subjects,
            study_logs,
            goals,
        }
    }

    /// Computes the stats for `[week_start, week_start + 7 days)`.
    ///
    /// Fails with `NotFound` for an unknown user. The three reads are
    /// independent and run concurrently; if any of them fails the whole
    /// computation fails and nothing partial is returned.
    pub async fn weekly_stats(&self, user_id: Uuid, week_start: NaiveDate) -> DomainResult<WeeklyStats> {
        ensure_user_exists(self.users.as_ref(), user_id).await?;
        let window = WeekWindow::starting(week_start)?;
        let filter = window.log_filter();

        let (subjects, logs, goals) = futures::try_join!(
            self.subjects.list_by_user(user_id),
            self.study_logs.list_by_user(user_id, &filter),
            self.goals.list_by_user(user_id),
        )
        .map_err(|e| {
            error!(%user_id, %week_start, "Failed to load data for weekly stats: {}", e);
            e
        })?;

        let stats = aggregate_weekly_stats(&window, &subjects, &logs, &goals);
        debug!(
            %user_id,
            %week_start,
            subjects = stats.subjects.len(),
            total_minutes = stats.total_minutes,
            "Weekly stats computed"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use crate::usecase::{GoalService, StudyLogService, SubjectService, UserService};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    struct Fixture {
        store: Arc<InMemoryStore>,
        stats: StatsService,
        user_id: Uuid,
        math: Uuid,
        english: Uuid,
    }

    fn week_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn week_start_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    /// Math and English; logs of 60 and 90 minutes on Math, 30 on English,
    /// and a 200-minute weekly goal on Math.
    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let users = UserService::new(store.clone());
        let subjects = SubjectService::new(store.clone(), store.clone());
        let logs = StudyLogService::new(store.clone(), store.clone(), store.clone());
        let goals = GoalService::new(store.clone(), store.clone(), store.clone());

        let user = users.create_user("u1").await.unwrap();
        let math = subjects.create_subject(user.id, "Math").await.unwrap();
        let english = subjects.create_subject(user.id, "English").await.unwrap();

        let start = week_start_at();
        logs.create_study_log(user.id, math.id, start + Duration::hours(1), 60, "")
            .await
            .unwrap();
        logs.create_study_log(user.id, math.id, start + Duration::hours(25), 90, "")
            .await
            .unwrap();
        logs.create_study_log(user.id, english.id, start + Duration::hours(2), 30, "")
            .await
            .unwrap();
        goals
            .upsert_goal(user.id, math.id, 200, week_start(), None)
            .await
            .unwrap();

        Fixture {
            stats: StatsService::new(store.clone(), store.clone(), store.clone(), store.clone()),
            store,
            user_id: user.id,
            math: math.id,
            english: english.id,
        }
    }

    #[tokio::test]
    async fn computes_totals_targets_and_rates() {
        let f = fixture().await;
        let stats = f.stats.weekly_stats(f.user_id, week_start()).await.unwrap();

        assert_eq!(stats.week_start, week_start());
        assert_eq!(stats.total_minutes, 180);
        assert_eq!(stats.subjects.len(), 2);

        let math = stats.subjects.iter().find(|s| s.subject_id == f.math).unwrap();
        assert_eq!(math.subject_name, "Math");
        assert_eq!(math.total_minutes, 150);
        assert_eq!(math.target_minutes_per_week, 200);
        assert_eq!(math.achievement_rate, 75.0);

        let english = stats.subjects.iter().find(|s| s.subject_id == f.english).unwrap();
        assert_eq!(english.total_minutes, 30);
        assert_eq!(english.target_minutes_per_week, 0);
        assert_eq!(english.achievement_rate, 0.0);
    }

    #[tokio::test]
    async fn following_week_is_empty_but_keeps_goals() {
        let f = fixture().await;
        let next = week_start() + Duration::days(7);
        let stats = f.stats.weekly_stats(f.user_id, next).await.unwrap();

        assert_eq!(stats.total_minutes, 0);
        assert_eq!(stats.subjects.len(), 2);
        let math = stats.subjects.iter().find(|s| s.subject_id == f.math).unwrap();
        assert_eq!(math.total_minutes, 0);
        assert_eq!(math.target_minutes_per_week, 200);
        assert_eq!(math.achievement_rate, 0.0);
    }

    #[tokio::test]
    async fn log_at_week_end_belongs_to_next_week() {
        let f = fixture().await;
        let logs = StudyLogService::new(f.store.clone(), f.store.clone(), f.store.clone());
        logs.create_study_log(f.user_id, f.english, week_start_at() + Duration::days(7), 45, "")
            .await
            .unwrap();

        let this_week = f.stats.weekly_stats(f.user_id, week_start()).await.unwrap();
        assert_eq!(this_week.total_minutes, 180);

        let next_week = f
            .stats
            .weekly_stats(f.user_id, week_start() + Duration::days(7))
            .await
            .unwrap();
        assert_eq!(next_week.total_minutes, 45);
    }

    #[tokio::test]
    async fn window_may_start_on_any_weekday() {
        let f = fixture().await;
        // Tue 2024-01-02 00:00 excludes the Monday logs at +1h and +2h.
        let tuesday = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let stats = f.stats.weekly_stats(f.user_id, tuesday).await.unwrap();
        assert_eq!(stats.total_minutes, 90);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let f = fixture().await;
        let err = f.stats.weekly_stats(Uuid::new_v4(), week_start()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn storage_failure_propagates_as_internal() {
        let f = fixture().await;
        f.store.set_unavailable(true);
        let err = f.stats.weekly_stats(f.user_id, week_start()).await.unwrap_err();
        assert!(matches!(err, crate::error::DomainError::Internal(_)));
    }
}
