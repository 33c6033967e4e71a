//! crates/studytrack_core/src/stats.rs
//!
//! Weekly study-statistics aggregation. Everything here is pure: the caller
//! fetches subjects, logs and goals, and this module folds them into one
//! `WeeklyStats` row per subject.

use crate::domain::{Goal, StudyLog, Subject, SubjectWeeklyStats, WeeklyStats};
use crate::error::{DomainError, DomainResult};
use crate::ports::StudyLogFilter;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;

pub const DAYS_PER_WEEK: i64 = 7;

/// The half-open interval `[start, end)` covering seven days from midnight UTC
/// of `week_start`. Any weekday is accepted as a start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub week_start: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WeekWindow {
    pub fn starting(week_start: NaiveDate) -> DomainResult<Self> {
        let start = Utc.from_utc_datetime(&week_start.and_time(NaiveTime::MIN));
        let end = start
            .checked_add_signed(Duration::days(DAYS_PER_WEEK))
            .ok_or_else(|| DomainError::validation("week start is out of range"))?;
        Ok(Self {
            week_start,
            start,
            end,
        })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }

    /// The repository filter selecting this window's logs across all subjects.
    pub fn log_filter(&self) -> StudyLogFilter {
        StudyLogFilter::between(self.start, self.end)
    }
}

/// `total / target * 100`, unclamped. A zero or negative target yields 0.
pub fn achievement_rate(total_minutes: i64, target_minutes_per_week: i32) -> f64 {
    if target_minutes_per_week <= 0 {
        return 0.0;
    }
    total_minutes as f64 / f64::from(target_minutes_per_week) * 100.0
}

/// Folds a user's subjects, logs and goals into the stats for one week.
///
/// Output rows follow the order of `subjects`; every subject appears exactly
/// once, with zero minutes if nothing was logged. Logs outside `window` are
/// ignored even if the caller passed them in. Goals are matched by subject
/// only; their own start/end dates are not consulted.
pub fn aggregate_weekly_stats(
    window: &WeekWindow,
    subjects: &[Subject],
    logs: &[StudyLog],
    goals: &[Goal],
) -> WeeklyStats {
    let mut minutes_by_subject: HashMap<Uuid, i64> = HashMap::with_capacity(subjects.len());
    for log in logs.iter().filter(|log| window.contains(log.studied_at)) {
        *minutes_by_subject.entry(log.subject_id).or_insert(0) += i64::from(log.minutes);
    }

    // Storage keeps one goal per subject; should duplicates appear, the last one wins.
    let goal_by_subject: HashMap<Uuid, &Goal> =
        goals.iter().map(|goal| (goal.subject_id, goal)).collect();

    let rows: Vec<SubjectWeeklyStats> = subjects
        .iter()
        .map(|subject| {
            let total_minutes = minutes_by_subject.remove(&subject.id).unwrap_or(0);
            let target = goal_by_subject
                .get(&subject.id)
                .map_or(0, |goal| goal.target_minutes_per_week);
            SubjectWeeklyStats {
                subject_id: subject.id,
                subject_name: subject.name.clone(),
                total_minutes,
                target_minutes_per_week: target,
                achievement_rate: achievement_rate(total_minutes, target),
            }
        })
        .collect();

    if !minutes_by_subject.is_empty() {
        warn!(
            orphaned_subjects = minutes_by_subject.len(),
            week_start = %window.week_start,
            "Study logs reference subjects outside the user's subject list"
        );
    }

    WeeklyStats {
        week_start: window.week_start,
        total_minutes: rows.iter().map(|row| row.total_minutes).sum(),
        subjects: rows,
    }
}
