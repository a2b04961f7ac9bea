//! Daily goal tracking
//!
//! Sums today's completed focus minutes and expresses them as a percentage of
//! the student's daily target.

use crate::calendar::local_date;
use crate::types::{DailyGoal, FocusSession};
use chrono::{DateTime, TimeZone};

/// Target used when the student has not configured one
pub const DEFAULT_DAILY_TARGET_HOURS: f64 = 4.0;

/// Compute goal progress for sessions already scoped to the current day.
///
/// `target_hours` of `None` uses [`DEFAULT_DAILY_TARGET_HOURS`]. A target of
/// zero (or a negative/NaN one) cannot be divided by: progress is then 100 if
/// anything was completed and 0 otherwise.
pub fn compute_daily_goal(sessions: &[FocusSession], target_hours: Option<f64>) -> DailyGoal {
    let target_hours = effective_target(target_hours);
    let completed_minutes_today = sum_completed_minutes(sessions);

    DailyGoal {
        target_hours,
        completed_minutes_today,
        percent_complete: percent_of_goal(completed_minutes_today, target_hours),
    }
}

/// Compute goal progress for the local calendar day containing `now`.
///
/// Sessions without a start time, or starting on another local day, are
/// ignored.
pub fn compute_daily_goal_at<Tz: TimeZone>(
    sessions: &[FocusSession],
    target_hours: Option<f64>,
    now: &DateTime<Tz>,
) -> DailyGoal {
    let tz = now.timezone();
    let today = now.date_naive();

    let todays: Vec<FocusSession> = sessions
        .iter()
        .filter(|s| {
            s.start_time
                .map_or(false, |start| local_date(&start, &tz) == today)
        })
        .cloned()
        .collect();

    compute_daily_goal(&todays, target_hours)
}

fn effective_target(target_hours: Option<f64>) -> f64 {
    match target_hours {
        None => DEFAULT_DAILY_TARGET_HOURS,
        Some(hours) if hours > 0.0 => hours,
        // zero, negative and NaN all take the no-target branch
        Some(_) => 0.0,
    }
}

fn sum_completed_minutes(sessions: &[FocusSession]) -> u32 {
    let total: u64 = sessions
        .iter()
        .map(|s| u64::from(s.completed_minutes()))
        .sum();
    total.min(u64::from(u32::MAX)) as u32
}

fn percent_of_goal(completed_minutes: u32, target_hours: f64) -> u8 {
    if target_hours <= 0.0 {
        return if completed_minutes > 0 { 100 } else { 0 };
    }
    let pct = (completed_minutes as f64 / 60.0) / target_hours * 100.0;
    pct.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionStatus;
    use chrono::{FixedOffset, Utc};

    fn session(minutes: u32, status: SessionStatus, start: Option<DateTime<Utc>>) -> FocusSession {
        FocusSession {
            id: format!("s-{minutes}"),
            start_time: start,
            actual_duration_minutes: minutes,
            planned_duration_minutes: 25,
            status,
            interruption_count: 0,
            strict_mode_used: false,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_thirty_minutes_of_four_hours() {
        let sessions = vec![session(30, SessionStatus::Completed, Some(at(2024, 1, 15, 9, 0)))];

        let goal = compute_daily_goal(&sessions, Some(4.0));
        assert_eq!(goal.completed_minutes_today, 30);
        // round(30 / 240 * 100) = round(12.5) = 13
        assert_eq!(goal.percent_complete, 13);
    }

    #[test]
    fn test_empty_sessions() {
        let goal = compute_daily_goal(&[], Some(4.0));
        assert_eq!(goal.completed_minutes_today, 0);
        assert_eq!(goal.percent_complete, 0);
    }

    #[test]
    fn test_default_target() {
        let sessions = vec![session(120, SessionStatus::Completed, None)];

        let goal = compute_daily_goal(&sessions, None);
        assert_eq!(goal.target_hours, DEFAULT_DAILY_TARGET_HOURS);
        assert_eq!(goal.percent_complete, 50);
    }

    #[test]
    fn test_only_completed_sessions_count() {
        let sessions = vec![
            session(60, SessionStatus::Completed, None),
            session(45, SessionStatus::Interrupted, None),
            session(15, SessionStatus::Abandoned, None),
            session(90, SessionStatus::Unknown, None),
        ];

        let goal = compute_daily_goal(&sessions, Some(2.0));
        assert_eq!(goal.completed_minutes_today, 60);
        assert_eq!(goal.percent_complete, 50);
    }

    #[test]
    fn test_percent_is_clamped() {
        let sessions = vec![session(600, SessionStatus::Completed, None)];

        let goal = compute_daily_goal(&sessions, Some(1.0));
        assert_eq!(goal.percent_complete, 100);
    }

    #[test]
    fn test_zero_target() {
        let none_done = compute_daily_goal(&[], Some(0.0));
        assert_eq!(none_done.percent_complete, 0);

        let some_done = compute_daily_goal(&[session(5, SessionStatus::Completed, None)], Some(0.0));
        assert_eq!(some_done.percent_complete, 100);

        let negative = compute_daily_goal(&[session(5, SessionStatus::Completed, None)], Some(-3.0));
        assert_eq!(negative.percent_complete, 100);
        assert_eq!(negative.target_hours, 0.0);

        let nan = compute_daily_goal(&[], Some(f64::NAN));
        assert_eq!(nan.percent_complete, 0);
    }

    #[test]
    fn test_daily_goal_at_filters_local_day() {
        // UTC+2: 2024-01-15 23:30 UTC is already the 16th locally
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 1, 16, 10, 0, 0).unwrap();

        let sessions = vec![
            session(30, SessionStatus::Completed, Some(at(2024, 1, 15, 23, 30))),
            session(20, SessionStatus::Completed, Some(at(2024, 1, 15, 21, 59))),
            session(40, SessionStatus::Completed, Some(at(2024, 1, 16, 8, 0))),
            session(50, SessionStatus::Completed, None),
        ];

        let goal = compute_daily_goal_at(&sessions, Some(4.0), &now);
        assert_eq!(goal.completed_minutes_today, 70);
    }
}
