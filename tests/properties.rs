//! Property tests for the aggregation and level rules

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use proptest::prelude::*;
use scholar_focus::calendar::{next_week_start, previous_week_start, week_start};
use scholar_focus::types::{FocusSession, SessionStatus};
use scholar_focus::{compute_daily_goal, compute_level, compute_weekly_trend};

// Wednesday 2024-01-17 12:00 UTC
fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 17, 12, 0, 0).unwrap()
}

fn status_strategy() -> impl Strategy<Value = SessionStatus> {
    prop_oneof![
        Just(SessionStatus::Completed),
        Just(SessionStatus::Interrupted),
        Just(SessionStatus::Abandoned),
        Just(SessionStatus::Unknown),
    ]
}

prop_compose! {
    // Starts within three weeks either side of the reference instant
    fn session_strategy()(
        offset_minutes in -30_240i64..30_240,
        minutes in 0u32..600,
        status in status_strategy(),
        dated in prop::bool::weighted(0.9),
    ) -> FocusSession {
        FocusSession {
            id: format!("s{offset_minutes}"),
            start_time: dated.then(|| reference_now() + Duration::minutes(offset_minutes)),
            actual_duration_minutes: minutes,
            planned_duration_minutes: 25,
            status,
            interruption_count: 0,
            strict_mode_used: false,
        }
    }
}

/// Sums per week must equal the completed minutes whose local date falls in
/// that week
fn assert_week_partition<Tz: TimeZone>(
    sessions: &[FocusSession],
    now: &DateTime<Tz>,
) -> Result<(), TestCaseError> {
    let points = compute_weekly_trend(sessions, now);
    prop_assert_eq!(points.len(), 7);

    let tz = now.timezone();
    let today = now.date_naive();
    let current_start = week_start(today).unwrap();
    let next_start = next_week_start(today).unwrap();
    let previous_start = previous_week_start(today).unwrap();

    let mut expected_current = 0u32;
    let mut expected_previous = 0u32;
    for session in sessions.iter().filter(|s| s.status.is_completed()) {
        let Some(start) = session.start_time else { continue };
        let date = start.with_timezone(&tz).date_naive();
        if date >= current_start && date < next_start {
            expected_current += session.actual_duration_minutes;
        } else if date >= previous_start && date < current_start {
            expected_previous += session.actual_duration_minutes;
        }
    }

    let current: u32 = points.iter().map(|p| p.current_week_minutes).sum();
    let previous: u32 = points.iter().map(|p| p.previous_week_minutes).sum();
    prop_assert_eq!(current, expected_current);
    prop_assert_eq!(previous, expected_previous);
    Ok(())
}

proptest! {
    #[test]
    fn test_percent_complete_stays_in_range(
        sessions in prop::collection::vec(session_strategy(), 0..40),
        target in prop::option::of(-5.0f64..24.0),
    ) {
        let goal = compute_daily_goal(&sessions, target);
        prop_assert!(goal.percent_complete <= 100);

        let completed: u32 = sessions.iter().map(FocusSession::completed_minutes).sum();
        prop_assert_eq!(goal.completed_minutes_today, completed);
        if completed == 0 {
            prop_assert_eq!(goal.percent_complete, 0);
        }
    }

    #[test]
    fn test_weekly_trend_partitions_completed_minutes(
        sessions in prop::collection::vec(session_strategy(), 0..40),
    ) {
        assert_week_partition(&sessions, &reference_now())?;
    }

    #[test]
    fn test_weekly_trend_partitions_by_local_week(
        sessions in prop::collection::vec(session_strategy(), 0..40),
        offset_minutes in (-12i32 * 60..=14 * 60).prop_map(|m| m - m % 15),
    ) {
        let tz = FixedOffset::east_opt(offset_minutes * 60).unwrap();
        assert_week_partition(&sessions, &reference_now().with_timezone(&tz))?;
    }

    #[test]
    fn test_level_is_monotone_in_hours(a in -50.0f64..500.0, b in -50.0f64..500.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_level = compute_level(low).level;
        let high_level = compute_level(high).level;

        prop_assert!(low_level <= high_level);
        prop_assert!((1..=5).contains(&low_level));
        prop_assert!((1..=5).contains(&high_level));
    }
}
