//! Weekly trend aggregation
//!
//! Buckets completed sessions from the current and previous week into a
//! Sunday-first series of seven points, one per weekday. Weeks start at
//! local midnight on Sunday.

use crate::calendar::{
    local_date, next_week_start, previous_week_start, week_start, weekday_index, WEEKDAY_LABELS,
};
use crate::normalizer::completed;
use crate::types::{FocusSession, WeeklyTrend, WeeklyTrendPoint};
use chrono::{DateTime, NaiveDate, TimeZone};
use tracing::debug;

/// Aggregate completed sessions into a seven-point Sun..Sat series.
///
/// Sessions starting on or after the current week's Sunday count toward
/// `current_week_minutes`; sessions in the week before that count toward
/// `previous_week_minutes`. Sessions outside those two weeks, non-completed
/// sessions and sessions without a start time are ignored.
pub fn compute_weekly_trend<Tz: TimeZone>(
    sessions: &[FocusSession],
    now: &DateTime<Tz>,
) -> [WeeklyTrendPoint; 7] {
    let tz = now.timezone();
    let today = now.date_naive();
    // A boundary outside the representable date range leaves its window empty
    let current_start = week_start(today);
    let previous_start = previous_week_start(today);
    let next_start = next_week_start(today);

    let mut current = [0u32; 7];
    let mut previous = [0u32; 7];
    let mut skipped = 0usize;

    for session in completed(sessions) {
        let Some(start) = session.start_time else {
            skipped += 1;
            continue;
        };
        let date = local_date(&start, &tz);
        let idx = weekday_index(date);
        let minutes = session.actual_duration_minutes;

        if in_window(date, current_start, next_start) {
            current[idx] = current[idx].saturating_add(minutes);
        } else if in_window(date, previous_start, current_start) {
            previous[idx] = previous[idx].saturating_add(minutes);
        }
    }

    if skipped > 0 {
        debug!(skipped, "completed sessions without start time left out of weekly trend");
    }

    std::array::from_fn(|idx| WeeklyTrendPoint {
        day: WEEKDAY_LABELS[idx].to_string(),
        current_week_minutes: current[idx],
        previous_week_minutes: previous[idx],
    })
}

/// `start <= date < end`. A missing start means the window is empty; a
/// missing end means the window runs to the last representable date.
fn in_window(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    match start {
        Some(start) => date >= start && end.map_or(true, |end| date < end),
        None => false,
    }
}

impl WeeklyTrend {
    /// Build the trend series together with week totals and change
    pub fn from_sessions<Tz: TimeZone>(sessions: &[FocusSession], now: &DateTime<Tz>) -> Self {
        Self::from_points(compute_weekly_trend(sessions, now))
    }

    /// Summarize an already computed series
    pub fn from_points(points: [WeeklyTrendPoint; 7]) -> Self {
        let current_week_total = sum_minutes(points.iter().map(|p| p.current_week_minutes));
        let previous_week_total = sum_minutes(points.iter().map(|p| p.previous_week_minutes));

        Self {
            points,
            current_week_total,
            previous_week_total,
            change_percent: calculate_change(current_week_total, previous_week_total),
        }
    }
}

fn sum_minutes(values: impl Iterator<Item = u32>) -> u32 {
    values.fold(0u32, |acc, v| acc.saturating_add(v))
}

/// Week-over-week change as a percentage of the previous week
fn calculate_change(current: u32, previous: u32) -> Option<f64> {
    if previous == 0 {
        return None;
    }
    let (current, previous) = (current as f64, previous as f64);
    Some(((current - previous) / previous) * 100.0)
}
