//! Local calendar helpers
//!
//! Day and week boundaries are local midnights in the caller's time zone.
//! Comparisons happen on local calendar dates rather than on instants, so a
//! DST transition at midnight cannot shift a session into the wrong bucket.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};

/// Short weekday labels, Sunday first
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Local calendar date of a UTC instant in the given zone
pub fn local_date<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Weekday index with Sunday = 0 .. Saturday = 6
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// Sunday on or before `date`; `None` if it precedes the earliest date
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(weekday_index(date) as u64))
}

/// Sunday that starts the week before the one containing `date`
pub fn previous_week_start(date: NaiveDate) -> Option<NaiveDate> {
    week_start(date)?.checked_sub_days(Days::new(7))
}

/// Sunday that starts the week after the one containing `date`
pub fn next_week_start(date: NaiveDate) -> Option<NaiveDate> {
    week_start(date)?.checked_add_days(Days::new(7))
}
