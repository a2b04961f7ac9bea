//! Lifetime session statistics
//!
//! Cumulative counters over every session in a snapshot. `total_hours` is
//! the input of the level progression.

use crate::types::{FocusSession, LifetimeStats, SessionStatus};

impl LifetimeStats {
    pub fn from_sessions(sessions: &[FocusSession]) -> Self {
        let mut stats = LifetimeStats::default();

        for session in sessions {
            stats.total_sessions += 1;
            match session.status {
                SessionStatus::Completed => {
                    stats.completed_sessions += 1;
                    stats.completed_minutes += u64::from(session.actual_duration_minutes);
                }
                SessionStatus::Interrupted => stats.interrupted_sessions += 1,
                SessionStatus::Abandoned => stats.abandoned_sessions += 1,
                SessionStatus::Unknown => stats.unknown_status_sessions += 1,
            }
            stats.total_interruptions += u64::from(session.interruption_count);
            if session.strict_mode_used {
                stats.strict_mode_sessions += 1;
            }
        }

        stats.total_hours = stats.completed_minutes as f64 / 60.0;
        stats.completion_rate = if stats.total_sessions > 0 {
            stats.completed_sessions as f64 / stats.total_sessions as f64
        } else {
            0.0
        };

        stats
    }
}
