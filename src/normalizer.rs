//! Session normalization
//!
//! This module turns raw session documents into well-formed focus sessions.
//! - Missing or invalid durations default to 0 minutes
//! - Unrecognized statuses resolve to `Unknown` and never count as completed
//! - Unparseable start times are dropped, which keeps the session out of
//!   day/week bucketing
//!
//! Normalization never fails. Every default applied is recorded as a
//! `NormalizationFlag` on the result.

use crate::schema::{Field, RawFocusSession};
use crate::types::{FocusSession, NormalizationFlag, NormalizedSession, SessionStatus};
use tracing::debug;

/// Normalizer for converting raw documents to focus sessions
pub struct SessionNormalizer;

impl SessionNormalizer {
    /// Normalize a single raw session
    pub fn normalize(raw: &RawFocusSession) -> NormalizedSession {
        let mut flags = Vec::new();

        let id = match raw.id_field() {
            Field::Present(id) => id,
            Field::Missing | Field::Invalid => {
                flags.push(NormalizationFlag::MissingId);
                String::new()
            }
        };

        let start_time = match raw.start_time_field() {
            Field::Present(ts) => Some(ts),
            Field::Missing => {
                flags.push(NormalizationFlag::MissingStartTime);
                None
            }
            Field::Invalid => {
                flags.push(NormalizationFlag::InvalidStartTime);
                None
            }
        };

        let actual_duration_minutes = match raw.actual_duration_field() {
            Field::Present(minutes) => match whole_count(minutes) {
                Some(minutes) => minutes,
                None => {
                    flags.push(NormalizationFlag::InvalidDuration);
                    0
                }
            },
            Field::Missing => {
                flags.push(NormalizationFlag::MissingDuration);
                0
            }
            Field::Invalid => {
                flags.push(NormalizationFlag::InvalidDuration);
                0
            }
        };

        let status = match raw.status_field() {
            Field::Present(s) => SessionStatus::parse(&s),
            Field::Missing | Field::Invalid => SessionStatus::Unknown,
        };
        if status == SessionStatus::Unknown {
            flags.push(NormalizationFlag::UnknownStatus);
        }

        // Secondary counters default silently
        let planned_duration_minutes = raw
            .planned_duration_field()
            .present()
            .and_then(whole_count)
            .unwrap_or(0);
        let interruption_count = raw
            .interruption_count_field()
            .present()
            .and_then(whole_count)
            .unwrap_or(0);
        let strict_mode_used = raw.strict_mode_field().present().unwrap_or(false);

        if !flags.is_empty() {
            debug!(session_id = %id, ?flags, "defaulted focus session fields");
        }

        NormalizedSession {
            session: FocusSession {
                id,
                start_time,
                actual_duration_minutes,
                planned_duration_minutes,
                status,
                interruption_count,
                strict_mode_used,
            },
            flags,
        }
    }

    /// Normalize a batch of raw sessions, preserving order
    pub fn normalize_all(raw: &[RawFocusSession]) -> Vec<NormalizedSession> {
        raw.iter().map(Self::normalize).collect()
    }

    /// Normalize a batch and keep only the sessions
    pub fn to_sessions(raw: &[RawFocusSession]) -> Vec<FocusSession> {
        raw.iter().map(|r| Self::normalize(r).session).collect()
    }
}

/// Sessions that contribute to aggregated focus time
pub fn completed(sessions: &[FocusSession]) -> impl Iterator<Item = &FocusSession> {
    sessions.iter().filter(|s| s.status.is_completed())
}

/// Round a non-negative finite count to a whole number.
/// Negative or non-finite values are rejected.
fn whole_count(value: f64) -> Option<u32> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value.round().min(u32::MAX as f64) as u32)
}
