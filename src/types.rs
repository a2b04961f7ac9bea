//! Core types for the Scholar Focus pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: normalized focus sessions, daily goal progress, weekly trend
//! points, scholar levels, lifetime statistics and the encoded report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal classification of a focus session, set once when it ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    Completed,
    Interrupted,
    Abandoned,
    /// Any status string the backend stored that we do not recognize
    Unknown,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Completed => "Completed",
            SessionStatus::Interrupted => "Interrupted",
            SessionStatus::Abandoned => "Abandoned",
            SessionStatus::Unknown => "Unknown",
        }
    }

    /// Parse a stored status string. Matching ignores case and surrounding
    /// whitespace; anything else is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("completed") {
            SessionStatus::Completed
        } else if trimmed.eq_ignore_ascii_case("interrupted") {
            SessionStatus::Interrupted
        } else if trimmed.eq_ignore_ascii_case("abandoned") {
            SessionStatus::Abandoned
        } else {
            SessionStatus::Unknown
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SessionStatus::Completed)
    }
}

/// A focus session after normalization.
///
/// Numeric fields are already defaulted and the status is resolved, so every
/// downstream stage can treat the record as well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    /// Document identifier (empty when the backend record had none)
    pub id: String,
    /// When the session began; `None` if missing or unparseable
    pub start_time: Option<DateTime<Utc>>,
    /// Wall-clock minutes actually spent
    pub actual_duration_minutes: u32,
    /// Configured target duration in minutes
    pub planned_duration_minutes: u32,
    /// Terminal status
    pub status: SessionStatus,
    /// Number of interruptions recorded during the session
    pub interruption_count: u32,
    /// Whether strict mode was enabled
    pub strict_mode_used: bool,
}

impl FocusSession {
    /// Minutes this session contributes to aggregated focus time
    pub fn completed_minutes(&self) -> u32 {
        if self.status.is_completed() {
            self.actual_duration_minutes
        } else {
            0
        }
    }
}

/// Flag describing a default the normalizer had to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationFlag {
    MissingId,
    MissingDuration,
    InvalidDuration,
    MissingStartTime,
    InvalidStartTime,
    UnknownStatus,
}

impl NormalizationFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizationFlag::MissingId => "missing_id",
            NormalizationFlag::MissingDuration => "missing_duration",
            NormalizationFlag::InvalidDuration => "invalid_duration",
            NormalizationFlag::MissingStartTime => "missing_start_time",
            NormalizationFlag::InvalidStartTime => "invalid_start_time",
            NormalizationFlag::UnknownStatus => "unknown_status",
        }
    }
}

/// Normalized session together with the defaults applied to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSession {
    pub session: FocusSession,
    pub flags: Vec<NormalizationFlag>,
}

impl NormalizedSession {
    pub fn is_clean(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Progress toward today's focus goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoal {
    /// Effective target in hours (after defaulting)
    pub target_hours: f64,
    /// Completed focus minutes today
    pub completed_minutes_today: u32,
    /// Percent of the goal reached, 0-100
    pub percent_complete: u8,
}

/// One weekday of the two-week trend chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTrendPoint {
    /// Short weekday label ("Sun".."Sat")
    pub day: String,
    pub current_week_minutes: u32,
    pub previous_week_minutes: u32,
}

/// Weekly trend with week-level totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTrend {
    /// Always seven points, Sunday first
    pub points: [WeeklyTrendPoint; 7],
    pub current_week_total: u32,
    pub previous_week_total: u32,
    /// Week-over-week change in percent; `None` when the previous week is empty
    pub change_percent: Option<f64>,
}

/// Discrete scholar rank derived from cumulative focus hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScholarLevel {
    Novice,
    Apprentice,
    Dedicated,
    Expert,
    Master,
}

/// Level number and display title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInfo {
    pub level: u8,
    pub title: String,
}

/// Level together with advisory progress toward the next one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: u8,
    pub title: String,
    /// Hours the level was computed from (after defaulting)
    pub total_hours: f64,
    /// Progress through the current level's range, 0-100
    pub progress_percent: u8,
    /// Hours left until the next level; `None` at the top level
    pub hours_to_next_level: Option<f64>,
}

/// Cumulative statistics over every session in a snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifetimeStats {
    pub total_sessions: u32,
    pub completed_sessions: u32,
    pub interrupted_sessions: u32,
    pub abandoned_sessions: u32,
    pub unknown_status_sessions: u32,
    /// Sum of completed session minutes
    pub completed_minutes: u64,
    /// `completed_minutes` in hours
    pub total_hours: f64,
    /// Completed sessions over all sessions (0-1)
    pub completion_rate: f64,
    pub total_interruptions: u64,
    pub strict_mode_sessions: u32,
}

/// Every derived value for one snapshot, before encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSnapshot {
    pub daily_goal: DailyGoal,
    pub weekly_trend: WeeklyTrend,
    pub level: LevelProgress,
    pub lifetime: LifetimeStats,
    pub normalization: NormalizationSummary,
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Report provenance information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportProvenance {
    pub computed_at_utc: String,
    /// Reference instant the report was computed for, in local time
    pub reference_time: String,
    pub utc_offset: String,
}

/// Normalization counters carried in the report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationSummary {
    pub records: u32,
    pub defaulted_records: u32,
    pub flags: Vec<String>,
}

/// Complete dashboard report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub provenance: ReportProvenance,
    pub daily_goal: DailyGoal,
    pub weekly_trend: WeeklyTrend,
    pub level: LevelProgress,
    pub lifetime: LifetimeStats,
    pub normalization: NormalizationSummary,
}
