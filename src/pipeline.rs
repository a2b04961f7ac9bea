//! Pipeline orchestration
//!
//! This module provides the public API for Scholar Focus.
//! It orchestrates the full pipeline from exported session documents to the
//! dashboard report.

use crate::config::FocusConfig;
use crate::encoder::ReportEncoder;
use crate::error::ComputeError;
use crate::goal::compute_daily_goal_at;
use crate::level::level_progress;
use crate::normalizer::SessionNormalizer;
use crate::schema::{RawFocusSession, SessionAdapter};
use crate::types::{
    FocusReport, FocusSession, FocusSnapshot, LifetimeStats, NormalizationFlag,
    NormalizationSummary, NormalizedSession, WeeklyTrend,
};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Convert an exported JSON array of session documents into a report.
///
/// # Arguments
/// * `raw_json` - JSON array of focus-session documents
/// * `config` - Student configuration (daily target, UTC offset)
/// * `now` - Reference instant for "today" and "this week"
///
/// # Returns
/// Pretty-printed report JSON
///
/// # Example
/// ```ignore
/// let report = focus_report(sessions_json, &FocusConfig::default(), Utc::now())?;
/// ```
pub fn focus_report(
    raw_json: &str,
    config: &FocusConfig,
    now: DateTime<Utc>,
) -> Result<String, ComputeError> {
    let processor = FocusProcessor::new(config.clone())?;
    processor.process_json(raw_json, now)
}

/// Compute every derived value over already-normalized sessions.
///
/// Pipeline stages:
/// 1. Daily goal for the local day of `now`
/// 2. Weekly trend for the local weeks around `now`
/// 3. Lifetime statistics
/// 4. Level progression from lifetime hours
pub fn compute_snapshot(
    sessions: &[FocusSession],
    target_hours: Option<f64>,
    now: &DateTime<FixedOffset>,
) -> FocusSnapshot {
    let daily_goal = compute_daily_goal_at(sessions, target_hours, now);
    let weekly_trend = WeeklyTrend::from_sessions(sessions, now);
    let lifetime = LifetimeStats::from_sessions(sessions);
    let level = level_progress(lifetime.total_hours);

    FocusSnapshot {
        daily_goal,
        weekly_trend,
        level,
        lifetime,
        normalization: NormalizationSummary {
            records: sessions.len() as u32,
            ..NormalizationSummary::default()
        },
    }
}

/// Processor holding configuration and encoder across snapshots.
///
/// Use this when the same student's data is reported repeatedly, e.g. on
/// every real-time update from the document store.
pub struct FocusProcessor {
    config: FocusConfig,
    offset: FixedOffset,
    encoder: ReportEncoder,
}

impl Default for FocusProcessor {
    fn default() -> Self {
        let config = FocusConfig::default();
        let offset = config.offset().unwrap_or_else(|_| Utc.fix());
        Self {
            config,
            offset,
            encoder: ReportEncoder::new(),
        }
    }
}

impl FocusProcessor {
    /// Create a processor, validating the configuration
    pub fn new(config: FocusConfig) -> Result<Self, ComputeError> {
        config.validate()?;
        let offset = config.offset()?;
        Ok(Self {
            config,
            offset,
            encoder: ReportEncoder::new(),
        })
    }

    /// Replace the encoder (e.g. to pin the instance id)
    pub fn with_encoder(mut self, encoder: ReportEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn config(&self) -> &FocusConfig {
        &self.config
    }

    /// Process a JSON array of session documents into report JSON
    pub fn process_json(&self, raw_json: &str, now: DateTime<Utc>) -> Result<String, ComputeError> {
        let raw = SessionAdapter::parse_array(raw_json)?;
        self.render(&raw, now)
    }

    /// Process NDJSON session documents into report JSON
    pub fn process_ndjson(&self, ndjson: &str, now: DateTime<Utc>) -> Result<String, ComputeError> {
        let raw = SessionAdapter::parse_ndjson(ndjson)?;
        self.render(&raw, now)
    }

    /// Build a report from parsed session documents
    pub fn process_sessions(&self, raw: &[RawFocusSession], now: DateTime<Utc>) -> FocusReport {
        let (snapshot, local_now) = self.snapshot(raw, now);
        self.encoder.encode(snapshot, &local_now)
    }

    fn render(&self, raw: &[RawFocusSession], now: DateTime<Utc>) -> Result<String, ComputeError> {
        let (snapshot, local_now) = self.snapshot(raw, now);
        self.encoder.encode_to_json(snapshot, &local_now)
    }

    fn snapshot(
        &self,
        raw: &[RawFocusSession],
        now: DateTime<Utc>,
    ) -> (FocusSnapshot, DateTime<FixedOffset>) {
        let normalized = SessionNormalizer::normalize_all(raw);
        let summary = summarize_normalization(&normalized);
        if summary.defaulted_records > 0 {
            warn!(
                defaulted = summary.defaulted_records,
                records = summary.records,
                "some focus sessions had missing or invalid fields"
            );
        }

        let sessions: Vec<FocusSession> = normalized.into_iter().map(|n| n.session).collect();
        let local_now = now.with_timezone(&self.offset);

        let mut snapshot =
            compute_snapshot(&sessions, Some(self.config.daily_target_hours), &local_now);
        snapshot.normalization = summary;

        debug!(
            sessions = sessions.len(),
            level = snapshot.level.level,
            today = snapshot.daily_goal.completed_minutes_today,
            "focus report computed"
        );

        (snapshot, local_now)
    }
}

fn summarize_normalization(normalized: &[NormalizedSession]) -> NormalizationSummary {
    let flags: BTreeSet<&'static str> = normalized
        .iter()
        .flat_map(|n| n.flags.iter().map(NormalizationFlag::as_str))
        .collect();

    NormalizationSummary {
        records: normalized.len() as u32,
        defaulted_records: normalized.iter().filter(|n| !n.is_clean()).count() as u32,
        flags: flags.into_iter().map(str::to_string).collect(),
    }
}
