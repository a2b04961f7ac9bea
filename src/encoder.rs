//! Report encoding
//!
//! This module wraps a computed snapshot into a `FocusReport` carrying
//! producer metadata and provenance timestamps, and renders it as JSON.

use crate::error::ComputeError;
use crate::types::{FocusReport, FocusSnapshot, ReportProducer, ReportProvenance};
use crate::{PRODUCER_NAME, SCHOLAR_VERSION};
use chrono::{DateTime, FixedOffset, Utc};
use uuid::Uuid;

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Encoder for producing dashboard reports
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Encode a snapshot computed for the reference time `now`
    pub fn encode(&self, snapshot: FocusSnapshot, now: &DateTime<FixedOffset>) -> FocusReport {
        let producer = ReportProducer {
            name: PRODUCER_NAME.to_string(),
            version: SCHOLAR_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let provenance = ReportProvenance {
            computed_at_utc: Utc::now().to_rfc3339(),
            reference_time: now.to_rfc3339(),
            utc_offset: now.offset().to_string(),
        };

        FocusReport {
            report_version: REPORT_VERSION.to_string(),
            producer,
            provenance,
            daily_goal: snapshot.daily_goal,
            weekly_trend: snapshot.weekly_trend,
            level: snapshot.level,
            lifetime: snapshot.lifetime,
            normalization: snapshot.normalization,
        }
    }

    /// Encode to a pretty-printed JSON string
    pub fn encode_to_json(
        &self,
        snapshot: FocusSnapshot,
        now: &DateTime<FixedOffset>,
    ) -> Result<String, ComputeError> {
        let report = self.encode(snapshot, now);
        serde_json::to_string_pretty(&report).map_err(ComputeError::JsonError)
    }
}
