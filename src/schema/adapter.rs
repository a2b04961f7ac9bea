//! Adapter for reading exported focus-session documents
//!
//! Accepts either a JSON array of session documents or NDJSON (one document
//! per line). A document that is not valid JSON is an error; a document that
//! is valid JSON but has odd field values is not, since the normalizer
//! defaults those. `validate_sessions` reports which records would be
//! defaulted.

use crate::error::ComputeError;
use crate::normalizer::SessionNormalizer;
use crate::schema::raw_session::RawFocusSession;
use crate::types::NormalizationFlag;

/// Adapter for converting exported documents into raw session records
pub struct SessionAdapter;

impl SessionAdapter {
    /// Parse a JSON string containing an array of session documents
    pub fn parse_array(json: &str) -> Result<Vec<RawFocusSession>, ComputeError> {
        let sessions: Vec<RawFocusSession> = serde_json::from_str(json)?;
        Ok(sessions)
    }

    /// Parse NDJSON (newline-delimited JSON) containing session documents
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<RawFocusSession>, ComputeError> {
        let mut sessions = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<RawFocusSession>(trimmed) {
                Ok(session) => sessions.push(session),
                Err(e) => {
                    return Err(ComputeError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(sessions)
    }

    /// Report every record the normalizer would have to default
    pub fn validate_sessions(sessions: &[RawFocusSession]) -> Vec<ValidationResult> {
        sessions
            .iter()
            .enumerate()
            .filter_map(|(idx, raw)| {
                let normalized = SessionNormalizer::normalize(raw);
                if normalized.is_clean() {
                    None
                } else {
                    Some(ValidationResult {
                        index: idx,
                        session_id: raw.id_field().present(),
                        flags: normalized.flags,
                    })
                }
            })
            .collect()
    }
}

/// Validation outcome for a single record
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub index: usize,
    pub session_id: Option<String>,
    pub flags: Vec<NormalizationFlag>,
}

impl ValidationResult {
    /// Human-readable summary of the flags
    pub fn describe(&self) -> String {
        self.flags
            .iter()
            .map(|flag| flag.description())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl NormalizationFlag {
    pub fn description(&self) -> &'static str {
        match self {
            NormalizationFlag::MissingId => "missing id",
            NormalizationFlag::MissingDuration => "missing actualDurationMinutes (counted as 0)",
            NormalizationFlag::InvalidDuration => "invalid actualDurationMinutes (counted as 0)",
            NormalizationFlag::MissingStartTime => "missing startTime (excluded from day/week totals)",
            NormalizationFlag::InvalidStartTime => "unparseable startTime (excluded from day/week totals)",
            NormalizationFlag::UnknownStatus => "unrecognized status (not counted as completed)",
        }
    }
}
