//! Processor configuration
//!
//! Student-level settings that shape the derived values. Configuration is
//! explicit and passed into the pipeline; nothing is read from ambient state
//! except the system UTC offset when none is configured.

use crate::error::ComputeError;
use crate::goal::DEFAULT_DAILY_TARGET_HOURS;
use chrono::{FixedOffset, Local, Offset};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for a [`crate::pipeline::FocusProcessor`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusConfig {
    /// Daily focus target in hours
    #[serde(default = "default_target_hours")]
    pub daily_target_hours: f64,
    /// UTC offset for day/week boundaries, e.g. "+02:00"; system offset when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,
}

fn default_target_hours() -> f64 {
    DEFAULT_DAILY_TARGET_HOURS
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            daily_target_hours: DEFAULT_DAILY_TARGET_HOURS,
            utc_offset: None,
        }
    }
}

impl FocusConfig {
    /// Load configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ComputeError> {
        let config: FocusConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ComputeError> {
        serde_json::to_string_pretty(self).map_err(ComputeError::JsonError)
    }

    /// Read and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ComputeError> {
        let json = fs::read_to_string(path).map_err(|e| {
            ComputeError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn with_target_hours(mut self, hours: f64) -> Self {
        self.daily_target_hours = hours;
        self
    }

    pub fn with_utc_offset(mut self, offset: impl Into<String>) -> Self {
        self.utc_offset = Some(offset.into());
        self
    }

    /// Reject values the computation would only paper over
    pub fn validate(&self) -> Result<(), ComputeError> {
        if !self.daily_target_hours.is_finite() || self.daily_target_hours < 0.0 {
            return Err(ComputeError::InvalidConfig(format!(
                "dailyTargetHours must be a non-negative number, got {}",
                self.daily_target_hours
            )));
        }
        if let Some(offset) = &self.utc_offset {
            parse_utc_offset(offset)?;
        }
        Ok(())
    }

    /// Offset used for local day and week boundaries
    pub fn offset(&self) -> Result<FixedOffset, ComputeError> {
        match &self.utc_offset {
            Some(offset) => parse_utc_offset(offset),
            None => Ok(Local::now().offset().fix()),
        }
    }
}

/// Parse `Z`, `UTC`, `+HH:MM`, `-HH:MM` or `+HHMM`
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, ComputeError> {
    let trimmed = raw.trim();
    let invalid = || ComputeError::InvalidConfig(format!("invalid UTC offset: {raw:?}"));

    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match trimmed.chars().next() {
        Some('+') => (1, &trimmed[1..]),
        Some('-') => (-1, &trimmed[1..]),
        _ => return Err(invalid()),
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) || rest.len() > 5 {
        return Err(invalid());
    }
    let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
    let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
    if hours > 14 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FocusConfig::from_json("{}").unwrap();
        assert_eq!(config, FocusConfig::default());
        assert_eq!(config.daily_target_hours, 4.0);
    }

    #[test]
    fn test_round_trip() {
        let config = FocusConfig::default()
            .with_target_hours(2.5)
            .with_utc_offset("+05:30");

        let json = config.to_json().unwrap();
        assert!(json.contains("dailyTargetHours"));
        assert_eq!(FocusConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(FocusConfig::from_json(r#"{"dailyTargetHours": -1}"#).is_err());
        assert!(FocusConfig::from_json(r#"{"utcOffset": "Europe/Paris"}"#).is_err());
        assert!(FocusConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("+02:00").unwrap().local_minus_utc(), 7200);
        assert_eq!(parse_utc_offset("-0330").unwrap().local_minus_utc(), -12600);
        assert_eq!(parse_utc_offset("+05:45").unwrap().local_minus_utc(), 20700);
        assert!(parse_utc_offset("02:00").is_err());
        assert!(parse_utc_offset("+2").is_err());
        assert!(parse_utc_offset("+25:00").is_err());
        assert!(parse_utc_offset("+02:75").is_err());
    }

    #[test]
    fn test_offset_from_config() {
        let config = FocusConfig::default().with_utc_offset("-05:00");
        assert_eq!(config.offset().unwrap().local_minus_utc(), -18000);

        assert!(FocusConfig::default().offset().is_ok());
    }
}
