//! Scholar level progression
//!
//! Maps cumulative completed focus hours onto five fixed ranks. The level is
//! always derived from hours at read time; a level stored on a profile is
//! only compared against the derived value, never trusted over it.

use crate::types::{LevelInfo, LevelProgress, ScholarLevel};
use serde::{Deserialize, Serialize};

impl ScholarLevel {
    pub const ALL: [ScholarLevel; 5] = [
        ScholarLevel::Novice,
        ScholarLevel::Apprentice,
        ScholarLevel::Dedicated,
        ScholarLevel::Expert,
        ScholarLevel::Master,
    ];

    /// Classify cumulative hours.
    ///
    /// Ranges: 1 = up to 10h, 2 = up to 25h, 3 = up to 50h, 4 = below 100h,
    /// 5 = 100h and beyond. Negative and NaN hours are level 1.
    pub fn from_hours(hours: f64) -> Self {
        if hours.is_nan() || hours <= 10.0 {
            ScholarLevel::Novice
        } else if hours <= 25.0 {
            ScholarLevel::Apprentice
        } else if hours <= 50.0 {
            ScholarLevel::Dedicated
        } else if hours < 100.0 {
            ScholarLevel::Expert
        } else {
            ScholarLevel::Master
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            ScholarLevel::Novice => 1,
            ScholarLevel::Apprentice => 2,
            ScholarLevel::Dedicated => 3,
            ScholarLevel::Expert => 4,
            ScholarLevel::Master => 5,
        }
    }

    pub fn from_number(level: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.number() == level)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ScholarLevel::Novice => "Novice Scholar",
            ScholarLevel::Apprentice => "Focused Apprentice",
            ScholarLevel::Dedicated => "Dedicated Learner",
            ScholarLevel::Expert => "Expert Scholar",
            ScholarLevel::Master => "Master Scholar",
        }
    }

    /// Hours at which this level's range begins
    pub fn floor_hours(&self) -> f64 {
        match self {
            ScholarLevel::Novice => 0.0,
            ScholarLevel::Apprentice => 10.0,
            ScholarLevel::Dedicated => 25.0,
            ScholarLevel::Expert => 50.0,
            ScholarLevel::Master => 100.0,
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            ScholarLevel::Novice => Some(ScholarLevel::Apprentice),
            ScholarLevel::Apprentice => Some(ScholarLevel::Dedicated),
            ScholarLevel::Dedicated => Some(ScholarLevel::Expert),
            ScholarLevel::Expert => Some(ScholarLevel::Master),
            ScholarLevel::Master => None,
        }
    }
}

/// Map cumulative hours to a level number and title
pub fn compute_level(total_hours: f64) -> LevelInfo {
    let level = ScholarLevel::from_hours(total_hours);
    LevelInfo {
        level: level.number(),
        title: level.title().to_string(),
    }
}

/// Level plus advisory progress through the current range.
///
/// Progress is for display only. The top level always reports 100%.
pub fn level_progress(total_hours: f64) -> LevelProgress {
    let total_hours = sanitize_hours(total_hours);
    let level = ScholarLevel::from_hours(total_hours);

    let (progress_percent, hours_to_next_level) = match level.next() {
        Some(next) => {
            let floor = level.floor_hours();
            let ceiling = next.floor_hours();
            let pct = ((total_hours - floor) / (ceiling - floor) * 100.0)
                .round()
                .clamp(0.0, 100.0) as u8;
            (pct, Some((ceiling - total_hours).max(0.0)))
        }
        None => (100, None),
    };

    LevelProgress {
        level: level.number(),
        title: level.title().to_string(),
        total_hours,
        progress_percent,
        hours_to_next_level,
    }
}

/// Result of comparing a profile's stored level with the derived one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLevelCheck {
    pub stored: Option<u8>,
    pub derived: u8,
    /// True when the stored value should be rewritten with `derived`
    pub needs_update: bool,
}

/// Compare a stored level field against the level derived from hours.
///
/// The derived level wins. Out-of-range stored values count as stale.
pub fn reconcile_stored_level(stored: Option<u8>, total_hours: f64) -> StoredLevelCheck {
    let derived = ScholarLevel::from_hours(total_hours).number();
    let needs_update = match stored.and_then(ScholarLevel::from_number) {
        Some(level) => level.number() != derived,
        None => true,
    };

    StoredLevelCheck {
        stored,
        derived,
        needs_update,
    }
}

fn sanitize_hours(hours: f64) -> f64 {
    if hours.is_finite() && hours > 0.0 {
        hours
    } else if hours == f64::INFINITY {
        f64::MAX
    } else {
        0.0
    }
}
