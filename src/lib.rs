//! Scholar Focus - Focus-session aggregation and scholar-level progression
//!
//! Scholar Focus turns snapshots of focus-session documents, as synced from a
//! study app's document store, into dashboard values through a deterministic
//! pipeline: document adaptation → normalization → daily goal, weekly trend
//! and lifetime aggregation → level progression → report encoding.
//!
//! ## Entry points
//!
//! - [`compute_daily_goal`]: completed minutes today and percent of the daily target
//! - [`compute_weekly_trend`]: Sun..Sat series of current vs previous week minutes
//! - [`compute_level`]: scholar level and title for cumulative hours
//! - [`FocusProcessor`]: the full pipeline from JSON documents to a report

pub mod calendar;
pub mod config;
pub mod encoder;
pub mod error;
pub mod goal;
pub mod level;
pub mod normalizer;
pub mod pipeline;
pub mod schema;
pub mod stats;
pub mod trend;
pub mod types;

pub use config::FocusConfig;
pub use error::ComputeError;
pub use goal::{compute_daily_goal, compute_daily_goal_at, DEFAULT_DAILY_TARGET_HOURS};
pub use level::{compute_level, level_progress, reconcile_stored_level};
pub use normalizer::SessionNormalizer;
pub use pipeline::{compute_snapshot, focus_report, FocusProcessor};
pub use trend::compute_weekly_trend;

// Schema exports
pub use schema::{RawFocusSession, SessionAdapter};

/// Crate version embedded in every report
pub const SCHOLAR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "scholar-focus";
