//! Error types for Scholar Focus
//!
//! The aggregation stages themselves are total and never fail. Errors only
//! surface at the edges: parsing exported documents, loading configuration
//! and serializing reports.

use thiserror::Error;

/// Errors that can occur around the computation pipeline
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Failed to parse session documents: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
