//! Crate error types.
//!
//! Only the report-writing and configuration paths surface errors to the
//! caller; everything per-category or per-file is captured locally into the
//! corresponding result record instead of propagating.

use std::path::PathBuf;

/// Errors surfaced by report persistence and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum VantageError {
    /// Filesystem failure while writing a report artifact.
    #[error("report io at {path}: {source}")]
    ReportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report serialization failed.
    #[error("report encoding: {0}")]
    ReportEncoding(#[from] serde_json::Error),
}

impl VantageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReportIo {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised by a browser driver during a probe step.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// No driver is configured; probes should report SKIPPED downstream.
    #[error("browser driver unavailable")]
    Unavailable,

    /// A scripted step could not be executed.
    #[error("step failed: {0}")]
    StepFailed(String),
}
