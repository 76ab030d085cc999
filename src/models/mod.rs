//! Shared data models for suite, validation, and UX reports.

pub mod suite;
pub mod ux;
pub mod validation;

use serde::Serialize;
use std::fmt;

/// Outcome status shared by category results and validation results.
///
/// Serialized upper-case, matching the report JSON consumed downstream.
/// `Partial` only appears in documentation-validation results; `Skipped`
/// only in suite and UX results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "PASSED")]
    Passed,
    #[serde(rename = "FAILED")]
    Failed,
    #[serde(rename = "PARTIAL")]
    Partial,
    #[serde(rename = "SKIPPED")]
    Skipped,
}

impl Status {
    #[must_use]
    pub fn is_passed(self) -> bool {
        self == Status::Passed
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Passed => "PASSED",
            Status::Failed => "FAILED",
            Status::Partial => "PARTIAL",
            Status::Skipped => "SKIPPED",
        };
        f.write_str(s)
    }
}
