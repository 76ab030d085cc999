//! Category enumeration and per-category result records.

use super::Status;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One named test or validation concern, producing exactly one top-level
/// result per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Unit,
    Integration,
    Deployment,
    Ux,
    Accessibility,
    Performance,
    Security,
    Openspec,
    E2e,
}

impl Category {
    /// Every known category, in default run order.
    pub const ALL: [Category; 9] = [
        Category::Unit,
        Category::Integration,
        Category::Deployment,
        Category::Ux,
        Category::Accessibility,
        Category::Performance,
        Category::Security,
        Category::Openspec,
        Category::E2e,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Category::Unit => "unit",
            Category::Integration => "integration",
            Category::Deployment => "deployment",
            Category::Ux => "ux",
            Category::Accessibility => "accessibility",
            Category::Performance => "performance",
            Category::Security => "security",
            Category::Openspec => "openspec",
            Category::E2e => "e2e",
        }
    }

    /// Human-facing title for report rendering ("unit" -> "Unit").
    #[must_use]
    pub fn title(self) -> String {
        let name = self.name();
        if name == "ux" {
            return "UX".to_string();
        }
        if name == "e2e" {
            return "E2E".to_string();
        }
        let mut chars = name.chars();
        match chars.next() {
            Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Category-specific sub-metrics carried by a result.
///
/// A tagged union per category kind, so each payload reader is statically
/// known instead of probing an open key-value map.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoryPayload {
    #[default]
    None,
    /// Unit-test coverage read back from the coverage JSON artifact.
    Coverage { percent_covered: f64 },
    /// Benchmark count read back from the benchmark JSON artifact.
    Benchmarks { count: usize },
    /// Security scanner findings from both scanner report formats.
    Security {
        total_issues: usize,
        high_severity: usize,
    },
    /// Summary of the embedded documentation-validation run.
    Validation {
        overall_score: f64,
        critical_issues: usize,
        components_validated: usize,
    },
    /// Summary of the embedded UX probe run.
    Ux {
        total: usize,
        passed: usize,
        failed: usize,
        skipped: usize,
        accessibility_violations: usize,
    },
}

/// Outcome of one category's execution.
///
/// Immutable once recorded; consumed exactly once by the aggregator.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResult {
    pub category: Category,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub duration_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
    pub payload: CategoryPayload,
}

impl CategoryResult {
    /// A failure captured at the orchestration boundary (tool missing,
    /// spawn error, embedded check crash). Never raised past the runner.
    #[must_use]
    pub fn failed(category: Category, error: impl Into<String>, duration_secs: f64) -> Self {
        CategoryResult {
            category,
            status: Status::Failed,
            exit_code: None,
            duration_secs,
            error: Some(error.into()),
            stdout: String::new(),
            stderr: String::new(),
            payload: CategoryPayload::None,
        }
    }

    /// A category that could not run because an optional capability is
    /// absent (e.g. no browser driver configured).
    #[must_use]
    pub fn skipped(category: Category, reason: impl Into<String>, duration_secs: f64) -> Self {
        CategoryResult {
            category,
            status: Status::Skipped,
            exit_code: None,
            duration_secs,
            error: Some(reason.into()),
            stdout: String::new(),
            stderr: String::new(),
            payload: CategoryPayload::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip_names() {
        for c in Category::ALL {
            assert_eq!(c.name().parse::<Category>(), Ok(c));
        }
        assert_eq!("UNIT".parse::<Category>(), Ok(Category::Unit));
        assert!("browser".parse::<Category>().is_err());
    }

    #[test]
    fn test_titles() {
        assert_eq!(Category::Unit.title(), "Unit");
        assert_eq!(Category::Ux.title(), "UX");
        assert_eq!(Category::E2e.title(), "E2E");
    }

    #[test]
    fn test_failed_result_shape() {
        let r = CategoryResult::failed(Category::Security, "scanner missing", 0.1);
        assert_eq!(r.status, Status::Failed);
        assert_eq!(r.error.as_deref(), Some("scanner missing"));
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["status"], "FAILED");
        assert_eq!(v["payload"]["kind"], "none");
        // Empty capture streams stay out of the JSON
        assert!(v.get("stdout").is_none());
    }
}
