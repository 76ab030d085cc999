//! Documentation-validation data types: issues, per-category results, and
//! the assembled report.

use super::Status;
use serde::Serialize;
use std::collections::BTreeMap;

/// Severity of one documentation defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    #[serde(rename = "CRITICAL")]
    Critical,
    #[serde(rename = "ERROR")]
    Error,
    #[serde(rename = "WARNING")]
    Warning,
    #[serde(rename = "INFO")]
    Info,
}

/// One specific defect found while scanning a document against its
/// expected checklist.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub component: String,
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub suggestion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl ValidationIssue {
    #[must_use]
    pub fn new(severity: Severity, component: &str, description: impl Into<String>) -> Self {
        ValidationIssue {
            severity,
            component: component.to_string(),
            description: description.into(),
            suggestion: String::new(),
            file: None,
        }
    }

    #[must_use]
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    #[must_use]
    pub fn at(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Score for one documentation category.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub component: String,
    pub status: Status,
    /// Always within [0.0, 1.0].
    pub score: f64,
    pub issues: Vec<ValidationIssue>,
    pub metrics: serde_json::Map<String, serde_json::Value>,
}

impl ValidationResult {
    /// Build a result, clamping the score into [0.0, 1.0].
    #[must_use]
    pub fn new(
        component: &str,
        status: Status,
        score: f64,
        issues: Vec<ValidationIssue>,
        metrics: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        ValidationResult {
            component: component.to_string(),
            status,
            score: score.clamp(0.0, 1.0),
            issues,
            metrics,
        }
    }

    #[must_use]
    pub fn critical_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Critical)
            .count()
    }
}

/// Complete documentation-validation report for one project.
#[derive(Debug, Clone, Serialize)]
pub struct SpecReport {
    pub timestamp: String,
    pub project_name: String,
    pub total_components: usize,
    pub results: Vec<ValidationResult>,
    pub overall_score: f64,
    pub critical_issues: usize,
    pub recommendations: Vec<String>,
    /// Component name -> score, for the coverage chart.
    pub coverage: BTreeMap<String, f64>,
}

impl SpecReport {
    /// Standalone exit gate: zero critical issues and overall score >= 0.7.
    #[must_use]
    pub fn gate(&self) -> bool {
        self.critical_issues == 0 && self.overall_score >= 0.7
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_clamped() {
        let low = ValidationResult::new("x", Status::Failed, -0.4, vec![], Default::default());
        assert_eq!(low.score, 0.0);
        let high = ValidationResult::new("x", Status::Passed, 1.3, vec![], Default::default());
        assert_eq!(high.score, 1.0);
    }

    #[test]
    fn test_severity_serializes_upper() {
        let issue = ValidationIssue::new(Severity::Critical, "security", "missing");
        let v = serde_json::to_value(&issue).unwrap();
        assert_eq!(v["severity"], "CRITICAL");
        assert!(v.get("file").is_none());
    }

    #[test]
    fn test_gate_thresholds() {
        let mut report = SpecReport {
            timestamp: String::new(),
            project_name: "p".into(),
            total_components: 1,
            results: vec![],
            overall_score: 0.7,
            critical_issues: 0,
            recommendations: vec![],
            coverage: BTreeMap::new(),
        };
        assert!(report.gate());
        report.overall_score = 0.69;
        assert!(!report.gate());
        report.overall_score = 0.9;
        report.critical_issues = 1;
        assert!(!report.gate());
    }
}
