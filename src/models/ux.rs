//! UX probe data types: scenario scripts, outcomes, and the probe report.

use super::Status;
use serde::Serialize;
use std::collections::BTreeMap;

/// Explicit action descriptor for one scripted step.
///
/// Replaces keyword matching on free-form step text: each step names its
/// action kind and target so a real driver can execute it unambiguously.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction {
    /// Load the scenario base URL (optionally with a path suffix).
    Navigate {
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
    Click { selector: String },
    Fill { selector: String, value: String },
    /// Scripted settle delay between interactions.
    Wait { millis: u64 },
}

/// One scripted step with a human-readable label.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioStep {
    pub label: String,
    #[serde(flatten)]
    pub action: StepAction,
}

impl ScenarioStep {
    #[must_use]
    pub fn new(label: &str, action: StepAction) -> Self {
        ScenarioStep {
            label: label.to_string(),
            action,
        }
    }
}

/// Numeric success criteria evaluated against collected step timings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuccessCriteria {
    /// Whole-scenario wall-clock budget, seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_time_secs: Option<f64>,
    /// Average per-step response budget, seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_secs: Option<f64>,
    /// Step failures tolerated before the error-count score bottoms out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_errors: Option<usize>,
    /// Steps that must complete successfully.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_required: Option<usize>,
}

/// A fixed usability scenario: a named script plus its criteria.
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub steps: Vec<ScenarioStep>,
    pub criteria: SuccessCriteria,
}

/// Execution record for one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub label: String,
    pub duration_secs: f64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of one usability scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub status: Status,
    pub total_secs: f64,
    pub steps_completed: usize,
    pub total_steps: usize,
    pub steps: Vec<StepOutcome>,
    /// Criterion name -> score in [0.0, 1.0].
    pub scores: BTreeMap<String, f64>,
    pub overall_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Accessibility findings bucketed by impact.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ViolationCounts {
    pub critical: usize,
    pub serious: usize,
    pub moderate: usize,
    pub minor: usize,
}

impl ViolationCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.critical + self.serious + self.moderate + self.minor
    }
}

/// One finding carried into the report's violation list.
#[derive(Debug, Clone, Serialize)]
pub struct ViolationDetail {
    pub rule: String,
    pub impact: String,
    pub description: String,
    pub nodes: usize,
}

/// Result of one accessibility audit pass.
#[derive(Debug, Clone, Serialize)]
pub struct AccessibilityResult {
    pub name: String,
    pub standard: String,
    pub status: Status,
    /// passes / total audited rules.
    pub score: f64,
    pub violations: ViolationCounts,
    pub details: Vec<ViolationDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of one performance probe.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceResult {
    pub name: String,
    pub status: Status,
    /// Metric name -> sampled value.
    pub metrics: BTreeMap<String, f64>,
    /// Threshold breaches, one human-readable line each.
    pub failures: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Complete UX probe report.
#[derive(Debug, Clone, Serialize)]
pub struct UxReport {
    pub timestamp: String,
    pub base_url: String,
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub skipped_tests: usize,
    pub usability: Vec<ScenarioResult>,
    pub accessibility: Vec<AccessibilityResult>,
    pub performance: Vec<PerformanceResult>,
    pub accessibility_violations: Vec<ViolationDetail>,
    pub recommendations: Vec<String>,
}

impl UxReport {
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed_tests == 0
    }
}
