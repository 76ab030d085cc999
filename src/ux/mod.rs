//! UX probe harness: usability, accessibility, and performance probes.
//!
//! Scenarios are fixed scripts of explicit step actions executed through
//! the `BrowserDriver` seam. Without a driver every probe reports SKIPPED.
//! Scores are averaged per criterion and compared against fixed numeric
//! thresholds.

pub mod driver;

use crate::error::VantageError;
use crate::models::ux::{
    AccessibilityResult, PerformanceResult, Scenario, ScenarioResult, ScenarioStep, StepAction,
    StepOutcome, SuccessCriteria, UxReport, ViolationCounts, ViolationDetail,
};
use crate::models::Status;
use self::driver::BrowserDriver;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

// Fixed performance thresholds, mirroring the probe's acceptance bar.
const MAX_PAGE_LOAD_SECS: f64 = 3.0;
const MAX_AVG_CLICK_SECS: f64 = 0.5;
const MAX_AVG_CPU_PERCENT: f64 = 50.0;
const MAX_MEMORY_MB: f64 = 512.0;
const MIN_OPS_PER_SEC: f64 = 2.0;

/// Accessibility pass bar: zero critical findings, at most two serious.
const MAX_SERIOUS_FINDINGS: usize = 2;

/// The probe harness. Owns an optional driver and the target base URL.
pub struct UxHarness {
    driver: Option<Box<dyn BrowserDriver>>,
    base_url: String,
}

impl UxHarness {
    #[must_use]
    pub fn new(driver: Option<Box<dyn BrowserDriver>>, base_url: impl Into<String>) -> Self {
        UxHarness {
            driver,
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }

    /// Run the fixed usability scenarios.
    pub async fn run_usability(&self) -> Vec<ScenarioResult> {
        let mut results = Vec::new();
        for scenario in scenarios() {
            results.push(self.run_scenario(&scenario).await);
        }
        results
    }

    async fn run_scenario(&self, scenario: &Scenario) -> ScenarioResult {
        info!(scenario = %scenario.name, "running usability scenario");
        let Some(driver) = self.driver.as_ref() else {
            return skipped_scenario(scenario);
        };

        let started = Instant::now();
        let mut outcomes: Vec<StepOutcome> = Vec::new();

        for step in &scenario.steps {
            let step_started = Instant::now();
            let outcome = self.execute_step(driver.as_ref(), step).await;
            let duration = step_started.elapsed().as_secs_f64();
            match outcome {
                Ok(()) => outcomes.push(StepOutcome {
                    label: step.label.clone(),
                    duration_secs: duration,
                    success: true,
                    error: None,
                }),
                Err(err) => outcomes.push(StepOutcome {
                    label: step.label.clone(),
                    duration_secs: duration,
                    success: false,
                    error: Some(err.to_string()),
                }),
            }
        }

        let total_secs = started.elapsed().as_secs_f64();
        let scores = evaluate_criteria(&scenario.criteria, &outcomes);
        let overall_score = mean(scores.values().copied());
        let errors = outcomes.iter().filter(|o| !o.success).count();
        let within_budget = scenario
            .criteria
            .completion_time_secs
            .map_or(true, |budget| total_secs <= budget);
        let passed = errors == 0 && overall_score >= 0.8 && within_budget;

        ScenarioResult {
            name: scenario.name.clone(),
            status: if passed { Status::Passed } else { Status::Failed },
            total_secs,
            steps_completed: outcomes.iter().filter(|o| o.success).count(),
            total_steps: scenario.steps.len(),
            steps: outcomes,
            scores,
            overall_score,
            error: None,
        }
    }

    async fn execute_step(
        &self,
        driver: &dyn BrowserDriver,
        step: &ScenarioStep,
    ) -> Result<(), crate::error::DriverError> {
        match &step.action {
            StepAction::Navigate { path } => {
                let url = match path {
                    Some(p) => format!("{}{}", self.base_url, p),
                    None => self.base_url.clone(),
                };
                driver.navigate(&url).await
            }
            StepAction::Click { selector } => driver.click(selector).await,
            StepAction::Fill { selector, value } => driver.fill(selector, value).await,
            StepAction::Wait { millis } => {
                tokio::time::sleep(std::time::Duration::from_millis(*millis)).await;
                Ok(())
            }
        }
    }

    /// Run the fixed accessibility audit passes.
    pub async fn run_accessibility(&self) -> Vec<AccessibilityResult> {
        let mut results = Vec::new();
        for (name, standard) in accessibility_checks() {
            results.push(self.run_accessibility_check(name, standard).await);
        }
        results
    }

    async fn run_accessibility_check(&self, name: &str, standard: &str) -> AccessibilityResult {
        info!(check = name, "running accessibility audit");
        let Some(driver) = self.driver.as_ref() else {
            return AccessibilityResult {
                name: name.to_string(),
                standard: standard.to_string(),
                status: Status::Skipped,
                score: 0.0,
                violations: ViolationCounts::default(),
                details: Vec::new(),
                error: Some("browser driver unavailable".to_string()),
            };
        };

        if let Err(err) = driver.navigate(&self.base_url).await {
            return AccessibilityResult {
                name: name.to_string(),
                standard: standard.to_string(),
                status: Status::Failed,
                score: 0.0,
                violations: ViolationCounts::default(),
                details: Vec::new(),
                error: Some(err.to_string()),
            };
        }

        match driver.audit_accessibility().await {
            Ok(outcome) => {
                let mut counts = ViolationCounts::default();
                let mut details = Vec::new();
                for finding in &outcome.findings {
                    match finding.impact.as_str() {
                        "critical" => counts.critical += 1,
                        "serious" => counts.serious += 1,
                        "moderate" => counts.moderate += 1,
                        _ => counts.minor += 1,
                    }
                    details.push(ViolationDetail {
                        rule: finding.rule.clone(),
                        impact: finding.impact.clone(),
                        description: finding.description.clone(),
                        nodes: finding.nodes,
                    });
                }
                let total_rules = outcome.findings.len() + outcome.passes + outcome.incomplete;
                let score = if total_rules > 0 {
                    outcome.passes as f64 / total_rules as f64
                } else {
                    0.0
                };
                let passed = counts.critical == 0 && counts.serious <= MAX_SERIOUS_FINDINGS;
                AccessibilityResult {
                    name: name.to_string(),
                    standard: standard.to_string(),
                    status: if passed { Status::Passed } else { Status::Failed },
                    score,
                    violations: counts,
                    details,
                    error: None,
                }
            }
            Err(err) => AccessibilityResult {
                name: name.to_string(),
                standard: standard.to_string(),
                status: Status::Failed,
                score: 0.0,
                violations: ViolationCounts::default(),
                details: Vec::new(),
                error: Some(err.to_string()),
            },
        }
    }

    /// Run the fixed performance probes.
    pub async fn run_performance(&self) -> Vec<PerformanceResult> {
        vec![
            self.probe_page_load().await,
            self.probe_interaction().await,
            self.probe_resources().await,
            self.probe_throughput().await,
        ]
    }

    async fn probe_page_load(&self) -> PerformanceResult {
        let name = "Page Load Performance";
        let Some(driver) = self.driver.as_ref() else {
            return skipped_perf(name);
        };
        let mut metrics = BTreeMap::new();
        let result: Result<(), crate::error::DriverError> = async {
            driver.navigate(&self.base_url).await?;
            let timing = driver.navigation_timing().await?;
            metrics.insert("page_load_time".to_string(), timing.page_load_secs);
            metrics.insert(
                "dom_content_loaded".to_string(),
                timing.dom_content_loaded_secs,
            );
            metrics.insert("first_byte".to_string(), timing.first_byte_secs);
            Ok(())
        }
        .await;
        finish_perf(name, metrics, result)
    }

    async fn probe_interaction(&self) -> PerformanceResult {
        let name = "User Interaction Responsiveness";
        let Some(driver) = self.driver.as_ref() else {
            return skipped_perf(name);
        };
        let mut metrics = BTreeMap::new();
        let result: Result<(), crate::error::DriverError> = async {
            driver.navigate(&self.base_url).await?;
            let mut click_times = Vec::new();
            for _ in 0..5 {
                let started = Instant::now();
                driver.click("button").await?;
                click_times.push(started.elapsed().as_secs_f64());
            }
            let started = Instant::now();
            driver.fill("input[name='test']", "test_value").await?;
            metrics.insert(
                "form_fill_time".to_string(),
                started.elapsed().as_secs_f64(),
            );
            metrics.insert(
                "avg_click_response_time".to_string(),
                mean(click_times.iter().copied()),
            );
            metrics.insert(
                "max_click_response_time".to_string(),
                click_times.iter().copied().fold(0.0, f64::max),
            );
            Ok(())
        }
        .await;
        finish_perf(name, metrics, result)
    }

    async fn probe_resources(&self) -> PerformanceResult {
        let name = "Resource Usage";
        let Some(driver) = self.driver.as_ref() else {
            return skipped_perf(name);
        };
        let mut metrics = BTreeMap::new();
        let result: Result<(), crate::error::DriverError> = async {
            let mut cpu = Vec::new();
            let mut mem = Vec::new();
            for _ in 0..5 {
                let sample = driver.sample_resources().await?;
                cpu.push(sample.cpu_percent);
                mem.push(sample.memory_mb);
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            }
            metrics.insert("avg_cpu_usage".to_string(), mean(cpu.iter().copied()));
            metrics.insert(
                "max_cpu_usage".to_string(),
                cpu.iter().copied().fold(0.0, f64::max),
            );
            metrics.insert("avg_memory_usage".to_string(), mean(mem.iter().copied()));
            metrics.insert(
                "max_memory_usage".to_string(),
                mem.iter().copied().fold(0.0, f64::max),
            );
            metrics.insert(
                "memory_growth".to_string(),
                mem.last().copied().unwrap_or(0.0) - mem.first().copied().unwrap_or(0.0),
            );
            Ok(())
        }
        .await;
        finish_perf(name, metrics, result)
    }

    async fn probe_throughput(&self) -> PerformanceResult {
        let name = "Sequential Operation Throughput";
        let Some(driver) = self.driver.as_ref() else {
            return skipped_perf(name);
        };
        let mut metrics = BTreeMap::new();
        let result: Result<(), crate::error::DriverError> = async {
            let operations = 10u32;
            let started = Instant::now();
            for i in 0..operations {
                driver
                    .navigate(&format!("{}?op={}", self.base_url, i))
                    .await?;
                driver.click("button").await?;
            }
            let total = started.elapsed().as_secs_f64();
            metrics.insert("total_time".to_string(), total);
            metrics.insert(
                "avg_operation_time".to_string(),
                total / f64::from(operations),
            );
            metrics.insert(
                "operations_per_second".to_string(),
                if total > 0.0 {
                    f64::from(operations) / total
                } else {
                    0.0
                },
            );
            Ok(())
        }
        .await;
        finish_perf(name, metrics, result)
    }

    /// Run every probe family and assemble the report.
    pub async fn generate_report(&self) -> UxReport {
        if self.driver.is_none() {
            warn!("no browser driver configured; all UX probes report SKIPPED");
        }
        let usability = self.run_usability().await;
        let accessibility = self.run_accessibility().await;
        let performance = self.run_performance().await;

        let statuses = usability
            .iter()
            .map(|r| r.status)
            .chain(accessibility.iter().map(|r| r.status))
            .chain(performance.iter().map(|r| r.status))
            .collect::<Vec<_>>();
        let total_tests = statuses.len();
        let passed_tests = statuses.iter().filter(|s| **s == Status::Passed).count();
        let skipped_tests = statuses.iter().filter(|s| **s == Status::Skipped).count();
        let failed_tests = total_tests - passed_tests - skipped_tests;

        let accessibility_violations: Vec<ViolationDetail> = accessibility
            .iter()
            .flat_map(|r| r.details.iter().cloned())
            .collect();

        let recommendations =
            recommendations(&usability, &accessibility, &performance);

        UxReport {
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            base_url: self.base_url.clone(),
            total_tests,
            passed_tests,
            failed_tests,
            skipped_tests,
            usability,
            accessibility,
            performance,
            accessibility_violations,
            recommendations,
        }
    }
}

fn skipped_scenario(scenario: &Scenario) -> ScenarioResult {
    ScenarioResult {
        name: scenario.name.clone(),
        status: Status::Skipped,
        total_secs: 0.0,
        steps_completed: 0,
        total_steps: scenario.steps.len(),
        steps: Vec::new(),
        scores: BTreeMap::new(),
        overall_score: 0.0,
        error: Some("browser driver unavailable".to_string()),
    }
}

fn skipped_perf(name: &str) -> PerformanceResult {
    PerformanceResult {
        name: name.to_string(),
        status: Status::Skipped,
        metrics: BTreeMap::new(),
        failures: Vec::new(),
        error: Some("browser driver unavailable".to_string()),
    }
}

fn finish_perf(
    name: &str,
    metrics: BTreeMap<String, f64>,
    result: Result<(), crate::error::DriverError>,
) -> PerformanceResult {
    match result {
        Ok(()) => {
            let failures = evaluate_thresholds(&metrics);
            PerformanceResult {
                name: name.to_string(),
                status: if failures.is_empty() {
                    Status::Passed
                } else {
                    Status::Failed
                },
                metrics,
                failures,
                error: None,
            }
        }
        Err(err) => PerformanceResult {
            name: name.to_string(),
            status: Status::Failed,
            metrics,
            failures: Vec::new(),
            error: Some(err.to_string()),
        },
    }
}

/// Score collected step outcomes against a scenario's criteria.
///
/// Each criterion contributes one score in [0.0, 1.0]; absent criteria
/// contribute nothing.
pub fn evaluate_criteria(
    criteria: &SuccessCriteria,
    outcomes: &[StepOutcome],
) -> BTreeMap<String, f64> {
    let mut scores = BTreeMap::new();
    let total_time: f64 = outcomes.iter().map(|o| o.duration_secs).sum();
    let errors = outcomes.iter().filter(|o| !o.success).count();
    let completed = outcomes.iter().filter(|o| o.success).count();

    if let Some(budget) = criteria.completion_time_secs {
        let score = if total_time > 0.0 {
            (budget / total_time).min(1.0)
        } else {
            1.0
        };
        scores.insert("completion_time".to_string(), score);
    }
    if let Some(max_errors) = criteria.max_errors {
        let score = (1.0 - errors as f64 / max_errors.max(1) as f64).max(0.0);
        scores.insert("error_count".to_string(), score);
    }
    if let Some(budget) = criteria.response_time_secs {
        let avg = if outcomes.is_empty() {
            0.0
        } else {
            total_time / outcomes.len() as f64
        };
        let score = if avg > 0.0 { (budget / avg).min(1.0) } else { 1.0 };
        scores.insert("response_time".to_string(), score);
    }
    if let Some(required) = criteria.steps_required {
        let score = if required > 0 {
            (completed as f64 / required as f64).min(1.0)
        } else {
            1.0
        };
        scores.insert("steps_completed".to_string(), score);
    }
    scores
}

/// Compare sampled metrics against the fixed thresholds.
pub fn evaluate_thresholds(metrics: &BTreeMap<String, f64>) -> Vec<String> {
    let mut failures = Vec::new();
    let ceilings = [
        ("page_load_time", MAX_PAGE_LOAD_SECS),
        ("avg_click_response_time", MAX_AVG_CLICK_SECS),
        ("avg_cpu_usage", MAX_AVG_CPU_PERCENT),
        ("max_memory_usage", MAX_MEMORY_MB),
    ];
    for (key, ceiling) in ceilings {
        if let Some(value) = metrics.get(key) {
            if *value > ceiling {
                failures.push(format!("{key} {value:.2} exceeds threshold {ceiling:.2}"));
            }
        }
    }
    if let Some(ops) = metrics.get("operations_per_second") {
        if *ops < MIN_OPS_PER_SEC {
            failures.push(format!(
                "operations_per_second {ops:.2} below threshold {MIN_OPS_PER_SEC:.2}"
            ));
        }
    }
    failures
}

fn recommendations(
    usability: &[ScenarioResult],
    accessibility: &[AccessibilityResult],
    performance: &[PerformanceResult],
) -> Vec<String> {
    let mut recs = Vec::new();

    if usability.iter().any(|r| r.status == Status::Failed) {
        recs.push("Improve user onboarding flow - usability scenarios failed".to_string());
    }
    let critical = accessibility
        .iter()
        .filter(|r| r.violations.critical > 0)
        .count();
    if critical > 0 {
        recs.push(format!(
            "Address {critical} critical accessibility violations immediately"
        ));
    }
    if performance.iter().any(|r| r.status == Status::Failed) {
        recs.push("Optimize performance - probes exceeded fixed thresholds".to_string());
    }
    recs
}

/// The fixed usability scenario scripts.
#[must_use]
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "First Time User Setup".to_string(),
            description: "Complete first-time setup experience".to_string(),
            steps: vec![
                ScenarioStep::new(
                    "Open setup page",
                    StepAction::Navigate {
                        path: Some("/setup".to_string()),
                    },
                ),
                ScenarioStep::new(
                    "Advance welcome wizard",
                    StepAction::Click {
                        selector: "button:has-text('Continue')".to_string(),
                    },
                ),
                ScenarioStep::new(
                    "Configure sync settings",
                    StepAction::Fill {
                        selector: "input[name='sync-dir']".to_string(),
                        value: "~/sync".to_string(),
                    },
                ),
                ScenarioStep::new(
                    "Connect cloud provider",
                    StepAction::Click {
                        selector: "button[data-action='connect']".to_string(),
                    },
                ),
                ScenarioStep::new(
                    "Confirm setup",
                    StepAction::Click {
                        selector: "button[data-action='finish']".to_string(),
                    },
                ),
            ],
            criteria: SuccessCriteria {
                completion_time_secs: Some(300.0),
                max_errors: Some(0),
                steps_required: Some(5),
                ..Default::default()
            },
        },
        Scenario {
            name: "File Synchronization Workflow".to_string(),
            description: "Core file sync user workflow".to_string(),
            steps: vec![
                ScenarioStep::new("Open dashboard", StepAction::Navigate { path: None }),
                ScenarioStep::new(
                    "Select sync directory",
                    StepAction::Click {
                        selector: "[data-role='dir-picker']".to_string(),
                    },
                ),
                ScenarioStep::new(
                    "Start sync",
                    StepAction::Click {
                        selector: "button[data-action='sync']".to_string(),
                    },
                ),
                ScenarioStep::new("Let progress settle", StepAction::Wait { millis: 50 }),
                ScenarioStep::new(
                    "Confirm completion",
                    StepAction::Click {
                        selector: "[data-role='sync-status']".to_string(),
                    },
                ),
            ],
            criteria: SuccessCriteria {
                response_time_secs: Some(3.0),
                max_errors: Some(0),
                steps_required: Some(5),
                ..Default::default()
            },
        },
        Scenario {
            name: "Conflict Resolution Interface".to_string(),
            description: "Conflict resolution user experience".to_string(),
            steps: vec![
                ScenarioStep::new(
                    "Open conflicts view",
                    StepAction::Navigate {
                        path: Some("/conflicts".to_string()),
                    },
                ),
                ScenarioStep::new(
                    "Inspect conflict details",
                    StepAction::Click {
                        selector: "[data-role='conflict-row']".to_string(),
                    },
                ),
                ScenarioStep::new(
                    "Choose resolution strategy",
                    StepAction::Click {
                        selector: "input[name='strategy'][value='keep-local']".to_string(),
                    },
                ),
                ScenarioStep::new(
                    "Apply resolution",
                    StepAction::Click {
                        selector: "button[data-action='resolve']".to_string(),
                    },
                ),
                ScenarioStep::new("Verify outcome", StepAction::Wait { millis: 20 }),
            ],
            criteria: SuccessCriteria {
                completion_time_secs: Some(60.0),
                max_errors: Some(0),
                steps_required: Some(5),
                ..Default::default()
            },
        },
    ]
}

/// The fixed accessibility audit passes: (name, standard).
#[must_use]
pub fn accessibility_checks() -> Vec<(&'static str, &'static str)> {
    vec![
        ("WCAG 2.1 AA Compliance", "WCAG21AA"),
        ("Keyboard Navigation", "KeyboardNavigation"),
        ("Screen Reader Support", "ScreenReader"),
        ("Color Contrast", "ColorContrast"),
        ("Focus Management", "FocusManagement"),
    ]
}

/// Write the timestamped JSON/HTML report pair under `<dir>/ux/`.
pub fn write_report(report: &UxReport, report_dir: &Path) -> Result<(PathBuf, PathBuf), VantageError> {
    let dir = report_dir.join("ux");
    fs::create_dir_all(&dir).map_err(|e| VantageError::io(&dir, e))?;
    let stamp = chrono::Local::now().timestamp();

    let json_path = dir.join(format!("ux-report-{stamp}.json"));
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&json_path, json).map_err(|e| VantageError::io(&json_path, e))?;

    let html_path = dir.join(format!("ux-report-{stamp}.html"));
    fs::write(&html_path, render_html(report)).map_err(|e| VantageError::io(&html_path, e))?;

    info!(dir = %dir.display(), "UX probe reports written");
    Ok((json_path, html_path))
}

/// Pure HTML rendering of the UX report.
#[must_use]
pub fn render_html(report: &UxReport) -> String {
    let mut sections = String::new();
    for (title, statuses) in [
        (
            "Usability",
            report
                .usability
                .iter()
                .map(|r| (r.name.clone(), r.status, r.error.clone()))
                .collect::<Vec<_>>(),
        ),
        (
            "Accessibility",
            report
                .accessibility
                .iter()
                .map(|r| (r.name.clone(), r.status, r.error.clone()))
                .collect(),
        ),
        (
            "Performance",
            report
                .performance
                .iter()
                .map(|r| (r.name.clone(), r.status, r.error.clone()))
                .collect(),
        ),
    ] {
        sections.push_str(&format!("<h3>{title}</h3>\n"));
        for (name, status, error) in statuses {
            let class = format!("status-{}", status.to_string().to_lowercase());
            sections.push_str(&format!(
                "<div class=\"test-result\"><span class=\"name\">{name}</span> <span class=\"status {class}\">{status}</span>{}</div>\n",
                error
                    .map(|e| format!(" <span class=\"error\">{e}</span>"))
                    .unwrap_or_default()
            ));
        }
    }

    let recs = if report.recommendations.is_empty() {
        String::new()
    } else {
        format!(
            "<div class=\"recommendations\"><h3>Recommendations</h3><ul>{}</ul></div>",
            report
                .recommendations
                .iter()
                .map(|r| format!("<li>{r}</li>"))
                .collect::<String>()
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>UX Probe Report</title>
<style>
body {{ font-family: sans-serif; margin: 24px; background: #f5f7fa; }}
.metric {{ display: inline-block; background: white; padding: 14px 22px; margin-right: 12px; border-radius: 8px; text-align: center; }}
.metric-value {{ font-size: 1.6em; font-weight: bold; color: #4F46E5; display: block; }}
.test-result {{ background: white; border: 1px solid #e2e8f0; border-radius: 6px; padding: 10px 14px; margin-bottom: 8px; }}
.status {{ padding: 2px 10px; border-radius: 12px; font-size: 0.85em; font-weight: 600; }}
.status-passed {{ background: #dcfce7; color: #15803d; }}
.status-failed {{ background: #fee2e2; color: #dc2626; }}
.status-skipped {{ background: #f1f5f9; color: #64748b; }}
.recommendations {{ background: #fff3cd; border-radius: 6px; padding: 14px; margin-top: 18px; }}
</style>
</head>
<body>
<h1>UX Probe Report</h1>
<p>{base_url} — generated {timestamp}</p>
<div>
<div class="metric"><span class="metric-value">{total}</span>Total</div>
<div class="metric"><span class="metric-value">{passed}</span>Passed</div>
<div class="metric"><span class="metric-value">{failed}</span>Failed</div>
<div class="metric"><span class="metric-value">{skipped}</span>Skipped</div>
<div class="metric"><span class="metric-value">{violations}</span>A11y Violations</div>
</div>
{sections}
{recs}
</body>
</html>
"#,
        base_url = report.base_url,
        timestamp = report.timestamp,
        total = report.total_tests,
        passed = report.passed_tests,
        failed = report.failed_tests,
        skipped = report.skipped_tests,
        violations = report.accessibility_violations.len(),
        sections = sections,
        recs = recs,
    )
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let collected: Vec<f64> = values.collect();
    if collected.is_empty() {
        return 0.0;
    }
    collected.iter().sum::<f64>() / collected.len() as f64
}
