//! Consolidated run report: metrics and HTML/JSON/Markdown rendering.
//!
//! Rendering is pure string production over the report model; persistence
//! writes the three fixed-name files into the report directory and is
//! idempotent across runs.

use crate::error::VantageError;
use crate::models::suite::{CategoryPayload, CategoryResult};
use crate::models::Status;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fixed file names inside the report directory.
pub const JSON_REPORT: &str = "consolidated-report.json";
pub const HTML_REPORT: &str = "consolidated-report.html";
pub const MARKDOWN_SUMMARY: &str = "summary.md";

/// Aggregate counters over one run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunMetrics {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    /// passed / total; 0.0 for an empty run.
    pub success_rate: f64,
    pub total_duration_secs: f64,
}

impl RunMetrics {
    #[must_use]
    pub fn from_results(results: &[CategoryResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.status.is_passed()).count();
        let skipped = results
            .iter()
            .filter(|r| r.status == Status::Skipped)
            .count();
        let failed = total - passed - skipped;
        let success_rate = if total > 0 {
            passed as f64 / total as f64
        } else {
            0.0
        };
        RunMetrics {
            total,
            passed,
            failed,
            skipped,
            success_rate,
            total_duration_secs: results.iter().map(|r| r.duration_secs).sum(),
        }
    }
}

/// The consolidated report over every category result of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub timestamp: String,
    pub project_name: String,
    pub metrics: RunMetrics,
    pub results: Vec<CategoryResult>,
}

impl RunReport {
    #[must_use]
    pub fn new(project_name: impl Into<String>, results: Vec<CategoryResult>) -> Self {
        RunReport {
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            project_name: project_name.into(),
            metrics: RunMetrics::from_results(&results),
            results,
        }
    }

    /// Exit gate: every requested category passed. A skipped category is
    /// not a pass.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.metrics.passed == self.metrics.total
    }
}

/// Write the JSON/HTML/Markdown report files, creating the directory as
/// needed. Existing files are overwritten.
pub fn write_reports(report: &RunReport, report_dir: &Path) -> Result<Vec<PathBuf>, VantageError> {
    fs::create_dir_all(report_dir).map_err(|e| VantageError::io(report_dir, e))?;

    let json_path = report_dir.join(JSON_REPORT);
    fs::write(&json_path, render_json(report)?).map_err(|e| VantageError::io(&json_path, e))?;

    let html_path = report_dir.join(HTML_REPORT);
    fs::write(&html_path, render_html(report)).map_err(|e| VantageError::io(&html_path, e))?;

    let md_path = report_dir.join(MARKDOWN_SUMMARY);
    fs::write(&md_path, render_markdown(report)).map_err(|e| VantageError::io(&md_path, e))?;

    info!(dir = %report_dir.display(), "consolidated reports written");
    Ok(vec![json_path, html_path, md_path])
}

/// Pretty-printed JSON rendering.
pub fn render_json(report: &RunReport) -> Result<String, VantageError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Markdown summary: metrics table plus one row per category.
#[must_use]
pub fn render_markdown(report: &RunReport) -> String {
    let m = &report.metrics;
    let mut out = String::new();
    out.push_str(&format!(
        "# Test Summary — {}\n\nGenerated {}\n\n",
        report.project_name, report.timestamp
    ));
    out.push_str(&format!(
        "**{}/{} categories passed** ({:.0}% success rate, {:.1}s total)\n\n",
        m.passed,
        m.total,
        m.success_rate * 100.0,
        m.total_duration_secs
    ));
    out.push_str("| Category | Status | Duration | Notes |\n");
    out.push_str("|----------|--------|----------|-------|\n");
    for r in &report.results {
        out.push_str(&format!(
            "| {} | {} | {:.1}s | {} |\n",
            r.category.title(),
            r.status,
            r.duration_secs,
            payload_note(r)
        ));
    }
    out
}

fn payload_note(result: &CategoryResult) -> String {
    if let Some(err) = &result.error {
        return err.replace('|', "\\|");
    }
    match &result.payload {
        CategoryPayload::None => String::new(),
        CategoryPayload::Coverage { percent_covered } => {
            format!("coverage {percent_covered:.1}%")
        }
        CategoryPayload::Benchmarks { count } => format!("{count} benchmarks"),
        CategoryPayload::Security {
            total_issues,
            high_severity,
        } => format!("{total_issues} findings, {high_severity} high severity"),
        CategoryPayload::Validation {
            overall_score,
            critical_issues,
            components_validated,
        } => format!(
            "score {:.0}%, {critical_issues} critical, {components_validated} components",
            overall_score * 100.0
        ),
        CategoryPayload::Ux {
            total,
            passed,
            skipped,
            ..
        } => format!("{passed}/{total} probes passed, {skipped} skipped"),
    }
}

/// Self-contained HTML rendering: metric cards plus one collapsible block
/// per category with its captured output.
#[must_use]
pub fn render_html(report: &RunReport) -> String {
    let m = &report.metrics;
    let mut blocks = String::new();
    for r in &report.results {
        let class = format!("status-{}", r.status.to_string().to_lowercase());
        let note = payload_note(r);
        let note_html = if note.is_empty() {
            String::new()
        } else {
            format!("<p class=\"note\">{note}</p>")
        };
        let mut streams = String::new();
        if !r.stdout.is_empty() {
            streams.push_str(&format!("<pre class=\"stream\">{}</pre>", escape(&r.stdout)));
        }
        if !r.stderr.is_empty() {
            streams.push_str(&format!(
                "<pre class=\"stream stderr\">{}</pre>",
                escape(&r.stderr)
            ));
        }
        blocks.push_str(&format!(
            "<details class=\"category\"><summary>{title} <span class=\"status {class}\">{status}</span> <span class=\"duration\">{duration:.1}s</span></summary>{note_html}{streams}</details>\n",
            title = r.category.title(),
            status = r.status,
            duration = r.duration_secs,
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Consolidated Test Report</title>
<style>
body {{ font-family: sans-serif; margin: 24px; background: #f5f7fa; }}
.metric {{ display: inline-block; background: white; padding: 14px 22px; margin-right: 12px; border-radius: 8px; text-align: center; }}
.metric-value {{ font-size: 1.6em; font-weight: bold; color: #4F46E5; display: block; }}
details.category {{ background: white; border: 1px solid #e2e8f0; border-radius: 6px; padding: 10px 14px; margin-top: 10px; }}
.status {{ padding: 2px 10px; border-radius: 12px; font-size: 0.85em; font-weight: 600; }}
.status-passed {{ background: #dcfce7; color: #15803d; }}
.status-failed {{ background: #fee2e2; color: #dc2626; }}
.status-skipped {{ background: #f1f5f9; color: #64748b; }}
.duration {{ color: #64748b; font-size: 0.85em; }}
.note {{ color: #334155; }}
.stream {{ background: #0f172a; color: #e2e8f0; padding: 10px; border-radius: 6px; overflow-x: auto; }}
.stream.stderr {{ background: #1e1b4b; }}
</style>
</head>
<body>
<h1>Consolidated Test Report</h1>
<p>{project} — generated {timestamp}</p>
<div>
<div class="metric"><span class="metric-value">{total}</span>Total</div>
<div class="metric"><span class="metric-value">{passed}</span>Passed</div>
<div class="metric"><span class="metric-value">{failed}</span>Failed</div>
<div class="metric"><span class="metric-value">{skipped}</span>Skipped</div>
<div class="metric"><span class="metric-value">{rate:.0}%</span>Success</div>
</div>
{blocks}
</body>
</html>
"#,
        project = report.project_name,
        timestamp = report.timestamp,
        total = m.total,
        passed = m.passed,
        failed = m.failed,
        skipped = m.skipped,
        rate = m.success_rate * 100.0,
        blocks = blocks,
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::suite::Category;
    use tempfile::tempdir;

    fn passed(category: Category) -> CategoryResult {
        CategoryResult {
            category,
            status: Status::Passed,
            exit_code: Some(0),
            duration_secs: 1.5,
            error: None,
            stdout: "ok".into(),
            stderr: String::new(),
            payload: CategoryPayload::None,
        }
    }

    fn five_mixed() -> Vec<CategoryResult> {
        vec![
            passed(Category::Unit),
            passed(Category::Integration),
            passed(Category::Security),
            CategoryResult::failed(Category::Deployment, "script exited 1", 0.4),
            CategoryResult::failed(Category::E2e, "npx not found", 0.1),
        ]
    }

    #[test]
    fn test_metrics_success_rate() {
        let report = RunReport::new("demo", five_mixed());
        assert_eq!(report.metrics.total, 5);
        assert_eq!(report.metrics.passed, 3);
        assert_eq!(report.metrics.failed, 2);
        assert!((report.metrics.success_rate - 0.6).abs() < 1e-9);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_metrics_empty_run() {
        let metrics = RunMetrics::from_results(&[]);
        assert_eq!(metrics.success_rate, 0.0);
        assert_eq!(metrics.total, 0);
    }

    #[test]
    fn test_skipped_is_not_passed() {
        let results = vec![
            passed(Category::Unit),
            CategoryResult::skipped(Category::Ux, "browser driver unavailable", 0.0),
        ];
        let report = RunReport::new("demo", results);
        assert_eq!(report.metrics.skipped, 1);
        assert_eq!(report.metrics.failed, 0);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_html_has_one_block_per_category() {
        let report = RunReport::new("demo", five_mixed());
        let html = render_html(&report);
        assert_eq!(html.matches("<details class=\"category\">").count(), 5);
        assert!(html.contains("status-failed"));
        assert!(html.contains("npx not found"));
    }

    #[test]
    fn test_markdown_table_rows() {
        let report = RunReport::new("demo", five_mixed());
        let md = render_markdown(&report);
        assert!(md.contains("**3/5 categories passed** (60% success rate"));
        assert!(md.contains("| Unit | PASSED |"));
        assert!(md.contains("| E2E | FAILED |"));
    }

    #[test]
    fn test_write_reports_idempotent() {
        let dir = tempdir().unwrap();
        let report = RunReport::new("demo", five_mixed());
        let first = write_reports(&report, dir.path()).unwrap();
        let second = write_reports(&report, dir.path()).unwrap();
        assert_eq!(first, second);
        for path in second {
            assert!(path.exists());
        }
        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(JSON_REPORT)).unwrap())
                .unwrap();
        assert_eq!(parsed["metrics"]["total"], 5);
        assert_eq!(parsed["results"][0]["category"], "unit");
    }
}
