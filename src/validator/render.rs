//! Validation report rendering and persistence.

use crate::error::VantageError;
use crate::models::validation::SpecReport;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write the timestamped JSON/HTML report pair under `<dir>/validation/`.
pub fn write_report(report: &SpecReport, report_dir: &Path) -> Result<(PathBuf, PathBuf), VantageError> {
    let dir = report_dir.join("validation");
    fs::create_dir_all(&dir).map_err(|e| VantageError::io(&dir, e))?;
    let stamp = chrono::Local::now().timestamp();

    let json_path = dir.join(format!("spec-validation-{stamp}.json"));
    fs::write(&json_path, render_json(report)?).map_err(|e| VantageError::io(&json_path, e))?;

    let html_path = dir.join(format!("spec-validation-{stamp}.html"));
    fs::write(&html_path, render_html(report)).map_err(|e| VantageError::io(&html_path, e))?;

    info!(dir = %dir.display(), "validation reports written");
    Ok((json_path, html_path))
}

/// Pretty-printed JSON rendering.
pub fn render_json(report: &SpecReport) -> Result<String, VantageError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Self-contained HTML rendering: score header, per-component cards with
/// their issues, coverage bars, and recommendations.
#[must_use]
pub fn render_html(report: &SpecReport) -> String {
    let mut components = String::new();
    for result in &report.results {
        let class = format!("status-{}", result.status.to_string().to_lowercase());
        let mut issue_items = String::new();
        for issue in &result.issues {
            let location = issue
                .file
                .as_deref()
                .map(|f| format!(" <code>{f}</code>"))
                .unwrap_or_default();
            issue_items.push_str(&format!(
                "<li><span class=\"sev sev-{sev}\">{sev}</span> {desc}{location}</li>\n",
                sev = severity_label(issue),
                desc = issue.description,
            ));
        }
        let issues_block = if issue_items.is_empty() {
            String::new()
        } else {
            format!("<ul class=\"issues\">{issue_items}</ul>")
        };
        components.push_str(&format!(
            "<div class=\"component\"><h3>{name} <span class=\"status {class}\">{status}</span> <span class=\"score\">{score:.0}%</span></h3>{issues_block}</div>\n",
            name = result.component,
            status = result.status,
            score = result.score * 100.0,
        ));
    }

    let mut coverage_bars = String::new();
    for (component, score) in &report.coverage {
        coverage_bars.push_str(&format!(
            "<div class=\"bar-row\"><span class=\"bar-label\">{component}</span><div class=\"bar\"><div class=\"bar-fill\" style=\"width: {pct:.0}%\"></div></div></div>\n",
            pct = score * 100.0,
        ));
    }

    let recommendations = report
        .recommendations
        .iter()
        .map(|r| format!("<li>{r}</li>"))
        .collect::<String>();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Documentation Validation Report</title>
<style>
body {{ font-family: sans-serif; margin: 24px; background: #f5f7fa; }}
.header {{ background: white; border-radius: 8px; padding: 18px 24px; }}
.overall {{ font-size: 2.2em; font-weight: bold; color: {score_color}; }}
.component {{ background: white; border: 1px solid #e2e8f0; border-radius: 6px; padding: 12px 16px; margin-top: 12px; }}
.status {{ padding: 2px 10px; border-radius: 12px; font-size: 0.7em; font-weight: 600; vertical-align: middle; }}
.status-passed {{ background: #dcfce7; color: #15803d; }}
.status-failed {{ background: #fee2e2; color: #dc2626; }}
.status-partial {{ background: #fef9c3; color: #a16207; }}
.score {{ color: #64748b; font-size: 0.8em; }}
.issues {{ margin: 8px 0 0; }}
.sev {{ font-size: 0.75em; font-weight: 700; margin-right: 6px; }}
.sev-critical {{ color: #b91c1c; }}
.sev-error {{ color: #dc2626; }}
.sev-warning {{ color: #d97706; }}
.sev-info {{ color: #2563eb; }}
.bar-row {{ display: flex; align-items: center; margin-top: 6px; }}
.bar-label {{ width: 240px; font-size: 0.85em; }}
.bar {{ flex: 1; background: #e2e8f0; border-radius: 4px; height: 10px; }}
.bar-fill {{ background: #4F46E5; border-radius: 4px; height: 10px; }}
.recommendations {{ background: #fff3cd; border-radius: 6px; padding: 14px; margin-top: 18px; }}
</style>
</head>
<body>
<div class="header">
<h1>Documentation Validation Report</h1>
<p>{project} — generated {timestamp}</p>
<span class="overall">{overall:.0}%</span>
<p>{components_count} components validated, {critical} critical issue(s)</p>
</div>
{components}
<h2>Coverage</h2>
{coverage_bars}
<div class="recommendations">
<h3>Recommendations</h3>
<ul>{recommendations}</ul>
</div>
</body>
</html>
"#,
        score_color = if report.overall_score >= 0.7 { "#15803d" } else { "#dc2626" },
        project = report.project_name,
        timestamp = report.timestamp,
        overall = report.overall_score * 100.0,
        components_count = report.total_components,
        critical = report.critical_issues,
        components = components,
        coverage_bars = coverage_bars,
        recommendations = recommendations,
    )
}

fn severity_label(issue: &crate::models::validation::ValidationIssue) -> &'static str {
    use crate::models::validation::Severity;
    match issue.severity {
        Severity::Critical => "critical",
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "info",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation::{Severity, ValidationIssue, ValidationResult};
    use crate::models::Status;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn sample_report() -> SpecReport {
        let result = ValidationResult::new(
            "security_considerations",
            Status::Failed,
            0.0,
            vec![ValidationIssue::new(
                Severity::Critical,
                "security_considerations",
                "No security documentation found",
            )],
            Default::default(),
        );
        let mut coverage = BTreeMap::new();
        coverage.insert("security_considerations".to_string(), 0.0);
        SpecReport {
            timestamp: "2026-01-01 00:00:00".into(),
            project_name: "demo".into(),
            total_components: 1,
            results: vec![result],
            overall_score: 0.0,
            critical_issues: 1,
            recommendations: vec!["Improve documentation for: security_considerations".into()],
            coverage,
        }
    }

    #[test]
    fn test_write_report_pair() {
        let dir = tempdir().unwrap();
        let report = sample_report();
        let (json_path, html_path) = write_report(&report, dir.path()).unwrap();
        assert!(json_path.exists());
        assert!(html_path.exists());
        assert!(json_path.starts_with(dir.path().join("validation")));
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed["critical_issues"], 1);
        assert_eq!(parsed["results"][0]["status"], "FAILED");
    }

    #[test]
    fn test_html_contains_components_and_recommendations() {
        let html = render_html(&sample_report());
        assert!(html.contains("security_considerations"));
        assert!(html.contains("status-failed"));
        assert!(html.contains("No security documentation found"));
        assert!(html.contains("Improve documentation for"));
    }
}
