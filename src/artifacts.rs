//! Read-back of tool-written JSON artifacts.
//!
//! Test tools drop their machine-readable output (coverage, benchmark, and
//! security-scan JSON) into the working tree; the runner consumes them after
//! the subprocess exits. A missing or malformed artifact degrades to an
//! empty payload with a logged warning, never a failure.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Coverage artifact written by the unit-test tool (`coverage.json`).
pub const COVERAGE_FILE: &str = "coverage.json";
/// Benchmark artifact written by the performance tool.
pub const BENCHMARK_FILE: &str = "benchmark-results.json";
/// Static-analysis security report (first scanner format).
pub const BANDIT_FILE: &str = "bandit-report.json";
/// Dependency-vulnerability report (second scanner format).
pub const SAFETY_FILE: &str = "safety-report.json";

fn load_json(root: &Path, name: &str) -> Option<Value> {
    let path = root.join(name);
    let raw = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(_) => {
            warn!(artifact = name, "artifact not found; using empty payload");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(err) => {
            warn!(artifact = name, %err, "artifact is not valid JSON; using empty payload");
            None
        }
    }
}

/// Read the coverage percentage from the coverage artifact's totals block.
pub fn read_coverage(root: &Path) -> Option<f64> {
    load_json(root, COVERAGE_FILE)?
        .get("totals")?
        .get("percent_covered")?
        .as_f64()
}

/// Read the number of recorded benchmarks from the benchmark artifact.
pub fn read_benchmark_count(root: &Path) -> Option<usize> {
    Some(
        load_json(root, BENCHMARK_FILE)?
            .get("benchmarks")?
            .as_array()?
            .len(),
    )
}

/// Combined findings from both security scanner report formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecuritySummary {
    pub total_issues: usize,
    pub high_severity: usize,
}

/// Fold both scanner reports into one summary.
///
/// High-severity counting only applies to the static-analysis format; the
/// dependency report contributes to the total alone.
pub fn read_security_reports(root: &Path) -> SecuritySummary {
    let mut summary = SecuritySummary::default();

    if let Some(bandit) = load_json(root, BANDIT_FILE) {
        if let Some(results) = bandit.get("results").and_then(Value::as_array) {
            summary.total_issues += results.len();
            summary.high_severity += results
                .iter()
                .filter(|r| {
                    r.get("issue_severity").and_then(Value::as_str) == Some("HIGH")
                })
                .count();
        }
    }

    if let Some(safety) = load_json(root, SAFETY_FILE) {
        if let Some(vulns) = safety.get("vulnerabilities").and_then(Value::as_array) {
            summary.total_issues += vulns.len();
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_artifacts_degrade_to_empty() {
        let dir = tempdir().unwrap();
        assert_eq!(read_coverage(dir.path()), None);
        assert_eq!(read_benchmark_count(dir.path()), None);
        assert_eq!(read_security_reports(dir.path()), SecuritySummary::default());
    }

    #[test]
    fn test_malformed_coverage_degrades() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(COVERAGE_FILE), "{not json").unwrap();
        assert_eq!(read_coverage(dir.path()), None);
    }

    #[test]
    fn test_coverage_totals_extracted() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(COVERAGE_FILE),
            r#"{"totals": {"percent_covered": 87.5, "covered_lines": 700}}"#,
        )
        .unwrap();
        assert_eq!(read_coverage(dir.path()), Some(87.5));
    }

    #[test]
    fn test_security_reports_folded() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(BANDIT_FILE),
            r#"{"results": [
                {"issue_severity": "HIGH"},
                {"issue_severity": "LOW"},
                {"issue_severity": "HIGH"}
            ]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(SAFETY_FILE),
            r#"{"vulnerabilities": [{"id": "CVE-0"}]}"#,
        )
        .unwrap();

        let summary = read_security_reports(dir.path());
        assert_eq!(summary.total_issues, 4);
        assert_eq!(summary.high_severity, 2);
    }

    #[test]
    fn test_benchmark_count() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(BENCHMARK_FILE),
            r#"{"benchmarks": [{"name": "a"}, {"name": "b"}]}"#,
        )
        .unwrap();
        assert_eq!(read_benchmark_count(dir.path()), Some(2));
    }
}
