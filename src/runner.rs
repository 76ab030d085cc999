//! Category execution.
//!
//! Subprocess categories launch their configured tool and capture exit
//! code and output streams; embedded categories (documentation validation
//! and the UX family) run in-process. Every failure mode is captured into
//! the category's result record, so a run always yields one result per
//! requested category.

use crate::artifacts;
use crate::config::Effective;
use crate::models::suite::{Category, CategoryPayload, CategoryResult};
use crate::models::Status;
use crate::ux::{self, driver::driver_for, UxHarness};
use crate::validator::{self, ValidatorContext};
use futures::future::join_all;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// Everything a run needs, resolved from config and CLI flags.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub project_root: PathBuf,
    pub report_dir: PathBuf,
    pub docs_dir: String,
    pub base_url: String,
    pub driver: String,
    /// Category name -> argv override from `[commands]`.
    pub commands: HashMap<String, Vec<String>>,
}

impl RunContext {
    #[must_use]
    pub fn from_effective(eff: &Effective) -> Self {
        RunContext {
            project_root: eff.project_root.clone(),
            report_dir: eff.report_dir.clone(),
            docs_dir: eff.docs_dir.clone(),
            base_url: eff.base_url.clone(),
            driver: eff.driver.clone(),
            commands: eff.commands.clone(),
        }
    }
}

/// Resolve requested category names and run them concurrently.
///
/// Unknown names are skipped with a warning; duplicates collapse to one
/// run. `None` requests the full set. Result order follows request order.
pub async fn run_categories(ctx: &RunContext, names: Option<&[String]>) -> Vec<CategoryResult> {
    let mut categories: Vec<Category> = Vec::new();
    match names {
        None => categories.extend(Category::ALL),
        Some(names) => {
            for name in names {
                match name.parse::<Category>() {
                    Ok(c) if !categories.contains(&c) => categories.push(c),
                    Ok(_) => {}
                    Err(()) => warn!(category = %name, "unknown category, skipping"),
                }
            }
        }
    }

    join_all(categories.into_iter().map(|c| run_category(ctx, c))).await
}

/// Run one category to completion. Never errors: failures land in the
/// result record.
pub async fn run_category(ctx: &RunContext, category: Category) -> CategoryResult {
    info!(category = %category, "running");
    match category {
        Category::Openspec => run_openspec(ctx).await,
        Category::Ux => run_ux(ctx).await,
        Category::Accessibility => run_accessibility(ctx).await,
        _ => run_subprocess(ctx, category).await,
    }
}

async fn run_subprocess(ctx: &RunContext, category: Category) -> CategoryResult {
    let argvs: Vec<Vec<String>> = match ctx.commands.get(category.name()) {
        Some(over) => vec![over.clone()],
        None => default_commands(category),
    };
    let started = Instant::now();

    let mut stdout = String::new();
    let mut stderr = String::new();
    let mut primary_code: Option<i32> = None;
    for argv in &argvs {
        let Some(program) = argv.first() else {
            return CategoryResult::failed(category, "empty command", started.elapsed().as_secs_f64());
        };
        let output = tokio::process::Command::new(program)
            .args(&argv[1..])
            .current_dir(&ctx.project_root)
            .output()
            .await;
        match output {
            Ok(out) => {
                stdout.push_str(&String::from_utf8_lossy(&out.stdout));
                stderr.push_str(&String::from_utf8_lossy(&out.stderr));
                let code = out.status.code().unwrap_or(-1);
                if primary_code.is_none() {
                    primary_code = Some(code);
                }
            }
            Err(err) => {
                return CategoryResult::failed(
                    category,
                    format!("failed to launch {program}: {err}"),
                    started.elapsed().as_secs_f64(),
                );
            }
        }
    }

    let exit_code = primary_code.unwrap_or(-1);
    let duration_secs = started.elapsed().as_secs_f64();
    let payload = subprocess_payload(ctx, category);

    // Security passes on zero high-severity findings, not on exit code:
    // scanners exit non-zero whenever they report anything at all.
    let status = match (&payload, category) {
        (CategoryPayload::Security { high_severity, .. }, Category::Security) => {
            if *high_severity == 0 {
                Status::Passed
            } else {
                Status::Failed
            }
        }
        _ => {
            if exit_code == 0 {
                Status::Passed
            } else {
                Status::Failed
            }
        }
    };
    let error = match status {
        Status::Failed if category == Category::Security => {
            Some("high severity security findings".to_string())
        }
        Status::Failed => Some(format!("exited with code {exit_code}")),
        _ => None,
    };

    CategoryResult {
        category,
        status,
        exit_code: Some(exit_code),
        duration_secs,
        error,
        stdout,
        stderr,
        payload,
    }
}

fn subprocess_payload(ctx: &RunContext, category: Category) -> CategoryPayload {
    match category {
        Category::Unit => artifacts::read_coverage(&ctx.project_root)
            .map(|percent_covered| CategoryPayload::Coverage { percent_covered })
            .unwrap_or_default(),
        Category::Performance => artifacts::read_benchmark_count(&ctx.project_root)
            .map(|count| CategoryPayload::Benchmarks { count })
            .unwrap_or_default(),
        Category::Security => {
            let summary = artifacts::read_security_reports(&ctx.project_root);
            CategoryPayload::Security {
                total_issues: summary.total_issues,
                high_severity: summary.high_severity,
            }
        }
        _ => CategoryPayload::None,
    }
}

async fn run_openspec(ctx: &RunContext) -> CategoryResult {
    let started = Instant::now();
    let vctx = ValidatorContext::new(&ctx.project_root, &ctx.docs_dir);
    let report = validator::validate_project(&vctx).await;
    if let Err(err) = validator::render::write_report(&report, &ctx.report_dir) {
        warn!(%err, "could not persist validation reports");
    }

    let status = if report.gate() {
        Status::Passed
    } else {
        Status::Failed
    };
    CategoryResult {
        category: Category::Openspec,
        status,
        exit_code: None,
        duration_secs: started.elapsed().as_secs_f64(),
        error: (status == Status::Failed)
            .then(|| format!("validation gate not met (score {:.2})", report.overall_score)),
        stdout: String::new(),
        stderr: String::new(),
        payload: CategoryPayload::Validation {
            overall_score: report.overall_score,
            critical_issues: report.critical_issues,
            components_validated: report.total_components,
        },
    }
}

async fn run_ux(ctx: &RunContext) -> CategoryResult {
    let started = Instant::now();
    let Some(driver) = driver_for(&ctx.driver) else {
        return CategoryResult::skipped(
            Category::Ux,
            "browser driver unavailable",
            started.elapsed().as_secs_f64(),
        );
    };

    let harness = UxHarness::new(Some(driver), ctx.base_url.clone());
    let report = harness.generate_report().await;
    if let Err(err) = ux::write_report(&report, &ctx.report_dir) {
        warn!(%err, "could not persist UX reports");
    }

    let status = if report.all_passed() {
        Status::Passed
    } else {
        Status::Failed
    };
    CategoryResult {
        category: Category::Ux,
        status,
        exit_code: None,
        duration_secs: started.elapsed().as_secs_f64(),
        error: (status == Status::Failed)
            .then(|| format!("{} UX probes failed", report.failed_tests)),
        stdout: String::new(),
        stderr: String::new(),
        payload: CategoryPayload::Ux {
            total: report.total_tests,
            passed: report.passed_tests,
            failed: report.failed_tests,
            skipped: report.skipped_tests,
            accessibility_violations: report.accessibility_violations.len(),
        },
    }
}

async fn run_accessibility(ctx: &RunContext) -> CategoryResult {
    let started = Instant::now();
    let Some(driver) = driver_for(&ctx.driver) else {
        return CategoryResult::skipped(
            Category::Accessibility,
            "browser driver unavailable",
            started.elapsed().as_secs_f64(),
        );
    };

    let harness = UxHarness::new(Some(driver), ctx.base_url.clone());
    let results = harness.run_accessibility().await;
    let passed = results.iter().filter(|r| r.status.is_passed()).count();
    let failed = results.len() - passed;
    let violations: usize = results.iter().map(|r| r.violations.total()).sum();

    let status = if failed == 0 {
        Status::Passed
    } else {
        Status::Failed
    };
    CategoryResult {
        category: Category::Accessibility,
        status,
        exit_code: None,
        duration_secs: started.elapsed().as_secs_f64(),
        error: (status == Status::Failed)
            .then(|| format!("{failed} accessibility checks failed")),
        stdout: String::new(),
        stderr: String::new(),
        payload: CategoryPayload::Ux {
            total: results.len(),
            passed,
            failed,
            skipped: 0,
            accessibility_violations: violations,
        },
    }
}

/// Default tool invocations per subprocess category. Security runs both
/// scanners back to back.
#[must_use]
pub fn default_commands(category: Category) -> Vec<Vec<String>> {
    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| (*s).to_string()).collect()
    }
    match category {
        Category::Unit => vec![argv(&[
            "python3",
            "-m",
            "pytest",
            "tests/unit/",
            "--cov=src",
            "--cov-report=json",
            "--junitxml=unit-test-results.xml",
            "-v",
        ])],
        Category::Integration => vec![argv(&[
            "python3",
            "-m",
            "pytest",
            "tests/integration/",
            "--timeout=300",
            "-v",
        ])],
        Category::Deployment => vec![argv(&["bash", "scripts/deployment-test.sh"])],
        Category::Performance => vec![argv(&[
            "python3",
            "-m",
            "pytest",
            "tests/performance/",
            "--benchmark-only",
            "--benchmark-json=benchmark-results.json",
        ])],
        Category::Security => vec![
            argv(&["bandit", "-r", "src/", "-f", "json", "-o", "bandit-report.json"]),
            argv(&["safety", "check", "--json", "--output", "safety-report.json"]),
        ],
        Category::E2e => vec![argv(&[
            "npx",
            "playwright",
            "test",
            "tests/e2e/",
            "--reporter=json",
        ])],
        // Embedded categories never reach the subprocess path
        Category::Ux | Category::Accessibility | Category::Openspec => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ctx_for(dir: &std::path::Path) -> RunContext {
        RunContext {
            project_root: dir.to_path_buf(),
            report_dir: dir.join("test-results"),
            docs_dir: "openspec".to_string(),
            base_url: "http://localhost:8080".to_string(),
            driver: "simulated".to_string(),
            commands: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn test_overridden_command_passes_on_exit_zero() {
        let dir = tempdir().unwrap();
        let mut ctx = ctx_for(dir.path());
        ctx.commands
            .insert("unit".to_string(), vec!["true".to_string()]);
        let result = run_category(&ctx, Category::Unit).await;
        assert_eq!(result.status, Status::Passed);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_nonzero_exit_fails() {
        let dir = tempdir().unwrap();
        let mut ctx = ctx_for(dir.path());
        ctx.commands
            .insert("integration".to_string(), vec!["false".to_string()]);
        let result = run_category(&ctx, Category::Integration).await;
        assert_eq!(result.status, Status::Failed);
        assert_eq!(result.exit_code, Some(1));
        assert_eq!(result.error.as_deref(), Some("exited with code 1"));
    }

    #[tokio::test]
    async fn test_missing_tool_is_captured() {
        let dir = tempdir().unwrap();
        let mut ctx = ctx_for(dir.path());
        ctx.commands.insert(
            "e2e".to_string(),
            vec!["vantage-no-such-tool".to_string()],
        );
        let result = run_category(&ctx, Category::E2e).await;
        assert_eq!(result.status, Status::Failed);
        assert!(result
            .error
            .as_deref()
            .unwrap()
            .starts_with("failed to launch vantage-no-such-tool"));
    }

    #[tokio::test]
    async fn test_security_status_ignores_exit_code() {
        let dir = tempdir().unwrap();
        let mut ctx = ctx_for(dir.path());
        // Scanner exits non-zero, but no reports means no high findings
        ctx.commands
            .insert("security".to_string(), vec!["false".to_string()]);
        let result = run_category(&ctx, Category::Security).await;
        assert_eq!(result.status, Status::Passed);
        assert_eq!(result.exit_code, Some(1));
    }

    #[tokio::test]
    async fn test_security_fails_on_high_findings() {
        let dir = tempdir().unwrap();
        let mut ctx = ctx_for(dir.path());
        ctx.commands
            .insert("security".to_string(), vec!["true".to_string()]);
        std::fs::write(
            dir.path().join("bandit-report.json"),
            r#"{"results": [{"issue_severity": "HIGH"}]}"#,
        )
        .unwrap();
        let result = run_category(&ctx, Category::Security).await;
        assert_eq!(result.status, Status::Failed);
        match result.payload {
            CategoryPayload::Security { high_severity, .. } => assert_eq!(high_severity, 1),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unit_payload_reads_coverage() {
        let dir = tempdir().unwrap();
        let mut ctx = ctx_for(dir.path());
        ctx.commands
            .insert("unit".to_string(), vec!["true".to_string()]);
        std::fs::write(
            dir.path().join("coverage.json"),
            r#"{"totals": {"percent_covered": 91.0}}"#,
        )
        .unwrap();
        let result = run_category(&ctx, Category::Unit).await;
        match result.payload {
            CategoryPayload::Coverage { percent_covered } => {
                assert!((percent_covered - 91.0).abs() < 1e-9);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_openspec_embedded_gate() {
        let dir = tempdir().unwrap();
        let ctx = ctx_for(dir.path());
        // No documentation root at all: the gate cannot be met
        let result = run_category(&ctx, Category::Openspec).await;
        assert_eq!(result.status, Status::Failed);
        match result.payload {
            CategoryPayload::Validation {
                overall_score,
                components_validated,
                ..
            } => {
                assert_eq!(overall_score, 0.0);
                assert_eq!(components_validated, 0);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ux_family_skipped_without_driver() {
        let dir = tempdir().unwrap();
        let mut ctx = ctx_for(dir.path());
        ctx.driver = "none".to_string();
        let ux = run_category(&ctx, Category::Ux).await;
        assert_eq!(ux.status, Status::Skipped);
        let a11y = run_category(&ctx, Category::Accessibility).await;
        assert_eq!(a11y.status, Status::Skipped);
    }

    #[tokio::test]
    async fn test_ux_simulated_passes_and_persists() {
        let dir = tempdir().unwrap();
        let ctx = ctx_for(dir.path());
        let result = run_category(&ctx, Category::Ux).await;
        assert_eq!(result.status, Status::Passed);
        let written: Vec<_> = std::fs::read_dir(dir.path().join("test-results/ux"))
            .unwrap()
            .flatten()
            .collect();
        assert_eq!(written.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_names_skipped_and_order_kept() {
        let dir = tempdir().unwrap();
        let mut ctx = ctx_for(dir.path());
        ctx.commands
            .insert("unit".to_string(), vec!["true".to_string()]);
        ctx.commands
            .insert("integration".to_string(), vec!["true".to_string()]);
        let names = vec![
            "integration".to_string(),
            "browser".to_string(),
            "unit".to_string(),
            "unit".to_string(),
        ];
        let results = run_categories(&ctx, Some(&names)).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].category, Category::Integration);
        assert_eq!(results[1].category, Category::Unit);
    }
}
