//! Documentation-tree validation.
//!
//! Scores a project's documentation root against a fixed category
//! checklist. Each category check is independent and infallible: defects
//! become issues inside its `ValidationResult`, never errors. The overall
//! score is the arithmetic mean of the categories that apply to the
//! project (a category may opt out entirely, e.g. when its source
//! directory does not exist).

pub mod api;
pub mod coverage;
pub mod docs;
pub mod render;

use crate::models::validation::{SpecReport, ValidationResult};
use futures::future::join_all;
use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tracing::info;

/// Components whose absence from the results is called out in the
/// recommendations.
const CRITICAL_COMPONENTS: [&str; 3] = [
    "project_specification",
    "system_architecture",
    "api_specifications",
];

/// Resolved paths and naming for one validation run.
#[derive(Debug, Clone)]
pub struct ValidatorContext {
    pub project_root: PathBuf,
    pub docs_root: PathBuf,
    pub project_name: String,
}

impl ValidatorContext {
    #[must_use]
    pub fn new(project_root: &Path, docs_dir: &str) -> Self {
        let resolved = project_root
            .canonicalize()
            .unwrap_or_else(|_| project_root.to_path_buf());
        let project_name = resolved
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string());
        ValidatorContext {
            docs_root: resolved.join(docs_dir),
            project_root: resolved,
            project_name,
        }
    }
}

/// Run every category check and assemble the report.
///
/// The checks are fanned out on the single-threaded executor; they are
/// filesystem-bound and isolated from each other.
pub async fn validate_project(ctx: &ValidatorContext) -> SpecReport {
    info!(project = %ctx.project_name, docs = %ctx.docs_root.display(), "validating documentation tree");

    if !ctx.docs_root.is_dir() {
        return missing_docs_report(ctx);
    }

    type CheckFuture<'a> = Pin<Box<dyn Future<Output = Option<ValidationResult>> + 'a>>;
    let checks: Vec<CheckFuture<'_>> = vec![
        Box::pin(async { Some(docs::check_project_specification(ctx)) }),
        Box::pin(async { docs::check_system_architecture(ctx) }),
        Box::pin(async { Some(api::check_api_specifications(ctx)) }),
        Box::pin(async { Some(docs::check_database_schema(ctx)) }),
        Box::pin(async { Some(docs::check_security_considerations(ctx)) }),
        Box::pin(async { Some(docs::check_deployment_configuration(ctx)) }),
        Box::pin(async { Some(docs::check_change_proposals(ctx)) }),
        Box::pin(async { Some(coverage::check_spec_completeness(ctx)) }),
        Box::pin(async { Some(coverage::check_spec_consistency(ctx)) }),
    ];

    let results: Vec<ValidationResult> = join_all(checks).await.into_iter().flatten().collect();
    assemble(ctx, results)
}

fn assemble(ctx: &ValidatorContext, results: Vec<ValidationResult>) -> SpecReport {
    let overall_score = if results.is_empty() {
        0.0
    } else {
        results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64
    };
    let critical_issues = results.iter().map(ValidationResult::critical_count).sum();
    let coverage: BTreeMap<String, f64> = results
        .iter()
        .map(|r| (r.component.clone(), r.score))
        .collect();
    let recommendations = recommendations(&results);

    SpecReport {
        timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        project_name: ctx.project_name.clone(),
        total_components: results.len(),
        results,
        overall_score,
        critical_issues,
        recommendations,
        coverage,
    }
}

/// Report emitted when the documentation root itself is absent.
fn missing_docs_report(ctx: &ValidatorContext) -> SpecReport {
    SpecReport {
        timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        project_name: ctx.project_name.clone(),
        total_components: 0,
        results: Vec::new(),
        overall_score: 0.0,
        critical_issues: 0,
        recommendations: vec![format!(
            "Create the documentation root at {} to enable validation",
            ctx.docs_root.display()
        )],
        coverage: BTreeMap::new(),
    }
}

fn recommendations(results: &[ValidationResult]) -> Vec<String> {
    let mut recs = Vec::new();

    let weak: Vec<&str> = results
        .iter()
        .filter(|r| r.score < 0.6)
        .map(|r| r.component.as_str())
        .collect();
    if !weak.is_empty() {
        recs.push(format!("Improve documentation for: {}", weak.join(", ")));
    }

    let missing: Vec<&str> = CRITICAL_COMPONENTS
        .iter()
        .copied()
        .filter(|name| !results.iter().any(|r| r.component == *name))
        .collect();
    if !missing.is_empty() {
        recs.push(format!(
            "Add missing critical documentation: {}",
            missing.join(", ")
        ));
    }

    if let Some(security) = results
        .iter()
        .find(|r| r.component == "security_considerations")
    {
        if security.score < 0.7 {
            recs.push(
                "Strengthen security documentation to cover all core security topics".to_string(),
            );
        }
    }

    if recs.is_empty() {
        recs.push("Documentation quality is good - maintain current standards".to_string());
    }
    recs
}

/// Expand a glob pattern to a sorted path list. Bad patterns and
/// unreadable entries are dropped.
pub(crate) fn glob_sorted(pattern: &str) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = match glob::glob(pattern) {
        Ok(entries) => entries.flatten().collect(),
        Err(_) => Vec::new(),
    };
    paths.sort();
    paths
}

/// Path rendered relative to the project root for issue records.
pub(crate) fn rel_path(ctx: &ValidatorContext, path: &Path) -> String {
    path.strip_prefix(&ctx.project_root)
        .unwrap_or(path)
        .display()
        .to_string()
}
