//! API documentation checks with an implementation cross-check.
//!
//! Besides the usual section checklist, this category compares routes
//! declared in source decorators against the paths of any OpenAPI
//! document in the documentation tree, in both directions.

use super::{glob_sorted, rel_path, ValidatorContext};
use crate::models::validation::{Severity, ValidationIssue, ValidationResult};
use crate::models::Status;
use regex::Regex;
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use std::fs;
use tracing::warn;

const API_SECTIONS: [&str; 4] = [
    "## Overview",
    "## Authentication",
    "## Endpoints",
    "## Data Models",
];

/// Route declarations recognized in source files.
const ROUTE_PATTERNS: [&str; 2] = [
    r#"@[^)\n]*route\(['"]([^'"]+)['"]"#,
    r#"@(?:app|router)\.(?:get|post|put|delete|patch)\(['"]([^'"]+)['"]"#,
];

const STATUS_CODE_PATTERN: &str = r"(?i)(status|code)\s*[:=]\s*\d{3}";

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            warn!(pattern, %err, "skipping unusable pattern");
            None
        }
    }
}

/// Check API documents and cross-check routes against OpenAPI paths.
///
/// The overall score is the weaker of the documentation score and the
/// implementation-consistency score.
pub fn check_api_specifications(ctx: &ValidatorContext) -> ValidationResult {
    const COMPONENT: &str = "api_specifications";
    let docs = ctx.docs_root.display();
    let mut files = glob_sorted(&format!("{docs}/**/*api*.md"));
    files.extend(glob_sorted(&format!("{docs}/**/*endpoint*.md")));
    files.sort();
    files.dedup();

    if files.is_empty() {
        return ValidationResult::new(
            COMPONENT,
            Status::Partial,
            0.5,
            vec![ValidationIssue::new(
                Severity::Warning,
                COMPONENT,
                "No API documentation found",
            )
            .suggest("Add an api.md describing endpoints and data models")],
            Map::new(),
        );
    }

    let status_code_re = compile(STATUS_CODE_PATTERN);
    let mut issues = Vec::new();
    let mut doc_scores = Vec::new();
    for file in &files {
        let content = fs::read_to_string(file).unwrap_or_default();
        let mut score = 1.0f64;
        for section in API_SECTIONS {
            if !content.contains(section) {
                score -= 0.2;
                issues.push(
                    ValidationIssue::new(
                        Severity::Warning,
                        COMPONENT,
                        format!("Missing required section: {section}"),
                    )
                    .at(rel_path(ctx, file)),
                );
            }
        }
        if !content.contains("```json") && !content.contains("```yaml") {
            score -= 0.1;
            issues.push(
                ValidationIssue::new(
                    Severity::Info,
                    COMPONENT,
                    "No request/response examples found",
                )
                .suggest("Add json or yaml example blocks for the documented endpoints")
                .at(rel_path(ctx, file)),
            );
        }
        if !status_code_re
            .as_ref()
            .is_some_and(|re| re.is_match(&content))
        {
            score -= 0.1;
            issues.push(
                ValidationIssue::new(
                    Severity::Info,
                    COMPONENT,
                    "No HTTP status codes documented",
                )
                .at(rel_path(ctx, file)),
            );
        }
        doc_scores.push(score.max(0.0));
    }
    let doc_score = doc_scores.iter().sum::<f64>() / doc_scores.len() as f64;

    let (impl_score, mut cross_issues, routes_checked) = cross_check_routes(ctx);
    issues.append(&mut cross_issues);

    let score = doc_score.min(impl_score);
    let status = if score >= 0.8 {
        Status::Passed
    } else if score >= 0.5 {
        Status::Failed
    } else {
        Status::Partial
    };
    let mut metrics = Map::new();
    metrics.insert("documents".into(), json!(files.len()));
    metrics.insert("doc_score".into(), json!(doc_score));
    metrics.insert("impl_score".into(), json!(impl_score));
    metrics.insert("routes_checked".into(), json!(routes_checked));
    ValidationResult::new(COMPONENT, status, score, issues, metrics)
}

/// Compare implemented routes to OpenAPI paths.
///
/// Without an OpenAPI document the cross-check does not apply and the
/// implementation score is a clean 1.0.
fn cross_check_routes(ctx: &ValidatorContext) -> (f64, Vec<ValidationIssue>, usize) {
    const COMPONENT: &str = "api_specifications";
    let docs = ctx.docs_root.display();
    let mut spec_files = glob_sorted(&format!("{docs}/**/openapi*.json"));
    spec_files.extend(glob_sorted(&format!("{docs}/**/swagger*.json")));
    if spec_files.is_empty() {
        return (1.0, Vec::new(), 0);
    }

    let mut specified: BTreeSet<String> = BTreeSet::new();
    for file in &spec_files {
        let raw = fs::read_to_string(file).unwrap_or_default();
        let parsed: Result<Value, _> = serde_json::from_str(&raw);
        match parsed {
            Ok(doc) => {
                if let Some(paths) = doc.get("paths").and_then(Value::as_object) {
                    specified.extend(paths.keys().cloned());
                }
            }
            Err(err) => {
                warn!(file = %file.display(), %err, "skipping unparsable OpenAPI document");
            }
        }
    }

    let implemented = implemented_routes(ctx);
    let mut issues = Vec::new();
    let mut score = 1.0f64;
    for route in implemented.difference(&specified) {
        score -= 0.05;
        issues.push(
            ValidationIssue::new(
                Severity::Warning,
                COMPONENT,
                format!("Implemented route not specified: {route}"),
            )
            .suggest("Add the route to the OpenAPI document"),
        );
    }
    for route in specified.difference(&implemented) {
        score -= 0.1;
        issues.push(
            ValidationIssue::new(
                Severity::Error,
                COMPONENT,
                format!("Specified route not implemented: {route}"),
            )
            .suggest("Implement the route or remove it from the OpenAPI document"),
        );
    }

    let checked = implemented.len().max(specified.len());
    (score.max(0.0), issues, checked)
}

/// Routes found in source decorators across the project tree.
fn implemented_routes(ctx: &ValidatorContext) -> BTreeSet<String> {
    let patterns: Vec<Regex> = ROUTE_PATTERNS.iter().filter_map(|p| compile(p)).collect();
    let mut routes = BTreeSet::new();
    for file in glob_sorted(&format!("{}/**/*.py", ctx.project_root.display())) {
        let content = fs::read_to_string(&file).unwrap_or_default();
        for re in &patterns {
            for caps in re.captures_iter(&content) {
                if let Some(m) = caps.get(1) {
                    routes.insert(m.as_str().to_string());
                }
            }
        }
    }
    routes
}
