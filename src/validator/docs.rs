//! Per-category document checks.
//!
//! Every check returns a `ValidationResult` with a score in [0.0, 1.0];
//! defects are recorded as issues with fixed deductions. Checks read the
//! filesystem directly and never fail: an unreadable file counts as
//! absent.

use super::{glob_sorted, rel_path, ValidatorContext};
use crate::models::validation::{Severity, ValidationIssue, ValidationResult};
use crate::models::Status;
use regex::Regex;
use serde_json::{json, Map};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Required headings in `project.md`.
pub const PROJECT_SECTIONS: [&str; 7] = [
    "# Project Overview",
    "## Context",
    "## Domain",
    "## Goals",
    "## Scope",
    "## Constraints",
    "## Conventions",
];

/// Metadata fields expected near the top of `project.md`. Absence is a
/// warning, never a score deduction.
const METADATA_FIELDS: [(&str, &str); 6] = [
    ("name", r"(?im)^\s*[-*]?\s*\**name\**\s*:"),
    ("description", r"(?im)^\s*[-*]?\s*\**description\**\s*:"),
    ("version", r"(?im)^\s*[-*]?\s*\**version\**\s*:"),
    ("author", r"(?im)^\s*[-*]?\s*\**author\**\s*:"),
    ("created", r"(?im)^\s*[-*]?\s*\**created\**\s*:"),
    ("last updated", r"(?im)^\s*[-*]?\s*\**last updated\**\s*:"),
];

/// Required headings in each architecture document.
const ARCHITECTURE_SECTIONS: [&str; 4] = [
    "## Components",
    "## Dependencies",
    "## Data Flow",
    "## Interfaces",
];

/// Required headings in a schema document.
const SCHEMA_SECTIONS: [&str; 3] = ["## Tables", "## Relationships", "## Data Types"];

/// Topics a complete security document covers.
const SECURITY_TOPICS: [&str; 6] = [
    "Authentication",
    "Authorization",
    "Data Encryption",
    "Input Validation",
    "Error Handling",
    "Logging and Auditing",
];

/// Required headings per change proposal.
const PROPOSAL_SECTIONS: [&str; 4] = ["## Summary", "## Motivation", "## Changes", "## Impact"];

fn read_opt(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            warn!(pattern, %err, "skipping unusable pattern");
            None
        }
    }
}

fn status_for(score: f64, fail_bar: f64) -> Status {
    if score >= 0.8 {
        Status::Passed
    } else if score >= fail_bar {
        Status::Failed
    } else {
        Status::Partial
    }
}

/// Check `project.md` for the required section set and metadata fields.
///
/// A missing file is a critical defect. Each missing required section
/// deducts 1/7 of the score; the pass bar is 0.8.
pub fn check_project_specification(ctx: &ValidatorContext) -> ValidationResult {
    const COMPONENT: &str = "project_specification";
    let path = ctx.docs_root.join("project.md");
    let Some(content) = read_opt(&path) else {
        return ValidationResult::new(
            COMPONENT,
            Status::Failed,
            0.0,
            vec![ValidationIssue::new(
                Severity::Critical,
                COMPONENT,
                "project.md not found in documentation root",
            )
            .suggest("Create project.md with the project overview and conventions")
            .at(rel_path(ctx, &path))],
            Map::new(),
        );
    };

    let mut issues = Vec::new();
    let mut missing_sections = 0usize;
    for section in PROJECT_SECTIONS {
        if !content.contains(section) {
            missing_sections += 1;
            issues.push(
                ValidationIssue::new(
                    Severity::Error,
                    COMPONENT,
                    format!("Missing required section: {section}"),
                )
                .suggest(format!("Add a `{section}` section to project.md"))
                .at(rel_path(ctx, &path)),
            );
        }
    }

    let mut metadata_present = 0usize;
    for (field, pattern) in METADATA_FIELDS {
        let found = compile(pattern).is_some_and(|re| re.is_match(&content));
        if found {
            metadata_present += 1;
        } else {
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    COMPONENT,
                    format!("Missing metadata field: {field}"),
                )
                .at(rel_path(ctx, &path)),
            );
        }
    }

    let score = 1.0 - missing_sections as f64 / PROJECT_SECTIONS.len() as f64;
    let status = if score >= 0.8 {
        Status::Passed
    } else {
        Status::Failed
    };
    let mut metrics = Map::new();
    metrics.insert(
        "sections_found".into(),
        json!(PROJECT_SECTIONS.len() - missing_sections),
    );
    metrics.insert("sections_required".into(), json!(PROJECT_SECTIONS.len()));
    metrics.insert("metadata_present".into(), json!(metadata_present));
    ValidationResult::new(COMPONENT, status, score, issues, metrics)
}

/// Check architecture documents under `specs/`.
///
/// Returns `None` when the project has no `specs/` directory at all; the
/// category then does not participate in the overall mean.
pub fn check_system_architecture(ctx: &ValidatorContext) -> Option<ValidationResult> {
    const COMPONENT: &str = "system_architecture";
    let specs_dir = ctx.docs_root.join("specs");
    if !specs_dir.is_dir() {
        return None;
    }

    let pattern = format!("{}/**/*architecture*.md", specs_dir.display());
    let files = glob_sorted(&pattern);
    if files.is_empty() {
        return Some(ValidationResult::new(
            COMPONENT,
            Status::Partial,
            0.5,
            vec![ValidationIssue::new(
                Severity::Warning,
                COMPONENT,
                "No architecture documents found under specs/",
            )
            .suggest("Add an architecture.md describing components and data flow")],
            Map::new(),
        ));
    }

    let mut issues = Vec::new();
    let mut file_scores = Vec::new();
    for file in &files {
        let content = read_opt(file).unwrap_or_default();
        let mut score = 1.0f64;
        for section in ARCHITECTURE_SECTIONS {
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
        if !content.contains("![") && !content.contains("```mermaid") {
            score -= 0.1;
            issues.push(
                ValidationIssue::new(
                    Severity::Info,
                    COMPONENT,
                    "No diagrams found in architecture document",
                )
                .suggest("Add a mermaid diagram or image illustrating the system")
                .at(rel_path(ctx, file)),
            );
        }
        file_scores.push(score.max(0.0));
    }

    let score = file_scores.iter().sum::<f64>() / file_scores.len() as f64;
    let status = if score >= 0.8 {
        Status::Passed
    } else if score >= 0.5 {
        Status::Failed
    } else {
        Status::Partial
    };
    let mut metrics = Map::new();
    metrics.insert("documents".into(), json!(files.len()));
    Some(ValidationResult::new(
        COMPONENT, status, score, issues, metrics,
    ))
}

/// Check database schema artifacts: SQL files, schema documents, and the
/// migrations directory.
pub fn check_database_schema(ctx: &ValidatorContext) -> ValidationResult {
    const COMPONENT: &str = "database_schema";
    let sql_files = glob_sorted(&format!("{}/**/*.sql", ctx.project_root.display()))
        .into_iter()
        .filter(|p| !p.starts_with(ctx.project_root.join("migrations")))
        .collect::<Vec<_>>();
    let doc_files = glob_sorted(&format!("{}/**/*schema*.md", ctx.docs_root.display()));
    let migrations_dir = ctx.project_root.join("migrations");

    if sql_files.is_empty() && doc_files.is_empty() && !migrations_dir.is_dir() {
        return ValidationResult::new(
            COMPONENT,
            Status::Partial,
            0.8,
            vec![ValidationIssue::new(
                Severity::Info,
                COMPONENT,
                "No database schema artifacts found",
            )
            .suggest("Add schema SQL or a schema document if the project uses a database")],
            Map::new(),
        );
    }

    let mut issues = Vec::new();
    let mut score = 1.0f64;

    for file in &sql_files {
        let content = read_opt(file).unwrap_or_default().to_uppercase();
        let tables = content.matches("CREATE TABLE").count();
        if tables == 0 {
            continue;
        }
        if !content.contains("PRIMARY KEY") {
            score -= 0.2;
            issues.push(
                ValidationIssue::new(
                    Severity::Error,
                    COMPONENT,
                    "Tables defined without a PRIMARY KEY",
                )
                .at(rel_path(ctx, file)),
            );
        }
        if tables > 1 && !content.contains("FOREIGN KEY") && !content.contains("REFERENCES") {
            score -= 0.1;
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    COMPONENT,
                    "Multiple tables with no foreign key relationships",
                )
                .at(rel_path(ctx, file)),
            );
        }
        if tables > 2 && !content.contains("INDEX") {
            score -= 0.1;
            issues.push(
                ValidationIssue::new(
                    Severity::Info,
                    COMPONENT,
                    "No indexes defined across several tables",
                )
                .at(rel_path(ctx, file)),
            );
        }
    }

    for file in &doc_files {
        let content = read_opt(file).unwrap_or_default();
        for section in SCHEMA_SECTIONS {
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
    }

    if migrations_dir.is_dir() {
        let migrations = glob_sorted(&format!("{}/*", migrations_dir.display()));
        let versioned = compile(r"^(\d{3,}|[Vv]\d+)[_-]");
        let any_versioned = migrations.iter().any(|m| {
            m.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .zip(versioned.as_ref())
                .is_some_and(|(name, re)| re.is_match(&name))
        });
        if !migrations.is_empty() && !any_versioned {
            score -= 0.2;
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    COMPONENT,
                    "Migration files are not version-prefixed",
                )
                .suggest("Prefix migrations with an ordered version, e.g. 001_initial.sql"),
            );
        }
        let any_rollback = migrations.iter().any(|m| {
            let name = m.file_name().map(|n| n.to_string_lossy().to_lowercase());
            name.is_some_and(|n| n.contains("down") || n.contains("rollback"))
                || read_opt(m)
                    .map(|c| c.to_lowercase())
                    .is_some_and(|c| c.contains("rollback") || c.contains("-- down"))
        });
        if !migrations.is_empty() && !any_rollback {
            score -= 0.1;
            issues.push(ValidationIssue::new(
                Severity::Info,
                COMPONENT,
                "No rollback path found in migrations",
            ));
        }
    }

    let score = score.max(0.0);
    let mut metrics = Map::new();
    metrics.insert("sql_files".into(), json!(sql_files.len()));
    metrics.insert("schema_documents".into(), json!(doc_files.len()));
    ValidationResult::new(COMPONENT, status_for(score, 0.5), score, issues, metrics)
}

/// Check that security documentation exists and covers the core topics.
///
/// This category is mandatory: total absence is a critical defect with a
/// zero score.
pub fn check_security_considerations(ctx: &ValidatorContext) -> ValidationResult {
    const COMPONENT: &str = "security_considerations";
    let docs = ctx.docs_root.display();
    let mut files = glob_sorted(&format!("{docs}/**/*security*.md"));
    files.extend(glob_sorted(&format!("{docs}/**/*auth*.md")));
    files.sort();
    files.dedup();
    if files.is_empty() {
        // No dedicated document; accept any doc carrying a security heading
        files = glob_sorted(&format!("{docs}/**/*.md"))
            .into_iter()
            .filter(|f| {
                read_opt(f).is_some_and(|c| c.to_lowercase().contains("## security"))
            })
            .collect();
    }
    if files.is_empty() {
        return ValidationResult::new(
            COMPONENT,
            Status::Failed,
            0.0,
            vec![ValidationIssue::new(
                Severity::Critical,
                COMPONENT,
                "No security documentation found",
            )
            .suggest("Add a security.md covering authentication, authorization, and data handling")],
            Map::new(),
        );
    }

    let combined = files
        .iter()
        .filter_map(|f| read_opt(f))
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase();

    let mut issues = Vec::new();
    let mut found = 0usize;
    for topic in SECURITY_TOPICS {
        if combined.contains(&topic.to_lowercase()) {
            found += 1;
        } else {
            let severity = if topic == "Logging and Auditing" {
                Severity::Warning
            } else {
                Severity::Error
            };
            issues.push(
                ValidationIssue::new(
                    severity,
                    COMPONENT,
                    format!("Security topic not covered: {topic}"),
                )
                .suggest(format!("Document the project's approach to {topic}")),
            );
        }
    }

    let score = found as f64 / SECURITY_TOPICS.len() as f64;
    let status = if score >= 0.8 {
        Status::Passed
    } else if score >= 0.6 {
        Status::Failed
    } else {
        Status::Partial
    };
    let mut metrics = Map::new();
    metrics.insert("topics_covered".into(), json!(found));
    metrics.insert("topics_required".into(), json!(SECURITY_TOPICS.len()));
    metrics.insert("documents".into(), json!(files.len()));
    ValidationResult::new(COMPONENT, status, score, issues, metrics)
}

/// Check deployment configuration: compose/manifest YAML plus shell
/// scripts under `scripts/`.
pub fn check_deployment_configuration(ctx: &ValidatorContext) -> ValidationResult {
    const COMPONENT: &str = "deployment_configuration";
    let root = ctx.project_root.display();
    let mut yaml_files = glob_sorted(&format!("{root}/docker-compose*.yml"));
    yaml_files.extend(glob_sorted(&format!("{root}/docker-compose*.yaml")));
    yaml_files.extend(glob_sorted(&format!("{root}/deploy/**/*.yml")));
    yaml_files.extend(glob_sorted(&format!("{root}/deploy/**/*.yaml")));
    let scripts = glob_sorted(&format!("{root}/scripts/*.sh"));

    if yaml_files.is_empty() && scripts.is_empty() {
        return ValidationResult::new(
            COMPONENT,
            Status::Partial,
            0.6,
            vec![ValidationIssue::new(
                Severity::Info,
                COMPONENT,
                "No deployment configuration found",
            )
            .suggest("Add a docker-compose file or deployment scripts")],
            Map::new(),
        );
    }

    let mut issues = Vec::new();
    let mut file_scores = Vec::new();
    let secret_re = compile(
        r#"(?i)(password|secret|api_key|token)\s*[:=]\s*["']?[A-Za-z0-9+/=_-]{8,}"#,
    );

    for file in &yaml_files {
        let content = read_opt(file).unwrap_or_default();
        let parsed: Result<serde_yaml::Value, _> = serde_yaml::from_str(&content);
        let Ok(doc) = parsed else {
            issues.push(
                ValidationIssue::new(Severity::Critical, COMPONENT, "Invalid YAML syntax")
                    .at(rel_path(ctx, file)),
            );
            file_scores.push(0.0);
            continue;
        };

        let mut score = 1.0f64;
        if secret_re.as_ref().is_some_and(|re| re.is_match(&content)) {
            score -= 0.3;
            issues.push(
                ValidationIssue::new(
                    Severity::Error,
                    COMPONENT,
                    "Possible hardcoded secret in deployment configuration",
                )
                .suggest("Move secrets into environment variables or a secret store")
                .at(rel_path(ctx, file)),
            );
        }
        if let Some(services) = doc.get("services").and_then(serde_yaml::Value::as_mapping) {
            let unlimited = services
                .values()
                .filter(|svc| svc.get("deploy").is_none() && svc.get("mem_limit").is_none())
                .count();
            if unlimited > 0 {
                score -= 0.1;
                issues.push(
                    ValidationIssue::new(
                        Severity::Info,
                        COMPONENT,
                        format!("{unlimited} service(s) without resource limits"),
                    )
                    .at(rel_path(ctx, file)),
                );
            }
        }
        file_scores.push(score.max(0.0));
    }

    for file in &scripts {
        let content = read_opt(file).unwrap_or_default();
        let mut score = 1.0f64;
        if !content.contains("set -e") {
            score -= 0.2;
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    COMPONENT,
                    "Script does not stop on errors (missing set -e)",
                )
                .at(rel_path(ctx, file)),
            );
        }
        if content.contains("$1") && !content.contains("-z") && !content.contains("${1:?") {
            score -= 0.1;
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    COMPONENT,
                    "Positional argument used without validation",
                )
                .at(rel_path(ctx, file)),
            );
        }
        if !content.contains("--help") {
            score -= 0.1;
            issues.push(
                ValidationIssue::new(Severity::Info, COMPONENT, "Script has no --help handling")
                    .at(rel_path(ctx, file)),
            );
        }
        file_scores.push(score.max(0.0));
    }

    let score = file_scores.iter().sum::<f64>() / file_scores.len() as f64;
    let mut metrics = Map::new();
    metrics.insert("yaml_files".into(), json!(yaml_files.len()));
    metrics.insert("scripts".into(), json!(scripts.len()));
    ValidationResult::new(COMPONENT, status_for(score, 0.6), score, issues, metrics)
}

/// Check change proposals under `<docs>/changes/`.
///
/// A project with no changes directory passes vacuously.
pub fn check_change_proposals(ctx: &ValidatorContext) -> ValidationResult {
    const COMPONENT: &str = "change_proposals";
    let changes_dir = ctx.docs_root.join("changes");
    if !changes_dir.is_dir() {
        let mut metrics = Map::new();
        metrics.insert("proposals".into(), json!(0));
        return ValidationResult::new(COMPONENT, Status::Passed, 1.0, Vec::new(), metrics);
    }

    let mut proposals: Vec<_> = fs::read_dir(&changes_dir)
        .map(|rd| {
            rd.flatten()
                .map(|e| e.path())
                .filter(|p| p.is_dir())
                .collect()
        })
        .unwrap_or_default();
    proposals.sort();

    if proposals.is_empty() {
        let mut metrics = Map::new();
        metrics.insert("proposals".into(), json!(0));
        return ValidationResult::new(COMPONENT, Status::Passed, 1.0, Vec::new(), metrics);
    }

    let mut issues = Vec::new();
    let mut scores = Vec::new();
    for proposal in &proposals {
        let proposal_md = proposal.join("proposal.md");
        let Some(content) = read_opt(&proposal_md) else {
            scores.push(0.0);
            issues.push(
                ValidationIssue::new(Severity::Error, COMPONENT, "Missing proposal.md")
                    .at(rel_path(ctx, proposal)),
            );
            continue;
        };

        let mut score = 1.0f64;
        for section in PROPOSAL_SECTIONS {
            if !content.contains(section) {
                score -= 0.2;
                issues.push(
                    ValidationIssue::new(
                        Severity::Warning,
                        COMPONENT,
                        format!("Missing required section: {section}"),
                    )
                    .at(rel_path(ctx, &proposal_md)),
                );
            }
        }

        let tasks_md = proposal.join("tasks.md");
        if let Some(tasks) = read_opt(&tasks_md) {
            if !tasks.contains("- [") {
                score = score.min(0.7);
                issues.push(
                    ValidationIssue::new(
                        Severity::Info,
                        COMPONENT,
                        "tasks.md has no checklist items",
                    )
                    .at(rel_path(ctx, &tasks_md)),
                );
            }
        }
        scores.push(score.max(0.0));
    }

    let score = scores.iter().sum::<f64>() / scores.len() as f64;
    let mut metrics = Map::new();
    metrics.insert("proposals".into(), json!(proposals.len()));
    ValidationResult::new(COMPONENT, status_for(score, 0.6), score, issues, metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ctx_with_docs(dir: &Path) -> ValidatorContext {
        fs::create_dir_all(dir.join("openspec")).unwrap();
        ValidatorContext::new(dir, "openspec")
    }

    const FULL_PROJECT_MD: &str = "\
# Project Overview

- name: demo
- description: a demo
- version: 0.1.0
- author: team
- created: 2026-01-01
- last updated: 2026-02-01

## Context
text
## Domain
text
## Goals
text
## Scope
text
## Constraints
text
## Conventions
text
";

    #[test]
    fn test_project_spec_missing_file_is_critical() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        let result = check_project_specification(&ctx);
        assert_eq!(result.status, Status::Failed);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.critical_count(), 1);
    }

    #[test]
    fn test_project_spec_complete_passes() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::write(ctx.docs_root.join("project.md"), FULL_PROJECT_MD).unwrap();
        let result = check_project_specification(&ctx);
        assert_eq!(result.status, Status::Passed);
        assert_eq!(result.score, 1.0);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_project_spec_two_missing_sections() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        let trimmed = FULL_PROJECT_MD
            .replace("## Scope\ntext\n", "")
            .replace("## Constraints\ntext\n", "");
        fs::write(ctx.docs_root.join("project.md"), trimmed).unwrap();
        let result = check_project_specification(&ctx);
        assert!((result.score - (1.0 - 2.0 / 7.0)).abs() < 1e-9);
        assert_eq!(result.status, Status::Failed);
        let errors = result
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count();
        assert_eq!(errors, 2);
    }

    #[test]
    fn test_project_spec_metadata_missing_warns_only() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        let without_meta: String = FULL_PROJECT_MD
            .lines()
            .filter(|l| !l.starts_with("- "))
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(ctx.docs_root.join("project.md"), without_meta).unwrap();
        let result = check_project_specification(&ctx);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.status, Status::Passed);
        assert_eq!(result.issues.len(), 6);
        assert!(result
            .issues
            .iter()
            .all(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_architecture_absent_specs_dir_opts_out() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        assert!(check_system_architecture(&ctx).is_none());
    }

    #[test]
    fn test_architecture_no_documents_is_partial() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::create_dir_all(ctx.docs_root.join("specs")).unwrap();
        let result = check_system_architecture(&ctx).unwrap();
        assert_eq!(result.status, Status::Partial);
        assert_eq!(result.score, 0.5);
    }

    #[test]
    fn test_architecture_full_document_passes() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::create_dir_all(ctx.docs_root.join("specs")).unwrap();
        fs::write(
            ctx.docs_root.join("specs/system-architecture.md"),
            "## Components\n## Dependencies\n## Data Flow\n## Interfaces\n```mermaid\ngraph TD\n```\n",
        )
        .unwrap();
        let result = check_system_architecture(&ctx).unwrap();
        assert_eq!(result.status, Status::Passed);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_schema_absent_is_gentle_partial() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        let result = check_database_schema(&ctx);
        assert_eq!(result.status, Status::Partial);
        assert_eq!(result.score, 0.8);
    }

    #[test]
    fn test_schema_sql_without_primary_key() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::write(
            ctx.project_root.join("schema.sql"),
            "CREATE TABLE users (id INTEGER, name TEXT);",
        )
        .unwrap();
        let result = check_database_schema(&ctx);
        assert!(result
            .issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.description.contains("PRIMARY KEY")));
        assert!((result.score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_security_absent_is_critical() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        let result = check_security_considerations(&ctx);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.critical_count(), 1);
    }

    #[test]
    fn test_security_topic_coverage_scored() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::write(
            ctx.docs_root.join("security.md"),
            "## Authentication\n## Authorization\n## Data Encryption\n## Input Validation\n## Error Handling\n",
        )
        .unwrap();
        let result = check_security_considerations(&ctx);
        assert!((result.score - 5.0 / 6.0).abs() < 1e-9);
        assert_eq!(result.status, Status::Passed);
        // The one missing topic is the auditing one, which only warns
        assert!(result
            .issues
            .iter()
            .all(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_deployment_invalid_yaml_is_critical() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::write(
            ctx.project_root.join("docker-compose.yml"),
            "services:\n  web:\n   image: [unterminated",
        )
        .unwrap();
        let result = check_deployment_configuration(&ctx);
        assert_eq!(result.critical_count(), 1);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_deployment_script_checks() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::create_dir_all(ctx.project_root.join("scripts")).unwrap();
        fs::write(
            ctx.project_root.join("scripts/deploy.sh"),
            "#!/bin/bash\nset -e\nif [ \"$1\" == \"--help\" ]; then exit 0; fi\n[ -z \"$1\" ] && exit 1\n",
        )
        .unwrap();
        let result = check_deployment_configuration(&ctx);
        assert_eq!(result.score, 1.0);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_deployment_mid_score_fails() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::create_dir_all(ctx.project_root.join("scripts")).unwrap();
        // No set -e and no --help handling: 1.0 - 0.2 - 0.1
        fs::write(
            ctx.project_root.join("scripts/deploy.sh"),
            "#!/bin/bash\n[ -z \"$1\" ] && exit 1\ncp \"$1\" /srv/app\n",
        )
        .unwrap();
        let result = check_deployment_configuration(&ctx);
        assert!((result.score - 0.7).abs() < 1e-9);
        assert_eq!(result.status, Status::Failed);
    }

    #[test]
    fn test_schema_low_score_is_partial() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::write(
            ctx.docs_root.join("database-schema.md"),
            "No structured sections here.\n",
        )
        .unwrap();
        // All three document sections missing: 1.0 - 3 * 0.2
        let result = check_database_schema(&ctx);
        assert!((result.score - 0.4).abs() < 1e-9);
        assert_eq!(result.status, Status::Partial);
    }

    #[test]
    fn test_change_proposals_vacuous_pass() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        let result = check_change_proposals(&ctx);
        assert_eq!(result.status, Status::Passed);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_change_proposal_missing_file_errors() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::create_dir_all(ctx.docs_root.join("changes/add-auth")).unwrap();
        let result = check_change_proposals(&ctx);
        assert_eq!(result.score, 0.0);
        assert!(result
            .issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.description.contains("proposal.md")));
    }

    #[test]
    fn test_change_proposal_tasks_without_checklist_capped() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        let proposal = ctx.docs_root.join("changes/add-auth");
        fs::create_dir_all(&proposal).unwrap();
        fs::write(
            proposal.join("proposal.md"),
            "## Summary\n## Motivation\n## Changes\n## Impact\n",
        )
        .unwrap();
        fs::write(proposal.join("tasks.md"), "just prose, no boxes\n").unwrap();
        let result = check_change_proposals(&ctx);
        assert!((result.score - 0.7).abs() < 1e-9);
    }
}
