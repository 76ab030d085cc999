//! Spec-versus-implementation coverage and cross-document consistency.

use super::{glob_sorted, ValidatorContext};
use crate::models::validation::{Severity, ValidationIssue, ValidationResult};
use crate::models::Status;
use regex::Regex;
use serde_json::{json, Map};
use std::collections::BTreeMap;
use std::fs;
use tracing::warn;

/// Line-weighted coverage below this bar fails the category.
const COVERAGE_BAR: f64 = 0.7;

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            warn!(pattern, %err, "skipping unusable pattern");
            None
        }
    }
}

/// Lines carrying code: blanks and comment lines do not weigh in.
fn code_lines(content: &str) -> usize {
    content
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .count()
}

/// Measure how much of the implementation the documentation mentions.
///
/// Every source module contributes its code-line count; a module counts
/// as covered when its stem appears anywhere in the documentation text.
/// A project with no source files passes vacuously.
pub fn check_spec_completeness(ctx: &ValidatorContext) -> ValidationResult {
    const COMPONENT: &str = "spec_completeness";
    let sources = glob_sorted(&format!("{}/src/**/*.py", ctx.project_root.display()));
    if sources.is_empty() {
        let mut metrics = Map::new();
        metrics.insert("implementation_files".into(), json!(0));
        return ValidationResult::new(COMPONENT, Status::Passed, 1.0, Vec::new(), metrics);
    }

    let spec_text: String = glob_sorted(&format!("{}/**/*.md", ctx.docs_root.display()))
        .iter()
        .filter_map(|f| fs::read_to_string(f).ok())
        .collect();

    let mut total_lines = 0usize;
    let mut covered_lines = 0usize;
    let mut uncovered: Vec<String> = Vec::new();
    for file in &sources {
        let content = fs::read_to_string(file).unwrap_or_default();
        let lines = code_lines(&content);
        total_lines += lines;
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if stem != "__init__" && spec_text.contains(&stem) {
            covered_lines += lines;
        } else if stem != "__init__" {
            uncovered.push(stem);
        }
    }

    let coverage = if total_lines > 0 {
        covered_lines as f64 / total_lines as f64
    } else {
        1.0
    };

    let mut issues = Vec::new();
    let status = if coverage < COVERAGE_BAR {
        issues.push(
            ValidationIssue::new(
                Severity::Warning,
                COMPONENT,
                format!(
                    "Only {:.0}% of implementation lines are covered by the documentation",
                    coverage * 100.0
                ),
            )
            .suggest(format!("Document the modules: {}", uncovered.join(", "))),
        );
        Status::Failed
    } else {
        Status::Passed
    };

    let mut metrics = Map::new();
    metrics.insert("implementation_files".into(), json!(sources.len()));
    metrics.insert("total_lines".into(), json!(total_lines));
    metrics.insert("covered_lines".into(), json!(covered_lines));
    metrics.insert("coverage".into(), json!(coverage));
    ValidationResult::new(COMPONENT, status, coverage, issues, metrics)
}

/// Heading names recognized for the naming cross-check.
const HEADING_PATTERN: &str = r"##\s+([A-Z][a-zA-Z0-9\s]+)";

/// Flag component names spelled inconsistently across spec documents.
///
/// Fewer than two spec files cannot conflict and pass vacuously.
/// Headings are grouped by a normalized form (lowercase, alphanumerics
/// only); each group holding more than one distinct spelling deducts
/// 0.1, no matter where the variants live.
pub fn check_spec_consistency(ctx: &ValidatorContext) -> ValidationResult {
    const COMPONENT: &str = "spec_consistency";
    let files = glob_sorted(&format!("{}/specs/**/*.md", ctx.docs_root.display()));
    let mut metrics = Map::new();
    metrics.insert("spec_files".into(), json!(files.len()));
    if files.len() < 2 {
        return ValidationResult::new(COMPONENT, Status::Passed, 1.0, Vec::new(), metrics);
    }

    let Some(heading_re) = compile(HEADING_PATTERN) else {
        return ValidationResult::new(COMPONENT, Status::Passed, 1.0, Vec::new(), metrics);
    };

    // normalized name -> distinct spellings seen anywhere
    let mut spellings: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut names_found = 0usize;
    for file in &files {
        let content = fs::read_to_string(file).unwrap_or_default();
        for caps in heading_re.captures_iter(&content) {
            let Some(m) = caps.get(1) else { continue };
            let name = m.as_str().trim().to_string();
            let normalized: String = name
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_lowercase();
            names_found += 1;
            let variants = spellings.entry(normalized).or_default();
            if !variants.contains(&name) {
                variants.push(name);
            }
        }
    }

    let mut issues = Vec::new();
    let mut score = 1.0f64;
    let mut inconsistencies = 0usize;
    for variants in spellings.values() {
        if variants.len() > 1 {
            score -= 0.1;
            inconsistencies += 1;
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    COMPONENT,
                    format!("Inconsistent naming: {}", variants.join(", ")),
                )
                .suggest("Use one spelling for each component across the documents"),
            );
        }
    }

    let score = score.max(0.0);
    let status = if score >= 0.8 {
        Status::Passed
    } else {
        Status::Failed
    };
    metrics.insert("names_found".into(), json!(names_found));
    metrics.insert("naming_inconsistencies".into(), json!(inconsistencies));
    ValidationResult::new(COMPONENT, status, score, issues, metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn ctx_with_docs(dir: &Path) -> ValidatorContext {
        fs::create_dir_all(dir.join("openspec")).unwrap();
        ValidatorContext::new(dir, "openspec")
    }

    #[test]
    fn test_completeness_vacuous_without_sources() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        let result = check_spec_completeness(&ctx);
        assert_eq!(result.status, Status::Passed);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_completeness_line_weighted() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::create_dir_all(ctx.project_root.join("src")).unwrap();
        // 8 documented code lines, 2 undocumented; blanks and comments
        // carry no weight
        fs::write(
            ctx.project_root.join("src/sync_engine.py"),
            format!("{}\n# helper notes\n", "a\n".repeat(8)),
        )
        .unwrap();
        fs::write(ctx.project_root.join("src/scratch.py"), "b\n".repeat(2)).unwrap();
        fs::write(
            ctx.docs_root.join("project.md"),
            "The sync_engine module handles synchronization.\n",
        )
        .unwrap();

        let result = check_spec_completeness(&ctx);
        assert!((result.score - 0.8).abs() < 1e-9);
        assert_eq!(result.status, Status::Passed);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_completeness_below_bar_fails() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::create_dir_all(ctx.project_root.join("src")).unwrap();
        fs::write(ctx.project_root.join("src/engine.py"), "x\n".repeat(10)).unwrap();

        let result = check_spec_completeness(&ctx);
        assert_eq!(result.status, Status::Failed);
        assert_eq!(result.score, 0.0);
        assert!(result.issues[0].description.contains("0%"));
        assert!(result.issues[0].suggestion.contains("engine"));
    }

    #[test]
    fn test_consistency_vacuous_with_one_file() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::create_dir_all(ctx.docs_root.join("specs")).unwrap();
        fs::write(ctx.docs_root.join("specs/a.md"), "## Topic\n").unwrap();
        let result = check_spec_consistency(&ctx);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.status, Status::Passed);
    }

    #[test]
    fn test_consistency_identical_headings_are_clean() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::create_dir_all(ctx.docs_root.join("specs")).unwrap();
        fs::write(ctx.docs_root.join("specs/a.md"), "## Components\n## Alpha\n").unwrap();
        fs::write(ctx.docs_root.join("specs/b.md"), "## Components\n## Beta\n").unwrap();

        let result = check_spec_consistency(&ctx);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.status, Status::Passed);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_consistency_flags_spelling_variants() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::create_dir_all(ctx.docs_root.join("specs")).unwrap();
        // Both spellings in one file still count as one inconsistency
        fs::write(
            ctx.docs_root.join("specs/a.md"),
            "## Sync Model\n## SyncModel\n",
        )
        .unwrap();
        fs::write(ctx.docs_root.join("specs/b.md"), "## Other\n").unwrap();

        let result = check_spec_consistency(&ctx);
        assert!((result.score - 0.9).abs() < 1e-9);
        assert_eq!(result.issues.len(), 1);
        assert!(result.issues[0].description.contains("SyncModel"));
        assert!(result.issues[0].description.contains("Sync Model"));
    }

    #[test]
    fn test_consistency_low_score_fails() {
        let dir = tempdir().unwrap();
        let ctx = ctx_with_docs(dir.path());
        fs::create_dir_all(ctx.docs_root.join("specs")).unwrap();
        fs::write(
            ctx.docs_root.join("specs/a.md"),
            "## Sync Model\n## Merge Policy\n## Peer Index\n",
        )
        .unwrap();
        fs::write(
            ctx.docs_root.join("specs/b.md"),
            "## SyncModel\n## MergePolicy\n## PeerIndex\n",
        )
        .unwrap();

        let result = check_spec_consistency(&ctx);
        assert!((result.score - 0.7).abs() < 1e-9);
        assert_eq!(result.status, Status::Failed);
        assert_eq!(result.issues.len(), 3);
    }
}
