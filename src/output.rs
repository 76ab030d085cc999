//! Output rendering for the run, validate, and ux commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form is the
//! same serialization that lands in the report files.

use crate::models::suite::CategoryResult;
use crate::models::ux::UxReport;
use crate::models::validation::{Severity, SpecReport};
use crate::models::Status;
use crate::report::RunReport;
use owo_colors::OwoColorize;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Colored `error:` prefix for CLI diagnostics.
pub fn error_prefix() -> String {
    if std::env::var_os("NO_COLOR").is_none() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Colored `note:` prefix for CLI diagnostics.
pub fn note_prefix() -> String {
    if std::env::var_os("NO_COLOR").is_none() {
        "note:".blue().bold().to_string()
    } else {
        "note:".to_string()
    }
}

fn status_tag(status: Status, color: bool) -> String {
    if !color {
        return format!("[{status}]");
    }
    match status {
        Status::Passed => format!("[{status}]").green().bold().to_string(),
        Status::Failed => format!("[{status}]").red().bold().to_string(),
        Status::Partial => format!("[{status}]").yellow().bold().to_string(),
        Status::Skipped => format!("[{status}]").bright_black().to_string(),
    }
}

fn to_json_string<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Print the consolidated run report in the requested format.
pub fn print_run(report: &RunReport, output: &str) {
    match output {
        "json" => println!("{}", to_json_string(report)),
        _ => {
            let color = use_colors(output);
            for r in &report.results {
                print_category_line(r, color);
            }
            let m = &report.metrics;
            let summary = format!(
                "— Summary — passed={} failed={} skipped={} success_rate={:.0}% duration={:.1}s",
                m.passed,
                m.failed,
                m.skipped,
                m.success_rate * 100.0,
                m.total_duration_secs
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

fn print_category_line(r: &CategoryResult, color: bool) {
    let tag = status_tag(r.status, color);
    let title = if color {
        r.category.title().bold().to_string()
    } else {
        r.category.title()
    };
    match &r.error {
        Some(err) => println!("{} {} ({:.1}s) — {}", tag, title, r.duration_secs, err),
        None => println!("{} {} ({:.1}s)", tag, title, r.duration_secs),
    }
}

/// Print the documentation-validation report in the requested format.
pub fn print_validation(report: &SpecReport, output: &str) {
    match output {
        "json" => println!("{}", to_json_string(report)),
        _ => {
            let color = use_colors(output);
            for result in &report.results {
                let tag = status_tag(result.status, color);
                println!(
                    "{} {} ({:.0}%)",
                    tag,
                    result.component,
                    result.score * 100.0
                );
                for issue in &result.issues {
                    let sev = severity_tag(issue.severity, color);
                    match &issue.file {
                        Some(file) => println!("  {} {} ({})", sev, issue.description, file),
                        None => println!("  {} {}", sev, issue.description),
                    }
                }
            }
            let summary = format!(
                "— Summary — score={:.0}% components={} critical={}",
                report.overall_score * 100.0,
                report.total_components,
                report.critical_issues
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
            for rec in &report.recommendations {
                println!("  • {}", rec);
            }
        }
    }
}

fn severity_tag(severity: Severity, color: bool) -> String {
    let label = match severity {
        Severity::Critical => "⟦critical⟧",
        Severity::Error => "⟦error⟧",
        Severity::Warning => "⟦warn⟧",
        Severity::Info => "⟦info⟧",
    };
    if !color {
        return label.to_string();
    }
    match severity {
        Severity::Critical | Severity::Error => label.red().bold().to_string(),
        Severity::Warning => label.yellow().bold().to_string(),
        Severity::Info => label.blue().bold().to_string(),
    }
}

/// Print the UX probe report in the requested format.
pub fn print_ux(report: &UxReport, output: &str) {
    match output {
        "json" => println!("{}", to_json_string(report)),
        _ => {
            let color = use_colors(output);
            for r in &report.usability {
                let tag = status_tag(r.status, color);
                println!(
                    "{} {} ({}/{} steps, score {:.0}%)",
                    tag,
                    r.name,
                    r.steps_completed,
                    r.total_steps,
                    r.overall_score * 100.0
                );
            }
            for r in &report.accessibility {
                let tag = status_tag(r.status, color);
                println!(
                    "{} {} ({} violations)",
                    tag,
                    r.name,
                    r.violations.total()
                );
            }
            for r in &report.performance {
                let tag = status_tag(r.status, color);
                if r.failures.is_empty() {
                    println!("{} {}", tag, r.name);
                } else {
                    println!("{} {} — {}", tag, r.name, r.failures.join("; "));
                }
            }
            let summary = format!(
                "— Summary — passed={} failed={} skipped={} of {}",
                report.passed_tests, report.failed_tests, report.skipped_tests, report.total_tests
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
            for rec in &report.recommendations {
                println!("  • {}", rec);
            }
        }
    }
}
