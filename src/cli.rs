//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vantage",
    version,
    about = "Vantage test orchestration and reporting",
    long_about = "Vantage — run configured test-tool categories, score documentation trees, and render consolidated HTML/JSON/Markdown reports.\n\nConfiguration precedence: CLI > vantage.toml > defaults.",
    after_help = "Examples:\n  vantage run\n  vantage run --categories unit security openspec\n  vantage validate --project-root ./myproject\n  vantage ux --base-url http://localhost:3000 --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for running, validating, and probing.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current vantage version.")]
    Version,
    /// Run test categories and generate consolidated reports
    #[command(
        about = "Run test categories",
        long_about = "Launch each requested category (all by default), collect results, and write consolidated JSON/HTML/Markdown reports. Exit code is 0 only when every requested category passed.",
        after_help = "Examples:\n  vantage run\n  vantage run --categories unit integration\n  vantage run --output json"
    )]
    Run {
        #[arg(long, num_args = 1.., help = "Categories to run (default: all). Unknown names are skipped.")]
        categories: Option<Vec<String>>,
        #[arg(long, help = "Project root (default: current dir)")]
        project_root: Option<String>,
        #[arg(long, help = "Report directory relative to project root (default: test-results)")]
        report_dir: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Validate the documentation tree
    #[command(
        about = "Validate documentation",
        long_about = "Score the project's documentation root against the fixed category checklist. Exit code is 0 only with zero critical issues and an overall score of at least 0.7.",
        after_help = "Examples:\n  vantage validate\n  vantage validate --project-root ./myproject --output json"
    )]
    Validate {
        #[arg(long, help = "Project root (default: current dir)")]
        project_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Run the UX probe harness
    #[command(
        about = "Run UX probes",
        long_about = "Run usability, accessibility, and performance probes against the configured base URL through the selected browser driver. Probes report SKIPPED when no driver is configured.",
        after_help = "Examples:\n  vantage ux\n  vantage ux --base-url http://localhost:3000 --driver simulated"
    )]
    Ux {
        #[arg(long, help = "Project root (default: current dir)")]
        project_root: Option<String>,
        #[arg(long, help = "Base URL of the application under test")]
        base_url: Option<String>,
        #[arg(long, help = "Browser driver: simulated|none")]
        driver: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
