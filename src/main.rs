//! Vantage CLI binary entry point.
//! Resolves configuration, dispatches to the runner/validator/harness, and
//! maps report gates onto process exit codes.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vantage::cli::{Cli, Commands};
use vantage::{config, output, report, runner, ux, validator};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Run {
            categories,
            project_root,
            report_dir,
            output: out,
        } => {
            let eff = config::resolve_effective(
                project_root.as_deref(),
                report_dir.as_deref(),
                out.as_deref(),
                None,
                None,
            );
            if eff.output != "json" && config::load_config(&eff.project_root).is_none() {
                eprintln!(
                    "{} {}",
                    output::note_prefix(),
                    "No vantage.toml found; using defaults."
                );
            }
            let ctx = runner::RunContext::from_effective(&eff);
            let results = runner::run_categories(&ctx, categories.as_deref()).await;
            let run_report = report::RunReport::new(project_name(&eff), results);
            if let Err(err) = report::write_reports(&run_report, &eff.report_dir) {
                eprintln!("{} {}", output::error_prefix(), err);
                std::process::exit(2);
            }
            output::print_run(&run_report, &eff.output);
            if !run_report.all_passed() {
                std::process::exit(1);
            }
        }
        Commands::Validate {
            project_root,
            output: out,
        } => {
            let eff = config::resolve_effective(
                project_root.as_deref(),
                None,
                out.as_deref(),
                None,
                None,
            );
            let vctx = validator::ValidatorContext::new(&eff.project_root, &eff.docs_dir);
            let spec_report = validator::validate_project(&vctx).await;
            if let Err(err) = validator::render::write_report(&spec_report, &eff.report_dir) {
                eprintln!("{} {}", output::error_prefix(), err);
                std::process::exit(2);
            }
            output::print_validation(&spec_report, &eff.output);
            if !spec_report.gate() {
                std::process::exit(1);
            }
        }
        Commands::Ux {
            project_root,
            base_url,
            driver,
            output: out,
        } => {
            let eff = config::resolve_effective(
                project_root.as_deref(),
                None,
                out.as_deref(),
                base_url.as_deref(),
                driver.as_deref(),
            );
            let harness = ux::UxHarness::new(
                ux::driver::driver_for(&eff.driver),
                eff.base_url.clone(),
            );
            let ux_report = harness.generate_report().await;
            if let Err(err) = ux::write_report(&ux_report, &eff.report_dir) {
                eprintln!("{} {}", output::error_prefix(), err);
                std::process::exit(2);
            }
            output::print_ux(&ux_report, &eff.output);
            if !ux_report.all_passed() {
                std::process::exit(1);
            }
        }
    }
}

fn project_name(eff: &config::Effective) -> String {
    eff.project_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}
