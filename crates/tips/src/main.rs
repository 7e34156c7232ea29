//! `tips` -- latest commit per branch.
//!
//! Parses CLI arguments with clap, resolves the runtime context, collects
//! the branch report through the git CLI, and prints it as text or JSON.

mod cli;
mod context;
mod output;
mod report;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tips_git::adapter::GitCli;
use tips_ui::styles::{Style, styler_for};

use cli::Cli;
use context::RuntimeContext;
use report::{RenderOptions, ReportError, collect_report, render_report};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logging(cli.global.verbose);

    let ctx = match RuntimeContext::from_cli(&cli) {
        Ok(ctx) => ctx,
        Err(e) => fail(&e, cli.global.json, false),
    };

    if let Err(e) = run(&ctx) {
        fail(&e, ctx.json, ctx.color);
    }
}

/// Install a stderr subscriber when `--verbose` is given or `RUST_LOG` is
/// set. Otherwise logging stays off so stdout and stderr carry only the
/// report and its errors.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tips=debug,tips_git=debug")
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => return,
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(ctx: &RuntimeContext) -> anyhow::Result<()> {
    let report = collect_report(&GitCli, &ctx.repo_dir, ctx.fetch)?;

    if ctx.json {
        output::output_json(&report);
        return Ok(());
    }

    let options = RenderOptions {
        width: ctx.width,
        timestamp_format: ctx.timestamp_format,
        hash_length: ctx.hash_length,
    };
    let lines = render_report(&report, &ctx.repo_name, &options, styler_for(ctx.color));
    output::print_lines(&lines);
    Ok(())
}

/// Report `e` on stderr and exit with the code its kind maps to.
fn fail(e: &anyhow::Error, json: bool, color: bool) -> ! {
    let report_error = e.downcast_ref::<ReportError>();
    let code = report_error.map_or(1, ReportError::exit_code);

    if json {
        let err_json = serde_json::json!({
            "error": format!("{:#}", e),
        });
        if let Ok(s) = serde_json::to_string_pretty(&err_json) {
            eprintln!("{}", s);
        }
    } else if let Some(ReportError::Refresh(source)) = report_error {
        let label = styler_for(color).paint("Error fetching remotes:", Style::ERROR);
        eprintln!("{label}\n{source}");
    } else {
        eprintln!("Error: {:#}", e);
    }
    std::process::exit(code);
}
