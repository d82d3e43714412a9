//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - checks the access gate
//! - runs the projection pipeline
//! - prints tables, metric cards, charts or JSON

use clap::Parser;

use crate::cli::gate::AccessGate;
use crate::cli::{Command, ProjectArgs, ScenarioArgs, SummaryArgs};
use crate::domain::{DashboardView, VarianceBounds, baseline};
use crate::error::AppError;
use crate::logging::{self, LogTarget};
use crate::report::LiquidityWalk;

pub mod pipeline;

/// Entry point for the `reclaim` binary.
pub fn run() -> Result<(), AppError> {
    // We want `reclaim` and `reclaim --volume 10` to behave like `reclaim tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Project(args) => handle_project(args),
        Command::Summary(args) => handle_summary(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn run_scenario(args: &ScenarioArgs) -> Result<pipeline::RunOutput, AppError> {
    AccessGate::from_env().require(args.access_code.as_deref())?;
    let run = pipeline::run_projection(
        &baseline::calibrated(),
        &args.plan(),
        &VarianceBounds::default(),
        args.strict,
    )?;
    Ok(run)
}

fn handle_project(args: ProjectArgs) -> Result<(), AppError> {
    logging::init(LogTarget::Stderr);
    let run = run_scenario(&args.scenario)?;

    if args.json {
        println!("{}", to_json(&run)?);
        return Ok(());
    }

    print!("{}", crate::report::format_scenario_header(&run.plan, &run.clamped));
    print!("{}", crate::report::format_results_table(&run.results));
    if args.detail {
        println!();
        print!("{}", crate::report::format_operations_table(&run.results));
    }

    if let Some(view) = args.plot {
        let chart = match view {
            DashboardView::Revenue => crate::plot::revenue_chart(&run.results),
            DashboardView::Cash => crate::plot::cash_chart(&run.results),
        };
        println!();
        print!("{}", crate::plot::render_bar_chart(&chart, args.width, args.height));
    }

    Ok(())
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    logging::init(LogTarget::Stderr);
    let run = run_scenario(&args.scenario)?;
    let walk = LiquidityWalk::for_year(&run.results[1]);

    if args.json {
        let value = match args.view {
            DashboardView::Revenue => serde_json::json!({
                "view": args.view,
                "summary": run.summary,
            }),
            DashboardView::Cash => serde_json::json!({
                "view": args.view,
                "summary": run.summary,
                "liquidity_walk": walk,
            }),
        };
        println!("{}", to_json(&value)?);
        return Ok(());
    }

    print!("{}", crate::report::format_scenario_header(&run.plan, &run.clamped));
    print!("{}", crate::report::format_metrics(&run.summary, args.view));
    if args.view == DashboardView::Cash {
        println!();
        print!("{}", crate::report::format_liquidity_walk(&walk));
    }
    Ok(())
}

fn handle_tui(args: ScenarioArgs) -> Result<(), AppError> {
    logging::init(LogTarget::Quiet);
    crate::tui::run(args)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::new(4, format!("Failed to render JSON: {e}")))
}

/// Rewrite argv so `reclaim` defaults to `reclaim tui`.
///
/// Rules:
/// - `reclaim`                       -> `reclaim tui`
/// - `reclaim --volume 10 ...`       -> `reclaim tui --volume 10 ...`
/// - `reclaim --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "project" | "summary" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_launches_tui() {
        assert_eq!(rewrite_args(args(&["reclaim"])), args(&["reclaim", "tui"]));
        assert_eq!(
            rewrite_args(args(&["reclaim", "--volume", "10"])),
            args(&["reclaim", "tui", "--volume", "10"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewrite_args(args(&["reclaim", "project"])), args(&["reclaim", "project"]));
        assert_eq!(rewrite_args(args(&["reclaim", "--help"])), args(&["reclaim", "--help"]));
    }
}
