//! Command-line parsing for the scenario model.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the projection code.

use clap::{Args, Parser, Subcommand};

use crate::domain::{DashboardView, Knob, ScenarioInput, ScenarioPlan, YEARS};
use crate::error::ScenarioError;

pub mod gate;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "reclaim",
    version,
    about = "Backroads Reclamation scenario model (three-year revenue, cost and cash projection)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Project all three years and print the raw financial data table.
    Project(ProjectArgs),
    /// Print the metric cards for one dashboard view.
    Summary(SummaryArgs),
    /// Launch the interactive dashboard.
    ///
    /// Sliders, per-year tabs and charts over the same projection used by
    /// `reclaim project`, rendered in a terminal UI using Ratatui.
    Tui(ScenarioArgs),
}

/// Scenario knobs, in whole percent like the dashboard sliders.
#[derive(Debug, Args, Clone, Default)]
pub struct ScenarioArgs {
    /// Volume variance (%): homes processed. Also scales direct cost.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, value_name = "PCT")]
    pub volume: f64,

    /// Lumber price variance (%).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, value_name = "PCT")]
    pub price: f64,

    /// Recovery yield variance (%).
    #[arg(long = "yield", default_value_t = 0.0, allow_negative_numbers = true, value_name = "PCT")]
    pub yield_: f64,

    /// Direct cost variance (%).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, value_name = "PCT")]
    pub cost: f64,

    /// Premium mix shift (%): premium share up, industrial share down.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, value_name = "PCT")]
    pub mix_shift: f64,

    /// Tipping fee variance (%).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, value_name = "PCT")]
    pub tipping_fee: f64,

    /// Per-year override, e.g. `2:price=15` (repeatable).
    #[arg(long = "override", value_name = "YEAR:KNOB=PCT", value_parser = parse_override)]
    pub overrides: Vec<YearOverride>,

    /// Reject out-of-range inputs instead of clamping them.
    #[arg(long)]
    pub strict: bool,

    /// Shared access code (prompted for when required and not given).
    #[arg(long, value_name = "CODE")]
    pub access_code: Option<String>,
}

/// Options for `reclaim project`.
#[derive(Debug, Args, Clone)]
pub struct ProjectArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Print machine-readable JSON instead of tables.
    #[arg(long)]
    pub json: bool,

    /// Also print the per-year operations table (homes, recovery, mix).
    #[arg(long)]
    pub detail: bool,

    /// Render an ASCII chart for the given view.
    #[arg(long, value_enum)]
    pub plot: Option<DashboardView>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}

/// Options for `reclaim summary`.
#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Which dashboard's metrics to print.
    #[arg(long, value_enum, default_value_t = DashboardView::Revenue)]
    pub view: DashboardView,

    /// Print machine-readable JSON instead of metric cards.
    #[arg(long)]
    pub json: bool,
}

/// One `--override YEAR:KNOB=PCT`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearOverride {
    /// 1-based.
    pub year: usize,
    pub knob: Knob,
    /// Whole percent.
    pub pct: f64,
}

pub fn parse_override(raw: &str) -> Result<YearOverride, ScenarioError> {
    let invalid = || ScenarioError::InvalidOverride(raw.to_string());

    let (year, rest) = raw.split_once(':').ok_or_else(invalid)?;
    let (knob, pct) = rest.split_once('=').ok_or_else(invalid)?;

    let year: usize = year.trim().parse().map_err(|_| invalid())?;
    if !(1..=YEARS).contains(&year) {
        return Err(invalid());
    }
    let knob = Knob::from_key(knob).ok_or_else(invalid)?;
    let pct: f64 = pct.trim().trim_end_matches('%').parse().map_err(|_| invalid())?;
    if !pct.is_finite() {
        return Err(invalid());
    }

    Ok(YearOverride { year, knob, pct })
}

impl ScenarioArgs {
    /// Global input in fractions.
    pub fn global_input(&self) -> ScenarioInput {
        ScenarioInput {
            volume: self.volume / 100.0,
            price: self.price / 100.0,
            yield_: self.yield_ / 100.0,
            cost: self.cost / 100.0,
            mix_shift: self.mix_shift / 100.0,
            tipping_fee: self.tipping_fee / 100.0,
        }
    }

    /// The plan described by the flags (unvalidated).
    pub fn plan(&self) -> ScenarioPlan {
        let mut plan = ScenarioPlan::uniform(self.global_input());
        for o in &self.overrides {
            plan.set_override(o.year - 1, o.knob, o.pct / 100.0);
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_override() {
        let o = parse_override("2:price=15").unwrap();
        assert_eq!(o, YearOverride { year: 2, knob: Knob::Price, pct: 15.0 });

        let o = parse_override("3:mix_shift=-7.5%").unwrap();
        assert_eq!(o, YearOverride { year: 3, knob: Knob::MixShift, pct: -7.5 });
    }

    #[test]
    fn rejects_bad_overrides() {
        for raw in ["price=15", "4:price=15", "0:price=1", "1:speed=3", "1:price=abc", "1:price=NaN"] {
            assert!(parse_override(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn plan_from_flags() {
        let cli = Cli::parse_from([
            "reclaim", "project", "--volume", "-10", "--override", "3:cost=20", "--override", "1:yield=5",
        ]);
        let Command::Project(args) = cli.command else {
            panic!("expected project");
        };
        let plan = args.scenario.plan();
        assert_eq!(plan.global.volume, -0.1);
        assert_eq!(plan.input_for(2).cost, 0.2);
        assert_eq!(plan.input_for(0).yield_, 0.05);
        assert_eq!(plan.input_for(1).cost, 0.0);
    }
}
