//! Shared "projection pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! guard inputs (clamp or reject) -> project -> summary metrics
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use serde::Serialize;
use tracing::debug;

use crate::domain::{ScenarioPlan, VarianceBounds, YEARS, YearBaseline, YearResult};
use crate::engine::{ClampEvent, clamp_plan, project, validate_plan};
use crate::error::ScenarioError;
use crate::report::Summary;

/// All computed outputs of a single projection run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    /// The plan actually projected (after clamping).
    pub plan: ScenarioPlan,
    pub clamped: Vec<ClampEvent>,
    pub results: [YearResult; YEARS],
    pub summary: Summary,
}

/// Bring `plan` within `bounds`.
///
/// Strict mode rejects the first out-of-range knob; otherwise knobs are clamped
/// like a slider would. Either way a plan whose mix shift drives a grade share
/// negative is rejected.
pub fn prepare_plan(
    baselines: &[YearBaseline; YEARS],
    plan: &ScenarioPlan,
    bounds: &VarianceBounds,
    strict: bool,
) -> Result<(ScenarioPlan, Vec<ClampEvent>), ScenarioError> {
    let (plan, clamped) = if strict {
        (*plan, Vec::new())
    } else {
        clamp_plan(plan, bounds)
    };
    validate_plan(baselines, &plan, bounds)?;
    Ok((plan, clamped))
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_projection(
    baselines: &[YearBaseline; YEARS],
    plan: &ScenarioPlan,
    bounds: &VarianceBounds,
    strict: bool,
) -> Result<RunOutput, ScenarioError> {
    let (plan, clamped) = prepare_plan(baselines, plan, bounds, strict)?;
    debug!(?plan, clamped = clamped.len(), "projecting scenario");

    let results = project(baselines, &plan);
    let summary = Summary::from_results(&results)?;

    Ok(RunOutput {
        plan,
        clamped,
        results,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Knob, ScenarioInput, baseline};

    #[test]
    fn lenient_run_clamps_and_reports() {
        let plan = ScenarioPlan::uniform(ScenarioInput::zero().with(Knob::Volume, 0.9));
        let run = run_projection(&baseline::calibrated(), &plan, &VarianceBounds::default(), false).unwrap();
        assert_eq!(run.plan.global.volume, 0.5);
        assert_eq!(run.clamped.len(), 1);
        assert_eq!(run.results[2].homes_adjusted, 1800.0);
    }

    #[test]
    fn strict_run_rejects() {
        let plan = ScenarioPlan::uniform(ScenarioInput::zero().with(Knob::Volume, 0.9));
        let err = run_projection(&baseline::calibrated(), &plan, &VarianceBounds::default(), true).unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidScenarioInput { knob: Knob::Volume, .. }));
    }

    #[test]
    fn base_case_run_matches_direct_projection() {
        let baselines = baseline::calibrated();
        let run = run_projection(&baselines, &ScenarioPlan::default(), &VarianceBounds::default(), true).unwrap();
        assert_eq!(run.results, project(&baselines, &ScenarioPlan::default()));
        assert!(run.clamped.is_empty());
    }
}
