//! Input guards in front of the projection.
//!
//! The projection accepts any real input. These helpers are the control-layer
//! side of the contract: reject (strict) or clamp (slider-like) before
//! projecting.

use serde::Serialize;
use tracing::warn;

use crate::domain::{Knob, ScenarioInput, ScenarioPlan, VarianceBounds, YEARS, YearBaseline};
use crate::error::ScenarioError;

use super::mix::adjusted_mix;

/// A knob that was pulled back into its declared range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClampEvent {
    /// `None` for the global input, else the 1-based year of the override.
    pub year: Option<usize>,
    pub knob: Knob,
    pub requested: f64,
    pub applied: f64,
}

/// Check a single input against the declared ranges.
pub fn validate_input(
    input: &ScenarioInput,
    year: Option<usize>,
    bounds: &VarianceBounds,
) -> Result<(), ScenarioError> {
    for knob in Knob::ALL {
        let value = input.get(knob);
        let range = bounds.range(knob);
        if !range.contains(value) {
            return Err(ScenarioError::InvalidScenarioInput {
                knob,
                year,
                value,
                min: range.min,
                max: range.max,
            });
        }
    }
    Ok(())
}

/// Check the whole plan: declared ranges, then non-negative grade shares.
pub fn validate_plan(
    baselines: &[YearBaseline; YEARS],
    plan: &ScenarioPlan,
    bounds: &VarianceBounds,
) -> Result<(), ScenarioError> {
    validate_input(&plan.global, None, bounds)?;
    for (i, baseline) in baselines.iter().enumerate() {
        let year = i + 1;
        let input = plan.input_for(i);
        if !plan.overrides[i].is_empty() {
            validate_input(&input, Some(year), bounds)?;
        }

        let mix = adjusted_mix(&baseline.product_mix, input.mix_shift);
        if let Some((grade, share)) = mix.grades().into_iter().find(|(_, s)| *s < 0.0) {
            return Err(ScenarioError::NegativeShare {
                year,
                grade,
                mix_shift: input.mix_shift,
                share,
            });
        }
    }
    Ok(())
}

/// Clamp the global input and every override into range.
pub fn clamp_plan(plan: &ScenarioPlan, bounds: &VarianceBounds) -> (ScenarioPlan, Vec<ClampEvent>) {
    let mut out = *plan;
    let mut events = Vec::new();

    let (global, moved) = bounds.clamp(plan.global);
    for knob in moved {
        events.push(ClampEvent {
            year: None,
            knob,
            requested: plan.global.get(knob),
            applied: global.get(knob),
        });
    }
    out.global = global;

    for year in 0..YEARS {
        for knob in Knob::ALL {
            let Some(requested) = plan.overrides[year].get(knob) else {
                continue;
            };
            let applied = bounds.range(knob).clamp(requested);
            if applied != requested {
                out.set_override(year, knob, applied);
                events.push(ClampEvent {
                    year: Some(year + 1),
                    knob,
                    requested,
                    applied,
                });
            }
        }
    }

    for e in &events {
        warn!(
            knob = e.knob.key(),
            year = ?e.year,
            requested = e.requested,
            applied = e.applied,
            "scenario input clamped to declared range"
        );
    }

    (out, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{KnobRange, baseline};

    #[test]
    fn base_case_is_valid() {
        let plan = ScenarioPlan::default();
        assert!(validate_plan(&baseline::calibrated(), &plan, &VarianceBounds::default()).is_ok());
    }

    #[test]
    fn out_of_range_override_names_its_year() {
        let mut plan = ScenarioPlan::default();
        plan.set_override(2, Knob::Volume, -0.9);
        let err = validate_plan(&baseline::calibrated(), &plan, &VarianceBounds::default()).unwrap_err();
        assert_eq!(
            err,
            ScenarioError::InvalidScenarioInput {
                knob: Knob::Volume,
                year: Some(3),
                value: -0.9,
                min: -0.5,
                max: 0.5,
            }
        );
    }

    #[test]
    fn negative_shares_are_rejected() {
        let bounds = VarianceBounds {
            mix_shift: KnobRange::symmetric(5.0),
            ..VarianceBounds::default()
        };
        let reject = |shift: f64| {
            let plan = ScenarioPlan::uniform(ScenarioInput::zero().with(Knob::MixShift, shift));
            validate_plan(&baseline::calibrated(), &plan, &bounds).unwrap_err()
        };

        assert!(matches!(
            reject(1.5),
            ScenarioError::NegativeShare { year: 1, grade: "industrial", .. }
        ));
        assert!(matches!(
            reject(2.0),
            ScenarioError::NegativeShare { year: 1, grade: "builder", .. }
        ));
        assert!(matches!(
            reject(-1.2),
            ScenarioError::NegativeShare { year: 1, grade: "premium", .. }
        ));
    }

    #[test]
    fn declared_mix_range_never_goes_negative() {
        let bounds = VarianceBounds::default();
        for shift in [bounds.mix_shift.min, bounds.mix_shift.max] {
            let plan = ScenarioPlan::uniform(ScenarioInput::zero().with(Knob::MixShift, shift));
            assert!(validate_plan(&baseline::calibrated(), &plan, &bounds).is_ok());
        }
    }

    #[test]
    fn clamp_plan_records_global_and_override_events() {
        let mut plan = ScenarioPlan::uniform(ScenarioInput::zero().with(Knob::Yield, 0.4));
        plan.set_override(0, Knob::Cost, 0.9);
        plan.set_override(1, Knob::Price, 0.1);

        let (clamped, events) = clamp_plan(&plan, &VarianceBounds::default());
        assert_eq!(clamped.global.yield_, 0.25);
        assert_eq!(clamped.input_for(0).cost, 0.5);
        assert_eq!(clamped.input_for(1).price, 0.1);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].year, None);
        assert_eq!(events[1].year, Some(1));
        assert!(validate_plan(&baseline::calibrated(), &clamped, &VarianceBounds::default()).is_ok());
    }
}
