//! The per-year projection pipeline.
//!
//! homes → board-feet → mix-weighted lumber revenue → tipping/materials
//! revenue → cost → margin → cash.
//!
//! Everything here is pure: no I/O, no validation, no hidden state. Identical
//! inputs give bit-identical outputs, which is what makes "reset to base case"
//! exact.

use tracing::trace;

use crate::domain::{GradeRevenue, ScenarioInput, ScenarioPlan, YEARS, YearBaseline, YearResult};

use super::mix::adjusted_mix;

/// Project one year. `year` is 1-based and only used for labelling.
pub fn project_year(year: usize, baseline: &YearBaseline, input: &ScenarioInput) -> YearResult {
    let homes_adjusted = f64::from(baseline.homes_base) * (1.0 + input.volume);
    let recovery_adjusted = baseline.recovery_rate_base * (1.0 + input.yield_);
    let total_board_feet = homes_adjusted * baseline.board_feet_per_home * recovery_adjusted;

    let mix = adjusted_mix(&baseline.product_mix, input.mix_shift);
    let price_factor = 1.0 + input.price;
    let prices = &baseline.product_price;
    let lumber_by_grade = GradeRevenue {
        premium: total_board_feet * mix.premium * prices.premium * price_factor,
        builder: total_board_feet * mix.builder * prices.builder * price_factor,
        industrial: total_board_feet * mix.industrial * prices.industrial * price_factor,
    };
    let lumber_revenue = lumber_by_grade.total();

    let tipping_revenue = homes_adjusted * baseline.tipping_fee_per_home * (1.0 + input.tipping_fee);
    let materials_revenue = homes_adjusted * baseline.materials_rev_per_home;
    let total_revenue = lumber_revenue + tipping_revenue + materials_revenue;

    // Cost tracks throughput, then the separate cost sensitivity on top.
    let actual_cost = baseline.cost_base * (1.0 + input.volume) * (1.0 + input.cost);
    let margin = total_revenue - actual_cost;
    let cash_available = margin + baseline.era_grant;

    trace!(year, homes_adjusted, total_board_feet, total_revenue, margin, "projected year");

    YearResult {
        year,
        homes_adjusted,
        recovery_adjusted,
        total_board_feet,
        mix,
        lumber_by_grade,
        lumber_revenue,
        tipping_revenue,
        materials_revenue,
        total_revenue,
        actual_cost,
        margin,
        era_grant: baseline.era_grant,
        cash_available,
        revenue_target: baseline.revenue_target,
    }
}

/// Project all three years under `plan`.
pub fn project(baselines: &[YearBaseline; YEARS], plan: &ScenarioPlan) -> [YearResult; YEARS] {
    std::array::from_fn(|i| project_year(i + 1, &baselines[i], &plan.input_for(i)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Knob, ProductMix, ProductPrices, baseline};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * b.abs().max(1.0)
    }

    fn year3() -> YearBaseline {
        YearBaseline {
            homes_base: 1200,
            recovery_rate_base: 0.65,
            board_feet_per_home: 6615.0,
            product_mix: ProductMix {
                premium: 0.40,
                builder: 0.45,
                industrial: 0.15,
            },
            product_price: ProductPrices {
                premium: 3.86,
                builder: 2.76,
                industrial: 1.66,
            },
            tipping_fee_per_home: 1200.0,
            materials_rev_per_home: 600.0,
            cost_base: 3_015_339.0,
            era_grant: 575_000.0,
            revenue_target: 17_820_600.0,
        }
    }

    #[test]
    fn worked_year3_base_case() {
        let r = project_year(3, &year3(), &ScenarioInput::zero());
        assert!(close(r.total_board_feet, 5_159_700.0));
        assert!(close(r.lumber_revenue, 15_659_689.5));
        assert!(close(r.tipping_revenue, 1_440_000.0));
        assert!(close(r.materials_revenue, 720_000.0));
        assert!(close(r.total_revenue, 17_819_689.5));
        assert!(close(r.actual_cost, 3_015_339.0));
        assert!(close(r.margin, 14_804_350.5));
        assert!(close(r.cash_available, 15_379_350.5));
        assert_eq!(r.label(), "Year 3");
    }

    #[test]
    fn calibrated_base_case_matches_plan_to_within_a_percent() {
        let results = project(&baseline::calibrated(), &ScenarioPlan::default());
        for r in &results {
            let rel = r.variance_to_plan().abs() / r.revenue_target;
            assert!(rel < 0.01, "{} off plan by {rel}", r.label());
        }
        assert_eq!(results[0].era_grant, 0.0);
        assert_eq!(results[1].era_grant, 610_000.0);
    }

    #[test]
    fn labels_outside_the_horizon_fall_back() {
        let input = ScenarioInput::zero();
        assert_eq!(project_year(4, &year3(), &input).label(), "Year ?");
        assert_eq!(project_year(0, &year3(), &input).label(), "Year ?");
    }

    #[test]
    fn cost_scales_multiplicatively() {
        let input = ScenarioInput::zero().with(Knob::Volume, 0.2).with(Knob::Cost, 0.1);
        let r = project_year(3, &year3(), &input);
        assert!(close(r.actual_cost, 3_015_339.0 * 1.2 * 1.1));
    }

    #[test]
    fn materials_ignore_price_and_tipping_variance() {
        let input = ScenarioInput::zero()
            .with(Knob::Price, 0.3)
            .with(Knob::TippingFee, -0.2);
        let r = project_year(3, &year3(), &input);
        assert!(close(r.materials_revenue, 720_000.0));
        assert!(close(r.tipping_revenue, 1_440_000.0 * 0.8));
        assert!(close(r.lumber_revenue, 15_659_689.5 * 1.3));
    }

    #[test]
    fn yield_moves_board_feet_not_homes() {
        let input = ScenarioInput::zero().with(Knob::Yield, 0.1);
        let r = project_year(3, &year3(), &input);
        assert_eq!(r.homes_adjusted, 1200.0);
        assert!(close(r.total_board_feet, 5_159_700.0 * 1.1));
    }

    #[test]
    fn per_year_override_only_touches_that_year() {
        let baselines = baseline::calibrated();
        let base = project(&baselines, &ScenarioPlan::default());

        let mut plan = ScenarioPlan::default();
        plan.set_override(1, Knob::Price, 0.25);
        let shifted = project(&baselines, &plan);

        assert_eq!(shifted[0], base[0]);
        assert_eq!(shifted[2], base[2]);
        assert!(shifted[1].lumber_revenue > base[1].lumber_revenue);
    }
}
