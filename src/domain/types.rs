//! Shared domain types.
//!
//! Everything here is a small `Copy` value so the projection can be evaluated
//! from any thread without synchronization, and serialized as-is for `--json`
//! output.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Number of projected years.
pub const YEARS: usize = 3;

/// Column labels used by every presentation surface.
pub const YEAR_LABELS: [&str; YEARS] = ["Year 1", "Year 2", "Year 3"];

/// One adjustable assumption of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Knob {
    Volume,
    Price,
    Yield,
    Cost,
    MixShift,
    TippingFee,
}

impl Knob {
    pub const COUNT: usize = 6;

    /// Display order of the scenario controls.
    pub const ALL: [Knob; Knob::COUNT] = [
        Knob::Volume,
        Knob::Price,
        Knob::Yield,
        Knob::Cost,
        Knob::MixShift,
        Knob::TippingFee,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Knob::Volume => "Volume Variance",
            Knob::Price => "Lumber Price Variance",
            Knob::Yield => "Recovery Yield Variance",
            Knob::Cost => "Direct Cost Variance",
            Knob::MixShift => "Premium Mix Shift",
            Knob::TippingFee => "Tipping Fee Variance",
        }
    }

    /// Token accepted in `--override YEAR:KNOB=PCT`.
    pub fn key(self) -> &'static str {
        match self {
            Knob::Volume => "volume",
            Knob::Price => "price",
            Knob::Yield => "yield",
            Knob::Cost => "cost",
            Knob::MixShift => "mix-shift",
            Knob::TippingFee => "tipping-fee",
        }
    }

    pub fn from_key(key: &str) -> Option<Knob> {
        let key = key.trim().to_ascii_lowercase().replace('_', "-");
        Knob::ALL.into_iter().find(|k| k.key() == key)
    }

    fn index(self) -> usize {
        match self {
            Knob::Volume => 0,
            Knob::Price => 1,
            Knob::Yield => 2,
            Knob::Cost => 3,
            Knob::MixShift => 4,
            Knob::TippingFee => 5,
        }
    }
}

/// One set of variance knobs.
///
/// Each field is a signed fractional multiplier (`0.10` = +10%). A zero input
/// reproduces the calibrated base case.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub volume: f64,
    pub price: f64,
    #[serde(rename = "yield")]
    pub yield_: f64,
    pub cost: f64,
    pub mix_shift: f64,
    pub tipping_fee: f64,
}

impl ScenarioInput {
    /// The base case: every variance at zero.
    pub const fn zero() -> Self {
        Self {
            volume: 0.0,
            price: 0.0,
            yield_: 0.0,
            cost: 0.0,
            mix_shift: 0.0,
            tipping_fee: 0.0,
        }
    }

    pub fn get(&self, knob: Knob) -> f64 {
        match knob {
            Knob::Volume => self.volume,
            Knob::Price => self.price,
            Knob::Yield => self.yield_,
            Knob::Cost => self.cost,
            Knob::MixShift => self.mix_shift,
            Knob::TippingFee => self.tipping_fee,
        }
    }

    pub fn set(&mut self, knob: Knob, value: f64) {
        match knob {
            Knob::Volume => self.volume = value,
            Knob::Price => self.price = value,
            Knob::Yield => self.yield_ = value,
            Knob::Cost => self.cost = value,
            Knob::MixShift => self.mix_shift = value,
            Knob::TippingFee => self.tipping_fee = value,
        }
    }

    pub fn with(mut self, knob: Knob, value: f64) -> Self {
        self.set(knob, value);
        self
    }

    pub fn is_zero(&self) -> bool {
        Knob::ALL.iter().all(|&k| self.get(k) == 0.0)
    }
}

/// Sparse per-year override: knobs left as `None` fall through to the global input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputOverride {
    values: [Option<f64>; Knob::COUNT],
}

impl InputOverride {
    /// An override that pins every knob to `input`.
    pub fn full(input: ScenarioInput) -> Self {
        let mut out = Self::default();
        for knob in Knob::ALL {
            out.set(knob, Some(input.get(knob)));
        }
        out
    }

    pub fn get(&self, knob: Knob) -> Option<f64> {
        self.values[knob.index()]
    }

    pub fn set(&mut self, knob: Knob, value: Option<f64>) {
        self.values[knob.index()] = value;
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Layer this override on top of `base`.
    pub fn apply(&self, base: ScenarioInput) -> ScenarioInput {
        let mut out = base;
        for knob in Knob::ALL {
            if let Some(v) = self.get(knob) {
                out.set(knob, v);
            }
        }
        out
    }
}

/// The scenario to project: a global input plus optional per-year overrides.
///
/// A plan built from a single `ScenarioInput` applies it uniformly; a plan built
/// from three inputs pins each year independently.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioPlan {
    pub global: ScenarioInput,
    pub overrides: [InputOverride; YEARS],
}

impl ScenarioPlan {
    pub fn uniform(input: ScenarioInput) -> Self {
        Self {
            global: input,
            overrides: [InputOverride::default(); YEARS],
        }
    }

    pub fn per_year(inputs: [ScenarioInput; YEARS]) -> Self {
        Self {
            global: ScenarioInput::zero(),
            overrides: inputs.map(InputOverride::full),
        }
    }

    /// Effective input for `year` (0-based).
    pub fn input_for(&self, year: usize) -> ScenarioInput {
        self.overrides[year].apply(self.global)
    }

    /// Effective value of `knob` in `year` (0-based).
    pub fn value(&self, year: usize, knob: Knob) -> f64 {
        self.input_for(year).get(knob)
    }

    pub fn is_overridden(&self, year: usize, knob: Knob) -> bool {
        self.overrides[year].get(knob).is_some()
    }

    pub fn has_overrides(&self) -> bool {
        self.overrides.iter().any(|o| !o.is_empty())
    }

    pub fn set_override(&mut self, year: usize, knob: Knob, value: f64) {
        self.overrides[year].set(knob, Some(value));
    }

    pub fn clear_override(&mut self, year: usize, knob: Knob) {
        self.overrides[year].set(knob, None);
    }

    /// Reset every variance (global and per-year) back to the base case.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl From<ScenarioInput> for ScenarioPlan {
    fn from(input: ScenarioInput) -> Self {
        Self::uniform(input)
    }
}

impl From<[ScenarioInput; YEARS]> for ScenarioPlan {
    fn from(inputs: [ScenarioInput; YEARS]) -> Self {
        Self::per_year(inputs)
    }
}

/// Lumber grade shares. Sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductMix {
    pub premium: f64,
    pub builder: f64,
    pub industrial: f64,
}

impl ProductMix {
    pub fn total(&self) -> f64 {
        self.premium + self.builder + self.industrial
    }

    /// Shares paired with their grade names, in display order.
    pub fn grades(&self) -> [(&'static str, f64); 3] {
        [
            ("premium", self.premium),
            ("builder", self.builder),
            ("industrial", self.industrial),
        ]
    }
}

/// Lumber prices per board-foot, by grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductPrices {
    pub premium: f64,
    pub builder: f64,
    pub industrial: f64,
}

/// Lumber revenue split by grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeRevenue {
    pub premium: f64,
    pub builder: f64,
    pub industrial: f64,
}

impl GradeRevenue {
    pub fn total(&self) -> f64 {
        self.premium + self.builder + self.industrial
    }
}

/// Calibrated constants for one project year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearBaseline {
    pub homes_base: u32,
    pub recovery_rate_base: f64,
    pub board_feet_per_home: f64,
    pub product_mix: ProductMix,
    pub product_price: ProductPrices,
    pub tipping_fee_per_home: f64,
    pub materials_rev_per_home: f64,
    pub cost_base: f64,
    /// Non-operating inflow (grant reimbursement).
    pub era_grant: f64,
    /// Total revenue in the published base-case plan.
    pub revenue_target: f64,
}

/// Derived metrics for one project year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearResult {
    /// 1-based project year.
    pub year: usize,
    pub homes_adjusted: f64,
    pub recovery_adjusted: f64,
    pub total_board_feet: f64,
    pub mix: ProductMix,
    pub lumber_by_grade: GradeRevenue,
    pub lumber_revenue: f64,
    pub tipping_revenue: f64,
    pub materials_revenue: f64,
    pub total_revenue: f64,
    pub actual_cost: f64,
    pub margin: f64,
    pub era_grant: f64,
    pub cash_available: f64,
    pub revenue_target: f64,
}

impl YearResult {
    /// `"Year N"` for the projected years, `"Year ?"` for anything else.
    pub fn label(&self) -> &'static str {
        self.year
            .checked_sub(1)
            .and_then(|i| YEAR_LABELS.get(i))
            .copied()
            .unwrap_or("Year ?")
    }

    /// Tipping fees plus salvaged materials.
    pub fn other_revenue(&self) -> f64 {
        self.tipping_revenue + self.materials_revenue
    }

    pub fn variance_to_plan(&self) -> f64 {
        self.total_revenue - self.revenue_target
    }
}

/// Which dashboard to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DashboardView {
    /// Revenue & Growth: lumber recovery and revenue per home.
    Revenue,
    /// Debt & Cash Flow: cash available for debt service including grants.
    Cash,
}

impl DashboardView {
    pub fn display_name(self) -> &'static str {
        match self {
            DashboardView::Revenue => "Revenue & Growth",
            DashboardView::Cash => "Debt & Cash Flow",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            DashboardView::Revenue => DashboardView::Cash,
            DashboardView::Cash => DashboardView::Revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knob_keys_round_trip() {
        for knob in Knob::ALL {
            assert_eq!(Knob::from_key(knob.key()), Some(knob));
        }
        assert_eq!(Knob::from_key("MIX_SHIFT"), Some(Knob::MixShift));
        assert_eq!(Knob::from_key("speed"), None);
    }

    #[test]
    fn override_falls_through_to_global() {
        let mut plan = ScenarioPlan::uniform(ScenarioInput::zero().with(Knob::Volume, 0.1));
        plan.set_override(1, Knob::Price, 0.2);

        assert_eq!(plan.input_for(0).price, 0.0);
        assert_eq!(plan.input_for(1).price, 0.2);
        assert_eq!(plan.input_for(1).volume, 0.1);

        plan.global.volume = -0.3;
        assert_eq!(plan.input_for(1).volume, -0.3);
        assert!(plan.is_overridden(1, Knob::Price));
        assert!(!plan.is_overridden(0, Knob::Price));
    }

    #[test]
    fn per_year_plan_pins_each_year() {
        let inputs = [
            ScenarioInput::zero().with(Knob::Cost, 0.1),
            ScenarioInput::zero().with(Knob::Cost, 0.2),
            ScenarioInput::zero().with(Knob::Cost, 0.3),
        ];
        let mut plan = ScenarioPlan::from(inputs);
        plan.global.cost = 0.9;
        for (i, input) in inputs.iter().enumerate() {
            assert_eq!(plan.input_for(i), *input);
        }
    }

    #[test]
    fn reset_clears_everything() {
        let mut plan = ScenarioPlan::uniform(ScenarioInput::zero().with(Knob::Yield, 0.05));
        plan.set_override(2, Knob::MixShift, 0.1);
        plan.reset();
        assert!(plan.global.is_zero());
        assert!(!plan.has_overrides());
    }
}
