//! Declared ranges of the scenario controls.
//!
//! Clamping is what a slider does; the engine never consults these.

use serde::{Deserialize, Serialize};

use super::types::{Knob, ScenarioInput};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnobRange {
    pub min: f64,
    pub max: f64,
}

impl KnobRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn symmetric(limit: f64) -> Self {
        Self::new(-limit, limit)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp into range. NaN maps to zero (the base case).
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return 0.0;
        }
        value.clamp(self.min, self.max)
    }
}

/// Declared min/max for each knob (fractions).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarianceBounds {
    pub volume: KnobRange,
    pub price: KnobRange,
    #[serde(rename = "yield")]
    pub yield_: KnobRange,
    pub cost: KnobRange,
    pub mix_shift: KnobRange,
    pub tipping_fee: KnobRange,
}

impl Default for VarianceBounds {
    fn default() -> Self {
        Self {
            volume: KnobRange::symmetric(0.50),
            price: KnobRange::symmetric(0.50),
            yield_: KnobRange::symmetric(0.25),
            cost: KnobRange::new(-0.20, 0.50),
            mix_shift: KnobRange::symmetric(0.20),
            tipping_fee: KnobRange::symmetric(0.50),
        }
    }
}

impl VarianceBounds {
    pub fn range(&self, knob: Knob) -> KnobRange {
        match knob {
            Knob::Volume => self.volume,
            Knob::Price => self.price,
            Knob::Yield => self.yield_,
            Knob::Cost => self.cost,
            Knob::MixShift => self.mix_shift,
            Knob::TippingFee => self.tipping_fee,
        }
    }

    /// Clamp every knob of `input`, returning the knobs that moved.
    pub fn clamp(&self, input: ScenarioInput) -> (ScenarioInput, Vec<Knob>) {
        let mut out = input;
        let mut moved = Vec::new();
        for knob in Knob::ALL {
            let requested = input.get(knob);
            let applied = self.range(knob).clamp(requested);
            if applied != requested {
                out.set(knob, applied);
                moved.push(knob);
            }
        }
        (out, moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_reports_moved_knobs() {
        let bounds = VarianceBounds::default();
        let input = ScenarioInput::zero()
            .with(Knob::Volume, 0.8)
            .with(Knob::Cost, -0.1)
            .with(Knob::Yield, f64::NAN);

        let (clamped, moved) = bounds.clamp(input);
        assert_eq!(clamped.volume, 0.5);
        assert_eq!(clamped.cost, -0.1);
        assert_eq!(clamped.yield_, 0.0);
        assert_eq!(moved, vec![Knob::Volume, Knob::Yield]);
    }

    #[test]
    fn cost_range_is_asymmetric() {
        let r = VarianceBounds::default().range(Knob::Cost);
        assert!(r.contains(0.5));
        assert!(!r.contains(-0.25));
    }
}
