//! Domain types used throughout the model.
//!
//! This module defines:
//!
//! - scenario controls (`Knob`, `ScenarioInput`, `ScenarioPlan`, `VarianceBounds`)
//! - per-year calibrated constants (`YearBaseline`) and the calibrated set
//! - projection outputs (`YearResult`)

pub mod baseline;
pub mod bounds;
pub mod types;

pub use bounds::*;
pub use types::*;
