//! Scenario projection engine.
//!
//! - `mix`: product-mix shift
//! - `projection`: the pure three-year projection
//! - `guard`: range checks and clamping in front of it

pub mod guard;
pub mod mix;
pub mod projection;

pub use guard::*;
pub use mix::*;
pub use projection::*;
