//! `reclaim-model` library crate.
//!
//! A three-year revenue, cost and cash projection for a lumber-reclamation
//! business under adjustable assumptions (volume, price, yield, cost, product
//! mix, tipping fees).
//!
//! The binary (`reclaim`) is a thin wrapper around this library so that:
//!
//! - the projection engine is testable without spawning processes
//! - the CLI and the TUI share one pipeline
//! - presentation stays out of the engine

pub mod app;
pub mod cli;
pub mod domain;
pub mod engine;
pub mod error;
pub mod logging;
pub mod plot;
pub mod report;
pub mod tui;
