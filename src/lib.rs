//! `propai` library crate.
//!
//! The binary (`propai`) is a thin wrapper around this library so that:
//!
//! - the valuation pipeline is testable without spawning processes
//! - the bundle, pipeline, and display layers can be reused by other front-ends
//! - the model capabilities (`Scaler`, `Predictor`) can be stubbed in tests

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod report;
pub mod tui;
pub mod valuation;
