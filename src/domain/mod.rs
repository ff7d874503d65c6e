//! Domain types used throughout the valuation pipeline.
//!
//! This module defines:
//!
//! - the artifact bundle and its invariants (`ArtifactBundle`)
//! - the six-field house form with ranges and defaults (`HouseInput`, `Field`)
//! - pipeline outputs and run configuration (`Estimate`, `FeatureRow`, `ValuationConfig`)

pub mod bundle;
pub mod form;
pub mod types;

pub use bundle::*;
pub use form::*;
pub use types::*;
