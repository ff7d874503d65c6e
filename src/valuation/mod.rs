//! Valuation pipeline.
//!
//! Responsibilities:
//!
//! - overlay sparse user input on the bundle defaults and apply derived fields
//! - project the result into a row in bundle feature order
//! - scale, predict, and apply the display floor

pub mod assemble;
pub mod estimate;

pub use assemble::*;
pub use estimate::*;
