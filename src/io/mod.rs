//! Input/output helpers.
//!
//! - bundle JSON read + validation (`bundle`)
//! - valuation report export (`report`)

pub mod bundle;
pub mod report;

pub use bundle::*;
pub use report::*;
