//! Shared domain types.
//!
//! These are kept small and serializable so a valuation can be printed,
//! exported to JSON, or inspected in tests without touching the model.

use std::collections::BTreeMap;
use std::path::PathBuf;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::domain::form::HouseInput;

pub const FEATURE_GR_LIV_AREA: &str = "GrLivArea";
pub const FEATURE_LOT_AREA: &str = "LotArea";
pub const FEATURE_YEAR_BUILT: &str = "YearBuilt";
pub const FEATURE_YEAR_REMOD_ADD: &str = "YearRemodAdd";
pub const FEATURE_OVERALL_QUAL: &str = "OverallQual";
pub const FEATURE_FULL_BATH: &str = "FullBath";
pub const FEATURE_GARAGE_CARS: &str = "GarageCars";

/// Default display-safety floor for reported prices.
pub const DEFAULT_PRICE_FLOOR: f64 = 10_000.0;

/// Sparse user-supplied feature values, keyed by feature name.
pub type FeatureOverrides = BTreeMap<String, f64>;

/// A feature whose value follows another one unless supplied explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedField {
    pub target: &'static str,
    pub source: &'static str,
}

/// Fixed derivation rules applied after the user overlay.
///
/// A house without a recorded remodel is treated as "remodeled" the year it was built.
pub const DERIVED_FIELDS: &[DerivedField] = &[DerivedField {
    target: FEATURE_YEAR_REMOD_ADD,
    source: FEATURE_YEAR_BUILT,
}];

/// Lower bound applied to displayed prices.
///
/// This only keeps non-physical outputs (negative or near-zero prices) off the
/// screen. It is not part of the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClampPolicy {
    pub floor: f64,
}

impl ClampPolicy {
    pub fn new(floor: f64) -> Self {
        Self { floor: floor.max(0.0) }
    }

    /// Returns `(price, clamped)`.
    pub fn apply(&self, raw: f64) -> (f64, bool) {
        if raw < self.floor {
            (self.floor, true)
        } else {
            (raw, false)
        }
    }
}

impl Default for ClampPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_FLOOR)
    }
}

/// An assembled, unscaled feature row in bundle order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub names: Vec<String>,
    pub values: DVector<f64>,
}

impl FeatureRow {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Look up a value by feature name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.values[idx])
    }
}

/// Output of a single valuation.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// The row handed to the scaler.
    pub row: FeatureRow,
    /// The model's output before the display floor.
    pub raw: f64,
    /// The price to show (`raw` raised to the floor if needed).
    pub price: f64,
    /// Whether the display floor replaced `raw`.
    pub clamped: bool,
}

/// A full run's configuration as understood by the front-ends.
///
/// This is derived from CLI flags, `.env`, and form defaults.
#[derive(Debug, Clone)]
pub struct ValuationConfig {
    pub bundle_path: PathBuf,
    pub input: HouseInput,
    pub clamp: ClampPolicy,
    pub json: bool,
    pub export: Option<PathBuf>,
}
