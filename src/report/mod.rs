//! Reporting utilities: display scores, per-area price, and formatted output.
//!
//! Everything here is derived from an already-validated `HouseInput` and a
//! finished `Estimate`; nothing feeds back into the model.

use serde::{Deserialize, Serialize};

use crate::domain::{Estimate, HouseInput};

pub mod format;

pub use format::*;

/// Category maxima used to normalize inputs for display.
const LIVING_AREA_MAX: f64 = 4_000.0;
const QUALITY_MAX: f64 = 10.0;
const LOT_AREA_MAX: f64 = 25_000.0;
const GARAGE_MAX: f64 = 4.0;

/// A display category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    LivingSpace,
    BuildQuality,
    LandArea,
    Garage,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::LivingSpace,
        Category::BuildQuality,
        Category::LandArea,
        Category::Garage,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::LivingSpace => "Living space",
            Category::BuildQuality => "Build quality",
            Category::LandArea => "Land area",
            Category::Garage => "Garage",
        }
    }

    /// Fixed market-average benchmark on the same 0-1 scale.
    pub fn market_average(self) -> f64 {
        match self {
            Category::LivingSpace => 0.4,
            Category::BuildQuality => 0.6,
            Category::LandArea => 0.4,
            Category::Garage => 0.5,
        }
    }

    fn maximum(self) -> f64 {
        match self {
            Category::LivingSpace => LIVING_AREA_MAX,
            Category::BuildQuality => QUALITY_MAX,
            Category::LandArea => LOT_AREA_MAX,
            Category::Garage => GARAGE_MAX,
        }
    }

    fn raw_value(self, input: &HouseInput) -> f64 {
        match self {
            Category::LivingSpace => input.gr_liv_area as f64,
            Category::BuildQuality => input.overall_qual as f64,
            Category::LandArea => input.lot_area as f64,
            Category::Garage => input.garage_cars as f64,
        }
    }
}

/// `value / max`, clamped into `[0, 1]`.
pub fn normalize(value: f64, max: f64) -> f64 {
    if !(value.is_finite() && max.is_finite()) || max <= 0.0 {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0)
}

/// One normalized category score for the result panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: f64,
    pub market_average: f64,
}

/// Per-category scores in [`Category::ALL`] order.
pub fn category_scores(input: &HouseInput) -> Vec<CategoryScore> {
    Category::ALL
        .iter()
        .map(|&category| CategoryScore {
            category,
            score: normalize(category.raw_value(input), category.maximum()),
            market_average: category.market_average(),
        })
        .collect()
}

/// Price per square foot of living area, if the area is positive.
pub fn price_per_area(price: f64, living_area: i64) -> Option<f64> {
    if living_area <= 0 {
        return None;
    }
    Some(price / living_area as f64)
}

/// Everything shown (or exported) for one valuation.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub input: HouseInput,
    pub estimate: Estimate,
    pub price_per_sqft: Option<f64>,
    pub scores: Vec<CategoryScore>,
}

impl Valuation {
    pub fn new(input: HouseInput, estimate: Estimate) -> Self {
        Self {
            price_per_sqft: price_per_area(estimate.price, input.gr_liv_area),
            scores: category_scores(&input),
            input,
            estimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_match_category_maxima() {
        let input = HouseInput {
            gr_liv_area: 2_000,
            lot_area: 12_500,
            year_built: 2000,
            overall_qual: 7,
            full_bath: 2,
            garage_cars: 3,
        };
        let scores = category_scores(&input);
        let got: Vec<f64> = scores.iter().map(|s| s.score).collect();
        assert_eq!(got, vec![0.5, 0.7, 0.5, 0.75]);
    }

    #[test]
    fn scores_clamp_above_category_maximum() {
        let input = HouseInput {
            gr_liv_area: 10_000,
            lot_area: 100_000,
            ..HouseInput::default()
        };
        let scores = category_scores(&input);
        assert_eq!(scores[0].score, 1.0);
        assert_eq!(scores[2].score, 1.0);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(&s.score)));
    }

    #[test]
    fn normalize_handles_degenerate_inputs() {
        assert_eq!(normalize(-5.0, 10.0), 0.0);
        assert_eq!(normalize(5.0, 0.0), 0.0);
        assert_eq!(normalize(f64::NAN, 10.0), 0.0);
    }

    #[test]
    fn price_per_area_requires_positive_area() {
        assert_eq!(price_per_area(250_000.0, 2_500), Some(100.0));
        assert_eq!(price_per_area(250_000.0, 0), None);
    }
}
