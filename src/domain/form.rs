//! The house form: six user-facing fields with declared ranges and defaults.
//!
//! Range checks live here, on the form side. The pipeline never validates
//! numeric ranges; it only needs the feature names to line up with the bundle.

use serde::{Deserialize, Serialize};

use crate::domain::types::{
    FEATURE_FULL_BATH, FEATURE_GARAGE_CARS, FEATURE_GR_LIV_AREA, FEATURE_LOT_AREA, FEATURE_OVERALL_QUAL,
    FEATURE_YEAR_BUILT, FeatureOverrides,
};
use crate::error::FormError;

/// One field of the house form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    LivingArea,
    LotArea,
    YearBuilt,
    OverallQual,
    FullBath,
    GarageCars,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::LivingArea,
        Field::LotArea,
        Field::YearBuilt,
        Field::OverallQual,
        Field::FullBath,
        Field::GarageCars,
    ];

    /// Bundle feature this field feeds.
    pub fn feature_name(self) -> &'static str {
        match self {
            Field::LivingArea => FEATURE_GR_LIV_AREA,
            Field::LotArea => FEATURE_LOT_AREA,
            Field::YearBuilt => FEATURE_YEAR_BUILT,
            Field::OverallQual => FEATURE_OVERALL_QUAL,
            Field::FullBath => FEATURE_FULL_BATH,
            Field::GarageCars => FEATURE_GARAGE_CARS,
        }
    }

    /// Human-readable label for terminal output.
    pub fn label(self) -> &'static str {
        match self {
            Field::LivingArea => "Square feet",
            Field::LotArea => "Lot size",
            Field::YearBuilt => "Year built",
            Field::OverallQual => "Quality (1-10)",
            Field::FullBath => "Bathrooms",
            Field::GarageCars => "Garage (cars)",
        }
    }

    /// Inclusive `(min, max)` range.
    pub fn range(self) -> (i64, i64) {
        match self {
            Field::LivingArea => (500, 10_000),
            Field::LotArea => (1_000, 100_000),
            Field::YearBuilt => (1800, 2025),
            Field::OverallQual => (1, 10),
            Field::FullBath => (1, 5),
            Field::GarageCars => (0, 4),
        }
    }

    pub fn default_value(self) -> i64 {
        match self {
            Field::LivingArea => 2_500,
            Field::LotArea => 10_000,
            Field::YearBuilt => 2015,
            Field::OverallQual => 8,
            Field::FullBath => 2,
            Field::GarageCars => 2,
        }
    }

    /// Increment used by the interactive form.
    pub fn step(self) -> i64 {
        match self {
            Field::LivingArea => 50,
            Field::LotArea => 500,
            _ => 1,
        }
    }

    fn check(self, value: i64) -> Result<(), FormError> {
        let (min, max) = self.range();
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(FormError::OutOfRange {
                label: self.label(),
                value,
                min,
                max,
            })
        }
    }
}

/// User input for one valuation request.
///
/// Serialized with bundle feature names so exports line up with the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseInput {
    #[serde(rename = "GrLivArea")]
    pub gr_liv_area: i64,
    #[serde(rename = "LotArea")]
    pub lot_area: i64,
    #[serde(rename = "YearBuilt")]
    pub year_built: i64,
    #[serde(rename = "OverallQual")]
    pub overall_qual: i64,
    #[serde(rename = "FullBath")]
    pub full_bath: i64,
    #[serde(rename = "GarageCars")]
    pub garage_cars: i64,
}

impl Default for HouseInput {
    fn default() -> Self {
        let mut input = Self {
            gr_liv_area: 0,
            lot_area: 0,
            year_built: 0,
            overall_qual: 0,
            full_bath: 0,
            garage_cars: 0,
        };
        for field in Field::ALL {
            input.set(field, field.default_value());
        }
        input
    }
}

impl HouseInput {
    pub fn get(&self, field: Field) -> i64 {
        match field {
            Field::LivingArea => self.gr_liv_area,
            Field::LotArea => self.lot_area,
            Field::YearBuilt => self.year_built,
            Field::OverallQual => self.overall_qual,
            Field::FullBath => self.full_bath,
            Field::GarageCars => self.garage_cars,
        }
    }

    pub fn set(&mut self, field: Field, value: i64) {
        let slot = match field {
            Field::LivingArea => &mut self.gr_liv_area,
            Field::LotArea => &mut self.lot_area,
            Field::YearBuilt => &mut self.year_built,
            Field::OverallQual => &mut self.overall_qual,
            Field::FullBath => &mut self.full_bath,
            Field::GarageCars => &mut self.garage_cars,
        };
        *slot = value;
    }

    /// Move a field by `steps` increments, staying inside its range.
    pub fn nudge(&mut self, field: Field, steps: i64) {
        let (min, max) = field.range();
        let next = self
            .get(field)
            .saturating_add(steps.saturating_mul(field.step()))
            .clamp(min, max);
        self.set(field, next);
    }

    /// Check every field against its declared range.
    pub fn validate(&self) -> Result<(), FormError> {
        for field in Field::ALL {
            field.check(self.get(field))?;
        }
        Ok(())
    }

    /// Feature overrides for the pipeline, keyed by bundle feature name.
    pub fn to_overrides(&self) -> FeatureOverrides {
        Field::ALL
            .iter()
            .map(|&f| (f.feature_name().to_string(), self.get(f) as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let input = HouseInput::default();
        assert!(input.validate().is_ok());
        assert_eq!(input.gr_liv_area, 2_500);
        assert_eq!(input.garage_cars, 2);
    }

    #[test]
    fn out_of_range_quality_is_a_form_error() {
        let mut input = HouseInput::default();
        input.overall_qual = 11;
        let err = input.validate().unwrap_err();
        assert_eq!(
            err,
            FormError::OutOfRange { label: "Quality (1-10)", value: 11, min: 1, max: 10 }
        );
    }

    #[test]
    fn nudge_stays_within_bounds() {
        let mut input = HouseInput::default();
        input.nudge(Field::GarageCars, 10);
        assert_eq!(input.garage_cars, 4);
        input.nudge(Field::GarageCars, -10);
        assert_eq!(input.garage_cars, 0);
        input.nudge(Field::LivingArea, 2);
        assert_eq!(input.gr_liv_area, 2_600);
    }

    #[test]
    fn overrides_use_feature_names() {
        let overrides = HouseInput::default().to_overrides();
        assert_eq!(overrides.len(), 6);
        assert_eq!(overrides.get("OverallQual"), Some(&8.0));
        assert_eq!(overrides.get("LotArea"), Some(&10_000.0));
        assert!(!overrides.contains_key("YearRemodAdd"));
    }
}
