//! Feature-row assembly.
//!
//! Unspecified features take the bundle's stored defaults (never zero-fill).
//! Overrides for names the bundle does not know are rejected rather than dropped.

use std::collections::BTreeMap;

use nalgebra::DVector;

use crate::domain::{ArtifactBundle, DERIVED_FIELDS, FeatureOverrides, FeatureRow};
use crate::error::PredictionError;

/// Overlay `input` on the bundle defaults and apply derived-field rules.
pub fn overlay_defaults(
    input: &FeatureOverrides,
    defaults: &BTreeMap<String, f64>,
) -> Result<BTreeMap<String, f64>, PredictionError> {
    let mut merged = defaults.clone();

    for (name, &value) in input {
        let Some(slot) = merged.get_mut(name) else {
            return Err(PredictionError::UnknownFeature { feature: name.clone() });
        };
        *slot = value;
    }

    for rule in DERIVED_FIELDS {
        if input.contains_key(rule.target) {
            continue;
        }
        let Some(&source) = input.get(rule.source) else {
            continue;
        };
        if let Some(slot) = merged.get_mut(rule.target) {
            *slot = source;
        }
    }

    Ok(merged)
}

/// Project a merged mapping onto `features`, in order.
pub fn project_row(merged: &BTreeMap<String, f64>, features: &[String]) -> Result<FeatureRow, PredictionError> {
    let mut values = Vec::with_capacity(features.len());
    for name in features {
        let value = *merged
            .get(name)
            .ok_or_else(|| PredictionError::MissingFeature { feature: name.clone() })?;
        if !value.is_finite() {
            return Err(PredictionError::NonFiniteInput { feature: name.clone(), value });
        }
        values.push(value);
    }

    Ok(FeatureRow {
        names: features.to_vec(),
        values: DVector::from_vec(values),
    })
}

/// Build the unscaled row for `input` against `bundle`.
pub fn assemble_row(input: &FeatureOverrides, bundle: &ArtifactBundle) -> Result<FeatureRow, PredictionError> {
    let merged = overlay_defaults(input, bundle.defaults())?;
    project_row(&merged, bundle.features())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn overlay_prefers_input_over_defaults() {
        let defaults = map(&[("GrLivArea", 1500.0), ("LotArea", 9000.0)]);
        let merged = overlay_defaults(&map(&[("GrLivArea", 2500.0)]), &defaults).unwrap();
        assert_eq!(merged["GrLivArea"], 2500.0);
        assert_eq!(merged["LotArea"], 9000.0);
    }

    #[test]
    fn remodel_year_follows_year_built() {
        let defaults = map(&[("YearBuilt", 1970.0), ("YearRemodAdd", 1985.0)]);
        let merged = overlay_defaults(&map(&[("YearBuilt", 2015.0)]), &defaults).unwrap();
        assert_eq!(merged["YearRemodAdd"], 2015.0);
    }

    #[test]
    fn explicit_remodel_year_wins() {
        let defaults = map(&[("YearBuilt", 1970.0), ("YearRemodAdd", 1985.0)]);
        let input = map(&[("YearBuilt", 1990.0), ("YearRemodAdd", 2010.0)]);
        let merged = overlay_defaults(&input, &defaults).unwrap();
        assert_eq!(merged["YearRemodAdd"], 2010.0);
    }

    #[test]
    fn derived_field_is_not_added_when_bundle_lacks_it() {
        let defaults = map(&[("YearBuilt", 1970.0)]);
        let merged = overlay_defaults(&map(&[("YearBuilt", 2000.0)]), &defaults).unwrap();
        assert!(!merged.contains_key("YearRemodAdd"));
    }

    #[test]
    fn unknown_input_key_is_rejected() {
        let defaults = map(&[("GrLivArea", 1500.0)]);
        let err = overlay_defaults(&map(&[("PoolArea", 50.0)]), &defaults).unwrap_err();
        assert_eq!(err, PredictionError::UnknownFeature { feature: "PoolArea".to_string() });
    }

    #[test]
    fn projection_follows_feature_order() {
        let merged = map(&[("A", 1.0), ("B", 2.0), ("C", 3.0)]);
        let features = vec!["C".to_string(), "A".to_string()];
        let row = project_row(&merged, &features).unwrap();
        assert_eq!(row.names, features);
        assert_eq!(row.values.as_slice(), &[3.0, 1.0]);
    }

    #[test]
    fn projection_reports_missing_feature_by_name() {
        let merged = map(&[("A", 1.0)]);
        let err = project_row(&merged, &["A".to_string(), "Z".to_string()]).unwrap_err();
        assert_eq!(err, PredictionError::MissingFeature { feature: "Z".to_string() });
    }

    #[test]
    fn projection_rejects_non_finite_values() {
        let merged = map(&[("A", f64::INFINITY)]);
        let err = project_row(&merged, &["A".to_string()]).unwrap_err();
        assert!(matches!(err, PredictionError::NonFiniteInput { ref feature, .. } if feature == "A"));
    }
}
