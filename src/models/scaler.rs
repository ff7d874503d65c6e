//! Per-feature scalers.
//!
//! - `StandardScaler`: `(x - mean) / scale`
//! - `MinMaxScaler`: `(x - min) / (max - min)`
//!
//! A zero scale (or zero span) comes from a constant training column. We divide
//! by 1.0 in that case so the column maps to a constant instead of ±inf.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{BundleError, PredictionError};
use crate::models::Scaler;

const ZERO_SCALE_EPS: f64 = 1e-12;

/// A row of the wrong width is a scaling failure, not a model one.
fn check_width(expected: usize, row: &DVector<f64>) -> Result<(), PredictionError> {
    if row.len() != expected {
        return Err(PredictionError::Scaling {
            reason: format!("fitted on {expected} features, got {}", row.len()),
        });
    }
    Ok(())
}

fn safe_divisor(d: f64) -> f64 {
    if d.abs() < ZERO_SCALE_EPS { 1.0 } else { d }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn validate(&self) -> Result<(), BundleError> {
        if self.mean.len() != self.scale.len() {
            return Err(BundleError::Invalid {
                component: "scaler",
                reason: format!("mean has {} entries, scale has {}", self.mean.len(), self.scale.len()),
            });
        }
        if !self.mean.iter().chain(self.scale.iter()).all(|v| v.is_finite()) {
            return Err(BundleError::Invalid {
                component: "scaler",
                reason: "non-finite mean or scale".to_string(),
            });
        }
        Ok(())
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, row: &DVector<f64>) -> Result<DVector<f64>, PredictionError> {
        check_width(self.mean.len(), row)?;
        Ok(DVector::from_iterator(
            row.len(),
            row.iter()
                .zip(self.mean.iter().zip(self.scale.iter()))
                .map(|(&x, (&m, &s))| (x - m) / safe_divisor(s)),
        ))
    }

    fn input_len(&self) -> Option<usize> {
        Some(self.mean.len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

impl MinMaxScaler {
    pub fn validate(&self) -> Result<(), BundleError> {
        if self.min.len() != self.max.len() {
            return Err(BundleError::Invalid {
                component: "scaler",
                reason: format!("min has {} entries, max has {}", self.min.len(), self.max.len()),
            });
        }
        for (i, (&lo, &hi)) in self.min.iter().zip(self.max.iter()).enumerate() {
            if !(lo.is_finite() && hi.is_finite()) || hi < lo {
                return Err(BundleError::Invalid {
                    component: "scaler",
                    reason: format!("bad range at position {i}: [{lo}, {hi}]"),
                });
            }
        }
        Ok(())
    }
}

impl Scaler for MinMaxScaler {
    fn transform(&self, row: &DVector<f64>) -> Result<DVector<f64>, PredictionError> {
        check_width(self.min.len(), row)?;
        Ok(DVector::from_iterator(
            row.len(),
            row.iter()
                .zip(self.min.iter().zip(self.max.iter()))
                .map(|(&x, (&lo, &hi))| (x - lo) / safe_divisor(hi - lo)),
        ))
    }

    fn input_len(&self) -> Option<usize> {
        Some(self.min.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_scaler_centers_and_scales() {
        let s = StandardScaler {
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 0.0],
        };
        let out = s.transform(&DVector::from_vec(vec![14.0, 3.0])).unwrap();
        assert!((out[0] - 2.0).abs() < 1e-12);
        // Zero scale divides by one.
        assert!((out[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn standard_scaler_rejects_wrong_length() {
        let s = StandardScaler {
            mean: vec![0.0; 3],
            scale: vec![1.0; 3],
        };
        let err = s.transform(&DVector::from_vec(vec![1.0, 2.0])).unwrap_err();
        assert_eq!(
            err,
            PredictionError::Scaling {
                reason: "fitted on 3 features, got 2".to_string()
            }
        );
    }

    #[test]
    fn min_max_rejects_wrong_length_as_scaling_error() {
        let s = MinMaxScaler {
            min: vec![0.0; 2],
            max: vec![1.0; 2],
        };
        let err = s.transform(&DVector::from_vec(vec![0.5, 0.5, 0.5])).unwrap_err();
        assert!(matches!(err, PredictionError::Scaling { .. }));
    }

    #[test]
    fn min_max_maps_range_to_unit_interval() {
        let s = MinMaxScaler {
            min: vec![1800.0],
            max: vec![2025.0],
        };
        let lo = s.transform(&DVector::from_vec(vec![1800.0])).unwrap();
        let hi = s.transform(&DVector::from_vec(vec![2025.0])).unwrap();
        assert!(lo[0].abs() < 1e-12);
        assert!((hi[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn min_max_validate_rejects_inverted_range() {
        let s = MinMaxScaler {
            min: vec![5.0],
            max: vec![1.0],
        };
        assert!(s.validate().is_err());
    }
}
