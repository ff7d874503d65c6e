//! Linear regressor: `y = intercept + coefficients · x`.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{BundleError, PredictionError};
use crate::models::{Predictor, check_len};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn validate(&self) -> Result<(), BundleError> {
        if !self.intercept.is_finite() || !self.coefficients.iter().all(|c| c.is_finite()) {
            return Err(BundleError::Invalid {
                component: "model",
                reason: "non-finite intercept or coefficient".to_string(),
            });
        }
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn predict(&self, row: &DVector<f64>) -> Result<f64, PredictionError> {
        check_len("model", self.coefficients.len(), row)?;
        let coef = DVector::from_column_slice(&self.coefficients);
        Ok(self.intercept + coef.dot(row))
    }

    fn input_len(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }
}
