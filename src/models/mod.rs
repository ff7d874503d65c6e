//! Fitted transforms and predictors loaded from the artifact bundle.
//!
//! The pipeline only depends on two capabilities:
//! - [`Scaler::transform`]: raw row -> scaled row (same length, same order)
//! - [`Predictor::predict`]: scaled row -> scalar
//!
//! The serialized forms ([`ScalerArtifact`], [`ModelArtifact`]) are the concrete
//! implementations a bundle file can carry. Anything else implementing the traits
//! (for example a stub in tests) can be plugged into an `ArtifactBundle` directly.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{BundleError, PredictionError};

pub mod linear;
pub mod scaler;
pub mod tree;

pub use linear::*;
pub use scaler::*;
pub use tree::*;

/// A fitted, read-only feature transform.
pub trait Scaler: Send + Sync {
    fn transform(&self, row: &DVector<f64>) -> Result<DVector<f64>, PredictionError>;

    /// Number of features the transform was fitted on, if fixed.
    ///
    /// `None` marks a width-agnostic transform (identity). The bundle width is
    /// then enforced through [`Predictor::input_len`] alone.
    fn input_len(&self) -> Option<usize> {
        None
    }
}

/// A fitted, read-only regressor.
pub trait Predictor: Send + Sync {
    fn predict(&self, row: &DVector<f64>) -> Result<f64, PredictionError>;

    /// Number of features the model was fitted on, if fixed.
    fn input_len(&self) -> Option<usize> {
        None
    }
}

/// Scaler as stored in the bundle file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
    Identity,
}

impl ScalerArtifact {
    pub fn validate(&self) -> Result<(), BundleError> {
        match self {
            ScalerArtifact::Standard(s) => s.validate(),
            ScalerArtifact::MinMax(s) => s.validate(),
            ScalerArtifact::Identity => Ok(()),
        }
    }
}

impl Scaler for ScalerArtifact {
    fn transform(&self, row: &DVector<f64>) -> Result<DVector<f64>, PredictionError> {
        match self {
            ScalerArtifact::Standard(s) => s.transform(row),
            ScalerArtifact::MinMax(s) => s.transform(row),
            ScalerArtifact::Identity => Ok(row.clone()),
        }
    }

    fn input_len(&self) -> Option<usize> {
        match self {
            ScalerArtifact::Standard(s) => s.input_len(),
            ScalerArtifact::MinMax(s) => s.input_len(),
            ScalerArtifact::Identity => None,
        }
    }
}

/// Predictor as stored in the bundle file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    /// Short name for `inspect` output.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelArtifact::Linear(_) => "linear",
            ModelArtifact::TreeEnsemble(_) => "tree ensemble",
        }
    }

    pub fn validate(&self, n_features: usize) -> Result<(), BundleError> {
        match self {
            ModelArtifact::Linear(m) => m.validate(),
            ModelArtifact::TreeEnsemble(m) => m.validate(n_features),
        }
    }
}

impl Predictor for ModelArtifact {
    fn predict(&self, row: &DVector<f64>) -> Result<f64, PredictionError> {
        match self {
            ModelArtifact::Linear(m) => m.predict(row),
            ModelArtifact::TreeEnsemble(m) => m.predict(row),
        }
    }

    fn input_len(&self) -> Option<usize> {
        match self {
            ModelArtifact::Linear(m) => m.input_len(),
            ModelArtifact::TreeEnsemble(m) => m.input_len(),
        }
    }
}

/// Fail with a shape error unless `row` has exactly `expected` entries.
pub(crate) fn check_len(stage: &'static str, expected: usize, row: &DVector<f64>) -> Result<(), PredictionError> {
    if row.len() != expected {
        return Err(PredictionError::Shape {
            stage,
            expected,
            actual: row.len(),
        });
    }
    Ok(())
}
