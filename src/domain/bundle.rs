//! The artifact bundle: feature order, stored defaults, and the fitted
//! scaler/predictor pair.
//!
//! A bundle is built once at startup and shared read-only afterwards. All
//! structural invariants are checked in [`ArtifactBundle::new`], so the
//! pipeline can assume them.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::error::BundleError;
use crate::models::{Predictor, Scaler};

#[derive(Clone)]
pub struct ArtifactBundle {
    label: Option<String>,
    features: Vec<String>,
    defaults: BTreeMap<String, f64>,
    scaler: Arc<dyn Scaler>,
    model: Arc<dyn Predictor>,
}

impl ArtifactBundle {
    /// Build a bundle, rejecting it if:
    /// - `features` is empty or lists a name twice
    /// - `defaults` lacks (or has a non-finite value for) any listed feature
    /// - the scaler or model was fitted on a different feature count
    pub fn new(
        features: Vec<String>,
        defaults: BTreeMap<String, f64>,
        scaler: Arc<dyn Scaler>,
        model: Arc<dyn Predictor>,
    ) -> Result<Self, BundleError> {
        if features.is_empty() {
            return Err(BundleError::NoFeatures);
        }

        let mut seen = HashSet::with_capacity(features.len());
        for name in &features {
            if !seen.insert(name.as_str()) {
                return Err(BundleError::DuplicateFeature(name.clone()));
            }
            match defaults.get(name) {
                None => return Err(BundleError::MissingDefault(name.clone())),
                Some(v) if !v.is_finite() => return Err(BundleError::NonFiniteDefault(name.clone())),
                Some(_) => {}
            }
        }

        let expected = features.len();
        for (component, len) in [("scaler", scaler.input_len()), ("model", model.input_len())] {
            if let Some(actual) = len {
                if actual != expected {
                    return Err(BundleError::DimensionMismatch { component, expected, actual });
                }
            }
        }

        Ok(Self {
            label: None,
            features,
            defaults,
            scaler,
            model,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn defaults(&self) -> &BTreeMap<String, f64> {
        &self.defaults
    }

    pub fn scaler(&self) -> &dyn Scaler {
        self.scaler.as_ref()
    }

    pub fn model(&self) -> &dyn Predictor {
        self.model.as_ref()
    }
}

impl std::fmt::Debug for ArtifactBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactBundle")
            .field("label", &self.label)
            .field("features", &self.features)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
