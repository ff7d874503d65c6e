//! Shared valuation service used by both CLI and TUI front-ends.
//!
//! The bundle is loaded once at startup and injected here. If loading failed,
//! the failure is kept instead, and every request reports it before any
//! feature assembly happens.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{ArtifactBundle, ClampPolicy, HouseInput};
use crate::error::ValuationError;
use crate::report::Valuation;

/// Holds the process-wide bundle (or why it is missing).
#[derive(Debug, Clone)]
pub struct ValuationService {
    bundle: Result<Arc<ArtifactBundle>, ValuationError>,
    clamp: ClampPolicy,
}

impl ValuationService {
    pub fn new(bundle: ArtifactBundle, clamp: ClampPolicy) -> Self {
        Self {
            bundle: Ok(Arc::new(bundle)),
            clamp,
        }
    }

    /// A service with no usable bundle.
    pub fn unavailable(err: ValuationError, clamp: ClampPolicy) -> Self {
        Self {
            bundle: Err(err),
            clamp,
        }
    }

    /// Load the bundle at `path`, keeping a load failure rather than returning it.
    pub fn load(path: &Path, clamp: ClampPolicy) -> Self {
        match crate::io::read_bundle_json(path) {
            Ok(bundle) => Self::new(bundle, clamp),
            Err(err) => {
                error!(error = %err, "artifact bundle unavailable");
                Self::unavailable(err, clamp)
            }
        }
    }

    pub fn bundle(&self) -> Option<&ArtifactBundle> {
        self.bundle.as_ref().ok().map(|b| b.as_ref())
    }

    /// The load failure, if the bundle is unavailable.
    pub fn load_error(&self) -> Option<&ValuationError> {
        self.bundle.as_ref().err()
    }

    pub fn clamp(&self) -> ClampPolicy {
        self.clamp
    }

    /// Validate the form, then run the pipeline.
    pub fn value(&self, input: &HouseInput) -> Result<Valuation, ValuationError> {
        let bundle = self.require_bundle()?;
        input.validate()?;

        let estimate = crate::valuation::estimate(&input.to_overrides(), bundle, self.clamp)?;
        info!(price = estimate.price, clamped = estimate.clamped, "valuation produced");
        Ok(Valuation::new(*input, estimate))
    }

    fn require_bundle(&self) -> Result<&ArtifactBundle, ValuationError> {
        self.bundle.as_ref().map(|b| b.as_ref()).map_err(Clone::clone)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use nalgebra::DVector;

    use super::*;
    use crate::error::PredictionError;
    use crate::models::{Predictor, Scaler, ScalerArtifact};

    /// Fails the test if the scaler is ever reached.
    struct Unreachable;

    impl Scaler for Unreachable {
        fn transform(&self, _row: &DVector<f64>) -> Result<DVector<f64>, PredictionError> {
            panic!("scaler must not run");
        }
    }

    struct Fixed(f64);

    impl Predictor for Fixed {
        fn predict(&self, _row: &DVector<f64>) -> Result<f64, PredictionError> {
            Ok(self.0)
        }
    }

    fn bundle(scaler: Arc<dyn Scaler>) -> ArtifactBundle {
        let features: Vec<String> = crate::domain::Field::ALL
            .iter()
            .map(|f| f.feature_name().to_string())
            .chain(std::iter::once("YearRemodAdd".to_string()))
            .collect();
        let defaults: BTreeMap<String, f64> = features.iter().map(|f| (f.clone(), 0.0)).collect();
        ArtifactBundle::new(features, defaults, scaler, Arc::new(Fixed(215_000.0))).unwrap()
    }

    #[test]
    fn missing_bundle_reports_artifact_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let service = ValuationService::load(&dir.path().join("house_price_model.json"), ClampPolicy::default());

        assert!(service.bundle().is_none());
        assert!(service.load_error().is_some());
        let err = service.value(&HouseInput::default()).unwrap_err();
        assert!(err.is_artifact_unavailable());
        // Repeated requests keep reporting the same failure.
        assert!(service.value(&HouseInput::default()).unwrap_err().is_artifact_unavailable());
    }

    #[test]
    fn unavailable_bundle_is_reported_before_form_checks() {
        let err = ValuationError::ArtifactUnavailable {
            path: PathBuf::from("gone.json"),
            reason: "not found".to_string(),
        };
        let service = ValuationService::unavailable(err, ClampPolicy::default());
        let mut input = HouseInput::default();
        input.overall_qual = 99;
        assert!(service.value(&input).unwrap_err().is_artifact_unavailable());
    }

    #[test]
    fn out_of_range_input_never_reaches_the_pipeline() {
        let service = ValuationService::new(bundle(Arc::new(Unreachable)), ClampPolicy::default());
        let mut input = HouseInput::default();
        input.lot_area = 500;
        let err = service.value(&input).unwrap_err();
        assert!(matches!(err, ValuationError::Form(_)));
    }

    #[test]
    fn valid_input_produces_valuation() {
        let service = ValuationService::new(bundle(Arc::new(ScalerArtifact::Identity)), ClampPolicy::default());
        let valuation = service.value(&HouseInput::default()).unwrap();
        assert_eq!(valuation.estimate.price, 215_000.0);
        assert_eq!(valuation.price_per_sqft, Some(86.0));
        assert_eq!(valuation.estimate.row.get("YearRemodAdd"), Some(2015.0));
    }
}
