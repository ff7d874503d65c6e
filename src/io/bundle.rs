//! Read artifact bundle JSON files.
//!
//! The file is the portable form of a pre-trained pipeline:
//! - optional label
//! - ordered feature list + stored defaults
//! - fitted scaler and model parameters
//!
//! Any failure here (missing file, bad JSON, broken invariants) is reported as
//! `ValuationError::ArtifactUnavailable`, which is distinct from any per-request
//! prediction error.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ArtifactBundle;
use crate::error::{BundleError, ValuationError};
use crate::models::{ModelArtifact, ScalerArtifact};

/// On-disk schema of an artifact bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub features: Vec<String>,
    pub defaults: BTreeMap<String, f64>,
    pub scaler: ScalerArtifact,
    pub model: ModelArtifact,
}

impl BundleFile {
    /// Validate the parsed file and turn it into a shareable bundle.
    pub fn into_bundle(self) -> Result<ArtifactBundle, BundleError> {
        self.scaler.validate()?;
        self.model.validate(self.features.len())?;

        let bundle = ArtifactBundle::new(
            self.features,
            self.defaults,
            Arc::new(self.scaler),
            Arc::new(self.model),
        )?;

        Ok(match self.label {
            Some(label) => bundle.with_label(label),
            None => bundle,
        })
    }
}

/// Read and validate a bundle JSON file.
pub fn read_bundle_json(path: &Path) -> Result<ArtifactBundle, ValuationError> {
    let unavailable = |reason: String| ValuationError::ArtifactUnavailable {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| unavailable(format!("failed to open: {e}")))?;
    let parsed: BundleFile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| unavailable(format!("invalid bundle JSON: {e}")))?;

    let model_kind = parsed.model.display_name();
    let bundle = parsed.into_bundle().map_err(|e| unavailable(e.to_string()))?;

    info!(
        path = %path.display(),
        features = bundle.features().len(),
        model = model_kind,
        "loaded artifact bundle"
    );
    Ok(bundle)
}
