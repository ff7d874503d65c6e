//! Scale-then-predict over an assembled row.

use tracing::{debug, warn};

use crate::domain::{ArtifactBundle, ClampPolicy, Estimate, FeatureOverrides};
use crate::error::PredictionError;
use crate::valuation::assemble::assemble_row;

/// Estimate a price for `input` using `bundle`.
///
/// Pure: the same `(input, bundle, policy)` always yields the same result.
pub fn estimate(
    input: &FeatureOverrides,
    bundle: &ArtifactBundle,
    policy: ClampPolicy,
) -> Result<Estimate, PredictionError> {
    let row = assemble_row(input, bundle)?;

    let scaled = bundle.scaler().transform(&row.values)?;
    if scaled.len() != row.len() {
        return Err(PredictionError::Scaling {
            reason: format!("output has {} entries for a {}-feature row", scaled.len(), row.len()),
        });
    }

    let raw = bundle.model().predict(&scaled)?;
    if !raw.is_finite() {
        return Err(PredictionError::NonFinite { value: raw });
    }

    let (price, clamped) = policy.apply(raw);
    if clamped {
        warn!(raw, floor = policy.floor, "prediction below display floor; clamped");
    }
    debug!(features = row.len(), raw, price, "estimate complete");

    Ok(Estimate {
        row,
        raw,
        price,
        clamped,
    })
}
