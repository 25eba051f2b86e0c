//! Per-record weights from the volume/area ratio.
//!
//! The raw weight of a record is how much pore volume it contributed per unit
//! of throat surface area: `raw(i) = incremental(i) / area(i)`. Raw weights
//! are then normalized to sum to 1, which makes the downstream average
//! insensitive to any uniform rescaling of the volume column (units, sample
//! mass normalization).

use crate::error::AppError;

/// Tolerance for the sum-to-1 invariant on the output.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Compute normalized weights from aligned incremental-volume and
/// surface-area vectors.
///
/// Radii are strictly positive in valid MICP data, so a zero area should not
/// occur; it is reported as a domain error rather than propagated as a
/// division artifact, as is a zero or non-finite raw sum.
pub fn weight_vector(incremental_ml_g: &[f64], areas_um2: &[f64]) -> Result<Vec<f64>, AppError> {
    if incremental_ml_g.len() != areas_um2.len() {
        return Err(AppError::numeric(format!(
            "Weight inputs are misaligned: {} volumes vs {} areas.",
            incremental_ml_g.len(),
            areas_um2.len()
        )));
    }

    let mut raw = Vec::with_capacity(areas_um2.len());
    for (i, (&volume, &area)) in incremental_ml_g.iter().zip(areas_um2).enumerate() {
        if !(area.is_finite() && area > 0.0) {
            return Err(AppError::numeric(format!(
                "Record {i}: surface area {area} is not strictly positive."
            )));
        }
        let r = volume / area;
        if !r.is_finite() {
            return Err(AppError::numeric(format!(
                "Record {i}: raw weight is not finite (volume={volume}, area={area})."
            )));
        }
        raw.push(r);
    }

    let total: f64 = raw.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(AppError::numeric(format!(
            "Degenerate raw weight sum {total}; cannot normalize."
        )));
    }

    Ok(raw.into_iter().map(|r| r / total).collect())
}
