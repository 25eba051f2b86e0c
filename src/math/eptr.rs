//! Weighted-average radius reduction.
//!
//! The formal definition is `Σ w·r / Σ w`. Weights produced by
//! `math::weights` already sum to 1, which would let the divisor be dropped,
//! but that shortcut silently couples this function to the normalization
//! invariant of one particular producer. We keep the divisor so the reduction
//! stays correct for weights from any source.

use crate::error::AppError;

/// Weighted average of `radii_um` under `weights`.
pub fn weighted_mean_radius(weights: &[f64], radii_um: &[f64]) -> Result<f64, AppError> {
    if weights.len() != radii_um.len() {
        return Err(AppError::numeric(format!(
            "EPTR inputs are misaligned: {} weights vs {} radii.",
            weights.len(),
            radii_um.len()
        )));
    }
    if weights.is_empty() {
        return Err(AppError::numeric("EPTR of an empty series is undefined."));
    }

    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(AppError::numeric(format!(
            "Degenerate weight sum {total}; EPTR is undefined."
        )));
    }

    let scaled: f64 = weights.iter().zip(radii_um).map(|(w, r)| w * r).sum();
    let eptr = scaled / total;
    if !eptr.is_finite() {
        return Err(AppError::numeric("EPTR reduction produced a non-finite value."));
    }
    Ok(eptr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textbook_two_point_average() {
        let eptr = weighted_mean_radius(&[0.2, 0.8], &[5.0, 2.0]).unwrap();
        assert!((eptr - 2.6).abs() < 1e-12);
    }

    #[test]
    fn constant_radii_reduce_to_that_radius() {
        let eptr = weighted_mean_radius(&[0.1, 0.6, 0.3], &[4.2, 4.2, 4.2]).unwrap();
        assert!((eptr - 4.2).abs() < 1e-12);
    }

    #[test]
    fn unnormalized_weights_still_give_the_correct_average() {
        // Same weights as the textbook case, scaled by 50: the divisor keeps
        // the result identical.
        let eptr = weighted_mean_radius(&[10.0, 40.0], &[5.0, 2.0]).unwrap();
        assert!((eptr - 2.6).abs() < 1e-12);
    }

    #[test]
    fn zero_weight_sum_is_a_domain_error() {
        let err = weighted_mean_radius(&[0.0, 0.0], &[5.0, 2.0]).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn empty_input_is_a_domain_error() {
        let err = weighted_mean_radius(&[], &[]).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn truncation_error_shrinks_toward_the_cutoff() {
        // Regression-style convergence check: on clean monotonic data, EPTR
        // over ever-longer prefixes approaches the EPTR at the true boundary.
        use crate::math::{surface, weights};

        let radii = [16.0, 8.0, 4.0, 2.0, 1.0, 0.5];
        let incremental = [0.001, 0.004, 0.008, 0.006, 0.002, 0.0005];

        let eptr_at = |len: usize| -> f64 {
            let areas: Vec<f64> = radii[..len]
                .iter()
                .map(|&r| surface::curved_area(r, 1.0))
                .collect();
            let w = weights::weight_vector(&incremental[..len], &areas).unwrap();
            weighted_mean_radius(&w, &radii[..len]).unwrap()
        };

        let full = eptr_at(radii.len());
        let mut prev_err = f64::INFINITY;
        for len in 2..radii.len() {
            let err = (eptr_at(len) - full).abs();
            assert!(err < prev_err, "error did not shrink at prefix length {len}");
            prev_err = err;
        }
    }
}
