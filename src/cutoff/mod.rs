//! Ink-bottle cut-off detection.
//!
//! Narrow pore throats mask larger pores behind them, so late in an MICP run
//! the cumulative intrusion curve goes nearly flat and then jumps again once
//! the masked volume fills. The detector scans consecutive cumulative-volume
//! ratios for exactly that signature and truncates the series at it.
//!
//! For each i with a two-record lookahead available:
//!
//! ```text
//! c(i) = cum(i) / cum(i+1)    "current ratio"
//! a(i) = cum(i+1) / cum(i+2)  "after ratio"
//! ```
//!
//! A cut-off is the first i where `t < c(i) < 1` (near-flat step) and
//! `c(i) > a(i)` (intrusion picks back up); the boundary record is `i+1`.
//!
//! A ratio >= 1 means cumulative volume decreased or stalled exactly, which
//! is physically invalid acquisition. That pair is corrupt, so the scan skips
//! an extra record rather than testing a pair that shares the bad value. The
//! skip is modeled as an explicit state transition because it changes which
//! pairs get tested at all, and therefore which cut-off is detected.

use crate::domain::{CutoffHit, CutoffOutcome, MicpRecord};
use crate::error::AppError;

/// The detector's lookahead reads `i+2`, so anything shorter cannot be
/// scanned at all.
pub const MIN_RECORDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Testing ratio pairs for the artifact signature.
    SeekingArtifact,
    /// The previous pair was corrupt; consume one record untested.
    SkipCorruptPair,
}

/// Scan a pressure-ordered series for the first ink-bottle cut-off.
///
/// `threshold` must lie in (0, 1); the series must have at least
/// [`MIN_RECORDS`] records. A series of exactly 3 records tests only i = 0.
pub fn detect(series: &[MicpRecord], threshold: f64) -> Result<CutoffOutcome, AppError> {
    if !(threshold.is_finite() && threshold > 0.0 && threshold < 1.0) {
        return Err(AppError::usage(format!(
            "Invalid threshold {threshold}: must lie strictly between 0 and 1."
        )));
    }
    if series.len() < MIN_RECORDS {
        return Err(AppError::data(format!(
            "Cut-off detection needs at least {MIN_RECORDS} records, got {}.",
            series.len()
        )));
    }

    let mut state = ScanState::SeekingArtifact;
    let mut i = 0usize;

    // Both ratios need records i+1 and i+2.
    while i + 2 < series.len() {
        if state == ScanState::SkipCorruptPair {
            state = ScanState::SeekingArtifact;
            i += 1;
            continue;
        }

        let current = series[i].cumulative_ml_g / series[i + 1].cumulative_ml_g;

        // Cumulative volume decreased, stalled exactly, or was zero on both
        // sides (ratio NaN/inf): corrupt pair, skip the shared record too.
        if !current.is_finite() || current >= 1.0 {
            state = ScanState::SkipCorruptPair;
            i += 1;
            continue;
        }

        if current > threshold {
            let after = series[i + 1].cumulative_ml_g / series[i + 2].cumulative_ml_g;
            if current > after {
                return Ok(CutoffOutcome::Found(CutoffHit {
                    boundary_index: i + 1,
                    boundary: series[i + 1],
                    current_ratio: current,
                    after_ratio: after,
                }));
            }
        }

        i += 1;
    }

    Ok(CutoffOutcome::NotFound)
}

/// The longest prefix ending at the boundary record, as a new owned series.
pub fn truncate(series: &[MicpRecord], hit: &CutoffHit) -> Vec<MicpRecord> {
    series[..=hit.boundary_index].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(cumulative: f64) -> MicpRecord {
        MicpRecord {
            pressure_psia: 100.0,
            radius_um: 1.0,
            incremental_ml_g: 0.001,
            cumulative_ml_g: cumulative,
        }
    }

    fn series(cumulative: &[f64]) -> Vec<MicpRecord> {
        cumulative.iter().copied().map(rec).collect()
    }

    #[test]
    fn finds_cutoff_at_near_flat_step_followed_by_rebound() {
        // c(0) = 0.0995/0.1000 = 0.995 in (0.99, 1); a(0) = 0.1/0.11 < c(0).
        let s = series(&[0.0995, 0.1000, 0.1100]);
        match detect(&s, 0.99).unwrap() {
            CutoffOutcome::Found(hit) => {
                assert_eq!(hit.boundary_index, 1);
                assert!((hit.current_ratio - 0.995).abs() < 1e-12);
                assert!(hit.after_ratio < hit.current_ratio);
            }
            CutoffOutcome::NotFound => panic!("expected a cut-off"),
        }
    }

    #[test]
    fn truncates_to_boundary_inclusive() {
        let s = series(&[0.05, 0.0995, 0.1000, 0.1100]);
        let CutoffOutcome::Found(hit) = detect(&s, 0.99).unwrap() else {
            panic!("expected a cut-off");
        };
        assert_eq!(hit.boundary_index, 2);
        let kept = truncate(&s, &hit);
        assert_eq!(kept.len(), 3);
        assert_eq!(kept.last().unwrap().cumulative_ml_g, 0.1000);
    }

    #[test]
    fn three_record_series_below_threshold_reports_not_found() {
        // c(0) = 0.01/0.0165 = 0.606, well below 0.99; only i = 0 is
        // testable, so the scan exhausts without a match.
        let s = series(&[0.01, 0.0165, 0.0170]);
        assert!(matches!(detect(&s, 0.99).unwrap(), CutoffOutcome::NotFound));
    }

    #[test]
    fn monotone_tail_toward_one_is_not_a_cutoff() {
        // Ratios enter (t, 1) but keep rising toward 1 (increments shrink
        // monotonically), so c(i) > a(i) never holds.
        let s = series(&[0.1000, 0.1005, 0.1008, 0.1009]);
        assert!(matches!(detect(&s, 0.99).unwrap(), CutoffOutcome::NotFound));
    }

    #[test]
    fn corrupt_pair_skips_an_extra_record() {
        // c(0) = 0.10/0.0995 > 1: corrupt, so i = 1 is never tested even
        // though it would match (c(1) = 0.0995/0.0999 = 0.996, a(1) = 0.908).
        // The scan resumes at i = 2 and detects the later artifact instead.
        let s = series(&[0.10, 0.0995, 0.0999, 0.11, 0.1105, 0.12]);
        let CutoffOutcome::Found(hit) = detect(&s, 0.99).unwrap() else {
            panic!("expected a cut-off");
        };
        // Without the extra skip the boundary would be record 2.
        assert_eq!(hit.boundary_index, 4);
    }

    #[test]
    fn flat_pair_is_treated_as_corrupt() {
        // Exactly flat cumulative volume gives c(i) = 1, which is inside the
        // corrupt class, not the artifact band.
        let s = series(&[0.10, 0.10, 0.1005, 0.1006, 0.1007]);
        assert!(matches!(detect(&s, 0.99).unwrap(), CutoffOutcome::NotFound));
    }

    #[test]
    fn zero_cumulative_volumes_do_not_panic_the_scan() {
        let s = series(&[0.0, 0.0, 0.05, 0.10, 0.15]);
        assert!(matches!(detect(&s, 0.99).unwrap(), CutoffOutcome::NotFound));
    }

    #[test]
    fn rejects_short_series() {
        let s = series(&[0.01, 0.02]);
        let err = detect(&s, 0.99).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let s = series(&[0.01, 0.02, 0.03]);
        assert_eq!(detect(&s, 1.0).unwrap_err().exit_code(), 2);
        assert_eq!(detect(&s, 0.0).unwrap_err().exit_code(), 2);
        assert_eq!(detect(&s, f64::NAN).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn lower_threshold_widens_the_artifact_band() {
        // c(0) = 0.98 is outside (0.99, 1) but inside (0.95, 1).
        let s = series(&[0.098, 0.100, 0.120]);
        assert!(matches!(detect(&s, 0.99).unwrap(), CutoffOutcome::NotFound));
        assert!(matches!(
            detect(&s, 0.95).unwrap(),
            CutoffOutcome::Found(hit) if hit.boundary_index == 1
        ));
    }
}
