//! Synthetic MICP series generation.
//!
//! Produces a plausible intrusion table for demos and regression fixtures:
//! log-spaced pressures, Washburn radii, a noisy unimodal incremental-volume
//! bump, and optionally one injected ink-bottle artifact.
//!
//! Baseline increments are floored at a fixed fraction of the running
//! cumulative volume, which keeps every baseline ratio below the artifact
//! band. The injected artifact is then the only near-flat step in the series,
//! so fixtures behave deterministically under the default 0.99 threshold.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::LogNormal;

use crate::cli::SampleArgs;
use crate::domain::MicpRecord;
use crate::error::AppError;

/// Washburn relation constant: r(µm) ≈ 106.5 / P(psia), assuming mercury
/// surface tension 485 dyn/cm and a 140° contact angle.
pub const WASHBURN_PSIA_UM: f64 = 106.5;

const PRESSURE_MIN_PSIA: f64 = 10.0;
const PRESSURE_MAX_PSIA: f64 = 30_000.0;

/// Gaussian bump over the normalized step index: position, width, peak
/// incremental volume (mL/g).
const BUMP_CENTER: f64 = 0.45;
const BUMP_WIDTH: f64 = 0.18;
const BUMP_PEAK_ML_G: f64 = 0.004;

/// Multiplicative log-normal noise on the baseline increments.
const NOISE_SIGMA: f64 = 0.25;

/// Baseline increments never fall below this fraction of the running
/// cumulative volume, keeping baseline ratios at or below ~0.98.
const MIN_ADVANCE_FRAC: f64 = 0.02;

/// The artifact step adds only this fraction of the cumulative volume
/// (ratio ≈ 0.995, inside the default band) ...
const ARTIFACT_DIP_FRAC: f64 = 0.005;
/// ... and the next step rebounds by this fraction (ratio ≈ 0.926).
const ARTIFACT_REBOUND_FRAC: f64 = 0.08;

/// Validated generator configuration.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub count: usize,
    pub seed: u64,
    /// Artifact position as a fraction of the series, or `None` for a clean
    /// series.
    pub artifact_at: Option<f64>,
}

impl SampleConfig {
    pub fn from_args(args: &SampleArgs) -> Result<Self, AppError> {
        let artifact_at = (args.artifact && !args.no_artifact).then_some(args.artifact_at);
        let config = Self {
            count: args.count,
            seed: args.seed,
            artifact_at,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.count < 10 {
            return Err(AppError::usage(format!(
                "Sample count must be >= 10, got {}.",
                self.count
            )));
        }
        if let Some(frac) = self.artifact_at {
            if !(frac.is_finite() && frac > 0.0 && frac < 1.0) {
                return Err(AppError::usage(format!(
                    "Artifact position must lie strictly between 0 and 1, got {frac}."
                )));
            }
        }
        Ok(())
    }

    /// Record index of the artifact boundary, clamped so the detector's
    /// lookahead stays in range.
    fn artifact_index(&self) -> Option<usize> {
        self.artifact_at
            .map(|frac| ((frac * (self.count - 1) as f64).round() as usize).clamp(2, self.count - 2))
    }
}

/// Generate a synthetic pressure-ordered MICP series.
pub fn generate_series(config: &SampleConfig) -> Result<Vec<MicpRecord>, AppError> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = LogNormal::new(0.0, NOISE_SIGMA)
        .map_err(|e| AppError::numeric(format!("Noise distribution error: {e}")))?;

    let artifact_index = config.artifact_index();
    let n = config.count;

    let ln_min = PRESSURE_MIN_PSIA.ln();
    let ln_max = PRESSURE_MAX_PSIA.ln();

    let mut records = Vec::with_capacity(n);
    let mut cumulative = 0.0f64;

    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let pressure_psia = (ln_min + u * (ln_max - ln_min)).exp();
        let radius_um = WASHBURN_PSIA_UM / pressure_psia;

        let incremental_ml_g = match artifact_index {
            Some(k) if i == k => ARTIFACT_DIP_FRAC * cumulative,
            Some(k) if i == k + 1 => ARTIFACT_REBOUND_FRAC * cumulative,
            _ => {
                let z = (u - BUMP_CENTER) / BUMP_WIDTH;
                let bump = BUMP_PEAK_ML_G * (-0.5 * z * z).exp();
                let inc = bump * noise.sample(&mut rng);
                inc.max(MIN_ADVANCE_FRAC * cumulative)
            }
        };

        cumulative += incremental_ml_g;
        records.push(MicpRecord {
            pressure_psia,
            radius_um,
            incremental_ml_g,
            cumulative_ml_g: cumulative,
        });
    }

    Ok(records)
}

/// Write a generated series as a CSV the ingest module accepts.
pub fn write_series_csv(path: &Path, records: &[MicpRecord]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::usage(format!("Failed to create sample CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "pressure_psia,radius_um,incremental_volume,cumulative_volume")
        .map_err(|e| AppError::usage(format!("Failed to write sample CSV header: {e}")))?;

    for r in records {
        writeln!(
            file,
            "{:.4},{:.6},{:.8},{:.8}",
            r.pressure_psia, r.radius_um, r.incremental_ml_g, r.cumulative_ml_g
        )
        .map_err(|e| AppError::usage(format!("Failed to write sample CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cutoff;
    use crate::domain::CutoffOutcome;

    fn config(count: usize, artifact_at: Option<f64>) -> SampleConfig {
        SampleConfig {
            count,
            seed: 42,
            artifact_at,
        }
    }

    #[test]
    fn generation_is_deterministic_for_a_seed() {
        let a = generate_series(&config(60, Some(0.7))).unwrap();
        let b = generate_series(&config(60, Some(0.7))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn radii_follow_washburn_and_decrease_with_pressure() {
        let records = generate_series(&config(40, None)).unwrap();
        for pair in records.windows(2) {
            assert!(pair[1].pressure_psia > pair[0].pressure_psia);
            assert!(pair[1].radius_um < pair[0].radius_um);
        }
        let first = &records[0];
        assert!((first.radius_um * first.pressure_psia - WASHBURN_PSIA_UM).abs() < 1e-9);
    }

    #[test]
    fn cumulative_is_the_running_sum_of_increments() {
        let records = generate_series(&config(40, Some(0.5))).unwrap();
        let mut sum = 0.0;
        for r in &records {
            sum += r.incremental_ml_g;
            assert!((r.cumulative_ml_g - sum).abs() < 1e-12);
        }
    }

    #[test]
    fn injected_artifact_is_detected_at_the_requested_position() {
        let cfg = config(60, Some(0.7));
        let records = generate_series(&cfg).unwrap();
        let expected = cfg.artifact_index().unwrap();

        let CutoffOutcome::Found(hit) = cutoff::detect(&records, 0.99).unwrap() else {
            panic!("expected the injected artifact to be detected");
        };
        assert_eq!(hit.boundary_index, expected);
        assert!(hit.current_ratio > 0.99 && hit.current_ratio < 1.0);
        assert!(hit.after_ratio < hit.current_ratio);
    }

    #[test]
    fn clean_series_has_no_cutoff_at_default_threshold() {
        let records = generate_series(&config(60, None)).unwrap();
        assert!(matches!(
            cutoff::detect(&records, 0.99).unwrap(),
            CutoffOutcome::NotFound
        ));
    }

    #[test]
    fn rejects_degenerate_parameters() {
        assert_eq!(generate_series(&config(4, None)).unwrap_err().exit_code(), 2);
        assert_eq!(
            generate_series(&config(60, Some(1.5))).unwrap_err().exit_code(),
            2
        );
    }
}
