//! Shared pipeline logic used by every front-end command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> cut-off detection -> truncation -> surface areas -> weights -> EPTR
//!
//! The `run` and `value` commands can then focus on presentation (report vs
//! bare scalar).

use crate::cutoff;
use crate::domain::{CutoffHit, CutoffOutcome, MicpRecord, RunConfig, WeightedRecord};
use crate::error::AppError;
use crate::io::ingest::{self, IngestedSeries};
use crate::math::{eptr, surface, weights};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedSeries,
    pub hit: CutoffHit,
    pub weighted: Vec<WeightedRecord>,
    pub eptr_um: f64,
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_eptr(config: &RunConfig) -> Result<RunOutput, AppError> {
    let ingest = ingest::load_series(&config.csv_path)?;
    run_eptr_with_series(config, ingest)
}

/// Execute the pipeline with a pre-loaded series.
///
/// Useful for callers that already hold the series in memory (tests, batch
/// drivers) and for re-running with a different threshold without re-reading
/// the file.
pub fn run_eptr_with_series(config: &RunConfig, ingest: IngestedSeries) -> Result<RunOutput, AppError> {
    let hit = match cutoff::detect(&ingest.records, config.threshold)? {
        CutoffOutcome::Found(hit) => hit,
        CutoffOutcome::NotFound => {
            // Terminal for the run: the reductions must not see the
            // untruncated series.
            return Err(AppError::new(
                1,
                format!(
                    "No cut-off found at threshold {:.3}; lower --threshold and re-run.",
                    config.threshold
                ),
            ));
        }
    };

    let truncated = cutoff::truncate(&ingest.records, &hit);
    let weighted = weigh_records(&truncated, config.throat_length_um)?;

    let weight_vec: Vec<f64> = weighted.iter().map(|w| w.weight).collect();
    let radii: Vec<f64> = truncated.iter().map(|r| r.radius_um).collect();
    let eptr_um = eptr::weighted_mean_radius(&weight_vec, &radii)?;

    Ok(RunOutput {
        ingest,
        hit,
        weighted,
        eptr_um,
    })
}

fn weigh_records(truncated: &[MicpRecord], throat_length_um: f64) -> Result<Vec<WeightedRecord>, AppError> {
    let areas = surface::curved_areas(truncated, throat_length_um);
    let incremental: Vec<f64> = truncated.iter().map(|r| r.incremental_ml_g).collect();
    let weight_vec = weights::weight_vector(&incremental, &areas)?;

    Ok(truncated
        .iter()
        .zip(areas.iter().zip(&weight_vec))
        .map(|(&record, (&surface_area_um2, &weight))| WeightedRecord {
            record,
            surface_area_um2,
            weight,
        })
        .collect())
}
