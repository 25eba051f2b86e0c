//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during the reduction pipeline
//! - exported to JSON/CSV
//! - reloaded later for comparisons across runs

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One MICP pressure step, with named fields.
///
/// The original lab export is positional (four ordered columns); we resolve
/// columns by header name at ingest and carry named fields from there on, so
/// a reordered spreadsheet cannot silently swap pressure and volume.
///
/// Records are ordered by increasing pressure, i.e. decreasing pore-throat
/// radius (Washburn's relation ties the two).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MicpRecord {
    /// Applied mercury pressure (psia).
    pub pressure_psia: f64,
    /// Pore-throat radius at this pressure (µm).
    pub radius_um: f64,
    /// Incremental pore volume intruded at this step (mL/g).
    pub incremental_ml_g: f64,
    /// Cumulative pore volume intruded up to this step (mL/g).
    ///
    /// Non-decreasing in the absence of measurement error; the cut-off
    /// detector treats decreases as corrupt acquisition pairs.
    pub cumulative_ml_g: f64,
}

/// Summary stats about the records actually loaded.
#[derive(Debug, Clone)]
pub struct SeriesStats {
    pub n_records: usize,
    pub pressure_min: f64,
    pub pressure_max: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    /// Cumulative volume of the last record (total intrusion, mL/g).
    pub total_intrusion: f64,
}

/// A detected ink-bottle cut-off point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CutoffHit {
    /// Index of the boundary record, the last record kept. The truncated
    /// series is `records[..=boundary_index]`.
    pub boundary_index: usize,
    /// The boundary record itself, for diagnostic inspection.
    pub boundary: MicpRecord,
    /// `cum(i) / cum(i+1)` at the detection point (inside the artifact band).
    pub current_ratio: f64,
    /// `cum(i+1) / cum(i+2)` at the detection point (fallen back below).
    pub after_ratio: f64,
}

/// Result of a cut-off scan.
///
/// `NotFound` is an informational outcome, not a detector error: the series
/// never entered the artifact band, and the caller may re-run with a lower
/// threshold. Downstream reductions must not run on the untruncated series.
#[derive(Debug, Clone, Copy)]
pub enum CutoffOutcome {
    Found(CutoffHit),
    NotFound,
}

/// A record of the truncated series together with its derived quantities.
#[derive(Debug, Clone, Copy)]
pub struct WeightedRecord {
    pub record: MicpRecord,
    /// Idealized cylindrical curved surface area, `2·π·r·h` (µm²).
    pub surface_area_um2: f64,
    /// Normalized weight; the vector sums to 1 across the truncated series.
    pub weight: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// All parameters are explicit here (no module-level defaults) so the
/// pipeline stays a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub csv_path: PathBuf,
    /// Cut-off detection threshold t ∈ (0, 1); a cumulative-volume ratio in
    /// (t, 1) marks the artifact band.
    pub threshold: f64,
    /// Idealized pore-throat length h (µm), uniform across the sample.
    pub throat_length_um: f64,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    /// Per-record results CSV (truncated series + areas + weights).
    pub export_records: Option<PathBuf>,
    /// Run summary JSON (`RunSummaryFile`).
    pub export_summary: Option<PathBuf>,
}

/// A saved run summary (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummaryFile {
    pub tool: String,
    pub threshold: f64,
    pub throat_length_um: f64,
    pub rows_read: usize,
    pub records_kept: usize,
    pub cutoff: CutoffHit,
    /// Effective pore-throat radius (µm).
    pub eptr_um: f64,
}
