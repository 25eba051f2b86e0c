//! Export per-record results to CSV.
//!
//! The export covers the truncated series with its derived quantities and is
//! meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::WeightedRecord;
use crate::error::AppError;

/// Write the truncated series with areas and weights to a CSV file.
pub fn write_records_csv(path: &Path, records: &[WeightedRecord]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::usage(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(
        file,
        "pressure_psia,radius_um,incremental_ml_g,cumulative_ml_g,surface_area_um2,weight"
    )
    .map_err(|e| AppError::usage(format!("Failed to write export CSV header: {e}")))?;

    for w in records {
        let r = &w.record;
        writeln!(
            file,
            "{},{},{},{},{:.10},{:.10}",
            r.pressure_psia,
            r.radius_um,
            r.incremental_ml_g,
            r.cumulative_ml_g,
            w.surface_area_um2,
            w.weight,
        )
        .map_err(|e| AppError::usage(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
