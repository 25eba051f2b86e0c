//! Read/write run summary JSON files.
//!
//! The summary JSON is the "portable" representation of a run:
//! - parameters (threshold, throat length)
//! - the detected cut-off (boundary index + full boundary record)
//! - the resulting EPTR
//!
//! The schema is defined by `domain::RunSummaryFile`.

use std::fs::File;
use std::path::Path;

use crate::app::pipeline::RunOutput;
use crate::domain::{RunConfig, RunSummaryFile};
use crate::error::AppError;

/// Write a run summary JSON file.
pub fn write_summary_json(path: &Path, output: &RunOutput, config: &RunConfig) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::usage(format!("Failed to create summary JSON '{}': {e}", path.display()))
    })?;

    let summary = RunSummaryFile {
        tool: "eptr".to_string(),
        threshold: config.threshold,
        throat_length_um: config.throat_length_um,
        rows_read: output.ingest.rows_read,
        records_kept: output.weighted.len(),
        cutoff: output.hit,
        eptr_um: output.eptr_um,
    };

    serde_json::to_writer_pretty(file, &summary)
        .map_err(|e| AppError::usage(format!("Failed to write summary JSON: {e}")))?;

    Ok(())
}

/// Read a run summary JSON file.
pub fn read_summary_json(path: &Path) -> Result<RunSummaryFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!("Failed to open summary JSON '{}': {e}", path.display()))
    })?;
    let summary: RunSummaryFile = serde_json::from_reader(file)
        .map_err(|e| AppError::usage(format!("Invalid summary JSON: {e}")))?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CutoffHit, MicpRecord, SeriesStats, WeightedRecord};
    use crate::io::ingest::IngestedSeries;
    use std::path::PathBuf;

    #[test]
    fn summary_round_trips_through_json() {
        let record = MicpRecord {
            pressure_psia: 850.0,
            radius_um: 0.1255,
            incremental_ml_g: 0.000052,
            cumulative_ml_g: 0.104,
        };
        let output = RunOutput {
            ingest: IngestedSeries {
                records: vec![record; 3],
                stats: SeriesStats {
                    n_records: 3,
                    pressure_min: 10.0,
                    pressure_max: 850.0,
                    radius_min: 0.1255,
                    radius_max: 10.65,
                    total_intrusion: 0.104,
                },
                rows_read: 3,
            },
            hit: CutoffHit {
                boundary_index: 2,
                boundary: record,
                current_ratio: 0.995,
                after_ratio: 0.926,
            },
            weighted: vec![WeightedRecord {
                record,
                surface_area_um2: 0.7885,
                weight: 1.0,
            }],
            eptr_um: 2.6,
        };
        let config = RunConfig {
            csv_path: PathBuf::from("sample.csv"),
            threshold: 0.99,
            throat_length_um: 1.0,
            plot: false,
            plot_width: 72,
            plot_height: 20,
            export_records: None,
            export_summary: None,
        };

        let path = std::env::temp_dir().join(format!(
            "eptr_summary_roundtrip_{}.json",
            std::process::id()
        ));
        write_summary_json(&path, &output, &config).unwrap();
        let summary = read_summary_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(summary.tool, "eptr");
        assert_eq!(summary.cutoff.boundary_index, 2);
        assert!((summary.eptr_um - 2.6).abs() < 1e-12);
        assert!((summary.cutoff.boundary.pressure_psia - 850.0).abs() < 1e-12);
    }
}
