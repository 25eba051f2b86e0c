//! CSV ingest and validation.
//!
//! This module turns a porosimeter CSV export into a clean, pressure-ordered
//! `Vec<MicpRecord>` that is safe to scan.
//!
//! Design goals:
//! - **Named columns** resolved by header (with a small alias set), never by
//!   position, so a reordered spreadsheet cannot swap pressure and volume
//! - **Row-level errors with line numbers**, collected and reported together
//! - **No silent row skipping**: dropping interior rows would change which
//!   cumulative-volume pairs the cut-off scan tests
//! - **Separation of concerns**: no detection or weighting logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::cutoff::MIN_RECORDS;
use crate::domain::{MicpRecord, SeriesStats};
use crate::error::AppError;

/// Ingest output: validated records + dataset stats.
#[derive(Debug, Clone)]
pub struct IngestedSeries {
    pub records: Vec<MicpRecord>,
    pub stats: SeriesStats,
    pub rows_read: usize,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
struct RowError {
    line: usize,
    message: String,
}

/// Header aliases per column, all compared after lowercasing and BOM/space
/// stripping. Unit suffixes in headers ("pressure_psia") are common in lab
/// exports, so each column accepts a few spellings.
const PRESSURE_ALIASES: [&str; 4] = ["pressure", "pressure_psia", "pc", "pc_psia"];
const RADIUS_ALIASES: [&str; 4] = ["radius", "radius_um", "pore_radius", "pore_throat_radius"];
const INCREMENTAL_ALIASES: [&str; 3] = [
    "incremental_volume",
    "incremental_pore_volume",
    "inc_volume",
];
const CUMULATIVE_ALIASES: [&str; 3] = [
    "cumulative_volume",
    "cumulative_pore_volume",
    "cum_volume",
];

/// Load and validate an MICP series from a CSV file.
pub fn load_series(path: &Path) -> Result<IngestedSeries, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    read_series(file)
}

/// Reader-based ingest (also used directly by tests).
pub fn read_series<R: Read>(reader: R) -> Result<IngestedSeries, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::usage(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let columns = Columns::resolve(&header_map)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because records() starts after the header row and CSV lines are
        // 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &columns) {
            Ok(rec) => records.push(rec),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if !row_errors.is_empty() {
        return Err(AppError::data(format_row_errors(&row_errors)));
    }

    validate_series(&records)?;

    let stats = compute_stats(&records)
        .ok_or_else(|| AppError::data("No valid records in input."))?;

    Ok(IngestedSeries {
        records,
        stats,
        rows_read,
    })
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    pressure: usize,
    radius: usize,
    incremental: usize,
    cumulative: usize,
}

impl Columns {
    fn resolve(header_map: &HashMap<String, usize>) -> Result<Self, AppError> {
        Ok(Self {
            pressure: resolve_column(header_map, &PRESSURE_ALIASES)?,
            radius: resolve_column(header_map, &RADIUS_ALIASES)?,
            incremental: resolve_column(header_map, &INCREMENTAL_ALIASES)?,
            cumulative: resolve_column(header_map, &CUMULATIVE_ALIASES)?,
        })
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header. If we don't strip it, schema validation incorrectly
    // reports a missing column.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase().replace([' ', '-'], "_")
}

fn resolve_column(header_map: &HashMap<String, usize>, aliases: &[&str]) -> Result<usize, AppError> {
    for alias in aliases {
        if let Some(&idx) = header_map.get(*alias) {
            return Ok(idx);
        }
    }
    Err(AppError::usage(format!(
        "Missing required column: none of `{}` found in the header row.",
        aliases.join("`, `")
    )))
}

fn parse_row(record: &StringRecord, columns: &Columns) -> Result<MicpRecord, String> {
    let pressure_psia = parse_field(record, columns.pressure, "pressure")?;
    let radius_um = parse_field(record, columns.radius, "radius")?;
    let incremental_ml_g = parse_field(record, columns.incremental, "incremental volume")?;
    let cumulative_ml_g = parse_field(record, columns.cumulative, "cumulative volume")?;

    if pressure_psia < 0.0 {
        return Err(format!("Negative pressure {pressure_psia} psia."));
    }
    if radius_um <= 0.0 {
        return Err(format!("Pore radius must be strictly positive, got {radius_um} µm."));
    }
    if incremental_ml_g < 0.0 {
        return Err(format!("Negative incremental volume {incremental_ml_g} mL/g."));
    }
    if cumulative_ml_g < 0.0 {
        return Err(format!("Negative cumulative volume {cumulative_ml_g} mL/g."));
    }

    Ok(MicpRecord {
        pressure_psia,
        radius_um,
        incremental_ml_g,
        cumulative_ml_g,
    })
}

fn parse_field(record: &StringRecord, idx: usize, name: &str) -> Result<f64, String> {
    let raw = record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing {name} value."))?;
    let v: f64 = raw
        .parse()
        .map_err(|_| format!("Invalid {name} value '{raw}'."))?;
    if !v.is_finite() {
        return Err(format!("Non-finite {name} value '{raw}'."));
    }
    Ok(v)
}

fn validate_series(records: &[MicpRecord]) -> Result<(), AppError> {
    if records.len() < MIN_RECORDS {
        return Err(AppError::data(format!(
            "Need at least {MIN_RECORDS} records for cut-off detection, got {}.",
            records.len()
        )));
    }
    for (i, pair) in records.windows(2).enumerate() {
        if pair[1].pressure_psia < pair[0].pressure_psia {
            return Err(AppError::data(format!(
                "Pressure must be non-decreasing: record {} ({} psia) follows record {} ({} psia).",
                i + 1,
                pair[1].pressure_psia,
                i,
                pair[0].pressure_psia
            )));
        }
    }
    Ok(())
}

fn format_row_errors(errors: &[RowError]) -> String {
    const MAX_SHOWN: usize = 5;
    let mut out = format!("{} malformed row(s) in input:", errors.len());
    for e in errors.iter().take(MAX_SHOWN) {
        out.push_str(&format!("\n- line {}: {}", e.line, e.message));
    }
    if errors.len() > MAX_SHOWN {
        out.push_str(&format!("\n- ... and {} more", errors.len() - MAX_SHOWN));
    }
    out
}

fn compute_stats(records: &[MicpRecord]) -> Option<SeriesStats> {
    let mut pressure_min = f64::INFINITY;
    let mut pressure_max = f64::NEG_INFINITY;
    let mut radius_min = f64::INFINITY;
    let mut radius_max = f64::NEG_INFINITY;

    for r in records {
        pressure_min = pressure_min.min(r.pressure_psia);
        pressure_max = pressure_max.max(r.pressure_psia);
        radius_min = radius_min.min(r.radius_um);
        radius_max = radius_max.max(r.radius_um);
    }

    if !pressure_min.is_finite() || !radius_min.is_finite() {
        return None;
    }

    Some(SeriesStats {
        n_records: records.len(),
        pressure_min,
        pressure_max,
        radius_min,
        radius_max,
        total_intrusion: records.last()?.cumulative_ml_g,
    })
}
