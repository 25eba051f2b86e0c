//! Run summary and result formatting.

use crate::app::pipeline::RunOutput;
use crate::domain::{CutoffHit, RunConfig};

/// Format the full run summary (dataset stats + cut-off diagnostics + weight
/// sanity line).
pub fn format_run_summary(run: &RunOutput, config: &RunConfig) -> String {
    let mut out = String::new();

    out.push_str("=== eptr - MICP Effective Pore-Throat Radius ===\n");
    out.push_str(&format!("Input: {}\n", config.csv_path.display()));
    out.push_str(&format!(
        "Threshold: {:.3} | Throat length: {:.3} µm\n",
        config.threshold, config.throat_length_um
    ));
    out.push_str(&format!(
        "Records: read={} kept={} (cut-off at record {})\n",
        run.ingest.rows_read,
        run.weighted.len(),
        run.hit.boundary_index,
    ));
    out.push_str(&format!(
        "Pressure: [{:.1}, {:.1}] psia | Radius: [{:.4}, {:.4}] µm | Total intrusion: {:.4} mL/g\n",
        run.ingest.stats.pressure_min,
        run.ingest.stats.pressure_max,
        run.ingest.stats.radius_min,
        run.ingest.stats.radius_max,
        run.ingest.stats.total_intrusion,
    ));

    out.push_str("\nCut-off boundary record:\n");
    out.push_str(&format_boundary(&run.hit));

    let max_weight = run.weighted.iter().map(|w| w.weight).fold(0.0, f64::max);
    let sum: f64 = run.weighted.iter().map(|w| w.weight).sum();
    out.push_str(&format!(
        "\nWeights: n={} | sum={:.9} | max={:.6}\n",
        run.weighted.len(),
        sum,
        max_weight
    ));

    out
}

/// Format the boundary record's full field set for diagnostic inspection.
pub fn format_boundary(hit: &CutoffHit) -> String {
    let mut out = String::new();
    out.push_str(&format!("- pressure            : {:.2} psia\n", hit.boundary.pressure_psia));
    out.push_str(&format!("- radius              : {:.4} µm\n", hit.boundary.radius_um));
    out.push_str(&format!("- incremental volume  : {:.6} mL/g\n", hit.boundary.incremental_ml_g));
    out.push_str(&format!("- cumulative volume   : {:.6} mL/g\n", hit.boundary.cumulative_ml_g));
    out.push_str(&format!(
        "- cumulative ratios   : current={:.6} after={:.6}\n",
        hit.current_ratio, hit.after_ratio
    ));
    out
}

/// The human-readable result sentence, fixed 3-decimal rounding.
pub fn format_eptr_line(eptr_um: f64) -> String {
    format!("Effective pore-throat radius: {} µm", format_eptr_value(eptr_um))
}

/// Bare scalar for the `value` command and scripting.
pub fn format_eptr_value(eptr_um: f64) -> String {
    format!("{eptr_um:.3}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MicpRecord;

    #[test]
    fn eptr_line_rounds_to_three_decimals() {
        assert_eq!(
            format_eptr_line(2.6),
            "Effective pore-throat radius: 2.600 µm"
        );
        assert_eq!(format_eptr_value(0.123456), "0.123");
        assert_eq!(format_eptr_value(1.9996), "2.000");
    }

    #[test]
    fn boundary_lists_all_record_fields() {
        let hit = CutoffHit {
            boundary_index: 12,
            boundary: MicpRecord {
                pressure_psia: 850.0,
                radius_um: 0.1255,
                incremental_ml_g: 0.000052,
                cumulative_ml_g: 0.104,
            },
            current_ratio: 0.9950,
            after_ratio: 0.9259,
        };
        let text = format_boundary(&hit);
        assert!(text.contains("850.00 psia"));
        assert!(text.contains("0.1255 µm"));
        assert!(text.contains("0.000052 mL/g"));
        assert!(text.contains("current=0.995000"));
    }
}
