//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements (cumulative intrusion vs log10 pressure):
//! - kept records: `o`
//! - records discarded by the cut-off: `.`
//! - the boundary record: `X`

use crate::domain::MicpRecord;

/// Minimum pressure used on the log axis; MICP tables occasionally start at
/// a 0 psia vacuum row, which has no log coordinate.
const LOG_FLOOR_PSIA: f64 = 1e-3;

/// Render the intrusion curve with the cut-off boundary marked.
pub fn render_intrusion_plot(
    records: &[MicpRecord],
    boundary_index: usize,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let xs: Vec<f64> = records
        .iter()
        .map(|r| r.pressure_psia.max(LOG_FLOOR_PSIA).log10())
        .collect();
    let ys: Vec<f64> = records.iter().map(|r| r.cumulative_ml_g).collect();

    let (x_min, x_max) = pad_range(min_max(&xs).unwrap_or((0.0, 1.0)), 0.02);
    let (y_min, y_max) = pad_range(min_max(&ys).unwrap_or((0.0, 1.0)), 0.05);

    let mut grid = vec![vec![' '; width]; height];

    for (i, (&x, &y)) in xs.iter().zip(&ys).enumerate() {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = if i == boundary_index {
            'X'
        } else if i <= boundary_index {
            'o'
        } else {
            '.'
        };
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Intrusion: log10(P)=[{x_min:.2}, {x_max:.2}] psia | cumulative=[{y_min:.4}, {y_max:.4}] mL/g\n"
    ));
    for row in &grid {
        let line: String = row.iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.push_str("(o kept, . discarded, X cut-off boundary; pressure on log scale)\n");
    out
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    (min.is_finite() && max.is_finite()).then_some((min, max))
}

fn pad_range((min, max): (f64, f64), frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = if span < 1e-12 { 0.5 } else { span * frac };
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    ((u * (width as f64 - 1.0)).round() as usize).min(width - 1)
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // Row 0 is the top of the grid.
    let row = ((1.0 - u) * (height as f64 - 1.0)).round() as usize;
    row.min(height - 1)
}
