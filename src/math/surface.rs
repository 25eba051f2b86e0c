//! Idealized cylindrical surface-area model.
//!
//! Each pore throat is modeled as an open cylinder of radius `r` and uniform
//! length `h`, so its curved surface area is `2·π·r·h`. The length is not
//! measurable per-throat from MICP data; it is carried as a single sample-wide
//! constant (default 1 µm) and cancels out of the normalized weights anyway.

use std::f64::consts::PI;

use crate::domain::MicpRecord;

/// Curved surface area of one throat (µm²).
pub fn curved_area(radius_um: f64, throat_length_um: f64) -> f64 {
    2.0 * PI * radius_um * throat_length_um
}

/// Elementwise areas over a (truncated) series.
pub fn curved_areas(records: &[MicpRecord], throat_length_um: f64) -> Vec<f64> {
    records
        .iter()
        .map(|r| curved_area(r.radius_um, throat_length_um))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cylinder_area() {
        assert!((curved_area(1.0, 1.0) - 2.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn area_scales_linearly_in_radius_and_length() {
        let base = curved_area(0.5, 1.0);
        assert!((curved_area(1.0, 1.0) - 2.0 * base).abs() < 1e-12);
        assert!((curved_area(0.5, 3.0) - 3.0 * base).abs() < 1e-12);
    }

    #[test]
    fn elementwise_over_series() {
        let records = vec![
            MicpRecord {
                pressure_psia: 10.0,
                radius_um: 2.0,
                incremental_ml_g: 0.001,
                cumulative_ml_g: 0.001,
            },
            MicpRecord {
                pressure_psia: 20.0,
                radius_um: 1.0,
                incremental_ml_g: 0.002,
                cumulative_ml_g: 0.003,
            },
        ];
        let areas = curved_areas(&records, 1.0);
        assert_eq!(areas.len(), 2);
        assert!((areas[0] - 4.0 * PI).abs() < 1e-12);
        assert!((areas[1] - 2.0 * PI).abs() < 1e-12);
    }
}
