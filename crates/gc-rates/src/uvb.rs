//! UV background photoionization and photoheating tables.

use crate::error::{RateError, RateResult};
use serde::{Deserialize, Serialize};

/// Photo rates for one redshift.
///
/// Ionization rates are per ion [s^-1]; heating rates are per ion [erg s^-1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhotoRates {
    /// HI + γ -> HII + e
    pub k24: f64,
    /// HeII + γ -> HeIII + e
    pub k25: f64,
    /// HeI + γ -> HeII + e
    pub k26: f64,
    pub pi_hi: f64,
    pub pi_hei: f64,
    pub pi_heii: f64,
}

impl PhotoRates {
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Redshift-dependent UV background, linearly interpolated in redshift.
///
/// Rates vanish above the last tabulated redshift (before reionization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvbTable {
    pub redshift: Vec<f64>,
    pub k24: Vec<f64>,
    pub k25: Vec<f64>,
    pub k26: Vec<f64>,
    pub pi_hi: Vec<f64>,
    pub pi_hei: Vec<f64>,
    pub pi_heii: Vec<f64>,
}

impl UvbTable {
    fn columns(&self) -> [(&'static str, &Vec<f64>); 6] {
        [
            ("uvb.k24", &self.k24),
            ("uvb.k25", &self.k25),
            ("uvb.k26", &self.k26),
            ("uvb.pi_hi", &self.pi_hi),
            ("uvb.pi_hei", &self.pi_hei),
            ("uvb.pi_heii", &self.pi_heii),
        ]
    }

    pub fn validate(&self) -> RateResult<()> {
        let n = self.redshift.len();
        if n < 2 {
            return Err(RateError::TableLength {
                table: "uvb.redshift".into(),
                found: n,
                expected: 2,
            });
        }
        for (i, pair) in self.redshift.windows(2).enumerate() {
            if !(pair[0].is_finite() && pair[1] > pair[0]) {
                return Err(RateError::InvalidEntry {
                    table: "uvb.redshift".into(),
                    index: i + 1,
                });
            }
        }
        for (name, col) in self.columns() {
            if col.len() != n {
                return Err(RateError::TableLength {
                    table: name.into(),
                    found: col.len(),
                    expected: n,
                });
            }
            if let Some(index) = col.iter().position(|v| !v.is_finite() || *v < 0.0) {
                return Err(RateError::InvalidEntry {
                    table: name.into(),
                    index,
                });
            }
        }
        Ok(())
    }

    /// Photo rates at redshift `z`.
    pub fn at(&self, z: f64) -> PhotoRates {
        let zs = &self.redshift;
        let last = zs.len() - 1;
        if !z.is_finite() || z > zs[last] {
            return PhotoRates::default();
        }
        let z = z.max(zs[0]);
        let i = zs.partition_point(|&zi| zi <= z).clamp(1, last) - 1;
        let frac = ((z - zs[i]) / (zs[i + 1] - zs[i])).clamp(0.0, 1.0);
        let lerp = |col: &[f64]| col[i] + frac * (col[i + 1] - col[i]);
        PhotoRates {
            k24: lerp(&self.k24),
            k25: lerp(&self.k25),
            k26: lerp(&self.k26),
            pi_hi: lerp(&self.pi_hi),
            pi_hei: lerp(&self.pi_hei),
            pi_heii: lerp(&self.pi_heii),
        }
    }

    /// Builtin background roughly following Haardt & Madau (2012).
    pub fn builtin() -> Self {
        let redshift = vec![0.0, 0.5, 1.0, 1.5, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let k24 = vec![
            2.28e-14, 1.1e-13, 3.1e-13, 6.0e-13, 8.3e-13, 8.9e-13, 6.8e-13, 4.5e-13, 2.1e-13,
            0.0,
        ];
        // HeI tracks HI; HeII is suppressed before helium reionization
        let k26: Vec<f64> = k24.iter().map(|k| 0.7 * k).collect();
        let heii_scale = [0.02, 0.02, 0.018, 0.015, 0.012, 0.006, 0.002, 0.001, 0.0005, 0.0];
        let k25: Vec<f64> = k24.iter().zip(heii_scale).map(|(k, s)| k * s).collect();
        // mean excess energy per ionization [erg]
        let pi_hi = k24.iter().map(|k| k * 3.9e-12).collect();
        let pi_hei = k26.iter().map(|k| k * 8.0e-12).collect();
        let pi_heii = k25.iter().map(|k| k * 2.1e-11).collect();
        Self {
            redshift,
            k24,
            k25,
            k26,
            pi_hi,
            pi_hei,
            pi_heii,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_valid() {
        UvbTable::builtin().validate().unwrap();
    }

    #[test]
    fn rates_at_table_nodes() {
        let uvb = UvbTable::builtin();
        let at0 = uvb.at(0.0);
        assert!((at0.k24 - 2.28e-14).abs() < 1e-20);
        let at2 = uvb.at(2.0);
        assert!((at2.k24 - 8.3e-13).abs() < 1e-20);
    }

    #[test]
    fn rates_vanish_before_reionization() {
        let uvb = UvbTable::builtin();
        assert!(uvb.at(8.0).is_zero());
        assert!(uvb.at(f64::NAN).is_zero());
    }

    #[test]
    fn interpolates_between_nodes() {
        let uvb = UvbTable::builtin();
        let mid = uvb.at(0.25);
        assert!(mid.k24 > 2.28e-14 && mid.k24 < 1.1e-13);
    }

    #[test]
    fn reject_mismatched_columns() {
        let mut uvb = UvbTable::builtin();
        uvb.k25.pop();
        assert!(matches!(
            uvb.validate(),
            Err(RateError::TableLength { .. })
        ));
    }
}
