//! Logarithmic temperature grid.

use crate::error::{RateError, RateResult};
use serde::{Deserialize, Serialize};

/// Log-spaced temperature bins `[start, end]` with `bins` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureGrid {
    pub start: f64,
    pub end: f64,
    pub bins: usize,
}

impl Default for TemperatureGrid {
    fn default() -> Self {
        Self {
            start: 1.0,
            end: 1.0e9,
            bins: 600,
        }
    }
}

/// Location of a temperature on the grid: lower node and fractional offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub index: usize,
    pub frac: f64,
}

impl TemperatureGrid {
    pub fn validate(&self) -> RateResult<()> {
        if !(self.start.is_finite() && self.start > 0.0) {
            return Err(RateError::InvalidGrid {
                what: "start must be positive and finite",
            });
        }
        if !(self.end.is_finite() && self.end > self.start) {
            return Err(RateError::InvalidGrid {
                what: "end must be finite and above start",
            });
        }
        if self.bins < 2 {
            return Err(RateError::InvalidGrid {
                what: "at least two bins are required",
            });
        }
        Ok(())
    }

    fn log_step(&self) -> f64 {
        (self.end.ln() - self.start.ln()) / (self.bins - 1) as f64
    }

    /// Temperature at node `i` [K].
    pub fn temperature(&self, i: usize) -> f64 {
        (self.start.ln() + i as f64 * self.log_step()).exp()
    }

    /// All node temperatures.
    pub fn temperatures(&self) -> Vec<f64> {
        (0..self.bins).map(|i| self.temperature(i)).collect()
    }

    /// Locate `t` on the grid, clamping to the end points.
    pub fn locate(&self, t: f64) -> GridPoint {
        let t = if t.is_nan() { self.start } else { t };
        let t = t.clamp(self.start, self.end);
        let x = (t.ln() - self.start.ln()) / self.log_step();
        let last = self.bins - 2;
        let index = (x.floor().max(0.0) as usize).min(last);
        let frac = (x - index as f64).clamp(0.0, 1.0);
        GridPoint { index, frac }
    }

    /// Linear interpolation of a table defined on this grid.
    #[inline]
    pub fn interpolate(values: &[f64], at: GridPoint) -> f64 {
        let lo = values[at.index];
        let hi = values[at.index + 1];
        lo + at.frac * (hi - lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_is_valid() {
        let grid = TemperatureGrid::default();
        grid.validate().unwrap();
        assert!((grid.temperature(0) - 1.0).abs() < 1e-12);
        assert!((grid.temperature(599) / 1.0e9 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn reject_bad_grids() {
        let mut grid = TemperatureGrid::default();
        grid.bins = 1;
        assert!(grid.validate().is_err());
        let grid = TemperatureGrid {
            start: 10.0,
            end: 5.0,
            bins: 10,
        };
        assert!(grid.validate().is_err());
    }

    #[test]
    fn locate_clamps_out_of_range() {
        let grid = TemperatureGrid::default();
        let low = grid.locate(0.01);
        assert_eq!(low.index, 0);
        assert_eq!(low.frac, 0.0);
        let high = grid.locate(1.0e12);
        assert_eq!(high.index, grid.bins - 2);
        assert_eq!(high.frac, 1.0);
    }

    #[test]
    fn interpolation_is_exact_on_nodes_and_linear_between() {
        let grid = TemperatureGrid {
            start: 1.0,
            end: 100.0,
            bins: 3,
        };
        let values = [1.0, 3.0, 7.0];
        let at = grid.locate(10.0);
        assert!((TemperatureGrid::interpolate(&values, at) - 3.0).abs() < 1e-9);
        let mid = grid.locate(10f64.powf(1.5));
        assert!((TemperatureGrid::interpolate(&values, mid) - 5.0).abs() < 1e-9);
    }
}
