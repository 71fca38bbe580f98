//! Where a configuration gets its rate dataset from.

use crate::builtin;
use crate::dataset::RateDataset;
use crate::error::RateResult;
use crate::grid::TemperatureGrid;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An opaque handle to tabulated rate data, resolved at finalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateDataSource {
    /// Tables generated from the analytic fits in [`crate::fits`].
    Builtin,
    /// A JSON dataset file.
    File(PathBuf),
}

impl RateDataSource {
    /// Resolve the source into a validated dataset.
    ///
    /// `grid` and `hydrogen_fraction` only shape the builtin tables; a file
    /// carries its own grid.
    pub fn load(&self, grid: TemperatureGrid, hydrogen_fraction: f64) -> RateResult<RateDataset> {
        match self {
            RateDataSource::Builtin => {
                grid.validate()?;
                Ok(builtin::generate(grid, hydrogen_fraction))
            }
            RateDataSource::File(path) => RateDataset::load(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RateError;

    #[test]
    fn missing_file_is_io_error() {
        let src = RateDataSource::File(PathBuf::from("/nonexistent/gascool/rates.json"));
        let err = src.load(TemperatureGrid::default(), 0.76).unwrap_err();
        assert!(matches!(err, RateError::Io { .. }));
    }

    #[test]
    fn builtin_rejects_bad_grid() {
        let grid = TemperatureGrid {
            start: 0.0,
            end: 1.0,
            bins: 10,
        };
        assert!(RateDataSource::Builtin.load(grid, 0.76).is_err());
    }

    #[test]
    fn yaml_friendly_serde_form() {
        let json = serde_json::to_string(&RateDataSource::Builtin).unwrap();
        assert_eq!(json, "\"builtin\"");
        let file: RateDataSource = serde_json::from_str(r#"{"file":"rates.json"}"#).unwrap();
        assert_eq!(file, RateDataSource::File(PathBuf::from("rates.json")));
    }
}
