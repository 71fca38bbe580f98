//! Tabulated rate/cooling datasets and their JSON file format.

use crate::error::{RateError, RateResult};
use crate::grid::TemperatureGrid;
use crate::reaction::{CoolingChannel, Reaction};
use crate::uvb::UvbTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Current dataset format version.
pub const DATASET_VERSION: u32 = 1;

/// Rate and cooling tables on one temperature grid, in CGS.
///
/// A dataset may carry only the tables a given configuration needs; which
/// tables are required is decided when a configuration is finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateDataset {
    pub version: u32,
    pub grid: TemperatureGrid,
    #[serde(default)]
    pub rates: BTreeMap<Reaction, Vec<f64>>,
    #[serde(default)]
    pub cooling: BTreeMap<CoolingChannel, Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uvb: Option<UvbTable>,
}

fn check_column(table: &str, values: &[f64], expected: usize) -> RateResult<()> {
    if values.len() != expected {
        return Err(RateError::TableLength {
            table: table.to_string(),
            found: values.len(),
            expected,
        });
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite() || *v < 0.0) {
        return Err(RateError::InvalidEntry {
            table: table.to_string(),
            index,
        });
    }
    Ok(())
}

impl RateDataset {
    /// Empty dataset on `grid`.
    pub fn new(grid: TemperatureGrid) -> Self {
        Self {
            version: DATASET_VERSION,
            grid,
            rates: BTreeMap::new(),
            cooling: BTreeMap::new(),
            uvb: None,
        }
    }

    /// Check version, grid and every table present.
    pub fn validate(&self) -> RateResult<()> {
        if self.version != DATASET_VERSION {
            return Err(RateError::UnsupportedVersion {
                version: self.version,
            });
        }
        self.grid.validate()?;
        let n = self.grid.bins;
        for (reaction, values) in &self.rates {
            check_column(reaction.key(), values, n)?;
        }
        for (channel, values) in &self.cooling {
            check_column(channel.key(), values, n)?;
        }
        if let Some(uvb) = &self.uvb {
            uvb.validate()?;
        }
        Ok(())
    }

    pub fn rate(&self, reaction: Reaction) -> Option<&[f64]> {
        self.rates.get(&reaction).map(Vec::as_slice)
    }

    pub fn cooling(&self, channel: CoolingChannel) -> Option<&[f64]> {
        self.cooling.get(&channel).map(Vec::as_slice)
    }

    pub fn from_json_str(text: &str) -> RateResult<Self> {
        let dataset: Self = serde_json::from_str(text)?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn to_json_string(&self) -> RateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and validate a dataset file.
    pub fn load(path: &Path) -> RateResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| RateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            rates = dataset.rates.len(),
            cooling = dataset.cooling.len(),
            uvb = dataset.uvb.is_some(),
            "loaded rate dataset"
        );
        Ok(dataset)
    }

    pub fn save(&self, path: &Path) -> RateResult<()> {
        let text = self.to_json_string()?;
        std::fs::write(path, text).map_err(|source| RateError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> TemperatureGrid {
        TemperatureGrid {
            start: 10.0,
            end: 1.0e4,
            bins: 4,
        }
    }

    #[test]
    fn empty_dataset_is_valid() {
        RateDataset::new(small_grid()).validate().unwrap();
    }

    #[test]
    fn reject_short_table() {
        let mut ds = RateDataset::new(small_grid());
        ds.rates.insert(Reaction::K1, vec![0.0; 3]);
        let err = ds.validate().unwrap_err();
        assert!(matches!(err, RateError::TableLength { expected: 4, found: 3, .. }));
    }

    #[test]
    fn reject_negative_entry() {
        let mut ds = RateDataset::new(small_grid());
        ds.cooling
            .insert(CoolingChannel::Metal, vec![1.0, 1.0, -1.0, 1.0]);
        assert!(matches!(
            ds.validate(),
            Err(RateError::InvalidEntry { index: 2, .. })
        ));
    }

    #[test]
    fn reject_unknown_version() {
        let mut ds = RateDataset::new(small_grid());
        ds.version = 99;
        assert!(matches!(
            ds.validate(),
            Err(RateError::UnsupportedVersion { version: 99 })
        ));
    }

    #[test]
    fn json_uses_readable_keys() {
        let mut ds = RateDataset::new(small_grid());
        ds.rates.insert(Reaction::K2, vec![1.0; 4]);
        let json = ds.to_json_string().unwrap();
        assert!(json.contains("\"k2\""));
        let back = RateDataset::from_json_str(&json).unwrap();
        assert_eq!(back, ds);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            RateDataset::from_json_str("{ not json"),
            Err(RateError::Parse(_))
        ));
    }
}
