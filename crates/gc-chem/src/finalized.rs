//! Immutable, finalized chemistry configuration.

use crate::config::ChemistryConfiguration;
use crate::error::{ConfigError, ConfigResult};
use crate::tables::RateTables;
use gc_core::{ReadyToken, UnitSystem};
use gc_fields::NetworkVariant;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;

#[derive(Debug)]
struct Inner {
    config: ChemistryConfiguration,
    units: UnitSystem,
    variant: NetworkVariant,
    token: ReadyToken,
    tables: Option<RateTables>,
}

/// A validated configuration with its rate tables loaded.
///
/// There is no way back to a mutable configuration: [`config`](Self::config)
/// hands out a shared reference to the snapshot taken at finalization.
/// Cloning is cheap and clones share the same tables.
#[derive(Debug, Clone)]
pub struct FinalizedConfig {
    inner: Arc<Inner>,
}

#[derive(Serialize)]
struct Canonical<'a> {
    chemistry: &'a ChemistryConfiguration,
    units: &'a UnitSystem,
}

/// SHA-256 of the canonical JSON form of `(config, units)`.
pub fn compute_token(
    config: &ChemistryConfiguration,
    units: &UnitSystem,
) -> ConfigResult<ReadyToken> {
    let json = serde_json::to_string(&Canonical {
        chemistry: config,
        units,
    })?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(ReadyToken::from_digest(format!("{:x}", hasher.finalize())))
}

impl FinalizedConfig {
    pub(crate) fn build(config: &ChemistryConfiguration, units: &UnitSystem) -> ConfigResult<Self> {
        config.validate()?;
        let variant = config.variant()?;

        let tables = if config.use_chemistry {
            let source = config
                .rate_data_source
                .as_ref()
                .ok_or(ConfigError::MissingDataSource)?;
            let dataset = source.load(config.temperature_grid(), config.hydrogen_fraction_by_mass)?;
            Some(RateTables::from_dataset(&dataset, config, units)?)
        } else {
            None
        };

        let token = compute_token(config, units)?;
        tracing::info!(
            token = token.short(),
            level = config.primordial_chemistry,
            metals = config.metal_cooling,
            cooling = config.with_radiative_cooling,
            uvb = config.uv_background,
            "finalized chemistry configuration"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                config: config.clone(),
                units: units.clone(),
                variant,
                token,
                tables,
            }),
        })
    }

    pub fn token(&self) -> &ReadyToken {
        &self.inner.token
    }

    /// The configuration snapshot this was built from.
    pub fn config(&self) -> &ChemistryConfiguration {
        &self.inner.config
    }

    pub fn units(&self) -> &UnitSystem {
        &self.inner.units
    }

    pub fn variant(&self) -> NetworkVariant {
        self.inner.variant
    }

    /// Loaded tables; `None` when chemistry is off.
    pub fn tables(&self) -> Option<&RateTables> {
        self.inner.tables.as_ref()
    }

    /// Finalize again.
    ///
    /// Against the same units this is a no-op returning an equal
    /// configuration (same token). Any other units are rejected.
    pub fn refinalize(&self, units: &UnitSystem) -> ConfigResult<FinalizedConfig> {
        if *units == self.inner.units {
            Ok(self.clone())
        } else {
            Err(ConfigError::AlreadyFinalized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_rates::RateDataSource;
    use std::path::PathBuf;

    fn units() -> UnitSystem {
        UnitSystem::physical(1.67e-24, 1.0, 1.0e12).unwrap()
    }

    fn full() -> ChemistryConfiguration {
        ChemistryConfiguration {
            use_chemistry: true,
            with_radiative_cooling: true,
            primordial_chemistry: 3,
            metal_cooling: true,
            uv_background: true,
            rate_data_source: Some(RateDataSource::Builtin),
            ..Default::default()
        }
    }

    #[test]
    fn double_finalization_gives_equal_tokens() {
        let cfg = full();
        let a = cfg.finalize(&units()).unwrap();
        let b = cfg.finalize(&units()).unwrap();
        assert_eq!(a.token(), b.token());
        assert_eq!(a.refinalize(&units()).unwrap().token(), a.token());
    }

    #[test]
    fn refinalize_with_other_units_fails() {
        let a = full().finalize(&units()).unwrap();
        let other = UnitSystem::physical(1.0, 1.0, 1.0).unwrap();
        assert!(matches!(
            a.refinalize(&other),
            Err(ConfigError::AlreadyFinalized)
        ));
    }

    #[test]
    fn token_tracks_contents() {
        let a = full().finalize(&units()).unwrap();
        let b = ChemistryConfiguration {
            metal_cooling: false,
            ..full()
        }
        .finalize(&units())
        .unwrap();
        assert_ne!(a.token(), b.token());
        let c = full()
            .finalize(&UnitSystem::physical(1.67e-24, 1.0, 2.0e12).unwrap())
            .unwrap();
        assert_ne!(a.token(), c.token());
    }

    #[test]
    fn failed_finalization_leaves_config_intact() {
        let cfg = ChemistryConfiguration {
            rate_data_source: Some(RateDataSource::File(PathBuf::from(
                "/nonexistent/gascool/rates.json",
            ))),
            ..full()
        };
        let before = cfg.clone();
        let err = cfg.finalize(&units()).unwrap_err();
        assert!(matches!(err, ConfigError::UnreadableTable(_)));
        assert_eq!(cfg, before);
    }

    #[test]
    fn chemistry_off_needs_no_tables() {
        let cfg = ChemistryConfiguration::default();
        let fin = cfg.finalize(&units()).unwrap();
        assert!(fin.tables().is_none());
        assert_eq!(fin.config(), &cfg);
    }

    #[test]
    fn finalized_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FinalizedConfig>();
    }
}
