//! Slotting configuration loading: optional JSON file, then environment overrides.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use slotmaster_slotting::{ConfigError, SlottingConfig};

pub const ENV_FAST_MOVER_MAX: &str = "SLOTMASTER_FAST_MOVER_MAX";
pub const ENV_A_MAX: &str = "SLOTMASTER_A_MAX";
pub const ENV_B_MAX: &str = "SLOTMASTER_B_MAX";
pub const ENV_C_MAX: &str = "SLOTMASTER_C_MAX";
pub const ENV_GOLDEN_ZONE_FRACTION: &str = "SLOTMASTER_GOLDEN_ZONE_FRACTION";
pub const ENV_TARGET_FAST_TIER_SHARE: &str = "SLOTMASTER_TARGET_FAST_TIER_SHARE";
pub const ENV_REBALANCE_THRESHOLD: &str = "SLOTMASTER_REBALANCE_THRESHOLD";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse slotting config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Parse a JSON document; missing fields keep their defaults. Not validated.
pub fn load_from_json_str(json: &str) -> Result<SlottingConfig, ConfigLoadError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a JSON config file. Not validated.
pub fn load_from_file(path: &Path) -> Result<SlottingConfig, ConfigLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_json_str(&contents)
}

/// Apply `SLOTMASTER_*` overrides from the process environment.
pub fn apply_env_overrides(config: SlottingConfig) -> Result<SlottingConfig, ConfigLoadError> {
    apply_overrides_from(config, |var| std::env::var(var).ok())
}

/// Apply overrides read through `lookup` (the environment, or a map in tests).
pub fn apply_overrides_from(
    mut config: SlottingConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SlottingConfig, ConfigLoadError> {
    let bands = &mut config.distance_bands;
    override_with(&lookup, ENV_FAST_MOVER_MAX, &mut bands.fast_mover_max)?;
    override_with(&lookup, ENV_A_MAX, &mut bands.a_max)?;
    override_with(&lookup, ENV_B_MAX, &mut bands.b_max)?;
    override_with(&lookup, ENV_C_MAX, &mut bands.c_max)?;

    override_with(&lookup, ENV_GOLDEN_ZONE_FRACTION, &mut config.golden_zone_fraction)?;
    override_with(&lookup, ENV_TARGET_FAST_TIER_SHARE, &mut config.target_fast_tier_share)?;
    override_with(&lookup, ENV_REBALANCE_THRESHOLD, &mut config.rebalance_threshold)?;

    Ok(config)
}

/// Defaults (or `path`), then environment overrides, then validation.
pub fn load(path: Option<&Path>) -> Result<SlottingConfig, ConfigLoadError> {
    let base = match path {
        Some(path) => load_from_file(path)?,
        None => SlottingConfig::default(),
    };
    let config = apply_env_overrides(base)?;
    config.validate()?;
    Ok(config)
}

fn override_with<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    slot: &mut T,
) -> Result<(), ConfigLoadError> {
    let Some(raw) = lookup(var) else {
        return Ok(());
    };
    *slot = raw
        .trim()
        .parse()
        .map_err(|_| ConfigLoadError::Env { var, value: raw.clone() })?;
    Ok(())
}
