//! Engine configuration
//!
//! Loaded from a JSON file, from environment variables, or both (file first,
//! then per-field overrides). Every field has a default, so an empty JSON
//! object is a valid config.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::piece::RotationPolicy;
use crate::types::{PALETTE_SHIFT_LINES, STOW_LOCK_MS};

/// Path of a JSON config file.
pub const CONFIG_PATH_ENV: &str = "BLOCKFALL_CONFIG";
pub const SEED_ENV: &str = "BLOCKFALL_SEED";
pub const STOW_LOCK_ENV: &str = "BLOCKFALL_STOW_LOCK_MS";
pub const PALETTE_SHIFT_ENV: &str = "BLOCKFALL_PALETTE_SHIFT_LINES";
pub const ROTATION_ENV: &str = "BLOCKFALL_ROTATION";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Bag seed. `None` lets the host pick one (usually from the clock).
    pub seed: Option<u32>,
    /// Stow cooldown in milliseconds of game time.
    pub stow_lock_ms: u32,
    /// Cleared lines between palette hue shifts; 0 disables shifting.
    pub palette_shift_lines: u32,
    pub rotation: RotationPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            stow_lock_ms: STOW_LOCK_MS,
            palette_shift_lines: PALETTE_SHIFT_LINES,
            rotation: RotationPolicy::Naive,
        }
    }
}

impl EngineConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json_str(&s)
    }

    /// Read `BLOCKFALL_CONFIG` (if set) and then the per-field variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_ENV) {
            Some(path) if !path.trim().is_empty() => Self::from_json_file(path.trim())?,
            _ => Self::default(),
        };

        if let Some(raw) = lookup(SEED_ENV) {
            config.seed = Some(parse_u32(SEED_ENV, &raw)?);
        }
        if let Some(raw) = lookup(STOW_LOCK_ENV) {
            config.stow_lock_ms = parse_u32(STOW_LOCK_ENV, &raw)?;
        }
        if let Some(raw) = lookup(PALETTE_SHIFT_ENV) {
            config.palette_shift_lines = parse_u32(PALETTE_SHIFT_ENV, &raw)?;
        }
        if let Some(raw) = lookup(ROTATION_ENV) {
            config.rotation =
                RotationPolicy::from_str(raw.trim()).ok_or_else(|| ConfigError::InvalidValue {
                    key: ROTATION_ENV,
                    value: raw.clone(),
                })?;
        }
        Ok(config)
    }
}

fn parse_u32(key: &'static str, raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        })
}
