//! Engine configuration parameters.
//!
//! All tunable parameters for the pet engine.  Values come from the
//! config file in the data directory and may be overridden on the
//! command line or changed at runtime.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Core engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // --- Pet ---
    /// Name given to newly hatched pets.
    pub pet_name: String,

    // --- Timing ---
    /// Live ticker period (milliseconds).
    pub tick_interval_ms: u64,
    /// Wall-clock duration of one offline catch-up tick (milliseconds).
    /// Independent of `tick_interval_ms`.
    pub offline_tick_ms: u64,

    // --- Logging ---
    /// One of `error`, `warn`, `info`, `debug`, `trace`, `off`.
    pub log_level: String,
}

pub const DEFAULT_PET_NAME: &str = "Tama";
pub const MAX_NAME_LEN: usize = 32;

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pet_name: DEFAULT_PET_NAME.to_string(),
            tick_interval_ms: 30_000, // one tick per 30 s
            offline_tick_ms: 60_000,  // one catch-up tick per minute
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Range-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = self.pet_name.trim();
        if name.is_empty() {
            return Err(ConfigError::ValidationFailed("pet_name must not be empty"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ConfigError::ValidationFailed(
                "pet_name must be at most 32 characters",
            ));
        }
        if !(100..=3_600_000).contains(&self.tick_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "tick_interval_ms must be 100–3600000",
            ));
        }
        if !(1_000..=86_400_000).contains(&self.offline_tick_ms) {
            return Err(ConfigError::ValidationFailed(
                "offline_tick_ms must be 1000–86400000",
            ));
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::ValidationFailed(
                "log_level must be one of off/error/warn/info/debug/trace",
            ));
        }
        Ok(())
    }
}
