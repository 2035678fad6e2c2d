//! # Engine Configuration
//!
//! Loaded once at startup from TOML. Every section and every field is
//! optional; anything missing falls back to the shipped defaults.
//!
//! ```toml
//! [genetics]
//! cooldown_secs = 86400
//! breeding_fee_tokens = 10
//!
//! [combat]
//! turn_timeout_secs = 3600
//! ```

use kittyverse_combat::CombatConfig;
use kittyverse_core::{EngineError, EngineResult};
use kittyverse_genetics::GeneticsConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Event bus settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Events in flight before new ones are dropped.
    pub capacity: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self { capacity: 1024 }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Breeding and minting.
    pub genetics: GeneticsConfig,
    /// Battles.
    pub combat: CombatConfig,
    /// Event bus.
    pub events: EventConfig,
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` on malformed TOML or inconsistent values.
    pub fn from_toml_str(source: &str) -> EngineResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the file cannot be read or does not validate.
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| EngineError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> EngineResult<()> {
        self.genetics.validate()?;
        self.combat.validate()?;
        if self.events.capacity == 0 {
            return Err(EngineError::InvalidConfig(
                "events.capacity must be positive".into(),
            ));
        }
        Ok(())
    }
}
