//! Genetics configuration.

use alloy_primitives::U256;
use kittyverse_core::{EngineError, EngineResult};
use kittyverse_shared::constants::{
    BREEDING_FEE_TOKENS, INHERITANCE_ROLL_RANGE, MATRON_THRESHOLD, SIRE_THRESHOLD,
    SPECIAL_TRAIT_CHANCE_PCT,
};
use kittyverse_shared::{tokens, BREEDING_COOLDOWN_SECS, GENESIS_SUPPLY_CAP};
use serde::{Deserialize, Serialize};

/// Breeding and minting parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticsConfig {
    /// Maximum number of genesis kitties.
    pub genesis_cap: u32,
    /// Seconds a parent must wait between breedings.
    pub cooldown_secs: u64,
    /// Breeding fee in whole tokens. TOML integers cannot hold base units.
    pub breeding_fee_tokens: u64,
    /// Inheritance rolls below this take the matron's value.
    pub matron_threshold: u32,
    /// Inheritance rolls below this (and not below the matron threshold)
    /// take the sire's value. Everything above mutates.
    pub sire_threshold: u32,
    /// Percent chance a new kitty carries the special trait.
    pub special_trait_chance_pct: u32,
}

impl GeneticsConfig {
    /// Breeding fee in token base units.
    #[must_use]
    pub fn breeding_fee(&self) -> U256 {
        tokens(self.breeding_fee_tokens)
    }

    /// Rejects configurations the inheritance rule cannot honor.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` naming the offending field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.genesis_cap == 0 {
            return Err(EngineError::InvalidConfig(
                "genetics.genesis_cap must be positive".into(),
            ));
        }
        if self.matron_threshold >= self.sire_threshold {
            return Err(EngineError::InvalidConfig(format!(
                "genetics.matron_threshold ({}) must be below sire_threshold ({})",
                self.matron_threshold, self.sire_threshold
            )));
        }
        if self.sire_threshold > INHERITANCE_ROLL_RANGE {
            return Err(EngineError::InvalidConfig(format!(
                "genetics.sire_threshold ({}) exceeds roll range {INHERITANCE_ROLL_RANGE}",
                self.sire_threshold
            )));
        }
        if self.special_trait_chance_pct > 100 {
            return Err(EngineError::InvalidConfig(format!(
                "genetics.special_trait_chance_pct ({}) is not a percentage",
                self.special_trait_chance_pct
            )));
        }
        Ok(())
    }
}

impl Default for GeneticsConfig {
    fn default() -> Self {
        Self {
            genesis_cap: GENESIS_SUPPLY_CAP,
            cooldown_secs: BREEDING_COOLDOWN_SECS,
            breeding_fee_tokens: BREEDING_FEE_TOKENS,
            matron_threshold: MATRON_THRESHOLD,
            sire_threshold: SIRE_THRESHOLD,
            special_trait_chance_pct: SPECIAL_TRAIT_CHANCE_PCT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GeneticsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.breeding_fee(), tokens(10));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = GeneticsConfig {
            matron_threshold: 90,
            sire_threshold: 45,
            ..GeneticsConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_cap_rejected() {
        let config = GeneticsConfig {
            genesis_cap: 0,
            ..GeneticsConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
