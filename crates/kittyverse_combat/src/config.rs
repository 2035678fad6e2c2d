//! Combat configuration.

use kittyverse_core::{EngineError, EngineResult};
use kittyverse_shared::constants::{
    DAMAGE_VARIANCE, DEFEND_DIVISOR, HEALTH_BASE, LOSER_EXPERIENCE, MIN_DAMAGE,
    TURN_TIMEOUT_SECS, WINNER_EXPERIENCE,
};
use serde::{Deserialize, Serialize};

/// Battle balance parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Health before strength is added.
    pub health_base: u32,
    /// Largest random bonus on a normal action. Special doubles it.
    pub damage_variance: u32,
    /// A defending target shaves `agility / defend_divisor` off a hit.
    pub defend_divisor: u32,
    /// Floor for any resolved hit. Must be positive so battles terminate.
    pub min_damage: u32,
    /// Experience for the winner.
    pub winner_experience: u64,
    /// Experience for the loser.
    pub loser_experience: u64,
    /// Seconds of inactivity after which a battle counts as stalled.
    pub turn_timeout_secs: u64,
}

impl CombatConfig {
    /// Rejects configurations under which a battle could stall forever.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` naming the offending field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.min_damage == 0 {
            return Err(EngineError::InvalidConfig(
                "combat.min_damage must be positive".into(),
            ));
        }
        if self.defend_divisor == 0 {
            return Err(EngineError::InvalidConfig(
                "combat.defend_divisor must be positive".into(),
            ));
        }
        if self.loser_experience > self.winner_experience {
            return Err(EngineError::InvalidConfig(format!(
                "combat.loser_experience ({}) exceeds winner_experience ({})",
                self.loser_experience, self.winner_experience
            )));
        }
        Ok(())
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            health_base: HEALTH_BASE,
            damage_variance: DAMAGE_VARIANCE,
            defend_divisor: DEFEND_DIVISOR,
            min_damage: MIN_DAMAGE,
            winner_experience: WINNER_EXPERIENCE,
            loser_experience: LOSER_EXPERIENCE,
            turn_timeout_secs: TURN_TIMEOUT_SECS,
        }
    }
}
