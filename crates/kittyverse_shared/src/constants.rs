//! # Engine Constants
//!
//! Default balance values. Every one of these can be overridden through
//! the engine configuration; the constants are what ships.

use alloy_primitives::U256;

// =============================================================================
// SUPPLY & BREEDING
// =============================================================================

/// Maximum number of generation-0 kitties that can ever exist.
pub const GENESIS_SUPPLY_CAP: u32 = 1000;

/// Minimum seconds between two breedings of the same kitty (24h).
pub const BREEDING_COOLDOWN_SECS: u64 = 86_400;

/// Breeding fee in whole tokens.
pub const BREEDING_FEE_TOKENS: u64 = 10;

/// Decimals of the fungible token used for fees.
pub const TOKEN_DECIMALS: u8 = 18;

/// One whole token in base units (10^18).
pub const ONE_TOKEN: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

// =============================================================================
// INHERITANCE
// =============================================================================

/// Exclusive upper bound of an inheritance roll.
pub const INHERITANCE_ROLL_RANGE: u32 = 100;

/// Rolls below this inherit the matron's value.
pub const MATRON_THRESHOLD: u32 = 45;

/// Rolls below this (and at or above the matron threshold) inherit the sire's value.
pub const SIRE_THRESHOLD: u32 = 90;

/// Chance (percent) that a new kitty carries the special trait.
pub const SPECIAL_TRAIT_CHANCE_PCT: u32 = 5;

// =============================================================================
// STAT DOMAINS
// =============================================================================

/// Inclusive strength bounds.
pub const STRENGTH_RANGE: (u16, u16) = (50, 200);

/// Inclusive agility bounds.
pub const AGILITY_RANGE: (u16, u16) = (60, 200);

/// Inclusive intelligence bounds.
pub const INTELLIGENCE_RANGE: (u16, u16) = (70, 200);

/// Largest random offset added on top of a trait-derived base stat.
pub const STAT_OFFSET_MAX: u16 = 20;

// =============================================================================
// RARITY THRESHOLDS (stat sum, strictly greater than)
// =============================================================================

/// Stat sum above which a kitty is Legendary.
pub const LEGENDARY_ABOVE: u32 = 240;

/// Stat sum above which a kitty is Epic.
pub const EPIC_ABOVE: u32 = 200;

/// Stat sum above which a kitty is Rare.
pub const RARE_ABOVE: u32 = 160;

/// Stat sum above which a kitty is Uncommon.
pub const UNCOMMON_ABOVE: u32 = 120;

// =============================================================================
// COMBAT
// =============================================================================

/// Health every combatant starts with before strength is added.
pub const HEALTH_BASE: u32 = 100;

/// Largest random variance added to a single action's damage.
pub const DAMAGE_VARIANCE: u32 = 10;

/// A defending target shaves `agility / DEFEND_DIVISOR` off incoming damage.
pub const DEFEND_DIVISOR: u32 = 5;

/// No resolved action deals less than this.
pub const MIN_DAMAGE: u32 = 1;

/// Experience granted to the winner of a battle.
pub const WINNER_EXPERIENCE: u64 = 100;

/// Consolation experience granted to the loser of a battle.
pub const LOSER_EXPERIENCE: u64 = 25;

/// Seconds a turn owner may idle before the battle counts as stalled.
pub const TURN_TIMEOUT_SECS: u64 = 3_600;

/// Converts a whole-token amount to base units.
#[must_use]
pub fn tokens(whole: u64) -> U256 {
    U256::from(whole) * ONE_TOKEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_token_is_ten_to_the_eighteenth() {
        assert_eq!(ONE_TOKEN, U256::from(10u64).pow(U256::from(TOKEN_DECIMALS)));
        assert_eq!(tokens(BREEDING_FEE_TOKENS), U256::from(10u64) * ONE_TOKEN);
    }

    #[test]
    fn test_thresholds_are_ordered() {
        assert!(MATRON_THRESHOLD < SIRE_THRESHOLD);
        assert!(SIRE_THRESHOLD < INHERITANCE_ROLL_RANGE);
        assert!(UNCOMMON_ABOVE < RARE_ABOVE && RARE_ABOVE < EPIC_ABOVE && EPIC_ABOVE < LEGENDARY_ABOVE);
    }
}
