//! Rarity classification. The only place a tier is computed.

use kittyverse_shared::constants::{EPIC_ABOVE, LEGENDARY_ABOVE, RARE_ABOVE, UNCOMMON_ABOVE};
use kittyverse_shared::{CombatStats, RarityTier};

/// Tier from the sum of the three combat stats.
#[inline]
#[must_use]
pub const fn derive_rarity(stats: &CombatStats) -> RarityTier {
    let sum = stats.sum();
    if sum > LEGENDARY_ABOVE {
        RarityTier::Legendary
    } else if sum > EPIC_ABOVE {
        RarityTier::Epic
    } else if sum > RARE_ABOVE {
        RarityTier::Rare
    } else if sum > UNCOMMON_ABOVE {
        RarityTier::Uncommon
    } else {
        RarityTier::Common
    }
}
