//! # Stat Derivation
//!
//! Fixed trait weights plus a bounded random offset, clamped to each
//! stat's domain:
//!
//! ```text
//! strength     = 50 + 4·body_color + 3·pattern           + offset
//! agility      = 60 + 4·eye_color  + 3·accessory         + offset
//! intelligence = 70 + 3·pattern    + 15·has_special_trait + offset
//! offset ∈ [0, 20], drawn once per stat in that order
//! ```
//!
//! Background is cosmetic and feeds no stat.

use kittyverse_shared::constants::{
    AGILITY_RANGE, INTELLIGENCE_RANGE, STAT_OFFSET_MAX, STRENGTH_RANGE,
};
use kittyverse_shared::{CombatStats, TraitVector};
use rand::Rng;

/// Strength gained per body color step.
pub const STRENGTH_PER_BODY: u16 = 4;
/// Strength gained per pattern step.
pub const STRENGTH_PER_PATTERN: u16 = 3;
/// Agility gained per eye color step.
pub const AGILITY_PER_EYE: u16 = 4;
/// Agility gained per accessory step.
pub const AGILITY_PER_ACCESSORY: u16 = 3;
/// Intelligence gained per pattern step.
pub const INTELLIGENCE_PER_PATTERN: u16 = 3;
/// Intelligence bonus for the special trait.
pub const INTELLIGENCE_SPECIAL_BONUS: u16 = 15;

#[inline]
const fn clamp(value: u16, (lo, hi): (u16, u16)) -> u16 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Trait-driven stats before any offset.
#[must_use]
pub const fn base_stats(traits: &TraitVector) -> CombatStats {
    let special = if traits.has_special_trait() {
        INTELLIGENCE_SPECIAL_BONUS
    } else {
        0
    };
    CombatStats::new(
        STRENGTH_RANGE.0
            + traits.body_color() as u16 * STRENGTH_PER_BODY
            + traits.pattern() as u16 * STRENGTH_PER_PATTERN,
        AGILITY_RANGE.0
            + traits.eye_color() as u16 * AGILITY_PER_EYE
            + traits.accessory() as u16 * AGILITY_PER_ACCESSORY,
        INTELLIGENCE_RANGE.0 + traits.pattern() as u16 * INTELLIGENCE_PER_PATTERN + special,
    )
}

/// Base stats plus explicit offsets, clamped.
#[must_use]
pub const fn stats_with_offsets(traits: &TraitVector, offsets: [u16; 3]) -> CombatStats {
    let base = base_stats(traits);
    CombatStats::new(
        clamp(base.strength.saturating_add(offsets[0]), STRENGTH_RANGE),
        clamp(base.agility.saturating_add(offsets[1]), AGILITY_RANGE),
        clamp(base.intelligence.saturating_add(offsets[2]), INTELLIGENCE_RANGE),
    )
}

/// Derives stats, drawing one offset per stat from `rng`.
///
/// Same traits and same generator state always give the same stats.
pub fn derive_stats<R: Rng + ?Sized>(traits: &TraitVector, rng: &mut R) -> CombatStats {
    let offsets = [
        rng.gen_range(0..=STAT_OFFSET_MAX),
        rng.gen_range(0..=STAT_OFFSET_MAX),
        rng.gen_range(0..=STAT_OFFSET_MAX),
    ];
    stats_with_offsets(traits, offsets)
}
