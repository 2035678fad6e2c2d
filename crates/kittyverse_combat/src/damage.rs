//! # Damage Model
//!
//! ```text
//! Attack  = strength     / 4 + roll[0, variance]
//! Defend  = agility      / 8 + roll[0, variance]      (also raises guard)
//! Special = intelligence / 3 + roll[0, 2·variance]
//!
//! if target's last declared stance was Defend:
//!     damage -= target.agility / defend_divisor
//!
//! damage = max(damage, min_damage)
//! ```

use kittyverse_shared::{BattleAction, CombatStats};
use rand::Rng;

use crate::config::CombatConfig;

/// Stat-driven part of an action's damage.
#[inline]
#[must_use]
pub const fn base_damage(action: BattleAction, actor: &CombatStats) -> u32 {
    match action {
        BattleAction::Attack => actor.strength as u32 / 4,
        BattleAction::Defend => actor.agility as u32 / 8,
        BattleAction::Special => actor.intelligence as u32 / 3,
    }
}

/// Largest variance roll for an action.
#[inline]
#[must_use]
pub const fn variance_cap(action: BattleAction, config: &CombatConfig) -> u32 {
    match action {
        BattleAction::Special => config.damage_variance.saturating_mul(2),
        BattleAction::Attack | BattleAction::Defend => config.damage_variance,
    }
}

/// Damage for a known variance roll.
#[must_use]
pub const fn compute_damage(
    action: BattleAction,
    actor: &CombatStats,
    target: &CombatStats,
    target_defending: bool,
    variance_roll: u32,
    config: &CombatConfig,
) -> u32 {
    let raw = base_damage(action, actor).saturating_add(variance_roll);
    let reduced = if target_defending {
        raw.saturating_sub(target.agility as u32 / config.defend_divisor)
    } else {
        raw
    };
    if reduced < config.min_damage {
        config.min_damage
    } else {
        reduced
    }
}

/// Damage with the variance drawn from `rng`.
pub fn roll_damage<R: Rng + ?Sized>(
    action: BattleAction,
    actor: &CombatStats,
    target: &CombatStats,
    target_defending: bool,
    config: &CombatConfig,
    rng: &mut R,
) -> u32 {
    let roll = rng.gen_range(0..=variance_cap(action, config));
    compute_damage(action, actor, target, target_defending, roll, config)
}
