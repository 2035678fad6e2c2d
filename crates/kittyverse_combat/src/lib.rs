//! # Kittyverse Combat
//!
//! Turn-based battles between two kitties.
//!
//! ## Flow
//!
//! 1. The attacker's owner calls [`CombatResolver::initiate`]
//! 2. The defender's owner calls [`CombatResolver::accept`]; both kitties lock
//! 3. Sides alternate [`CombatResolver::execute_action`], attacker first
//! 4. A knockout, or [`CombatResolver::force_resolve`] on a stalled battle,
//!    grants experience, unlocks both kitties and archives the record
//!
//! A kitty can be named in one open proposal at a time. Proposals nobody
//! accepts within the turn timeout are archived by
//! [`CombatResolver::expire_proposals`] with no winner.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod battle;
pub mod config;
pub mod damage;
pub mod resolver;

pub use battle::{ActionRecord, Battle, BattleOutcome, Combatant, ResolutionCause};
pub use config::CombatConfig;
pub use damage::{base_damage, compute_damage, roll_damage};
pub use resolver::{ActionOutcome, CombatResolver};
