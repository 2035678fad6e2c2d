//! # Kittyverse Shared
//!
//! Common types used by the engine and by the collaborators around it
//! (marketplace, staking, presentation).
//!
//! ## CRITICAL RULE
//!
//! This crate holds data, never behavior that mutates state. If you need
//! the registry or the breeding rules, depend on `kittyverse_core` or
//! `kittyverse_genetics`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod battle;
pub mod constants;
pub mod events;
pub mod genome;
pub mod ids;

pub use alloy_primitives::{Address, U256};
pub use battle::{BattleAction, BattlePhase, Side};
pub use constants::{tokens, BREEDING_COOLDOWN_SECS, GENESIS_SUPPLY_CAP, ONE_TOKEN};
pub use events::{EventType, KittyEvent};
pub use genome::{CombatStats, RarityTier, TraitDimension, TraitOutOfDomain, TraitVector};
pub use ids::{BattleId, KittyId, Timestamp};
