//! # Engine Error Types
//!
//! Every operation either commits all of its effects or fails with one of
//! these and leaves state untouched. Nothing is retried internally.

use alloy_primitives::{Address, U256};
use kittyverse_shared::{BattleId, BattlePhase, KittyId, Side, Timestamp, TraitOutOfDomain};
use std::fmt;
use thiserror::Error;

use crate::record::Engagement;

/// A record an operation tried to look up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordRef {
    /// A kitty.
    Kitty(KittyId),
    /// A battle.
    Battle(BattleId),
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kitty(id) => write!(f, "kitty {id}"),
            Self::Battle(id) => write!(f, "{id}"),
        }
    }
}

/// Which parent a breeding precondition failed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParentRole {
    /// The matron.
    Matron,
    /// The sire.
    Sire,
}

impl fmt::Display for ParentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Matron => "matron",
            Self::Sire => "sire",
        })
    }
}

/// Errors that can occur in the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Lookup of an unknown kitty or battle.
    #[error("{0} not found")]
    NotFound(RecordRef),

    /// Caller is neither owner, approved delegate nor operator.
    #[error("{caller} is not authorized to act on kitty {id}")]
    NotAuthorized {
        /// The kitty.
        id: KittyId,
        /// The caller that was rejected.
        caller: Address,
    },

    /// Matron and sire are the same kitty.
    #[error("kitty {0} cannot breed with itself")]
    SelfBreedingDisallowed(KittyId),

    /// Attacker and defender are the same kitty.
    #[error("kitty {0} cannot battle itself")]
    SelfBattleDisallowed(KittyId),

    /// A parent bred too recently.
    #[error("{role} {id} is cooling down until {ready_at}")]
    CooldownActive {
        /// Which parent is cooling down.
        role: ParentRole,
        /// The parent.
        id: KittyId,
        /// Earliest timestamp at which it may breed again.
        ready_at: Timestamp,
    },

    /// Payer has not escrowed enough for the fee.
    #[error("insufficient fee: need {required}, have {available}")]
    InsufficientFee {
        /// Fee due.
        required: U256,
        /// Amount the engine may collect.
        available: U256,
    },

    /// Genesis cap reached.
    #[error("genesis supply exhausted: cap {cap}")]
    SupplyExhausted {
        /// The cap.
        cap: u32,
    },

    /// Kitty is committed to a battle or staked.
    #[error("kitty {id} is busy: {engagement}")]
    EntityBusy {
        /// The kitty.
        id: KittyId,
        /// What it is committed to.
        engagement: Engagement,
    },

    /// Caller controls the side that does not own the turn.
    #[error("not your turn in {battle}: {expected} to act")]
    InvalidTurn {
        /// The battle.
        battle: BattleId,
        /// Side that owns the turn.
        expected: Side,
    },

    /// Battle is not in a phase that accepts this operation.
    #[error("{battle} is not active (phase {phase})")]
    BattleNotActive {
        /// The battle.
        battle: BattleId,
        /// Its current phase.
        phase: BattlePhase,
    },

    /// A trait value fell outside its dimension's domain.
    #[error("invalid traits: {0}")]
    InvalidTraits(#[from] TraitOutOfDomain),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Shorthand for a missing kitty.
    #[inline]
    #[must_use]
    pub const fn kitty_not_found(id: KittyId) -> Self {
        Self::NotFound(RecordRef::Kitty(id))
    }

    /// Shorthand for a missing battle.
    #[inline]
    #[must_use]
    pub const fn battle_not_found(id: BattleId) -> Self {
        Self::NotFound(RecordRef::Battle(id))
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
