//! # Battle Records
//!
//! A battle holds non-owning references (ids) to its two kitties plus a
//! snapshot of their stats taken at acceptance. It lives in the resolver
//! until it resolves, then moves to the archive unchanged.

use kittyverse_shared::{BattleAction, BattleId, BattlePhase, CombatStats, KittyId, Side, Timestamp};
use serde::{Deserialize, Serialize};

/// One participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    /// The kitty.
    pub kitty: KittyId,
    /// Stats snapshot, taken at acceptance.
    pub stats: CombatStats,
    /// Remaining health. Zero until acceptance.
    pub health: u32,
    /// Whether the last action this side declared was `Defend`.
    pub defending: bool,
}

impl Combatant {
    /// A combatant whose stats are not yet loaded.
    #[must_use]
    pub const fn pending(kitty: KittyId) -> Self {
        Self {
            kitty,
            stats: CombatStats::new(0, 0, 0),
            health: 0,
            defending: false,
        }
    }
}

/// One resolved action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Round the action was taken in.
    pub round: u32,
    /// Acting side.
    pub side: Side,
    /// Acting kitty.
    pub actor: KittyId,
    /// Declared action.
    pub action: BattleAction,
    /// Damage dealt.
    pub damage: u32,
    /// Target's health after the hit.
    pub target_health: u32,
    /// When it happened.
    pub at: Timestamp,
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionCause {
    /// A health pool reached zero.
    Knockout,
    /// Forced after the turn owner stalled.
    Forfeit,
}

/// Terminal result of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    /// Winning kitty.
    pub winner: KittyId,
    /// Losing kitty.
    pub loser: KittyId,
    /// Side that won.
    pub winner_side: Side,
    /// Knockout or forfeit.
    pub cause: ResolutionCause,
    /// Experience granted to the winner.
    pub winner_experience: u64,
    /// Experience granted to the loser.
    pub loser_experience: u64,
    /// Time of resolution.
    pub resolved_at: Timestamp,
}

/// A battle between two kitties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    pub(crate) id: BattleId,
    pub(crate) attacker: Combatant,
    pub(crate) defender: Combatant,
    pub(crate) phase: BattlePhase,
    pub(crate) turn: Side,
    pub(crate) round: u32,
    pub(crate) log: Vec<ActionRecord>,
    pub(crate) proposed_at: Timestamp,
    pub(crate) last_activity_at: Timestamp,
    pub(crate) last_actor: Option<Side>,
    pub(crate) outcome: Option<BattleOutcome>,
}

impl Battle {
    pub(crate) fn propose(id: BattleId, attacker: KittyId, defender: KittyId, now: Timestamp) -> Self {
        Self {
            id,
            attacker: Combatant::pending(attacker),
            defender: Combatant::pending(defender),
            phase: BattlePhase::Proposed,
            turn: Side::Attacker,
            round: 0,
            log: Vec::new(),
            proposed_at: now,
            last_activity_at: now,
            last_actor: None,
            outcome: None,
        }
    }

    /// Battle id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> BattleId {
        self.id
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Side that owns the turn.
    #[inline]
    #[must_use]
    pub const fn turn(&self) -> Side {
        self.turn
    }

    /// Round counter. 0 while proposed, 1 from acceptance, bumped after
    /// every defender action.
    #[inline]
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// One side's combatant.
    #[must_use]
    pub const fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Attacker => &self.attacker,
            Side::Defender => &self.defender,
        }
    }

    pub(crate) fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Attacker => &mut self.attacker,
            Side::Defender => &mut self.defender,
        }
    }

    /// The challenger.
    #[must_use]
    pub const fn attacker(&self) -> &Combatant {
        &self.attacker
    }

    /// The challenged.
    #[must_use]
    pub const fn defender(&self) -> &Combatant {
        &self.defender
    }

    /// Append-only action log.
    #[must_use]
    pub fn log(&self) -> &[ActionRecord] {
        &self.log
    }

    /// When the challenge was issued.
    #[must_use]
    pub const fn proposed_at(&self) -> Timestamp {
        self.proposed_at
    }

    /// Time of the last acceptance or action.
    #[must_use]
    pub const fn last_activity_at(&self) -> Timestamp {
        self.last_activity_at
    }

    /// Side that acted last. Acceptance counts as the defender acting.
    #[must_use]
    pub const fn last_actor(&self) -> Option<Side> {
        self.last_actor
    }

    /// Result, once resolved.
    #[must_use]
    pub const fn outcome(&self) -> Option<&BattleOutcome> {
        self.outcome.as_ref()
    }

    /// Whether `kitty` fights in this battle.
    #[must_use]
    pub fn involves(&self, kitty: KittyId) -> bool {
        self.attacker.kitty == kitty || self.defender.kitty == kitty
    }
}
