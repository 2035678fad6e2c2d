//! Observable engine events.
//!
//! The engine emits one event per committed state change. Consumers
//! (marketplace indexers, UI, analytics) only ever observe committed state.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::ids::{BattleId, KittyId};

/// Event type discriminator
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    /// Kitty created
    Created = 0,
    /// Kitty bred
    Bred = 1,
    /// Ownership moved
    Transferred = 2,
    /// Battle proposed
    BattleProposed = 3,
    /// Battle accepted
    BattleAccepted = 4,
    /// Battle action resolved
    ActionResolved = 5,
    /// Battle resolved
    BattleResolved = 6,
    /// Battle proposal expired unanswered
    BattleExpired = 7,
}

/// Events emitted by the engine after a successful commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KittyEvent {
    /// A kitty came into existence (genesis or breeding).
    Created {
        /// New kitty.
        id: KittyId,
        /// Its generation.
        generation: u32,
        /// Its first owner.
        owner: Address,
    },

    /// A breeding completed.
    Bred {
        /// The child.
        child_id: KittyId,
        /// The matron.
        matron_id: KittyId,
        /// The sire.
        sire_id: KittyId,
    },

    /// Ownership changed hands.
    Transferred {
        /// Kitty that moved.
        id: KittyId,
        /// Previous owner.
        from: Address,
        /// New owner.
        to: Address,
    },

    /// A battle was proposed.
    BattleProposed {
        /// The battle.
        battle_id: BattleId,
        /// Challenging kitty.
        attacker_id: KittyId,
        /// Challenged kitty.
        defender_id: KittyId,
    },

    /// The defender accepted; both kitties are now busy.
    BattleAccepted {
        /// The battle.
        battle_id: BattleId,
    },

    /// One turn resolved.
    ActionResolved {
        /// The battle.
        battle_id: BattleId,
        /// Kitty that acted.
        actor_id: KittyId,
        /// Damage dealt.
        damage: u32,
        /// Target health after the hit.
        target_health: u32,
    },

    /// A battle reached its terminal phase.
    BattleResolved {
        /// The battle.
        battle_id: BattleId,
        /// The winner.
        winner_id: KittyId,
        /// Experience granted to the winner.
        experience_awarded: u64,
    },

    /// A proposal went unanswered past the turn timeout and was dropped.
    BattleExpired {
        /// The battle.
        battle_id: BattleId,
    },
}

impl KittyEvent {
    /// Returns the event type
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::Created { .. } => EventType::Created,
            Self::Bred { .. } => EventType::Bred,
            Self::Transferred { .. } => EventType::Transferred,
            Self::BattleProposed { .. } => EventType::BattleProposed,
            Self::BattleAccepted { .. } => EventType::BattleAccepted,
            Self::ActionResolved { .. } => EventType::ActionResolved,
            Self::BattleResolved { .. } => EventType::BattleResolved,
            Self::BattleExpired { .. } => EventType::BattleExpired,
        }
    }

    /// Returns the battle this event belongs to, if any.
    #[must_use]
    pub const fn battle_id(&self) -> Option<BattleId> {
        match self {
            Self::BattleProposed { battle_id, .. }
            | Self::BattleAccepted { battle_id }
            | Self::ActionResolved { battle_id, .. }
            | Self::BattleResolved { battle_id, .. }
            | Self::BattleExpired { battle_id } => Some(*battle_id),
            Self::Created { .. } | Self::Bred { .. } | Self::Transferred { .. } => None,
        }
    }
}
