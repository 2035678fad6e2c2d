//! Kitty records as stored by the registry.

use alloy_primitives::Address;
use kittyverse_shared::{BattleId, CombatStats, KittyId, Timestamp, TraitVector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a kitty came into existence. Exactly one path creates any kitty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lineage {
    /// Minted directly, counted against the genesis cap.
    Genesis,
    /// Bred from two earlier kitties.
    Bred {
        /// The matron.
        matron: KittyId,
        /// The sire.
        sire: KittyId,
    },
}

/// What a busy kitty is committed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Engagement {
    /// Participant in an accepted or in-progress battle.
    Battle(BattleId),
    /// Held by the staking module.
    Staked,
}

impl fmt::Display for Engagement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Battle(id) => write!(f, "fighting in {id}"),
            Self::Staked => f.write_str("staked"),
        }
    }
}

/// A single kitty.
///
/// Fields are read-only outside this crate; every mutation goes through
/// [`crate::KittyRegistry`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KittyRecord {
    pub(crate) id: KittyId,
    pub(crate) generation: u32,
    pub(crate) created_at: Timestamp,
    pub(crate) last_bred_at: Option<Timestamp>,
    pub(crate) lineage: Lineage,
    pub(crate) traits: TraitVector,
    pub(crate) stats: CombatStats,
    pub(crate) experience: u64,
    pub(crate) owner: Address,
}

impl KittyRecord {
    /// Unique id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> KittyId {
        self.id
    }

    /// Generation: 0 for genesis, `max(parents) + 1` otherwise.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Creation time.
    #[inline]
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Time of the last breeding this kitty took part in, `None` if never.
    #[inline]
    #[must_use]
    pub const fn last_bred_at(&self) -> Option<Timestamp> {
        self.last_bred_at
    }

    /// Genesis or bred.
    #[inline]
    #[must_use]
    pub const fn lineage(&self) -> Lineage {
        self.lineage
    }

    /// Matron id, `None` for genesis kitties.
    #[must_use]
    pub const fn matron_id(&self) -> Option<KittyId> {
        match self.lineage {
            Lineage::Genesis => None,
            Lineage::Bred { matron, .. } => Some(matron),
        }
    }

    /// Sire id, `None` for genesis kitties.
    #[must_use]
    pub const fn sire_id(&self) -> Option<KittyId> {
        match self.lineage {
            Lineage::Genesis => None,
            Lineage::Bred { sire, .. } => Some(sire),
        }
    }

    /// Whether this kitty was minted rather than bred.
    #[inline]
    #[must_use]
    pub const fn is_genesis(&self) -> bool {
        matches!(self.lineage, Lineage::Genesis)
    }

    /// Trait vector.
    #[inline]
    #[must_use]
    pub const fn traits(&self) -> &TraitVector {
        &self.traits
    }

    /// Cached combat stats.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> &CombatStats {
        &self.stats
    }

    /// Accumulated battle experience.
    #[inline]
    #[must_use]
    pub const fn experience(&self) -> u64 {
        self.experience
    }

    /// Current holder.
    #[inline]
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Earliest time this kitty may breed again.
    ///
    /// A kitty that never bred is ready immediately.
    #[must_use]
    pub const fn ready_at(&self, cooldown_secs: u64) -> Timestamp {
        match self.last_bred_at {
            Some(at) => at.saturating_add(cooldown_secs),
            None => 0,
        }
    }
}
