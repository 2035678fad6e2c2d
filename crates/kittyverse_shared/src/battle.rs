//! Battle value types shared by the resolver, its errors and its events.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Battle lifecycle phase. Only forward transitions exist:
/// `Proposed -> Accepted -> InProgress -> Resolved`, with
/// `Accepted -> Resolved` reachable through a forced resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BattlePhase {
    /// Challenge issued, waiting on the defender.
    Proposed = 0,
    /// Defender accepted, health pools initialized, nobody has acted.
    Accepted = 1,
    /// At least one action resolved.
    InProgress = 2,
    /// Terminal.
    Resolved = 3,
}

impl BattlePhase {
    /// Whether actions may still be executed.
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Accepted | Self::InProgress)
    }
}

impl fmt::Display for BattlePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Proposed => "proposed",
            Self::Accepted => "accepted",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
        })
    }
}

/// One side of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    /// The challenger.
    Attacker = 0,
    /// The challenged.
    Defender = 1,
}

impl Side {
    /// The other side.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Attacker => Self::Defender,
            Self::Defender => Self::Attacker,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Attacker => "attacker",
            Self::Defender => "defender",
        })
    }
}

/// An action a combatant declares on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BattleAction {
    /// Strength-driven strike.
    Attack = 0,
    /// Light agility-driven jab; raises a guard against the next hit.
    Defend = 1,
    /// Intelligence-driven strike with wider variance.
    Special = 2,
}

impl BattleAction {
    /// Converts the wire encoding (0 = attack, 1 = defend, 2 = special).
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Attack),
            1 => Some(Self::Defend),
            2 => Some(Self::Special),
            _ => None,
        }
    }
}
