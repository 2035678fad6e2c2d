//! # Genome Value Types
//!
//! The bounded trait vector every kitty carries, its derived combat
//! statistics and the rarity tier classification.
//!
//! A [`TraitVector`] can only be built with every dimension inside its
//! domain. There is no way to observe an out-of-domain trait value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One independently inherited discrete trait dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TraitDimension {
    /// Body color, domain `[0, 7]`.
    BodyColor = 0,
    /// Eye color, domain `[0, 5]`.
    EyeColor = 1,
    /// Coat pattern, domain `[0, 4]`.
    Pattern = 2,
    /// Accessory, domain `[0, 3]`.
    Accessory = 3,
    /// Background, domain `[0, 2]`.
    Background = 4,
}

impl TraitDimension {
    /// All discrete dimensions in canonical order.
    pub const ALL: [Self; 5] = [
        Self::BodyColor,
        Self::EyeColor,
        Self::Pattern,
        Self::Accessory,
        Self::Background,
    ];

    /// Number of distinct values in this dimension's domain.
    #[inline]
    #[must_use]
    pub const fn domain_size(self) -> u8 {
        match self {
            Self::BodyColor => 8,
            Self::EyeColor => 6,
            Self::Pattern => 5,
            Self::Accessory => 4,
            Self::Background => 3,
        }
    }

    /// Returns true if `value` lies inside this dimension's domain.
    #[inline]
    #[must_use]
    pub const fn contains(self, value: u8) -> bool {
        value < self.domain_size()
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BodyColor => "body_color",
            Self::EyeColor => "eye_color",
            Self::Pattern => "pattern",
            Self::Accessory => "accessory",
            Self::Background => "background",
        }
    }
}

/// A trait value outside its dimension's domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraitOutOfDomain {
    /// Offending dimension.
    pub dimension: TraitDimension,
    /// Offending value.
    pub value: u8,
}

impl fmt::Display for TraitOutOfDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} out of domain: {} (domain size {})",
            self.dimension.name(),
            self.value,
            self.dimension.domain_size()
        )
    }
}

impl std::error::Error for TraitOutOfDomain {}

/// Wire form of a [`TraitVector`], checked on the way in.
#[derive(Deserialize)]
struct RawTraitVector {
    values: [u8; 5],
    has_special_trait: bool,
}

impl TryFrom<RawTraitVector> for TraitVector {
    type Error = TraitOutOfDomain;

    fn try_from(raw: RawTraitVector) -> Result<Self, Self::Error> {
        Self::from_values(raw.values, raw.has_special_trait)
    }
}

/// A kitty's full trait tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTraitVector")]
pub struct TraitVector {
    values: [u8; 5],
    has_special_trait: bool,
}

impl TraitVector {
    /// Creates a trait vector, returning `None` if any value is outside its domain.
    #[must_use]
    pub fn new(
        body_color: u8,
        eye_color: u8,
        pattern: u8,
        accessory: u8,
        background: u8,
        has_special_trait: bool,
    ) -> Option<Self> {
        Self::from_values(
            [body_color, eye_color, pattern, accessory, background],
            has_special_trait,
        )
        .ok()
    }

    /// Creates a trait vector from values in canonical dimension order.
    ///
    /// # Errors
    ///
    /// The first dimension whose value is outside its domain.
    pub fn from_values(values: [u8; 5], has_special_trait: bool) -> Result<Self, TraitOutOfDomain> {
        for dim in TraitDimension::ALL {
            let value = values[dim as usize];
            if !dim.contains(value) {
                return Err(TraitOutOfDomain {
                    dimension: dim,
                    value,
                });
            }
        }
        Ok(Self {
            values,
            has_special_trait,
        })
    }

    /// Builds a trait vector by asking `pick` for each dimension in canonical order.
    ///
    /// # Errors
    ///
    /// The first picked value outside its dimension's domain.
    pub fn from_fn(
        mut pick: impl FnMut(TraitDimension) -> u8,
        has_special_trait: bool,
    ) -> Result<Self, TraitOutOfDomain> {
        let mut values = [0u8; 5];
        for dim in TraitDimension::ALL {
            values[dim as usize] = pick(dim);
        }
        Self::from_values(values, has_special_trait)
    }

    /// Value of one dimension.
    #[inline]
    #[must_use]
    pub const fn get(&self, dim: TraitDimension) -> u8 {
        self.values[dim as usize]
    }

    /// Body color.
    #[inline]
    #[must_use]
    pub const fn body_color(&self) -> u8 {
        self.get(TraitDimension::BodyColor)
    }

    /// Eye color.
    #[inline]
    #[must_use]
    pub const fn eye_color(&self) -> u8 {
        self.get(TraitDimension::EyeColor)
    }

    /// Coat pattern.
    #[inline]
    #[must_use]
    pub const fn pattern(&self) -> u8 {
        self.get(TraitDimension::Pattern)
    }

    /// Accessory.
    #[inline]
    #[must_use]
    pub const fn accessory(&self) -> u8 {
        self.get(TraitDimension::Accessory)
    }

    /// Background.
    #[inline]
    #[must_use]
    pub const fn background(&self) -> u8 {
        self.get(TraitDimension::Background)
    }

    /// Whether the kitty carries the mutation-only special trait.
    #[inline]
    #[must_use]
    pub const fn has_special_trait(&self) -> bool {
        self.has_special_trait
    }
}

/// Cached combat statistics derived from a trait vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatStats {
    /// Raw power, feeds health and attack damage.
    pub strength: u16,
    /// Evasion, feeds defend damage and defensive reduction.
    pub agility: u16,
    /// Cunning, feeds special damage.
    pub intelligence: u16,
}

impl CombatStats {
    /// Creates a stat block.
    #[inline]
    #[must_use]
    pub const fn new(strength: u16, agility: u16, intelligence: u16) -> Self {
        Self {
            strength,
            agility,
            intelligence,
        }
    }

    /// Sum of all three statistics.
    #[inline]
    #[must_use]
    pub const fn sum(&self) -> u32 {
        self.strength as u32 + self.agility as u32 + self.intelligence as u32
    }
}

/// Rarity tier, ordered from most to least common.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RarityTier {
    /// Stat sum at most 120.
    Common = 0,
    /// Stat sum in (120, 160].
    Uncommon = 1,
    /// Stat sum in (160, 200].
    Rare = 2,
    /// Stat sum in (200, 240].
    Epic = 3,
    /// Stat sum above 240.
    Legendary = 4,
}

impl RarityTier {
    /// Tier name as shown to players.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_domain() {
        assert!(TraitVector::new(7, 5, 4, 3, 2, true).is_some());
        assert!(TraitVector::new(8, 0, 0, 0, 0, false).is_none());
        assert!(TraitVector::new(0, 6, 0, 0, 0, false).is_none());
        assert!(TraitVector::new(0, 0, 5, 0, 0, false).is_none());
        assert!(TraitVector::new(0, 0, 0, 4, 0, false).is_none());
        assert!(TraitVector::new(0, 0, 0, 0, 3, false).is_none());
    }

    #[test]
    fn test_from_fn_fills_in_canonical_order() {
        let mut seen = Vec::new();
        let traits = TraitVector::from_fn(
            |dim| {
                seen.push(dim);
                dim.domain_size() - 1
            },
            false,
        )
        .ok();
        assert_eq!(seen, TraitDimension::ALL.to_vec());
        assert_eq!(traits, TraitVector::new(7, 5, 4, 3, 2, false));
    }

    #[test]
    fn test_from_fn_reports_out_of_domain_pick() {
        let err = TraitVector::from_fn(
            |dim| match dim {
                TraitDimension::Pattern => 9,
                _ => 0,
            },
            false,
        )
        .unwrap_err();
        assert_eq!(
            err,
            TraitOutOfDomain {
                dimension: TraitDimension::Pattern,
                value: 9
            }
        );
    }

    #[test]
    fn test_deserialize_checks_domain() {
        let traits = TraitVector::new(7, 5, 4, 3, 2, true).unwrap();
        let encoded = toml::to_string(&traits).unwrap();
        assert_eq!(toml::from_str::<TraitVector>(&encoded).unwrap(), traits);

        let forged = "values = [200, 99, 50, 9, 7]\nhas_special_trait = false\n";
        let err = toml::from_str::<TraitVector>(forged).unwrap_err();
        assert!(err.to_string().contains("body_color out of domain"), "{err}");
    }

    #[test]
    fn test_stat_sum() {
        assert_eq!(CombatStats::new(120, 80, 60).sum(), 260);
    }
}
