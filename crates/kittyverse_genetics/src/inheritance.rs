//! # Trait Inheritance
//!
//! Every dimension is decided on its own:
//!
//! ```text
//! roll ∈ [0, 100)
//!   roll <  45        -> matron's value
//!   roll <  90        -> sire's value
//!   otherwise         -> fresh uniform draw from the domain (mutation)
//! ```
//!
//! The special trait is never inherited. Each new kitty gets it with a
//! small independent chance, drawn before the dimensions.

use kittyverse_shared::constants::INHERITANCE_ROLL_RANGE;
use kittyverse_shared::{TraitDimension, TraitOutOfDomain, TraitVector};
use rand::Rng;

use crate::config::GeneticsConfig;

/// Where a child's value for one dimension came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraitSource {
    /// Copied from the matron.
    Matron,
    /// Copied from the sire.
    Sire,
    /// Drawn fresh from the domain.
    Mutation,
}

impl TraitSource {
    /// Maps an inheritance roll to its source.
    #[inline]
    #[must_use]
    pub const fn from_roll(roll: u32, matron_threshold: u32, sire_threshold: u32) -> Self {
        if roll < matron_threshold {
            Self::Matron
        } else if roll < sire_threshold {
            Self::Sire
        } else {
            Self::Mutation
        }
    }
}

/// Draws a value uniformly from a dimension's domain.
#[inline]
pub fn mutate<R: Rng + ?Sized>(dim: TraitDimension, rng: &mut R) -> u8 {
    rng.gen_range(0..dim.domain_size())
}

fn roll_special<R: Rng + ?Sized>(config: &GeneticsConfig, rng: &mut R) -> bool {
    rng.gen_range(0..100u32) < config.special_trait_chance_pct
}

/// Builds a child's traits from its parents, one dimension at a time.
///
/// # Errors
///
/// Never in practice: parent values and mutations are always in domain.
pub fn inherit_traits<R: Rng + ?Sized>(
    matron: &TraitVector,
    sire: &TraitVector,
    config: &GeneticsConfig,
    rng: &mut R,
) -> Result<TraitVector, TraitOutOfDomain> {
    let special = roll_special(config, rng);
    TraitVector::from_fn(
        |dim| {
            let roll = rng.gen_range(0..INHERITANCE_ROLL_RANGE);
            match TraitSource::from_roll(roll, config.matron_threshold, config.sire_threshold) {
                TraitSource::Matron => matron.get(dim),
                TraitSource::Sire => sire.get(dim),
                TraitSource::Mutation => mutate(dim, rng),
            }
        },
        special,
    )
}

/// Uniformly random traits for a genesis kitty.
///
/// # Errors
///
/// Never in practice: every draw is taken from the dimension's domain.
pub fn random_traits<R: Rng + ?Sized>(
    config: &GeneticsConfig,
    rng: &mut R,
) -> Result<TraitVector, TraitOutOfDomain> {
    let special = roll_special(config, rng);
    TraitVector::from_fn(|dim| mutate(dim, rng), special)
}
