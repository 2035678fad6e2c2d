//! # Kittyverse Genetics
//!
//! Everything that decides what a kitty *is*: genesis minting, breeding,
//! trait inheritance, stat derivation and rarity.
//!
//! ## Determinism
//!
//! Given the same registry state, the same entropy source and the same
//! request, every function here produces the same kitty. Tests rely on
//! this via [`kittyverse_core::FixedEntropy`].

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod breeding;
pub mod config;
pub mod inheritance;
pub mod rarity;
pub mod stats;

pub use breeding::{BreedRequest, GeneticsEngine};
pub use config::GeneticsConfig;
pub use inheritance::{inherit_traits, random_traits, TraitSource};
pub use rarity::derive_rarity;
pub use stats::{base_stats, derive_stats, stats_with_offsets};
