//! # Kittyverse
//!
//! Genetic breeding and turn-based combat for collectible kitties.
//!
//! ## Crates
//!
//! - `kittyverse_shared`: ids, traits, stats, events
//! - `kittyverse_core`: registry, errors, entropy, fee ledger, clock
//! - `kittyverse_genetics`: minting, breeding, stats, rarity
//! - `kittyverse_combat`: battle state machine
//! - `kittyverse` (this crate): [`KittyEngine`], event bus, configuration
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use kittyverse::{EngineConfig, KittyEngine};
//! use kittyverse::core::{ChainSalt, SaltedEntropy, SystemClock, TokenLedger};
//! use kittyverse::shared::Address;
//!
//! let config = EngineConfig::from_file("config/kittyverse.toml").unwrap();
//! let entropy = SaltedEntropy::new(&[0x42; 32], ChainSalt::default());
//! let engine = KittyEngine::new(config, TokenLedger::new(), entropy, Arc::new(SystemClock)).unwrap();
//!
//! let kitty = engine.create_genesis(Address::with_last_byte(1)).unwrap();
//! println!("{:?}", engine.derive_rarity(kitty));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod events;

pub use config::{EngineConfig, EventConfig};
pub use engine::KittyEngine;
pub use events::{EventBus, EventReceiver, EventSender};

/// Re-export of the shared value types.
pub use kittyverse_shared as shared;

/// Re-export of the registry and injectable seams.
pub use kittyverse_core as core;

/// Re-export of the genetics engine.
pub use kittyverse_genetics as genetics;

/// Re-export of the combat resolver.
pub use kittyverse_combat as combat;
