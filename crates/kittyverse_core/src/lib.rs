//! # Kittyverse Core
//!
//! The authoritative kitty registry plus the seams every other engine
//! component plugs into.
//!
//! ## Components
//!
//! - [`KittyRegistry`]: arena-backed store, owner index, approvals, busy marks
//! - [`EngineError`]: the one error taxonomy all operations share
//! - [`EntropySource`]: injectable randomness ([`SaltedEntropy`], [`FixedEntropy`])
//! - [`FeeLedger`]: fungible balance interface ([`TokenLedger`])
//! - [`Clock`]: injectable time ([`SystemClock`], [`ManualClock`])
//!
//! ## Concurrency
//!
//! Nothing in here locks. The registry is a plain value mutated through
//! `&mut self`; the engine facade owns the lock that serializes mutations.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod clock;
pub mod entropy;
pub mod error;
pub mod ledger;
pub mod record;
pub mod registry;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entropy::{ChainSalt, EntropySource, FixedEntropy, SaltedEntropy, SeedPurpose};
pub use error::{EngineError, EngineResult, ParentRole, RecordRef};
pub use ledger::{FeeLedger, TokenLedger};
pub use record::{Engagement, KittyRecord, Lineage};
pub use registry::KittyRegistry;
