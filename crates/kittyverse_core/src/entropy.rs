//! # Entropy Sources
//!
//! Every random draw in the engine (trait inheritance, mutations, stat
//! offsets, damage variance) starts from a 64-bit seed handed out by an
//! [`EntropySource`]. The source is injected, so tests plug in
//! [`FixedEntropy`] and get byte-for-byte reproducible kitties and battles.
//!
//! ## Security Model
//!
//! Callers must not be able to steer outcomes. [`SaltedEntropy`] mixes:
//!
//! ```text
//! seed = SipHash-2-4(
//!     k1 = chain_salt.low  + secret[0,1] + nonce,   // public, rotates per block
//!     k2 = chain_salt.high + secret[2,3] + purpose, // secret, never leaves the server
//!     message = subject ++ nonce
//! )
//! ```
//!
//! The nonce is monotonic, so two draws for the same subject in the same
//! block still diverge.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use siphasher::sip128::{Hasher128, SipHasher24};
use std::fmt;
use std::hash::Hasher;

/// What a seed is used for. Mixed into the seed so purposes never share a stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SeedPurpose {
    /// Traits of a genesis kitty.
    GenesisTraits = 0,
    /// Inheritance rolls for a bred kitty.
    BreedingTraits = 1,
    /// Per-stat offsets at creation.
    StatOffsets = 2,
    /// Damage variance for one battle action.
    BattleAction = 3,
}

/// Injectable randomness.
pub trait EntropySource: Send {
    /// Produces a fresh seed for `purpose`, scoped to `subject`
    /// (a kitty id, battle id or parent pair).
    fn seed(&mut self, purpose: SeedPurpose, subject: u64) -> u64;

    /// A generator seeded from [`EntropySource::seed`].
    fn rng(&mut self, purpose: SeedPurpose, subject: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed(purpose, subject))
    }
}

impl<E: EntropySource + ?Sized> EntropySource for Box<E> {
    fn seed(&mut self, purpose: SeedPurpose, subject: u64) -> u64 {
        (**self).seed(purpose, subject)
    }
}

// ============================================================================
// CHAIN SALT
// ============================================================================

/// Public salt taken from the latest block hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChainSalt {
    /// Lower 64 bits of the block hash.
    pub low: u64,
    /// Next 64 bits of the block hash.
    pub high: u64,
}

impl ChainSalt {
    /// Takes the first 128 bits of a block hash.
    #[must_use]
    pub fn from_block_hash(block_hash: &[u8; 32]) -> Self {
        Self {
            low: u64_le(block_hash, 0),
            high: u64_le(block_hash, 8),
        }
    }
}

#[inline]
fn u64_le(bytes: &[u8; 32], offset: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_le_bytes(word)
}

// ============================================================================
// SALTED ENTROPY
// ============================================================================

/// Production source: server secret + chain salt + monotonic nonce.
#[derive(Clone)]
pub struct SaltedEntropy {
    /// 256-bit server secret. Must come from a CSPRNG and never be logged.
    secret: [u64; 4],
    salt: ChainSalt,
    nonce: u64,
}

impl SaltedEntropy {
    /// Creates a source from 32 secret bytes.
    #[must_use]
    pub fn new(secret: &[u8; 32], salt: ChainSalt) -> Self {
        Self {
            secret: [
                u64_le(secret, 0),
                u64_le(secret, 8),
                u64_le(secret, 16),
                u64_le(secret, 24),
            ],
            salt,
            nonce: 0,
        }
    }

    /// Rotates the chain salt, typically once per block.
    pub fn update_salt(&mut self, salt: ChainSalt) {
        self.salt = salt;
    }

    /// Replaces the server secret. The nonce keeps counting.
    pub fn rotate_secret(&mut self, secret: &[u8; 32]) {
        let salt = self.salt;
        let nonce = self.nonce;
        *self = Self::new(secret, salt);
        self.nonce = nonce;
    }

    /// Draws taken so far.
    #[inline]
    #[must_use]
    pub const fn nonce(&self) -> u64 {
        self.nonce
    }

    #[inline]
    fn derive_keys(&self, purpose: SeedPurpose, nonce: u64) -> (u64, u64) {
        let k1 = self
            .salt
            .low
            .wrapping_add(self.secret[0])
            .rotate_left(13)
            ^ self.secret[1]
            ^ nonce;
        let k2 = self
            .salt
            .high
            .wrapping_add(self.secret[2])
            .rotate_left(17)
            ^ self.secret[3]
            ^ u64::from(purpose as u8);
        (k1, k2)
    }
}

impl EntropySource for SaltedEntropy {
    fn seed(&mut self, purpose: SeedPurpose, subject: u64) -> u64 {
        let nonce = self.nonce;
        self.nonce = self.nonce.wrapping_add(1);

        let (k1, k2) = self.derive_keys(purpose, nonce);
        let mut hasher = SipHasher24::new_with_keys(k1, k2);
        hasher.write_u64(subject);
        hasher.write_u64(nonce);

        let result = hasher.finish128();
        result.h1 ^ result.h2
    }
}

impl fmt::Debug for SaltedEntropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltedEntropy")
            .field("secret", &"[REDACTED]")
            .field("salt", &self.salt)
            .field("nonce", &self.nonce)
            .finish()
    }
}

// ============================================================================
// FIXED ENTROPY
// ============================================================================

/// Deterministic source for tests and replays.
///
/// The same seed and the same sequence of draws always yield the same
/// values, independent of wall-clock time or chain state.
#[derive(Clone, Debug)]
pub struct FixedEntropy {
    seed: u64,
    counter: u64,
}

impl FixedEntropy {
    /// Creates a source from a fixed seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed, counter: 0 }
    }

    /// Draws taken so far.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.counter
    }
}

impl EntropySource for FixedEntropy {
    fn seed(&mut self, purpose: SeedPurpose, subject: u64) -> u64 {
        let counter = self.counter;
        self.counter = self.counter.wrapping_add(1);

        let mut hasher = SipHasher24::new_with_keys(self.seed, counter);
        hasher.write_u8(purpose as u8);
        hasher.write_u64(subject);
        hasher.finish()
    }
}
