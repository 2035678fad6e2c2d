//! # Genetics Engine
//!
//! Genesis minting and breeding on top of the registry.
//!
//! ## Breeding Preconditions (first failure wins)
//!
//! 1. Matron and sire differ (`SelfBreedingDisallowed`)
//! 2. Both exist (`NotFound`), requester may act on the matron (`NotAuthorized`)
//! 3. Neither parent is in a battle or staked (`EntityBusy`)
//! 4. Matron, then sire, is past its cooldown (`CooldownActive`)
//! 5. Requester has made the fee available (`InsufficientFee`)
//!
//! ## Commit
//!
//! ```text
//! draw traits + stats ─► collect fee ─► append child ─► stamp parents
//!                                        │ fails
//!                                        └─► refund fee
//! ```
//!
//! All of it happens inside one `&mut` borrow of the registry, so nothing
//! else can observe the state between validation and commit.

use alloy_primitives::Address;
use kittyverse_core::{
    EngineError, EngineResult, EntropySource, FeeLedger, KittyRecord, KittyRegistry, ParentRole,
    SeedPurpose,
};
use kittyverse_shared::{KittyId, Timestamp};
use tracing::{info, warn};

use crate::config::GeneticsConfig;
use crate::inheritance::{inherit_traits, random_traits};
use crate::stats::derive_stats;

/// A breeding request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreedRequest {
    /// The matron.
    pub matron: KittyId,
    /// The sire.
    pub sire: KittyId,
    /// Who pays the fee and receives the child.
    pub requester: Address,
    /// Time of the request.
    pub now: Timestamp,
}

/// Breeding and minting rules over a registry.
#[derive(Clone, Debug, Default)]
pub struct GeneticsEngine {
    config: GeneticsConfig,
}

impl GeneticsEngine {
    /// Creates an engine with the given rules.
    #[must_use]
    pub const fn new(config: GeneticsConfig) -> Self {
        Self { config }
    }

    /// Active rules.
    #[must_use]
    pub const fn config(&self) -> &GeneticsConfig {
        &self.config
    }

    // ========================================================================
    // Genesis
    // ========================================================================

    /// Mints a generation-0 kitty with random traits.
    ///
    /// # Errors
    ///
    /// `SupplyExhausted` once the registry's genesis cap is reached.
    pub fn mint_genesis<E: EntropySource + ?Sized>(
        &self,
        registry: &mut KittyRegistry,
        entropy: &mut E,
        owner: Address,
        now: Timestamp,
    ) -> EngineResult<KittyId> {
        // Fail before drawing so a rejected mint does not advance the source.
        if registry.genesis_minted() >= registry.genesis_cap() {
            return Err(EngineError::SupplyExhausted {
                cap: registry.genesis_cap(),
            });
        }

        let subject = registry.total_supply() as u64 + 1;
        let traits = random_traits(
            &self.config,
            &mut entropy.rng(SeedPurpose::GenesisTraits, subject),
        )?;
        let stats = derive_stats(&traits, &mut entropy.rng(SeedPurpose::StatOffsets, subject));

        let id = registry.create_genesis(owner, traits, stats, now)?;
        info!(kitty = %id, owner = %owner, minted = registry.genesis_minted(), "genesis kitty minted");
        Ok(id)
    }

    // ========================================================================
    // Breeding
    // ========================================================================

    /// Checks every breeding precondition without touching state.
    ///
    /// # Errors
    ///
    /// The first failing precondition, in the documented order.
    pub fn check_breeding<L: FeeLedger + ?Sized>(
        &self,
        registry: &KittyRegistry,
        ledger: &L,
        request: &BreedRequest,
    ) -> EngineResult<()> {
        let BreedRequest {
            matron,
            sire,
            requester,
            now,
        } = *request;

        if matron == sire {
            return Err(EngineError::SelfBreedingDisallowed(matron));
        }

        let matron_record = registry.get(matron)?;
        let sire_record = registry.get(sire)?;
        registry.ensure_authorized(matron, requester)?;

        registry.ensure_idle(matron)?;
        registry.ensure_idle(sire)?;

        for (role, record) in [
            (ParentRole::Matron, matron_record),
            (ParentRole::Sire, sire_record),
        ] {
            let ready_at = record.ready_at(self.config.cooldown_secs);
            if now < ready_at {
                return Err(EngineError::CooldownActive {
                    role,
                    id: record.id(),
                    ready_at,
                });
            }
        }

        let required = self.config.breeding_fee();
        let available = ledger.available(requester);
        if available < required {
            return Err(EngineError::InsufficientFee {
                required,
                available,
            });
        }

        Ok(())
    }

    /// Breeds a child from two kitties.
    ///
    /// The child goes to the requester, one generation below the older
    /// parent. Both parents start a fresh cooldown at `request.now`.
    ///
    /// # Errors
    ///
    /// Any precondition failure from [`Self::check_breeding`]. On error no
    /// fee is taken, no kitty is created and no cooldown moves.
    pub fn breed<L, E>(
        &self,
        registry: &mut KittyRegistry,
        ledger: &mut L,
        entropy: &mut E,
        request: BreedRequest,
    ) -> EngineResult<KittyId>
    where
        L: FeeLedger + ?Sized,
        E: EntropySource + ?Sized,
    {
        self.check_breeding(registry, &*ledger, &request)?;

        let BreedRequest {
            matron,
            sire,
            requester,
            now,
        } = request;

        let pair = matron.raw().rotate_left(32) ^ sire.raw();
        let traits = inherit_traits(
            registry.get(matron)?.traits(),
            registry.get(sire)?.traits(),
            &self.config,
            &mut entropy.rng(SeedPurpose::BreedingTraits, pair),
        )?;
        let child_subject = registry.total_supply() as u64 + 1;
        let stats = derive_stats(
            &traits,
            &mut entropy.rng(SeedPurpose::StatOffsets, child_subject),
        );

        let fee = self.config.breeding_fee();
        ledger.collect(requester, fee)?;

        let child = match registry.create_bred(matron, sire, traits, stats, requester, now) {
            Ok(child) => child,
            Err(err) => {
                ledger.refund(requester, fee);
                warn!(matron = %matron, sire = %sire, error = %err, "breeding rolled back, fee refunded");
                return Err(err);
            }
        };
        registry.record_breeding(matron, sire, now)?;

        info!(
            kitty = %child,
            matron = %matron,
            sire = %sire,
            generation = registry.get(child)?.generation(),
            fee = %fee,
            "child bred"
        );
        Ok(child)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Earliest time the kitty may breed again.
    ///
    /// # Errors
    ///
    /// `NotFound` if the kitty is unknown.
    pub fn ready_at(&self, registry: &KittyRegistry, id: KittyId) -> EngineResult<Timestamp> {
        Ok(registry.get(id)?.ready_at(self.config.cooldown_secs))
    }

    /// Whether the kitty is past its cooldown and not busy.
    ///
    /// # Errors
    ///
    /// `NotFound` if the kitty is unknown.
    pub fn can_breed(
        &self,
        registry: &KittyRegistry,
        id: KittyId,
        now: Timestamp,
    ) -> EngineResult<bool> {
        let record: &KittyRecord = registry.get(id)?;
        Ok(registry.engagement(id).is_none() && now >= record.ready_at(self.config.cooldown_secs))
    }
}
