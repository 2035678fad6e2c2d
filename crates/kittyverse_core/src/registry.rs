//! # Kitty Registry
//!
//! The authoritative store of kitty records and their ownership.
//!
//! ## Layout
//!
//! ```text
//! kitties: [ #1 | #2 | #3 | ... ]      arena, index = id - 1, append-only
//! owned:   owner -> [#1, #3, ...]      creation order, always sorted
//! busy:    id    -> Engagement         battle or stake locks
//! ```
//!
//! Ids are handed out monotonically and never reused, so the arena never
//! has holes and lookup is a bounds check.
//!
//! ## Invariants
//!
//! - `generation` is fixed at creation.
//! - `last_bred_at` never decreases.
//! - `experience` never decreases.
//! - The genesis counter is checked and bumped in the same `&mut self`
//!   call that appends the record, so the cap can never be overshot.

use alloy_primitives::Address;
use kittyverse_shared::{CombatStats, KittyId, Timestamp, TraitVector, GENESIS_SUPPLY_CAP};
use std::collections::{HashMap, HashSet};

use crate::error::{EngineError, EngineResult};
use crate::record::{Engagement, KittyRecord, Lineage};

/// Arena-backed kitty store with owner index, approvals and busy marks.
#[derive(Debug, Clone)]
pub struct KittyRegistry {
    /// All kitties, index = id - 1.
    kitties: Vec<KittyRecord>,
    /// Kitty ids per owner in creation order.
    owned: HashMap<Address, Vec<KittyId>>,
    /// Single-kitty delegates.
    approvals: HashMap<KittyId, Address>,
    /// (owner, operator) pairs allowed to act on all of owner's kitties.
    operators: HashSet<(Address, Address)>,
    /// Kitties committed to a battle or a stake.
    busy: HashMap<KittyId, Engagement>,
    /// Genesis kitties minted so far.
    genesis_minted: u32,
    /// Genesis cap.
    genesis_cap: u32,
}

impl KittyRegistry {
    /// Creates an empty registry with the given genesis cap.
    #[must_use]
    pub fn new(genesis_cap: u32) -> Self {
        Self {
            kitties: Vec::new(),
            owned: HashMap::new(),
            approvals: HashMap::new(),
            operators: HashSet::new(),
            busy: HashMap::new(),
            genesis_minted: 0,
            genesis_cap,
        }
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Appends a generation-0 kitty.
    ///
    /// # Errors
    ///
    /// `SupplyExhausted` once the genesis cap has been reached.
    pub fn create_genesis(
        &mut self,
        owner: Address,
        traits: TraitVector,
        stats: CombatStats,
        now: Timestamp,
    ) -> EngineResult<KittyId> {
        if self.genesis_minted >= self.genesis_cap {
            return Err(EngineError::SupplyExhausted {
                cap: self.genesis_cap,
            });
        }
        self.genesis_minted += 1;

        Ok(self.append(Lineage::Genesis, 0, traits, stats, owner, now))
    }

    /// Appends a bred kitty one generation below its older parent.
    ///
    /// # Errors
    ///
    /// `NotFound` if either parent is unknown.
    pub fn create_bred(
        &mut self,
        matron: KittyId,
        sire: KittyId,
        traits: TraitVector,
        stats: CombatStats,
        owner: Address,
        now: Timestamp,
    ) -> EngineResult<KittyId> {
        let matron_gen = self.get(matron)?.generation;
        let sire_gen = self.get(sire)?.generation;
        let generation = matron_gen.max(sire_gen).saturating_add(1);

        Ok(self.append(
            Lineage::Bred { matron, sire },
            generation,
            traits,
            stats,
            owner,
            now,
        ))
    }

    fn append(
        &mut self,
        lineage: Lineage,
        generation: u32,
        traits: TraitVector,
        stats: CombatStats,
        owner: Address,
        now: Timestamp,
    ) -> KittyId {
        let id = KittyId::new(self.kitties.len() as u64 + 1);
        self.kitties.push(KittyRecord {
            id,
            generation,
            created_at: now,
            last_bred_at: None,
            lineage,
            traits,
            stats,
            experience: 0,
            owner,
        });
        // Ids grow monotonically, so pushing keeps each owner list sorted.
        self.owned.entry(owner).or_default().push(id);
        id
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    fn slot(&self, id: KittyId) -> Option<usize> {
        let index = usize::try_from(id.raw().checked_sub(1)?).ok()?;
        (index < self.kitties.len()).then_some(index)
    }

    /// Looks up a kitty.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids (including the reserved id 0).
    pub fn get(&self, id: KittyId) -> EngineResult<&KittyRecord> {
        self.slot(id)
            .map(|index| &self.kitties[index])
            .ok_or(EngineError::kitty_not_found(id))
    }

    fn get_mut(&mut self, id: KittyId) -> EngineResult<&mut KittyRecord> {
        match self.slot(id) {
            Some(index) => Ok(&mut self.kitties[index]),
            None => Err(EngineError::kitty_not_found(id)),
        }
    }

    /// Whether the id refers to an existing kitty.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: KittyId) -> bool {
        self.slot(id).is_some()
    }

    /// Ids held by `owner`, in creation order.
    #[must_use]
    pub fn list_by_owner(&self, owner: Address) -> &[KittyId] {
        self.owned.get(&owner).map_or(&[], Vec::as_slice)
    }

    /// All kitties in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &KittyRecord> {
        self.kitties.iter()
    }

    /// Number of kitties ever created.
    #[inline]
    #[must_use]
    pub fn total_supply(&self) -> usize {
        self.kitties.len()
    }

    /// Genesis kitties minted so far.
    #[inline]
    #[must_use]
    pub const fn genesis_minted(&self) -> u32 {
        self.genesis_minted
    }

    /// The genesis cap.
    #[inline]
    #[must_use]
    pub const fn genesis_cap(&self) -> u32 {
        self.genesis_cap
    }

    // ========================================================================
    // Breeding & experience
    // ========================================================================

    /// Stamps both parents with the breeding time.
    ///
    /// Both ids are validated before either record is touched. A timestamp
    /// earlier than the stored one leaves the stored one in place.
    ///
    /// # Errors
    ///
    /// `NotFound` if either parent is unknown.
    pub fn record_breeding(
        &mut self,
        matron: KittyId,
        sire: KittyId,
        at: Timestamp,
    ) -> EngineResult<()> {
        self.get(matron)?;
        self.get(sire)?;

        for id in [matron, sire] {
            let record = self.get_mut(id)?;
            record.last_bred_at = Some(record.last_bred_at.map_or(at, |prev| prev.max(at)));
        }
        Ok(())
    }

    /// Grants battle experience, returning the new total.
    ///
    /// # Errors
    ///
    /// `NotFound` if the kitty is unknown.
    pub fn add_experience(&mut self, id: KittyId, amount: u64) -> EngineResult<u64> {
        let record = self.get_mut(id)?;
        record.experience = record.experience.saturating_add(amount);
        Ok(record.experience)
    }

    // ========================================================================
    // Ownership & authorization
    // ========================================================================

    /// Current owner.
    ///
    /// # Errors
    ///
    /// `NotFound` if the kitty is unknown.
    pub fn owner_of(&self, id: KittyId) -> EngineResult<Address> {
        Ok(self.get(id)?.owner)
    }

    /// Single-kitty delegate, if any.
    #[must_use]
    pub fn approved(&self, id: KittyId) -> Option<Address> {
        self.approvals.get(&id).copied()
    }

    /// Whether `operator` may act on every kitty `owner` holds.
    #[must_use]
    pub fn is_operator(&self, owner: Address, operator: Address) -> bool {
        self.operators.contains(&(owner, operator))
    }

    /// Grants or revokes a delegate for one kitty. `None` revokes.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown kitties, `NotAuthorized` unless the caller is
    /// the owner or one of its operators.
    pub fn approve(
        &mut self,
        id: KittyId,
        caller: Address,
        delegate: Option<Address>,
    ) -> EngineResult<()> {
        let owner = self.owner_of(id)?;
        if caller != owner && !self.is_operator(owner, caller) {
            return Err(EngineError::NotAuthorized { id, caller });
        }

        match delegate {
            Some(delegate) => {
                self.approvals.insert(id, delegate);
            }
            None => {
                self.approvals.remove(&id);
            }
        }
        Ok(())
    }

    /// Grants or revokes an owner-wide operator.
    pub fn set_operator(&mut self, owner: Address, operator: Address, approved: bool) {
        if approved {
            self.operators.insert((owner, operator));
        } else {
            self.operators.remove(&(owner, operator));
        }
    }

    /// Whether `caller` is the owner, the approved delegate or an operator.
    ///
    /// # Errors
    ///
    /// `NotFound` if the kitty is unknown.
    pub fn is_authorized(&self, id: KittyId, caller: Address) -> EngineResult<bool> {
        let owner = self.owner_of(id)?;
        Ok(caller == owner
            || self.approved(id) == Some(caller)
            || self.is_operator(owner, caller))
    }

    /// Fails unless `caller` may act on `id`.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown kitties, `NotAuthorized` otherwise.
    pub fn ensure_authorized(&self, id: KittyId, caller: Address) -> EngineResult<&KittyRecord> {
        if self.is_authorized(id, caller)? {
            self.get(id)
        } else {
            Err(EngineError::NotAuthorized { id, caller })
        }
    }

    /// Moves a kitty to a new owner and clears its delegate.
    ///
    /// Authorization is always evaluated against the current owner, so any
    /// in-flight check tied to the previous owner stops passing.
    ///
    /// # Errors
    ///
    /// `NotFound`, `NotAuthorized` unless the caller may act on the kitty,
    /// `EntityBusy` while the kitty is engaged.
    pub fn transfer(&mut self, id: KittyId, caller: Address, to: Address) -> EngineResult<Address> {
        self.ensure_authorized(id, caller)?;
        self.ensure_idle(id)?;

        let from = self.owner_of(id)?;
        if from == to {
            return Ok(from);
        }

        if let Some(ids) = self.owned.get_mut(&from) {
            ids.retain(|owned| *owned != id);
            if ids.is_empty() {
                self.owned.remove(&from);
            }
        }
        let ids = self.owned.entry(to).or_default();
        let position = ids.binary_search(&id).unwrap_or_else(|insert_at| insert_at);
        ids.insert(position, id);

        self.approvals.remove(&id);
        self.get_mut(id)?.owner = to;
        Ok(from)
    }

    // ========================================================================
    // Busy marks
    // ========================================================================

    /// What the kitty is committed to, if anything.
    #[must_use]
    pub fn engagement(&self, id: KittyId) -> Option<Engagement> {
        self.busy.get(&id).copied()
    }

    /// Fails if the kitty is busy.
    ///
    /// # Errors
    ///
    /// `EntityBusy` naming the current engagement.
    pub fn ensure_idle(&self, id: KittyId) -> EngineResult<()> {
        match self.engagement(id) {
            Some(engagement) => Err(EngineError::EntityBusy { id, engagement }),
            None => Ok(()),
        }
    }

    /// Marks an idle kitty busy.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown kitties, `EntityBusy` if already engaged.
    pub fn engage(&mut self, id: KittyId, engagement: Engagement) -> EngineResult<()> {
        self.get(id)?;
        self.ensure_idle(id)?;
        self.busy.insert(id, engagement);
        Ok(())
    }

    /// Clears a busy mark if it matches `engagement`. Returns whether it did.
    pub fn release(&mut self, id: KittyId, engagement: Engagement) -> bool {
        if self.busy.get(&id) == Some(&engagement) {
            self.busy.remove(&id);
            true
        } else {
            false
        }
    }
}

impl Default for KittyRegistry {
    fn default() -> Self {
        Self::new(GENESIS_SUPPLY_CAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kittyverse_shared::BattleId;

    fn traits() -> TraitVector {
        TraitVector::new(1, 2, 3, 1, 0, false).unwrap()
    }

    fn stats() -> CombatStats {
        CombatStats::new(80, 90, 100)
    }

    fn alice() -> Address {
        Address::with_last_byte(0xA1)
    }

    fn bob() -> Address {
        Address::with_last_byte(0xB0)
    }

    #[test]
    fn test_ids_are_monotonic_from_one() {
        let mut registry = KittyRegistry::default();
        let first = registry.create_genesis(alice(), traits(), stats(), 10).unwrap();
        let second = registry.create_genesis(bob(), traits(), stats(), 11).unwrap();

        assert_eq!(first, KittyId::new(1));
        assert_eq!(second, KittyId::new(2));
        assert_eq!(registry.total_supply(), 2);
    }

    #[test]
    fn test_genesis_record_shape() {
        let mut registry = KittyRegistry::default();
        let id = registry.create_genesis(alice(), traits(), stats(), 42).unwrap();
        let kitty = registry.get(id).unwrap();

        assert_eq!(kitty.generation(), 0);
        assert_eq!(kitty.matron_id(), None);
        assert_eq!(kitty.sire_id(), None);
        assert!(kitty.is_genesis());
        assert_eq!(kitty.created_at(), 42);
        assert_eq!(kitty.owner(), alice());
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let registry = KittyRegistry::default();
        assert_eq!(
            registry.get(KittyId::new(0)).unwrap_err(),
            EngineError::kitty_not_found(KittyId::new(0))
        );
        assert_eq!(
            registry.get(KittyId::new(7)).unwrap_err(),
            EngineError::kitty_not_found(KittyId::new(7))
        );
    }

    #[test]
    fn test_genesis_cap_is_exact() {
        let mut registry = KittyRegistry::new(3);
        for _ in 0..3 {
            registry.create_genesis(alice(), traits(), stats(), 0).unwrap();
        }

        let err = registry.create_genesis(alice(), traits(), stats(), 0).unwrap_err();
        assert_eq!(err, EngineError::SupplyExhausted { cap: 3 });
        assert_eq!(registry.genesis_minted(), 3);
        assert_eq!(registry.total_supply(), 3);
    }

    #[test]
    fn test_bred_generation_is_older_parent_plus_one() {
        let mut registry = KittyRegistry::default();
        let a = registry.create_genesis(alice(), traits(), stats(), 0).unwrap();
        let b = registry.create_genesis(alice(), traits(), stats(), 0).unwrap();
        let c = registry.create_bred(a, b, traits(), stats(), alice(), 1).unwrap();
        let d = registry.create_bred(c, a, traits(), stats(), alice(), 2).unwrap();

        assert_eq!(registry.get(c).unwrap().generation(), 1);
        assert_eq!(registry.get(d).unwrap().generation(), 2);
        assert_eq!(registry.get(d).unwrap().matron_id(), Some(c));
        assert_eq!(registry.get(d).unwrap().sire_id(), Some(a));
        assert_eq!(registry.genesis_minted(), 2);
    }

    #[test]
    fn test_bred_with_unknown_parent_leaves_no_record() {
        let mut registry = KittyRegistry::default();
        let a = registry.create_genesis(alice(), traits(), stats(), 0).unwrap();

        let err = registry
            .create_bred(a, KittyId::new(99), traits(), stats(), alice(), 1)
            .unwrap_err();
        assert_eq!(err, EngineError::kitty_not_found(KittyId::new(99)));
        assert_eq!(registry.total_supply(), 1);
    }

    #[test]
    fn test_list_by_owner_keeps_creation_order_across_transfers() {
        let mut registry = KittyRegistry::default();
        let ids: Vec<_> = (0..4)
            .map(|i| {
                let owner = if i % 2 == 0 { alice() } else { bob() };
                registry.create_genesis(owner, traits(), stats(), 0).unwrap()
            })
            .collect();

        // bob holds #2 and #4; alice gives him #3
        registry.transfer(ids[2], alice(), bob()).unwrap();

        assert_eq!(registry.list_by_owner(bob()), &[ids[1], ids[2], ids[3]]);
        assert_eq!(registry.list_by_owner(alice()), &[ids[0]]);
    }

    #[test]
    fn test_record_breeding_never_moves_backwards() {
        let mut registry = KittyRegistry::default();
        let a = registry.create_genesis(alice(), traits(), stats(), 0).unwrap();
        let b = registry.create_genesis(alice(), traits(), stats(), 0).unwrap();

        registry.record_breeding(a, b, 500).unwrap();
        registry.record_breeding(a, b, 100).unwrap();

        assert_eq!(registry.get(a).unwrap().last_bred_at(), Some(500));
        assert_eq!(registry.get(b).unwrap().last_bred_at(), Some(500));
    }

    #[test]
    fn test_breeding_at_time_zero_is_recorded() {
        let mut registry = KittyRegistry::default();
        let a = registry.create_genesis(alice(), traits(), stats(), 0).unwrap();
        let b = registry.create_genesis(alice(), traits(), stats(), 0).unwrap();
        assert_eq!(registry.get(a).unwrap().ready_at(86_400), 0);

        registry.record_breeding(a, b, 0).unwrap();
        assert_eq!(registry.get(a).unwrap().last_bred_at(), Some(0));
        assert_eq!(registry.get(a).unwrap().ready_at(86_400), 86_400);
    }

    #[test]
    fn test_record_breeding_validates_both_before_writing() {
        let mut registry = KittyRegistry::default();
        let a = registry.create_genesis(alice(), traits(), stats(), 0).unwrap();

        assert!(registry.record_breeding(a, KittyId::new(9), 500).is_err());
        assert_eq!(registry.get(a).unwrap().last_bred_at(), None);
    }

    #[test]
    fn test_experience_accumulates() {
        let mut registry = KittyRegistry::default();
        let a = registry.create_genesis(alice(), traits(), stats(), 0).unwrap();

        assert_eq!(registry.add_experience(a, 100).unwrap(), 100);
        assert_eq!(registry.add_experience(a, 25).unwrap(), 125);
    }

    #[test]
    fn test_authorization_paths() {
        let mut registry = KittyRegistry::default();
        let a = registry.create_genesis(alice(), traits(), stats(), 0).unwrap();
        let carol = Address::with_last_byte(0xC0);

        assert!(registry.is_authorized(a, alice()).unwrap());
        assert!(!registry.is_authorized(a, bob()).unwrap());

        registry.approve(a, alice(), Some(bob())).unwrap();
        assert!(registry.is_authorized(a, bob()).unwrap());

        registry.set_operator(alice(), carol, true);
        assert!(registry.is_authorized(a, carol).unwrap());

        assert_eq!(
            registry.approve(a, Address::ZERO, None).unwrap_err(),
            EngineError::NotAuthorized {
                id: a,
                caller: Address::ZERO
            }
        );
    }

    #[test]
    fn test_transfer_revokes_previous_authorization() {
        let mut registry = KittyRegistry::default();
        let a = registry.create_genesis(alice(), traits(), stats(), 0).unwrap();
        let carol = Address::with_last_byte(0xC0);
        registry.approve(a, alice(), Some(carol)).unwrap();

        assert_eq!(registry.transfer(a, alice(), bob()).unwrap(), alice());

        assert!(!registry.is_authorized(a, alice()).unwrap());
        assert!(!registry.is_authorized(a, carol).unwrap());
        assert!(registry.is_authorized(a, bob()).unwrap());
    }

    #[test]
    fn test_busy_kitty_cannot_transfer_or_double_engage() {
        let mut registry = KittyRegistry::default();
        let a = registry.create_genesis(alice(), traits(), stats(), 0).unwrap();
        let battle = Engagement::Battle(BattleId::new(1));

        registry.engage(a, battle).unwrap();
        assert_eq!(
            registry.engage(a, Engagement::Staked).unwrap_err(),
            EngineError::EntityBusy {
                id: a,
                engagement: battle
            }
        );
        assert!(registry.transfer(a, alice(), bob()).is_err());

        assert!(!registry.release(a, Engagement::Staked));
        assert!(registry.release(a, battle));
        assert_eq!(registry.engagement(a), None);
        registry.transfer(a, alice(), bob()).unwrap();
    }
}
