//! # Kittyverse Engine
//!
//! The one entry point collaborators talk to.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌────────────────────── KittyEngine ──────────────────────┐
//!  create_genesis ──►│                                                          │
//!  breed ───────────►│  RwLock<World> ─┬─ KittyRegistry                         │──► EventBus
//!  battles ─────────►│   (write: one   └─ CombatResolver                        │
//!  transfer ────────►│    mutation at  Mutex<L: FeeLedger>                      │
//!                    │    a time)      Mutex<Box<dyn EntropySource>>            │
//!                    │                 Arc<dyn Clock>                           │
//!                    │        commit                                            │
//!                    │  ─────────────► RwLock<Arc<KittyRegistry>> (snapshot)    │
//!  get / list ──────►│  ◄───────────── Arc clone                                │
//!                    └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//!
//! Every mutation holds the world write lock for its whole
//! validate-then-commit step, and takes the ledger and entropy mutexes
//! only while holding it. Lock order is always world, ledger, entropy.
//!
//! A mutation that changed the registry ends by publishing an immutable
//! copy of it as the committed snapshot. Registry reads clone that `Arc`
//! and never touch the world lock, so they do not wait on a breeding or a
//! battle in flight and only ever see state between two complete
//! mutations. The snapshot slot is locked only for the pointer swap.
//! Battle reads still take the world read lock.

use alloy_primitives::Address;
use kittyverse_combat::{ActionOutcome, Battle, BattleOutcome, CombatResolver};
use kittyverse_core::{
    Clock, Engagement, EngineResult, EntropySource, FeeLedger, KittyRecord, KittyRegistry,
    TokenLedger,
};
use kittyverse_genetics::{derive_rarity, BreedRequest, GeneticsEngine};
use kittyverse_shared::{BattleAction, BattleId, KittyEvent, KittyId, RarityTier, Timestamp};
use parking_lot::{Mutex, MutexGuard, RwLock};
use std::sync::Arc;
use tracing::info;

use crate::config::EngineConfig;
use crate::events::{EventBus, EventReceiver, EventSender};

/// State guarded by the world lock.
struct World {
    registry: KittyRegistry,
    combat: CombatResolver,
}

/// The breeding and combat engine.
pub struct KittyEngine<L: FeeLedger = TokenLedger> {
    world: RwLock<World>,
    /// Registry as of the last committed mutation.
    committed: RwLock<Arc<KittyRegistry>>,
    genetics: GeneticsEngine,
    ledger: Mutex<L>,
    entropy: Mutex<Box<dyn EntropySource>>,
    clock: Arc<dyn Clock>,
    bus: EventBus,
    events: EventSender,
}

impl<L: FeeLedger> KittyEngine<L> {
    /// Builds an engine from a validated configuration.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the configuration does not validate.
    pub fn new(
        config: EngineConfig,
        ledger: L,
        entropy: impl EntropySource + 'static,
        clock: Arc<dyn Clock>,
    ) -> EngineResult<Self> {
        config.validate()?;

        let bus = EventBus::new(config.events.capacity);
        let events = bus.sender();
        let registry = KittyRegistry::new(config.genetics.genesis_cap);
        Ok(Self {
            committed: RwLock::new(Arc::new(registry.clone())),
            world: RwLock::new(World {
                registry,
                combat: CombatResolver::new(config.combat),
            }),
            genetics: GeneticsEngine::new(config.genetics),
            ledger: Mutex::new(ledger),
            entropy: Mutex::new(Box::new(entropy)),
            clock,
            bus,
            events,
        })
    }

    /// A new consumer with its own queue. It sees every event published
    /// from now on.
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver {
        self.bus.subscribe()
    }

    /// The registry as of the last committed mutation.
    ///
    /// Never waits on a mutation in flight. The returned view is immutable
    /// and stays valid, unchanged, for as long as it is held.
    #[must_use]
    pub fn snapshot(&self) -> Arc<KittyRegistry> {
        Arc::clone(&self.committed.read())
    }

    /// Direct access to the fee ledger (funding, allowances, treasury).
    pub fn ledger(&self) -> MutexGuard<'_, L> {
        self.ledger.lock()
    }

    fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Publishes `registry` as the committed snapshot. Called with the
    /// world write lock held, once the mutation has succeeded.
    fn commit(&self, registry: &KittyRegistry) {
        let next = Arc::new(registry.clone());
        let previous = std::mem::replace(&mut *self.committed.write(), next);
        drop(previous);
    }

    fn publish(&self, event: KittyEvent) {
        self.events.send(event);
    }

    fn publish_resolution(&self, battle_id: BattleId, outcome: &BattleOutcome) {
        self.publish(KittyEvent::BattleResolved {
            battle_id,
            winner_id: outcome.winner,
            experience_awarded: outcome.winner_experience,
        });
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Mints a genesis kitty for `owner`.
    ///
    /// # Errors
    ///
    /// `SupplyExhausted` once the genesis cap is reached.
    pub fn create_genesis(&self, owner: Address) -> EngineResult<KittyId> {
        let now = self.now();
        let mut world = self.world.write();
        let mut entropy = self.entropy.lock();

        let id = self
            .genetics
            .mint_genesis(&mut world.registry, &mut **entropy, owner, now)?;
        self.commit(&world.registry);

        self.publish(KittyEvent::Created {
            id,
            generation: 0,
            owner,
        });
        Ok(id)
    }

    /// Breeds two kitties on behalf of `requester`.
    ///
    /// # Errors
    ///
    /// `SelfBreedingDisallowed`, `NotFound`, `NotAuthorized`, `EntityBusy`,
    /// `CooldownActive` or `InsufficientFee`, in that order of precedence.
    pub fn breed(&self, matron: KittyId, sire: KittyId, requester: Address) -> EngineResult<KittyId> {
        let request = BreedRequest {
            matron,
            sire,
            requester,
            now: self.now(),
        };
        let mut world = self.world.write();
        let mut ledger = self.ledger.lock();
        let mut entropy = self.entropy.lock();

        let child = self
            .genetics
            .breed(&mut world.registry, &mut *ledger, &mut **entropy, request)?;
        let generation = world.registry.get(child)?.generation();
        self.commit(&world.registry);

        self.publish(KittyEvent::Created {
            id: child,
            generation,
            owner: requester,
        });
        self.publish(KittyEvent::Bred {
            child_id: child,
            matron_id: matron,
            sire_id: sire,
        });
        Ok(child)
    }

    // ========================================================================
    // Combat
    // ========================================================================

    /// Challenges `defender` with `attacker`.
    ///
    /// # Errors
    ///
    /// `SelfBattleDisallowed`, `NotFound`, `NotAuthorized`, `EntityBusy`.
    pub fn initiate_battle(
        &self,
        attacker: KittyId,
        defender: KittyId,
        caller: Address,
    ) -> EngineResult<BattleId> {
        let now = self.now();
        let mut world = self.world.write();
        let World { registry, combat } = &mut *world;

        let battle_id = combat.initiate(registry, attacker, defender, caller, now)?;
        self.publish(KittyEvent::BattleProposed {
            battle_id,
            attacker_id: attacker,
            defender_id: defender,
        });
        Ok(battle_id)
    }

    /// Accepts a challenge as the defender.
    ///
    /// # Errors
    ///
    /// `NotFound`, `BattleNotActive`, `NotAuthorized`, `EntityBusy`.
    pub fn accept_battle(&self, battle_id: BattleId, caller: Address) -> EngineResult<()> {
        let now = self.now();
        let mut world = self.world.write();
        let World { registry, combat } = &mut *world;

        combat.accept(registry, battle_id, caller, now)?;
        self.commit(registry);
        self.publish(KittyEvent::BattleAccepted { battle_id });
        Ok(())
    }

    /// Executes the turn owner's action.
    ///
    /// # Errors
    ///
    /// `NotFound`, `BattleNotActive`, `InvalidTurn`, `NotAuthorized`.
    pub fn execute_battle_action(
        &self,
        battle_id: BattleId,
        caller: Address,
        action: BattleAction,
    ) -> EngineResult<ActionOutcome> {
        let now = self.now();
        let mut world = self.world.write();
        let mut entropy = self.entropy.lock();
        let World { registry, combat } = &mut *world;

        let outcome =
            combat.execute_action(registry, &mut **entropy, battle_id, caller, action, now)?;

        self.publish(KittyEvent::ActionResolved {
            battle_id,
            actor_id: outcome.record.actor,
            damage: outcome.record.damage,
            target_health: outcome.record.target_health,
        });
        if let Some(resolution) = &outcome.resolution {
            self.commit(registry);
            self.publish_resolution(battle_id, resolution);
        }
        Ok(outcome)
    }

    /// Resolves an active battle in favor of the side that acted last.
    ///
    /// # Errors
    ///
    /// `NotFound`, `BattleNotActive`.
    pub fn force_resolve(&self, battle_id: BattleId) -> EngineResult<BattleOutcome> {
        let now = self.now();
        let mut world = self.world.write();
        let World { registry, combat } = &mut *world;

        let outcome = combat.force_resolve(registry, battle_id, now)?;
        self.commit(registry);
        self.publish_resolution(battle_id, &outcome);
        Ok(outcome)
    }

    /// Timeout sweep: force-resolves every battle stalled past the turn
    /// timeout and expires every proposal left unanswered as long.
    ///
    /// Returns the forfeits. Expiries are reported as `BattleExpired`.
    pub fn resolve_stalled(&self) -> Vec<(BattleId, BattleOutcome)> {
        let now = self.now();
        let mut world = self.world.write();
        let World { registry, combat } = &mut *world;

        let stalled = combat.stalled_battles(now);
        let mut resolved = Vec::with_capacity(stalled.len());
        for battle_id in stalled {
            // Every listed battle is active, so forcing it cannot fail.
            if let Ok(outcome) = combat.force_resolve(registry, battle_id, now) {
                resolved.push((battle_id, outcome));
            }
        }
        if !resolved.is_empty() {
            self.commit(registry);
            info!(count = resolved.len(), "stalled battles forfeited");
        }
        for (battle_id, outcome) in &resolved {
            self.publish_resolution(*battle_id, outcome);
        }

        self.expire_with(combat, now);
        resolved
    }

    /// Expires every proposal left unanswered past the turn timeout.
    /// Nothing is locked by a proposal, so no kitty changes.
    pub fn expire_proposals(&self) -> Vec<BattleId> {
        let now = self.now();
        let mut world = self.world.write();
        self.expire_with(&mut world.combat, now)
    }

    fn expire_with(&self, combat: &mut CombatResolver, now: Timestamp) -> Vec<BattleId> {
        let expired = combat.expire_proposals(now);
        for battle_id in &expired {
            self.publish(KittyEvent::BattleExpired {
                battle_id: *battle_id,
            });
        }
        expired
    }

    // ========================================================================
    // Ownership & staking (external collaborators)
    // ========================================================================

    /// Moves a kitty to a new owner.
    ///
    /// # Errors
    ///
    /// `NotFound`, `NotAuthorized`, `EntityBusy`.
    pub fn transfer(&self, id: KittyId, caller: Address, to: Address) -> EngineResult<()> {
        let mut world = self.world.write();
        let from = world.registry.transfer(id, caller, to)?;
        self.commit(&world.registry);
        if from != to {
            self.publish(KittyEvent::Transferred { id, from, to });
        }
        Ok(())
    }

    /// Grants or revokes a single-kitty delegate.
    ///
    /// # Errors
    ///
    /// `NotFound`, `NotAuthorized`.
    pub fn approve(&self, id: KittyId, caller: Address, delegate: Option<Address>) -> EngineResult<()> {
        let mut world = self.world.write();
        world.registry.approve(id, caller, delegate)?;
        self.commit(&world.registry);
        Ok(())
    }

    /// Grants or revokes an owner-wide operator.
    pub fn set_approval_for_all(&self, owner: Address, operator: Address, approved: bool) {
        let mut world = self.world.write();
        world.registry.set_operator(owner, operator, approved);
        self.commit(&world.registry);
    }

    /// Marks a kitty as staked.
    ///
    /// # Errors
    ///
    /// `NotFound`, `NotAuthorized`, `EntityBusy`.
    pub fn mark_staked(&self, id: KittyId, caller: Address) -> EngineResult<()> {
        let mut world = self.world.write();
        world.registry.ensure_authorized(id, caller)?;
        world.registry.engage(id, Engagement::Staked)?;
        self.commit(&world.registry);
        Ok(())
    }

    /// Releases a stake. Returns whether the kitty was staked.
    ///
    /// # Errors
    ///
    /// `NotFound`, `NotAuthorized`.
    pub fn release_stake(&self, id: KittyId, caller: Address) -> EngineResult<bool> {
        let mut world = self.world.write();
        world.registry.ensure_authorized(id, caller)?;
        let released = world.registry.release(id, Engagement::Staked);
        if released {
            self.commit(&world.registry);
        }
        Ok(released)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// A kitty's record.
    ///
    /// # Errors
    ///
    /// `NotFound`.
    pub fn get(&self, id: KittyId) -> EngineResult<KittyRecord> {
        self.snapshot().get(id).cloned()
    }

    /// Kitties held by `owner`, in creation order.
    #[must_use]
    pub fn list_by_owner(&self, owner: Address) -> Vec<KittyRecord> {
        let registry = self.snapshot();
        registry
            .list_by_owner(owner)
            .iter()
            .filter_map(|id| registry.get(*id).ok().cloned())
            .collect()
    }

    /// A kitty's rarity tier.
    ///
    /// # Errors
    ///
    /// `NotFound`.
    pub fn derive_rarity(&self, id: KittyId) -> EngineResult<RarityTier> {
        Ok(derive_rarity(self.snapshot().get(id)?.stats()))
    }

    /// Whether the kitty is past its cooldown and not busy.
    ///
    /// # Errors
    ///
    /// `NotFound`.
    pub fn can_breed(&self, id: KittyId) -> EngineResult<bool> {
        let now = self.now();
        self.genetics.can_breed(&self.snapshot(), id, now)
    }

    /// Earliest time the kitty may breed again.
    ///
    /// # Errors
    ///
    /// `NotFound`.
    pub fn ready_at(&self, id: KittyId) -> EngineResult<Timestamp> {
        self.genetics.ready_at(&self.snapshot(), id)
    }

    /// What the kitty is committed to, if anything.
    ///
    /// # Errors
    ///
    /// `NotFound`.
    pub fn engagement(&self, id: KittyId) -> EngineResult<Option<Engagement>> {
        let registry = self.snapshot();
        registry.get(id)?;
        Ok(registry.engagement(id))
    }

    /// Number of kitties ever created.
    #[must_use]
    pub fn total_supply(&self) -> usize {
        self.snapshot().total_supply()
    }

    /// Genesis kitties minted so far.
    #[must_use]
    pub fn genesis_minted(&self) -> u32 {
        self.snapshot().genesis_minted()
    }

    /// A live or archived battle.
    ///
    /// # Errors
    ///
    /// `NotFound`.
    pub fn battle(&self, id: BattleId) -> EngineResult<Battle> {
        self.world.read().combat.get(id).cloned()
    }

    /// Active battles past the turn timeout.
    #[must_use]
    pub fn stalled_battles(&self) -> Vec<BattleId> {
        let now = self.now();
        self.world.read().combat.stalled_battles(now)
    }

    /// Proposals unanswered past the turn timeout.
    #[must_use]
    pub fn expired_proposals(&self) -> Vec<BattleId> {
        let now = self.now();
        self.world.read().combat.expired_proposals(now)
    }

    /// Whether `caller` may act on `id`.
    ///
    /// # Errors
    ///
    /// `NotFound`.
    pub fn is_authorized(&self, id: KittyId, caller: Address) -> EngineResult<bool> {
        self.snapshot().is_authorized(id, caller)
    }
}

impl<L: FeeLedger> std::fmt::Debug for KittyEngine<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.snapshot();
        f.debug_struct("KittyEngine")
            .field("total_supply", &registry.total_supply())
            .field("genesis_minted", &registry.genesis_minted())
            .field("open_battles", &self.world.read().combat.open_battles().count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kittyverse_core::{EngineError, FixedEntropy, ManualClock};
    use kittyverse_shared::tokens;

    fn engine() -> (KittyEngine, ManualClock) {
        let clock = ManualClock::new(1_700_000_000);
        let engine = KittyEngine::new(
            EngineConfig::default(),
            TokenLedger::new(),
            FixedEntropy::new(1),
            Arc::new(clock.clone()),
        )
        .unwrap();
        (engine, clock)
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn check<T: Send + Sync>() {}
        check::<KittyEngine<TokenLedger>>();
    }

    #[test]
    fn test_reads_do_not_wait_for_a_writer() {
        let (engine, _clock) = engine();
        let owner = Address::with_last_byte(1);
        let id = engine.create_genesis(owner).unwrap();
        let engine = Arc::new(engine);

        // Stands in for a breed or battle step holding the world
        let writer = engine.world.write();

        let (done, seen) = crossbeam_channel::bounded(1);
        let reader = {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let record = engine.get(id).unwrap();
                let listed = engine.list_by_owner(owner).len();
                let rarity = engine.derive_rarity(id).unwrap();
                done.send((record.owner(), listed, rarity, engine.total_supply()))
                    .unwrap();
            })
        };

        let (seen_owner, listed, rarity, supply) = seen
            .recv_timeout(std::time::Duration::from_secs(10))
            .expect("reads blocked behind the writer");
        drop(writer);
        reader.join().unwrap();

        assert_eq!(seen_owner, owner);
        assert_eq!(listed, 1);
        assert_eq!(rarity, derive_rarity(engine.get(id).unwrap().stats()));
        assert_eq!(supply, 1);
    }

    #[test]
    fn test_snapshot_is_immutable_once_taken() {
        let (engine, _clock) = engine();
        let alice = Address::with_last_byte(1);
        let bob = Address::with_last_byte(2);
        let id = engine.create_genesis(alice).unwrap();

        let before = engine.snapshot();
        engine.create_genesis(alice).unwrap();
        engine.transfer(id, alice, bob).unwrap();

        assert_eq!(before.total_supply(), 1);
        assert_eq!(before.owner_of(id).unwrap(), alice);
        assert_eq!(engine.total_supply(), 2);
        assert_eq!(engine.get(id).unwrap().owner(), bob);
    }

    #[test]
    fn test_failed_mutation_leaves_snapshot_untouched() {
        let (engine, _clock) = engine();
        let alice = Address::with_last_byte(1);
        let mallory = Address::with_last_byte(6);
        let id = engine.create_genesis(alice).unwrap();

        let before = engine.snapshot();
        assert!(engine.transfer(id, mallory, mallory).is_err());
        assert!(Arc::ptr_eq(&before, &engine.snapshot()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.combat.min_damage = 0;
        let result = KittyEngine::new(
            config,
            TokenLedger::new(),
            FixedEntropy::new(1),
            Arc::new(ManualClock::new(0)),
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_genesis_publishes_created() {
        let (engine, _clock) = engine();
        let events = engine.subscribe();
        let owner = Address::with_last_byte(1);

        let id = engine.create_genesis(owner).unwrap();
        assert_eq!(
            events.drain(),
            vec![KittyEvent::Created {
                id,
                generation: 0,
                owner
            }]
        );
    }

    #[test]
    fn test_failed_breed_publishes_nothing() {
        let (engine, _clock) = engine();
        let owner = Address::with_last_byte(1);
        let a = engine.create_genesis(owner).unwrap();
        let b = engine.create_genesis(owner).unwrap();
        let events = engine.subscribe();
        events.drain();

        assert!(matches!(
            engine.breed(a, b, owner),
            Err(EngineError::InsufficientFee { .. })
        ));
        assert!(events.drain().is_empty());

        engine.ledger().mint(owner, tokens(10));
        engine.ledger().approve(owner, tokens(10));
        let child = engine.breed(a, b, owner).unwrap();
        let kinds: Vec<_> = events.drain().iter().map(KittyEvent::event_type).collect();
        assert_eq!(kinds.len(), 2);
        assert_eq!(engine.get(child).unwrap().generation(), 1);
    }

    #[test]
    fn test_staked_kitty_cannot_battle_or_breed() {
        let (engine, _clock) = engine();
        let alice = Address::with_last_byte(1);
        let bob = Address::with_last_byte(2);
        let a = engine.create_genesis(alice).unwrap();
        let b = engine.create_genesis(bob).unwrap();

        engine.mark_staked(a, alice).unwrap();
        assert_eq!(engine.engagement(a).unwrap(), Some(Engagement::Staked));
        assert!(!engine.can_breed(a).unwrap());
        assert_eq!(
            engine.initiate_battle(a, b, alice).unwrap_err(),
            EngineError::EntityBusy {
                id: a,
                engagement: Engagement::Staked
            }
        );

        assert!(engine.release_stake(a, alice).unwrap());
        assert!(engine.initiate_battle(a, b, alice).is_ok());
    }
}
