//! # Combat Resolver
//!
//! Owns every battle record and drives the state machine:
//!
//! ```text
//!            initiate            accept              first action
//!   (none) ───────────► Proposed ──────► Accepted ───────────────► InProgress
//!                                            │                          │
//!                                            │ force_resolve            │ health hits 0
//!                                            │                          │ or force_resolve
//!                                            └────────► Resolved ◄──────┘
//! ```
//!
//! Any other transition is rejected with `BattleNotActive` or
//! `InvalidTurn` and leaves the battle untouched.
//!
//! Proposed battles lock nothing in the registry, but a kitty may sit in
//! at most one open proposal. A proposal left unanswered for
//! `turn_timeout_secs` is expired: archived as resolved with no winner and
//! no experience. Both kitties are marked busy in the registry at
//! acceptance and released at resolution.

use alloy_primitives::Address;
use kittyverse_core::{
    Engagement, EngineError, EngineResult, EntropySource, KittyRegistry, SeedPurpose,
};
use kittyverse_shared::{BattleAction, BattleId, BattlePhase, KittyId, Side, Timestamp};
use std::collections::BTreeMap;
use tracing::info;

use crate::battle::{ActionRecord, Battle, BattleOutcome, ResolutionCause};
use crate::config::CombatConfig;
use crate::damage::roll_damage;

/// Result of one executed action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionOutcome {
    /// The logged action.
    pub record: ActionRecord,
    /// Set if this action ended the battle.
    pub resolution: Option<BattleOutcome>,
}

/// Battle store and state machine.
#[derive(Clone, Debug, Default)]
pub struct CombatResolver {
    config: CombatConfig,
    /// Proposed, accepted and in-progress battles.
    battles: BTreeMap<BattleId, Battle>,
    /// Resolved battles.
    archive: BTreeMap<BattleId, Battle>,
    /// Last battle id handed out.
    last_id: u64,
}

impl CombatResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new(config: CombatConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active rules.
    #[must_use]
    pub const fn config(&self) -> &CombatConfig {
        &self.config
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Issues a challenge.
    ///
    /// # Errors
    ///
    /// `SelfBattleDisallowed`, `NotFound` for either kitty, `NotAuthorized`
    /// unless the caller may act on the attacker, `EntityBusy` if either
    /// kitty is already engaged or already named in an open proposal.
    pub fn initiate(
        &mut self,
        registry: &KittyRegistry,
        attacker: KittyId,
        defender: KittyId,
        caller: Address,
        now: Timestamp,
    ) -> EngineResult<BattleId> {
        if attacker == defender {
            return Err(EngineError::SelfBattleDisallowed(attacker));
        }
        registry.get(attacker)?;
        registry.get(defender)?;
        registry.ensure_authorized(attacker, caller)?;
        registry.ensure_idle(attacker)?;
        registry.ensure_idle(defender)?;
        for kitty in [attacker, defender] {
            if let Some(pending) = self.pending_proposal(kitty) {
                return Err(EngineError::EntityBusy {
                    id: kitty,
                    engagement: Engagement::Battle(pending),
                });
            }
        }

        self.last_id += 1;
        let id = BattleId::new(self.last_id);
        self.battles
            .insert(id, Battle::propose(id, attacker, defender, now));

        info!(battle = %id, attacker = %attacker, defender = %defender, "battle proposed");
        Ok(id)
    }

    /// Accepts a challenge, locking both kitties and loading health.
    ///
    /// # Errors
    ///
    /// `NotFound`, `BattleNotActive` unless proposed, `NotAuthorized` unless
    /// the caller may act on the defender, `EntityBusy` if either kitty got
    /// engaged elsewhere since the challenge.
    pub fn accept(
        &mut self,
        registry: &mut KittyRegistry,
        id: BattleId,
        caller: Address,
        now: Timestamp,
    ) -> EngineResult<()> {
        let battle = self.get(id)?;
        if battle.phase != BattlePhase::Proposed {
            return Err(EngineError::BattleNotActive {
                battle: id,
                phase: battle.phase,
            });
        }

        let attacker = battle.attacker.kitty;
        let defender = battle.defender.kitty;
        registry.ensure_authorized(defender, caller)?;
        registry.ensure_idle(attacker)?;
        registry.ensure_idle(defender)?;
        let attacker_stats = *registry.get(attacker)?.stats();
        let defender_stats = *registry.get(defender)?.stats();

        // Both idle was just checked, so neither engage can fail.
        registry.engage(attacker, Engagement::Battle(id))?;
        registry.engage(defender, Engagement::Battle(id))?;

        let health_base = self.config.health_base;
        let battle = self.active_mut(id)?;
        for (side, stats) in [(Side::Attacker, attacker_stats), (Side::Defender, defender_stats)] {
            let combatant = battle.combatant_mut(side);
            combatant.stats = stats;
            combatant.health = health_base.saturating_add(u32::from(stats.strength));
        }
        battle.phase = BattlePhase::Accepted;
        battle.turn = Side::Attacker;
        battle.round = 1;
        battle.last_actor = Some(Side::Defender);
        battle.last_activity_at = now;

        info!(
            battle = %id,
            attacker_health = battle.attacker.health,
            defender_health = battle.defender.health,
            "battle accepted"
        );
        Ok(())
    }

    /// Resolves one action by the turn owner.
    ///
    /// The caller's side is whichever combatant it may act on; a caller
    /// that controls only the waiting side gets `InvalidTurn`.
    ///
    /// # Errors
    ///
    /// `NotFound`, `BattleNotActive` unless accepted or in progress,
    /// `InvalidTurn` for the waiting side, `NotAuthorized` for strangers.
    pub fn execute_action<E: EntropySource + ?Sized>(
        &mut self,
        registry: &mut KittyRegistry,
        entropy: &mut E,
        id: BattleId,
        caller: Address,
        action: BattleAction,
        now: Timestamp,
    ) -> EngineResult<ActionOutcome> {
        let battle = self.get(id)?;
        if !battle.phase.is_active() {
            return Err(EngineError::BattleNotActive {
                battle: id,
                phase: battle.phase,
            });
        }

        let turn = battle.turn;
        let actor = *battle.combatant(turn);
        let target = *battle.combatant(turn.opponent());
        if !registry.is_authorized(actor.kitty, caller)? {
            return Err(if registry.is_authorized(target.kitty, caller)? {
                EngineError::InvalidTurn {
                    battle: id,
                    expected: turn,
                }
            } else {
                EngineError::NotAuthorized {
                    id: actor.kitty,
                    caller,
                }
            });
        }

        let damage = roll_damage(
            action,
            &actor.stats,
            &target.stats,
            target.defending,
            &self.config,
            &mut entropy.rng(SeedPurpose::BattleAction, id.raw()),
        );
        let target_health = target.health.saturating_sub(damage);

        let battle = self.active_mut(id)?;
        let record = ActionRecord {
            round: battle.round,
            side: turn,
            actor: actor.kitty,
            action,
            damage,
            target_health,
            at: now,
        };
        battle.combatant_mut(turn).defending = action == BattleAction::Defend;
        battle.combatant_mut(turn.opponent()).health = target_health;
        battle.log.push(record);
        battle.phase = BattlePhase::InProgress;
        battle.last_actor = Some(turn);
        battle.last_activity_at = now;

        info!(
            battle = %id,
            actor = %actor.kitty,
            action = ?action,
            damage,
            target_health,
            "action resolved"
        );

        if target_health == 0 {
            let outcome = self.resolve(registry, id, turn, ResolutionCause::Knockout, now)?;
            return Ok(ActionOutcome {
                record,
                resolution: Some(outcome),
            });
        }

        let battle = self.active_mut(id)?;
        if turn == Side::Defender {
            battle.round += 1;
        }
        battle.turn = turn.opponent();

        Ok(ActionOutcome {
            record,
            resolution: None,
        })
    }

    /// Ends a stalled battle in favor of the side that acted last.
    ///
    /// Invoked by the external timeout policy; see [`Self::stalled_battles`].
    ///
    /// # Errors
    ///
    /// `NotFound`, `BattleNotActive` unless accepted or in progress.
    pub fn force_resolve(
        &mut self,
        registry: &mut KittyRegistry,
        id: BattleId,
        now: Timestamp,
    ) -> EngineResult<BattleOutcome> {
        let battle = self.get(id)?;
        if !battle.phase.is_active() {
            return Err(EngineError::BattleNotActive {
                battle: id,
                phase: battle.phase,
            });
        }
        // Active battles always have one: acceptance counts as the defender acting.
        let winner = battle.last_actor.unwrap_or(Side::Defender);
        self.resolve(registry, id, winner, ResolutionCause::Forfeit, now)
    }

    /// Archives every proposal older than `turn_timeout_secs`.
    ///
    /// Expired battles end `Resolved` with no outcome. Nothing was locked
    /// and no experience is granted.
    pub fn expire_proposals(&mut self, now: Timestamp) -> Vec<BattleId> {
        let expired = self.expired_proposals(now);
        for id in &expired {
            if let Some(mut battle) = self.battles.remove(id) {
                battle.phase = BattlePhase::Resolved;
                battle.last_activity_at = now;
                info!(
                    battle = %id,
                    attacker = %battle.attacker.kitty,
                    defender = %battle.defender.kitty,
                    "battle proposal expired"
                );
                self.archive.insert(*id, battle);
            }
        }
        expired
    }

    fn resolve(
        &mut self,
        registry: &mut KittyRegistry,
        id: BattleId,
        winner_side: Side,
        cause: ResolutionCause,
        now: Timestamp,
    ) -> EngineResult<BattleOutcome> {
        let battle = self.active(id)?;
        let winner = battle.combatant(winner_side).kitty;
        let loser = battle.combatant(winner_side.opponent()).kitty;
        registry.get(winner)?;
        registry.get(loser)?;

        let outcome = BattleOutcome {
            winner,
            loser,
            winner_side,
            cause,
            winner_experience: self.config.winner_experience,
            loser_experience: self.config.loser_experience,
            resolved_at: now,
        };
        registry.add_experience(winner, outcome.winner_experience)?;
        registry.add_experience(loser, outcome.loser_experience)?;
        registry.release(winner, Engagement::Battle(id));
        registry.release(loser, Engagement::Battle(id));

        if let Some(mut battle) = self.battles.remove(&id) {
            battle.phase = BattlePhase::Resolved;
            battle.outcome = Some(outcome);
            self.archive.insert(id, battle);
        }

        info!(
            battle = %id,
            winner = %winner,
            loser = %loser,
            cause = ?cause,
            experience = outcome.winner_experience,
            "battle resolved"
        );
        Ok(outcome)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    fn active(&self, id: BattleId) -> EngineResult<&Battle> {
        self.battles.get(&id).ok_or(EngineError::battle_not_found(id))
    }

    fn active_mut(&mut self, id: BattleId) -> EngineResult<&mut Battle> {
        self.battles
            .get_mut(&id)
            .ok_or(EngineError::battle_not_found(id))
    }

    fn pending_proposal(&self, kitty: KittyId) -> Option<BattleId> {
        self.battles
            .values()
            .find(|battle| battle.phase == BattlePhase::Proposed && battle.involves(kitty))
            .map(Battle::id)
    }

    /// Looks up a live or archived battle.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id was never handed out.
    pub fn get(&self, id: BattleId) -> EngineResult<&Battle> {
        self.battles
            .get(&id)
            .or_else(|| self.archive.get(&id))
            .ok_or(EngineError::battle_not_found(id))
    }

    /// Battles not yet resolved, in id order.
    pub fn open_battles(&self) -> impl Iterator<Item = &Battle> {
        self.battles.values()
    }

    /// Resolved battles, in id order.
    pub fn archived_battles(&self) -> impl Iterator<Item = &Battle> {
        self.archive.values()
    }

    /// Active battles whose turn owner has idled for `turn_timeout_secs`.
    #[must_use]
    pub fn stalled_battles(&self, now: Timestamp) -> Vec<BattleId> {
        self.battles
            .values()
            .filter(|battle| battle.phase.is_active())
            .filter(|battle| {
                now.saturating_sub(battle.last_activity_at) >= self.config.turn_timeout_secs
            })
            .map(Battle::id)
            .collect()
    }

    /// Proposals nobody accepted within `turn_timeout_secs`.
    #[must_use]
    pub fn expired_proposals(&self, now: Timestamp) -> Vec<BattleId> {
        self.battles
            .values()
            .filter(|battle| battle.phase == BattlePhase::Proposed)
            .filter(|battle| {
                now.saturating_sub(battle.proposed_at) >= self.config.turn_timeout_secs
            })
            .map(Battle::id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kittyverse_core::FixedEntropy;
    use kittyverse_shared::{CombatStats, TraitVector};

    struct Arena {
        resolver: CombatResolver,
        registry: KittyRegistry,
        entropy: FixedEntropy,
        alice: Address,
        bob: Address,
        a: KittyId,
        b: KittyId,
    }

    impl Arena {
        fn new(a_stats: CombatStats, b_stats: CombatStats) -> Self {
            let alice = Address::with_last_byte(0xA1);
            let bob = Address::with_last_byte(0xB0);
            let traits = TraitVector::new(0, 0, 0, 0, 0, false).unwrap();
            let mut registry = KittyRegistry::default();
            let a = registry.create_genesis(alice, traits, a_stats, 0).unwrap();
            let b = registry.create_genesis(bob, traits, b_stats, 0).unwrap();
            Self {
                resolver: CombatResolver::default(),
                registry,
                entropy: FixedEntropy::new(77),
                alice,
                bob,
                a,
                b,
            }
        }

        fn accepted(a_stats: CombatStats, b_stats: CombatStats) -> (Self, BattleId) {
            let mut arena = Self::new(a_stats, b_stats);
            let id = arena
                .resolver
                .initiate(&arena.registry, arena.a, arena.b, arena.alice, 10)
                .unwrap();
            arena
                .resolver
                .accept(&mut arena.registry, id, arena.bob, 20)
                .unwrap();
            (arena, id)
        }

        fn act(&mut self, id: BattleId, caller: Address, action: BattleAction) -> EngineResult<ActionOutcome> {
            self.resolver
                .execute_action(&mut self.registry, &mut self.entropy, id, caller, action, 30)
        }
    }

    fn even() -> CombatStats {
        CombatStats::new(100, 100, 100)
    }

    #[test]
    fn test_proposal_locks_nothing() {
        let mut arena = Arena::new(even(), even());
        let id = arena
            .resolver
            .initiate(&arena.registry, arena.a, arena.b, arena.alice, 10)
            .unwrap();

        let battle = arena.resolver.get(id).unwrap();
        assert_eq!(battle.phase(), BattlePhase::Proposed);
        assert_eq!(battle.round(), 0);
        assert_eq!(arena.registry.engagement(arena.a), None);
        assert_eq!(arena.registry.engagement(arena.b), None);
    }

    #[test]
    fn test_second_proposal_for_same_kitty_is_busy() {
        let mut arena = Arena::new(even(), even());
        let traits = TraitVector::new(1, 1, 1, 1, 1, false).unwrap();
        let c = arena
            .registry
            .create_genesis(arena.alice, traits, even(), 0)
            .unwrap();
        let first = arena
            .resolver
            .initiate(&arena.registry, arena.a, arena.b, arena.alice, 10)
            .unwrap();

        // Same pair again, and the same defender from another attacker
        for (attacker, busy) in [(arena.a, arena.a), (c, arena.b)] {
            assert_eq!(
                arena
                    .resolver
                    .initiate(&arena.registry, attacker, arena.b, arena.alice, 11)
                    .unwrap_err(),
                EngineError::EntityBusy {
                    id: busy,
                    engagement: Engagement::Battle(first)
                }
            );
        }
        assert_eq!(arena.resolver.open_battles().count(), 1);
    }

    #[test]
    fn test_unanswered_proposal_expires_without_experience() {
        let mut arena = Arena::new(even(), even());
        let id = arena
            .resolver
            .initiate(&arena.registry, arena.a, arena.b, arena.alice, 10)
            .unwrap();

        assert!(arena.resolver.expire_proposals(10 + 3_599).is_empty());
        assert_eq!(arena.resolver.expired_proposals(10 + 3_600), vec![id]);
        assert_eq!(arena.resolver.expire_proposals(10 + 3_600), vec![id]);

        let battle = arena.resolver.get(id).unwrap();
        assert_eq!(battle.phase(), BattlePhase::Resolved);
        assert_eq!(battle.outcome(), None);
        assert_eq!(arena.resolver.open_battles().count(), 0);
        assert_eq!(arena.resolver.archived_battles().count(), 1);
        assert_eq!(arena.registry.get(arena.a).unwrap().experience(), 0);
        assert_eq!(arena.registry.get(arena.b).unwrap().experience(), 0);
        assert!(matches!(
            arena.resolver.accept(&mut arena.registry, id, arena.bob, 10 + 3_601),
            Err(EngineError::BattleNotActive {
                phase: BattlePhase::Resolved,
                ..
            })
        ));

        // Both kitties are free to be challenged again
        let again = arena
            .resolver
            .initiate(&arena.registry, arena.a, arena.b, arena.alice, 10 + 3_601)
            .unwrap();
        assert_ne!(again, id);
    }

    #[test]
    fn test_accepted_battles_never_expire_as_proposals() {
        let (mut arena, id) = Arena::accepted(even(), even());
        assert!(arena.resolver.expire_proposals(1_000_000).is_empty());
        assert_eq!(arena.resolver.get(id).unwrap().phase(), BattlePhase::Accepted);
    }

    #[test]
    fn test_self_battle_rejected() {
        let mut arena = Arena::new(even(), even());
        assert_eq!(
            arena
                .resolver
                .initiate(&arena.registry, arena.a, arena.a, arena.alice, 0)
                .unwrap_err(),
            EngineError::SelfBattleDisallowed(arena.a)
        );
    }

    #[test]
    fn test_initiate_requires_attacker_authorization() {
        let mut arena = Arena::new(even(), even());
        assert_eq!(
            arena
                .resolver
                .initiate(&arena.registry, arena.a, arena.b, arena.bob, 0)
                .unwrap_err(),
            EngineError::NotAuthorized {
                id: arena.a,
                caller: arena.bob
            }
        );
    }

    #[test]
    fn test_accept_initializes_health_and_locks() {
        let (arena, id) = Arena::accepted(CombatStats::new(150, 80, 80), CombatStats::new(50, 80, 80));
        let battle = arena.resolver.get(id).unwrap();

        assert_eq!(battle.phase(), BattlePhase::Accepted);
        assert_eq!(battle.attacker().health, 250);
        assert_eq!(battle.defender().health, 150);
        assert_eq!(battle.turn(), Side::Attacker);
        assert_eq!(battle.round(), 1);
        assert_eq!(arena.registry.engagement(arena.a), Some(Engagement::Battle(id)));
        assert_eq!(arena.registry.engagement(arena.b), Some(Engagement::Battle(id)));
    }

    #[test]
    fn test_accept_requires_defender() {
        let mut arena = Arena::new(even(), even());
        let id = arena
            .resolver
            .initiate(&arena.registry, arena.a, arena.b, arena.alice, 10)
            .unwrap();
        assert!(matches!(
            arena.resolver.accept(&mut arena.registry, id, arena.alice, 20),
            Err(EngineError::NotAuthorized { .. })
        ));
    }

    #[test]
    fn test_second_battle_for_engaged_kitty_is_busy() {
        let (mut arena, first) = Arena::accepted(even(), even());
        let traits = TraitVector::new(1, 1, 1, 1, 1, false).unwrap();
        let c = arena
            .registry
            .create_genesis(arena.alice, traits, even(), 0)
            .unwrap();

        assert_eq!(
            arena
                .resolver
                .initiate(&arena.registry, c, arena.b, arena.alice, 40)
                .unwrap_err(),
            EngineError::EntityBusy {
                id: arena.b,
                engagement: Engagement::Battle(first)
            }
        );
    }

    #[test]
    fn test_wrong_side_gets_invalid_turn_and_nothing_moves() {
        let (mut arena, id) = Arena::accepted(even(), even());
        let before = arena.resolver.get(id).unwrap().clone();

        assert_eq!(
            arena.act(id, arena.bob, BattleAction::Attack).unwrap_err(),
            EngineError::InvalidTurn {
                battle: id,
                expected: Side::Attacker
            }
        );
        assert_eq!(arena.resolver.get(id).unwrap(), &before);
    }

    #[test]
    fn test_stranger_is_not_authorized() {
        let (mut arena, id) = Arena::accepted(even(), even());
        let mallory = Address::with_last_byte(0xEE);
        assert!(matches!(
            arena.act(id, mallory, BattleAction::Attack),
            Err(EngineError::NotAuthorized { .. })
        ));
    }

    #[test]
    fn test_turns_alternate_and_rounds_advance() {
        let (mut arena, id) = Arena::accepted(even(), even());

        arena.act(id, arena.alice, BattleAction::Attack).unwrap();
        let battle = arena.resolver.get(id).unwrap();
        assert_eq!(battle.phase(), BattlePhase::InProgress);
        assert_eq!(battle.turn(), Side::Defender);
        assert_eq!(battle.round(), 1);

        arena.act(id, arena.bob, BattleAction::Defend).unwrap();
        let battle = arena.resolver.get(id).unwrap();
        assert_eq!(battle.turn(), Side::Attacker);
        assert_eq!(battle.round(), 2);
        assert!(battle.defender().defending);
        assert_eq!(battle.log().len(), 2);
    }

    #[test]
    fn test_battle_runs_to_knockout() {
        let (mut arena, id) = Arena::accepted(CombatStats::new(150, 80, 80), CombatStats::new(50, 80, 80));

        let mut resolution = None;
        for _ in 0..200 {
            let caller = match arena.resolver.get(id).unwrap().turn() {
                Side::Attacker => arena.alice,
                Side::Defender => arena.bob,
            };
            let outcome = arena.act(id, caller, BattleAction::Attack).unwrap();
            if outcome.resolution.is_some() {
                resolution = outcome.resolution;
                break;
            }
        }

        let outcome = resolution.expect("battle should end");
        let battle = arena.resolver.get(id).unwrap();
        assert_eq!(battle.phase(), BattlePhase::Resolved);
        assert_eq!(battle.combatant(outcome.winner_side.opponent()).health, 0);
        assert_eq!(outcome.cause, ResolutionCause::Knockout);
        assert_eq!(arena.registry.get(outcome.winner).unwrap().experience(), 100);
        assert_eq!(arena.registry.get(outcome.loser).unwrap().experience(), 25);
        assert_eq!(arena.registry.engagement(arena.a), None);
        assert_eq!(arena.registry.engagement(arena.b), None);

        assert!(matches!(
            arena.act(id, arena.alice, BattleAction::Attack),
            Err(EngineError::BattleNotActive {
                phase: BattlePhase::Resolved,
                ..
            })
        ));
    }

    #[test]
    fn test_force_resolve_favors_last_actor() {
        let (mut arena, id) = Arena::accepted(even(), even());
        arena.act(id, arena.alice, BattleAction::Attack).unwrap();

        let outcome = arena
            .resolver
            .force_resolve(&mut arena.registry, id, 5_000)
            .unwrap();
        assert_eq!(outcome.winner, arena.a);
        assert_eq!(outcome.cause, ResolutionCause::Forfeit);
        assert_eq!(arena.registry.engagement(arena.b), None);
    }

    #[test]
    fn test_force_resolve_after_accept_favors_defender() {
        let (mut arena, id) = Arena::accepted(even(), even());
        let outcome = arena
            .resolver
            .force_resolve(&mut arena.registry, id, 5_000)
            .unwrap();
        assert_eq!(outcome.winner, arena.b);
    }

    #[test]
    fn test_force_resolve_rejects_proposed() {
        let mut arena = Arena::new(even(), even());
        let id = arena
            .resolver
            .initiate(&arena.registry, arena.a, arena.b, arena.alice, 0)
            .unwrap();
        assert_eq!(
            arena
                .resolver
                .force_resolve(&mut arena.registry, id, 5_000)
                .unwrap_err(),
            EngineError::BattleNotActive {
                battle: id,
                phase: BattlePhase::Proposed
            }
        );
    }

    #[test]
    fn test_stalled_battles_respect_timeout() {
        let (arena, id) = Arena::accepted(even(), even());
        // accepted at 20
        assert!(arena.resolver.stalled_battles(20 + 3_599).is_empty());
        assert_eq!(arena.resolver.stalled_battles(20 + 3_600), vec![id]);
    }

    #[test]
    fn test_unknown_battle() {
        let arena = Arena::new(even(), even());
        assert_eq!(
            arena.resolver.get(BattleId::new(9)).unwrap_err(),
            EngineError::battle_not_found(BattleId::new(9))
        );
    }
}
