//! # Arena Demo
//!
//! Mints three genesis kitties, breeds a child from two of them, then
//! fights it against the third until one side is knocked out.
//!
//! Run with: `RUST_LOG=info cargo run --bin arena_demo [config.toml]`

use std::sync::Arc;

use kittyverse::core::{EngineResult, FixedEntropy, ManualClock, TokenLedger};
use kittyverse::shared::{tokens, Address, BattleAction, KittyEvent, Side};
use kittyverse::{EngineConfig, KittyEngine};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DAY: u64 = 86_400;

fn main() -> EngineResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    let clock = ManualClock::new(1_700_000_000);
    let engine = KittyEngine::new(
        config,
        TokenLedger::new(),
        FixedEntropy::new(0x4B17_7E55),
        Arc::new(clock.clone()),
    )?;
    let events = engine.subscribe();

    let alice = Address::with_last_byte(0xA1);
    let bob = Address::with_last_byte(0xB0);
    engine.ledger().mint(alice, tokens(100));
    engine.ledger().approve(alice, tokens(100));

    // Genesis
    let matron = engine.create_genesis(alice)?;
    let sire = engine.create_genesis(alice)?;
    let rival = engine.create_genesis(bob)?;

    // Breeding
    clock.advance(DAY);
    let child = engine.breed(matron, sire, alice)?;
    let record = engine.get(child)?;
    info!(
        kitty = %child,
        generation = record.generation(),
        strength = record.stats().strength,
        agility = record.stats().agility,
        intelligence = record.stats().intelligence,
        rarity = %engine.derive_rarity(child)?,
        "child ready"
    );

    // Combat
    let battle = engine.initiate_battle(child, rival, alice)?;
    engine.accept_battle(battle, bob)?;

    let rotation = [BattleAction::Attack, BattleAction::Special, BattleAction::Defend];
    let mut turn = 0usize;
    let outcome = loop {
        clock.advance(30);
        let caller = match engine.battle(battle)?.turn() {
            Side::Attacker => alice,
            Side::Defender => bob,
        };
        let step = engine.execute_battle_action(battle, caller, rotation[turn % rotation.len()])?;
        turn += 1;
        if let Some(outcome) = step.resolution {
            break outcome;
        }
    };

    info!(
        winner = %outcome.winner,
        loser = %outcome.loser,
        turns = turn,
        "arena closed"
    );

    for event in events.drain() {
        if let KittyEvent::BattleResolved { .. } | KittyEvent::Bred { .. } = event {
            info!(?event, "event");
        }
    }
    Ok(())
}
