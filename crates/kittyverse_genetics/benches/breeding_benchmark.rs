//! Benchmark for breeding throughput.
//!
//! Run with: cargo bench --package kittyverse_genetics --bench breeding_benchmark

use alloy_primitives::Address;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kittyverse_core::{FixedEntropy, KittyRegistry, TokenLedger};
use kittyverse_genetics::{derive_rarity, derive_stats, inherit_traits, BreedRequest, GeneticsConfig, GeneticsEngine};
use kittyverse_shared::{tokens, TraitVector};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DAY: u64 = 86_400;

fn benchmark_inheritance(c: &mut Criterion) {
    let config = GeneticsConfig::default();
    let matron = TraitVector::new(1, 2, 3, 0, 1, false).unwrap();
    let sire = TraitVector::new(6, 4, 0, 3, 2, true).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("inherit_traits", |b| {
        b.iter(|| black_box(inherit_traits(&matron, &sire, &config, &mut rng).unwrap()));
    });
}

fn benchmark_stats_and_rarity(c: &mut Criterion) {
    let traits = TraitVector::new(5, 3, 2, 1, 0, true).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    c.bench_function("derive_stats_and_rarity", |b| {
        b.iter(|| {
            let stats = derive_stats(&traits, &mut rng);
            black_box(derive_rarity(&stats))
        });
    });
}

fn benchmark_full_breed(c: &mut Criterion) {
    let owner = Address::with_last_byte(1);
    let engine = GeneticsEngine::default();

    c.bench_function("breed_100_pairs", |b| {
        b.iter(|| {
            let mut registry = KittyRegistry::default();
            let mut entropy = FixedEntropy::new(9);
            let mut ledger = TokenLedger::new();
            ledger.mint(owner, tokens(10_000));
            ledger.approve(owner, tokens(10_000));

            let parents: Vec<_> = (0..200)
                .map(|_| engine.mint_genesis(&mut registry, &mut entropy, owner, 0).unwrap())
                .collect();
            for pair in parents.chunks_exact(2) {
                let request = BreedRequest {
                    matron: pair[0],
                    sire: pair[1],
                    requester: owner,
                    now: DAY,
                };
                black_box(engine.breed(&mut registry, &mut ledger, &mut entropy, request).unwrap());
            }
        });
    });
}

criterion_group!(
    benches,
    benchmark_inheritance,
    benchmark_stats_and_rarity,
    benchmark_full_breed
);
criterion_main!(benches);
