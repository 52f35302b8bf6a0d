//! Tests for deterministic random number generation
//!
//! The whole machine leans on one property: same seed → same fall pattern.
//! These tests pin the generator's determinism, the coin-flip and Gaussian
//! derivations, and state round-trips used by checkpointing.

use bean_machine_core_rs::RngManager;

#[test]
fn test_same_seed_same_sequence() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(12345);

    for _ in 0..1000 {
        assert_eq!(rng1.next(), rng2.next());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut rng1 = RngManager::new(1);
    let mut rng2 = RngManager::new(2);

    let seq1: Vec<u64> = (0..10).map(|_| rng1.next()).collect();
    let seq2: Vec<u64> = (0..10).map(|_| rng2.next()).collect();
    assert_ne!(seq1, seq2);
}

#[test]
fn test_coin_flip_produces_both_outcomes() {
    // First flip across small seeds covers both directions; a generator
    // stuck on one side would skew every luck-mode experiment
    let first_flips: Vec<bool> = (1..=20).map(|seed| RngManager::new(seed).coin_flip()).collect();

    assert!(first_flips.iter().any(|&flip| flip), "no seed flipped right");
    assert!(first_flips.iter().any(|&flip| !flip), "no seed flipped left");
}

#[test]
fn test_gaussian_sample_statistics() {
    let mut rng = RngManager::new(12345);
    let samples: Vec<f64> = (0..10_000).map(|_| rng.next_gaussian()).collect();

    let mean: f64 = samples.iter().sum::<f64>() / samples.len() as f64;
    let variance: f64 =
        samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;
    let stdev = variance.sqrt();

    assert!(mean.abs() < 0.05, "mean {} too far from 0", mean);
    assert!(
        (0.9..1.1).contains(&stdev),
        "stdev {} too far from 1",
        stdev
    );
}

#[test]
fn test_state_restore_continues_sequence() {
    let mut rng = RngManager::new(777);
    for _ in 0..50 {
        rng.next();
    }

    let mut resumed = RngManager::new(rng.get_state());
    for _ in 0..50 {
        assert_eq!(rng.next(), resumed.next());
    }
}

#[test]
fn test_serde_round_trip_preserves_sequence() {
    let mut rng = RngManager::new(424242);
    for _ in 0..17 {
        rng.next();
    }

    let json = serde_json::to_string(&rng).unwrap();
    let mut decoded: RngManager = serde_json::from_str(&json).unwrap();

    for _ in 0..100 {
        assert_eq!(rng.next(), decoded.next());
    }
}
