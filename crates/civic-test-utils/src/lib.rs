//! Testing utilities for the civic data workspace
//!
//! Shared fixtures, coordinate samplers and invariant assertions.

#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use civic_seed::Coordinate;
use civic_synth::audit::check_snapshot;
use civic_synth::{CivicDataGenerator, CivicSnapshot, GeneratorConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 2024-06-01T12:00:00Z
pub const FIXED_AS_OF_SECS: i64 = 1_717_243_200;

/// Coordinates every sweep should include
pub const EDGE_COORDINATES: &[(f64, f64)] = &[
    (0.0, 0.0),
    (0.0, -122.4194),
    (37.7749, 0.0),
    (90.0, 180.0),
    (-90.0, -180.0),
    (-90.0, 180.0),
    (1e-300, 1e-300),
    (1e12, -1e12),
    (-1e15, 3.5),
    (f64::MAX, f64::MIN),
    (f64::MIN_POSITIVE, -f64::MIN_POSITIVE),
];

pub fn fixed_as_of() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_AS_OF_SECS, 0).unwrap()
}

pub fn test_config() -> GeneratorConfig {
    GeneratorConfig::new().with_as_of(fixed_as_of())
}

pub fn test_generator() -> CivicDataGenerator {
    CivicDataGenerator::new(test_config())
}

pub fn san_francisco() -> Coordinate {
    Coordinate::DEFAULT
}

/// `n` finite coordinates from a seeded RNG, edge coordinates first
///
/// Mixes plausible geographic values with a smaller share of very large
/// magnitudes.
pub fn sample_coordinates(n: usize, seed: u64) -> Vec<Coordinate> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut coords: Vec<Coordinate> = EDGE_COORDINATES
        .iter()
        .take(n)
        .map(|(lat, lng)| Coordinate::new(*lat, *lng))
        .collect();

    while coords.len() < n {
        let coord = if rng.gen_bool(0.9) {
            Coordinate::new(rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0))
        } else {
            Coordinate::new(rng.gen_range(-1e9..1e9), rng.gen_range(-1e9..1e9))
        };
        coords.push(coord);
    }
    coords
}

/// Panic with every violation if `snapshot` breaks an invariant
pub fn assert_snapshot_valid(snapshot: &CivicSnapshot) {
    let violations = check_snapshot(snapshot);
    assert!(
        violations.is_empty(),
        "invariants violated at {}:\n{}",
        snapshot.coordinate,
        violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Panic if two generations at `coord` differ
pub fn assert_deterministic(generator: &CivicDataGenerator, coord: Coordinate) {
    let first = generator.snapshot(coord);
    let second = generator.snapshot(coord);
    assert_eq!(first, second, "generation at {coord} is not repeatable");
}
