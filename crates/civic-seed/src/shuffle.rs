//! Seeded Fisher–Yates shuffle
//!
//! Replaces comparator-based random shuffles so that a reordering is a
//! pure function of the slice and the seed.

use crate::seed::Seed;

/// Stride mixed into the seed for each swap position
pub const SHUFFLE_STRIDE: f64 = 7919.0;

/// Shuffle `items` in place, driven entirely by `seed`
///
/// Walks positions from the back; the swap partner for position `i` is
/// `floor((seed + i * SHUFFLE_STRIDE) % (i + 1))`.
pub fn shuffle_seeded<T>(items: &mut [T], seed: Seed) {
    for i in (1..items.len()).rev() {
        let j = seed.offset(i, SHUFFLE_STRIDE).index(i + 1);
        items.swap(i, j);
    }
}

/// Return a shuffled copy of `items`, leaving the input untouched
#[must_use]
pub fn shuffled<T: Clone>(items: &[T], seed: Seed) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle_seeded(&mut out, seed);
    out
}
