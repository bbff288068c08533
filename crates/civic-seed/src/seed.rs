//! Seed derivation
//!
//! A [`Seed`] is a finite, non-negative `f64` derived from a coordinate and
//! optionally folded with the character codes of an auxiliary key. Every
//! pseudo-random choice a synthesizer makes is a modulo of some seed, so
//! the same inputs always produce the same choices.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// Scale applied to `sin(lat * lng)` before taking the absolute value
pub const BASE_SCALE: f64 = 10_000.0;

/// Deterministic generation seed
///
/// Invariant: the wrapped value is finite and `>= 0`. Constructors fold
/// negatives to their magnitude and replace NaN or infinity with zero, so
/// `seed % n` is always a valid index for `n > 0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Seed(f64);

impl Seed {
    /// The degenerate seed produced when `lat == 0` or `lng == 0`
    pub const ZERO: Self = Self(0.0);

    /// Create a seed from a raw value, normalising it onto `[0, inf)`
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.abs())
        } else {
            Self::ZERO
        }
    }

    /// Base seed for a coordinate: `abs(sin(lat * lng) * 10000)`
    #[inline]
    #[must_use]
    pub fn from_coordinate(coord: Coordinate) -> Self {
        Self::new(coord.product().sin() * BASE_SCALE)
    }

    /// Raw value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Integer part, used when seeds are embedded in record ids
    #[inline]
    #[must_use]
    pub fn truncated(self) -> u64 {
        self.0.trunc() as u64
    }

    /// Add a constant amount (e.g. a char-code sum)
    #[inline]
    #[must_use]
    pub fn add(self, amount: f64) -> Self {
        Self::new(self.0 + amount)
    }

    /// Multiply by a constant factor (e.g. `seed * 2`)
    #[inline]
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.0 * factor)
    }

    /// Per-record seed: `seed + index * stride`
    ///
    /// Each field that needs its own value uses a distinct stride so that
    /// correlated fields do not collapse onto the same choice.
    #[inline]
    #[must_use]
    pub fn offset(self, index: usize, stride: f64) -> Self {
        Self::new(self.0 + index as f64 * stride)
    }

    /// `floor(seed % n)`; zero when `n == 0`
    #[inline]
    #[must_use]
    pub fn modulo(self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        let rem = (self.0 % n as f64).floor() as u64;
        rem.min(n - 1)
    }

    /// Index into a collection of `len` items
    #[inline]
    #[must_use]
    pub fn index(self, len: usize) -> usize {
        self.modulo(len as u64) as usize
    }

    /// `lower + floor(seed % span)`, a value in `[lower, lower + span)`
    #[inline]
    #[must_use]
    pub fn in_range(self, lower: u32, span: u32) -> u32 {
        lower + self.modulo(u64::from(span)) as u32
    }

    /// `floor((seed % modulus) / (modulus / buckets))`, clamped to `buckets - 1`
    ///
    /// Splits the residue range into equal-width buckets. Returns zero when
    /// `buckets == 0` or `modulus` is not positive.
    #[inline]
    #[must_use]
    pub fn bucket(self, modulus: f64, buckets: usize) -> usize {
        if buckets == 0 || modulus <= 0.0 {
            return 0;
        }
        let width = modulus / buckets as f64;
        let idx = ((self.0 % modulus) / width).floor() as usize;
        idx.min(buckets - 1)
    }

    /// Select an item by `seed % items.len()`
    ///
    /// # Panics
    /// Panics if `items` is empty. Callers only pass non-empty static tables.
    #[inline]
    #[must_use]
    pub fn pick<T>(self, items: &[T]) -> &T {
        &items[self.index(items.len())]
    }
}

impl From<f64> for Seed {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Seed> for f64 {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

/// Derive the seed for a coordinate, optionally folded with a string key
///
/// The key's character codes are summed and added to the base seed, so
/// different area names or record keys at the same location yield
/// distinguishable seeds.
#[must_use]
pub fn derive_seed(coord: Coordinate, extra: Option<&str>) -> Seed {
    let base = Seed::from_coordinate(coord);
    match extra {
        Some(key) => base.add(char_code_sum(key)),
        None => base,
    }
}

/// Sum of the UTF-16 code units of `s`
#[inline]
#[must_use]
pub fn char_code_sum(s: &str) -> f64 {
    s.encode_utf16().map(f64::from).sum()
}

/// UTF-16 code unit of the first character, or zero for an empty string
#[inline]
#[must_use]
pub fn first_char_code(s: &str) -> f64 {
    s.encode_utf16().next().map_or(0.0, f64::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_seed_formula() {
        let c = Coordinate::new(1.0, 2.0);
        let expected = (2.0f64).sin().abs() * 10_000.0;
        assert_eq!(Seed::from_coordinate(c).value(), expected);
    }

    #[test]
    fn zero_coordinate_is_degenerate_but_valid() {
        assert_eq!(Seed::from_coordinate(Coordinate::new(0.0, 55.0)), Seed::ZERO);
        assert_eq!(Seed::ZERO.modulo(7), 0);
        assert_eq!(Seed::ZERO.in_range(30, 70), 30);
    }

    #[test]
    fn non_finite_collapses_to_zero() {
        assert_eq!(Seed::new(f64::NAN), Seed::ZERO);
        assert_eq!(Seed::new(f64::INFINITY), Seed::ZERO);
        let huge = Coordinate::new(f64::MAX, f64::MAX);
        assert_eq!(Seed::from_coordinate(huge), Seed::ZERO);
    }

    #[test]
    fn negative_folds_to_magnitude() {
        assert_eq!(Seed::new(-17.0).value(), 17.0);
    }

    #[test]
    fn extra_key_changes_seed() {
        let c = Coordinate::DEFAULT;
        let a = derive_seed(c, Some("Downtown"));
        let b = derive_seed(c, Some("Riverside"));
        assert_ne!(a, b);
        assert_eq!(derive_seed(c, None), Seed::from_coordinate(c));
        let diff = a.value() - derive_seed(c, None).value();
        assert!((diff - char_code_sum("Downtown")).abs() < 1e-9);
    }

    #[test]
    fn char_codes() {
        assert_eq!(char_code_sum("AB"), 131.0);
        assert_eq!(first_char_code("Downtown"), 68.0);
        assert_eq!(first_char_code(""), 0.0);
    }

    #[test]
    fn modulo_and_range() {
        let s = Seed::new(123.9);
        assert_eq!(s.modulo(10), 3);
        assert_eq!(s.in_range(5, 100), 28);
        assert_eq!(s.modulo(0), 0);
    }

    #[test]
    fn bucket_splits_residue() {
        assert_eq!(Seed::new(56.0).bucket(100.0, 4), 2);
        assert_eq!(Seed::new(99.999).bucket(100.0, 4), 3);
        assert_eq!(Seed::new(999.0).bucket(1000.0, 7), 6);
        assert_eq!(Seed::new(5.0).bucket(100.0, 0), 0);
    }

    #[test]
    fn offset_strides() {
        let s = Seed::new(10.0);
        assert_eq!(s.offset(0, 123.0), s);
        assert_eq!(s.offset(2, 123.0).value(), 256.0);
    }

    #[test]
    fn scale_multiplies() {
        assert_eq!(Seed::new(7.5).scale(2.0).value(), 15.0);
    }

    #[test]
    fn pick_wraps() {
        let items = ["a", "b", "c"];
        assert_eq!(*Seed::new(4.0).pick(&items), "b");
    }

    #[test]
    fn truncated_drops_fraction() {
        assert_eq!(Seed::new(8734.99).truncated(), 8734);
    }

    #[test]
    fn serde_normalises() {
        let s: Seed = serde_json::from_str("-3.5").unwrap();
        assert_eq!(s.value(), 3.5);
        assert_eq!(serde_json::to_string(&s).unwrap(), "3.5");
    }
}
