//! Synthesizer trait and core types
//!
//! Provides the [`Synthesizer`] trait implemented once per domain, the
//! [`GenerationContext`] every call receives, and [`CountRange`], the
//! closed interval that bounds how many records a domain may emit.

use chrono::{DateTime, Utc};
use civic_seed::{Coordinate, Seed};

/// Closed interval `[min, max]` of record counts for a domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountRange {
    /// Smallest count ever produced (never zero)
    pub min: usize,
    /// Largest count ever produced
    pub max: usize,
}

impl CountRange {
    /// Create a new range
    ///
    /// # Panics
    /// Panics if `min` is zero or greater than `max`. In a `const` item
    /// this is a compile-time error.
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        assert!(min > 0 && min <= max, "count range must be non-empty and non-zero");
        Self { min, max }
    }

    /// Number of distinct counts in the range
    #[inline]
    #[must_use]
    pub const fn span(&self) -> usize {
        self.max - self.min + 1
    }

    /// `min + floor(seed % span)`
    #[inline]
    #[must_use]
    pub fn from_seed(&self, seed: Seed) -> usize {
        self.min + seed.index(self.span())
    }

    /// Clamp a caller-supplied hint into the range
    #[inline]
    #[must_use]
    pub fn clamp(&self, hint: usize) -> usize {
        hint.clamp(self.min, self.max)
    }

    /// Count to generate: the clamped hint if any, otherwise seed-derived
    #[inline]
    #[must_use]
    pub fn resolve(&self, seed: Seed, hint: Option<usize>) -> usize {
        hint.map_or_else(|| self.from_seed(seed), |h| self.clamp(h))
    }

    /// Check whether `count` lies in the range
    #[inline]
    #[must_use]
    pub const fn contains(&self, count: usize) -> bool {
        count >= self.min && count <= self.max
    }
}

/// Inputs of one generation call
///
/// Immutable once built. `as_of` anchors every date so that repeated calls
/// with the same context produce identical output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationContext {
    /// Location the dataset is generated for
    pub coordinate: Coordinate,
    /// Base seed, normally `Seed::from_coordinate(coordinate)`
    pub seed: Seed,
    /// Reference instant for relative dates
    pub as_of: DateTime<Utc>,
    /// Requested record count, clamped per domain
    pub count_hint: Option<usize>,
}

impl GenerationContext {
    /// Create a context with the coordinate's base seed
    #[inline]
    #[must_use]
    pub fn new(coordinate: Coordinate, as_of: DateTime<Utc>) -> Self {
        Self {
            coordinate,
            seed: Seed::from_coordinate(coordinate),
            as_of,
            count_hint: None,
        }
    }

    /// With an explicit seed
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    /// With a count hint
    #[inline]
    #[must_use]
    pub fn with_count_hint(mut self, hint: Option<usize>) -> Self {
        self.count_hint = hint;
        self
    }
}

/// Deterministic record synthesizer for one domain
///
/// # Contract
/// - `synthesize` is pure: equal contexts yield equal outputs
/// - the output length lies within [`Synthesizer::COUNT`]
/// - it never panics for any context
pub trait Synthesizer {
    /// Record type produced
    type Record;

    /// Domain name (for logs and audit reports)
    const DOMAIN: &'static str;

    /// Allowed record counts
    const COUNT: CountRange;

    /// Generate the dataset for `ctx`
    fn synthesize(&self, ctx: &GenerationContext) -> Vec<Self::Record>;

    /// Number of records `synthesize` will emit for `ctx`
    #[inline]
    fn count(&self, ctx: &GenerationContext) -> usize {
        Self::COUNT.resolve(ctx.seed, ctx.count_hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONES: CountRange = CountRange::new(3, 6);

    #[test]
    fn from_seed_covers_span() {
        assert_eq!(ZONES.span(), 4);
        assert_eq!(ZONES.from_seed(Seed::new(0.0)), 3);
        assert_eq!(ZONES.from_seed(Seed::new(3.7)), 6);
        assert_eq!(ZONES.from_seed(Seed::new(5.0)), 4);
    }

    #[test]
    fn hint_is_clamped() {
        assert_eq!(ZONES.resolve(Seed::ZERO, Some(0)), 3);
        assert_eq!(ZONES.resolve(Seed::ZERO, Some(100)), 6);
        assert_eq!(ZONES.resolve(Seed::ZERO, Some(5)), 5);
        assert_eq!(ZONES.resolve(Seed::new(1.0), None), 4);
    }

    #[test]
    fn contains_is_inclusive() {
        assert!(ZONES.contains(3));
        assert!(ZONES.contains(6));
        assert!(!ZONES.contains(7));
        assert!(!ZONES.contains(2));
    }

    #[test]
    #[should_panic(expected = "count range must be non-empty")]
    fn zero_min_rejected() {
        let _ = CountRange::new(0, 4);
    }

    #[test]
    fn context_uses_coordinate_seed() {
        let as_of = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        let ctx = GenerationContext::new(Coordinate::DEFAULT, as_of);
        assert_eq!(ctx.seed, Seed::from_coordinate(Coordinate::DEFAULT));
        assert_eq!(ctx.count_hint, None);
        let ctx = ctx.with_seed(Seed::new(4.0)).with_count_hint(Some(2));
        assert_eq!(ctx.seed.value(), 4.0);
        assert_eq!(ctx.count_hint, Some(2));
    }
}
