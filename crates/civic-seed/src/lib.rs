//! Civic Seed
//!
//! Deterministic seeds derived from geographic coordinates.
//!
//! # Core Concepts
//!
//! - [`Coordinate`]: immutable `(lat, lng)` input
//! - [`Seed`]: finite, non-negative value driving every pseudo-random choice
//! - [`derive_seed`]: `abs(sin(lat * lng) * 10000)`, optionally folded with a key
//! - [`shuffle_seeded`]: Fisher–Yates permutation driven by a seed
//!
//! # Example
//!
//! ```rust
//! use civic_seed::{derive_seed, shuffled, Coordinate};
//!
//! let seed = derive_seed(Coordinate::DEFAULT, None);
//! let zones = shuffled(&["Downtown", "Harbor", "Transit Hub"], seed);
//! assert_eq!(zones, shuffled(&["Downtown", "Harbor", "Transit Hub"], seed));
//! ```

#![warn(unreachable_pub)]

mod coordinate;
mod seed;
mod shuffle;

pub use coordinate::{Coordinate, SeedError};
pub use seed::{char_code_sum, derive_seed, first_char_code, Seed, BASE_SCALE};
pub use shuffle::{shuffle_seeded, shuffled, SHUFFLE_STRIDE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
