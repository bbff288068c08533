//! Civic Synth
//!
//! Deterministic, location-seeded civic datasets: reported issues,
//! engagement heatmaps, improvement zones, community initiatives and
//! community statistics.
//!
//! # Core Concepts
//!
//! - [`Synthesizer`]: one implementation per domain, pure over a [`GenerationContext`]
//! - [`GenerationContext`]: coordinate, base seed, reference instant and count hint
//! - [`CountRange`]: closed interval bounding each domain's record count
//! - [`CivicDataGenerator`]: configured facade producing a [`CivicSnapshot`]
//! - [`issues_or_fallback`]: live issue feed with synthesized fallback
//! - [`audit`]: invariant checks over generated snapshots
//!
//! # Example
//!
//! ```rust
//! use chrono::{DateTime, Utc};
//! use civic_synth::prelude::*;
//!
//! let as_of = DateTime::<Utc>::from_timestamp(1_717_243_200, 0).unwrap();
//! let generator = CivicDataGenerator::new(GeneratorConfig::new().with_as_of(as_of));
//!
//! let zones = generator.zones(Coordinate::DEFAULT);
//! assert!((3..=6).contains(&zones.len()));
//! assert_eq!(zones, generator.zones(Coordinate::DEFAULT));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod config;
mod engagement;
mod error;
mod fallback;
mod generator;
mod initiatives;
mod insights;
mod issues;
mod stats;
mod synthesizer;
mod types;
mod zones;

/// Category and template tables
pub mod tables;

/// Grouping, filtering and tab helpers
pub mod presentation;

/// Invariant audit
pub mod audit;

// Re-exports
pub use config::{CountHints, GeneratorConfig};
pub use engagement::EngagementSynthesizer;
pub use error::{ConfigError, SourceError, SynthError};
pub use fallback::{fetch_with_provenance, issues_or_fallback, IssueSource, OfflineSource, Provenance};
pub use generator::{CivicDataGenerator, CivicSnapshot};
pub use initiatives::InitiativeSynthesizer;
pub use insights::initiative_insights;
pub use issues::{IssueSynthesizer, ISSUE_STRIDE};
pub use stats::{
    community_stats, ActivityCount, CommunityStats, Contributor, ImpactMetrics, PricePoint,
    TaskBreakdown, TokenPrice, PRICE_HISTORY_MONTHS, TOP_ACTIVITIES,
};
pub use synthesizer::{CountRange, GenerationContext, Synthesizer};
pub use tables::{CategoryTable, InitiativeCategory, IssueCategory, ZoneCategory};
pub use types::{
    CivicIssue, EngagementArea, EngagementLevel, ImprovementZone, Initiative, InitiativeStatus,
    IssueStatus, Priority,
};
pub use zones::ZoneSynthesizer;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        CivicDataGenerator, CivicIssue, CivicSnapshot, CountRange, EngagementArea,
        EngagementSynthesizer, GenerationContext, GeneratorConfig, ImprovementZone, Initiative,
        InitiativeSynthesizer, IssueSynthesizer, Synthesizer, ZoneSynthesizer,
    };
    pub use civic_seed::{Coordinate, Seed};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
