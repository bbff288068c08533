//! Generator facade
//!
//! [`CivicDataGenerator`] bundles the domain synthesizers behind one
//! configured entry point. The reference instant is fixed when the
//! generator is built, so every call on the same generator with the same
//! coordinate returns identical data.

use chrono::{DateTime, Utc};
use civic_seed::Coordinate;
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::engagement::EngagementSynthesizer;
use crate::fallback::{issues_or_fallback, IssueSource};
use crate::initiatives::InitiativeSynthesizer;
use crate::issues::IssueSynthesizer;
use crate::stats::{community_stats, CommunityStats};
use crate::synthesizer::{GenerationContext, Synthesizer};
use crate::types::{CivicIssue, EngagementArea, ImprovementZone, Initiative};
use crate::zones::ZoneSynthesizer;

/// Every dataset for one coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CivicSnapshot {
    pub coordinate: Coordinate,
    pub as_of: DateTime<Utc>,
    pub issues: Vec<CivicIssue>,
    pub engagement: Vec<EngagementArea>,
    pub zones: Vec<ImprovementZone>,
    pub initiatives: Vec<Initiative>,
    pub stats: CommunityStats,
}

/// Configured entry point for all synthesizers
#[derive(Debug, Clone)]
pub struct CivicDataGenerator {
    config: GeneratorConfig,
    as_of: DateTime<Utc>,
}

impl CivicDataGenerator {
    /// Create a generator, fixing the reference instant
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        let as_of = config.as_of_or_now();
        Self { config, as_of }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Reference instant for all generated dates
    #[inline]
    #[must_use]
    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    /// Base context for `coordinate`
    #[inline]
    #[must_use]
    pub fn context(&self, coordinate: Coordinate) -> GenerationContext {
        GenerationContext::new(coordinate, self.as_of)
    }

    /// Civic issues near `coordinate`
    #[must_use]
    pub fn issues(&self, coordinate: Coordinate) -> Vec<CivicIssue> {
        IssueSynthesizer.synthesize(&self.issue_context(coordinate))
    }

    /// Issues from `source`, synthesized when the source fails or is empty
    pub fn issues_from<S>(&self, source: &S, coordinate: Coordinate) -> Vec<CivicIssue>
    where
        S: IssueSource + ?Sized,
    {
        issues_or_fallback(source, &self.issue_context(coordinate))
    }

    /// Engagement heatmap areas for `coordinate`
    #[must_use]
    pub fn engagement(&self, coordinate: Coordinate) -> Vec<EngagementArea> {
        let ctx = self.context(coordinate).with_count_hint(self.config.counts.engagement);
        EngagementSynthesizer.synthesize(&ctx)
    }

    /// Improvement zones for `coordinate`
    #[must_use]
    pub fn zones(&self, coordinate: Coordinate) -> Vec<ImprovementZone> {
        let ctx = self.context(coordinate).with_count_hint(self.config.counts.zones);
        ZoneSynthesizer.synthesize(&ctx)
    }

    /// Community initiatives for `coordinate`
    #[must_use]
    pub fn initiatives(&self, coordinate: Coordinate) -> Vec<Initiative> {
        let ctx = self.context(coordinate).with_count_hint(self.config.counts.initiatives);
        InitiativeSynthesizer.synthesize(&ctx)
    }

    /// Community statistics for `coordinate`
    #[must_use]
    pub fn stats(&self, coordinate: Coordinate) -> CommunityStats {
        community_stats(&self.context(coordinate))
    }

    /// Every dataset for `coordinate`
    #[must_use]
    pub fn snapshot(&self, coordinate: Coordinate) -> CivicSnapshot {
        CivicSnapshot {
            coordinate,
            as_of: self.as_of,
            issues: self.issues(coordinate),
            engagement: self.engagement(coordinate),
            zones: self.zones(coordinate),
            initiatives: self.initiatives(coordinate),
            stats: self.stats(coordinate),
        }
    }

    /// Snapshot for the configured default coordinate
    #[must_use]
    pub fn default_snapshot(&self) -> CivicSnapshot {
        self.snapshot(self.config.default_coordinate)
    }

    fn issue_context(&self, coordinate: Coordinate) -> GenerationContext {
        self.context(coordinate).with_count_hint(self.config.counts.issues)
    }
}

impl Default for CivicDataGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}
