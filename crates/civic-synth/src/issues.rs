//! Civic issue synthesizer
//!
//! Scatters five to eight reported issues within roughly a kilometre of
//! the coordinate. Every field of issue `i` is drawn from the single seed
//! `base + i * 123456`, split into equal-width buckets per field.

use chrono::Duration;
use civic_seed::Seed;

use crate::synthesizer::{CountRange, GenerationContext, Synthesizer};
use crate::tables::{IssueCategory, ISSUE_CREATORS, STREETS};
use crate::types::{CivicIssue, IssueStatus};

/// Per-issue seed stride
pub const ISSUE_STRIDE: f64 = 123_456.0;

/// Synthesizer for [`CivicIssue`] records
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueSynthesizer;

impl Synthesizer for IssueSynthesizer {
    type Record = CivicIssue;

    const DOMAIN: &'static str = "issues";
    const COUNT: CountRange = CountRange::new(5, 8);

    fn synthesize(&self, ctx: &GenerationContext) -> Vec<CivicIssue> {
        let count = self.count(ctx);
        tracing::debug!(domain = Self::DOMAIN, count, seed = ctx.seed.value(), "synthesizing");

        (0..count)
            .map(|i| synthesize_issue(ctx, i, ctx.seed.offset(i, ISSUE_STRIDE)))
            .collect()
    }
}

fn synthesize_issue(ctx: &GenerationContext, i: usize, s: Seed) -> CivicIssue {
    let raw = s.value();
    let lat_offset = (raw % 200.0 - 100.0) / 10_000.0;
    let lng_offset = (raw % 300.0 - 150.0) / 10_000.0;

    let category = IssueCategory::ALL[s.bucket(100.0, IssueCategory::ALL.len())];
    let issue_type = category.issue_types().pick_bucket(s, 1000.0);
    let street = STREETS.pick_bucket(s, 1000.0);
    let street_number = 100 + s.modulo(900);

    let days_ago = s.modulo(300) / 10;
    let created_at = ctx
        .as_of
        .checked_sub_signed(Duration::days(days_ago as i64))
        .unwrap_or(ctx.as_of);

    CivicIssue {
        id: format!("issue-{}-{}", i + 1, s.modulo(10_000)),
        title: format!("{issue_type} on {street}"),
        description: describe(s, category, issue_type),
        category,
        status: IssueStatus::WEIGHTED[s.bucket(100.0, 5) % IssueStatus::WEIGHTED.len()],
        address: format!("{street_number} {street}"),
        votes: 1 + (s.modulo(250) / 10) as u32,
        comments: (s.modulo(150) / 10) as u32,
        created_by: ISSUE_CREATORS.pick_bucket(s, 700.0).to_string(),
        created_at,
        coordinate: ctx.coordinate.offset(lat_offset, lng_offset),
        impact_score: 30 + (s.modulo(700) / 10) as u32,
        contributions: (s.modulo(200) / 10) as u32,
    }
}

fn describe(s: Seed, category: IssueCategory, issue_type: &str) -> String {
    let category = category.label().to_lowercase();
    let issue_type = issue_type.to_lowercase();
    match s.bucket(500.0, 5) {
        0 => format!("Local residents reported this {category} issue that needs attention."),
        1 => format!("This {issue_type} is causing problems for residents in the area."),
        2 => format!("Community members are concerned about this {category} issue."),
        3 => format!("Several complaints have been received about this {issue_type}."),
        _ => format!("This {category} issue was reported by multiple residents recently."),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use civic_seed::Coordinate;

    use super::*;

    fn ctx(lat: f64, lng: f64) -> GenerationContext {
        let as_of = DateTime::<Utc>::from_timestamp(1_717_243_200, 0).unwrap();
        GenerationContext::new(Coordinate::new(lat, lng), as_of)
    }

    #[test]
    fn count_within_bounds() {
        for (lat, lng) in [(37.7749, -122.4194), (0.0, 0.0), (-33.9, 151.2)] {
            let issues = IssueSynthesizer.synthesize(&ctx(lat, lng));
            assert!(IssueSynthesizer::COUNT.contains(issues.len()));
        }
    }

    #[test]
    fn zero_seed_issue_fields() {
        let issues = IssueSynthesizer.synthesize(&ctx(0.0, 0.0));
        assert_eq!(issues.len(), 5);

        let first = &issues[0];
        assert_eq!(first.id, "issue-1-0");
        assert_eq!(first.title, "Pothole on Main St");
        assert_eq!(first.category, IssueCategory::Infrastructure);
        assert_eq!(first.status, IssueStatus::Open);
        assert_eq!(first.address, "100 Main St");
        assert_eq!(first.votes, 1);
        assert_eq!(first.impact_score, 30);
        assert_eq!(first.created_by, "Alex Smith");
        assert_eq!(
            first.description,
            "Local residents reported this infrastructure issue that needs attention."
        );
        assert_eq!(first.coordinate, Coordinate::new(-0.01, -0.015));
    }

    #[test]
    fn second_issue_uses_stride() {
        // 123456 % 100 = 56 -> bucket 2 (Environment); % 1000 = 456; % 900 = 156
        let issues = IssueSynthesizer.synthesize(&ctx(0.0, 0.0));
        let second = &issues[1];
        assert_eq!(second.id, "issue-2-3456");
        assert_eq!(second.category, IssueCategory::Environment);
        assert_eq!(second.title, "Graffiti on Pine St");
        assert_eq!(second.address, "256 Pine St");
    }

    #[test]
    fn created_at_within_thirty_days() {
        let c = ctx(12.5, 41.0);
        for issue in IssueSynthesizer.synthesize(&c) {
            let age = c.as_of - issue.created_at;
            assert!(age >= Duration::zero() && age < Duration::days(30));
        }
    }

    #[test]
    fn hint_clamps_count() {
        let c = ctx(37.7749, -122.4194).with_count_hint(Some(50));
        assert_eq!(IssueSynthesizer.synthesize(&c).len(), 8);
    }
}
