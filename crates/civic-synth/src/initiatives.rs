//! Community initiative synthesizer
//!
//! Every numeric field of initiative `i` uses its own stride over the base
//! seed (`base + i * k`), so that category, title, dates, status, budget,
//! participants and impact vary independently.
//!
//! Categories are kept diverse: a category is reused only after every
//! category has appeared once. The result is ordered by status (Planning,
//! In Progress, Completed) and then by start date, newest first.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use civic_seed::{Coordinate, Seed};

use crate::synthesizer::{CountRange, GenerationContext, Synthesizer};
use crate::tables::{InitiativeCategory, NEIGHBORHOODS};
use crate::types::{Initiative, InitiativeStatus};

/// Field strides applied to the base seed
mod stride {
    pub(super) const CATEGORY: f64 = 123.0;
    pub(super) const TITLE: f64 = 456.0;
    pub(super) const START: f64 = 789.0;
    /// Multiple of the status count, so every initiative at one location
    /// shares a status. Kept so existing datasets stay stable.
    pub(super) const STATUS: f64 = 101_112.0;
    pub(super) const DURATION: f64 = 131_415.0;
    pub(super) const BUDGET: f64 = 161_718.0;
    pub(super) const PARTICIPANTS: f64 = 192_021.0;
    pub(super) const IMPACT: f64 = 222_324.0;
}

/// Synthesizer for [`Initiative`] records
#[derive(Debug, Clone, Copy, Default)]
pub struct InitiativeSynthesizer;

impl Synthesizer for InitiativeSynthesizer {
    type Record = Initiative;

    const DOMAIN: &'static str = "initiatives";
    const COUNT: CountRange = CountRange::new(5, 9);

    fn synthesize(&self, ctx: &GenerationContext) -> Vec<Initiative> {
        let count = self.count(ctx);
        tracing::debug!(domain = Self::DOMAIN, count, seed = ctx.seed.value(), "synthesizing");

        let mut used = BTreeSet::new();
        let mut initiatives: Vec<Initiative> = (0..count)
            .map(|i| {
                let category = diverse_category(ctx.seed.offset(i, stride::CATEGORY), &mut used);
                synthesize_initiative(ctx, i, category)
            })
            .collect();

        initiatives.sort_by(|a, b| {
            a.status
                .rank()
                .cmp(&b.status.rank())
                .then_with(|| b.start_date.cmp(&a.start_date))
        });
        initiatives
    }
}

/// Seeded category, replaced by the first unused one while any remain
fn diverse_category(s: Seed, used: &mut BTreeSet<InitiativeCategory>) -> InitiativeCategory {
    let all = InitiativeCategory::ALL;
    let mut category = *s.pick(all);
    if used.contains(&category) && used.len() < all.len() {
        if let Some(unused) = all.iter().find(|c| !used.contains(c)) {
            category = *unused;
        }
    }
    used.insert(category);
    category
}

fn synthesize_initiative(ctx: &GenerationContext, i: usize, category: InitiativeCategory) -> Initiative {
    let base = ctx.seed;
    let title = category.titles().pick(base.offset(i, stride::TITLE));

    let start_date = days_before(ctx.as_of, base.offset(i, stride::START).modulo(365));
    let status = *base.offset(i, stride::STATUS).pick(InitiativeStatus::ALL);
    let end_date = match status {
        InitiativeStatus::Completed => {
            let duration = base.offset(i, stride::DURATION).modulo(90) + 30;
            Some(days_after(start_date, duration))
        }
        InitiativeStatus::Planning | InitiativeStatus::InProgress => None,
    };

    let description = format!(
        "{} {}",
        category.descriptions().pick(Seed::new(title.len() as f64)),
        status.addendum()
    );

    Initiative {
        id: format!("initiative-{i}-{}", base.modulo(1000)),
        title: title.to_string(),
        description,
        status,
        category,
        participants: base.offset(i, stride::PARTICIPANTS).in_range(5, 100),
        budget: category.budget_base() + base.offset(i, stride::BUDGET).modulo(10_000) as u32,
        start_date,
        end_date,
        impact_score: base.offset(i, stride::IMPACT).in_range(50, 50),
        location: location_label(ctx.coordinate, i),
        organizer: category.organizers().pick(Seed::new(i as f64)).to_string(),
    }
}

/// `"{neighborhood} - {lat:.3}, {lng:.3}"`
fn location_label(coord: Coordinate, i: usize) -> String {
    let neighborhood = NEIGHBORHOODS.pick(Seed::new(coord.lat * i as f64));
    format!("{neighborhood} - {:.3}, {:.3}", coord.lat, coord.lng)
}

fn days_before(instant: DateTime<Utc>, days: u64) -> DateTime<Utc> {
    instant
        .checked_sub_signed(Duration::days(days as i64))
        .unwrap_or(instant)
}

fn days_after(instant: DateTime<Utc>, days: u64) -> DateTime<Utc> {
    instant
        .checked_add_signed(Duration::days(days as i64))
        .unwrap_or(instant)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthesize(lat: f64, lng: f64) -> (GenerationContext, Vec<Initiative>) {
        let as_of = DateTime::<Utc>::from_timestamp(1_717_243_200, 0).unwrap();
        let ctx = GenerationContext::new(Coordinate::new(lat, lng), as_of);
        let initiatives = InitiativeSynthesizer.synthesize(&ctx);
        (ctx, initiatives)
    }

    #[test]
    fn end_date_iff_completed() {
        for (lat, lng) in [(37.7749, -122.4194), (10.0, 10.0), (-45.0, 60.0), (0.0, 0.0)] {
            let (_, initiatives) = synthesize(lat, lng);
            for initiative in initiatives {
                let completed = initiative.status == InitiativeStatus::Completed;
                assert_eq!(initiative.end_date.is_some(), completed);
                if let Some(end) = initiative.end_date {
                    let days = (end - initiative.start_date).num_days();
                    assert!((30..120).contains(&days));
                }
            }
        }
    }

    #[test]
    fn ranges_hold() {
        let (ctx, initiatives) = synthesize(48.137, 11.575);
        assert!(InitiativeSynthesizer::COUNT.contains(initiatives.len()));
        for initiative in &initiatives {
            assert!((50..100).contains(&initiative.impact_score));
            assert!((5..105).contains(&initiative.participants));
            let base = initiative.category.budget_base();
            assert!((base..base + 10_000).contains(&initiative.budget));
            assert!(initiative.start_date <= ctx.as_of);
            assert!(initiative.location.ends_with("48.137, 11.575"));
        }
    }

    #[test]
    fn categories_do_not_repeat_until_exhausted() {
        let (_, initiatives) = synthesize(0.0, 0.0);
        let distinct: BTreeSet<_> = initiatives.iter().map(|i| i.category).collect();
        assert_eq!(distinct.len(), initiatives.len().min(InitiativeCategory::ALL.len()));
    }

    #[test]
    fn diversity_falls_back_to_first_unused() {
        let mut used = BTreeSet::new();
        let first = diverse_category(Seed::new(0.0), &mut used);
        assert_eq!(first, InitiativeCategory::Environmental);
        let second = diverse_category(Seed::new(7.0), &mut used);
        assert_eq!(second, InitiativeCategory::Infrastructure);
    }

    #[test]
    fn ordered_by_status_then_newest() {
        let (_, initiatives) = synthesize(-22.9, -43.2);
        for pair in initiatives.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.status.rank() <= b.status.rank());
            if a.status == b.status {
                assert!(a.start_date >= b.start_date);
            }
        }
    }

    #[test]
    fn description_ends_with_status_addendum() {
        let (_, initiatives) = synthesize(1.3, 103.8);
        for initiative in initiatives {
            assert!(initiative.description.ends_with(initiative.status.addendum()));
        }
    }

    #[test]
    fn status_is_shared_per_location() {
        assert_eq!(stride::STATUS % InitiativeStatus::ALL.len() as f64, 0.0);
        for (lat, lng) in [(37.7749, -122.4194), (0.0, 0.0), (51.5, -0.12)] {
            let (_, initiatives) = synthesize(lat, lng);
            let first = initiatives[0].status;
            assert!(initiatives.iter().all(|i| i.status == first), "{lat},{lng}");
        }
    }
}
