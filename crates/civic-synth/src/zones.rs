//! Improvement zone synthesizer
//!
//! Selects three to six districts and rates each one:
//! - Priority drawn from [`Priority::WEIGHTED`]
//! - Issue count inside the priority's bucket
//! - One to three categories in seeded order
//!
//! Zones are returned Critical first; ties keep generation order.

use civic_seed::{first_char_code, shuffled, Seed};

use crate::synthesizer::{CountRange, GenerationContext, Synthesizer};
use crate::tables::{ZoneCategory, ZONE_NAMES};
use crate::types::{ImprovementZone, Priority};

/// Synthesizer for [`ImprovementZone`] records
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneSynthesizer;

impl Synthesizer for ZoneSynthesizer {
    type Record = ImprovementZone;

    const DOMAIN: &'static str = "zones";
    const COUNT: CountRange = CountRange::new(3, 6);

    fn synthesize(&self, ctx: &GenerationContext) -> Vec<ImprovementZone> {
        let count = self.count(ctx);
        tracing::debug!(domain = Self::DOMAIN, count, seed = ctx.seed.value(), "synthesizing");

        let stride = ctx.coordinate.rounded_sum();
        let mut zones: Vec<ImprovementZone> = shuffled(ZONE_NAMES.entries(), ctx.seed)
            .into_iter()
            .take(count)
            .enumerate()
            .map(|(index, name)| {
                let s = Seed::new(first_char_code(name) + index as f64 * stride);
                synthesize_zone(ctx.seed, index, name, s)
            })
            .collect();

        zones.sort_by_key(|zone| zone.priority.rank());
        zones
    }
}

fn synthesize_zone(base: Seed, index: usize, name: &str, s: Seed) -> ImprovementZone {
    let priority = *s.pick(&Priority::WEIGHTED);
    let num_categories = 1 + s.index(3);
    let categories: Vec<ZoneCategory> = shuffled(ZoneCategory::ALL, s)
        .into_iter()
        .take(num_categories)
        .collect();

    let template = base.add(name.len() as f64).index(4);
    ImprovementZone {
        id: format!("zone-{index}-{}", s.truncated()),
        name: name.to_string(),
        priority,
        issue_count: priority.issue_count(s),
        description: describe(template, name, priority, &categories),
        categories,
    }
}

fn describe(template: usize, name: &str, priority: Priority, categories: &[ZoneCategory]) -> String {
    let cats = categories
        .iter()
        .map(ZoneCategory::label)
        .collect::<Vec<_>>()
        .join(" and ");
    let level = priority.label().to_lowercase();
    match template {
        0 => format!("The {name} requires {level} priority attention due to issues in {cats}."),
        1 => format!("{priority} necessity for improvement in the {name}, particularly focusing on {cats}."),
        2 => format!("Citizen reports indicate {level} concerns in {name} related to {cats}."),
        _ => format!("Analysis shows {level} priority improvements needed in {name} for {cats}."),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use civic_seed::Coordinate;

    use super::*;

    fn synthesize(lat: f64, lng: f64) -> Vec<ImprovementZone> {
        let as_of = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        ZoneSynthesizer.synthesize(&GenerationContext::new(Coordinate::new(lat, lng), as_of))
    }

    #[test]
    fn issue_counts_match_priority() {
        for (lat, lng) in [(37.7749, -122.4194), (40.71, -74.0), (-1.0, -1.0), (89.9, 179.9)] {
            for zone in synthesize(lat, lng) {
                assert!(zone.priority.issue_count_range().contains(&zone.issue_count));
                assert!((1..=3).contains(&zone.categories.len()));
            }
        }
    }

    #[test]
    fn sorted_by_priority() {
        let zones = synthesize(52.52, 13.40);
        assert!(zones
            .windows(2)
            .all(|w| w[0].priority.rank() <= w[1].priority.rank()));
    }

    #[test]
    fn description_mentions_zone_and_categories() {
        for zone in synthesize(35.68, 139.69) {
            assert!(zone.description.contains(&zone.name));
            for category in &zone.categories {
                assert!(zone.description.contains(category.label()));
            }
        }
    }

    #[test]
    fn id_embeds_index_and_seed() {
        let zones = synthesize(0.0, 0.0);
        assert_eq!(zones.len(), 3);
        for zone in &zones {
            let code = u64::from(zone.name.as_bytes()[0]);
            assert!(zone.id.ends_with(&format!("-{code}")), "{}", zone.id);
        }
    }
}
