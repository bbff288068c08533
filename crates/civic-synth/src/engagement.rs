//! Engagement heatmap synthesizer

use civic_seed::{first_char_code, shuffled, Seed};

use crate::synthesizer::{CountRange, GenerationContext, Synthesizer};
use crate::tables::engagement_areas;
use crate::types::{EngagementArea, EngagementLevel};

/// Synthesizer for [`EngagementArea`] records
///
/// Picks a seeded subset of the neighborhood names around the coordinate
/// and assigns each a participation percentage in `[30, 100)`. Output is
/// ordered by percentage, highest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngagementSynthesizer;

impl Synthesizer for EngagementSynthesizer {
    type Record = EngagementArea;

    const DOMAIN: &'static str = "engagement";
    const COUNT: CountRange = CountRange::new(5, 9);

    fn synthesize(&self, ctx: &GenerationContext) -> Vec<EngagementArea> {
        let count = self.count(ctx);
        tracing::debug!(domain = Self::DOMAIN, count, seed = ctx.seed.value(), "synthesizing");

        let stride = ctx.coordinate.rounded_sum();
        let mut areas: Vec<EngagementArea> = shuffled(&engagement_areas(ctx.coordinate), ctx.seed)
            .into_iter()
            .take(count)
            .enumerate()
            .map(|(index, area)| {
                let s = Seed::new(first_char_code(&area) + index as f64 * stride);
                let percentage = s.in_range(30, 70);
                EngagementArea {
                    level: EngagementLevel::from_percentage(percentage),
                    area,
                    percentage,
                }
            })
            .collect();

        areas.sort_by(|a, b| b.percentage.cmp(&a.percentage));
        areas
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use civic_seed::Coordinate;

    use super::*;

    fn synthesize(lat: f64, lng: f64) -> Vec<EngagementArea> {
        let as_of = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        EngagementSynthesizer.synthesize(&GenerationContext::new(Coordinate::new(lat, lng), as_of))
    }

    #[test]
    fn percentages_in_range_and_sorted() {
        for (lat, lng) in [(37.7749, -122.4194), (-80.0, 170.0), (0.0, 0.0), (51.5, -0.12)] {
            let areas = synthesize(lat, lng);
            assert!(EngagementSynthesizer::COUNT.contains(areas.len()));
            for area in &areas {
                assert!((30..100).contains(&area.percentage), "{area:?}");
                assert_eq!(area.level, EngagementLevel::from_percentage(area.percentage));
            }
            assert!(areas.windows(2).all(|w| w[0].percentage >= w[1].percentage));
        }
    }

    #[test]
    fn area_names_are_distinct() {
        let areas = synthesize(48.85, 2.35);
        let mut names: Vec<_> = areas.iter().map(|a| a.area.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), areas.len());
    }

    #[test]
    fn zero_coordinate_uses_first_char_codes() {
        // seed 0 and stride 0: percentage = 30 + first char code % 70
        let areas: Vec<(String, u32)> = synthesize(0.0, 0.0)
            .into_iter()
            .map(|a| (a.area, a.percentage))
            .collect();
        let expected = [
            ("Downtown", 98),
            ("Central Park", 97),
            ("West Side", 47),
            ("University Area", 45),
            ("South District", 43),
        ];
        let expected: Vec<(String, u32)> = expected
            .iter()
            .map(|(area, pct)| ((*area).to_string(), *pct))
            .collect();
        assert_eq!(areas, expected);
    }

    #[test]
    fn san_francisco_ties_keep_generation_order() {
        let areas = synthesize(37.7749, -122.4194);
        let names: Vec<&str> = areas.iter().map(|a| a.area.as_str()).collect();
        assert_eq!(
            names,
            [
                "West Side",
                "North District",
                "City Center",
                "Central Park",
                "Riverside",
                "Downtown",
                "Harbor District",
            ]
        );
        assert_eq!(areas[0].level, EngagementLevel::High);
        assert_eq!(areas[6].level, EngagementLevel::Low);
    }
}
