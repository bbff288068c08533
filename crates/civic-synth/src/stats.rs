//! Community statistics
//!
//! Dashboard-level aggregates for a coordinate: headline counters, a
//! six-month token price history, the most frequent activities, a task
//! breakdown, impact metrics and the top contributors. Every value is a
//! modulo of the coordinate's base seed and every date is relative to
//! the context's `as_of` instant.

use chrono::{Months, NaiveDate};
use civic_seed::Seed;
use serde::{Deserialize, Serialize};

use crate::synthesizer::GenerationContext;
use crate::tables::{ACTIVITY_KINDS, CONTRIBUTOR_NAMES};

/// Months covered by the price history
pub const PRICE_HISTORY_MONTHS: u32 = 6;

/// Activity kinds reported
pub const TOP_ACTIVITIES: usize = 4;

/// Aggregated statistics for one community
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityStats {
    pub active_issues: u32,
    pub resolved_this_month: u32,
    pub total_contributors: u32,
    pub engagement_score: u32,
    pub token_price: TokenPrice,
    /// Most frequent activities, highest count first
    pub activities: Vec<ActivityCount>,
    pub tasks: TaskBreakdown,
    pub impact: ImpactMetrics,
    /// Contributors, most contributions first
    pub contributors: Vec<Contributor>,
}

/// Current token price and its monthly history, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPrice {
    pub current: f64,
    pub history: Vec<PricePoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    /// Rounded to cents, never below `0.1`
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCount {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u32,
}

/// Task counts; `completed + in_progress + pending == total`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBreakdown {
    pub total: u32,
    pub completed: u32,
    pub in_progress: u32,
    pub pending: u32,
}

impl TaskBreakdown {
    /// Split `total` by percentage, giving the remainder to `pending`
    ///
    /// `in_progress` is capped so the parts never exceed the total.
    #[must_use]
    pub fn split(total: u32, completed_pct: u32, in_progress_pct: u32) -> Self {
        let completed = (total * completed_pct / 100).min(total);
        let in_progress = (total * in_progress_pct / 100).min(total - completed);
        Self {
            total,
            completed,
            in_progress,
            pending: total - completed - in_progress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactMetrics {
    pub issues_resolved: u32,
    /// Percent
    pub community_satisfaction: u32,
    /// Hours
    pub response_time: u32,
    /// Percent
    pub participation_rate: u32,
    pub token_distributed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub name: String,
    pub contributions: u32,
    pub join_date: NaiveDate,
}

/// Generate the statistics for `ctx`
#[must_use]
pub fn community_stats(ctx: &GenerationContext) -> CommunityStats {
    let s = ctx.seed;
    let today = ctx.as_of.date_naive();
    tracing::debug!(domain = "stats", seed = s.value(), "synthesizing");

    let resolved_this_month = 3 + s.scale(2.0).modulo(15) as u32;

    CommunityStats {
        active_issues: s.in_range(5, 20),
        resolved_this_month,
        total_contributors: s.in_range(20, 100),
        engagement_score: s.in_range(60, 36),
        token_price: token_price(s, today),
        activities: activities(s),
        tasks: TaskBreakdown::split(
            s.in_range(50, 100),
            s.in_range(30, 50),
            20 + s.scale(2.0).modulo(40) as u32,
        ),
        impact: ImpactMetrics {
            issues_resolved: resolved_this_month * 3 + s.modulo(20) as u32,
            community_satisfaction: s.in_range(70, 25),
            response_time: s.in_range(12, 36),
            participation_rate: s.in_range(40, 45),
            token_distributed: s.in_range(500, 2000),
        },
        contributors: contributors(s, today),
    }
}

fn token_price(s: Seed, today: NaiveDate) -> TokenPrice {
    let mut price = 0.5 + (s.value() % 100.0) / 100.0;
    let history: Vec<PricePoint> = (0..PRICE_HISTORY_MONTHS)
        .rev()
        .map(|months_ago| {
            let variation = (s.scale(f64::from(months_ago + 1)).value() % 40.0 - 20.0) / 100.0;
            price = (price + variation).max(0.1);
            PricePoint {
                date: months_before(today, months_ago),
                price: round_cents(price),
            }
        })
        .collect();

    TokenPrice {
        current: history.last().map_or(round_cents(price), |p| p.price),
        history,
    }
}

fn activities(s: Seed) -> Vec<ActivityCount> {
    let mut counts: Vec<ActivityCount> = ACTIVITY_KINDS
        .entries()
        .iter()
        .map(|kind| ActivityCount {
            kind: (*kind).to_string(),
            count: 1 + s.scale(kind.len() as f64).modulo(50) as u32,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_ACTIVITIES);
    counts
}

fn contributors(s: Seed, today: NaiveDate) -> Vec<Contributor> {
    let joined = months_before(today, s.modulo(12) as u32)
        .checked_sub_days(chrono::Days::new(s.modulo(28)))
        .unwrap_or(today);

    let take = 5 + s.index(4);
    let mut contributors: Vec<Contributor> = CONTRIBUTOR_NAMES
        .entries()
        .iter()
        .take(take)
        .enumerate()
        .map(|(index, name)| Contributor {
            name: (*name).to_string(),
            contributions: 10 + s.scale((index + 1) as f64).modulo(90) as u32,
            join_date: joined,
        })
        .collect();
    contributors.sort_by(|a, b| b.contributions.cmp(&a.contributions));
    contributors
}

fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
