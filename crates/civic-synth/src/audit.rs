//! Snapshot audit
//!
//! Checks generated data against the invariants every dataset must hold:
//! - Record counts inside each domain's interval
//! - Engagement percentage in `[30, 100]` and level consistent with it
//! - Zone issue count inside its priority bucket, one to three categories
//! - Initiative impact in `[50, 100]`, end date iff Completed
//! - Domain sort orders
//! - Task breakdown parts summing to the total
//! - Repeated generation producing identical output
//!
//! Enum validity needs no runtime check: every status, priority, level and
//! category is a closed Rust enum.

use std::fmt::{self, Display, Formatter};

use civic_seed::Coordinate;

use crate::engagement::EngagementSynthesizer;
use crate::generator::{CivicDataGenerator, CivicSnapshot};
use crate::initiatives::InitiativeSynthesizer;
use crate::issues::IssueSynthesizer;
use crate::synthesizer::{CountRange, Synthesizer};
use crate::types::{EngagementLevel, InitiativeStatus, Priority};
use crate::zones::ZoneSynthesizer;

/// A broken invariant
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Record count outside the domain's interval
    CountOutOfRange {
        domain: &'static str,
        count: usize,
        range: CountRange,
    },
    /// Engagement percentage outside `[30, 100]`
    PercentageOutOfRange { area: String, percentage: u32 },
    /// Engagement level disagrees with its percentage
    LevelMismatch {
        area: String,
        percentage: u32,
        level: EngagementLevel,
    },
    /// Zone issue count outside its priority bucket
    IssueCountOutOfBucket {
        zone: String,
        priority: Priority,
        issue_count: u32,
    },
    /// Zone with no categories or more than three
    CategoryCountOutOfRange { zone: String, count: usize },
    /// Initiative impact score outside `[50, 100]`
    ImpactOutOfRange { initiative: String, impact_score: u32 },
    /// End date present without Completed status, or missing with it
    EndDateInconsistent {
        initiative: String,
        status: InitiativeStatus,
        has_end_date: bool,
    },
    /// Output not in the domain's documented order
    Unsorted { domain: &'static str },
    /// Task breakdown parts do not add up
    TaskBreakdownMismatch { total: u32, sum: u32 },
    /// Two generations for the same input differ
    NonDeterministic { coordinate: Coordinate },
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountOutOfRange { domain, count, range } => {
                write!(f, "{domain}: {count} records outside {}..={}", range.min, range.max)
            }
            Self::PercentageOutOfRange { area, percentage } => {
                write!(f, "engagement '{area}': percentage {percentage} outside 30..=100")
            }
            Self::LevelMismatch { area, percentage, level } => {
                write!(f, "engagement '{area}': level {level} for {percentage}%")
            }
            Self::IssueCountOutOfBucket { zone, priority, issue_count } => {
                write!(f, "zone '{zone}': {issue_count} issues outside {priority} bucket")
            }
            Self::CategoryCountOutOfRange { zone, count } => {
                write!(f, "zone '{zone}': {count} categories")
            }
            Self::ImpactOutOfRange { initiative, impact_score } => {
                write!(f, "initiative '{initiative}': impact {impact_score} outside 50..=100")
            }
            Self::EndDateInconsistent { initiative, status, has_end_date } => {
                write!(f, "initiative '{initiative}': status {status} with end date present = {has_end_date}")
            }
            Self::Unsorted { domain } => write!(f, "{domain}: records out of order"),
            Self::TaskBreakdownMismatch { total, sum } => {
                write!(f, "tasks: parts sum to {sum}, total is {total}")
            }
            Self::NonDeterministic { coordinate } => {
                write!(f, "generation at {coordinate} is not repeatable")
            }
        }
    }
}

/// Violation found at a coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub coordinate: Coordinate,
    pub violation: Violation,
}

/// Check every invariant of one snapshot
#[must_use]
pub fn check_snapshot(snapshot: &CivicSnapshot) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_count::<IssueSynthesizer>(snapshot.issues.len(), &mut violations);
    check_count::<EngagementSynthesizer>(snapshot.engagement.len(), &mut violations);
    check_count::<ZoneSynthesizer>(snapshot.zones.len(), &mut violations);
    check_count::<InitiativeSynthesizer>(snapshot.initiatives.len(), &mut violations);

    for area in &snapshot.engagement {
        if !(30..=100).contains(&area.percentage) {
            violations.push(Violation::PercentageOutOfRange {
                area: area.area.clone(),
                percentage: area.percentage,
            });
        }
        if area.level != EngagementLevel::from_percentage(area.percentage) {
            violations.push(Violation::LevelMismatch {
                area: area.area.clone(),
                percentage: area.percentage,
                level: area.level,
            });
        }
    }
    if !snapshot
        .engagement
        .windows(2)
        .all(|w| w[0].percentage >= w[1].percentage)
    {
        violations.push(Violation::Unsorted { domain: EngagementSynthesizer::DOMAIN });
    }

    for zone in &snapshot.zones {
        if !zone.priority.issue_count_range().contains(&zone.issue_count) {
            violations.push(Violation::IssueCountOutOfBucket {
                zone: zone.name.clone(),
                priority: zone.priority,
                issue_count: zone.issue_count,
            });
        }
        if !(1..=3).contains(&zone.categories.len()) {
            violations.push(Violation::CategoryCountOutOfRange {
                zone: zone.name.clone(),
                count: zone.categories.len(),
            });
        }
    }
    if !snapshot
        .zones
        .windows(2)
        .all(|w| w[0].priority.rank() <= w[1].priority.rank())
    {
        violations.push(Violation::Unsorted { domain: ZoneSynthesizer::DOMAIN });
    }

    for initiative in &snapshot.initiatives {
        if !(50..=100).contains(&initiative.impact_score) {
            violations.push(Violation::ImpactOutOfRange {
                initiative: initiative.id.clone(),
                impact_score: initiative.impact_score,
            });
        }
        let completed = initiative.status == InitiativeStatus::Completed;
        if initiative.end_date.is_some() != completed {
            violations.push(Violation::EndDateInconsistent {
                initiative: initiative.id.clone(),
                status: initiative.status,
                has_end_date: initiative.end_date.is_some(),
            });
        }
    }
    let initiatives_sorted = snapshot.initiatives.windows(2).all(|w| {
        let (a, b) = (&w[0], &w[1]);
        a.status.rank() < b.status.rank()
            || (a.status == b.status && a.start_date >= b.start_date)
    });
    if !initiatives_sorted {
        violations.push(Violation::Unsorted { domain: InitiativeSynthesizer::DOMAIN });
    }

    let tasks = snapshot.stats.tasks;
    let sum = tasks.completed + tasks.in_progress + tasks.pending;
    if sum != tasks.total {
        violations.push(Violation::TaskBreakdownMismatch { total: tasks.total, sum });
    }

    violations
}

fn check_count<S: Synthesizer>(count: usize, violations: &mut Vec<Violation>) {
    if !S::COUNT.contains(count) {
        violations.push(Violation::CountOutOfRange {
            domain: S::DOMAIN,
            count,
            range: S::COUNT,
        });
    }
}

/// Audit statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditStats {
    pub coordinates_checked: u64,
    pub records_checked: u64,
    pub degenerate_seeds: u64,
}

/// Aggregated result of auditing many coordinates
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    pub stats: AuditStats,
    pub findings: Vec<Finding>,
}

impl AuditReport {
    /// Check if no invariant was broken
    #[must_use]
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }

    /// Audit one coordinate, generating its snapshot twice
    pub fn record(&mut self, generator: &CivicDataGenerator, coordinate: Coordinate) {
        let snapshot = generator.snapshot(coordinate);

        self.stats.coordinates_checked += 1;
        self.stats.records_checked += (snapshot.issues.len()
            + snapshot.engagement.len()
            + snapshot.zones.len()
            + snapshot.initiatives.len()) as u64;
        if generator.context(coordinate).seed.value() == 0.0 {
            self.stats.degenerate_seeds += 1;
        }

        let mut violations = check_snapshot(&snapshot);
        if generator.snapshot(coordinate) != snapshot {
            violations.push(Violation::NonDeterministic { coordinate });
        }
        for violation in violations {
            tracing::warn!(%coordinate, %violation, "invariant violated");
            self.findings.push(Finding { coordinate, violation });
        }
    }

    /// Generate text report
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Civic Data Audit Report ===\n\n");
        report.push_str(&format!("Coordinates Checked: {}\n", self.stats.coordinates_checked));
        report.push_str(&format!("Records Checked: {}\n", self.stats.records_checked));
        report.push_str(&format!("Degenerate Seeds: {}\n", self.stats.degenerate_seeds));
        report.push_str(&format!("Violations: {}\n", self.findings.len()));

        if !self.findings.is_empty() {
            report.push_str("\n=== Violations ===\n");
            for (i, finding) in self.findings.iter().enumerate() {
                report.push_str(&format!("{}. [{}] {}\n", i + 1, finding.coordinate, finding.violation));
            }
        }

        report.push_str(&format!(
            "\n=== Result: {} ===\n",
            if self.passed() { "PASS" } else { "FAIL" }
        ));

        report
    }
}

/// Audit every coordinate in `coordinates`
pub fn audit_coordinates<I>(generator: &CivicDataGenerator, coordinates: I) -> AuditReport
where
    I: IntoIterator<Item = Coordinate>,
{
    let mut report = AuditReport::default();
    for coordinate in coordinates {
        report.record(generator, coordinate);
    }
    tracing::info!(
        coordinates = report.stats.coordinates_checked,
        violations = report.findings.len(),
        "audit complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::config::GeneratorConfig;

    fn generator() -> CivicDataGenerator {
        let as_of = DateTime::<Utc>::from_timestamp(1_717_243_200, 0).unwrap();
        CivicDataGenerator::new(GeneratorConfig::new().with_as_of(as_of))
    }

    #[test]
    fn generated_snapshots_pass() {
        let coords = [
            Coordinate::DEFAULT,
            Coordinate::new(0.0, 0.0),
            Coordinate::new(-90.0, 180.0),
            Coordinate::new(1e9, -1e9),
        ];
        let report = audit_coordinates(&generator(), coords);
        assert!(report.passed(), "{}", report.generate_text());
        assert_eq!(report.stats.coordinates_checked, 4);
        assert_eq!(report.stats.degenerate_seeds, 1);
    }

    #[test]
    fn tampered_snapshot_is_caught() {
        let mut snapshot = generator().default_snapshot();
        snapshot.zones[0].issue_count = 99;
        snapshot.zones[0].priority = Priority::Low;
        snapshot.initiatives[0].impact_score = 101;
        snapshot.engagement.truncate(2);

        let violations = check_snapshot(&snapshot);
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::IssueCountOutOfBucket { issue_count: 99, .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::ImpactOutOfRange { impact_score: 101, .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::CountOutOfRange { domain: "engagement", count: 2, .. })));
    }

    #[test]
    fn report_text_lists_result() {
        let mut report = AuditReport::default();
        assert!(report.generate_text().contains("Result: PASS"));
        report.findings.push(Finding {
            coordinate: Coordinate::DEFAULT,
            violation: Violation::Unsorted { domain: "zones" },
        });
        let text = report.generate_text();
        assert!(text.contains("zones: records out of order"));
        assert!(text.contains("Result: FAIL"));
    }
}
