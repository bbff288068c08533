//! Synthesized record types
//!
//! The four output shapes of the generator plus the enumerations that
//! classify them:
//! - [`CivicIssue`] with [`IssueStatus`]
//! - [`EngagementArea`] with [`EngagementLevel`]
//! - [`ImprovementZone`] with [`Priority`]
//! - [`Initiative`] with [`InitiativeStatus`]

use std::fmt::{self, Display, Formatter};
use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use civic_seed::{Coordinate, Seed};
use serde::{Deserialize, Serialize};

use crate::tables::{labelled_enum, InitiativeCategory, IssueCategory, ZoneCategory};

labelled_enum! {
    /// Lifecycle state of a reported issue
    IssueStatus {
        Open => "Open",
        InProgress => "In Progress",
    }
}

impl IssueStatus {
    /// Weighted draw table, biased two-to-one toward `Open`
    pub const WEIGHTED: [Self; 3] = [Self::Open, Self::InProgress, Self::Open];

    /// Tab order rank
    #[inline]
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Open => 0,
            Self::InProgress => 1,
        }
    }
}

labelled_enum! {
    /// Engagement bucket derived from a participation percentage
    EngagementLevel {
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

impl EngagementLevel {
    /// Classify a percentage: `>= 70` High, `>= 45` Medium, otherwise Low
    #[inline]
    #[must_use]
    pub const fn from_percentage(percentage: u32) -> Self {
        if percentage >= 70 {
            Self::High
        } else if percentage >= 45 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

labelled_enum! {
    /// Urgency of an improvement zone
    Priority {
        Critical => "Critical",
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

impl Priority {
    /// Weighted draw table, biased toward High and Medium
    pub const WEIGHTED: [Self; 7] = [
        Self::Critical,
        Self::High,
        Self::High,
        Self::Medium,
        Self::Medium,
        Self::Medium,
        Self::Low,
    ];

    /// Sort rank, Critical first
    #[inline]
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Issue-count bucket `(lower, span)` for this priority
    #[inline]
    #[must_use]
    pub const fn issue_count_span(&self) -> (u32, u32) {
        match self {
            Self::Critical => (15, 11),
            Self::High => (8, 8),
            Self::Medium => (4, 5),
            Self::Low => (1, 4),
        }
    }

    /// Inclusive issue-count range for this priority
    #[inline]
    #[must_use]
    pub fn issue_count_range(&self) -> RangeInclusive<u32> {
        let (lower, span) = self.issue_count_span();
        lower..=lower + span - 1
    }

    /// Seeded issue count within [`Self::issue_count_range`]
    #[inline]
    #[must_use]
    pub fn issue_count(&self, seed: Seed) -> u32 {
        let (lower, span) = self.issue_count_span();
        seed.in_range(lower, span)
    }
}

labelled_enum! {
    /// Lifecycle state of a community initiative
    InitiativeStatus {
        Planning => "Planning",
        InProgress => "In Progress",
        Completed => "Completed",
    }
}

impl InitiativeStatus {
    /// Sort rank: Planning, then In Progress, then Completed
    #[inline]
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Planning => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
        }
    }

    /// Sentence appended to an initiative description
    #[must_use]
    pub const fn addendum(&self) -> &'static str {
        match self {
            Self::Planning => {
                "This initiative is currently in the planning phase with community input being gathered."
            }
            Self::InProgress => {
                "Work is actively underway with community participants engaged in implementation."
            }
            Self::Completed => {
                "This initiative has been successfully completed, with measurable community impact."
            }
        }
    }
}

/// A reported civic issue near a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CivicIssue {
    /// Stable id: `issue-{n}-{seed residue}`
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: IssueCategory,
    pub status: IssueStatus,
    /// Street address label
    pub address: String,
    pub votes: u32,
    pub comments: u32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    /// Where the issue was reported
    pub coordinate: Coordinate,
    pub impact_score: u32,
    pub contributions: u32,
}

/// Participation level of a neighborhood
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementArea {
    pub area: String,
    pub level: EngagementLevel,
    /// Participation percentage in `[30, 100]`
    pub percentage: u32,
}

/// A district flagged for improvement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementZone {
    pub id: String,
    pub name: String,
    pub priority: Priority,
    /// Open issues, within the priority's bucket
    pub issue_count: u32,
    /// One to three categories
    pub categories: Vec<ZoneCategory>,
    pub description: String,
}

/// A community-run initiative
///
/// `end_date` is present if and only if `status` is `Completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Initiative {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: InitiativeStatus,
    pub category: InitiativeCategory,
    pub participants: u32,
    pub budget: u32,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// Impact score in `[50, 100]`
    pub impact_score: u32,
    pub location: String,
    pub organizer: String,
}

impl Initiative {
    /// Neighborhood part of the location label
    #[must_use]
    pub fn neighborhood(&self) -> &str {
        self.location
            .split(" - ")
            .next()
            .unwrap_or(&self.location)
            .trim()
    }
}

impl Display for ImprovementZone {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {} issues", self.name, self.priority, self.issue_count)
    }
}
