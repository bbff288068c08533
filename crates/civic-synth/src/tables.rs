//! Category and template tables
//!
//! Static, read-only lookup tables keyed by domain. Every table is a
//! [`CategoryTable`], whose `const` constructor rejects empty entry lists,
//! so a malformed table fails the build instead of a later modulo by zero.

use std::fmt::{self, Display, Formatter};

use civic_seed::{Coordinate, Seed};
use serde::{Deserialize, Serialize};

use crate::error::SynthError;

/// Non-empty ordered list of template strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTable {
    name: &'static str,
    entries: &'static [&'static str],
}

impl CategoryTable {
    /// Create a table
    ///
    /// # Panics
    /// Panics if `entries` is empty. In a `static` or `const` item this is
    /// a compile-time error.
    #[must_use]
    pub const fn new(name: &'static str, entries: &'static [&'static str]) -> Self {
        assert!(!entries.is_empty(), "category table must not be empty");
        Self { name, entries }
    }

    /// Create a table from entries assembled at runtime
    ///
    /// # Errors
    /// Returns [`SynthError::EmptyTable`] if `entries` is empty
    pub fn try_new(
        name: &'static str,
        entries: &'static [&'static str],
    ) -> Result<Self, SynthError> {
        if entries.is_empty() {
            return Err(SynthError::EmptyTable { table: name });
        }
        Ok(Self { name, entries })
    }

    /// Table name (for diagnostics)
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// All entries in table order
    #[inline]
    #[must_use]
    pub const fn entries(&self) -> &'static [&'static str] {
        self.entries
    }

    /// Number of entries (always at least one)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept for API symmetry with `len`
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Select `entries[seed % len]`
    #[inline]
    #[must_use]
    pub fn pick(&self, seed: Seed) -> &'static str {
        self.entries[seed.index(self.entries.len())]
    }

    /// Select by equal-width bucket of `seed % modulus`
    #[inline]
    #[must_use]
    pub fn pick_bucket(&self, seed: Seed, modulus: f64) -> &'static str {
        self.entries[seed.bucket(modulus, self.entries.len())]
    }
}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[doc = $label]
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in table order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Display label
            #[inline]
            #[must_use]
            pub const fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

pub(crate) use labelled_enum;

labelled_enum! {
    /// Category of a reported civic issue
    IssueCategory {
        Infrastructure => "Infrastructure",
        Safety => "Safety",
        Environment => "Environment",
        Vandalism => "Vandalism",
    }
}

impl IssueCategory {
    /// Issue titles that can be reported under this category
    #[must_use]
    pub fn issue_types(&self) -> &'static CategoryTable {
        match self {
            Self::Infrastructure => &INFRASTRUCTURE_ISSUES,
            Self::Safety => &SAFETY_ISSUES,
            Self::Environment => &ENVIRONMENT_ISSUES,
            Self::Vandalism => &VANDALISM_ISSUES,
        }
    }
}

labelled_enum! {
    /// Category attached to an improvement zone
    ZoneCategory {
        Infrastructure => "Infrastructure",
        Safety => "Safety",
        Environment => "Environment",
        PublicServices => "Public Services",
        Transportation => "Transportation",
        Recreation => "Recreation",
    }
}

labelled_enum! {
    /// Category of a community initiative
    InitiativeCategory {
        Environmental => "Environmental",
        Infrastructure => "Infrastructure",
        Education => "Education",
        PublicSafety => "Public Safety",
        ArtsCulture => "Arts & Culture",
        HealthWellness => "Health & Wellness",
        Technology => "Technology",
    }
}

impl InitiativeCategory {
    /// Initiative titles for this category
    #[must_use]
    pub fn titles(&self) -> &'static CategoryTable {
        match self {
            Self::Environmental => &ENVIRONMENTAL_TITLES,
            Self::Infrastructure => &INFRASTRUCTURE_TITLES,
            Self::Education => &EDUCATION_TITLES,
            Self::PublicSafety => &PUBLIC_SAFETY_TITLES,
            Self::ArtsCulture => &ARTS_TITLES,
            Self::HealthWellness => &HEALTH_TITLES,
            Self::Technology => &TECHNOLOGY_TITLES,
        }
    }

    /// Base descriptions for this category
    #[must_use]
    pub fn descriptions(&self) -> &'static CategoryTable {
        match self {
            Self::Environmental => &ENVIRONMENTAL_DESCRIPTIONS,
            Self::Infrastructure => &INFRASTRUCTURE_DESCRIPTIONS,
            Self::Education => &EDUCATION_DESCRIPTIONS,
            Self::PublicSafety => &PUBLIC_SAFETY_DESCRIPTIONS,
            Self::ArtsCulture => &ARTS_DESCRIPTIONS,
            Self::HealthWellness => &HEALTH_DESCRIPTIONS,
            Self::Technology => &TECHNOLOGY_DESCRIPTIONS,
        }
    }

    /// Organizations that run initiatives in this category
    #[must_use]
    pub fn organizers(&self) -> &'static CategoryTable {
        match self {
            Self::Environmental => &ENVIRONMENTAL_ORGANIZERS,
            Self::Infrastructure => &INFRASTRUCTURE_ORGANIZERS,
            Self::Education => &EDUCATION_ORGANIZERS,
            Self::PublicSafety => &PUBLIC_SAFETY_ORGANIZERS,
            Self::ArtsCulture => &ARTS_ORGANIZERS,
            Self::HealthWellness => &HEALTH_ORGANIZERS,
            Self::Technology => &TECHNOLOGY_ORGANIZERS,
        }
    }

    /// Budget floor before the seeded increment
    #[must_use]
    pub const fn budget_base(&self) -> u32 {
        match self {
            Self::Infrastructure => 5_000,
            Self::Technology => 3_000,
            _ => 1_000,
        }
    }
}

// Issues

pub static INFRASTRUCTURE_ISSUES: CategoryTable = CategoryTable::new(
    "infrastructure_issues",
    &[
        "Pothole",
        "Broken Sidewalk",
        "Street Light Out",
        "Water Leak",
        "Fallen Tree",
        "Damaged Road Sign",
        "Uneven Pavement",
    ],
);

pub static SAFETY_ISSUES: CategoryTable = CategoryTable::new(
    "safety_issues",
    &[
        "Dangerous Intersection",
        "Missing Street Sign",
        "Abandoned Vehicle",
        "Blocked Fire Hydrant",
        "Traffic Signal Malfunction",
        "Speeding Concern",
    ],
);

pub static ENVIRONMENT_ISSUES: CategoryTable = CategoryTable::new(
    "environment_issues",
    &[
        "Illegal Dumping",
        "Park Cleanup",
        "Graffiti",
        "Overgrown Vegetation",
        "Water Pollution",
        "Air Quality Concern",
    ],
);

pub static VANDALISM_ISSUES: CategoryTable = CategoryTable::new(
    "vandalism_issues",
    &[
        "Damaged Public Property",
        "Broken Bench",
        "Vandalized Bus Stop",
        "Defaced Sign",
        "Broken Window",
        "Fence Damage",
    ],
);

pub static STREETS: CategoryTable = CategoryTable::new(
    "streets",
    &[
        "Main St",
        "Oak Ave",
        "Park Rd",
        "Center Blvd",
        "Pine St",
        "Maple Dr",
        "Washington Ave",
        "Cedar Ln",
        "Elm St",
        "River Rd",
    ],
);

pub static ISSUE_CREATORS: CategoryTable = CategoryTable::new(
    "issue_creators",
    &[
        "Alex Smith",
        "Jamie Lee",
        "Taylor Jones",
        "Casey Kim",
        "Morgan Wells",
        "Jordan Rivera",
        "Quinn Patterson",
    ],
);

// Improvement zones

pub static ZONE_NAMES: CategoryTable = CategoryTable::new(
    "zone_names",
    &[
        "Downtown Corridor",
        "Waterfront District",
        "Historic Center",
        "University District",
        "Industrial Park",
        "Arts District",
        "Residential Zones",
        "Business District",
        "Transit Hub",
    ],
);

// Engagement

/// Fixed engagement areas; the two directional names are inserted by
/// [`engagement_areas`] at positions 2 and 3.
pub static ENGAGEMENT_AREAS: CategoryTable = CategoryTable::new(
    "engagement_areas",
    &[
        "Downtown",
        "City Center",
        "Central Park",
        "Riverside",
        "University Area",
        "Harbor District",
        "Tech Corridor",
    ],
);

/// Engagement areas around a coordinate, in table order
///
/// Includes a hemisphere-dependent district and side name.
#[must_use]
pub fn engagement_areas(coord: Coordinate) -> Vec<String> {
    let fixed = ENGAGEMENT_AREAS.entries();
    let district = if coord.lat > 0.0 { "North" } else { "South" };
    let side = if coord.lng > 0.0 { "East" } else { "West" };

    let mut areas = Vec::with_capacity(fixed.len() + 2);
    areas.extend(fixed[..2].iter().map(|s| (*s).to_string()));
    areas.push(format!("{district} District"));
    areas.push(format!("{side} Side"));
    areas.extend(fixed[2..].iter().map(|s| (*s).to_string()));
    areas
}

// Initiatives

pub static NEIGHBORHOODS: CategoryTable = CategoryTable::new(
    "neighborhoods",
    &[
        "Downtown",
        "Westside",
        "North District",
        "East Village",
        "South Bay",
        "Central Area",
        "Riverside",
        "University District",
    ],
);

static ENVIRONMENTAL_TITLES: CategoryTable = CategoryTable::new(
    "environmental_titles",
    &[
        "Community Garden Project",
        "River Cleanup Campaign",
        "Urban Forest Initiative",
        "Zero Waste Program",
        "Sustainable Energy Workshop",
    ],
);

static INFRASTRUCTURE_TITLES: CategoryTable = CategoryTable::new(
    "infrastructure_titles",
    &[
        "Safe Streets Initiative",
        "Public Transit Improvement",
        "Sidewalk Renovation",
        "Park Revitalization",
        "Accessible Spaces Project",
    ],
);

static EDUCATION_TITLES: CategoryTable = CategoryTable::new(
    "education_titles",
    &[
        "Youth Mentorship Program",
        "Digital Literacy Workshop",
        "STEM Education Initiative",
        "Community Library Expansion",
        "Adult Education Classes",
    ],
);

static PUBLIC_SAFETY_TITLES: CategoryTable = CategoryTable::new(
    "public_safety_titles",
    &[
        "Neighborhood Watch Enhancement",
        "Emergency Preparedness Training",
        "Traffic Safety Campaign",
        "Community Policing Partnership",
        "Street Lighting Improvement",
    ],
);

static ARTS_TITLES: CategoryTable = CategoryTable::new(
    "arts_titles",
    &[
        "Public Art Installation",
        "Cultural Heritage Festival",
        "Community Theater Project",
        "Music in the Parks Series",
        "Local Artists Showcase",
    ],
);

static HEALTH_TITLES: CategoryTable = CategoryTable::new(
    "health_titles",
    &[
        "Community Fitness Program",
        "Mental Health Awareness Campaign",
        "Senior Wellness Initiative",
        "Healthy Eating Workshop",
        "Addiction Support Network",
    ],
);

static TECHNOLOGY_TITLES: CategoryTable = CategoryTable::new(
    "technology_titles",
    &[
        "Digital Inclusion Project",
        "Smart City Pilot",
        "Public WiFi Expansion",
        "Coding Bootcamp for Youth",
        "Tech Literacy for Seniors",
    ],
);

static ENVIRONMENTAL_DESCRIPTIONS: CategoryTable = CategoryTable::new(
    "environmental_descriptions",
    &[
        "Improving local ecosystems through community action.",
        "Promoting sustainability and environmental awareness in our community.",
        "Addressing environmental challenges with community-based solutions.",
    ],
);

static INFRASTRUCTURE_DESCRIPTIONS: CategoryTable = CategoryTable::new(
    "infrastructure_descriptions",
    &[
        "Enhancing public spaces and infrastructure for all residents.",
        "Developing better infrastructure to support community growth.",
        "Implementing improvements to key community facilities and resources.",
    ],
);

static EDUCATION_DESCRIPTIONS: CategoryTable = CategoryTable::new(
    "education_descriptions",
    &[
        "Expanding educational opportunities for all community members.",
        "Fostering learning and skill development in the community.",
        "Promoting knowledge sharing and educational advancement locally.",
    ],
);

static PUBLIC_SAFETY_DESCRIPTIONS: CategoryTable = CategoryTable::new(
    "public_safety_descriptions",
    &[
        "Creating safer neighborhoods through community involvement.",
        "Enhancing safety measures and emergency preparedness.",
        "Implementing programs to improve community security and well-being.",
    ],
);

static ARTS_DESCRIPTIONS: CategoryTable = CategoryTable::new(
    "arts_descriptions",
    &[
        "Celebrating local artists and cultural diversity in our community.",
        "Promoting artistic expression and cultural heritage preservation.",
        "Enriching community life through arts and cultural programming.",
    ],
);

static HEALTH_DESCRIPTIONS: CategoryTable = CategoryTable::new(
    "health_descriptions",
    &[
        "Promoting healthier lifestyles and well-being for all residents.",
        "Addressing community health challenges through collaborative programs.",
        "Supporting physical and mental health initiatives locally.",
    ],
);

static TECHNOLOGY_DESCRIPTIONS: CategoryTable = CategoryTable::new(
    "technology_descriptions",
    &[
        "Bridging the digital divide and improving technological access.",
        "Implementing smart solutions for community challenges.",
        "Enhancing digital literacy and technological infrastructure.",
    ],
);

static ENVIRONMENTAL_ORGANIZERS: CategoryTable = CategoryTable::new(
    "environmental_organizers",
    &[
        "Green Future Alliance",
        "EcoAction Team",
        "Sustainable Community Network",
    ],
);

static INFRASTRUCTURE_ORGANIZERS: CategoryTable = CategoryTable::new(
    "infrastructure_organizers",
    &[
        "Urban Development Coalition",
        "City Improvement Task Force",
        "Better Spaces Initiative",
    ],
);

static EDUCATION_ORGANIZERS: CategoryTable = CategoryTable::new(
    "education_organizers",
    &[
        "Knowledge First Foundation",
        "Community Learning Alliance",
        "Education Access Network",
    ],
);

static PUBLIC_SAFETY_ORGANIZERS: CategoryTable = CategoryTable::new(
    "public_safety_organizers",
    &[
        "Safety First Coalition",
        "Community Protection Group",
        "Neighborhood Security Alliance",
    ],
);

static ARTS_ORGANIZERS: CategoryTable = CategoryTable::new(
    "arts_organizers",
    &[
        "Creative Community Collective",
        "Arts for All",
        "Cultural Heritage Foundation",
    ],
);

static HEALTH_ORGANIZERS: CategoryTable = CategoryTable::new(
    "health_organizers",
    &[
        "Healthy Community Coalition",
        "Wellness First",
        "Community Care Network",
    ],
);

static TECHNOLOGY_ORGANIZERS: CategoryTable = CategoryTable::new(
    "technology_organizers",
    &[
        "Digital Inclusion Project",
        "Tech for All",
        "Smart Community Initiative",
    ],
);

// Community statistics

pub static CONTRIBUTOR_NAMES: CategoryTable = CategoryTable::new(
    "contributor_names",
    &[
        "Alex Thompson",
        "Jamie Rivera",
        "Jordan Smith",
        "Taylor Morgan",
        "Casey Jones",
        "Riley Johnson",
        "Avery Williams",
        "Quinn Peters",
        "Morgan Bailey",
    ],
);

pub static ACTIVITY_KINDS: CategoryTable = CategoryTable::new(
    "activity_kinds",
    &[
        "issue_reported",
        "issue_resolved",
        "comment_added",
        "vote_cast",
        "new_member",
        "initiative_started",
    ],
);

#[cfg(test)]
mod tests {
    use super::*;

    static EMPTY: &[&str] = &[];

    #[test]
    fn try_new_rejects_empty() {
        let err = CategoryTable::try_new("empty", EMPTY).unwrap_err();
        assert!(matches!(err, SynthError::EmptyTable { table: "empty" }));
    }

    #[test]
    fn try_new_accepts_entries() {
        let table = CategoryTable::try_new("one", &["only"]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.pick(Seed::new(99.0)), "only");
    }

    #[test]
    #[should_panic(expected = "category table must not be empty")]
    fn const_new_panics_on_empty_at_runtime() {
        let _ = CategoryTable::new("empty", EMPTY);
    }

    #[test]
    fn pick_is_modulo() {
        assert_eq!(STREETS.pick(Seed::new(12.0)), "Park Rd");
    }

    #[test]
    fn pick_bucket_spreads_residue() {
        // 560 / (1000 / 10) = 5.6 -> Maple Dr
        assert_eq!(STREETS.pick_bucket(Seed::new(1560.0), 1000.0), "Maple Dr");
    }

    #[test]
    fn labels_round_trip_through_serde() {
        let json = serde_json::to_string(&InitiativeCategory::ArtsCulture).unwrap();
        assert_eq!(json, "\"Arts & Culture\"");
        let back: InitiativeCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, InitiativeCategory::ArtsCulture);
    }

    #[test]
    fn every_category_has_tables() {
        for category in IssueCategory::ALL {
            assert!(!category.issue_types().is_empty());
        }
        for category in InitiativeCategory::ALL {
            assert_eq!(category.titles().len(), 5);
            assert_eq!(category.descriptions().len(), 3);
            assert_eq!(category.organizers().len(), 3);
        }
    }

    #[test]
    fn budget_bases() {
        assert_eq!(InitiativeCategory::Infrastructure.budget_base(), 5_000);
        assert_eq!(InitiativeCategory::Technology.budget_base(), 3_000);
        assert_eq!(InitiativeCategory::Education.budget_base(), 1_000);
    }

    #[test]
    fn engagement_areas_follow_hemisphere() {
        let sf = engagement_areas(Coordinate::DEFAULT);
        assert_eq!(sf.len(), 9);
        assert_eq!(sf[2], "North District");
        assert_eq!(sf[3], "West Side");

        let sydney = engagement_areas(Coordinate::new(-33.86, 151.2));
        assert_eq!(sydney[2], "South District");
        assert_eq!(sydney[3], "East Side");
        assert_eq!(sydney[8], "Tech Corridor");
    }
}
