//! Initiative analysis points

use civic_seed::{char_code_sum, shuffled, Seed};

use crate::types::{Initiative, InitiativeStatus};

/// Three to five analysis sentences about `initiative`
///
/// Eight candidate sentences are filled from the initiative's fields,
/// permuted by a seeded shuffle keyed on the char-code sum of its id,
/// and truncated to `3 + title.len() % 3` entries.
#[must_use]
pub fn initiative_insights(initiative: &Initiative) -> Vec<String> {
    let seed = Seed::new(char_code_sum(&initiative.id));
    let take = 3 + initiative.title.len() % 3;
    shuffled(&candidates(initiative), seed)
        .into_iter()
        .take(take)
        .collect()
}

fn candidates(initiative: &Initiative) -> [String; 8] {
    let category = initiative.category.label();
    let topic = category.to_lowercase();
    let impact = initiative.impact_score;

    let priorities = if impact > 75 { "top" } else { "important" };
    let interest = if initiative.participants > 50 { "strong" } else { "growing" };
    let scale = if initiative.budget > 5_000 { "substantial and appropriate" } else { "appropriate" };
    let outcome = match initiative.status {
        InitiativeStatus::Completed => "the completed work has shown",
        InitiativeStatus::Planning | InitiativeStatus::InProgress => "we anticipate",
    };
    let record = if impact > 70 { "highly effective" } else { "meaningful" };
    let potential = if impact > 65 { "high" } else { "growing" };
    let phase = match initiative.status {
        InitiativeStatus::Planning => "Early community involvement",
        InitiativeStatus::InProgress => "Continued stakeholder engagement",
        InitiativeStatus::Completed => "Post-implementation assessment",
    };

    [
        format!(
            "This {category} initiative aligns with {priorities} community priorities based on recent civic engagement data."
        ),
        format!(
            "With {} participants, this project demonstrates {interest} community interest in {topic} issues.",
            initiative.participants
        ),
        format!(
            "The budget of ${} is {scale} for the scope and potential impact of this initiative.",
            group_thousands(initiative.budget)
        ),
        format!(
            "Based on similar initiatives, {outcome} positive outcomes in {} key community metrics.",
            impact.div_ceil(20)
        ),
        format!(
            "{} has a track record of {record} community programs, suggesting strong implementation capabilities.",
            initiative.organizer
        ),
        format!(
            "The initiative's location in {} represents an area with {potential} community engagement potential.",
            initiative.neighborhood()
        ),
        format!("{phase} will be crucial for long-term sustainability."),
        format!(
            "Comparable {topic} initiatives have shown a return on community investment of {:.1}%.",
            f64::from(impact) * 1.2
        ),
    ]
}

/// `12345` -> `"12,345"`
fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::tables::InitiativeCategory;

    fn initiative(title: &str, status: InitiativeStatus) -> Initiative {
        Initiative {
            id: "initiative-2-417".to_string(),
            title: title.to_string(),
            description: String::new(),
            status,
            category: InitiativeCategory::ArtsCulture,
            participants: 64,
            budget: 10_250,
            start_date: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
            end_date: None,
            impact_score: 80,
            location: "South Bay - 37.775, -122.419".to_string(),
            organizer: "Arts for All".to_string(),
        }
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(10_250), "10,250");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn count_follows_title_length() {
        // "Public Art Installation" has 23 characters: 3 + 23 % 3 = 5
        let points = initiative_insights(&initiative("Public Art Installation", InitiativeStatus::Planning));
        assert_eq!(points.len(), 5);
        // "Smart City Pilot" has 16 characters: 3 + 16 % 3 = 4
        let points = initiative_insights(&initiative("Smart City Pilot", InitiativeStatus::Planning));
        assert_eq!(points.len(), 4);
    }

    #[test]
    fn deterministic_and_distinct() {
        let subject = initiative("Local Artists Showcase", InitiativeStatus::Completed);
        let a = initiative_insights(&subject);
        assert_eq!(a, initiative_insights(&subject));
        let mut sorted = a.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), a.len());
    }

    #[test]
    fn candidates_fill_fields() {
        let all = candidates(&initiative("Community Theater Project", InitiativeStatus::InProgress));
        assert!(all[0].starts_with("This Arts & Culture initiative aligns with top"));
        assert!(all[1].contains("strong community interest in arts & culture issues"));
        assert!(all[2].contains("$10,250 is substantial and appropriate"));
        assert!(all[3].contains("we anticipate positive outcomes in 4 key"));
        assert!(all[5].contains("location in South Bay represents"));
        assert!(all[6].starts_with("Continued stakeholder engagement"));
        assert!(all[7].ends_with("investment of 96.0%."));
    }
}
