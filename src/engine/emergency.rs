//! Emergency classifier. Scans the whole folded text, not normalized phrases,
//! so multi-word keywords such as "chest pain" survive intact.

use super::knowledge::{EmergencyKeywordSet, Tier};
use super::normalizer;
use super::types::{EmergencyAssessment, UrgencyLevel};

pub const CRITICAL_RECOMMENDATION: &str =
    "Call emergency services immediately or go to nearest emergency room";
pub const URGENT_RECOMMENDATION: &str = "Seek medical attention within 24 hours";
pub const LOW_RECOMMENDATION: &str = "Monitor symptoms and seek care if they worsen";

fn matches_in<'a>(
    keywords: &'a EmergencyKeywordSet,
    tier: Tier,
    text: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    keywords
        .tier(tier)
        .iter()
        .copied()
        .filter(move |kw| text.contains(kw))
}

/// Classify urgency. Critical matches short-circuit the urgent tier; warning
/// matches are always collected and never change the urgency level.
pub fn classify(keywords: &EmergencyKeywordSet, raw: &str) -> EmergencyAssessment {
    // same NFKC + lowercase folding the phrase normalizer sees
    let text = normalizer::prepare(raw);
    let mut warning_signs = Vec::new();
    let mut urgency_level = UrgencyLevel::Low;

    for kw in matches_in(keywords, Tier::Critical, &text) {
        urgency_level = UrgencyLevel::Critical;
        warning_signs.push(format!("{}: {}", Tier::Critical.label(), kw));
    }

    if urgency_level == UrgencyLevel::Low {
        for kw in matches_in(keywords, Tier::Urgent, &text) {
            urgency_level = UrgencyLevel::Urgent;
            warning_signs.push(format!("{}: {}", Tier::Urgent.label(), kw));
        }
    }

    for kw in matches_in(keywords, Tier::Warning, &text) {
        warning_signs.push(format!("{}: {}", Tier::Warning.label(), kw));
    }

    let recommendation = match urgency_level {
        UrgencyLevel::Critical => CRITICAL_RECOMMENDATION,
        UrgencyLevel::Urgent => URGENT_RECOMMENDATION,
        UrgencyLevel::Low => LOW_RECOMMENDATION,
    };

    if urgency_level != UrgencyLevel::Low {
        tracing::warn!(
            urgency = urgency_level.as_str(),
            signs = warning_signs.len(),
            "emergency keywords detected"
        );
    }

    EmergencyAssessment {
        is_emergency: urgency_level != UrgencyLevel::Low,
        urgency_level,
        warning_signs,
        recommendation: recommendation.to_string(),
    }
}
