//! Recommendation synthesizer: turns ranked conditions, severity, duration and
//! the emergency verdict into the guidance bundle, summary and labels.

use super::knowledge::KnowledgeBase;
use super::types::{
    ConfidenceLevel, EmergencyAssessment, RiskLevel, Severity, SymptomDuration,
};
use crate::utils::OrderedSet;

pub const EMERGENCY_WARNING: &str =
    "⚠️ SEEK IMMEDIATE MEDICAL ATTENTION - These symptoms may require emergency care";
pub const EMERGENCY_ACTION: &str = "Call emergency services or go to nearest emergency room";
pub const SEVERE_ACTION: &str = "Consider seeking medical attention today";
pub const SCHEDULE_ACTION: &str = "Schedule an appointment with your healthcare provider";
pub const PERSISTENT_ACTION: &str = "Persistent symptoms may require medical evaluation";
pub const MONITOR_FOLLOW_UP: &str = "Monitor symptoms and seek care if they worsen";

pub const GENERAL_SELF_CARE: [&str; 4] = [
    "Get adequate rest",
    "Stay hydrated",
    "Monitor symptoms for changes",
    "Avoid known triggers or irritants",
];

pub const EMERGENCY_SUMMARY: &str = "🚨 EMERGENCY: Immediate medical attention required";
pub const NO_CONDITION_SUMMARY: &str = "Symptoms analyzed but no specific conditions identified. Consider consulting a healthcare provider.";

/// De-duplicated recommendation lists, first occurrence wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recommendations {
    pub actions: Vec<String>,
    pub emergency_warnings: Vec<String>,
    pub self_care: Vec<String>,
    pub when_to_seek_care: Vec<String>,
    pub follow_up: Vec<String>,
}

pub fn recommend(
    kb: &KnowledgeBase,
    conditions: &[String],
    severity: Severity,
    duration: SymptomDuration,
    emergency: &EmergencyAssessment,
) -> Recommendations {
    let mut actions = OrderedSet::new();
    let mut warnings = OrderedSet::new();
    let mut self_care = OrderedSet::new();
    let mut seek_care = OrderedSet::new();
    let mut follow_up = OrderedSet::new();

    if emergency.is_emergency {
        warnings.insert(EMERGENCY_WARNING);
        actions.insert(EMERGENCY_ACTION);
    }

    for profile in conditions.iter().filter_map(|c| kb.profile(c)) {
        self_care.extend(profile.treatments.iter().copied());
        seek_care.insert(profile.when_to_seek_care);
    }

    match severity {
        Severity::Severe => {
            actions.insert(SEVERE_ACTION);
        }
        Severity::Moderate if duration.is_prolonged() => {
            actions.insert(SCHEDULE_ACTION);
        }
        _ => {}
    }

    if duration == SymptomDuration::MoreThanTwoWeeks {
        actions.insert(PERSISTENT_ACTION);
    }

    self_care.extend(GENERAL_SELF_CARE);

    follow_up.insert(MONITOR_FOLLOW_UP);
    if let Some(top) = conditions.first() {
        follow_up.insert(format!("Follow up with healthcare provider about {top}"));
    }

    Recommendations {
        actions: actions.into_vec(),
        emergency_warnings: warnings.into_vec(),
        self_care: self_care.into_vec(),
        when_to_seek_care: seek_care.into_vec(),
        follow_up: follow_up.into_vec(),
    }
}

/// "A", "A and B", "A, B and C"
pub fn join_conditions(conditions: &[String]) -> String {
    match conditions {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

pub fn summary(conditions: &[String], severity: Severity, emergency: &EmergencyAssessment) -> String {
    if emergency.is_emergency {
        return EMERGENCY_SUMMARY.to_string();
    }
    if conditions.is_empty() {
        return NO_CONDITION_SUMMARY.to_string();
    }
    format!(
        "Analysis suggests possible {} with {} symptoms",
        join_conditions(conditions),
        severity.title()
    )
}

/// Confidence from description length (whitespace words) and how many
/// conditions were found; fewer candidates over more text is stronger.
pub fn confidence(conditions: &[String], raw_symptoms: &str) -> ConfidenceLevel {
    if conditions.is_empty() {
        return ConfidenceLevel::Low;
    }
    let words = raw_symptoms.split_whitespace().count();
    let count = conditions.len();
    if words > 20 && count <= 2 {
        ConfidenceLevel::High
    } else if words > 10 && count <= 3 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

pub fn risk(age: u8, severity: Severity, emergency: &EmergencyAssessment) -> RiskLevel {
    if emergency.is_emergency {
        return RiskLevel::Critical;
    }

    let mut points = 0u8;
    if age < 5 || age > 65 {
        points += 1;
    }
    points += match severity {
        Severity::Severe => 2,
        Severity::Moderate => 1,
        Severity::Mild => 0,
    };

    match points {
        3.. => RiskLevel::High,
        1.. => RiskLevel::Medium,
        _ => RiskLevel::Low,
    }
}
