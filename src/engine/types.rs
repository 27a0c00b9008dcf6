//! Request and result types for the analysis engine.

use crate::error::TriageError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Implements `as_str`, `Display`, `FromStr` and an `ALL` listing for a wire enum.
macro_rules! wire_enum {
    ($ty:ident, $label:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $wire),+
                }
            }

            /// Comma-separated list of accepted spellings
            pub fn choices() -> String {
                Self::ALL
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = TriageError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .find(|v| v.as_str() == s)
                    .copied()
                    .ok_or_else(|| {
                        TriageError::invalid(format!("{} must be one of: {}", $label, Self::choices()))
                    })
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

wire_enum!(Gender, "Gender", {
    Male => "male",
    Female => "female",
    Other => "other",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymptomDuration {
    #[serde(rename = "less_than_24h")]
    LessThan24Hours,
    #[serde(rename = "1_3_days")]
    OneToThreeDays,
    #[serde(rename = "4_7_days")]
    FourToSevenDays,
    #[serde(rename = "1_2_weeks")]
    OneToTwoWeeks,
    #[serde(rename = "more_than_2_weeks")]
    MoreThanTwoWeeks,
}

wire_enum!(SymptomDuration, "Duration", {
    LessThan24Hours => "less_than_24h",
    OneToThreeDays => "1_3_days",
    FourToSevenDays => "4_7_days",
    OneToTwoWeeks => "1_2_weeks",
    MoreThanTwoWeeks => "more_than_2_weeks",
});

impl SymptomDuration {
    /// Four days or longer
    pub fn is_prolonged(&self) -> bool {
        matches!(
            self,
            SymptomDuration::FourToSevenDays
                | SymptomDuration::OneToTwoWeeks
                | SymptomDuration::MoreThanTwoWeeks
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

wire_enum!(Severity, "Severity", {
    Mild => "mild",
    Moderate => "moderate",
    Severe => "severe",
});

impl Severity {
    /// Capitalized form used in summaries ("Mild")
    pub fn title(&self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Urgent,
    Critical,
}

wire_enum!(UrgencyLevel, "Urgency level", {
    Low => "low",
    Urgent => "urgent",
    Critical => "critical",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

wire_enum!(ConfidenceLevel, "Confidence level", {
    Low => "Low",
    Medium => "Medium",
    High => "High",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

wire_enum!(RiskLevel, "Risk level", {
    Low => "Low",
    Medium => "Medium",
    High => "High",
    Critical => "Critical",
});

/// One validated analysis call. Age and gender are carried through but only
/// age feeds the risk label; neither influences condition scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub age: u8,
    pub gender: Gender,
    pub symptoms: String,
    pub duration: SymptomDuration,
    pub severity: Severity,
}

/// Output of the emergency classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyAssessment {
    pub is_emergency: bool,
    pub urgency_level: UrgencyLevel,
    pub warning_signs: Vec<String>,
    pub recommendation: String,
}

/// Informational pattern profile of the normalized phrases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomProfile {
    pub symptom_count: usize,
    pub duration_category: SymptomDuration,
    pub severity_level: Severity,
    pub phrases: Vec<String>,
    pub pattern_matches: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub possible_conditions: Vec<String>,
    pub recommended_actions: Vec<String>,
    pub emergency_warnings: Vec<String>,
    pub self_care_tips: Vec<String>,
    pub when_to_seek_care: Vec<String>,
    pub confidence_level: ConfidenceLevel,
    pub risk_assessment: RiskLevel,
    pub follow_up_recommendations: Vec<String>,
    pub emergency_check: EmergencyAssessment,
    pub symptom_profile: SymptomProfile,
}

/// A condition search hit, shaped by the table it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConditionHit {
    Profile {
        name: String,
        symptoms: Vec<String>,
        severity: String,
    },
    Category {
        name: String,
        category: String,
        symptoms: Vec<String>,
    },
}

impl ConditionHit {
    pub fn name(&self) -> &str {
        match self {
            ConditionHit::Profile { name, .. } | ConditionHit::Category { name, .. } => name,
        }
    }
}
