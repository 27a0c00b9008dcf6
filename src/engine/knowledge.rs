//! Static medical knowledge base: body-system categories, condition profiles
//! and emergency keyword tiers. Built once, shared read-only.

use once_cell::sync::Lazy;
use std::sync::Arc;

/// A body region or system with its known conditions and symptom phrases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeCategory {
    pub name: &'static str,
    pub conditions: Vec<&'static str>,
    pub symptoms: Vec<&'static str>,
    pub severity_factors: Vec<&'static str>,
}

/// Per-condition guidance record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionProfile {
    pub name: &'static str,
    pub symptoms: Vec<&'static str>,
    pub typical_duration: &'static str,
    pub typical_severity: &'static str,
    pub treatments: Vec<&'static str>,
    pub when_to_seek_care: &'static str,
}

/// Emergency keyword tier, in descending severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Critical,
    Urgent,
    Warning,
}

impl Tier {
    /// Prefix used in warning-sign entries ("Critical: chest pain")
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Critical => "Critical",
            Tier::Urgent => "Urgent",
            Tier::Warning => "Warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyKeywordSet {
    pub critical: Vec<&'static str>,
    pub urgent: Vec<&'static str>,
    pub warning: Vec<&'static str>,
}

impl EmergencyKeywordSet {
    pub fn tier(&self, tier: Tier) -> &[&'static str] {
        match tier {
            Tier::Critical => &self.critical,
            Tier::Urgent => &self.urgent,
            Tier::Warning => &self.warning,
        }
    }
}

/// The complete immutable table set. Declaration order is significant:
/// it breaks ties in condition ranking and orders search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    pub categories: Vec<KnowledgeCategory>,
    pub profiles: Vec<ConditionProfile>,
    pub emergency: EmergencyKeywordSet,
}

static BUILTIN: Lazy<Arc<KnowledgeBase>> = Lazy::new(|| Arc::new(KnowledgeBase::builtin()));

impl KnowledgeBase {
    /// Shared handle to the built-in tables
    pub fn shared() -> Arc<KnowledgeBase> {
        BUILTIN.clone()
    }

    pub fn profile(&self, condition: &str) -> Option<&ConditionProfile> {
        self.profiles.iter().find(|p| p.name == condition)
    }

    pub fn builtin() -> Self {
        Self {
            categories: builtin_categories(),
            profiles: builtin_profiles(),
            emergency: builtin_emergency_keywords(),
        }
    }
}

fn category(
    name: &'static str,
    conditions: &[&'static str],
    symptoms: &[&'static str],
    severity_factors: &[&'static str],
) -> KnowledgeCategory {
    KnowledgeCategory {
        name,
        conditions: conditions.to_vec(),
        symptoms: symptoms.to_vec(),
        severity_factors: severity_factors.to_vec(),
    }
}

fn builtin_categories() -> Vec<KnowledgeCategory> {
    vec![
        category(
            "respiratory",
            &["Common Cold", "Flu", "Bronchitis", "Pneumonia", "Asthma"],
            &[
                "cough",
                "sore throat",
                "runny nose",
                "congestion",
                "shortness of breath",
                "wheezing",
            ],
            &["fever", "chest pain", "difficulty breathing"],
        ),
        category(
            "gastrointestinal",
            &[
                "Food Poisoning",
                "Gastritis",
                "Gastroenteritis",
                "Irritable Bowel Syndrome",
            ],
            &[
                "nausea",
                "vomiting",
                "diarrhea",
                "abdominal pain",
                "bloating",
                "loss of appetite",
            ],
            &["severe pain", "blood in stool", "dehydration"],
        ),
        category(
            "neurological",
            &["Migraine", "Tension Headache", "Cluster Headache", "Concussion"],
            &[
                "headache",
                "dizziness",
                "nausea",
                "sensitivity to light",
                "confusion",
            ],
            &["severe pain", "loss of consciousness", "numbness"],
        ),
        category(
            "cardiovascular",
            &["Hypertension", "Angina", "Heart Attack", "Arrhythmia"],
            &[
                "chest pain",
                "shortness of breath",
                "fatigue",
                "dizziness",
                "irregular heartbeat",
            ],
            &["severe chest pain", "pain radiating to arm", "sweating"],
        ),
        category(
            "musculoskeletal",
            &["Sprain", "Strain", "Arthritis", "Fracture", "Muscle Pain"],
            &[
                "pain",
                "swelling",
                "stiffness",
                "limited range of motion",
                "bruising",
            ],
            &["severe pain", "deformity", "inability to move"],
        ),
        category(
            "dermatological",
            &[
                "Rash",
                "Eczema",
                "Psoriasis",
                "Allergic Reaction",
                "Infection",
            ],
            &["rash", "itching", "redness", "swelling", "blisters"],
            &["severe itching", "fever", "spreading rash"],
        ),
    ]
}

fn builtin_profiles() -> Vec<ConditionProfile> {
    vec![
        ConditionProfile {
            name: "Common Cold",
            symptoms: vec!["runny nose", "congestion", "sneezing", "sore throat", "cough"],
            typical_duration: "3-7 days",
            typical_severity: "mild",
            treatments: vec!["rest", "fluids", "over-the-counter medications"],
            when_to_seek_care: "if symptoms persist beyond 10 days or worsen",
        },
        ConditionProfile {
            name: "Influenza",
            symptoms: vec![
                "fever",
                "body aches",
                "fatigue",
                "headache",
                "cough",
                "sore throat",
            ],
            typical_duration: "1-2 weeks",
            typical_severity: "moderate",
            treatments: vec!["rest", "fluids", "antiviral medications if prescribed"],
            when_to_seek_care: "if high fever, difficulty breathing, or severe symptoms",
        },
        ConditionProfile {
            name: "Migraine",
            symptoms: vec!["severe headache", "nausea", "sensitivity to light", "aura"],
            typical_duration: "4-72 hours",
            typical_severity: "moderate to severe",
            treatments: vec!["pain medications", "rest in dark room", "avoid triggers"],
            when_to_seek_care: "if headache is worst ever, with fever or confusion",
        },
        ConditionProfile {
            name: "Gastroenteritis",
            symptoms: vec!["nausea", "vomiting", "diarrhea", "abdominal cramps", "fever"],
            typical_duration: "1-3 days",
            typical_severity: "mild to moderate",
            treatments: vec!["rest", "clear fluids", "bland diet", "rehydration"],
            when_to_seek_care: "if severe dehydration, blood in stool, or persistent vomiting",
        },
    ]
}

fn builtin_emergency_keywords() -> EmergencyKeywordSet {
    EmergencyKeywordSet {
        critical: vec![
            "chest pain",
            "difficulty breathing",
            "severe bleeding",
            "loss of consciousness",
            "numbness",
            "paralysis",
            "severe head injury",
            "severe abdominal pain",
        ],
        urgent: vec![
            "high fever",
            "severe pain",
            "sudden weakness",
            "vision changes",
            "severe allergic reaction",
            "poisoning",
            "suicidal thoughts",
        ],
        warning: vec![
            "persistent vomiting",
            "severe dehydration",
            "unexplained weight loss",
            "persistent cough",
            "blood in stool",
            "severe headache",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn shared_tables_are_one_allocation() {
        let a = KnowledgeBase::shared();
        let b = KnowledgeBase::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn condition_names_are_unique_across_categories() {
        let kb = KnowledgeBase::builtin();
        let mut seen = HashSet::new();
        for cat in &kb.categories {
            for cond in &cat.conditions {
                assert!(seen.insert(*cond), "duplicate condition {cond}");
            }
        }
    }

    #[test]
    fn profile_lookup_is_exact() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.profile("Migraine").is_some());
        assert!(kb.profile("migraine").is_none());
        assert!(kb.profile("Flu").is_none());
    }

    #[test]
    fn tiers_are_nonempty() {
        let kb = KnowledgeBase::builtin();
        for tier in [Tier::Critical, Tier::Urgent, Tier::Warning] {
            assert!(!kb.emergency.tier(tier).is_empty());
        }
    }
}
