//! Symptom analysis engine: normalization, emergency classification,
//! condition scoring and recommendation synthesis over a static knowledge base.
//! Deterministic and free of I/O; safe to share across request tasks.

pub mod emergency;
pub mod knowledge;
pub mod normalizer;
pub mod patterns;
pub mod recommend;
pub mod scorer;
pub mod types;

use crate::error::{Result, TriageError};
use knowledge::KnowledgeBase;
use std::collections::HashSet;
use std::sync::Arc;
use types::{AnalysisRequest, AnalysisResult, ConditionHit, EmergencyAssessment};

/// Maximum number of condition search results
pub const MAX_SEARCH_RESULTS: usize = 10;

pub const GENERAL_HEALTH_TIPS: [&str; 7] = [
    "Maintain a healthy diet and regular exercise routine",
    "Get adequate sleep (7-9 hours per night)",
    "Stay hydrated by drinking plenty of water",
    "Practice good hygiene and handwashing",
    "Schedule regular check-ups with your healthcare provider",
    "Avoid smoking and limit alcohol consumption",
    "Manage stress through relaxation techniques",
];

/// Engine facade. Cloning shares the underlying tables.
#[derive(Debug, Clone)]
pub struct SymptomChecker {
    kb: Arc<KnowledgeBase>,
}

impl Default for SymptomChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl SymptomChecker {
    pub fn new() -> Self {
        let checker = Self::with_knowledge(KnowledgeBase::shared());
        tracing::info!(
            categories = checker.kb.categories.len(),
            profiles = checker.kb.profiles.len(),
            "SymptomChecker initialized with medical knowledge base"
        );
        checker
    }

    pub fn with_knowledge(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    /// Run the full pipeline for one validated request
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        tracing::info!(
            age = request.age,
            gender = request.gender.as_str(),
            "Analyzing symptoms"
        );
        tracing::debug!(
            preview = %request.symptoms.chars().take(100).collect::<String>(),
            "symptom text"
        );

        let prepared = normalizer::prepare(&request.symptoms);
        let phrases = normalizer::normalize(&prepared);
        let emergency_check = emergency::classify(&self.kb.emergency, &request.symptoms);
        let symptom_profile = patterns::profile(&phrases, request.duration, request.severity);

        // age and gender are not weighted into scoring
        let ranked = scorer::rank(&self.kb, &phrases);
        for c in &ranked {
            tracing::debug!(
                condition = %c.name,
                category = %c.category,
                score = c.score,
                "ranked condition"
            );
        }
        let possible_conditions: Vec<String> = ranked.into_iter().map(|c| c.name).collect();

        let recs = recommend::recommend(
            &self.kb,
            &possible_conditions,
            request.severity,
            request.duration,
            &emergency_check,
        );

        let result = AnalysisResult {
            summary: recommend::summary(&possible_conditions, request.severity, &emergency_check),
            confidence_level: recommend::confidence(&possible_conditions, &request.symptoms),
            risk_assessment: recommend::risk(request.age, request.severity, &emergency_check),
            possible_conditions,
            recommended_actions: recs.actions,
            emergency_warnings: recs.emergency_warnings,
            self_care_tips: recs.self_care,
            when_to_seek_care: recs.when_to_seek_care,
            follow_up_recommendations: recs.follow_up,
            emergency_check,
            symptom_profile,
        };

        ensure_invariants(&result)?;

        tracing::info!(
            conditions = result.possible_conditions.len(),
            risk = result.risk_assessment.as_str(),
            "Symptom analysis completed"
        );
        Ok(result)
    }

    pub fn check_emergency(&self, symptoms: &str) -> EmergencyAssessment {
        emergency::classify(&self.kb.emergency, symptoms)
    }

    /// All known symptom phrases across categories, sorted and unique
    pub fn list_common_symptoms(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .kb
            .categories
            .iter()
            .flat_map(|c| c.symptoms.iter().map(|s| s.to_string()))
            .collect();
        all.sort();
        all.dedup();
        all
    }

    /// Case-insensitive substring search over condition names. Profile-table
    /// hits come before category-table hits.
    pub fn search_conditions(&self, query: &str) -> Vec<ConditionHit> {
        let lowered = query.to_lowercase();
        let query = lowered.as_str();

        let profile_hits = self
            .kb
            .profiles
            .iter()
            .filter(|p| p.name.to_lowercase().contains(query))
            .map(|p| ConditionHit::Profile {
                name: p.name.to_string(),
                symptoms: p.symptoms.iter().map(|s| s.to_string()).collect(),
                severity: p.typical_severity.to_string(),
            });

        let category_hits = self.kb.categories.iter().flat_map(|cat| {
            cat.conditions
                .iter()
                .filter(move |c| c.to_lowercase().contains(query))
                .map(move |c| ConditionHit::Category {
                    name: c.to_string(),
                    category: cat.name.to_string(),
                    symptoms: cat.symptoms.iter().map(|s| s.to_string()).collect(),
                })
        });

        profile_hits
            .chain(category_hits)
            .take(MAX_SEARCH_RESULTS)
            .collect()
    }

    /// General tips, prefixed by the condition's treatments when it has a profile
    pub fn health_tips(&self, condition: Option<&str>) -> Vec<String> {
        let mut tips: Vec<String> = condition
            .and_then(|c| self.kb.profile(c))
            .map(|p| p.treatments.iter().map(|t| t.to_string()).collect())
            .unwrap_or_default();
        tips.extend(GENERAL_HEALTH_TIPS.iter().map(|t| t.to_string()));
        tips
    }
}

fn ensure_invariants(result: &AnalysisResult) -> Result<()> {
    if result.possible_conditions.len() > scorer::MAX_CONDITIONS {
        return Err(TriageError::Internal {
            message: format!(
                "ranked {} conditions, cap is {}",
                result.possible_conditions.len(),
                scorer::MAX_CONDITIONS
            ),
        });
    }

    let lists: [(&str, &Vec<String>); 6] = [
        ("possible_conditions", &result.possible_conditions),
        ("recommended_actions", &result.recommended_actions),
        ("emergency_warnings", &result.emergency_warnings),
        ("self_care_tips", &result.self_care_tips),
        ("when_to_seek_care", &result.when_to_seek_care),
        ("follow_up_recommendations", &result.follow_up_recommendations),
    ];
    for (name, list) in lists {
        let mut seen = HashSet::new();
        if let Some(dup) = list.iter().find(|item| !seen.insert(item.as_str())) {
            return Err(TriageError::Internal {
                message: format!("duplicate entry '{dup}' in {name}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Gender, Severity, SymptomDuration};

    fn request(symptoms: &str, severity: Severity) -> AnalysisRequest {
        AnalysisRequest {
            age: 30,
            gender: Gender::Female,
            symptoms: symptoms.to_string(),
            duration: SymptomDuration::OneToThreeDays,
            severity,
        }
    }

    #[test]
    fn analyze_runs_every_stage() {
        let checker = SymptomChecker::new();
        let result = checker
            .analyze(&request("throbbing headache with nausea and sharp pain", Severity::Moderate))
            .unwrap();
        assert!(!result.possible_conditions.is_empty());
        assert!(!result.symptom_profile.phrases.is_empty());
        assert!(result.self_care_tips.len() >= 4);
        assert!(!result.emergency_check.is_emergency);
    }

    #[test]
    fn no_conditions_is_a_valid_low_confidence_result() {
        let checker = SymptomChecker::new();
        let result = checker
            .analyze(&request("feeling generally off lately", Severity::Mild))
            .unwrap();
        assert!(result.possible_conditions.is_empty());
        assert_eq!(result.confidence_level, types::ConfidenceLevel::Low);
        assert_eq!(result.summary, recommend::NO_CONDITION_SUMMARY);
    }

    #[test]
    fn fullwidth_emergency_text_is_still_critical() {
        let checker = SymptomChecker::default();
        let result = checker
            .analyze(&request(
                "ＣＨＥＳＴ ＰＡＩＮ and ＤＩＦＦＩＣＵＬＴＹ ＢＲＥＡＴＨＩＮＧ",
                Severity::Severe,
            ))
            .unwrap();
        assert_eq!(
            result.symptom_profile.phrases,
            vec!["chest", "pain difficulty breathing"]
        );
        assert!(result.emergency_check.is_emergency);
        assert_eq!(result.risk_assessment, types::RiskLevel::Critical);
    }

    #[test]
    fn common_symptoms_sorted_unique() {
        let list = SymptomChecker::new().list_common_symptoms();
        let mut sorted = list.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(list, sorted);
        assert!(list.contains(&"shortness of breath".to_string()));
    }

    #[test]
    fn search_lists_profile_hits_first() {
        let hits = SymptomChecker::new().search_conditions("migraine");
        assert_eq!(hits.len(), 2);
        assert!(matches!(hits[0], ConditionHit::Profile { .. }));
        assert!(matches!(hits[1], ConditionHit::Category { .. }));
    }

    #[test]
    fn search_is_capped() {
        // well over ten condition names contain an 'a'
        assert_eq!(SymptomChecker::new().search_conditions("a").len(), MAX_SEARCH_RESULTS);
    }

    #[test]
    fn tips_prefix_condition_treatments() {
        let checker = SymptomChecker::new();
        let tips = checker.health_tips(Some("Migraine"));
        assert_eq!(tips[0], "pain medications");
        assert_eq!(tips.len(), 3 + GENERAL_HEALTH_TIPS.len());

        assert_eq!(checker.health_tips(Some("Unknown")).len(), GENERAL_HEALTH_TIPS.len());
        assert_eq!(checker.health_tips(None)[0], GENERAL_HEALTH_TIPS[0]);
    }

    #[test]
    fn invariant_check_rejects_duplicates() {
        let checker = SymptomChecker::new();
        let mut result = checker
            .analyze(&request("runny nose and congestion all week", Severity::Mild))
            .unwrap();
        result.recommended_actions = vec!["rest".into(), "rest".into()];
        assert!(matches!(
            ensure_invariants(&result),
            Err(TriageError::Internal { .. })
        ));
    }
}
