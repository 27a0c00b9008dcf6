//! Condition scorer: ranks knowledge-base conditions against normalized phrases.

use super::knowledge::KnowledgeBase;

/// Maximum number of ranked conditions returned
pub const MAX_CONDITIONS: usize = 5;

/// Minimum score for a condition to be reported
pub const MIN_SCORE: f64 = 1.0;

const EXACT_MATCH: f64 = 1.0;
const PARTIAL_MATCH: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCondition {
    pub name: String,
    pub category: String,
    pub score: f64,
}

/// Score of one phrase against a category's known symptoms. Each known phrase
/// that contains, or is contained in, the input adds a partial match, so one
/// input phrase can score several times.
pub fn phrase_score(phrase: &str, known: &[&str]) -> f64 {
    let mut score = 0.0;
    if known.contains(&phrase) {
        score += EXACT_MATCH;
    }
    for k in known {
        if k.contains(phrase) || phrase.contains(k) {
            score += PARTIAL_MATCH;
        }
    }
    score
}

/// Rank every (category, condition) pair. Ties keep declaration order.
/// Age and gender are accepted by the engine but not weighted here.
pub fn rank(kb: &KnowledgeBase, phrases: &[String]) -> Vec<ScoredCondition> {
    let mut scored = Vec::new();
    for category in &kb.categories {
        let category_score: f64 = phrases
            .iter()
            .map(|p| phrase_score(p, &category.symptoms))
            .sum();
        if category_score <= 0.0 {
            continue;
        }
        for condition in &category.conditions {
            scored.push(ScoredCondition {
                name: condition.to_string(),
                category: category.name.to_string(),
                score: category_score,
            });
        }
    }

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.retain(|c| c.score >= MIN_SCORE);
    scored.truncate(MAX_CONDITIONS);
    scored
}
