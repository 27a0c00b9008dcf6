//! Regex pattern profile over normalized phrases. Informational only.

use super::types::{Severity, SymptomDuration, SymptomProfile};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("static symptom pattern"))
        .collect()
}

static FEVER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\b(?:high|low|mild|moderate|severe)\s+(?:fever|temperature)\b",
        r"\b(?:fever|temperature)\s+(?:above|over|under)\s+\d+",
        r"\b(?:fever|temperature)\s+(?:for|lasting)\s+\d+\s+(?:hours|days|weeks)",
    ])
});

static PAIN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\b(?:sharp|dull|throbbing|aching|stabbing|burning)\s+pain\b",
        r"\bpain\s+(?:in|on|around)\s+(?:head|chest|abdomen|back|leg|arm)",
        r"\b(?:severe|moderate|mild)\s+pain\b",
    ])
});

static DURATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\b(?:for|lasting|since|over)\s+\d+\s+(?:hours?|days?|weeks?|months?)\b",
        r"\b(?:started|began|developed)\s+(?:yesterday|today|last\s+week)\b",
    ])
});

fn any_match(patterns: &[Regex], phrases: &[String]) -> bool {
    phrases
        .iter()
        .any(|phrase| patterns.iter().any(|re| re.is_match(phrase)))
}

/// Build the pattern profile. `pattern_matches` only carries keys that matched.
pub fn profile(phrases: &[String], duration: SymptomDuration, severity: Severity) -> SymptomProfile {
    let mut pattern_matches = BTreeMap::new();
    for (name, patterns) in [
        ("fever", &*FEVER_PATTERNS),
        ("pain", &*PAIN_PATTERNS),
        ("duration_mentioned", &*DURATION_PATTERNS),
    ] {
        if any_match(patterns, phrases) {
            pattern_matches.insert(name.to_string(), true);
        }
    }

    SymptomProfile {
        symptom_count: phrases.len(),
        duration_category: duration,
        severity_level: severity,
        phrases: phrases.to_vec(),
        pattern_matches,
    }
}
