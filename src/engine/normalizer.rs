//! Text normalizer: raw symptom sentence -> candidate symptom phrases.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("static word regex"));

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Substrings that mark a token as the start of a new symptom phrase
const SYMPTOM_INDICATORS: &[&str] = &[
    "pain",
    "ache",
    "fever",
    "cough",
    "sneeze",
    "rash",
    "swell",
    "nausea",
    "vomit",
    "diarrhea",
    "headache",
    "dizziness",
    "fatigue",
    "weakness",
];

/// Compatibility-normalize and lower-case raw input before tokenizing
pub fn prepare(raw: &str) -> String {
    raw.nfkc().collect::<String>().to_lowercase()
}

/// Word tokens with stop words and tokens of two characters or fewer removed
pub fn clean_tokens(text: &str) -> Vec<&str> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|w| w.chars().count() > 2)
        .filter(|w| !STOP_WORDS.contains(&w.to_lowercase().as_str()))
        .collect()
}

pub fn is_symptom_trigger(token: &str) -> bool {
    let lower = token.to_lowercase();
    SYMPTOM_INDICATORS.iter().any(|ind| lower.contains(ind))
}

/// Group cleaned tokens into phrases. Each trigger token opens a new phrase and
/// following non-trigger tokens join it. Without any trigger the cleaned
/// tokens come back one phrase per token.
pub fn normalize(text: &str) -> Vec<String> {
    let tokens = clean_tokens(text);
    if !tokens.iter().any(|t| is_symptom_trigger(t)) {
        return tokens.into_iter().map(str::to_string).collect();
    }

    let mut phrases = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for token in tokens {
        if is_symptom_trigger(token) && !current.is_empty() {
            phrases.push(current.join(" "));
            current.clear();
        }
        current.push(token);
    }
    if !current.is_empty() {
        phrases.push(current.join(" "));
    }
    phrases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_stop_words_and_short_tokens() {
        assert_eq!(
            clean_tokens("pain in my back for 3 days"),
            vec!["pain", "back", "days"]
        );
    }

    #[test]
    fn triggers_open_new_phrases() {
        assert_eq!(
            normalize("bad headache with nausea since monday"),
            vec!["bad", "headache", "nausea since monday"]
        );
    }

    #[test]
    fn leading_non_trigger_tokens_form_their_own_phrase() {
        assert_eq!(
            normalize("throbbing headache"),
            vec!["throbbing", "headache"]
        );
    }

    #[test]
    fn no_trigger_returns_tokens_individually() {
        assert_eq!(
            normalize("runny nose congestion sore throat sneezing for 3 days"),
            vec!["runny", "nose", "congestion", "sore", "throat", "sneezing", "days"]
        );
    }

    #[test]
    fn trigger_matching_is_substring_based() {
        assert!(is_symptom_trigger("stomachache"));
        assert!(is_symptom_trigger("swelling"));
        assert!(is_symptom_trigger("Coughing"));
        assert!(!is_symptom_trigger("sneezing"));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(normalize("").is_empty());
        assert!(normalize("a an to").is_empty());
    }

    #[test]
    fn is_restartable() {
        let text = "fever and cough with chills";
        assert_eq!(normalize(text), normalize(text));
        assert_eq!(normalize(text), vec!["fever", "cough chills"]);
    }

    #[test]
    fn prepare_folds_compatibility_forms() {
        assert_eq!(prepare("ＦＥＶＥＲ"), "fever");
    }
}
