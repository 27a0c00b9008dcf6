//! Caller-side validation of analysis payloads. Every field problem is
//! collected so clients can fix a form in one round trip.

use crate::deserializers::{coerce_int, text_of};
use crate::engine::types::{AnalysisRequest, Gender, Severity, SymptomDuration};
use crate::error::{Result, TriageError};
use serde_json::{Map, Value};
use std::str::FromStr;

pub const REQUIRED_FIELDS: [&str; 5] = ["age", "gender", "symptoms", "duration", "severity"];

pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 120;
pub const MIN_SYMPTOM_CHARS: usize = 10;
pub const MAX_SYMPTOM_CHARS: usize = 1000;
pub const MIN_QUERY_CHARS: usize = 2;

/// Parse a raw request body into a JSON object, rejecting empty payloads
pub fn parse_body(body: &[u8]) -> Result<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Ok(map),
        _ => Err(TriageError::NoData),
    }
}

/// Validate an analysis payload and build the typed request.
pub fn validate_analysis(data: &Map<String, Value>) -> Result<AnalysisRequest> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|f| !data.contains_key(**f))
        .map(|f| f.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TriageError::MissingFields { fields: missing });
    }

    let mut errors = Vec::new();

    let age = match coerce_int(&data["age"]) {
        Some(age) if (MIN_AGE..=MAX_AGE).contains(&age) => u8::try_from(age).ok(),
        Some(_) => {
            errors.push(format!("Age must be between {MIN_AGE} and {MAX_AGE}"));
            None
        }
        None => {
            errors.push("Age must be a valid number".to_string());
            None
        }
    };

    let gender = parse_enum::<Gender>(&data["gender"], &mut errors);

    let symptoms = text_of(&data["symptoms"]);
    let length = symptoms.trim().chars().count();
    if length < MIN_SYMPTOM_CHARS {
        errors.push(format!(
            "Symptoms description must be at least {MIN_SYMPTOM_CHARS} characters long"
        ));
    }
    if length > MAX_SYMPTOM_CHARS {
        errors.push(format!(
            "Symptoms description must be less than {MAX_SYMPTOM_CHARS} characters"
        ));
    }

    let duration = parse_enum::<SymptomDuration>(&data["duration"], &mut errors);
    let severity = parse_enum::<Severity>(&data["severity"], &mut errors);

    match (age, gender, duration, severity) {
        (Some(age), Some(gender), Some(duration), Some(severity)) if errors.is_empty() => {
            Ok(AnalysisRequest {
                age,
                gender,
                symptoms,
                duration,
                severity,
            })
        }
        _ => Err(TriageError::Validation { errors }),
    }
}

/// Trimmed search query of at least [`MIN_QUERY_CHARS`] characters
pub fn validate_query(raw: Option<&str>) -> Result<String> {
    let query = raw.unwrap_or_default().trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Err(TriageError::InvalidQuery {
            message: format!("Search query must be at least {MIN_QUERY_CHARS} characters long"),
        });
    }
    Ok(query.to_string())
}

fn parse_enum<T>(value: &Value, errors: &mut Vec<String>) -> Option<T>
where
    T: FromStr<Err = TriageError>,
{
    match text_of(value).parse::<T>() {
        Ok(v) => Some(v),
        Err(TriageError::Validation { errors: mut e }) => {
            errors.append(&mut e);
            None
        }
        Err(other) => {
            errors.push(other.to_string());
            None
        }
    }
}
