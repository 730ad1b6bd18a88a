//! Validation of raw model output into a tagged outcome.
//!
//! The validator is deliberately permissive about values: it checks shape,
//! not taxonomy membership. Callers that want a closed-set check can use
//! [`Taxonomy::contains_path`](crate::taxonomy::Taxonomy::contains_path).

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{NOT_SURE, RESPONSE_KEYS};

/// The three levels returned by the model.
///
/// Each level is whatever the model returned: a taxonomy value, the
/// `"Not sure"` sentinel, or empty when the key was missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "L1")]
    pub l1: String,
    #[serde(rename = "L2")]
    pub l2: String,
    #[serde(rename = "L3")]
    pub l3: String,
}

impl ClassificationResult {
    pub fn new(l1: impl Into<String>, l2: impl Into<String>, l3: impl Into<String>) -> Self {
        Self {
            l1: l1.into(),
            l2: l2.into(),
            l3: l3.into(),
        }
    }

    pub fn levels(&self) -> [&str; 3] {
        [&self.l1, &self.l2, &self.l3]
    }

    /// True if any level is `"Not sure"` (trimmed, case-insensitive).
    pub fn is_low_confidence(&self) -> bool {
        self.levels().iter().any(|level| is_not_sure(level))
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        let [l1, l2, l3] = RESPONSE_KEYS.map(|key| read_level(object, key));
        Self { l1, l2, l3 }
    }
}

/// Result of validating one raw response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ValidationOutcome {
    /// The response parsed as an object. `low_confidence` is advisory only.
    #[serde(rename_all = "camelCase")]
    Valid {
        result: ClassificationResult,
        low_confidence: bool,
    },
    /// The response was not a structured object. `raw` is the untouched input.
    Malformed { raw: String },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid { .. })
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            ValidationOutcome::Valid { result, .. } => Some(result),
            ValidationOutcome::Malformed { .. } => None,
        }
    }

    pub fn is_low_confidence(&self) -> bool {
        matches!(
            self,
            ValidationOutcome::Valid {
                low_confidence: true,
                ..
            }
        )
    }

    /// The raw text of a malformed response.
    pub fn malformed_raw(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Malformed { raw } => Some(raw),
            ValidationOutcome::Valid { .. } => None,
        }
    }
}

/// Parse and shape-check a raw model response.
///
/// Any JSON object is `Valid`: missing or non-string levels read as empty and
/// extra keys are ignored. Anything else is `Malformed`, carrying `raw`
/// byte-for-byte.
pub fn validate(raw: &str) -> ValidationOutcome {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(object)) => {
            let result = ClassificationResult::from_object(&object);
            let low_confidence = result.is_low_confidence();
            ValidationOutcome::Valid {
                result,
                low_confidence,
            }
        }
        Ok(other) => {
            debug!("Model response is JSON but not an object: {}", json_kind(&other));
            ValidationOutcome::Malformed {
                raw: raw.to_string(),
            }
        }
        Err(e) => {
            debug!("Model response is not valid JSON: {}", e);
            ValidationOutcome::Malformed {
                raw: raw.to_string(),
            }
        }
    }
}

/// Scalars are kept as text; null, arrays and objects read as empty.
fn read_level(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn is_not_sure(level: &str) -> bool {
    level.trim().eq_ignore_ascii_case(NOT_SURE)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_response_passes_values_through() {
        let outcome = validate(r#"{"L1":"Software","L2":"Subscriptions","L3":"SaaS"}"#);
        assert_eq!(
            outcome,
            ValidationOutcome::Valid {
                result: ClassificationResult::new("Software", "Subscriptions", "SaaS"),
                low_confidence: false,
            }
        );
    }

    #[test]
    fn not_sure_sets_low_confidence() {
        let outcome = validate(r#"{"L1":"Software","L2":"Subscriptions","L3":"Not sure"}"#);
        assert!(outcome.is_valid());
        assert!(outcome.is_low_confidence());
        assert_eq!(outcome.result().unwrap().l3, "Not sure");
    }

    #[test]
    fn not_sure_match_is_trimmed_and_case_insensitive() {
        let outcome = validate(r#"{"L1":"  NOT SURE ","L2":"x","L3":"y"}"#);
        assert!(outcome.is_low_confidence());
        let outcome = validate(r#"{"L1":"Not sure yet","L2":"x","L3":"y"}"#);
        assert!(!outcome.is_low_confidence());
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let outcome = validate(r#"{"L1":"Facilities"}"#);
        assert_eq!(
            outcome.result(),
            Some(&ClassificationResult::new("Facilities", "", ""))
        );
        assert_eq!(validate("{}").result(), Some(&ClassificationResult::default()));
    }

    #[test]
    fn extra_keys_are_ignored() {
        let outcome =
            validate(r#"{"L1":"Travel","L2":"Lodging","L3":"Hotels","reason":"hotel stay"}"#);
        assert_eq!(
            outcome.result(),
            Some(&ClassificationResult::new("Travel", "Lodging", "Hotels"))
        );
    }

    #[test]
    fn scalar_levels_are_stringified() {
        let outcome = validate(r#"{"L1":"Travel","L2":42,"L3":true}"#);
        assert_eq!(
            outcome.result(),
            Some(&ClassificationResult::new("Travel", "42", "true"))
        );
    }

    #[test]
    fn null_and_nested_levels_read_as_empty() {
        let outcome = validate(r#"{"L1":"Travel","L2":null,"L3":["Air"]}"#);
        assert_eq!(
            outcome.result(),
            Some(&ClassificationResult::new("Travel", "", ""))
        );
    }

    #[test]
    fn off_taxonomy_values_are_not_rejected() {
        let outcome = validate(r#"{"L1":"Snacks","L2":"Crisps","L3":"Salted"}"#);
        assert!(outcome.is_valid());
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert!(validate("\n  {\"L1\":\"a\",\"L2\":\"b\",\"L3\":\"c\"}  \n").is_valid());
    }

    #[test]
    fn plain_text_is_malformed() {
        assert_eq!(
            validate("not json at all"),
            ValidationOutcome::Malformed {
                raw: "not json at all".to_string()
            }
        );
    }

    #[test]
    fn non_object_json_is_malformed() {
        for raw in ["[1,2,3]", "\"Software\"", "null", "42"] {
            assert_eq!(validate(raw).malformed_raw(), Some(raw));
        }
    }

    #[test]
    fn fenced_json_is_malformed_and_preserved() {
        let raw = "```json\n{\"L1\":\"Software\"}\n```";
        assert_eq!(validate(raw).malformed_raw(), Some(raw));
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(validate("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"status": "malformed", "raw": "nope"}));

        let raw = r#"{"L1":"a","L2":"b","L3":"Not sure"}"#;
        let json = serde_json::to_value(validate(raw)).unwrap();
        assert_eq!(json["status"], "valid");
        assert_eq!(json["lowConfidence"], true);
        assert_eq!(json["result"]["L3"], "Not sure");
    }
}
