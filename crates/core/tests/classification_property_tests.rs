//! Property-based tests for taxonomy parsing, prompt building and response
//! validation.

use po_classifier_core::{
    build_prompt, validate, ClassificationRequest, ClassificationResult, Taxonomy, TaxonomyRow,
    ValidationOutcome,
};
use proptest::prelude::*;
use serde_json::json;

// =============================================================================
// Generators
// =============================================================================

/// A taxonomy level: words without the delimiter or surrounding whitespace.
fn arb_level() -> impl Strategy<Value = String> {
    "[A-Za-z&][A-Za-z& ]{0,18}[A-Za-z]"
}

fn arb_rows() -> impl Strategy<Value = Vec<(String, String, String)>> {
    prop::collection::vec((arb_level(), arb_level(), arb_level()), 0..25)
}

fn table_text(rows: &[(String, String, String)]) -> String {
    let mut text = String::from("L1 | L2 | L3\n---|---|---\n");
    for (l1, l2, l3) in rows {
        text.push_str(&format!("{} | {} | {}\n", l1, l2, l3));
    }
    text
}

/// Any string value, including the sentinel in odd casing.
fn arb_value() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        Just("Not sure".to_string()),
        Just("  NOT SURE ".to_string()),
        Just(String::new()),
    ]
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn taxonomy_parse_is_idempotent(rows in arb_rows()) {
        let text = table_text(&rows);
        let first = Taxonomy::parse(&text).unwrap();
        let second = Taxonomy::parse(&text).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), rows.len());
        for (row, (l1, l2, l3)) in first.rows().iter().zip(&rows) {
            prop_assert_eq!(row.l1(), l1.as_str());
            prop_assert_eq!(row.l2(), l2.as_str());
            prop_assert_eq!(row.l3(), l3.as_str());
        }
    }

    #[test]
    fn taxonomy_render_round_trips(rows in arb_rows()) {
        let taxonomy = Taxonomy::parse(&table_text(&rows)).unwrap();
        prop_assert_eq!(Taxonomy::parse(&taxonomy.render()).unwrap(), taxonomy);
    }

    #[test]
    fn prompt_is_pure_and_verbatim(
        description in "[^\\s][\\s\\S]{0,200}",
        supplier in "[A-Za-z ]{0,30}",
    ) {
        let taxonomy = Taxonomy::builtin();
        let request = ClassificationRequest::new(&description, Some(supplier.as_str())).unwrap();
        let first = build_prompt(&request, taxonomy);
        let second = build_prompt(&request, taxonomy);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.contains(request.description()));
        prop_assert!(first.contains(request.supplier()));
    }

    #[test]
    fn exact_objects_validate_unmodified(l1 in arb_value(), l2 in arb_value(), l3 in arb_value()) {
        let raw = json!({"L1": l1, "L2": l2, "L3": l3}).to_string();
        let expected = ClassificationResult::new(l1.clone(), l2.clone(), l3.clone());
        let low = [&l1, &l2, &l3]
            .iter()
            .any(|v| v.trim().eq_ignore_ascii_case("not sure"));
        prop_assert_eq!(
            validate(&raw),
            ValidationOutcome::Valid { result: expected, low_confidence: low }
        );
    }

    #[test]
    fn missing_keys_are_never_malformed(
        l1 in proptest::option::of(arb_value()),
        l2 in proptest::option::of(arb_value()),
        l3 in proptest::option::of(arb_value()),
    ) {
        let mut object = serde_json::Map::new();
        for (key, value) in [("L1", &l1), ("L2", &l2), ("L3", &l3)] {
            if let Some(value) = value {
                object.insert(key.to_string(), json!(value));
            }
        }
        let raw = serde_json::Value::Object(object).to_string();
        let outcome = validate(&raw);
        let result = outcome.result().cloned();
        prop_assert!(result.is_some());
        let result = result.unwrap();
        prop_assert_eq!(result.l1, l1.unwrap_or_default());
        prop_assert_eq!(result.l2, l2.unwrap_or_default());
        prop_assert_eq!(result.l3, l3.unwrap_or_default());
    }

    #[test]
    fn unparseable_text_is_preserved(raw in "[A-Za-z][A-Za-z0-9 ,.!?]{0,80}") {
        // Plain prose starting with a letter is never a JSON object.
        prop_assume!(serde_json::from_str::<serde_json::Value>(&raw).is_err());
        prop_assert_eq!(
            validate(&raw),
            ValidationOutcome::Malformed { raw: raw.clone() }
        );
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn scenario_single_row_table() {
    let taxonomy =
        Taxonomy::parse("L1 | L2 | L3\n---|---|---\nSoftware | Subscriptions | SaaS").unwrap();
    assert_eq!(
        taxonomy.rows(),
        &[TaxonomyRow::new("Software", "Subscriptions", "SaaS").unwrap()]
    );
}

#[test]
fn scenario_docusign_prompt() {
    let taxonomy = Taxonomy::builtin();
    let request = ClassificationRequest::new(
        "DocuSign Inc - eSignature Enterprise Pro Subscription",
        Some("DocuSign Inc"),
    )
    .unwrap();
    let prompt = build_prompt(&request, taxonomy);
    assert!(prompt.contains("DocuSign Inc - eSignature Enterprise Pro Subscription"));
    assert!(prompt.contains("DocuSign Inc"));
    assert!(prompt.contains(&taxonomy.render()));
}

#[test]
fn scenario_low_confidence() {
    let outcome = validate(r#"{"L1":"Software","L2":"Subscriptions","L3":"Not sure"}"#);
    assert!(outcome.is_valid());
    assert!(outcome.is_low_confidence());
}

#[test]
fn scenario_malformed() {
    assert_eq!(
        validate("not json at all"),
        ValidationOutcome::Malformed {
            raw: "not json at all".to_string()
        }
    );
}

#[test]
fn scenario_empty_description() {
    assert_eq!(
        ClassificationRequest::new("   ", Some("Dell")),
        Err(po_classifier_core::Error::EmptyInput)
    );
}
