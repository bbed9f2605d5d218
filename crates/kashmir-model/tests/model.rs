//! Tests for kashmir-model types.

use kashmir_model::{
    AttributeMatch, AttributeName, ConfidenceLevel, FrequencyHistogram, MatchResult, Schema,
};

fn sample_result() -> MatchResult {
    MatchResult::new(vec![
        AttributeMatch {
            target: AttributeName::new("name"),
            source: AttributeName::new("full_name"),
            score: 0.48,
            confidence: ConfidenceLevel::Low,
        },
        AttributeMatch {
            target: AttributeName::new("zip"),
            source: AttributeName::new("full_name"),
            score: 0.0,
            confidence: ConfidenceLevel::NoEvidence,
        },
    ])
}

#[test]
fn match_result_lookups() {
    let result = sample_result();
    assert_eq!(result.len(), 2);
    assert_eq!(
        result.source_for("name").map(AttributeName::as_str),
        Some("full_name")
    );
    assert!(result.get("city").is_none());
    assert!(result.get("name").is_some_and(AttributeMatch::has_evidence));
    assert!(!result.get("zip").is_some_and(AttributeMatch::has_evidence));
}

#[test]
fn match_result_allows_shared_sources() {
    let map = sample_result().as_map();
    assert_eq!(map.get("name").map(String::as_str), Some("full_name"));
    assert_eq!(map.get("zip").map(String::as_str), Some("full_name"));
}

#[test]
fn match_result_counts_levels() {
    let counts = sample_result().count_by_level();
    assert_eq!(counts.get(&ConfidenceLevel::Low), Some(&1));
    assert_eq!(counts.get(&ConfidenceLevel::NoEvidence), Some(&1));
    assert_eq!(counts.get(&ConfidenceLevel::High), None);
}

#[test]
fn match_result_serializes() {
    let json = serde_json::to_string(&sample_result()).expect("serialize result");
    assert!(json.contains(r#""target":"name""#));
    assert!(json.contains(r#""confidence":"no_evidence""#));
    let round: MatchResult = serde_json::from_str(&json).expect("deserialize result");
    assert_eq!(round, sample_result());
}

#[test]
fn schema_serializes_as_list() {
    let schema = Schema::extract("name, city");
    let json = serde_json::to_string(&schema).expect("serialize schema");
    assert_eq!(json, r#"["name","city"]"#);
}

#[test]
fn histogram_round_trips_through_json() {
    let histogram = FrequencyHistogram::from_text("Pedro");
    let json = serde_json::to_string(&histogram).expect("serialize histogram");
    let round: FrequencyHistogram = serde_json::from_str(&json).expect("deserialize histogram");
    assert_eq!(round, histogram);
}
