//! Tests for StaticProvider

use super::*;
use crate::normalize::is_multiple_sections;
use std::sync::mpsc;

fn suburbs() -> StaticProvider {
    StaticProvider::from_value(json!(["Cheltenham", "Mill Park", "Mordialloc", "Nunawading"]))
        .unwrap()
}

#[test]
fn test_prefix_matches() {
    assert_eq!(suburbs().lookup("m"), json!(["Mill Park", "Mordialloc"]));
}

#[test]
fn test_prefix_is_case_insensitive() {
    assert_eq!(suburbs().lookup("NUNA"), json!(["Nunawading"]));
}

#[test]
fn test_no_matches() {
    assert_eq!(suburbs().lookup("a"), json!([]));
}

#[test]
fn test_prefix_is_not_substring() {
    assert_eq!(suburbs().lookup("park"), json!([]));
}

#[test]
fn test_sections_filtered_and_empty_ones_dropped() {
    let provider = StaticProvider::from_value(json!([
        {"suggestions": ["Forest Hill", "Flinders Street"]},
        {"sectionName": "Second section", "suggestions": ["Hobart", "Adelaide"]},
        {"sectionName": "Third section", "suggestions": ["Frankston"]}
    ]))
    .unwrap();

    let raw = provider.lookup("f");
    assert!(is_multiple_sections(&raw));
    assert_eq!(
        raw,
        json!([
            {"items": ["Forest Hill", "Flinders Street"]},
            {"name": "Third section", "items": ["Frankston"]}
        ])
    );
}

#[test]
fn test_records_match_any_string_field() {
    let provider = StaticProvider::from_value(json!([
        {"suburb": "Mill Park", "postcode": "3083"},
        {"suburb": "Nunawading", "postcode": "3131"}
    ]))
    .unwrap();

    assert_eq!(
        provider.lookup("mill"),
        json!([{"suburb": "Mill Park", "postcode": "3083"}])
    );
    assert_eq!(
        provider.lookup("313"),
        json!([{"suburb": "Nunawading", "postcode": "3131"}])
    );
}

#[test]
fn test_fuzzy_matches_scattered_letters() {
    let provider = suburbs().with_match_mode(MatchMode::Fuzzy);
    let raw = provider.lookup("mlpk");
    assert_eq!(raw, json!(["Mill Park"]));
}

#[test]
fn test_fuzzy_no_match() {
    let provider = suburbs().with_match_mode(MatchMode::Fuzzy);
    assert_eq!(provider.lookup("xyz"), json!([]));
}

#[test]
fn test_from_json_str() {
    let provider = StaticProvider::from_json_str(r#"["Mill Park", "Mordialloc"]"#).unwrap();
    assert_eq!(provider.lookup("mo"), json!(["Mordialloc"]));
}

#[test]
fn test_from_json_str_invalid() {
    let result = StaticProvider::from_json_str("[\"Mill Park\",");
    assert!(matches!(result, Err(AutosuggestError::InvalidJson(_))));
}

#[test]
fn test_dataset_must_be_array() {
    let result = StaticProvider::from_value(json!({"items": []}));
    assert!(matches!(result, Err(AutosuggestError::MalformedResult(_))));
}

#[test]
fn test_fetch_answers_inline() {
    let (tx, rx) = mpsc::channel();
    suburbs().fetch("m", FetchReply::new("m", tx));

    let response = rx.try_recv().unwrap();
    assert_eq!(response.tag, "m");
    assert_eq!(response.result.unwrap(), json!(["Mill Park", "Mordialloc"]));
}

#[test]
fn test_has_structured() {
    assert!(!suburbs().has_structured());

    let records = StaticProvider::from_value(json!([{"suburb": "Mill Park"}])).unwrap();
    assert!(records.has_structured());
}
