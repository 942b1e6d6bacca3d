//! Raw result classification
//!
//! Providers answer with loosely shaped JSON. The shape is inspected exactly
//! once here and carried as a typed [`SuggestionsCollection`] afterwards.

use serde_json::{Map, Value};

use crate::error::{AutosuggestError, Result};
use crate::suggestion::{Section, Suggestion, SuggestionsCollection};

/// Field names that hold a section's items
const ITEMS_FIELDS: [&str; 2] = ["items", "suggestions"];
/// Field names that hold a section's display name
const NAME_FIELDS: [&str; 2] = ["name", "sectionName"];

fn section_items(record: &Map<String, Value>) -> Option<&Vec<Value>> {
    ITEMS_FIELDS
        .iter()
        .find_map(|field| record.get(*field).and_then(Value::as_array))
}

fn section_name(record: &Map<String, Value>) -> Option<String> {
    NAME_FIELDS
        .iter()
        .find_map(|field| record.get(*field).and_then(Value::as_str))
        .map(str::to_string)
}

/// True iff `raw` is a non-empty array of records that all expose an items
/// array (which may itself be empty)
pub fn is_multiple_sections(raw: &Value) -> bool {
    match raw {
        Value::Array(elements) if !elements.is_empty() => elements.iter().all(|element| {
            element
                .as_object()
                .is_some_and(|record| section_items(record).is_some())
        }),
        _ => false,
    }
}

/// True iff the raw result holds at least one suggestion
pub fn suggestions_exist(raw: &Value) -> bool {
    if is_multiple_sections(raw) {
        return raw.as_array().is_some_and(|sections| {
            sections.iter().any(|section| {
                section
                    .as_object()
                    .and_then(section_items)
                    .is_some_and(|items| !items.is_empty())
            })
        });
    }

    raw.as_array().is_some_and(|items| !items.is_empty())
}

/// Turn a raw provider result into a typed collection
///
/// Fails with [`AutosuggestError::MissingRenderer`] as soon as a structured
/// item shows up and `renderer_available` is false, so a misconfigured
/// session errors on the first fetch instead of displaying blank rows.
pub fn classify(raw: Value, renderer_available: bool) -> Result<SuggestionsCollection> {
    let collection = if is_multiple_sections(&raw) {
        SuggestionsCollection::Sectioned(into_sections(raw))
    } else {
        match raw {
            Value::Null => SuggestionsCollection::Flat(Vec::new()),
            Value::Array(items) => {
                SuggestionsCollection::Flat(items.into_iter().map(Suggestion::new).collect())
            }
            other => {
                return Err(AutosuggestError::MalformedResult(format!(
                    "expected an array of suggestions, got {}",
                    json_kind(&other)
                )));
            }
        }
    };

    if !renderer_available && collection.iter_items().any(Suggestion::is_structured) {
        return Err(AutosuggestError::MissingRenderer);
    }

    Ok(collection)
}

fn into_sections(raw: Value) -> Vec<Section> {
    let Value::Array(elements) = raw else {
        return Vec::new();
    };

    elements
        .into_iter()
        .filter_map(|element| match element {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .map(|record| {
            let name = section_name(&record);
            let items = section_items(&record)
                .map(|items| items.iter().cloned().map(Suggestion::new).collect())
                .unwrap_or_default();
            Section { name, items }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod normalize_tests;
