//! In-memory provider over a fixed dataset
//!
//! Answers inline, so sessions backed by it behave synchronously. Matching
//! is a case-insensitive prefix test by default, or skim-style fuzzy matching.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde_json::{Value, json};

use super::{FetchReply, SuggestionProvider};
use crate::config::MatchMode;
use crate::error::{AutosuggestError, Result};
use crate::normalize::classify;
use crate::suggestion::{Suggestion, SuggestionsCollection};

#[derive(Debug, Clone)]
pub struct StaticProvider {
    dataset: SuggestionsCollection,
    match_mode: MatchMode,
}

impl StaticProvider {
    /// Build from a raw JSON dataset shaped like a provider answer
    pub fn from_value(raw: Value) -> Result<Self> {
        if !raw.is_array() {
            return Err(AutosuggestError::MalformedResult(
                "dataset must be a JSON array of suggestions or sections".to_string(),
            ));
        }
        // Records are fine here; the session decides whether it can render them
        let dataset = classify(raw, true)?;

        Ok(Self {
            dataset,
            match_mode: MatchMode::Prefix,
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(content)
            .map_err(|e| AutosuggestError::InvalidJson(e.to_string()))?;
        Self::from_value(raw)
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    /// Whether any suggestion is a record, which needs a custom renderer
    pub fn has_structured(&self) -> bool {
        self.dataset.iter_items().any(Suggestion::is_structured)
    }

    /// Filtered raw answer for `text`
    ///
    /// Sections left without matches are dropped.
    pub fn lookup(&self, text: &str) -> Value {
        match &self.dataset {
            SuggestionsCollection::Flat(items) => {
                Value::Array(self.filter(items.iter().map(|s| s.value()), text))
            }
            SuggestionsCollection::Sectioned(sections) => Value::Array(
                sections
                    .iter()
                    .filter_map(|section| {
                        let items = self.filter(section.items.iter().map(|s| s.value()), text);
                        if items.is_empty() {
                            return None;
                        }
                        Some(match &section.name {
                            Some(name) => json!({ "name": name, "items": items }),
                            None => json!({ "items": items }),
                        })
                    })
                    .collect(),
            ),
        }
    }

    fn filter<'a>(&self, items: impl Iterator<Item = &'a Value>, text: &str) -> Vec<Value> {
        match self.match_mode {
            MatchMode::Prefix => {
                let needle = text.to_lowercase();
                items
                    .filter(|item| {
                        searchable_fields(item)
                            .iter()
                            .any(|field| field.to_lowercase().starts_with(&needle))
                    })
                    .cloned()
                    .collect()
            }
            MatchMode::Fuzzy => {
                let matcher = SkimMatcherV2::default();
                let mut scored: Vec<(i64, &Value)> = items
                    .filter_map(|item| {
                        matcher
                            .fuzzy_match(&searchable_fields(item).join(" "), text)
                            .map(|score| (score, item))
                    })
                    .collect();
                // Stable sort keeps dataset order among equal scores
                scored.sort_by(|a, b| b.0.cmp(&a.0));
                scored.into_iter().map(|(_, item)| item.clone()).collect()
            }
        }
    }
}

/// Texts a suggestion is matched against; records match on their string fields
fn searchable_fields(item: &Value) -> Vec<String> {
    match item {
        Value::String(s) => vec![s.clone()],
        Value::Object(record) => record
            .values()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        other => vec![other.to_string()],
    }
}

impl SuggestionProvider for StaticProvider {
    fn fetch(&self, text: &str, reply: FetchReply) {
        reply.resolve(self.lookup(text));
    }
}

#[cfg(test)]
#[path = "static_provider_tests.rs"]
mod static_provider_tests;
