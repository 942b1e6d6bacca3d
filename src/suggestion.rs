//! Suggestion values and the collections they arrive in
//!
//! A provider answers with a raw JSON value; `normalize::classify` turns it
//! into a [`SuggestionsCollection`] once, and everything downstream works
//! with the typed shape.

use std::fmt;

use serde_json::Value;

/// A single suggestion, kept as the provider produced it
///
/// Strings, numbers and booleans are plain and directly displayable.
/// Objects and arrays are structured records that need a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion(Value);

impl Suggestion {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn is_structured(&self) -> bool {
        matches!(self.0, Value::Object(_) | Value::Array(_))
    }

    /// Text form of the suggestion
    ///
    /// Plain strings are returned as-is, other scalars in their JSON form.
    /// Records fall back to compact JSON; renderers usually override this.
    pub fn text(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl From<&str> for Suggestion {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_string()))
    }
}

impl From<String> for Suggestion {
    fn from(s: String) -> Self {
        Self(Value::String(s))
    }
}

impl From<Value> for Suggestion {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// A named (or anonymous) group of suggestions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Section {
    pub name: Option<String>,
    pub items: Vec<Suggestion>,
}

impl Section {
    pub fn new(name: Option<&str>, items: Vec<Suggestion>) -> Self {
        Self {
            name: name.map(str::to_string),
            items,
        }
    }
}

/// Position of a suggestion: section index plus index within that section
///
/// Flat collections use section 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    pub section: usize,
    pub item: usize,
}

impl Address {
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.section, self.item)
    }
}

/// Suggestions for one input text, either flat or split into sections
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionsCollection {
    Flat(Vec<Suggestion>),
    Sectioned(Vec<Section>),
}

impl Default for SuggestionsCollection {
    fn default() -> Self {
        SuggestionsCollection::Flat(Vec::new())
    }
}

impl SuggestionsCollection {
    pub fn is_sectioned(&self) -> bool {
        matches!(self, SuggestionsCollection::Sectioned(_))
    }

    /// True when at least one item exists anywhere in the collection
    pub fn has_suggestions(&self) -> bool {
        match self {
            SuggestionsCollection::Flat(items) => !items.is_empty(),
            SuggestionsCollection::Sectioned(sections) => {
                sections.iter().any(|s| !s.items.is_empty())
            }
        }
    }

    /// Total number of items across sections
    pub fn len(&self) -> usize {
        match self {
            SuggestionsCollection::Flat(items) => items.len(),
            SuggestionsCollection::Sectioned(sections) => {
                sections.iter().map(|s| s.items.len()).sum()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.has_suggestions()
    }

    pub(crate) fn section_count(&self) -> usize {
        match self {
            SuggestionsCollection::Flat(_) => 1,
            SuggestionsCollection::Sectioned(sections) => sections.len(),
        }
    }

    pub(crate) fn section_items(&self, section: usize) -> &[Suggestion] {
        match self {
            SuggestionsCollection::Flat(items) if section == 0 => items.as_slice(),
            SuggestionsCollection::Flat(_) => &[],
            SuggestionsCollection::Sectioned(sections) => {
                sections
                    .get(section)
                    .map(|s| s.items.as_slice())
                    .unwrap_or(&[])
            }
        }
    }

    pub(crate) fn section_name(&self, section: usize) -> Option<&str> {
        match self {
            SuggestionsCollection::Flat(_) => None,
            SuggestionsCollection::Sectioned(sections) => {
                sections.get(section).and_then(|s| s.name.as_deref())
            }
        }
    }

    pub fn get(&self, address: Address) -> Option<&Suggestion> {
        self.section_items(address.section).get(address.item)
    }

    pub(crate) fn iter_items(&self) -> impl Iterator<Item = &Suggestion> {
        (0..self.section_count()).flat_map(move |s| self.section_items(s).iter())
    }
}

#[cfg(test)]
#[path = "suggestion_tests.rs"]
mod suggestion_tests;
