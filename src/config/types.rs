// Configuration type definitions

use serde::Deserialize;

/// How the in-memory provider matches input against suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Prefix,
    Fuzzy,
}

/// Input field configuration section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    /// Text placed in the input when the session starts
    #[serde(default)]
    pub initial_value: String,
}

/// Suggestions configuration section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionsConfig {
    /// Bold the typed prefix of plain suggestions
    #[serde(default)]
    pub highlight_match: bool,
    #[serde(default)]
    pub match_mode: MatchMode,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
}
