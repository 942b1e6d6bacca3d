use thiserror::Error;

/// Custom error types for autosuggest
#[derive(Debug, Error)]
pub enum AutosuggestError {
    #[error(
        "Structured suggestion received but no renderer is configured.\n\n\
         When a suggestion is a record, supply a SuggestionRenderer to specify how to render it."
    )]
    MissingRenderer,

    #[error("Invalid JSON input: {0}")]
    InvalidJson(String),

    #[error("Malformed suggestions result: {0}")]
    MalformedResult(String),

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = AutosuggestError> = std::result::Result<T, E>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
