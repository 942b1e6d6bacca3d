//! Suggestion provider abstraction
//!
//! A provider receives the input text and a single-use [`FetchReply`]. It may
//! answer inline or from another thread/task; the engine picks the answer up
//! from a channel and decides whether it is still relevant.

use std::sync::mpsc::Sender;

use serde_json::Value;
use thiserror::Error;

mod async_provider;
mod static_provider;
mod threaded;

pub use async_provider::AsyncProvider;
pub use static_provider::StaticProvider;
pub use threaded::ThreadedProvider;

/// Failure reported by a suggestion provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Raw provider answer: a JSON array of suggestions or of sections
pub type FetchResult = Result<Value, ProviderError>;

/// A provider answer tagged with the input text it was requested for
#[derive(Debug)]
pub struct FetchResponse {
    pub tag: String,
    pub result: FetchResult,
}

/// Single-use reply handle handed to a provider with each request
///
/// `send` consumes the handle, so a provider cannot answer twice.
#[derive(Debug)]
pub struct FetchReply {
    tag: String,
    response_tx: Sender<FetchResponse>,
}

impl FetchReply {
    pub(crate) fn new(tag: &str, response_tx: Sender<FetchResponse>) -> Self {
        Self {
            tag: tag.to_string(),
            response_tx,
        }
    }

    /// Input text this reply answers
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn send(self, result: FetchResult) {
        let tag = self.tag;
        if self
            .response_tx
            .send(FetchResponse {
                tag: tag.clone(),
                result,
            })
            .is_err()
        {
            // Session is gone; nobody is waiting for this answer
            log::debug!("Dropping reply for {:?}: session closed", tag);
        }
    }

    pub fn resolve(self, raw: Value) {
        self.send(Ok(raw));
    }

    pub fn reject(self, message: impl Into<String>) {
        self.send(Err(ProviderError::new(message)));
    }
}

/// Source of suggestions for an input text
pub trait SuggestionProvider {
    /// Start fetching suggestions for `text` and answer through `reply`
    ///
    /// Answering at most once is enforced by `FetchReply`. Dropping the reply
    /// without answering leaves the request pending forever.
    fn fetch(&self, text: &str, reply: FetchReply);
}

impl<F> SuggestionProvider for F
where
    F: Fn(&str, FetchReply),
{
    fn fetch(&self, text: &str, reply: FetchReply) {
        self(text, reply)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
