//! Suggestion fetching with caching and stale-response filtering
//!
//! Every request is tagged with the input text it was made for. Answers are
//! cached under their own tag, but only an answer whose tag equals the input
//! text current at the moment it is picked up may change what is displayed.
//! Arrival order does not matter, so there is nothing to cancel.

use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::cache::{CacheEntry, SuggestionCache};
use crate::error::{AutosuggestError, Result};
use crate::normalize::classify;
use crate::provider::{FetchReply, FetchResponse, SuggestionProvider};
use crate::suggestion::SuggestionsCollection;

/// Outcome of asking for suggestions for a text
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Suggestions are available now (cached, or answered inline)
    Ready(Arc<SuggestionsCollection>),
    /// A fetch is in flight; keep showing what is already there
    Pending,
    /// The provider failed for this text
    Failed(String),
    /// Empty input; nothing to suggest
    Empty,
}

/// A relevant answer picked up by [`SuggestionEngine::poll`]
#[derive(Debug, Clone)]
pub enum Update {
    Ready(Arc<SuggestionsCollection>),
    Failed(String),
}

pub struct SuggestionEngine {
    provider: Box<dyn SuggestionProvider>,
    cache: SuggestionCache,
    renderer_available: bool,
    response_tx: Sender<FetchResponse>,
    response_rx: Receiver<FetchResponse>,
}

impl fmt::Debug for SuggestionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestionEngine")
            .field("cache", &self.cache)
            .field("renderer_available", &self.renderer_available)
            .finish_non_exhaustive()
    }
}

impl SuggestionEngine {
    /// `renderer_available` decides whether structured suggestions are
    /// accepted or rejected as a configuration error
    pub fn new(provider: Box<dyn SuggestionProvider>, renderer_available: bool) -> Self {
        let (response_tx, response_rx) = mpsc::channel();
        Self {
            provider,
            cache: SuggestionCache::new(),
            renderer_available,
            response_tx,
            response_rx,
        }
    }

    pub(crate) fn set_renderer_available(&mut self, available: bool) {
        self.renderer_available = available;
    }

    pub fn cache(&self) -> &SuggestionCache {
        &self.cache
    }

    /// Resolved suggestions for `text`, without fetching
    pub fn cached(&self, text: &str) -> Option<Arc<SuggestionsCollection>> {
        self.cache.ready(text)
    }

    /// Ask for suggestions for `text`
    ///
    /// Serves cache hits synchronously and fetches on a miss. Answers that a
    /// provider gives inline are picked up before returning.
    pub fn request(&mut self, text: &str) -> Result<Resolution> {
        if text.is_empty() {
            return Ok(Resolution::Empty);
        }

        match self.cache.get(text) {
            Some(CacheEntry::Ready(collection)) => {
                log::debug!("Cache hit for {:?}", text);
                return Ok(Resolution::Ready(Arc::clone(collection)));
            }
            Some(CacheEntry::Pending) => {
                log::debug!("Fetch for {:?} already in flight", text);
            }
            None => {
                log::debug!("Fetching suggestions for {:?}", text);
                self.cache.mark_pending(text);
                let reply = FetchReply::new(text, self.response_tx.clone());
                self.provider.fetch(text, reply);
            }
        }

        Ok(match self.poll(text)? {
            Some(Update::Ready(collection)) => Resolution::Ready(collection),
            Some(Update::Failed(message)) => Resolution::Failed(message),
            None => match self.cache.ready(text) {
                Some(collection) => Resolution::Ready(collection),
                None => Resolution::Pending,
            },
        })
    }

    /// Drain every answer that has arrived
    ///
    /// All successful answers are cached. Returns the latest answer for
    /// `current_text`, if one arrived; answers for other texts are stale and
    /// only logged.
    pub fn poll(&mut self, current_text: &str) -> Result<Option<Update>> {
        let mut latest = None;

        loop {
            let response = match self.response_rx.try_recv() {
                Ok(response) => response,
                Err(TryRecvError::Empty) => break,
                // We hold a sender ourselves, so this cannot happen
                Err(TryRecvError::Disconnected) => break,
            };

            let is_current = response.tag == current_text;
            if !is_current {
                log::debug!(
                    "Stale suggestions for {:?} (input is now {:?})",
                    response.tag,
                    current_text
                );
            }

            match self.ingest(response) {
                Ok(update) => {
                    if is_current {
                        latest = Some(update);
                    }
                }
                Err(e) if is_current => return Err(e),
                Err(e) => log::warn!("Dropping stale suggestions: {}", e),
            }
        }

        Ok(latest)
    }

    /// Classify and cache one answer
    fn ingest(&mut self, response: FetchResponse) -> Result<Update> {
        let FetchResponse { tag, result } = response;

        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                log::debug!("Provider failed for {:?}: {}", tag, e);
                self.cache.forget(&tag);
                return Ok(Update::Failed(e.to_string()));
            }
        };

        match classify(raw, self.renderer_available) {
            Ok(collection) => {
                let collection = Arc::new(collection);
                self.cache.put(&tag, Arc::clone(&collection));
                Ok(Update::Ready(collection))
            }
            Err(AutosuggestError::MalformedResult(message)) => {
                self.cache.forget(&tag);
                Ok(Update::Failed(message))
            }
            Err(e) => {
                self.cache.forget(&tag);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
