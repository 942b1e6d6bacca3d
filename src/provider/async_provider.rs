//! Provider backed by futures on a tokio runtime
//!
//! Each request spawns one task. Tasks may finish in any order.

use std::fmt;
use std::future::Future;

use tokio::runtime::Handle;

use super::{FetchReply, FetchResult, SuggestionProvider};

pub struct AsyncProvider<F> {
    handle: Handle,
    fetch: F,
}

impl<F, Fut> AsyncProvider<F>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = FetchResult> + Send + 'static,
{
    /// `fetch` builds the future for one input text; it runs on `handle`
    pub fn new(handle: Handle, fetch: F) -> Self {
        Self { handle, fetch }
    }
}

impl<F> fmt::Debug for AsyncProvider<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncProvider").finish_non_exhaustive()
    }
}

impl<F, Fut> SuggestionProvider for AsyncProvider<F>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = FetchResult> + Send + 'static,
{
    fn fetch(&self, text: &str, reply: FetchReply) {
        let future = (self.fetch)(text.to_string());
        self.handle.spawn(async move {
            reply.send(future.await);
        });
    }
}

#[cfg(test)]
#[path = "async_provider_tests.rs"]
mod async_provider_tests;
