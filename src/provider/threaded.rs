//! Background worker provider
//!
//! Runs a blocking fetch function on a dedicated thread so slow sources
//! (disk, network, subprocess) never block the event loop. Requests are fed
//! through a channel; answers go back through each request's `FetchReply`.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use super::{FetchReply, FetchResult, SuggestionProvider};

/// Request messages sent to the worker thread
#[derive(Debug)]
enum WorkerRequest {
    Fetch { text: String, reply: FetchReply },
}

pub struct ThreadedProvider {
    request_tx: Sender<WorkerRequest>,
}

impl ThreadedProvider {
    /// Spawn the worker thread
    ///
    /// The worker lives until the provider is dropped.
    pub fn spawn<F>(fetch: F) -> Self
    where
        F: Fn(&str) -> FetchResult + Send + 'static,
    {
        Self::spawn_with_latency(fetch, Duration::ZERO)
    }

    /// Spawn the worker thread, delaying every answer by `latency`
    pub fn spawn_with_latency<F>(fetch: F, latency: Duration) -> Self
    where
        F: Fn(&str) -> FetchResult + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel();

        std::thread::spawn(move || {
            worker_loop(fetch, latency, request_rx);
        });

        Self { request_tx }
    }
}

impl fmt::Debug for ThreadedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadedProvider").finish_non_exhaustive()
    }
}

/// Main worker loop - processes requests until the channel is closed
fn worker_loop<F>(fetch: F, latency: Duration, request_rx: Receiver<WorkerRequest>)
where
    F: Fn(&str) -> FetchResult,
{
    while let Ok(request) = request_rx.recv() {
        match request {
            WorkerRequest::Fetch { text, reply } => {
                if !latency.is_zero() {
                    std::thread::sleep(latency);
                }
                reply.send(fetch(&text));
            }
        }
    }

    log::debug!("Suggestion worker thread shutting down");
}

impl SuggestionProvider for ThreadedProvider {
    fn fetch(&self, text: &str, reply: FetchReply) {
        let request = WorkerRequest::Fetch {
            text: text.to_string(),
            reply,
        };
        if let Err(mpsc::SendError(WorkerRequest::Fetch { text, reply })) =
            self.request_tx.send(request)
        {
            reply.reject(format!("suggestion worker stopped before fetching {:?}", text));
        }
    }
}

#[cfg(test)]
#[path = "threaded_tests.rs"]
mod threaded_tests;
