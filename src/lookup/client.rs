//! Channel-owning side of the autocomplete client.
//!
//! `LookupClient` dispatches tagged requests to the worker and drains
//! completed responses without blocking. It deliberately does not decide
//! staleness: the engine compares each response tag against the live query,
//! because only the engine knows what the live query is at completion time.

use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};

use super::fetcher::PostcodeFetcher;
use super::worker::{LookupRequest, LookupResponse, spawn_worker};

pub struct LookupClient {
    /// Channel to send lookup requests to the worker
    request_tx: Option<Sender<LookupRequest>>,
    /// Channel to receive lookup responses from the worker
    response_rx: Option<Receiver<LookupResponse>>,
    /// Query of the most recently dispatched request, to suppress duplicate
    /// dispatches for an unchanged value
    last_dispatched: Option<String>,
}

impl LookupClient {
    /// Create a client backed by a fresh worker thread.
    pub fn spawn<F>(fetcher: F) -> Self
    where
        F: PostcodeFetcher,
    {
        let (request_tx, request_rx) = channel();
        let (response_tx, response_rx) = channel();

        spawn_worker(fetcher, request_rx, response_tx);

        Self::with_channels(request_tx, response_rx)
    }

    /// Create a client over externally owned channels. Tests hold the other
    /// ends and script responses directly.
    pub fn with_channels(
        request_tx: Sender<LookupRequest>,
        response_rx: Receiver<LookupResponse>,
    ) -> Self {
        Self {
            request_tx: Some(request_tx),
            response_rx: Some(response_rx),
            last_dispatched: None,
        }
    }

    /// Send a tagged lookup request. An in-flight request for an older query
    /// is not cancelled; its response will fail the tag comparison instead.
    pub fn dispatch(&mut self, query: &str) {
        self.last_dispatched = Some(query.to_string());

        let Some(ref tx) = self.request_tx else {
            log::error!("No lookup request channel available");
            return;
        };

        log::debug!("Dispatching lookup for {:?}", query);

        // If send fails, the worker died - degrade to "no suggestions"
        if tx
            .send(LookupRequest {
                query: query.to_string(),
            })
            .is_err()
        {
            log::error!("Lookup worker disconnected - send failed");
            self.request_tx = None;
            self.response_rx = None;
        }
    }

    /// Drain all completed responses (non-blocking).
    ///
    /// Call this in the main event loop; arrival order is preserved.
    pub fn drain(&mut self) -> Vec<LookupResponse> {
        let Some(ref rx) = self.response_rx else {
            return Vec::new();
        };

        let mut responses = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(response) => responses.push(response),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::error!("Lookup worker disconnected in drain");
                    self.request_tx = None;
                    self.response_rx = None;
                    break;
                }
            }
        }
        responses
    }

    /// Query of the most recent dispatch, if any.
    pub fn last_dispatched(&self) -> Option<&str> {
        self.last_dispatched.as_deref()
    }

    /// Forget the last dispatched query so the next `dispatch` goes out even
    /// for an unchanged value (used when coming back online).
    pub fn reset_dispatch(&mut self) {
        self.last_dispatched = None;
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
