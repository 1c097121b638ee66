//! Lookup Worker Thread
//!
//! Owns the fetcher and a current-thread tokio runtime. Receives tagged
//! lookup requests over a channel, performs the HTTP round trip, and sends
//! the tagged outcome back to the main thread.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, Sender};

use super::types::{LookupOutcome, LookupRequest, LookupResponse};
use crate::lookup::fetcher::{FetchError, PostcodeFetcher};

/// Spawn the lookup worker thread
///
/// Creates a background thread that:
/// 1. Listens for lookup requests on the request channel
/// 2. Fetches completions from the lookup service
/// 3. Sends tagged responses back via the response channel
///
/// Includes panic handling to prevent TUI corruption.
pub fn spawn_worker<F>(
    fetcher: F,
    request_rx: Receiver<LookupRequest>,
    response_tx: Sender<LookupResponse>,
) where
    F: PostcodeFetcher,
{
    std::thread::spawn(move || {
        // Set panic hook to prevent TUI corruption
        let response_tx_clone = response_tx.clone();
        let prev_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let panic_msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic in lookup worker".to_string()
            };

            log::error!(
                "Lookup worker panic: {} at {:?}",
                panic_msg,
                panic_info.location()
            );

            // Empty tag: no live query will ever match it, so the crash
            // surfaces in the log, never as suggestion state.
            let _ = response_tx_clone.send(LookupResponse {
                query: String::new(),
                outcome: LookupOutcome::Failed(FetchError::Network(format!(
                    "Lookup worker crashed: {}",
                    panic_msg
                ))),
            });
        }));

        // Wrap worker in catch_unwind
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to create tokio runtime");

            rt.block_on(worker_loop(fetcher, request_rx, response_tx));
        }));

        // Restore panic hook
        panic::set_hook(prev_hook);

        if let Err(e) = result {
            let panic_msg = if let Some(s) = e.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = e.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            log::error!("Lookup worker thread panicked: {}", panic_msg);
        }
    });
}

/// Main worker loop - processes requests until the channel closes
///
/// Uses blocking recv() which is fine in a dedicated thread.
async fn worker_loop<F>(
    fetcher: F,
    request_rx: Receiver<LookupRequest>,
    response_tx: Sender<LookupResponse>,
) where
    F: PostcodeFetcher,
{
    log::debug!("Lookup worker thread started");

    while let Ok(request) = request_rx.recv() {
        log::debug!("Worker received lookup for {:?}", request.query);

        let outcome = match fetcher.lookup(&request.query).await {
            Ok(candidates) => {
                log::debug!(
                    "Lookup for {:?} returned {} candidate(s)",
                    request.query,
                    candidates.len()
                );
                LookupOutcome::Candidates(candidates)
            }
            Err(e) => {
                log::debug!("Lookup for {:?} failed: {}", request.query, e);
                LookupOutcome::Failed(e)
            }
        };

        if response_tx
            .send(LookupResponse {
                query: request.query,
                outcome,
            })
            .is_err()
        {
            // Main thread disconnected - stop gracefully
            break;
        }
    }

    log::debug!("Lookup worker thread shutting down");
}

#[cfg(test)]
#[path = "thread_tests.rs"]
mod thread_tests;
