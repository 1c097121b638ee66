//! Lookup Worker Module
//!
//! Runs autocomplete lookups in a background thread so the UI thread never
//! blocks on the network. Requests arrive over a channel tagged with the
//! query that triggered them; every response echoes that tag back, and the
//! engine discards responses whose tag no longer equals the live query.
//! There is no cancellation: an in-flight request is allowed to complete and
//! its result is simply ignored when stale.
//!
//! ## Architecture
//!
//! - Single background thread with std::sync::mpsc channels
//! - Blocking recv() in the dedicated thread, driving a current-thread tokio
//!   runtime for the HTTP calls
//! - Panic hook to prevent TUI corruption

pub mod thread;
pub mod types;

// Re-exports for convenience
pub use thread::spawn_worker;
pub use types::{LookupOutcome, LookupRequest, LookupResponse};
