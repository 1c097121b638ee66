//! Lookup Worker Types
//!
//! Channel message types for the lookup worker thread. Every request carries
//! the query string that spawned it; the response echoes it back so the
//! receiving side can compare it against the live query and drop stale
//! results.

use crate::lookup::fetcher::FetchError;

/// Request to fetch completions for a partial postcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// The query this request was dispatched for (the staleness tag).
    pub query: String,
}

/// What the lookup produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Completions in service order; may be empty.
    Candidates(Vec<String>),
    /// The round trip failed. Degrades to "zero candidates" on the UI side;
    /// network-level failures additionally signal connectivity loss.
    Failed(FetchError),
}

/// Response from a completed lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResponse {
    /// Tag of the request that produced this response.
    pub query: String,
    pub outcome: LookupOutcome,
}
