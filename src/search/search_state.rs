//! Search engine state
//!
//! The one piece of session state: the current query string, its region
//! classification, the live suggestion list and the resolution status. Every
//! keystroke flows through `handle_input`; every completed lookup flows
//! through `poll_responses`. Responses are applied in query-freshness order:
//! a response whose tag no longer equals the live query is discarded, no
//! matter when it arrives.

use crate::haptic::Haptics;
use crate::highlight::{eq_ignore_spaces, highlight_len};
use crate::lookup::{LookupClient, LookupOutcome};
use crate::region::{RegionResult, RegionTable, classify};
use crate::store::KeyValueStore;

/// Store key for the persisted last search.
pub const SEARCH_KEY: &str = "search";

/// One autocomplete candidate plus the span of it the user has already typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    /// Leading bytes of `text` to render bold.
    pub highlight_len: usize,
}

/// Invoked with `Some(postcode)` when the query resolves to exactly one
/// postcode, and with `None` when that resolution is lost. Deduplicated:
/// called exactly once per change of the resolved value.
pub type ResolvedCallback = Box<dyn FnMut(Option<&str>)>;

/// What a `poll_responses` pass did, for the caller's event loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PollSummary {
    /// A fresh response was applied; the view should re-render.
    pub updated: bool,
    /// A lookup failed below HTTP; the environment is likely offline.
    pub network_failure: bool,
}

pub struct SearchState {
    table: RegionTable,
    lookup: LookupClient,
    store: Box<dyn KeyValueStore>,
    haptics: Box<dyn Haptics>,
    on_resolved: ResolvedCallback,

    /// Exactly what the user has typed, uppercased, spaces preserved.
    raw: String,
    region: RegionResult,
    suggestions: Vec<Suggestion>,
    error: bool,
    online: bool,
    resolved: Option<String>,
}

impl SearchState {
    /// Create the engine, seeding the query from the persisted last search.
    /// A non-empty seed is classified and looked up immediately.
    pub fn new(
        table: RegionTable,
        lookup: LookupClient,
        store: Box<dyn KeyValueStore>,
        haptics: Box<dyn Haptics>,
        on_resolved: ResolvedCallback,
    ) -> Self {
        let mut state = Self {
            table,
            lookup,
            store,
            haptics,
            on_resolved,
            raw: String::new(),
            region: RegionResult::Indeterminate,
            suggestions: Vec::new(),
            error: false,
            online: true,
            resolved: None,
        };

        if let Some(seed) = state.store.get(SEARCH_KEY) {
            let seed = seed.to_uppercase();
            if !seed.is_empty() {
                state.region = classify(&seed, &state.table);
                state.raw = seed;
                state.maybe_dispatch();
            }
        }

        state
    }

    /// Apply a keystroke-level change of the query text.
    ///
    /// Input is uppercased first. A change that classifies as invalid is
    /// rejected: the previous query and region stand, the error state is
    /// raised and a haptic pulse fires on the transition. Callers should
    /// re-sync their input widget with `raw()` afterwards.
    pub fn handle_input(&mut self, text: &str) {
        let text = text.to_uppercase();
        if text == self.raw {
            return;
        }

        if text.is_empty() {
            self.clear();
            return;
        }

        match classify(&text, &self.table) {
            RegionResult::Invalid => {
                self.set_error(true);
            }
            result => {
                self.region = result;
                self.raw = text;
                self.set_error(false);
                self.persist();
                self.maybe_dispatch();
            }
        }
    }

    /// Drain completed lookups and apply the fresh ones.
    pub fn poll_responses(&mut self) -> PollSummary {
        let mut summary = PollSummary::default();

        for response in self.lookup.drain() {
            // Freshness check: the tag must still equal the live query.
            if response.query != self.raw {
                log::debug!(
                    "Ignoring stale lookup response for {:?} (current: {:?})",
                    response.query,
                    self.raw
                );
                continue;
            }

            summary.updated = true;
            match response.outcome {
                LookupOutcome::Candidates(candidates) => self.apply_candidates(candidates),
                LookupOutcome::Failed(e) => {
                    if e.is_network() {
                        summary.network_failure = true;
                    }
                    log::debug!("Lookup for {:?} failed: {}", response.query, e);
                    self.apply_candidates(Vec::new());
                }
            }
        }

        summary
    }

    /// The user picked a suggestion explicitly: adopt it and resolve
    /// immediately, no network confirmation needed.
    pub fn select(&mut self, value: &str) {
        let value = value.to_uppercase();
        self.region = classify(&value, &self.table);
        self.raw = value.clone();
        self.suggestions.clear();
        self.set_error(false);
        self.set_resolved(Some(&value));
        self.persist();
    }

    /// Connectivity transition. Going offline clears suggestions (the query
    /// and region stand) and suppresses dispatches; coming back online
    /// re-issues a lookup for the current query.
    pub fn set_online(&mut self, online: bool) {
        if online == self.online {
            return;
        }
        self.online = online;

        if online {
            self.lookup.reset_dispatch();
            self.maybe_dispatch();
        } else {
            self.suggestions.clear();
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn region(&self) -> &RegionResult {
        &self.region
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn resolved(&self) -> Option<&str> {
        self.resolved.as_deref()
    }

    /// Settle one fresh response.
    ///
    /// A single candidate equal to the query (ignoring embedded spaces)
    /// resolves it; anything else populates the suggestion list. Zero
    /// candidates raise the error state.
    fn apply_candidates(&mut self, candidates: Vec<String>) {
        if candidates.len() == 1 && eq_ignore_spaces(&self.raw, &candidates[0]) {
            self.suggestions.clear();
            let candidate = candidates.into_iter().next();
            self.set_resolved(candidate.as_deref());
            self.set_error(false);
            // Persist the canonical spaced rendering, not the typed form.
            if let Some(candidate) = &candidate {
                self.store.set(SEARCH_KEY, candidate);
            }
            return;
        }

        self.set_error(candidates.is_empty());
        self.set_resolved(None);
        let raw = self.raw.as_str();
        self.suggestions = candidates
            .into_iter()
            .map(|text| Suggestion {
                highlight_len: highlight_len(raw, &text),
                text,
            })
            .collect();
    }

    /// Empty query: back to the indeterminate ground state.
    fn clear(&mut self) {
        self.raw.clear();
        self.region = RegionResult::Indeterminate;
        self.suggestions.clear();
        self.set_error(false);
        self.set_resolved(None);
        self.persist();
    }

    /// Dispatch a lookup for the current query unless offline, the region is
    /// unresolved, or the same query was already dispatched.
    fn maybe_dispatch(&mut self) {
        if !self.online || self.region.name().is_none() {
            return;
        }
        if self.lookup.last_dispatched() == Some(self.raw.as_str()) {
            return;
        }
        self.lookup.dispatch(&self.raw);
    }

    /// Raise or clear the error state, pulsing haptics on the raise
    /// transition only.
    fn set_error(&mut self, error: bool) {
        if self.error != error {
            self.error = error;
            if error {
                self.haptics.buzz();
            }
        }
    }

    /// Notify the resolution callback exactly once per change.
    fn set_resolved(&mut self, value: Option<&str>) {
        if self.resolved.as_deref() != value {
            self.resolved = value.map(str::to_string);
            (self.on_resolved)(value);
        }
    }

    fn persist(&mut self) {
        self.store.set(SEARCH_KEY, &self.raw);
    }
}

#[cfg(test)]
#[path = "search_state_tests.rs"]
mod search_state_tests;
