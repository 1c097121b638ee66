use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::input_state::InputState;
use crate::config::Config;
use crate::haptic::Haptics;
use crate::lookup::LookupClient;
use crate::region::RegionTable;
use crate::search::{ResolvedCallback, SearchState};
use crate::store::KeyValueStore;

/// Application state
pub struct App {
    pub search: SearchState,
    pub input: InputState,
    /// Index into the suggestion list, `None` while the input field itself
    /// has focus
    pub selected: Option<usize>,
    pub should_quit: bool,
    pub warning: Option<String>,
    accepted: Option<String>,
    offline_until: Option<Instant>,
    retry: Duration,
    dirty: bool,
}

impl App {
    /// Create a new App instance wired to a lookup client and the
    /// capability backends for persistence and haptics.
    pub fn new(
        table: RegionTable,
        lookup: LookupClient,
        store: Box<dyn KeyValueStore>,
        haptics: Box<dyn Haptics>,
        config: &Config,
    ) -> Self {
        // The engine reports resolution through its callback; the app only
        // needs the latest value, so the callback writes into a shared slot.
        let resolved_slot: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        let callback: ResolvedCallback = {
            let slot = resolved_slot.clone();
            Box::new(move |value| {
                #[cfg(debug_assertions)]
                log::debug!("Resolution changed: {:?}", value);
                *slot.borrow_mut() = value.map(String::from);
            })
        };

        let search = SearchState::new(table, lookup, store, haptics, callback);

        let mut input = InputState::new();
        input.replace(search.raw());

        Self {
            search,
            input,
            selected: None,
            should_quit: false,
            warning: None,
            accepted: None,
            offline_until: None,
            retry: Duration::from_millis(config.connectivity.retry_ms),
            dirty: true,
        }
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Postcode accepted on exit, if any
    pub fn accepted(&self) -> Option<&str> {
        self.accepted.as_deref()
    }

    pub fn should_render(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub(super) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Per-loop housekeeping: drain completed lookups and drive the offline
    /// retry timer.
    pub fn tick(&mut self) {
        let summary = self.search.poll_responses();

        if summary.updated {
            self.clamp_selection();
            self.mark_dirty();
        }

        if let Some(deadline) = self.offline_until
            && Instant::now() >= deadline
        {
            log::debug!("Retry timer elapsed - back online");
            self.offline_until = None;
            self.search.set_online(true);
            self.mark_dirty();
        }

        if summary.network_failure && self.offline_until.is_none() {
            log::debug!("Network failure - going offline for {:?}", self.retry);
            self.search.set_online(false);
            self.offline_until = Some(Instant::now() + self.retry);
            self.selected = None;
            self.mark_dirty();
        }
    }

    pub(super) fn clamp_selection(&mut self) {
        let len = self.search.suggestions().len();
        self.selected = match self.selected {
            Some(_) if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        };
    }

    pub(super) fn accept(&mut self, value: String) {
        self.accepted = Some(value);
        self.should_quit = true;
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
