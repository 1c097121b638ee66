use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

use super::state::App;

/// Timeout for event polling - keeps the loop ticking so lookup responses
/// and the offline retry timer are serviced between keystrokes
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

impl App {
    /// Handle events and update application state
    pub fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(EVENT_POLL_TIMEOUT)? {
            match event::read()? {
                // Check that it's a key press event to avoid duplicates
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                }
                // Handle paste events (bracketed paste mode)
                Event::Paste(text) => {
                    self.handle_paste_event(text);
                }
                Event::Resize(..) => self.mark_dirty(),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handle paste events from bracketed paste mode
    fn handle_paste_event(&mut self, text: String) {
        self.input.textarea.insert_str(&text);
        self.sync_search();
        self.mark_dirty();
    }

    /// Handle key press events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        self.mark_dirty();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            // Esc clears the query first; a second Esc on an empty query quits
            KeyCode::Esc => {
                if self.input.text().is_empty() {
                    self.should_quit = true;
                } else {
                    self.input.replace("");
                    self.sync_search();
                }
            }
            KeyCode::Down => self.select_next(),
            KeyCode::Up => self.select_previous(),
            KeyCode::Enter => self.confirm(),
            _ => {
                if self.input.textarea.input(key) {
                    self.sync_search();
                }
            }
        }
    }

    /// Move selection down into / through the suggestion list
    fn select_next(&mut self) {
        let len = self.search.suggestions().len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            None => 0,
            Some(i) => (i + 1).min(len - 1),
        });
    }

    /// Move selection up; from the first suggestion, back to the input field
    fn select_previous(&mut self) {
        self.selected = match self.selected {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    /// Enter: adopt the highlighted suggestion, or accept a resolved
    /// postcode and exit
    fn confirm(&mut self) {
        if let Some(i) = self.selected
            && let Some(suggestion) = self.search.suggestions().get(i)
        {
            let text = suggestion.text.clone();
            self.search.select(&text);
            self.selected = None;
            let raw = self.search.raw().to_string();
            self.input.replace(&raw);
            return;
        }

        if let Some(resolved) = self.search.resolved() {
            let value = resolved.to_string();
            self.accept(value);
        }
    }

    /// Push the widget's text through the engine, then snap the widget back
    /// to the engine's view of the query. The two diverge when a keystroke
    /// is rejected or the input is normalized to uppercase.
    fn sync_search(&mut self) {
        let text = self.input.text().to_string();
        self.search.handle_input(&text);

        if self.search.raw() != text {
            let raw = self.search.raw().to_string();
            self.input.replace(&raw);
        }

        // Typing invalidates any suggestion selection
        self.selected = None;
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod events_tests;
