//! Tests for key handling

use std::sync::mpsc::{Receiver, Sender, channel};

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::*;
use crate::config::Config;
use crate::haptic::SilentHaptics;
use crate::lookup::{LookupClient, LookupOutcome, LookupRequest, LookupResponse};
use crate::region::table::uk_regions;
use crate::store::MemoryStore;

fn scripted_app() -> (App, Receiver<LookupRequest>, Sender<LookupResponse>) {
    let (request_tx, request_rx) = channel();
    let (response_tx, response_rx) = channel();
    let lookup = LookupClient::with_channels(request_tx, response_rx);
    let app = App::new(
        uk_regions(),
        lookup,
        Box::new(MemoryStore::new()),
        Box::new(SilentHaptics),
        &Config::default(),
    );
    (app, request_rx, response_tx)
}

fn respond(tx: &Sender<LookupResponse>, query: &str, candidates: &[&str]) {
    tx.send(LookupResponse {
        query: query.to_string(),
        outcome: LookupOutcome::Candidates(candidates.iter().map(|c| c.to_string()).collect()),
    })
    .unwrap();
}

fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key_event(KeyEvent::from(KeyCode::Char(c)));
    }
}

#[test]
fn test_typed_keys_flow_to_engine_uppercased() {
    let (mut app, request_rx, _response_tx) = scripted_app();

    type_str(&mut app, "ec1");

    assert_eq!(app.input.text(), "EC1");
    assert_eq!(app.search.raw(), "EC1");
    let queries: Vec<String> = request_rx.try_iter().map(|r| r.query).collect();
    assert_eq!(queries, vec!["E", "EC", "EC1"]);
}

#[test]
fn test_rejected_keystroke_snaps_widget_back() {
    let (mut app, _request_rx, _response_tx) = scripted_app();

    type_str(&mut app, "e");
    // No region starts with "EQ", so the keystroke is rejected
    type_str(&mut app, "q");

    assert_eq!(app.input.text(), "E");
    assert_eq!(app.search.raw(), "E");
    assert!(app.search.has_error());
}

#[test]
fn test_esc_clears_query_then_quits() {
    let (mut app, _request_rx, _response_tx) = scripted_app();
    type_str(&mut app, "ec1");

    app.handle_key_event(KeyEvent::from(KeyCode::Esc));
    assert_eq!(app.input.text(), "");
    assert_eq!(app.search.raw(), "");
    assert!(!app.should_quit());

    app.handle_key_event(KeyEvent::from(KeyCode::Esc));
    assert!(app.should_quit());
}

#[test]
fn test_ctrl_c_quits_without_accepting() {
    let (mut app, _request_rx, _response_tx) = scripted_app();
    type_str(&mut app, "ec1");

    app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

    assert!(app.should_quit());
    assert_eq!(app.accepted(), None);
}

#[test]
fn test_arrow_keys_walk_the_suggestion_list() {
    let (mut app, _request_rx, response_tx) = scripted_app();
    type_str(&mut app, "ec1a");
    respond(&response_tx, "EC1A", &["EC1A 1BB", "EC1A 1AA", "EC1A 2BN"]);
    app.tick();

    assert_eq!(app.selected, None);

    app.handle_key_event(KeyEvent::from(KeyCode::Down));
    assert_eq!(app.selected, Some(0));

    app.handle_key_event(KeyEvent::from(KeyCode::Down));
    app.handle_key_event(KeyEvent::from(KeyCode::Down));
    assert_eq!(app.selected, Some(2));

    // Already at the bottom
    app.handle_key_event(KeyEvent::from(KeyCode::Down));
    assert_eq!(app.selected, Some(2));

    app.handle_key_event(KeyEvent::from(KeyCode::Up));
    assert_eq!(app.selected, Some(1));

    // Up from the top returns focus to the input field
    app.handle_key_event(KeyEvent::from(KeyCode::Up));
    app.handle_key_event(KeyEvent::from(KeyCode::Up));
    assert_eq!(app.selected, None);
}

#[test]
fn test_down_with_no_suggestions_is_a_noop() {
    let (mut app, _request_rx, _response_tx) = scripted_app();
    app.handle_key_event(KeyEvent::from(KeyCode::Down));
    assert_eq!(app.selected, None);
}

#[test]
fn test_enter_adopts_the_highlighted_suggestion() {
    let (mut app, _request_rx, response_tx) = scripted_app();
    type_str(&mut app, "ec1a");
    respond(&response_tx, "EC1A", &["EC1A 1BB", "EC1A 1AA"]);
    app.tick();

    app.handle_key_event(KeyEvent::from(KeyCode::Down));
    app.handle_key_event(KeyEvent::from(KeyCode::Enter));

    assert_eq!(app.search.raw(), "EC1A 1BB");
    assert_eq!(app.input.text(), "EC1A 1BB");
    assert!(app.search.suggestions().is_empty());
    assert_eq!(app.search.resolved(), Some("EC1A 1BB"));
    assert_eq!(app.selected, None);
    assert!(!app.should_quit());
}

#[test]
fn test_enter_on_resolved_postcode_accepts_and_quits() {
    let (mut app, _request_rx, response_tx) = scripted_app();
    type_str(&mut app, "ec1a");
    respond(&response_tx, "EC1A", &["EC1A 1BB"]);
    app.tick();
    app.handle_key_event(KeyEvent::from(KeyCode::Down));
    app.handle_key_event(KeyEvent::from(KeyCode::Enter));
    assert_eq!(app.search.resolved(), Some("EC1A 1BB"));

    app.handle_key_event(KeyEvent::from(KeyCode::Enter));

    assert!(app.should_quit());
    assert_eq!(app.accepted(), Some("EC1A 1BB"));
}

#[test]
fn test_enter_with_nothing_resolved_does_nothing() {
    let (mut app, _request_rx, _response_tx) = scripted_app();
    type_str(&mut app, "ec1a");

    app.handle_key_event(KeyEvent::from(KeyCode::Enter));

    assert!(!app.should_quit());
    assert_eq!(app.accepted(), None);
}

#[test]
fn test_typing_resets_the_selection() {
    let (mut app, _request_rx, response_tx) = scripted_app();
    type_str(&mut app, "ec1a");
    respond(&response_tx, "EC1A", &["EC1A 1BB", "EC1A 1AA"]);
    app.tick();
    app.handle_key_event(KeyEvent::from(KeyCode::Down));
    assert_eq!(app.selected, Some(0));

    type_str(&mut app, "1");
    assert_eq!(app.selected, None);
}
