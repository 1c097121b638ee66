//! Tests for the lookup client

use std::sync::mpsc::channel;

use super::*;
use crate::lookup::worker::LookupOutcome;

fn scripted_client() -> (
    LookupClient,
    std::sync::mpsc::Receiver<LookupRequest>,
    std::sync::mpsc::Sender<LookupResponse>,
) {
    let (request_tx, request_rx) = channel();
    let (response_tx, response_rx) = channel();
    let client = LookupClient::with_channels(request_tx, response_rx);
    (client, request_rx, response_tx)
}

#[test]
fn test_dispatch_sends_tagged_request() {
    let (mut client, request_rx, _response_tx) = scripted_client();

    client.dispatch("EC1");

    let request = request_rx.try_recv().unwrap();
    assert_eq!(request.query, "EC1");
    assert_eq!(client.last_dispatched(), Some("EC1"));
}

#[test]
fn test_drain_returns_responses_in_arrival_order() {
    let (mut client, _request_rx, response_tx) = scripted_client();

    for query in ["SW1", "SW1A"] {
        response_tx
            .send(LookupResponse {
                query: query.to_string(),
                outcome: LookupOutcome::Candidates(vec![]),
            })
            .unwrap();
    }

    let responses = client.drain();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].query, "SW1");
    assert_eq!(responses[1].query, "SW1A");
}

#[test]
fn test_drain_is_nonblocking_when_empty() {
    let (mut client, _request_rx, _response_tx) = scripted_client();
    assert!(client.drain().is_empty());
}

#[test]
fn test_send_failure_degrades_client() {
    let (mut client, request_rx, _response_tx) = scripted_client();
    drop(request_rx);

    client.dispatch("EC1");

    // Channels are gone; later calls stay quiet instead of panicking.
    assert!(client.drain().is_empty());
    client.dispatch("EC1A");
}

#[test]
fn test_disconnected_response_channel_degrades_client() {
    let (mut client, _request_rx, response_tx) = scripted_client();
    drop(response_tx);

    assert!(client.drain().is_empty());
    assert!(client.drain().is_empty());
}

#[test]
fn test_reset_dispatch_clears_last_query() {
    let (mut client, _request_rx, _response_tx) = scripted_client();

    client.dispatch("EC1");
    assert_eq!(client.last_dispatched(), Some("EC1"));

    client.reset_dispatch();
    assert_eq!(client.last_dispatched(), None);
}
