mod common;

use common::{record, start_of};
use endoapi::auth::AUTH_COMMAND;
use endoapi::fetch::{FetchOptions, PaginationEngine};
use endoapi::protocol::LIST_COMMAND;
use endoapi::utils::to_wire_time;
use endoapi::{ChunkFetcher, ClientConfig, Credentials, Error, Transport, authenticate};
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;

type Params = Vec<(String, String)>;

/// Replays canned bodies in order and records every request.
struct Scripted {
    bodies: RefCell<VecDeque<Result<String, Error>>>,
    requests: RefCell<Vec<(String, Params)>>,
}

impl Scripted {
    fn new(bodies: Vec<Result<String, Error>>) -> Self {
        Self {
            bodies: RefCell::new(bodies.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn param(&self, call: usize, key: &str) -> Option<String> {
        self.requests.borrow()[call]
            .1
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

impl Transport for Scripted {
    fn get(&self, command: &str, params: &[(&str, String)]) -> Result<String, Error> {
        self.requests.borrow_mut().push((
            command.to_string(),
            params
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        ));
        self.bodies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(r#"{"data": []}"#.to_string()))
    }
}

fn envelope(range: std::ops::Range<usize>) -> Result<String, Error> {
    let data: Vec<_> = range.map(record).collect();
    Ok(json!({ "data": data }).to_string())
}

#[test]
fn login_then_paginate_over_http_envelopes() {
    let transport = Scripted::new(vec![
        Ok("OK\nauthToken=sess-1\n".to_string()),
        envelope(0..3),
        envelope(3..5),
    ]);
    let cfg = ClientConfig::default().with_page_size(3);

    let token = authenticate(
        &transport,
        &cfg,
        Credentials::Password {
            email: "me@example.com".into(),
            password: "pw".into(),
        },
    )
    .unwrap();

    let engine = PaginationEngine::with_config(ChunkFetcher::new(&transport, token), &cfg);
    let out = engine.fetch(FetchOptions::default()).unwrap();
    assert_eq!(out.len(), 5);

    let requests = transport.requests.borrow();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].0, AUTH_COMMAND);
    assert_eq!(requests[1].0, LIST_COMMAND);
    drop(requests);

    assert_eq!(transport.param(1, "authToken").as_deref(), Some("sess-1"));
    assert_eq!(transport.param(1, "maxResults").as_deref(), Some("3"));
    assert_eq!(transport.param(1, "before"), None);
    assert_eq!(transport.param(2, "before"), Some(to_wire_time(start_of(2))));
    assert_eq!(transport.param(2, "language").as_deref(), Some("EN"));
}

#[test]
fn after_bound_is_sent_on_every_page() {
    let transport = Scripted::new(vec![envelope(0..2), envelope(2..3)]);
    let cfg = ClientConfig::default().with_page_size(2);
    let after = start_of(10);

    let engine = PaginationEngine::with_config(ChunkFetcher::new(&transport, "tok"), &cfg);
    engine
        .fetch(FetchOptions {
            after: Some(after),
            ..FetchOptions::default()
        })
        .unwrap();

    assert_eq!(transport.requests.borrow().len(), 2);
    for call in 0..2 {
        assert_eq!(transport.param(call, "after"), Some(to_wire_time(after)));
    }
}

#[test]
fn rejected_login_is_auth_error() {
    let transport = Scripted::new(vec![Ok("INVALID_PASSWORD\n".to_string())]);
    let err = authenticate(
        &transport,
        &ClientConfig::default(),
        Credentials::Password {
            email: "me@example.com".into(),
            password: "wrong".into(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));
}

#[test]
fn malformed_envelope_aborts_fetch() {
    let transport = Scripted::new(vec![Ok(r#"{"result": "maintenance"}"#.to_string())]);
    let engine = PaginationEngine::new(ChunkFetcher::new(&transport, "tok"));
    let err = engine.fetch(FetchOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Protocol { .. }));
}

#[test]
fn http_status_error_surfaces_with_url() {
    let transport = Scripted::new(vec![Err(Error::Request {
        status: 401,
        url: format!("http://api.mobile.endomondo.com/mobile/{LIST_COMMAND}"),
    })]);
    let engine = PaginationEngine::new(ChunkFetcher::new(&transport, "tok"));
    match engine.fetch(FetchOptions::default()) {
        Err(Error::Request { status, url }) => {
            assert_eq!(status, 401);
            assert!(url.ends_with(LIST_COMMAND));
        }
        other => panic!("expected request error, got {other:?}"),
    }
}
