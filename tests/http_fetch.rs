use std::thread;
use std::time::Duration;

use rs_webmail::mail::http_client::HttpClient;
use rs_webmail::mail::{FetchError, FetchEvent, spawn_fetch};
use rs_webmail::store::{AppState, FetchStatus, View};
use tiny_http::{Response, Server};
use url::Url;

const INBOX: &str = r#"[
  {"id":1,"from":"Nico","header":"Weekend plans","content":"Fancy a hike on Saturday?","emailAddress":"nico@email.com","img":"https://img.example/nico.png","read":false},
  {"id":2,"from":"Amazon","header":"Your order shipped","content":"Track it here","emailAddress":"orders@amazon.com","img":"https://img.example/amazon.png"},
  {"id":3,"from":"Broken"}
]"#;

/// Serves a single request and shuts down.
fn serve_once(status: u16, body: &'static str) -> Url {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    thread::spawn(move || {
        if let Ok(req) = server.recv() {
            let _ = req.respond(Response::from_string(body).with_status_code(status));
        }
    });
    Url::parse(&format!("http://{addr}/emails")).unwrap()
}

fn client(url: Url) -> HttpClient {
    HttpClient::new(url, Some(Duration::from_secs(5))).unwrap()
}

#[test]
fn fetches_and_validates_the_list() {
    let emails = client(serve_once(200, INBOX)).fetch_emails().unwrap();

    let froms: Vec<_> = emails.iter().map(|e| e.from.as_str()).collect();
    assert_eq!(froms, ["Nico", "Amazon"]);
    assert!(!emails[1].read);
    assert_eq!(emails[0].email_address, "nico@email.com");
}

#[test]
fn server_error_is_a_status_failure() {
    let err = client(serve_once(500, "oops")).fetch_emails().unwrap_err();
    match err {
        FetchError::Status(code) => assert_eq!(code.as_u16(), 500),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_array_body_is_malformed() {
    let err = client(serve_once(200, r#"{"error":"nope"}"#))
        .fetch_emails()
        .unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
}

#[test]
fn unreachable_server_is_an_http_failure() {
    let addr = Server::http("127.0.0.1:0").unwrap().server_addr();
    let url = Url::parse(&format!("http://{addr}/emails")).unwrap();
    let err = client(url).fetch_emails().unwrap_err();
    assert!(matches!(err, FetchError::Http(_)));
}

#[test]
fn background_fetch_feeds_the_store() {
    let rx = spawn_fetch(client(serve_once(200, INBOX)));
    let event = rx.recv_timeout(Duration::from_secs(10)).unwrap();
    assert!(matches!(event, FetchEvent::Loaded(_)));

    let mut state = AppState::new();
    state.apply_fetch(event);
    assert_eq!(state.fetch_status(), &FetchStatus::Loaded(2));

    state.set_filter("HIKE");
    let hits = state.filtered_emails();
    assert_eq!(hits.len(), 1);
    let id = hits[0].0;

    state.select_email(id);
    assert_eq!(state.view(), View::EmailDetail);
    assert!(state.emails()[id].read);
}

#[test]
fn failed_background_fetch_leaves_the_list_empty() {
    let rx = spawn_fetch(client(serve_once(503, "")));
    let mut state = AppState::new();
    state.apply_fetch(rx.recv_timeout(Duration::from_secs(10)).unwrap());

    assert!(state.emails().is_empty());
    assert_eq!(state.view(), View::EmailList);
    assert!(matches!(state.fetch_status(), FetchStatus::Failed(r) if r.contains("503")));
}
