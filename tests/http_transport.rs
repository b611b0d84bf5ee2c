//! Integration tests for the reqwest-backed transport.
//!
//! These tests verify the transport's tri-state contract against a local
//! mock server:
//! - JSON decoding regardless of content type
//! - Non-2xx responses keep their body
//! - Connection failures and timeouts map to status 0

use security_aggregator::config::DEFAULT_USER_AGENT;
use security_aggregator::initialization::init_client;
use security_aggregator::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport() -> ReqwestTransport {
    ReqwestTransport::new(init_client(DEFAULT_USER_AGENT).expect("Failed to build client"))
}

/// A localhost port with nothing listening on it.
fn unused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    listener.local_addr().expect("No local address").port()
}

#[tokio::test]
async fn test_json_decoded_despite_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/report"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"reputation": 3}"#)
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let response = transport()
        .get(HttpRequest::new(format!("{}/report", server.uri()), Duration::from_secs(5)))
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.error, None);
    assert_eq!(response.data, Some(json!({"reputation": 3})));
}

#[tokio::test]
async fn test_success_with_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let response = transport()
        .get(HttpRequest::new(server.uri(), Duration::from_secs(5)))
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.error, None);
    assert_eq!(response.data, None);
}

#[tokio::test]
async fn test_error_status_keeps_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&server)
        .await;

    let response = transport()
        .get(HttpRequest::new(server.uri(), Duration::from_secs(5)))
        .await;

    assert_eq!(response.status_code, 404);
    assert_eq!(response.error.as_deref(), Some("HTTP 404"));
    assert_eq!(response.data, Some(json!({"error": "not found"})));
}

#[tokio::test]
async fn test_headers_and_query_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api.json"))
        .and(header("x-apikey", "secret"))
        .and(query_param("LOOKUP", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let request = HttpRequest::new(format!("{}/api.json", server.uri()), Duration::from_secs(5))
        .header("x-apikey", "secret")
        .query("LOOKUP", "example.com");
    let response = transport().get(request).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.data, Some(json!({"ok": true})));
}

#[tokio::test]
async fn test_connection_refused_maps_to_status_zero() {
    let url = format!("http://127.0.0.1:{}/lookup", unused_port());
    let request = HttpRequest::new(url, Duration::from_secs(5)).query("apikey", "super-secret-key");

    let response = transport().get(request).await;

    assert_eq!(response.status_code, 0);
    assert_eq!(response.data, None);
    let error = response.error.expect("error should be set");
    assert!(!error.is_empty());
    assert!(
        !error.contains("super-secret-key"),
        "credentials leaked into error: {error}"
    );
}

#[tokio::test]
async fn test_timeout_maps_to_status_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"late": true}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let response = transport()
        .get(HttpRequest::new(server.uri(), Duration::from_millis(200)))
        .await;

    assert_eq!(response.status_code, 0);
    assert_eq!(response.data, None);
    assert!(response
        .error
        .as_deref()
        .is_some_and(|e| e.contains("timed out")));
}
