//! Mock manifest service helpers
//!
//! Sets up wiremock endpoints for the manifest query and bundle payloads.

#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::TOKEN;

/// Path of the manifest endpoint
pub const MANIFEST_PATH: &str = "/v1/bundles";

/// Manifest document listing `(name, version, url)` entries
pub fn manifest_json(entries: &[(&str, &str, String)]) -> serde_json::Value {
    let bundles: Vec<serde_json::Value> = entries
        .iter()
        .map(|(name, version, url)| json!({ "name": name, "version": version, "url": url }))
        .collect();
    json!({ "bundles": bundles })
}

/// Serve `body` as the manifest for requests carrying the test token
pub async fn mock_manifest(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(MANIFEST_PATH))
        .and(query_param("token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Answer the manifest query with `status` and no body
pub async fn mock_failing_manifest(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path(MANIFEST_PATH))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Serve a payload at `/payloads/{file_name}`, expecting exactly `hits` requests
pub async fn mock_payload(server: &MockServer, file_name: &str, content: Vec<u8>, hits: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/payloads/{file_name}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content))
        .expect(hits)
        .mount(server)
        .await;
}

/// Fail every request for `/payloads/{file_name}` with 500
pub async fn mock_failing_payload(server: &MockServer, file_name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/payloads/{file_name}")))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

/// Public URL of a payload served by [`mock_payload`]
pub fn payload_url(server: &MockServer, file_name: &str) -> String {
    format!("{}/payloads/{file_name}", server.uri())
}
