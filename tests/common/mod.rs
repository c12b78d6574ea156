// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use serde_json::{json, Value};
use std::path::Path;
use strava_sync::config::Config;
use strava_sync::services::SyncMode;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const ACCESS_TOKEN: &str = "test_access_token";
const BEARER_HEADER: &str = "Bearer test_access_token";

/// Load the recorded page of Strava summary activities.
#[allow(dead_code)]
pub fn activities_fixture() -> Value {
    let text = std::fs::read_to_string("tests/fixtures/activities_page.json")
        .expect("Failed to read fixture");
    serde_json::from_str(&text).expect("Failed to parse fixture")
}

/// Create a test config that talks to the mock server and writes to `output`.
#[allow(dead_code)]
pub fn test_config(server: &MockServer, output: &Path, mode: SyncMode) -> Config {
    Config {
        output_path: output.to_path_buf(),
        mode,
        token_url: format!("{}/oauth/token", server.uri()),
        api_base_url: format!("{}/api/v3", server.uri()),
        ..Config::default()
    }
}

/// Mount a successful token exchange for the default test credentials.
#[allow(dead_code)]
pub async fn mount_token_ok(server: &MockServer) {
    mount_token_issuing(server, "test_refresh_token").await;
}

/// Mount a token exchange that answers with `refresh_token` as the next
/// refresh token. Only requests carrying the default credentials match.
#[allow(dead_code)]
pub async fn mount_token_issuing(server: &MockServer, refresh_token: &str) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_json(json!({
            "client_id": "test_client_id",
            "client_secret": "test_secret",
            "refresh_token": "test_refresh_token",
            "grant_type": "refresh_token"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "access_token": ACCESS_TOKEN,
            "expires_at": 1_750_000_000,
            "expires_in": 21600,
            "refresh_token": refresh_token
        })))
        .mount(server)
        .await;
}

/// Mount the activity list endpoint for a given page size.
#[allow(dead_code)]
pub async fn mount_activities(server: &MockServer, per_page: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .and(query_param("per_page", per_page.to_string().as_str()))
        .and(header("authorization", BEARER_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
