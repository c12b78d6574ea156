// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for the sync run.
//!
//! Handles:
//! - Exchanging the configured refresh token for an access token
//! - Fetching one page of the athlete's most recent activities
//! - Rate limit and expired-token detection (logged, never retried)

use crate::config::{Config, DEFAULT_API_BASE_URL, DEFAULT_TOKEN_URL};
use crate::error::{Result, SyncError, UpstreamError};
use crate::models::RawActivity;
use serde::{Deserialize, Serialize};

/// Strava API client bound to one athlete's credentials.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String, refresh_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            client_id,
            client_secret,
            refresh_token,
        }
    }

    /// Create a client from loaded configuration, including endpoint overrides.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.strava_client_id.clone(),
            config.strava_client_secret.clone(),
            config.strava_refresh_token.clone(),
        )
        .with_endpoints(&config.api_base_url, &config.token_url)
    }

    /// Point the client at different API and token URLs.
    pub fn with_endpoints(mut self, base_url: &str, token_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self.token_url = token_url.to_string();
        self
    }

    /// Exchange the refresh token for a short-lived access token.
    pub async fn refresh_access_token(&self) -> Result<String> {
        let body = TokenRefreshRequest {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            refresh_token: &self.refresh_token,
            grant_type: "refresh_token",
        };

        let response = self
            .http
            .post(&self.token_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SyncError::Auth(UpstreamError::Transport(e.to_string())))?;

        let tokens: TokenRefreshResponse = check_response_json(response)
            .await
            .map_err(SyncError::Auth)?;

        if tokens
            .refresh_token
            .as_deref()
            .is_some_and(|t| t != self.refresh_token)
        {
            // Strava rotated the refresh token; only the operator can store it.
            tracing::warn!(
                expires_at = ?tokens.expires_at,
                "Strava issued a new refresh token; update STRAVA_REFRESH_TOKEN"
            );
        }

        tracing::debug!(expires_at = ?tokens.expires_at, "Access token refreshed");
        Ok(tokens.access_token)
    }

    /// List the most recent activities, newest first (single page).
    pub async fn list_activities(
        &self,
        access_token: &str,
        per_page: u32,
    ) -> Result<Vec<RawActivity>> {
        let url = format!("{}/athlete/activities", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("per_page", per_page.to_string())])
            .send()
            .await
            .map_err(|e| SyncError::Fetch(UpstreamError::Transport(e.to_string())))?;

        check_response_json(response).await.map_err(SyncError::Fetch)
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> std::result::Result<T, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        // Rate limit - the next scheduled run will pick up where this left off
        if status.as_u16() == 429 {
            tracing::warn!("Strava rate limit hit (429)");
        }

        // Unauthorized - refresh token revoked or scope missing
        if status.as_u16() == 401 {
            tracing::warn!("Strava rejected credentials (401)");
        }

        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| UpstreamError::Decode(e.to_string()))
}

/// Token refresh request body.
#[derive(Serialize)]
struct TokenRefreshRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    refresh_token: &'a str,
    grant_type: &'a str,
}

/// Token refresh response from Strava.
#[derive(Debug, Deserialize)]
struct TokenRefreshResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
}
