// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for a sync run.
//!
//! Every variant maps to the stage that failed, so the binary can report
//! where the run stopped and with which upstream status.

use crate::config::ConfigError;
use std::path::PathBuf;

/// Failure talking to the Strava API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// HTTP status returned by Strava, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error that aborts a sync run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Token refresh failed: {0}")]
    Auth(UpstreamError),

    #[error("Activity fetch failed: {0}")]
    Fetch(UpstreamError),

    #[error("Failed to read activity store {}: {reason}", path.display())]
    StoreRead { path: PathBuf, reason: String },

    #[error("Failed to write activity store {}: {reason}", path.display())]
    StoreWrite { path: PathBuf, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SyncError {
    /// Upstream HTTP status for auth and fetch failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Auth(e) | SyncError::Fetch(e) => e.status(),
            _ => None,
        }
    }

    /// Short name of the stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            SyncError::Auth(_) => "token refresh",
            SyncError::Fetch(_) => "activity fetch",
            SyncError::StoreRead { .. } => "store read",
            SyncError::StoreWrite { .. } => "store write",
            SyncError::Config(_) => "configuration",
        }
    }

    /// True when Strava rejected the request for rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}

/// Result type alias for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
