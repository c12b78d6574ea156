// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-shot sync run.
//!
//! Handles the core workflow:
//! 1. Refresh the access token
//! 2. Fetch the latest page of activities
//! 3. Transform them into display records
//! 4. Merge into the stored activities
//! 5. Write the store back to disk
//!
//! The store file is only written in the last step, so a run that fails
//! earlier leaves it untouched.

use crate::config::Config;
use crate::error::Result;
use crate::models::DisplayActivity;
use crate::services::store::{self, ActivityStore, MergeOutcome};
use crate::services::strava::StravaClient;
use crate::services::transform::transform;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How fetched activities are combined with the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Periodic sync of a recent batch, skipping stored ids.
    #[default]
    AppendDedupMany,
    /// Sync only the latest activity, skipping it if already stored.
    AppendDedupOne,
    /// Replace the store with the fetched batch.
    OverwriteAll,
}

impl SyncMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMode::AppendDedupMany => "append-dedup-many",
            SyncMode::AppendDedupOne => "append-dedup-one",
            SyncMode::OverwriteAll => "overwrite-all",
        }
    }

    /// Page size requested when no override is configured.
    pub fn default_page_size(&self) -> u32 {
        match self {
            SyncMode::AppendDedupOne => 1,
            SyncMode::AppendDedupMany | SyncMode::OverwriteAll => 10,
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "append-dedup-many" => Ok(SyncMode::AppendDedupMany),
            "append-dedup-one" => Ok(SyncMode::AppendDedupOne),
            "overwrite-all" => Ok(SyncMode::OverwriteAll),
            other => Err(format!("unknown sync mode: {other}")),
        }
    }
}

/// Stages of a run, in order. A failure at any point ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunStage {
    Init,
    TokenAcquired,
    ActivitiesFetched,
    Transformed,
    Merged,
    Persisted,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStage::Init => "init",
            RunStage::TokenAcquired => "token_acquired",
            RunStage::ActivitiesFetched => "activities_fetched",
            RunStage::Transformed => "transformed",
            RunStage::Merged => "merged",
            RunStage::Persisted => "persisted",
        };
        f.write_str(name)
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub mode: SyncMode,
    pub path: PathBuf,
    /// Activities returned by Strava
    pub fetched: usize,
    /// New activities written
    pub added: usize,
    /// Fetched activities already present
    pub skipped: usize,
    /// Activities in the store after the run
    pub total: usize,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            SyncMode::OverwriteAll => write!(
                f,
                "Saved {} activities to {}",
                self.total,
                self.path.display()
            ),
            SyncMode::AppendDedupOne if self.fetched == 0 => {
                write!(f, "No activity found. Total saved: {}", self.total)
            }
            SyncMode::AppendDedupMany | SyncMode::AppendDedupOne => write!(
                f,
                "Added {} new activities. Total saved: {}",
                self.added, self.total
            ),
        }
    }
}

/// Token refresh, fetch, transform, merge and persist as one run.
pub struct SyncPipeline {
    client: StravaClient,
    store: ActivityStore,
    mode: SyncMode,
    per_page: u32,
}

impl SyncPipeline {
    pub fn new(client: StravaClient, store: ActivityStore, mode: SyncMode, per_page: u32) -> Self {
        Self {
            client,
            store,
            mode,
            per_page,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            StravaClient::from_config(config),
            ActivityStore::new(config.output_path.clone()),
            config.mode,
            config.page_size(),
        )
    }

    /// Run the sync once.
    pub async fn run(&self) -> Result<SyncReport> {
        let mut reached = RunStage::Init;
        tracing::info!(
            mode = %self.mode,
            per_page = self.per_page,
            path = %self.store.path().display(),
            "Starting activity sync"
        );

        let result = self.run_stages(&mut reached).await;
        match &result {
            Ok(report) => tracing::info!(
                added = report.added,
                skipped = report.skipped,
                total = report.total,
                "Activity sync complete"
            ),
            Err(e) => tracing::error!(
                last_stage = %reached,
                failed = e.stage(),
                status = ?e.status(),
                rate_limited = e.is_rate_limited(),
                error = %e,
                "Activity sync failed"
            ),
        }
        result
    }

    async fn run_stages(&self, reached: &mut RunStage) -> Result<SyncReport> {
        let access_token = self.client.refresh_access_token().await?;
        advance(reached, RunStage::TokenAcquired);

        let raw = self
            .client
            .list_activities(&access_token, self.per_page)
            .await?;
        let fetched = raw.len();
        advance(reached, RunStage::ActivitiesFetched);

        let incoming: Vec<DisplayActivity> = raw.iter().map(transform).collect();
        advance(reached, RunStage::Transformed);

        let existing = match self.mode {
            SyncMode::OverwriteAll => Vec::new(),
            SyncMode::AppendDedupMany | SyncMode::AppendDedupOne => self.store.load()?,
        };
        let (combined, MergeOutcome { added, skipped, total }) =
            store::merge(existing, incoming, self.mode);
        advance(reached, RunStage::Merged);

        self.store.persist(&combined)?;
        advance(reached, RunStage::Persisted);

        Ok(SyncReport {
            mode: self.mode,
            path: self.store.path().to_path_buf(),
            fetched,
            added,
            skipped,
            total,
        })
    }
}

fn advance(reached: &mut RunStage, next: RunStage) {
    debug_assert!(next > *reached);
    *reached = next;
    tracing::debug!(stage = %next, "Sync stage reached");
}
