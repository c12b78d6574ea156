// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON file store of display activities.
//!
//! The store is a single pretty-printed JSON array, read whole at the start
//! of a run and written whole at the end. Stored records are never edited;
//! a merge only adds new ids and re-sorts.

use crate::error::{Result, SyncError};
use crate::models::DisplayActivity;
use crate::services::sync::SyncMode;
use crate::time_utils::parse_activity_date;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed activity store.
#[derive(Debug, Clone)]
pub struct ActivityStore {
    path: PathBuf,
}

impl ActivityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load stored activities. A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<DisplayActivity>> {
        let json_data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No existing store, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.read_error(e)),
        };

        let activities: Vec<DisplayActivity> =
            serde_json::from_str(&json_data).map_err(|e| self.read_error(e))?;

        let unique: HashSet<u64> = activities.iter().map(|a| a.id).collect();
        if unique.len() != activities.len() {
            tracing::warn!(
                path = %self.path.display(),
                duplicates = activities.len() - unique.len(),
                "Stored activities contain duplicate ids"
            );
        }

        tracing::debug!(count = activities.len(), "Loaded stored activities");
        Ok(activities)
    }

    /// Write the full activity list, replacing the previous contents.
    pub fn persist(&self, activities: &[DisplayActivity]) -> Result<()> {
        let json_data =
            serde_json::to_string_pretty(activities).map_err(|e| self.write_error(e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        fs::write(&self.path, json_data).map_err(|e| self.write_error(e))?;
        tracing::debug!(
            path = %self.path.display(),
            count = activities.len(),
            "Persisted activity store"
        );
        Ok(())
    }

    fn read_error(&self, e: impl std::fmt::Display) -> SyncError {
        SyncError::StoreRead {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }

    fn write_error(&self, e: impl std::fmt::Display) -> SyncError {
        SyncError::StoreWrite {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }
}

/// Counts from a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Incoming records written to the store
    pub added: usize,
    /// Incoming records dropped as duplicates
    pub skipped: usize,
    /// Size of the resulting store
    pub total: usize,
}

/// Merge incoming activities into the existing store and re-sort.
///
/// Append modes drop incoming records whose id is already stored; the
/// single-activity mode also ignores everything past the first record.
/// Overwrite mode discards `existing`. Duplicate ids inside `incoming`
/// are always collapsed to their first occurrence.
pub fn merge(
    existing: Vec<DisplayActivity>,
    incoming: Vec<DisplayActivity>,
    mode: SyncMode,
) -> (Vec<DisplayActivity>, MergeOutcome) {
    let offered = incoming.len();
    let incoming: Vec<DisplayActivity> = match mode {
        SyncMode::AppendDedupOne => incoming.into_iter().take(1).collect(),
        SyncMode::AppendDedupMany | SyncMode::OverwriteAll => incoming,
    };

    let mut combined = match mode {
        SyncMode::OverwriteAll => Vec::with_capacity(incoming.len()),
        SyncMode::AppendDedupMany | SyncMode::AppendDedupOne => existing,
    };

    let mut seen: HashSet<u64> = combined.iter().map(|a| a.id).collect();
    let mut added = 0;
    for activity in incoming {
        if seen.insert(activity.id) {
            combined.push(activity);
            added += 1;
        }
    }

    sort_by_date_desc(&mut combined);

    let outcome = MergeOutcome {
        added,
        skipped: offered - added,
        total: combined.len(),
    };
    (combined, outcome)
}

/// Sort newest first.
///
/// Dates are compared as UTC instants (see [`parse_activity_date`]).
/// Unparseable dates go last, and equal dates fall back to descending id.
pub fn sort_by_date_desc(activities: &mut [DisplayActivity]) {
    activities.sort_by_cached_key(|a| {
        let date = parse_activity_date(&a.date);
        (date.is_none(), Reverse(date), Reverse(a.id))
    });
}
