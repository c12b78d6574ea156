// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod store;
pub mod strava;
pub mod sync;
pub mod transform;

pub use store::{ActivityStore, MergeOutcome};
pub use strava::StravaClient;
pub use sync::{RunStage, SyncMode, SyncPipeline, SyncReport};
pub use transform::transform;
