// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava-Sync: keep a local JSON record of Strava activities
//!
//! This crate refreshes a Strava access token, fetches the latest
//! activities, formats them for display, and merges them into a
//! deduplicated JSON file read by the static site build.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;
