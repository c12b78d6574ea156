// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Normalization of raw Strava activities into stored display records.
//!
//! Everything here is pure. Missing, zero or non-numeric inputs produce
//! [`PLACEHOLDER`] rather than an error, so a transform always succeeds.

use crate::models::{DisplayActivity, Metric, RawActivity, PLACEHOLDER};
use serde_json::{Map, Number};

/// Convert one raw activity into its display form.
pub fn transform(raw: &RawActivity) -> DisplayActivity {
    let distance_km = distance_km(as_f64(&raw.distance));
    let moving_time = as_f64(&raw.moving_time);
    let max_speed = as_f64(&raw.max_speed);

    DisplayActivity {
        id: raw.id,
        name: text_or(raw.name.as_deref(), "Untitled"),
        date: text_or(
            non_empty(raw.start_date_local.as_deref()).or(raw.start_date.as_deref()),
            "Unknown",
        ),
        activity_type: text_or(raw.activity_type.as_deref(), "Unknown"),
        distance: distance_km
            .map(|km| to_fixed(km, 2))
            .unwrap_or_else(placeholder),
        moving_time: format_duration(moving_time),
        pace: average_pace(moving_time, distance_km),
        max_pace: ms_to_pace(max_speed),
        average_speed: ms_to_kmh(as_f64(&raw.average_speed)),
        max_speed: ms_to_kmh(max_speed),
        average_heartrate: raw.average_heartrate.clone().into(),
        max_heartrate: raw.max_heartrate.clone().into(),
        ascent: ascent(as_f64(&raw.total_elevation_gain)),
        elev_high: raw.elev_high.clone().into(),
        elev_low: raw.elev_low.clone().into(),
        summary_polyline: raw.summary_polyline().map(str::to_string),
        extra: Map::new(),
    }
}

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

fn as_f64(value: &Option<Number>) -> Option<f64> {
    value.as_ref().and_then(Number::as_f64).filter(|v| v.is_finite())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn text_or(value: Option<&str>, default: &str) -> String {
    non_empty(value).unwrap_or(default).to_string()
}

/// Digits past the rounding position inspected to detect an exact tie.
const TIE_CHECK_DIGITS: usize = 64;

/// Format with `places` decimals, rounding exact ties away from zero.
///
/// `format!` rounds a value sitting exactly halfway (1.125 at two places)
/// to even; stored distances and speeds round it up instead.
fn to_fixed(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", places, value);
    }
    let exact = format!("{:.*}", places + 1 + TIE_CHECK_DIGITS, value);
    let tail = &exact[exact.len() - (1 + TIE_CHECK_DIGITS)..];
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    if is_tie {
        let scale = 10f64.powi(places as i32);
        format!("{:.*}", places, (value * scale).round() / scale)
    } else {
        format!("{:.*}", places, value)
    }
}

/// Meters to kilometers; only positive distances count.
fn distance_km(meters: Option<f64>) -> Option<f64> {
    meters.filter(|m| *m > 0.0).map(|m| m / 1000.0)
}

/// Render seconds per km as `M:SS`.
///
/// Rounds to whole seconds before splitting so 299.6 becomes `5:00`.
pub fn format_pace(seconds_per_km: f64) -> String {
    let total = seconds_per_km.round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Render a positive number of seconds as `HH:MM:SS`.
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds.filter(|s| *s > 0.0) {
        Some(s) => {
            let total = s.floor() as u64;
            format!(
                "{:02}:{:02}:{:02}",
                total / 3600,
                (total % 3600) / 60,
                total % 60
            )
        }
        None => placeholder(),
    }
}

/// Convert m/s to km/h with one decimal.
pub fn ms_to_kmh(speed: Option<f64>) -> String {
    speed
        .map(|mps| to_fixed(mps * 3.6, 1))
        .unwrap_or_else(placeholder)
}

/// Convert a speed in m/s to pace per km.
pub fn ms_to_pace(speed: Option<f64>) -> String {
    match speed.filter(|mps| *mps > 0.0) {
        Some(mps) => format_pace(1000.0 / mps),
        None => placeholder(),
    }
}

fn average_pace(moving_time: Option<f64>, distance_km: Option<f64>) -> String {
    match (moving_time.filter(|t| *t > 0.0), distance_km) {
        (Some(seconds), Some(km)) if km > 0.0 => format_pace(seconds / km),
        _ => placeholder(),
    }
}

fn ascent(gain: Option<f64>) -> Metric {
    match gain {
        Some(meters) => Metric::Number(Number::from(meters.round() as i64)),
        None => Metric::placeholder(),
    }
}
