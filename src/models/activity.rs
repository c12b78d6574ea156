// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity models: the raw API shape and the stored display shape.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Marker written in place of a value that is missing or cannot be computed.
pub const PLACEHOLDER: &str = "–";

/// Summary activity as returned by `GET /athlete/activities`.
///
/// Only the fields the store needs are decoded. Numeric fields that are
/// present but not numbers decode as `None` instead of failing the page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawActivity {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    /// Start time in the athlete's local timezone
    #[serde(default)]
    pub start_date_local: Option<String>,
    /// Start time in UTC
    #[serde(default)]
    pub start_date: Option<String>,
    /// Legacy activity type (Ride, Run, Hike, etc.)
    #[serde(default, rename = "type")]
    pub activity_type: Option<String>,
    /// Distance in meters
    #[serde(default, deserialize_with = "lenient_number")]
    pub distance: Option<Number>,
    /// Moving time in seconds
    #[serde(default, deserialize_with = "lenient_number")]
    pub moving_time: Option<Number>,
    /// Average speed in m/s
    #[serde(default, deserialize_with = "lenient_number")]
    pub average_speed: Option<Number>,
    /// Max speed in m/s
    #[serde(default, deserialize_with = "lenient_number")]
    pub max_speed: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub average_heartrate: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub max_heartrate: Option<Number>,
    /// Elevation gain in meters
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_elevation_gain: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub elev_high: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub elev_low: Option<Number>,
    #[serde(default)]
    pub map: Option<RawMap>,
}

impl RawActivity {
    /// Get the summary polyline, treating an empty string as absent.
    pub fn summary_polyline(&self) -> Option<&str> {
        self.map
            .as_ref()
            .and_then(|m| m.summary_polyline.as_deref())
            .filter(|p| !p.is_empty())
    }
}

/// Activity map data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMap {
    #[serde(default)]
    pub summary_polyline: Option<String>,
}

/// Accept any JSON value, keeping it only if it is a number.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => Some(n),
        _ => None,
    })
}

/// A value passed through from Strava, or the placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Number(Number),
    Placeholder(String),
}

impl Metric {
    pub fn placeholder() -> Self {
        Metric::Placeholder(PLACEHOLDER.to_string())
    }
}

impl From<Option<Number>> for Metric {
    fn from(value: Option<Number>) -> Self {
        value.map(Metric::Number).unwrap_or_else(Metric::placeholder)
    }
}

/// Stored activity record, ready for templating.
///
/// Formatted fields hold either a rendered value or [`PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayActivity {
    /// Strava activity ID (dedup key)
    pub id: u64,
    pub name: String,
    /// Start date as reported by Strava, local time preferred
    pub date: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Kilometers, two decimals
    pub distance: String,
    /// `HH:MM:SS`
    pub moving_time: String,
    /// Average pace, `M:SS` per km
    pub pace: String,
    /// Pace at max speed, `M:SS` per km
    pub max_pace: String,
    /// km/h, one decimal
    pub average_speed: String,
    /// km/h, one decimal
    pub max_speed: String,
    pub average_heartrate: Metric,
    pub max_heartrate: Metric,
    /// Elevation gain in whole meters
    pub ascent: Metric,
    pub elev_high: Metric,
    pub elev_low: Metric,
    pub summary_polyline: Option<String>,
    /// Fields of an already-stored record that this version does not know.
    /// Kept so rewriting the store never drops data.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
