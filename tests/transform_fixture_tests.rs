// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transform checks against a recorded activity page.
//!
//! Every formatted field must be a rendered value or the placeholder;
//! a NaN or null sneaking into the store breaks the site templates.

use strava_sync::models::{Metric, RawActivity, PLACEHOLDER};
use strava_sync::services::transform;

mod common;
use common::activities_fixture;

fn fixture_activities() -> Vec<RawActivity> {
    serde_json::from_value(activities_fixture()).expect("fixture should decode")
}

fn is_pace(value: &str) -> bool {
    match value.split_once(':') {
        Some((min, sec)) => {
            !min.is_empty()
                && min.chars().all(|c| c.is_ascii_digit())
                && sec.len() == 2
                && sec.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

#[test]
fn test_fixture_decodes() {
    let activities = fixture_activities();
    assert_eq!(activities.len(), 3);
    assert_eq!(activities[0].id, 12918234003);
    assert_eq!(activities[0].activity_type.as_deref(), Some("Ride"));
}

#[test]
fn test_formatted_fields_are_valid_or_placeholder() {
    for raw in fixture_activities() {
        let activity = transform(&raw);

        for pace in [&activity.pace, &activity.max_pace] {
            assert!(
                pace == PLACEHOLDER || is_pace(pace),
                "bad pace {pace:?} for {}",
                activity.id
            );
        }
        for text in [
            &activity.distance,
            &activity.average_speed,
            &activity.max_speed,
        ] {
            assert!(
                text == PLACEHOLDER || text.parse::<f64>().is_ok_and(f64::is_finite),
                "bad number {text:?} for {}",
                activity.id
            );
        }
        assert!(
            activity.moving_time == PLACEHOLDER || activity.moving_time.len() >= 8,
            "bad duration {:?}",
            activity.moving_time
        );
        if let Metric::Number(n) = &activity.ascent {
            assert!(n.is_i64() || n.is_u64(), "ascent must be whole meters");
        }
    }
}

#[test]
fn test_indoor_activity_has_no_pace() {
    let lifting = fixture_activities()
        .into_iter()
        .find(|a| a.id == 12899998712)
        .expect("weight training in fixture");

    let activity = transform(&lifting);
    assert_eq!(activity.distance, PLACEHOLDER);
    assert_eq!(activity.pace, PLACEHOLDER);
    assert_eq!(activity.max_pace, PLACEHOLDER);
    assert_eq!(activity.summary_polyline, None);
}
