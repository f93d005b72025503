// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the fixed providers and the lookup timeout.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use super::mock::MockLocation;
use super::{lookup, DeniedLocation, FixedLocation, LocationError, LocationProvider};
use tzlink_core::Coordinate;

#[tokio::test]
async fn fixed_location_reports_latitude() {
    let provider = FixedLocation::new(-33.9);
    let coordinate = provider.current_position().await.unwrap();
    assert_eq!(coordinate, Coordinate::new(-33.9));
}

#[tokio::test]
async fn denied_location_always_fails() {
    let provider = DeniedLocation;
    for _ in 0..3 {
        assert_eq!(
            provider.current_position().await,
            Err(LocationError::Denied)
        );
    }
}

#[tokio::test(start_paused = true)]
async fn lookup_times_out_slow_provider() {
    let provider = MockLocation::always(Ok(Coordinate::new(10.0)))
        .then(Duration::from_secs(45), Ok(Coordinate::new(-10.0)));

    let result = lookup(&provider, Duration::from_secs(30)).await;
    assert_eq!(result, Err(LocationError::Timeout));
}

#[tokio::test(start_paused = true)]
async fn lookup_passes_through_answer_within_timeout() {
    let provider = MockLocation::always(Ok(Coordinate::new(10.0)))
        .then(Duration::from_secs(5), Ok(Coordinate::new(-10.0)));

    let result = lookup(&provider, Duration::from_secs(30)).await;
    assert_eq!(result, Ok(Coordinate::new(-10.0)));
    assert_eq!(provider.calls(), 1);
}

#[test]
fn location_error_display() {
    assert_eq!(LocationError::Denied.to_string(), "location access denied");
    assert!(LocationError::Unavailable("no fix".into())
        .to_string()
        .contains("no fix"));
}
