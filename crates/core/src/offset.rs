// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offset resolution: local UTC offset and hemisphere classification.
//!
//! Both operations are pure and total. The offset is read from a
//! [`LocalClock`] on every call and never cached, since the host may cross a
//! DST boundary or change zones between report cycles.

use chrono::{DateTime, FixedOffset, Local, Utc};

use crate::report::{Coordinate, Hemisphere};

/// Trait for reading the current local wall-clock time.
///
/// This allows injecting a fixed zone for testing.
pub trait LocalClock: Send + Sync {
    /// Returns the current time in the host's local zone.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local clock backed by the operating system's zone database.
#[derive(Debug, Default)]
pub struct SystemLocalClock;

impl LocalClock for SystemLocalClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }
}

/// A clock pinned to a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedOffsetClock {
    offset: FixedOffset,
}

impl FixedOffsetClock {
    /// Creates a clock `seconds` east of UTC.
    ///
    /// Returns `None` if the offset is a day or more away from UTC.
    pub fn east(seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(|offset| FixedOffsetClock { offset })
    }
}

impl LocalClock for FixedOffsetClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

impl<C: LocalClock + ?Sized> LocalClock for &C {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

/// Returns the signed offset from UTC in seconds, positive east of UTC.
///
/// Any sub-minute part (historic local mean time) is truncated toward zero,
/// so the result is always a whole number of minutes.
pub fn compute_offset_seconds<C: LocalClock + ?Sized>(clock: &C) -> i32 {
    let seconds = clock.now().offset().local_minus_utc();
    seconds / 60 * 60
}

/// Classifies a coordinate into a hemisphere.
///
/// Latitude `0.0` (and `-0.0`) is northern. A NaN latitude is also northern,
/// since it does not compare below zero.
pub fn classify_hemisphere(coordinate: Option<&Coordinate>) -> Option<Hemisphere> {
    coordinate.map(|c| {
        if c.latitude < 0.0 {
            Hemisphere::Southern
        } else {
            Hemisphere::Northern
        }
    })
}

#[cfg(test)]
#[path = "offset_tests.rs"]
mod tests;
