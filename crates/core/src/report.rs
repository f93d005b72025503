// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The per-cycle timezone report and the values it is built from.
//!
//! A [`TimezoneReport`] is constructed fresh on every report cycle and never
//! mutated afterwards. Its serialized form is the field-exact payload expected
//! by the watch app:
//!
//! ```json
//! {"tz_offset": -18000, "hemisphere": 1}
//! ```
//!
//! `hemisphere` is omitted entirely when no coordinate was obtained.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::offset::classify_hemisphere;

/// A position returned by a location lookup.
///
/// Only the latitude is consumed; providers drop everything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Degrees north of the equator (negative south).
    pub latitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64) -> Self {
        Coordinate { latitude }
    }
}

/// Which half of the globe the companion is in.
///
/// Serialized as the integer the watch app expects: `0` northern (including
/// the equator), `1` southern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Hemisphere {
    Northern,
    Southern,
}

impl Hemisphere {
    /// Returns the wire value.
    pub fn as_u8(self) -> u8 {
        match self {
            Hemisphere::Northern => 0,
            Hemisphere::Southern => 1,
        }
    }
}

impl From<Hemisphere> for u8 {
    fn from(h: Hemisphere) -> u8 {
        h.as_u8()
    }
}

impl TryFrom<u8> for Hemisphere {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Hemisphere::Northern),
            1 => Ok(Hemisphere::Southern),
            other => Err(format!("hemisphere must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Timezone information for one report cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneReport {
    #[serde(rename = "tz_offset")]
    tz_offset_seconds: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hemisphere: Option<Hemisphere>,
}

impl TimezoneReport {
    /// Creates a report from already-resolved parts.
    pub fn new(tz_offset_seconds: i32, hemisphere: Option<Hemisphere>) -> Self {
        TimezoneReport {
            tz_offset_seconds,
            hemisphere,
        }
    }

    /// Creates a report from the outcome of a location lookup.
    ///
    /// `None` (lookup failed or was denied) yields a report without a
    /// hemisphere.
    pub fn from_lookup(tz_offset_seconds: i32, coordinate: Option<&Coordinate>) -> Self {
        TimezoneReport::new(tz_offset_seconds, classify_hemisphere(coordinate))
    }

    /// Signed offset from UTC in seconds, positive east of UTC.
    pub fn tz_offset_seconds(&self) -> i32 {
        self.tz_offset_seconds
    }

    pub fn hemisphere(&self) -> Option<Hemisphere> {
        self.hemisphere
    }
}

impl fmt::Display for TimezoneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hemisphere {
            Some(h) => write!(f, "tz_offset={} hemisphere={}", self.tz_offset_seconds, h),
            None => write!(f, "tz_offset={} hemisphere=none", self.tz_offset_seconds),
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
