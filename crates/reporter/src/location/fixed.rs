// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Providers that never touch a positioning device.

use std::future::Future;
use std::pin::Pin;

use tzlink_core::Coordinate;

use super::{LocationError, LocationProvider, LocationResult};

/// Always reports the configured latitude.
///
/// Suits a companion that never leaves home, or hosts with no positioning
/// hardware where the user still wants the hemisphere set.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    latitude: f64,
}

impl FixedLocation {
    pub fn new(latitude: f64) -> Self {
        FixedLocation { latitude }
    }
}

impl LocationProvider for FixedLocation {
    fn current_position(
        &self,
    ) -> Pin<Box<dyn Future<Output = LocationResult<Coordinate>> + Send + '_>> {
        let coordinate = Coordinate::new(self.latitude);
        Box::pin(async move { Ok(coordinate) })
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Always fails with [`LocationError::Denied`].
///
/// Used when location sharing is turned off; every report omits the
/// hemisphere.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocation;

impl LocationProvider for DeniedLocation {
    fn current_position(
        &self,
    ) -> Pin<Box<dyn Future<Output = LocationResult<Coordinate>> + Send + '_>> {
        Box::pin(async move { Err(LocationError::Denied) })
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
