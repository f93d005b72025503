// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Location lookup for the hemisphere indicator.
//!
//! Provides a trait-based provider layer that enables:
//! - A fixed, configured latitude
//! - A gpsd daemon on the local machine
//! - A provider that always reports location sharing as denied
//! - Mock providers for unit testing
//!
//! A lookup is single-shot: every call asks the provider for a fresh
//! position. Failure is never fatal to a report cycle; the report simply goes
//! out without a hemisphere.

mod fixed;
mod gpsd;

pub use fixed::{DeniedLocation, FixedLocation};
pub use gpsd::{GpsdLocation, DEFAULT_GPSD_ADDR};

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tzlink_core::Coordinate;

/// Error type for location lookups.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    /// The user or host refused to share location.
    #[error("location access denied")]
    Denied,

    /// No position could be obtained.
    #[error("location unavailable: {0}")]
    Unavailable(String),

    /// The provider did not answer in time.
    #[error("location lookup timed out")]
    Timeout,
}

/// Result type for location lookups.
pub type LocationResult<T> = Result<T, LocationError>;

/// Source of the companion's current position.
pub trait LocationProvider: Send + Sync {
    /// Resolve the current position once.
    fn current_position(
        &self,
    ) -> Pin<Box<dyn Future<Output = LocationResult<Coordinate>> + Send + '_>>;

    /// Short name used in log lines.
    fn name(&self) -> &'static str;
}

/// Runs a single lookup, turning an expired `timeout` into
/// [`LocationError::Timeout`].
///
/// The provider's future is dropped on timeout.
pub async fn lookup(
    provider: &dyn LocationProvider,
    timeout: Duration,
) -> LocationResult<Coordinate> {
    match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout),
    }
}

#[cfg(test)]
mod fixed_tests;


#[cfg(test)]
pub(crate) mod mock;
