// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report scheduling.
//!
//! The scheduler runs one report cycle immediately and then one per interval.
//! Each cycle is split at its two suspension points:
//!
//! ```text
//! tick ──► offset ──► location lookup ──► report ──► deliver ──► log outcome
//!                     (awaited)                      (awaited)
//! ```
//!
//! Lookups and deliveries from different cycles may be in flight at the same
//! time, but everything runs on the scheduler's own task; nothing is shared
//! between cycles. A lookup that finishes after a newer cycle has started is
//! stale and its report is dropped. Delivery outcomes are only logged.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, warn};
use tzlink_core::{compute_offset_seconds, AppMessage, KeyStyle, LocalClock, TimezoneReport};

use super::transport::{Transport, TransportResult};
use crate::error::{Error, Result};
use crate::location::{lookup, LocationProvider};

/// Default report period.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Default time allowed for one location lookup.
pub const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Timing and encoding settings for the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Period between report cycles.
    pub interval: Duration,
    /// Maximum time a single location lookup may take.
    pub location_timeout: Duration,
    /// Key style of outbound messages.
    pub keys: KeyStyle,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            interval: DEFAULT_INTERVAL,
            location_timeout: DEFAULT_LOCATION_TIMEOUT,
            keys: KeyStyle::Named,
        }
    }
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Drives report cycles against a clock, a location provider and a transport.
pub struct Scheduler {
    config: SchedulerConfig,
    clock: Arc<dyn LocalClock>,
    location: Arc<dyn LocationProvider>,
    transport: Arc<dyn Transport>,
}

impl Scheduler {
    /// Creates a scheduler. Both the interval and the location timeout must
    /// be non-zero.
    pub fn new(
        config: SchedulerConfig,
        clock: Arc<dyn LocalClock>,
        location: Arc<dyn LocationProvider>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        if config.interval.is_zero() {
            return Err(Error::InvalidConfig(
                "report interval must be greater than 0".to_string(),
            ));
        }
        if config.location_timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "location timeout must be greater than 0".to_string(),
            ));
        }
        Ok(Scheduler {
            config,
            clock,
            location,
            transport,
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn location_name(&self) -> &'static str {
        self.location.name()
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Builds one report: reads the offset now, then looks up the location.
    ///
    /// The offset is taken before the lookup is started, so a slow lookup
    /// cannot shift which offset the report carries. Lookup failures produce
    /// a report without a hemisphere.
    pub fn build_report(&self) -> BoxFuture<TimezoneReport> {
        let tz_offset = compute_offset_seconds(self.clock.as_ref());
        let location = Arc::clone(&self.location);
        let timeout = self.config.location_timeout;

        Box::pin(async move {
            let coordinate = match lookup(location.as_ref(), timeout).await {
                Ok(coordinate) => Some(coordinate),
                Err(e) => {
                    debug!("location lookup failed, omitting hemisphere: {}", e);
                    None
                }
            };
            TimezoneReport::from_lookup(tz_offset, coordinate.as_ref())
        })
    }

    /// Hands a report to the transport and resolves once it is acknowledged.
    pub fn deliver(&self, report: &TimezoneReport) -> BoxFuture<TransportResult<()>> {
        let msg = AppMessage::from_report(report, self.config.keys);
        let transport = Arc::clone(&self.transport);
        Box::pin(async move { transport.deliver(msg).await })
    }

    /// Delivers a report and logs the acknowledgement.
    fn deliver_and_log(&self, report: &TimezoneReport) -> BoxFuture<()> {
        let delivery = self.deliver(report);
        Box::pin(async move {
            match delivery.await {
                Ok(()) => info!("timezone info sent"),
                Err(e) => warn!("timezone info send error: {}", e),
            }
        })
    }

    /// Runs report cycles forever.
    ///
    /// Tick 0 fires immediately, then one tick per interval. The returned
    /// future never completes; stop it by dropping or aborting its task.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.config.interval);
        let mut latest_tick: u64 = 0;
        let mut next_tick: u64 = 0;
        let mut lookups: FuturesUnordered<BoxFuture<(u64, TimezoneReport)>> =
            FuturesUnordered::new();
        let mut deliveries: FuturesUnordered<BoxFuture<()>> = FuturesUnordered::new();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let tick = next_tick;
                    next_tick += 1;
                    latest_tick = tick;
                    debug!(tick, "report cycle started");

                    let report = self.build_report();
                    lookups.push(Box::pin(async move { (tick, report.await) }));
                }

                Some((tick, report)) = lookups.next(), if !lookups.is_empty() => {
                    if tick != latest_tick {
                        // Only the latest cycle delivers; the whole stale report is dropped.
                        debug!(tick, latest_tick, "discarding stale report");
                        continue;
                    }
                    info!(
                        tz_offset = report.tz_offset_seconds(),
                        hemisphere = ?report.hemisphere().map(|h| h.as_u8()),
                        "sending {}",
                        report
                    );
                    deliveries.push(self.deliver_and_log(&report));
                }

                Some(()) = deliveries.next(), if !deliveries.is_empty() => {}
            }
        }
    }
}
