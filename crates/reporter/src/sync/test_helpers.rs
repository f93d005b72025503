// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for sync tests.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use tzlink_core::{FixedOffsetClock, LocalClock, TimezoneReport};

use super::scheduler::{Scheduler, SchedulerConfig};
use super::transport_tests::MockTransport;
use crate::location::mock::MockLocation;

/// UTC-5, the zone used by most scenarios.
pub const EST: i32 = -18_000;

/// A clock whose offset can be changed mid-test, like a DST switch.
#[derive(Debug, Clone)]
pub struct SwitchableClock {
    offset: Arc<AtomicI32>,
}

impl SwitchableClock {
    pub fn new(seconds: i32) -> Self {
        SwitchableClock {
            offset: Arc::new(AtomicI32::new(seconds)),
        }
    }

    pub fn set(&self, seconds: i32) {
        self.offset.store(seconds, Ordering::SeqCst);
    }
}

impl LocalClock for SwitchableClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(self.offset.load(Ordering::SeqCst)).unwrap();
        Utc::now().with_timezone(&offset)
    }
}

pub fn est_clock() -> Arc<dyn LocalClock> {
    Arc::new(FixedOffsetClock::east(EST).unwrap())
}

pub fn make_scheduler(location: &MockLocation, transport: &MockTransport) -> Scheduler {
    make_scheduler_with(SchedulerConfig::default(), est_clock(), location, transport)
}

pub fn make_scheduler_with(
    config: SchedulerConfig,
    clock: Arc<dyn LocalClock>,
    location: &MockLocation,
    transport: &MockTransport,
) -> Scheduler {
    Scheduler::new(
        config,
        clock,
        Arc::new(location.clone()),
        Arc::new(transport.clone()),
    )
    .unwrap()
}

/// Decode every message a mock transport has seen.
pub fn reports(transport: &MockTransport) -> Vec<TimezoneReport> {
    transport
        .messages()
        .iter()
        .map(|m| m.to_report().unwrap())
        .collect()
}

/// Let the paused clock run forward by `ms` milliseconds.
pub async fn advance_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
