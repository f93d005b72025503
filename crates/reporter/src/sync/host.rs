// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle of the reporter: idle until the host is ready, then running
//! until the process ends.

use tokio::task::JoinHandle;
use tracing::{error, info};
use tzlink_core::TimezoneReport;

use super::scheduler::Scheduler;
use crate::error::{Error, Result};

/// Reporter lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReporterState {
    /// Waiting for the host's ready signal.
    Idle,
    /// Timer armed, cycles running.
    Running,
}

/// Handle to the running scheduler task.
///
/// Nothing in the reporter stops the timer; the handle exists so that tests
/// and shutdown paths can.
#[derive(Debug)]
pub struct SyncHandle {
    task: JoinHandle<()>,
}

impl SyncHandle {
    fn spawn(scheduler: Scheduler) -> Self {
        SyncHandle {
            task: tokio::spawn(scheduler.run()),
        }
    }

    /// Stop the timer. In-flight lookups and deliveries are dropped.
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the scheduler task to end (only after [`stop`](Self::stop)).
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            if e.is_panic() {
                error!("scheduler task panicked: {}", e);
            }
        }
    }
}

/// Owns the scheduler and performs the one-time `Idle → Running` transition.
pub struct Reporter {
    scheduler: Option<Scheduler>,
    handle: Option<SyncHandle>,
}

impl Reporter {
    pub fn new(scheduler: Scheduler) -> Self {
        Reporter {
            scheduler: Some(scheduler),
            handle: None,
        }
    }

    pub fn state(&self) -> ReporterState {
        if self.handle.is_some() {
            ReporterState::Running
        } else {
            ReporterState::Idle
        }
    }

    /// Handle the host's ready signal: send the first report now and arm the
    /// recurring timer.
    ///
    /// Must be called from within a tokio runtime. A second call returns
    /// [`Error::AlreadyRunning`].
    pub fn ready(&mut self) -> Result<&SyncHandle> {
        let scheduler = self.scheduler.take().ok_or(Error::AlreadyRunning)?;
        info!(
            interval_secs = scheduler.config().interval.as_secs(),
            location = scheduler.location_name(),
            transport = scheduler.transport_name(),
            "host ready, starting timezone sync"
        );
        Ok(self.handle.insert(SyncHandle::spawn(scheduler)))
    }

    /// Handle to the running scheduler, once started.
    pub fn handle(&self) -> Option<&SyncHandle> {
        self.handle.as_ref()
    }

    /// Consume the reporter, keeping only the running scheduler's handle.
    pub fn into_handle(self) -> Option<SyncHandle> {
        self.handle
    }

    /// Run a single report cycle and wait for its delivery outcome.
    ///
    /// Does not arm the timer. Only valid while idle.
    pub async fn run_once(&self) -> Result<TimezoneReport> {
        let scheduler = self.scheduler.as_ref().ok_or(Error::AlreadyRunning)?;
        let report = scheduler.build_report().await;
        info!("sending {}", report);
        scheduler.deliver(&report).await?;
        info!("timezone info sent");
        Ok(report)
    }
}
