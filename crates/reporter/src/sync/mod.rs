// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Timezone sync with the paired device.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Reporter   │────►│  Scheduler  │────►│  Transport  │────► paired device
//! │ (lifecycle) │     │ (timer loop)│     │   (trait)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │  Location   │  (optional, best effort)
//!                     │  Provider   │
//!                     └─────────────┘
//! ```
//!
//! # Features
//!
//! - Report on host ready, then on a fixed interval
//! - Hemisphere omitted when location is denied, unavailable, or slow
//! - Fire-and-forget delivery; outcomes are logged, never retried
//! - Injectable clock, location provider and transport for testing

mod host;
mod scheduler;
mod transport;

pub use host::{Reporter, ReporterState, SyncHandle};
pub use scheduler::{Scheduler, SchedulerConfig, DEFAULT_INTERVAL, DEFAULT_LOCATION_TIMEOUT};
pub use transport::{
    StdoutTransport, Transport, TransportError, TransportResult, WebSocketTransport,
    DEFAULT_SEND_TIMEOUT,
};

#[cfg(test)]
mod test_helpers;



#[cfg(test)]
mod transport_tests;
