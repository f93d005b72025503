// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tzlink: companion-side timezone reporter
//!
//! Tells a paired device its local UTC offset and, when a position is
//! available, which hemisphere it is in. A report is sent as soon as the host
//! is ready and then once per interval.

pub mod config;
pub mod error;
pub mod location;
pub mod logging;
pub mod sync;

pub use config::{Config, LocationConfig, Overrides, TransportConfig};
pub use error::{Error, Result};
pub use sync::{Reporter, Scheduler, SchedulerConfig, SyncHandle};
