// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tzlink-core: Shared library for the tzlink companion reporter
//!
//! This crate provides the pure pieces of the reporter: resolving the local
//! UTC offset, classifying a coordinate into a hemisphere, the per-cycle
//! report value, and the flat message sent to the paired device.

pub mod error;
pub mod message;
pub mod offset;
pub mod report;

pub use error::{Error, Result};
pub use message::{AppMessage, KeyStyle};
pub use offset::{
    classify_hemisphere, compute_offset_seconds, FixedOffsetClock, LocalClock, SystemLocalClock,
};
pub use report::{Coordinate, Hemisphere, TimezoneReport};
