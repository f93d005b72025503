// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the tzlink reporter.

use std::path::PathBuf;

use thiserror::Error;

use crate::sync::TransportError;

/// Errors surfaced by the reporter.
///
/// Report cycles themselves never fail; these cover startup, configuration,
/// and the one-shot mode where a delivery outcome is returned to the caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("reporter is already running\n  hint: the ready signal is handled only once")]
    AlreadyRunning,

    #[error("delivery failed: {0}")]
    Transport(#[from] TransportError),
}

/// A specialized Result type for reporter operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
