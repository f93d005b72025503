// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tzlink-core operations.

use thiserror::Error;

/// All possible errors that can occur in tzlink-core operations.
///
/// Resolving offsets and hemispheres is total; only decoding a message
/// received from elsewhere can fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown message key: '{0}'\n  hint: valid keys are: tz_offset, hemisphere, 10, 11")]
    UnknownKey(String),

    #[error("invalid value for '{key}': {value}")]
    InvalidValue { key: String, value: String },

    #[error("message is missing the tz_offset key")]
    MissingOffset,

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for tzlink-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
