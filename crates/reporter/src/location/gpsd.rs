// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Location from a gpsd daemon.
//!
//! gpsd speaks newline-delimited JSON over TCP. After a `?WATCH` command the
//! daemon streams reports; the first `TPV` report carrying a 2D or 3D fix
//! answers the lookup and the connection is dropped.

use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::debug;
use tzlink_core::Coordinate;

use super::{LocationError, LocationProvider, LocationResult};

/// Address gpsd listens on by default.
pub const DEFAULT_GPSD_ADDR: &str = "127.0.0.1:2947";

const WATCH_COMMAND: &[u8] = b"?WATCH={\"enable\":true,\"json\":true};\n";

/// Minimum TPV mode that carries a usable latitude (2 = 2D fix).
const MIN_FIX_MODE: u8 = 2;

/// The subset of a gpsd report needed to extract a fix.
#[derive(Debug, Deserialize)]
struct GpsdReport {
    class: String,
    #[serde(default)]
    mode: u8,
    lat: Option<f64>,
}

/// Extracts a coordinate from one line of gpsd output.
///
/// Returns `None` for other report classes, TPV reports without a fix, and
/// lines that are not gpsd JSON.
pub(crate) fn parse_fix(line: &str) -> Option<Coordinate> {
    let report: GpsdReport = serde_json::from_str(line).ok()?;
    if report.class != "TPV" || report.mode < MIN_FIX_MODE {
        return None;
    }
    report.lat.map(Coordinate::new)
}

/// Location provider backed by gpsd.
#[derive(Debug, Clone)]
pub struct GpsdLocation {
    addr: String,
}

impl GpsdLocation {
    pub fn new(addr: impl Into<String>) -> Self {
        GpsdLocation { addr: addr.into() }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl Default for GpsdLocation {
    fn default() -> Self {
        Self::new(DEFAULT_GPSD_ADDR)
    }
}

impl LocationProvider for GpsdLocation {
    fn current_position(
        &self,
    ) -> Pin<Box<dyn Future<Output = LocationResult<Coordinate>> + Send + '_>> {
        Box::pin(async move {
            let stream = TcpStream::connect(&self.addr).await.map_err(|e| {
                LocationError::Unavailable(format!("cannot reach gpsd at {}: {}", self.addr, e))
            })?;
            let (reader, mut writer) = stream.into_split();

            writer
                .write_all(WATCH_COMMAND)
                .await
                .map_err(|e| LocationError::Unavailable(format!("gpsd write failed: {e}")))?;

            let mut lines = BufReader::new(reader).lines();
            loop {
                let line = lines
                    .next_line()
                    .await
                    .map_err(|e| LocationError::Unavailable(format!("gpsd read failed: {e}")))?;

                match line {
                    Some(line) => {
                        if let Some(coordinate) = parse_fix(&line) {
                            return Ok(coordinate);
                        }
                        debug!("gpsd: skipping report without fix");
                    }
                    None => {
                        return Err(LocationError::Unavailable(
                            "gpsd closed the connection before reporting a fix".to_string(),
                        ));
                    }
                }
            }
        })
    }

    fn name(&self) -> &'static str {
        "gpsd"
    }
}
