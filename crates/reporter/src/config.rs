// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reporter configuration.
//!
//! Configuration is read from `<config_dir>/tzlink/config.toml` (or the path
//! given with `--config`) and includes:
//! - `interval_secs`: period between reports (default: 60)
//! - `location_timeout_ms`: time allowed for one location lookup (default: 30000)
//! - `keys`: `named` or `numeric` message keys
//! - `utc_offset`: pin the reported offset instead of reading the system zone
//! - `[location]`: where the hemisphere comes from
//! - `[transport]`: how messages reach the paired device
//!
//! Command-line flags override the file through [`Overrides`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tzlink_core::{FixedOffsetClock, KeyStyle, LocalClock, SystemLocalClock};

use crate::error::{Error, Result};
use crate::location::{
    DeniedLocation, FixedLocation, GpsdLocation, LocationProvider, DEFAULT_GPSD_ADDR,
};
use crate::sync::{SchedulerConfig, StdoutTransport, Transport, WebSocketTransport};

const CONFIG_DIR_NAME: &str = "tzlink";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_WEBSOCKET_URL: &str = "ws://127.0.0.1:9000";

/// Reporter configuration stored in `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Seconds between report cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Milliseconds allowed for one location lookup.
    #[serde(default = "default_location_timeout_ms")]
    pub location_timeout_ms: u64,
    /// Message key style.
    #[serde(default)]
    pub keys: KeyStyle,
    /// Fixed offset in seconds east of UTC; the system zone is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<i32>,
    /// Location provider.
    #[serde(default)]
    pub location: LocationConfig,
    /// Outbound transport.
    #[serde(default)]
    pub transport: TransportConfig,
}

fn default_interval_secs() -> u64 {
    60
}

fn default_location_timeout_ms() -> u64 {
    30_000
}

fn default_gpsd_addr() -> String {
    DEFAULT_GPSD_ADDR.to_string()
}

fn default_websocket_url() -> String {
    DEFAULT_WEBSOCKET_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            interval_secs: default_interval_secs(),
            location_timeout_ms: default_location_timeout_ms(),
            keys: KeyStyle::default(),
            utc_offset: None,
            location: LocationConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

/// Where the hemisphere comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationConfig {
    /// A configured latitude.
    Fixed { latitude: f64 },
    /// A gpsd daemon.
    Gpsd {
        #[serde(default = "default_gpsd_addr")]
        addr: String,
    },
    /// Location sharing disabled; reports never carry a hemisphere.
    #[serde(rename = "none")]
    Disabled,
}

impl Default for LocationConfig {
    fn default() -> Self {
        LocationConfig::Gpsd {
            addr: default_gpsd_addr(),
        }
    }
}

impl LocationConfig {
    /// Builds the configured provider.
    pub fn build(&self) -> Arc<dyn LocationProvider> {
        match self {
            LocationConfig::Fixed { latitude } => Arc::new(FixedLocation::new(*latitude)),
            LocationConfig::Gpsd { addr } => Arc::new(GpsdLocation::new(addr.clone())),
            LocationConfig::Disabled => Arc::new(DeniedLocation),
        }
    }
}

/// How messages reach the paired device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransportConfig {
    /// A WebSocket bridge to the device.
    #[serde(rename = "websocket")]
    WebSocket {
        #[serde(default = "default_websocket_url")]
        url: String,
    },
    /// JSON lines on stdout.
    Stdout,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig::WebSocket {
            url: default_websocket_url(),
        }
    }
}

impl TransportConfig {
    /// Builds the configured transport.
    pub fn build(&self) -> Arc<dyn Transport> {
        match self {
            TransportConfig::WebSocket { url } => Arc::new(WebSocketTransport::new(url.clone())),
            TransportConfig::Stdout => Arc::new(StdoutTransport::new()),
        }
    }
}

/// Command-line overrides applied on top of the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub interval_secs: Option<u64>,
    pub utc_offset: Option<i32>,
    pub latitude: Option<f64>,
    pub no_location: bool,
    pub url: Option<String>,
    pub stdout: bool,
    pub numeric_keys: bool,
}

impl Config {
    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is tried
    /// and defaults are used if there is no file there.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::ConfigNotFound(path.to_path_buf()));
                }
                Self::read(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Config::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the scheduler cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            return Err(Error::InvalidConfig(
                "interval_secs must be greater than 0".to_string(),
            ));
        }
        if self.location_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "location_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if let Some(offset) = self.utc_offset {
            if FixedOffsetClock::east(offset).is_none() {
                return Err(Error::InvalidConfig(format!(
                    "utc_offset {offset} is out of range (must be within ±86399 seconds)"
                )));
            }
        }
        if let LocationConfig::Fixed { latitude } = self.location {
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(Error::InvalidConfig(format!(
                    "latitude {latitude} is out of range (must be within ±90)"
                )));
            }
        }
        Ok(())
    }

    /// Applies command-line overrides and re-validates.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Config> {
        if let Some(interval) = overrides.interval_secs {
            self.interval_secs = interval;
        }
        if let Some(offset) = overrides.utc_offset {
            self.utc_offset = Some(offset);
        }
        if let Some(latitude) = overrides.latitude {
            self.location = LocationConfig::Fixed { latitude };
        }
        if overrides.no_location {
            self.location = LocationConfig::Disabled;
        }
        if let Some(url) = &overrides.url {
            self.transport = TransportConfig::WebSocket { url: url.clone() };
        }
        if overrides.stdout {
            self.transport = TransportConfig::Stdout;
        }
        if overrides.numeric_keys {
            self.keys = KeyStyle::Numeric;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            interval: Duration::from_secs(self.interval_secs),
            location_timeout: Duration::from_millis(self.location_timeout_ms),
            keys: self.keys,
        }
    }

    /// Builds the clock: pinned when `utc_offset` is set, system otherwise.
    pub fn clock(&self) -> Result<Arc<dyn LocalClock>> {
        match self.utc_offset {
            Some(offset) => {
                let clock = FixedOffsetClock::east(offset).ok_or_else(|| {
                    Error::InvalidConfig(format!("utc_offset {offset} is out of range"))
                })?;
                Ok(Arc::new(clock))
            }
            None => Ok(Arc::new(SystemLocalClock)),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
