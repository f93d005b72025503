// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Flat key/value message delivered to the paired device.
//!
//! The watch app accepts a dictionary of integer values. Keys may be sent
//! either by name or by the numeric message-key ids the watch app registers:
//!
//! | name         | id   | value                       |
//! |--------------|------|-----------------------------|
//! | `tz_offset`  | `10` | seconds east of UTC, signed |
//! | `hemisphere` | `11` | `0` northern, `1` southern  |
//!
//! `hemisphere` is omitted entirely when unknown.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::report::{Hemisphere, TimezoneReport};

const TZ_OFFSET_NAME: &str = "tz_offset";
const HEMISPHERE_NAME: &str = "hemisphere";
const TZ_OFFSET_ID: &str = "10";
const HEMISPHERE_ID: &str = "11";

/// How message keys are spelled on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStyle {
    /// `tz_offset` / `hemisphere`.
    #[default]
    Named,
    /// `10` / `11`.
    Numeric,
}

impl KeyStyle {
    fn tz_offset_key(self) -> &'static str {
        match self {
            KeyStyle::Named => TZ_OFFSET_NAME,
            KeyStyle::Numeric => TZ_OFFSET_ID,
        }
    }

    fn hemisphere_key(self) -> &'static str {
        match self {
            KeyStyle::Named => HEMISPHERE_NAME,
            KeyStyle::Numeric => HEMISPHERE_ID,
        }
    }
}

/// Which report field a wire key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    TzOffset,
    Hemisphere,
}

fn field_for_key(key: &str) -> Option<Field> {
    match key {
        TZ_OFFSET_NAME | TZ_OFFSET_ID => Some(Field::TzOffset),
        HEMISPHERE_NAME | HEMISPHERE_ID => Some(Field::Hemisphere),
        _ => None,
    }
}

/// An ordered, flat dictionary of integer values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMessage {
    entries: Vec<(String, i32)>,
}

impl AppMessage {
    /// Builds the outbound message for a report.
    pub fn from_report(report: &TimezoneReport, style: KeyStyle) -> Self {
        let mut entries = vec![(
            style.tz_offset_key().to_string(),
            report.tz_offset_seconds(),
        )];
        if let Some(h) = report.hemisphere() {
            entries.push((style.hemisphere_key().to_string(), i32::from(h.as_u8())));
        }
        AppMessage { entries }
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    /// Returns true if the message contains `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Serializes to a JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a JSON object in either key style.
    pub fn from_json(s: &str) -> Result<Self> {
        let map: serde_json::Map<String, Value> = serde_json::from_str(s)?;
        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            if field_for_key(&key).is_none() {
                return Err(Error::UnknownKey(key));
            }
            let n = value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| Error::InvalidValue {
                    key: key.clone(),
                    value: value.to_string(),
                })?;
            entries.push((key, n));
        }
        Ok(AppMessage { entries })
    }

    /// Decodes the report carried by this message.
    pub fn to_report(&self) -> Result<TimezoneReport> {
        let mut tz_offset = None;
        let mut hemisphere = None;

        for (key, value) in self.iter() {
            match field_for_key(key) {
                Some(Field::TzOffset) => tz_offset = Some(value),
                Some(Field::Hemisphere) => {
                    let h = u8::try_from(value)
                        .ok()
                        .and_then(|v| Hemisphere::try_from(v).ok())
                        .ok_or_else(|| Error::InvalidValue {
                            key: key.to_string(),
                            value: value.to_string(),
                        })?;
                    hemisphere = Some(h);
                }
                None => return Err(Error::UnknownKey(key.to_string())),
            }
        }

        let tz_offset = tz_offset.ok_or(Error::MissingOffset)?;
        Ok(TimezoneReport::new(tz_offset, hemisphere))
    }
}

impl Serialize for AppMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
