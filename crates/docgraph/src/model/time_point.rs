//! Ledger timestamps.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecodeError;
use crate::util::datetime::{format_timestamp, parse_timestamp};

/// Earliest representable instant, `0000-01-01T00:00:00.000`.
pub const MIN_EPOCH_US: i64 = -62_167_219_200_000_000;

/// Latest representable instant, `9999-12-31T23:59:59.999`.
pub const MAX_EPOCH_US: i64 = 253_402_300_799_999_000;

/// Microseconds since the Unix epoch, truncated to whole milliseconds.
///
/// The textual form only carries milliseconds, so sub-millisecond digits are
/// dropped on construction. Values are limited to four-digit years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePoint {
    epoch_us: i64,
}

impl TimePoint {
    pub fn from_micros(epoch_us: i64) -> Result<Self, DecodeError> {
        if !(MIN_EPOCH_US..=MAX_EPOCH_US + 999).contains(&epoch_us) {
            return Err(out_of_range(epoch_us));
        }
        Ok(Self {
            epoch_us: epoch_us.div_euclid(1000) * 1000,
        })
    }

    pub fn from_millis(epoch_ms: i64) -> Result<Self, DecodeError> {
        epoch_ms
            .checked_mul(1000)
            .ok_or_else(|| out_of_range(epoch_ms))
            .and_then(Self::from_micros)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as i64)
            .unwrap_or(0);
        Self::from_micros(micros).unwrap_or_default()
    }

    pub fn parse(s: &str) -> Result<Self, DecodeError> {
        let micros = parse_timestamp(s).map_err(|e| DecodeError::InvalidTimePoint {
            value: s.to_string(),
            reason: e.message,
        })?;
        Self::from_micros(micros)
    }

    pub const fn as_micros(&self) -> i64 {
        self.epoch_us
    }

    pub const fn as_millis(&self) -> i64 {
        self.epoch_us / 1000
    }
}

fn out_of_range(value: i64) -> DecodeError {
    DecodeError::InvalidTimePoint {
        value: value.to_string(),
        reason: "outside years 0000 to 9999".to_string(),
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_timestamp(self.epoch_us))
    }
}

impl FromStr for TimePoint {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimePoint::parse(s)
    }
}

impl Serialize for TimePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimePoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TimePoint::parse(&s).map_err(serde::de::Error::custom)
    }
}
