//! # Temporal Types — UTC Millisecond Timestamps
//!
//! Envelope timestamps (`requestTime`, `responseTime`) use the pattern
//! `yyyy-MM-dd'T'HH:mm:ss.SSS'Z'`: UTC, exactly three fractional digits,
//! literal `Z` suffix. [`Timestamp`] enforces that shape at parse time and
//! always renders it on output.
//!
//! Offsets such as `+00:00` are rejected even though they denote UTC, as are
//! timestamps with zero, six, or nine fractional digits.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// `chrono` format string for the envelope timestamp pattern.
pub const UTC_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Length of a well-formed timestamp, e.g. `2026-01-15T12:00:00.000Z`.
const FORMATTED_LEN: usize = 24;

/// A UTC timestamp truncated to millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to milliseconds.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Wrap a `DateTime<Utc>`, discarding sub-millisecond precision.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_millis(dt))
    }

    /// Parse a timestamp in the `yyyy-MM-dd'T'HH:mm:ss.SSS'Z'` pattern.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTimestamp`] when the input does not match
    /// the pattern exactly.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if s.len() != FORMATTED_LEN || !s.ends_with('Z') {
            return Err(CoreError::InvalidTimestamp {
                value: s.to_string(),
                reason: "expected yyyy-MM-ddTHH:mm:ss.SSSZ".to_string(),
            });
        }
        let naive = NaiveDateTime::parse_from_str(s, UTC_DATETIME_FORMAT).map_err(|e| {
            CoreError::InvalidTimestamp {
                value: s.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self::from_utc(naive.and_utc()))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Whether `self` lies within `tolerance` of `reference`, in either direction.
    pub fn is_within(&self, reference: &Timestamp, tolerance: chrono::Duration) -> bool {
        let delta = self.0.signed_duration_since(reference.0);
        delta.abs() <= tolerance
    }

    /// Render in the envelope pattern, e.g. `2026-01-15T12:00:00.000Z`.
    pub fn to_envelope_string(&self) -> String {
        self.0.format(UTC_DATETIME_FORMAT).to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_envelope_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_envelope_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

fn truncate_to_millis(dt: DateTime<Utc>) -> DateTime<Utc> {
    let millis = dt.nanosecond() / 1_000_000;
    dt.with_nanosecond(millis * 1_000_000).unwrap_or(dt)
}
