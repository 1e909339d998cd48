//! Dashboard time range

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// The active time range; its boundaries back the `__from` and `__to` variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a time range.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidTimeRange` if `from` is after `to`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> DomainResult<Self> {
        if from > to {
            return Err(DomainError::InvalidTimeRange(format!(
                "start {from} is after end {to}"
            )));
        }
        Ok(Self { from, to })
    }

    /// Creates a time range from millisecond epoch boundaries.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidTimeRange` if a boundary is out of range or
    /// the start is after the end.
    pub fn from_millis(from_ms: i64, to_ms: i64) -> DomainResult<Self> {
        let from = DateTime::from_timestamp_millis(from_ms).ok_or_else(|| {
            DomainError::InvalidTimeRange(format!("start {from_ms} is out of range"))
        })?;
        let to = DateTime::from_timestamp_millis(to_ms).ok_or_else(|| {
            DomainError::InvalidTimeRange(format!("end {to_ms} is out of range"))
        })?;
        Self::new(from, to)
    }

    /// Returns the start of the range.
    #[must_use]
    pub const fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// Returns the end of the range.
    #[must_use]
    pub const fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// Start of the range as a millisecond epoch string.
    #[must_use]
    pub fn from_millis_string(&self) -> String {
        self.from.timestamp_millis().to_string()
    }

    /// End of the range as a millisecond epoch string.
    #[must_use]
    pub fn to_millis_string(&self) -> String {
        self.to.timestamp_millis().to_string()
    }
}
