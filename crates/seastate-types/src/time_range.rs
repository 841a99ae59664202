//! Time range and hour iteration.

use chrono::{NaiveDateTime, TimeDelta};

use crate::{TimestampError, parse_timestamp};

/// An inclusive range of timestamps, walked one hour at a time.
///
/// The range is not validated: a start after the end is a valid, empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// First timestamp (inclusive).
    pub start: NaiveDateTime,
    /// Last timestamp (inclusive).
    pub end: NaiveDateTime,
}

impl TimeRange {
    /// Creates a new time range.
    #[must_use]
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Parses a time range from two `YYYYMMDDHHMMSS` timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if either timestamp is malformed.
    pub fn parse(start: &str, end: &str) -> Result<Self, TimestampError> {
        Ok(Self::new(parse_timestamp(start)?, parse_timestamp(end)?))
    }

    /// Creates a range holding a single timestamp.
    #[must_use]
    pub const fn single(timestamp: NaiveDateTime) -> Self {
        Self {
            start: timestamp,
            end: timestamp,
        }
    }

    /// Returns an iterator over the hourly timestamps in the range.
    #[must_use]
    pub const fn hours(&self) -> HourIterator {
        HourIterator::new(self.start, self.end)
    }

    /// Collects the hourly timestamps in the range.
    #[must_use]
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.hours().collect()
    }

    /// Returns the number of hourly timestamps in the range.
    #[must_use]
    pub fn total_hours(&self) -> usize {
        self.hours().len()
    }

    /// Returns true if the range yields no timestamps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Iterator over the hourly timestamps of a [`TimeRange`].
#[derive(Debug, Clone)]
pub struct HourIterator {
    /// `None` once stepping past the end would overflow.
    current: Option<NaiveDateTime>,
    end: NaiveDateTime,
}

impl HourIterator {
    const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            current: Some(start),
            end,
        }
    }
}

impl Iterator for HourIterator {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.filter(|c| *c <= self.end)?;
        self.current = current.checked_add_signed(TimeDelta::hours(1));
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.current {
            Some(current) if current <= self.end => {
                let hours = (self.end - current).num_hours() as usize + 1;
                (hours, Some(hours))
            }
            _ => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for HourIterator {}
