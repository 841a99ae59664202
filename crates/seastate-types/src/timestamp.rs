//! Command-line timestamp parsing.

use chrono::NaiveDateTime;

use crate::TimestampError;

/// chrono format of command-line timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Length of a command-line timestamp.
pub const TIMESTAMP_LEN: usize = 14;

/// Parses a fourteen-digit `YYYYMMDDHHMMSS` timestamp.
///
/// # Errors
///
/// Returns an error if the input is not exactly fourteen characters or does not
/// describe a valid date and time.
///
/// # Example
///
/// ```
/// use seastate_types::parse_timestamp;
/// use chrono::{Datelike, Timelike};
///
/// let ts = parse_timestamp("20200101020000").unwrap();
/// assert_eq!(ts.year(), 2020);
/// assert_eq!(ts.hour(), 2);
/// ```
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, TimestampError> {
    // chrono accepts fewer digits per field, so the width is checked up front
    let len = input.chars().count();
    if len != TIMESTAMP_LEN {
        return Err(TimestampError::Length {
            input: input.to_string(),
            len,
        });
    }

    NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT).map_err(|source| {
        TimestampError::Invalid {
            input: input.to_string(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_valid() {
        let ts = parse_timestamp("20191231233015").unwrap();
        assert_eq!(ts.year(), 2019);
        assert_eq!(ts.month(), 12);
        assert_eq!(ts.day(), 31);
        assert_eq!(ts.hour(), 23);
        assert_eq!(ts.minute(), 30);
        assert_eq!(ts.second(), 15);
    }

    #[test]
    fn test_parse_wrong_length() {
        let result = parse_timestamp("2020010100");
        assert!(matches!(result, Err(TimestampError::Length { len: 10, .. })));

        let result = parse_timestamp("202001010000000");
        assert!(matches!(result, Err(TimestampError::Length { len: 15, .. })));
    }

    #[test]
    fn test_parse_out_of_range() {
        let result = parse_timestamp("20201301000000");
        assert!(matches!(result, Err(TimestampError::Invalid { .. })));

        let result = parse_timestamp("20200101250000");
        assert!(matches!(result, Err(TimestampError::Invalid { .. })));
    }

    #[test]
    fn test_parse_non_digits() {
        let result = parse_timestamp("2020-01-01T000");
        assert!(matches!(result, Err(TimestampError::Invalid { .. })));
    }

    #[test]
    fn test_error_mentions_input() {
        let err = parse_timestamp("abc").unwrap_err();
        assert!(err.to_string().contains("'abc'"));
    }
}
