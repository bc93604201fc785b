//! Feed time handling.
//!
//! The timetable feed encodes datetimes as compact `YYMMDDHHmm` strings
//! (two-digit year, 2000-based). This module decodes them into absolute
//! instants. A stop element that omits a time attribute decodes to "no
//! value" at the parse layer; only a *present but malformed* attribute is
//! an error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};
use std::fmt;

/// Error returned when decoding an invalid compact timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid feed time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// An absolute instant decoded from the feed's compact `YYMMDDHHmm` format.
///
/// # Examples
///
/// ```
/// use disruption_server::domain::FeedTime;
///
/// let t = FeedTime::parse("2306241410").unwrap();
/// assert_eq!(t.to_string(), "2023-06-24 14:10");
///
/// // Attribute values are exactly ten digits
/// assert!(FeedTime::parse("230624141").is_err());
/// assert!(FeedTime::parse("2306241410Z").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeedTime(NaiveDateTime);

impl FeedTime {
    /// Decode a compact `YYMMDDHHmm` timestamp.
    ///
    /// The two-digit year is interpreted as 2000-based. The value must be
    /// exactly ten ASCII digits and denote a valid calendar date and time
    /// of day.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();

        if bytes.len() != 10 {
            return Err(TimeError::new("expected exactly 10 digits"));
        }

        let year = parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid year"))?;
        let month =
            parse_two_digits(&bytes[2..4]).ok_or_else(|| TimeError::new("invalid month"))?;
        let day = parse_two_digits(&bytes[4..6]).ok_or_else(|| TimeError::new("invalid day"))?;
        let hour = parse_two_digits(&bytes[6..8]).ok_or_else(|| TimeError::new("invalid hour"))?;
        let minute =
            parse_two_digits(&bytes[8..10]).ok_or_else(|| TimeError::new("invalid minute"))?;

        let date = NaiveDate::from_ymd_opt(2000 + year as i32, month, day)
            .ok_or_else(|| TimeError::new("no such calendar date"))?;

        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new("invalid time of day"))?;

        Ok(Self(date.and_time(time)))
    }

    /// Returns the decoded instant.
    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Re-encode in the feed's compact format.
    pub fn compact(&self) -> String {
        self.0.format("%y%m%d%H%M").to_string()
    }

    /// Encode as an ISO-8601 datetime for downstream consumers.
    pub fn iso(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

impl Serialize for FeedTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.iso())
    }
}

impl fmt::Debug for FeedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeedTime({})", self.0.format("%Y-%m-%d %H:%M"))
    }
}

impl fmt::Display for FeedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M"))
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        let t = FeedTime::parse("2306241410").unwrap();
        assert_eq!(t.as_datetime().to_string(), "2023-06-24 14:10:00");

        let t = FeedTime::parse("0001010000").unwrap();
        assert_eq!(t.as_datetime().to_string(), "2000-01-01 00:00:00");

        let t = FeedTime::parse("2412312359").unwrap();
        assert_eq!(t.as_datetime().to_string(), "2024-12-31 23:59:00");
    }

    #[test]
    fn parse_wrong_length() {
        assert!(FeedTime::parse("").is_err());
        assert!(FeedTime::parse("230624141").is_err());
        assert!(FeedTime::parse("23062414100").is_err());
    }

    #[test]
    fn parse_non_digits() {
        assert!(FeedTime::parse("23O6241410").is_err());
        assert!(FeedTime::parse("23-6-24141").is_err());
        assert!(FeedTime::parse("23062414 0").is_err());
    }

    #[test]
    fn parse_invalid_calendar_date() {
        // Month 13
        assert!(FeedTime::parse("2313011200").is_err());
        // Day 32
        assert!(FeedTime::parse("2306321200").is_err());
        // Feb 30
        assert!(FeedTime::parse("2302301200").is_err());
        // Feb 29 on a leap year is fine
        assert!(FeedTime::parse("2402291200").is_ok());
    }

    #[test]
    fn parse_invalid_time_of_day() {
        assert!(FeedTime::parse("2306242400").is_err());
        assert!(FeedTime::parse("2306241260").is_err());
    }

    #[test]
    fn ordering() {
        let earlier = FeedTime::parse("2306241410").unwrap();
        let later = FeedTime::parse("2306241415").unwrap();
        let next_day = FeedTime::parse("2306250001").unwrap();

        assert!(earlier < later);
        assert!(later < next_day);
    }

    #[test]
    fn compact_roundtrip() {
        let t = FeedTime::parse("2306241410").unwrap();
        assert_eq!(t.compact(), "2306241410");
    }

    #[test]
    fn iso_encoding() {
        let t = FeedTime::parse("2306241410").unwrap();
        assert_eq!(t.iso(), "2023-06-24T14:10:00");
    }

    #[test]
    fn serializes_as_iso_string() {
        let t = FeedTime::parse("2306241410").unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"2023-06-24T14:10:00\"");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_compact()(
            year in 0u32..100,
            month in 1u32..=12,
            day in 1u32..=28, // Safe for all months
            hour in 0u32..24,
            minute in 0u32..60,
        ) -> String {
            format!("{:02}{:02}{:02}{:02}{:02}", year, month, day, hour, minute)
        }
    }

    proptest! {
        /// Any well-formed compact timestamp parses
        #[test]
        fn valid_compact_parses(s in valid_compact()) {
            prop_assert!(FeedTime::parse(&s).is_ok());
        }

        /// Parse then compact roundtrips
        #[test]
        fn parse_compact_roundtrip(s in valid_compact()) {
            let t = FeedTime::parse(&s).unwrap();
            prop_assert_eq!(t.compact(), s);
        }

        /// Wrong-length strings are always rejected
        #[test]
        fn wrong_length_rejected(s in "[0-9]{0,9}|[0-9]{11,14}") {
            prop_assert!(FeedTime::parse(&s).is_err());
        }

        /// Ordering matches the chronological order of the decoded instants
        #[test]
        fn ordering_matches_datetime(a in valid_compact(), b in valid_compact()) {
            let ta = FeedTime::parse(&a).unwrap();
            let tb = FeedTime::parse(&b).unwrap();
            prop_assert_eq!(ta.cmp(&tb), ta.as_datetime().cmp(&tb.as_datetime()));
        }
    }
}
