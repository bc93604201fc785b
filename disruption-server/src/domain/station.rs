//! Station identifier types.

use std::fmt;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A valid station identifier (an "eva number").
///
/// The timetable and directory feeds address stations by an opaque numeric
/// key. This type guarantees that any `StationId` value is a non-empty
/// string of ASCII digits by construction.
///
/// # Examples
///
/// ```
/// use disruption_server::domain::StationId;
///
/// let cologne = StationId::parse("8000207").unwrap();
/// assert_eq!(cologne.as_str(), "8000207");
///
/// // Non-digits are rejected
/// assert!(StationId::parse("80x0207").is_err());
///
/// // Empty ids are rejected
/// assert!(StationId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationId(String);

impl StationId {
    /// Parse a station identifier from a string.
    ///
    /// The input must be a non-empty sequence of ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStationId {
                reason: "must be ASCII digits 0-9",
            });
        }

        Ok(StationId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A station known to the directory.
///
/// Identity is the station `name`; the directory guarantees names are
/// unique. Immutable after directory construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Display name, as the directory feed spells it.
    pub name: String,

    /// Numeric identifier used by the timetable feed.
    pub id: StationId,
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating valid station identifiers.
    fn valid_id_string() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[0-9]{1,9}").unwrap()
    }

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in valid_id_string()) {
            let id = StationId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        /// Any digit string can be parsed
        #[test]
        fn digits_always_parse(s in valid_id_string()) {
            prop_assert!(StationId::parse(&s).is_ok());
        }

        /// Strings containing a non-digit are always rejected
        #[test]
        fn non_digit_rejected(s in "[0-9]{0,4}[a-zA-Z ][0-9]{0,4}") {
            prop_assert!(StationId::parse(&s).is_err());
        }
    }
}
