//! Timetable feed error types.

use crate::domain::TimeError;

/// Errors from the timetable feed client.
///
/// Fetch failures are non-fatal to the pipeline: the caller skips the
/// station for the current cycle and the next tick retries.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API credentials
    #[error("unauthorized: check DB_API_KEY and DB_CLIENT_ID")]
    Unauthorized,

    /// Rate limited by the feed
    #[error("rate limited by the timetable feed")]
    RateLimited,

    /// Feed returned an error status code
    #[error("feed error {status} for station {station}: {message}")]
    Api {
        station: String,
        status: u16,
        message: String,
    },
}

/// Errors from parsing a feed document.
///
/// Parsing fails closed per document: any structural surprise discards the
/// whole document so that no events are derived from a corrupt parse tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The document is not well-formed XML
    #[error("malformed feed document: {0}")]
    Syntax(String),

    /// The root element is not a timetable
    #[error("unexpected root element <{0}>")]
    UnexpectedRoot(String),

    /// A stop element has no id attribute
    #[error("stop element is missing its id attribute")]
    MissingStopId,

    /// A timestamp attribute is present but undecodable
    #[error("bad timestamp {value:?} on stop {stop}")]
    BadTimestamp {
        stop: String,
        value: String,
        #[source]
        source: TimeError,
    },
}
