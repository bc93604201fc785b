//! Route enrichment error types.

use crate::domain::InvalidStationId;

/// Errors from the route-planning API client.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key
    #[error("unauthorized: check ROUTE_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("route API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

/// Errors from the station lookup service.
///
/// A lookup *miss* is not an error - it comes back as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Lookup service returned an error status
    #[error("lookup error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The lookup service returned an unusable station id
    #[error("bad station id {value:?} from lookup service")]
    BadStationId {
        value: String,
        #[source]
        source: InvalidStationId,
    },
}
