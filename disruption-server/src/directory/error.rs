//! Station directory error types.

/// Errors that can occur when fetching the station directory feed.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check DB_API_KEY and DB_CLIENT_ID")]
    Unauthorized,

    /// Feed returned an error status
    #[error("directory feed error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
