//! Message bus error types.

/// Errors from publishing to the message bus.
///
/// Publish failures are logged and swallowed at the pipeline boundary;
/// they never abort the poll cycle for other stations or events.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The broker connection rejected the request
    #[error("broker request failed: {0}")]
    Client(#[from] rumqttc::ClientError),

    /// The event body could not be encoded
    #[error("event encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
