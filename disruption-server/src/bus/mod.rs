//! Message bus publishing.
//!
//! Delay events go out over MQTT under a per-station/per-line topic
//! hierarchy: an event for line 11 at station 8000207 is published to
//! `8000207/11`, and the publisher keeps itself subscribed to `8000207/#`
//! so feedback on that station's subtree reaches the process. A presence
//! topic is exercised at connection time to confirm broker reachability.

mod error;
mod publisher;

use std::future::Future;

use crate::domain::DelayEvent;

pub use error::PublishError;
pub use publisher::{BusConfig, DelayPublisher};

/// A sink for delay events.
///
/// Implemented by the MQTT publisher; tests substitute a recording sink.
pub trait DelaySink: Send + Sync {
    /// Publish one event.
    fn publish(&self, event: &DelayEvent) -> impl Future<Output = Result<(), PublishError>> + Send;
}
