//! Stop records extracted from a feed document.

use super::time::FeedTime;

/// One scheduled stop extracted from a per-station feed document.
///
/// Every field other than the stop id is optional: the feed omits
/// attributes rather than sending empty values, and absence of any
/// attribute is valid. Records are created per parse and discarded after
/// event derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopRecord {
    /// Feed-assigned identifier for this stop of this trip.
    pub stop_id: String,

    /// Scheduled arrival time.
    pub planned_arrival: Option<FeedTime>,

    /// Updated arrival time, present once the feed has reported a change.
    pub changed_arrival: Option<FeedTime>,

    /// Scheduled platform.
    pub planned_platform: Option<String>,

    /// Updated platform, if the stop was replatformed.
    pub changed_platform: Option<String>,

    /// Raw line label as the feed spells it (e.g. "S11", "RB48").
    pub line_label: Option<String>,

    /// Free-text messages attached to this stop.
    pub messages: Vec<StopMessage>,
}

/// A message element attached to a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopMessage {
    /// Feed-assigned message id.
    pub id: Option<String>,

    /// Message type code.
    pub kind: Option<String>,

    /// When the message was issued.
    pub timestamp: Option<FeedTime>,
}
