//! Delay event derivation.

use serde::Serialize;

use super::line::normalize_line;
use super::station::StationId;
use super::stop::StopRecord;
use super::time::FeedTime;

/// A per-stop delay, ready for publication.
///
/// Events represent *changes*, not the baseline schedule: a stop that has
/// only a planned time is never published, so consumers are not flooded
/// with no-op notifications every poll cycle. At most one event is derived
/// per stop record per cycle, and the event is discarded after publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayEvent {
    /// Station whose feed reported the change.
    #[serde(skip)]
    pub station: StationId,

    /// Feed-assigned stop identifier.
    #[serde(skip)]
    pub stop_id: String,

    /// Canonical line code, used for topic routing.
    #[serde(skip)]
    pub line: String,

    /// Originally scheduled arrival.
    pub planned_time: FeedTime,

    /// Updated arrival.
    pub new_time: FeedTime,
}

/// Derive the delay event for one stop record, if it carries one.
///
/// Returns `None` when the stop has no changed arrival (the train is not
/// delayed, or the change is not confirmed yet), no line label (the event
/// could not be routed to a topic), a label that normalizes to nothing, or
/// no planned arrival to compare against.
pub fn derive_delay(station: &StationId, stop: &StopRecord) -> Option<DelayEvent> {
    let new_time = stop.changed_arrival?;
    let label = stop.line_label.as_deref()?;

    let line = normalize_line(label);
    if line.is_empty() {
        return None;
    }

    let planned_time = stop.planned_arrival?;

    Some(DelayEvent {
        station: station.clone(),
        stop_id: stop.stop_id.clone(),
        line: line.to_string(),
        planned_time,
        new_time,
    })
}
