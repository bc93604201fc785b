//! Regional rail disruption feed server.
//!
//! Polls the per-station timetable feed for every station in a configured
//! postal-code region, extracts delay events from the schedule changes, and
//! republishes them on an MQTT bus keyed by station and line. Also exposes
//! the station directory over HTTP and enriches third-party route-planning
//! results with the station identifiers of the rail stations they pass
//! through.

pub mod bus;
pub mod directory;
pub mod domain;
pub mod enrich;
pub mod poll;
pub mod timetable;
pub mod web;
