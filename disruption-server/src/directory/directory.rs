//! Station name lookup.

use std::collections::HashMap;

use crate::domain::{Station, StationId};

use super::client::StationRecord;

/// The station directory for the configured region.
///
/// Maps station name to station, restricted to the stations whose postal
/// code carries one of the configured prefixes. Built once at startup and
/// read-only afterwards, so it is shared freely across the poll pipelines
/// and the lookup endpoint without locking.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    by_name: HashMap<String, Station>,
}

impl StationDirectory {
    /// Build the directory from raw feed records.
    ///
    /// A record is retained when its postal code starts with one of the
    /// given prefixes; its first listed identifier becomes the station id.
    /// Records without a usable postal code or identifier are dropped, and
    /// the first record wins when the feed repeats a name.
    pub fn from_records(records: Vec<StationRecord>, zip_prefixes: &[String]) -> Self {
        let mut by_name = HashMap::new();

        for record in records {
            let Some(zipcode) = record.zipcode else {
                continue;
            };
            if !zip_prefixes.iter().any(|p| zipcode.starts_with(p.as_str())) {
                continue;
            }
            let Some(number) = record.numbers.first() else {
                continue;
            };
            let Ok(id) = StationId::parse(&number.to_string()) else {
                continue;
            };

            by_name.entry(record.name.clone()).or_insert(Station {
                name: record.name,
                id,
            });
        }

        Self { by_name }
    }

    /// Look up a station by exact, case-sensitive name.
    ///
    /// Route legs frequently name stations outside the configured region,
    /// so a miss is an expected outcome.
    pub fn get(&self, name: &str) -> Option<&Station> {
        self.by_name.get(name)
    }

    /// Iterate over all stations, in no particular order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.by_name.values()
    }

    /// Number of stations in the directory.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
