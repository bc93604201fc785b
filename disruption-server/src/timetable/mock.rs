//! Mock feed source for testing without API access.
//!
//! Serves feed documents from XML files (or strings inserted directly) as
//! if they were live responses.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::StationId;

use super::FeedSource;
use super::error::TimetableError;

/// Mock feed source backed by in-memory documents.
///
/// This is useful for development and testing without real feed
/// credentials.
#[derive(Debug, Clone, Default)]
pub struct MockFeedSource {
    /// Pre-loaded feed bodies, keyed by station id.
    feeds: HashMap<StationId, String>,
}

impl MockFeedSource {
    /// Create an empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source by loading XML files from a directory.
    ///
    /// Expects files named `{stationId}.xml` (e.g. `8000207.xml`).
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, TimetableError> {
        let data_dir = data_dir.as_ref();
        let mut feeds = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| TimetableError::Api {
            station: String::new(),
            status: 0,
            message: format!("Failed to read mock data directory: {}", e),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| TimetableError::Api {
                station: String::new(),
                status: 0,
                message: format!("Failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("xml") {
                continue;
            }

            // Extract the station id from the filename
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| TimetableError::Api {
                    station: String::new(),
                    status: 0,
                    message: format!("Invalid filename: {:?}", path),
                })?;

            let station = StationId::parse(stem).map_err(|e| TimetableError::Api {
                station: stem.to_string(),
                status: 0,
                message: format!("Invalid station id in filename: {}", e),
            })?;

            let body = std::fs::read_to_string(&path).map_err(|e| TimetableError::Api {
                station: stem.to_string(),
                status: 0,
                message: format!("Failed to read {:?}: {}", path, e),
            })?;

            feeds.insert(station, body);
        }

        Ok(Self { feeds })
    }

    /// Insert a feed body for a station.
    pub fn insert(&mut self, station: StationId, body: impl Into<String>) {
        self.feeds.insert(station, body.into());
    }
}

impl FeedSource for MockFeedSource {
    async fn fetch_changes(&self, station: &StationId) -> Result<String, TimetableError> {
        self.feeds
            .get(station)
            .cloned()
            .ok_or_else(|| TimetableError::Api {
                station: station.to_string(),
                status: 404,
                message: "no mock feed for station".to_string(),
            })
    }
}
