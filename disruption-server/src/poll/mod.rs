//! Poll scheduler.
//!
//! Drives the fetch → extract → publish pipeline for every station in the
//! directory on a fixed interval. Each station's pipeline is isolated: a
//! fetch or parse failure degrades that station's data for the current
//! cycle only, and a publish failure never aborts the remaining publishes.
//! Every cycle produces an explicit [`TickReport`] instead of mutating
//! process-wide counters, so outcomes are observable and testable.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{info, warn};

use crate::bus::DelaySink;
use crate::directory::StationDirectory;
use crate::domain::{Station, StationId, derive_delay};
use crate::timetable::{FeedSource, ParseError, TimetableError, parse_feed};

/// Default poll interval (5 minutes).
const DEFAULT_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Configuration for the poll scheduler.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Time between cycles.
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// A failure that took one station out of one cycle.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// The feed could not be fetched
    #[error("fetch failed: {0}")]
    Fetch(#[from] TimetableError),

    /// The feed document could not be parsed
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
}

/// Outcome of one poll cycle.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Stations dispatched this cycle.
    pub stations: usize,

    /// Events published.
    pub published: usize,

    /// Events that failed to publish (logged and dropped).
    pub publish_failures: usize,

    /// Stations whose pipeline failed, with the failure.
    pub failures: Vec<(StationId, PollError)>,
}

/// Outcome of one station's pipeline within a cycle.
struct StationOutcome {
    station: StationId,
    result: Result<(usize, usize), PollError>,
}

/// The poll scheduler.
///
/// Generic over the feed source and the event sink so the same pipeline
/// runs against the live feed and broker or against fixtures in tests.
pub struct Poller<F, S> {
    source: Arc<F>,
    sink: Arc<S>,
    directory: Arc<StationDirectory>,
    interval: Duration,
}

impl<F, S> Clone for Poller<F, S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            sink: Arc::clone(&self.sink),
            directory: Arc::clone(&self.directory),
            interval: self.interval,
        }
    }
}

impl<F, S> Poller<F, S>
where
    F: FeedSource + 'static,
    S: DelaySink + 'static,
{
    /// Create a new poller over the given directory.
    pub fn new(source: F, sink: S, directory: Arc<StationDirectory>, config: PollConfig) -> Self {
        Self {
            source: Arc::new(source),
            sink: Arc::new(sink),
            directory,
            interval: config.interval,
        }
    }

    /// Run cycles forever.
    ///
    /// The first cycle starts immediately; afterwards one cycle is
    /// dispatched per interval. Cycles are spawned rather than awaited, so
    /// a cycle that runs longer than the interval overlaps the next one
    /// instead of delaying it.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);

        loop {
            ticker.tick().await;
            let poller = self.clone();
            tokio::spawn(async move {
                let report = poller.tick().await;
                for (station, error) in &report.failures {
                    warn!(station = %station, error = %error, "station skipped this cycle");
                }
                info!(
                    stations = report.stations,
                    published = report.published,
                    publish_failures = report.publish_failures,
                    failed_stations = report.failures.len(),
                    "poll cycle complete"
                );
            });
        }
    }

    /// Run one cycle: fan out one pipeline per station and join them all.
    pub async fn tick(&self) -> TickReport {
        let outcomes = join_all(
            self.directory
                .stations()
                .map(|station| self.poll_station(station)),
        )
        .await;

        let mut report = TickReport::default();
        for outcome in outcomes {
            report.stations += 1;
            match outcome.result {
                Ok((published, publish_failures)) => {
                    report.published += published;
                    report.publish_failures += publish_failures;
                }
                Err(error) => report.failures.push((outcome.station, error)),
            }
        }
        report
    }

    /// One station's pipeline: fetch, parse, derive, publish.
    async fn poll_station(&self, station: &Station) -> StationOutcome {
        let outcome = |result| StationOutcome {
            station: station.id.clone(),
            result,
        };

        let body = match self.source.fetch_changes(&station.id).await {
            Ok(body) => body,
            Err(e) => return outcome(Err(e.into())),
        };

        let stops = match parse_feed(&body) {
            Ok(stops) => stops,
            Err(e) => return outcome(Err(e.into())),
        };

        let mut published = 0;
        let mut publish_failures = 0;
        for stop in &stops {
            let Some(event) = derive_delay(&station.id, stop) else {
                continue;
            };
            match self.sink.publish(&event).await {
                Ok(()) => published += 1,
                Err(e) => {
                    warn!(
                        station = %event.station,
                        line = %event.line,
                        error = %e,
                        "publish failed, event dropped"
                    );
                    publish_failures += 1;
                }
            }
        }

        outcome(Ok((published, publish_failures)))
    }
}
