//! Station directory: upstream client and name lookup.
//!
//! Provides the station name → station id mapping for the configured
//! postal-code region, fetched from the station-data feed once at startup.
//! The directory is read-only after construction; lookups by names outside
//! the region are an expected outcome, not an error.

mod client;
mod directory;
mod error;

pub use client::{DirectoryClient, DirectoryConfig, StationRecord};
pub use directory::StationDirectory;
pub use error::DirectoryError;
