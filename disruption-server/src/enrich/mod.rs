//! Route enrichment.
//!
//! Takes a multi-leg route result from the external route-planning API,
//! finds the legs that depart from a rail station, and attaches the
//! station identifier known to the directory - or an explicit unknown
//! marker - by querying the station lookup service. Lookups for
//! independent legs run concurrently and the enrichment joins on all of
//! them, so one slow or failed lookup never drops another leg's result.

mod client;
mod enricher;
mod error;
mod lookup;
mod types;

pub use client::{RouteClient, RouteConfig, RouteQuery};
pub use enricher::{enrich, lookup_key};
pub use error::{LookupError, RouteError};
pub use lookup::{LookupClient, LookupConfig, StationLookup};
pub use types::{Place, Route, RouteResponse, Section, Summary, TimeAndPlace, Transport};
