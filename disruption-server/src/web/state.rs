//! Application state for the web layer.

use std::sync::Arc;

use crate::directory::StationDirectory;
use crate::enrich::{LookupClient, RouteClient};

/// Shared application state.
///
/// Contains the read-only station directory plus the clients the route
/// endpoint needs.
#[derive(Clone)]
pub struct AppState {
    /// Station directory for the configured region
    pub directory: Arc<StationDirectory>,

    /// Route-planning API client
    pub routes: Arc<RouteClient>,

    /// Station lookup used during enrichment
    pub lookup: Arc<LookupClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        directory: Arc<StationDirectory>,
        routes: RouteClient,
        lookup: LookupClient,
    ) -> Self {
        Self {
            directory,
            routes: Arc::new(routes),
            lookup: Arc::new(lookup),
        }
    }
}
