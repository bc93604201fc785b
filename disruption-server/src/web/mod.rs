//! Web layer.
//!
//! Exposes the station lookup to other processes, a liveness endpoint,
//! and the enriched route endpoint.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
