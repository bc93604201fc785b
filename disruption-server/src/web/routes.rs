//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::enrich::{RouteQuery, RouteResponse, enrich};

use super::dto::{AppError, StationQuery, StationResponse};
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(lookup_station))
        .route("/route", get(plan_route))
        .with_state(state)
}

/// Liveness endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Look up a station by exact name.
///
/// Returns the station record, or 404 for names outside the configured
/// region - a common, expected outcome for route legs.
async fn lookup_station(
    State(state): State<AppState>,
    Query(query): Query<StationQuery>,
) -> Response {
    match state.directory.get(&query.station) {
        Some(station) => Json(StationResponse::from(station)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Plan a route and enrich it with station identifiers.
async fn plan_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteResponse>, AppError> {
    if !query.has_time() {
        return Err(AppError::BadRequest {
            message: "either arrivalTime or departureTime is required".to_string(),
        });
    }

    let result = state.routes.fetch_routes(&query).await?;
    let enriched = enrich(result, state.lookup.as_ref()).await;

    Ok(Json(enriched))
}
