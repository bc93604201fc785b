//! Data transfer objects for web requests and responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::Station;
use crate::enrich::RouteError;

/// Query for the station lookup endpoint.
#[derive(Debug, Deserialize)]
pub struct StationQuery {
    /// Exact station name
    pub station: String,
}

/// A station, as the lookup endpoint serves it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResponse {
    /// Station name
    pub name: String,

    /// Numeric station identifier
    pub eva_nr: String,
}

impl From<&Station> for StationResponse {
    fn from(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            eva_nr: station.id.as_str().to_string(),
        }
    }
}

/// Error response for the web layer.
#[derive(Debug)]
pub enum AppError {
    /// The request was malformed
    BadRequest { message: String },

    /// An upstream dependency failed
    Upstream { message: String },
}

impl From<RouteError> for AppError {
    fn from(error: RouteError) -> Self {
        AppError::Upstream {
            message: error.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
