//! Route-planning API client.

use serde::{Deserialize, Serialize};

use super::error::RouteError;
use super::types::RouteResponse;

/// Default base URL for the route-planning API.
const DEFAULT_BASE_URL: &str = "https://transit.router.hereapi.com/v8";

/// Query for one route request.
///
/// Origin and destination are required, plus one of the arrival/departure
/// times; everything else is optional and omitted from the request when
/// unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuery {
    /// Origin as "lat,lng" or a place id.
    pub origin: String,

    /// Destination as "lat,lng" or a place id.
    pub destination: String,

    /// Arrive-by time (ISO 8601).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,

    /// Depart-at time (ISO 8601).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,

    /// Response language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    /// Unit system ("metric" or "imperial").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,

    /// Maximum number of changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<u32>,

    /// Number of route alternatives.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<u32>,

    /// Comma-separated transport modes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modes: Option<String>,

    /// Walking speed in m/s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pedestrian_speed: Option<f64>,

    /// Response shape (e.g. "polyline,travelSummary").
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    pub return_shape: Option<String>,
}

impl RouteQuery {
    /// Create a query between two points.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    /// Whether the query names an arrival or a departure time.
    pub fn has_time(&self) -> bool {
        self.arrival_time.is_some() || self.departure_time.is_some()
    }
}

/// Configuration for the route client.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// API key passed as the `apiKey` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RouteConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Client for the route-planning API.
#[derive(Debug, Clone)]
pub struct RouteClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RouteClient {
    /// Create a new route client.
    pub fn new(config: RouteConfig) -> Result<Self, RouteError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Fetch routes for a query.
    pub async fn fetch_routes(&self, query: &RouteQuery) -> Result<RouteResponse, RouteError> {
        let url = format!("{}/routes", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RouteError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RouteError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| RouteError::Json {
            message: e.to_string(),
        })
    }
}
