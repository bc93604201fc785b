//! Timetable feed HTTP client.
//!
//! Provides async access to the per-station recent-changes document.
//! Handles authentication headers and concurrency limiting; parsing is a
//! separate step (see [`parse_feed`](super::parse_feed)).

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tokio::sync::Semaphore;

use crate::domain::StationId;

use super::FeedSource;
use super::error::TimetableError;

/// Default base URL for the timetable feed.
const DEFAULT_BASE_URL: &str =
    "https://apis.deutschebahn.com/db-api-marketplace/apis/timetables/v1";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the timetable client.
#[derive(Debug, Clone)]
pub struct TimetableConfig {
    /// API key sent in the `DB-Api-Key` header
    pub api_key: String,
    /// Client id sent in the `DB-Client-Id` header
    pub client_id: String,
    /// Base URL for the feed (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TimetableConfig {
    /// Create a new config with the given credentials.
    pub fn new(api_key: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client_id: client_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Timetable feed client.
///
/// Uses a semaphore to limit concurrent requests: the poll scheduler fans
/// out one fetch per station and the upstream marketplace rate-limits
/// aggressively.
#[derive(Debug, Clone)]
pub struct TimetableClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl TimetableClient {
    /// Create a new timetable client with the given configuration.
    pub fn new(config: TimetableConfig) -> Result<Self, TimetableError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| TimetableError::Api {
            station: String::new(),
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("db-api-key"), api_key);

        let client_id =
            HeaderValue::from_str(&config.client_id).map_err(|_| TimetableError::Api {
                station: String::new(),
                status: 0,
                message: "Invalid client id format".to_string(),
            })?;
        headers.insert(HeaderName::from_static("db-client-id"), client_id);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Fetch the recent-changes document for a station.
    ///
    /// Returns the raw feed body. A network failure or non-2xx response is
    /// a typed error carrying the station and upstream status; there is no
    /// retry here, the scheduler's next tick is the retry.
    pub async fn fetch_changes(&self, station: &StationId) -> Result<String, TimetableError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TimetableError::Api {
                station: station.to_string(),
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/fchg/{}", self.base_url, station);

        let response = self.http.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(TimetableError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TimetableError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TimetableError::Api {
                station: station.to_string(),
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

impl FeedSource for TimetableClient {
    async fn fetch_changes(&self, station: &StationId) -> Result<String, TimetableError> {
        TimetableClient::fetch_changes(self, station).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = TimetableConfig::new("test-key", "test-client")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.client_id, "test-client");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = TimetableConfig::new("test-key", "test-client");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let config = TimetableConfig::new("test-key", "test-client");
        assert!(TimetableClient::new(config).is_ok());
    }

    #[test]
    fn client_rejects_unencodable_credentials() {
        let config = TimetableConfig::new("key\nwith-newline", "test-client");
        assert!(TimetableClient::new(config).is_err());
    }
}
