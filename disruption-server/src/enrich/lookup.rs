//! Station lookup service access.

use std::future::Future;

use serde::Deserialize;

use crate::directory::StationDirectory;
use crate::domain::{Station, StationId};

use super::error::LookupError;

/// Read access to the station name → station mapping.
///
/// A miss is an expected outcome and comes back as `Ok(None)`. Implemented
/// over inter-service HTTP by [`LookupClient`] and in-process by
/// [`StationDirectory`].
pub trait StationLookup: Send + Sync {
    /// Look up a station by exact name.
    fn lookup(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Station>, LookupError>> + Send;
}

impl StationLookup for StationDirectory {
    async fn lookup(&self, name: &str) -> Result<Option<Station>, LookupError> {
        Ok(self.get(name).cloned())
    }
}

/// Station record as the lookup endpoint serves it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationDto {
    name: String,
    eva_nr: String,
}

/// Configuration for the lookup client.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Base URL of the lookup service
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl LookupConfig {
    /// Create a new config for the given service address.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 10,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP client for the station lookup endpoint.
#[derive(Debug, Clone)]
pub struct LookupClient {
    http: reqwest::Client,
    base_url: String,
}

impl LookupClient {
    /// Create a new lookup client.
    pub fn new(config: LookupConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }
}

impl StationLookup for LookupClient {
    async fn lookup(&self, name: &str) -> Result<Option<Station>, LookupError> {
        let url = format!("{}/stations", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("station", name)])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let dto: StationDto = serde_json::from_str(&body).map_err(|e| LookupError::Json {
            message: e.to_string(),
        })?;

        let id = StationId::parse(&dto.eva_nr).map_err(|source| LookupError::BadStationId {
            value: dto.eva_nr.clone(),
            source,
        })?;

        Ok(Some(Station { name: dto.name, id }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = LookupConfig::new("http://localhost:3001");
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.timeout_secs, 10);
    }

    #[tokio::test]
    async fn directory_miss_is_none() {
        let directory = StationDirectory::default();
        let found = StationLookup::lookup(&directory, "Koeln Hbf").await.unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn dto_deserialization() {
        let dto: StationDto =
            serde_json::from_str(r#"{ "name": "Koeln Hbf", "evaNr": "8000207" }"#).unwrap();
        assert_eq!(dto.name, "Koeln Hbf");
        assert_eq!(dto.eva_nr, "8000207");
    }
}
