//! Station directory feed client.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;

use super::error::DirectoryError;

/// Default base URL for the station-data feed.
const DEFAULT_BASE_URL: &str =
    "https://apis.deutschebahn.com/db-api-marketplace/apis/station-data/v2";

/// Wrapper for the stations response.
#[derive(Debug, Deserialize)]
struct StationsResponse {
    result: Vec<StationRecordDto>,
}

/// Raw station record as the feed sends it - we only need the name, the
/// postal code and the eva numbers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationRecordDto {
    name: String,
    mailing_address: Option<MailingAddressDto>,
    eva_numbers: Option<Vec<EvaNumberDto>>,
}

#[derive(Debug, Deserialize)]
struct MailingAddressDto {
    zipcode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EvaNumberDto {
    number: Option<i64>,
}

/// One station record from the directory feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRecord {
    /// Display name.
    pub name: String,

    /// Postal code of the station's mailing address.
    pub zipcode: Option<String>,

    /// Numeric identifiers, in feed order.
    pub numbers: Vec<i64>,
}

impl From<StationRecordDto> for StationRecord {
    fn from(dto: StationRecordDto) -> Self {
        Self {
            name: dto.name,
            zipcode: dto.mailing_address.and_then(|a| a.zipcode),
            numbers: dto
                .eva_numbers
                .unwrap_or_default()
                .into_iter()
                .filter_map(|e| e.number)
                .collect(),
        }
    }
}

/// Configuration for the directory client.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// API key sent in the `DB-Api-Key` header
    pub api_key: String,
    /// Client id sent in the `DB-Client-Id` header
    pub client_id: String,
    /// Base URL for the feed
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectoryConfig {
    /// Create a new config with the given credentials.
    pub fn new(api_key: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client_id: client_id.into(),
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

/// Client for the station directory feed.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    /// Create a new directory client.
    pub fn new(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| DirectoryError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("db-api-key"), api_key);

        let client_id =
            HeaderValue::from_str(&config.client_id).map_err(|_| DirectoryError::Api {
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
        })
    }

    /// Fetch all station records from the feed.
    pub async fn fetch_all(&self) -> Result<Vec<StationRecord>, DirectoryError> {
        let url = format!("{}/stations", self.base_url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DirectoryError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let response: StationsResponse =
            serde_json::from_str(&body).map_err(|e| DirectoryError::Json {
                message: e.to_string(),
            })?;

        Ok(response.result.into_iter().map(StationRecord::from).collect())
    }
}
