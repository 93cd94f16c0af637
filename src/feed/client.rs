//! Rootnet Stats Client
//!
//! HTTP client for the public rootnet COVID-19 statistics endpoint. One GET,
//! no parameters, no auth; the JSON body is decoded into the raw wire shape
//! and handed to the normalizer untouched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use super::FeedError;

/// Default statistics endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.rootnet.in/covid19-in/stats/latest";

/// Configuration for the stats client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Full URL of the stats endpoint.
    pub endpoint: String,
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// Top-level wire response. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    pub data: StatsPayload,
    /// Refresh timestamp published alongside the data; absent on older
    /// payload revisions.
    #[serde(rename = "lastRefreshed", default)]
    pub last_refreshed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsPayload {
    pub summary: RawSummary,
    pub regional: Vec<RawRegion>,
}

/// Aggregate counters as published by the endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSummary {
    pub total: i64,
    pub discharged: i64,
    pub deaths: i64,
}

/// Per-region counters as published by the endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRegion {
    /// Raw region name, possibly containing spaces or punctuation.
    pub loc: String,
    #[serde(rename = "totalConfirmed")]
    pub total_confirmed: i64,
    pub discharged: i64,
    pub deaths: i64,
}

/// Source of raw statistics. Seam for driving the pipeline with a mock.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch_latest(&self) -> Result<StatsResponse, FeedError>;
}

/// Live HTTP client against the rootnet endpoint.
pub struct StatsClient {
    client: Client,
    config: FeedConfig,
}

impl StatsClient {
    /// Create a client with the given configuration.
    pub fn new(config: FeedConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// The endpoint this client fetches from.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl StatsSource for StatsClient {
    async fn fetch_latest(&self) -> Result<StatsResponse, FeedError> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FeedError::Timeout
                } else {
                    FeedError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                status: status.as_u16(),
            });
        }

        response
            .json::<StatsResponse>()
            .await
            .map_err(|e| FeedError::Payload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FeedConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_decode_wire_payload() {
        let body = r#"{
            "success": true,
            "data": {
                "summary": {"total": 10, "discharged": 7, "deaths": 1},
                "regional": [
                    {"loc": "Andhra Pradesh", "totalConfirmed": 100, "discharged": 90, "deaths": 2}
                ]
            },
            "lastRefreshed": "2021-10-31T09:30:00.000Z"
        }"#;

        let response: StatsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.data.summary.total, 10);
        assert_eq!(response.data.regional.len(), 1);
        assert_eq!(response.data.regional[0].loc, "Andhra Pradesh");
        assert_eq!(response.data.regional[0].total_confirmed, 100);
        assert!(response.last_refreshed.is_some());
    }

    #[test]
    fn test_decode_without_refresh_timestamp() {
        let body = r#"{
            "data": {
                "summary": {"total": 0, "discharged": 0, "deaths": 0},
                "regional": []
            }
        }"#;

        let response: StatsResponse = serde_json::from_str(body).unwrap();
        assert!(response.last_refreshed.is_none());
        assert!(response.data.regional.is_empty());
    }

    #[test]
    fn test_decode_negative_counters_pass_through() {
        // Corrected deltas are published as-is; decoding must not reject them
        let body = r#"{
            "data": {
                "summary": {"total": 5, "discharged": -2, "deaths": 0},
                "regional": [
                    {"loc": "Goa", "totalConfirmed": -1, "discharged": 0, "deaths": 0}
                ]
            }
        }"#;

        let response: StatsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.data.summary.discharged, -2);
        assert_eq!(response.data.regional[0].total_confirmed, -1);
    }

    #[test]
    fn test_decode_missing_field_is_an_error() {
        let body = r#"{"data": {"summary": {"total": 1}, "regional": []}}"#;
        assert!(serde_json::from_str::<StatsResponse>(body).is_err());
    }
}
