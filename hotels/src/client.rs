use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::errors::{HotelSearchError, HotelSearchResult};

/// Seam between the adapter and the search API, so the adapter can be
/// exercised against scripted envelopes.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Performs one search request and returns the raw response envelope
    async fn fetch(&self, params: &[(String, String)]) -> HotelSearchResult<Value>;
}

const SEARCH_URL: &str = "https://serpapi.com/search";

/// SerpAPI search client.
///
/// Parameters are passed through as the query string unchanged; only the
/// credential is added by the adapter. The default engine applies.
#[derive(Debug, Clone)]
pub struct SerpApiClient {
    http: Client,
}

impl SerpApiClient {
    pub fn new() -> HotelSearchResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                HotelSearchError::Upstream(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { http })
    }
}

#[async_trait]
impl SearchTransport for SerpApiClient {
    async fn fetch(&self, params: &[(String, String)]) -> HotelSearchResult<Value> {
        debug!(param_count = params.len(), "Sending hotel search request");

        let response = self
            .http
            .get(SEARCH_URL)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                HotelSearchError::Upstream(format!("Failed to send search request: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            HotelSearchError::Upstream(format!("Failed to read search response: {}", e))
        })?;

        if !status.is_success() {
            return Err(HotelSearchError::Upstream(format!(
                "search request failed with status {}: {}",
                status, body
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            HotelSearchError::Upstream(format!("search response is not valid JSON: {}", e))
        })
    }
}
