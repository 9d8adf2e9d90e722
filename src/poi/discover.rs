//! Client for the upstream HERE-style discover API.

use super::client::points_from_body;
use super::types::{PointOfInterest, PoiError, SearchPoints};
use crate::geo::Coordinate;
use serde_json::Value;

pub const DISCOVER_ENDPOINT: &str = "https://discover.search.hereapi.com/v1/discover";
pub const DISCOVER_QUERY: &str = "hospital";
pub const DEFAULT_LIMIT: u8 = 4;

/// Searches the discover API for hospitals around a coordinate.
///
/// Items come back in the same `{title, position?}` shape the backend
/// forwards, so decoding is shared with [`BackendClient`](super::BackendClient).
#[derive(Clone)]
pub struct DiscoverClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    limit: u8,
}

impl DiscoverClient {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>, limit: u8) -> Self {
        Self {
            http,
            endpoint: DISCOVER_ENDPOINT.to_string(),
            api_key: api_key.into(),
            limit,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl SearchPoints for DiscoverClient {
    async fn search(&self, center: Coordinate) -> Result<Vec<PointOfInterest>, PoiError> {
        let url = format!(
            "{}?apikey={}&q={}&at={},{}&limit={}",
            self.endpoint,
            urlencoding::encode(&self.api_key),
            DISCOVER_QUERY,
            center.latitude,
            center.longitude,
            self.limit,
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| PoiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PoiError::Network(format!(
                "discover API returned HTTP {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PoiError::MalformedResponse(e.to_string()))?;

        let items = body.get("items").cloned().unwrap_or(Value::Array(vec![]));
        points_from_body(&items)
    }
}
