//! Client for the hospital search backend.

use super::types::{PointOfInterest, PoiError, SearchPoints};
use crate::geo::Coordinate;
use serde_json::Value;

/// Talks to a running MediMap backend: `POST {base}/api/search_hospitals`
/// with `{"latitude", "longitude"}`, expecting a JSON array of
/// `{title, position?}` records.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }
}

impl SearchPoints for BackendClient {
    async fn search(&self, center: Coordinate) -> Result<Vec<PointOfInterest>, PoiError> {
        let url = format!("{}/api/search_hospitals", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "latitude": center.latitude,
                "longitude": center.longitude,
            }))
            .send()
            .await
            .map_err(|e| PoiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PoiError::Network(format!(
                "backend returned HTTP {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PoiError::MalformedResponse(e.to_string()))?;

        points_from_body(&body)
    }
}

/// Decode a response body into points. The body must be an array; anything
/// else is `MalformedResponse`. Individual records are handled tolerantly:
/// one bad record must not block the rest.
pub fn points_from_body(body: &Value) -> Result<Vec<PointOfInterest>, PoiError> {
    let items = body
        .as_array()
        .ok_or_else(|| PoiError::MalformedResponse("expected a JSON array".into()))?;

    let mut points = Vec::with_capacity(items.len());
    for item in items {
        let Some(title) = item.get("title").and_then(Value::as_str) else {
            log::warn!("Skipping point without a title: {}", item);
            continue;
        };
        points.push(PointOfInterest {
            title: title.to_string(),
            position: position_from_item(title, item),
        });
    }
    Ok(points)
}

/// Extract a structurally valid position, or record a diagnostic and return
/// None so the point is still listed.
fn position_from_item(title: &str, item: &Value) -> Option<Coordinate> {
    let raw = item.get("position")?;
    let lat = raw.get("lat").and_then(Value::as_f64);
    let lng = raw.get("lng").and_then(Value::as_f64);
    match (lat, lng) {
        (Some(lat), Some(lng)) => match Coordinate::new(lat, lng) {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!("Invalid position for '{}': {}", title, e);
                None
            }
        },
        _ => {
            log::warn!("Invalid position data for '{}': {}", title, raw);
            None
        }
    }
}
