//! The location provider consumed by the search controller.
//!
//! Device flow: IP geolocation → `PermissionDenied` / `PositionUnavailable`
//! Query flow:  trim check → Nominatim, first candidate → `NoMatch` / `Provider`

use super::providers;
use super::types::{LocationError, ResolvedOrigin};

/// Resolves an origin from either the device or a free-text query.
///
/// Both operations suspend on the underlying I/O. Resolution failures are
/// fatal to the search attempt and must reach the user.
pub trait ResolveLocation {
    async fn resolve_from_device(&self) -> Result<ResolvedOrigin, LocationError>;
    async fn resolve_from_query(&self, text: &str) -> Result<ResolvedOrigin, LocationError>;
}

/// The production provider: IP geolocation for the device flow, Nominatim
/// for free-text queries.
pub struct LocationProvider {
    http: reqwest::Client,
    device_capable: bool,
}

impl LocationProvider {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            device_capable: true,
        }
    }

    /// Disable the geolocation capability, as on a platform without one.
    pub fn without_device(mut self) -> Self {
        self.device_capable = false;
        self
    }
}

impl ResolveLocation for LocationProvider {
    async fn resolve_from_device(&self) -> Result<ResolvedOrigin, LocationError> {
        if !self.device_capable {
            return Err(LocationError::Unsupported);
        }
        providers::device_fix(&self.http).await
    }

    async fn resolve_from_query(&self, text: &str) -> Result<ResolvedOrigin, LocationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            // Local validation; never reaches the network.
            return Err(LocationError::EmptyQuery);
        }
        providers::geocode_first_match(&self.http, trimmed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_query_rejected_before_network() {
        let provider = LocationProvider::new(reqwest::Client::new());
        let err = provider.resolve_from_query("   ").await.unwrap_err();
        assert_eq!(err, LocationError::EmptyQuery);
    }

    #[tokio::test]
    async fn test_device_unsupported_when_disabled() {
        let provider = LocationProvider::new(reqwest::Client::new()).without_device();
        let err = provider.resolve_from_device().await.unwrap_err();
        assert_eq!(err, LocationError::Unsupported);
    }
}
