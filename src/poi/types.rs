//! Point-of-interest data model and the client seam.

use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named location returned by the hospital search. `position` may be
/// absent in the wire data; such points are listed but never mapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Coordinate>,
}

/// Wire shape for a marker position: `{"lat": …, "lng": …}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinate> for LatLng {
    fn from(c: Coordinate) -> Self {
        Self {
            lat: c.latitude,
            lng: c.longitude,
        }
    }
}

/// Wire record for one point: `{"title": …, "position"?: {…}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiRecord {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<LatLng>,
}

impl From<&PointOfInterest> for PoiRecord {
    fn from(p: &PointOfInterest) -> Self {
        Self {
            title: p.title.clone(),
            position: p.position.map(LatLng::from),
        }
    }
}

/// Point-of-interest fetch errors. Unlike location errors these degrade
/// gracefully: the map and origin marker stand, only the list is cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoiError {
    /// Transport failure reaching the search service.
    Network(String),
    /// The response was not the expected shape (e.g. not a list).
    MalformedResponse(String),
}

impl fmt::Display for PoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Hospital search network error: {}", msg),
            Self::MalformedResponse(msg) => {
                write!(f, "Hospital search returned malformed data: {}", msg)
            }
        }
    }
}

impl std::error::Error for PoiError {}

/// Queries nearby points of interest for a coordinate. An empty result is a
/// valid outcome, distinct from failure.
pub trait SearchPoints {
    async fn search(&self, center: Coordinate) -> Result<Vec<PointOfInterest>, PoiError>;
}
