//! Core types for the location subsystem.

use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an origin was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationSource {
    Device,
    Geocoded,
    Manual,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device => write!(f, "Device"),
            Self::Geocoded => write!(f, "Geocoded"),
            Self::Manual => write!(f, "Manual"),
        }
    }
}

/// A confirmed origin: the coordinate the map gets rebuilt around, plus a
/// human-readable label and its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedOrigin {
    pub coordinate: Coordinate,
    pub label: String,
    pub source: LocationSource,
}

impl ResolvedOrigin {
    pub fn manual(coordinate: Coordinate) -> Self {
        Self {
            label: format!("{}", coordinate),
            coordinate,
            source: LocationSource::Manual,
        }
    }
}

/// Location resolution errors. All of these are fatal to the search attempt
/// that raised them and must be surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The geolocation provider refused to produce a fix.
    PermissionDenied,
    /// The geolocation provider could not produce a fix.
    PositionUnavailable,
    /// No geolocation capability exists on this platform.
    Unsupported,
    /// The query was empty after trimming; rejected before any network call.
    EmptyQuery,
    /// The geocoding service returned zero candidates.
    NoMatch(String),
    /// Transport or service failure while geocoding.
    Provider(String),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => {
                write!(f, "Unable to retrieve location: permission denied")
            }
            Self::PositionUnavailable => {
                write!(f, "Unable to retrieve location: position unavailable")
            }
            Self::Unsupported => {
                write!(f, "Geolocation is not supported on this platform")
            }
            Self::EmptyQuery => write!(f, "Please enter a location to search"),
            Self::NoMatch(q) => write!(f, "Location not found: '{}'", q),
            Self::Provider(msg) => write!(f, "Geocoding error: {}", msg),
        }
    }
}

impl std::error::Error for LocationError {}
