//! Point-of-interest search subsystem.

pub mod client;
pub mod discover;
pub mod types;

pub use client::BackendClient;
pub use discover::DiscoverClient;
pub use types::{LatLng, PoiError, PoiRecord, PointOfInterest, SearchPoints};
