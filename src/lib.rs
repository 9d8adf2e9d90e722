//! MediMap — a location-resolution-and-rendering pipeline.
//!
//! Resolves an origin (device geolocation or free-text query), drives a map
//! view to it, fetches nearby hospitals, and reconciles the results into map
//! markers and a textual list.

pub mod controller;
pub mod geo;
pub mod location;
pub mod map;
pub mod poi;
pub mod server;
