//! Geographic primitives shared by every pipeline stage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair identifying a point on the globe.
///
/// Immutable value type. Construction validates the ranges; a `Coordinate`
/// that exists is always structurally valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Coordinate construction errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LatitudeOutOfRange(v) => {
                write!(f, "Latitude {} out of range (-90..90)", v)
            }
            Self::LongitudeOutOfRange(v) => {
                write!(f, "Longitude {} out of range (-180..180)", v)
            }
        }
    }
}

impl std::error::Error for GeoError {}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&latitude) || !latitude.is_finite() {
            return Err(GeoError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) || !longitude.is_finite() {
            return Err(GeoError::LongitudeOutOfRange(longitude));
        }
        Ok(Self { latitude, longitude })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}°{}, {:.4}°{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_valid_coordinate() {
        let c = Coordinate::new(37.7749, -122.4194).unwrap();
        assert_relative_eq!(c.latitude, 37.7749);
        assert_relative_eq!(c.longitude, -122.4194);
    }

    #[test]
    fn test_boundary_values() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_latitude_out_of_range() {
        assert_eq!(
            Coordinate::new(91.0, 0.0),
            Err(GeoError::LatitudeOutOfRange(91.0))
        );
    }

    #[test]
    fn test_longitude_out_of_range() {
        assert_eq!(
            Coordinate::new(0.0, -180.5),
            Err(GeoError::LongitudeOutOfRange(-180.5))
        );
    }

    #[test]
    fn test_nan_rejected() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_display_hemispheres() {
        let c = Coordinate::new(37.7749, -122.4194).unwrap();
        assert_eq!(format!("{}", c), "37.7749°N, 122.4194°W");
    }

    #[test]
    fn test_serde_round_trip() {
        let c = Coordinate::new(-33.8688, 151.2093).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
