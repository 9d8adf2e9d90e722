//! External location providers: Nominatim geocoding and IP geolocation.

use super::types::{LocationError, LocationSource, ResolvedOrigin};
use crate::geo::Coordinate;
use serde::Deserialize;

pub const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const IP_GEOLOCATE_ENDPOINT: &str = "https://ipapi.co/json/";

const USER_AGENT: &str = "MediMap/0.3 (hospital-finder)";

// ─── Nominatim geocoding ────────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
pub struct NominatimResult {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

/// Resolve free text via Nominatim. The response is an ordered candidate
/// list; the first entry wins — no ranking of our own.
pub async fn geocode_first_match(
    http: &reqwest::Client,
    query: &str,
) -> Result<ResolvedOrigin, LocationError> {
    let url = format!(
        "{}?q={}&format=json&limit=3",
        NOMINATIM_ENDPOINT,
        urlencoding::encode(query),
    );

    let response = http
        .get(&url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .map_err(|e| LocationError::Provider(e.to_string()))?;

    if !response.status().is_success() {
        return Err(LocationError::Provider(format!(
            "geocoder returned HTTP {}",
            response.status()
        )));
    }

    let results: Vec<NominatimResult> = response
        .json()
        .await
        .map_err(|e| LocationError::Provider(e.to_string()))?;

    origin_from_candidates(query, results)
}

/// First-candidate selection over the provider-ordered result list.
pub fn origin_from_candidates(
    query: &str,
    results: Vec<NominatimResult>,
) -> Result<ResolvedOrigin, LocationError> {
    let first = results
        .into_iter()
        .next()
        .ok_or_else(|| LocationError::NoMatch(query.to_string()))?;

    let lat: f64 = first
        .lat
        .parse()
        .map_err(|_| LocationError::Provider(format!("unparseable latitude '{}'", first.lat)))?;
    let lon: f64 = first
        .lon
        .parse()
        .map_err(|_| LocationError::Provider(format!("unparseable longitude '{}'", first.lon)))?;

    let coordinate =
        Coordinate::new(lat, lon).map_err(|e| LocationError::Provider(e.to_string()))?;

    Ok(ResolvedOrigin {
        coordinate,
        label: first.display_name,
        source: LocationSource::Geocoded,
    })
}

// ─── IP-based geolocation ───────────────────────────────────────

#[derive(Deserialize, Debug)]
pub struct IpFix {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub country_name: Option<String>,
}

/// Produce a device fix via IP geolocation.
pub async fn device_fix(http: &reqwest::Client) -> Result<ResolvedOrigin, LocationError> {
    let response = http
        .get(IP_GEOLOCATE_ENDPOINT)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .map_err(|_| LocationError::PositionUnavailable)?;

    let status = response.status();
    if status == reqwest::StatusCode::FORBIDDEN || status == reqwest::StatusCode::TOO_MANY_REQUESTS
    {
        return Err(LocationError::PermissionDenied);
    }
    if !status.is_success() {
        return Err(LocationError::PositionUnavailable);
    }

    let fix: IpFix = response
        .json()
        .await
        .map_err(|_| LocationError::PositionUnavailable)?;

    origin_from_fix(fix)
}

/// Map a raw fix onto a resolved origin. A fix without both coordinates is
/// no fix at all.
pub fn origin_from_fix(fix: IpFix) -> Result<ResolvedOrigin, LocationError> {
    let lat = fix.latitude.ok_or(LocationError::PositionUnavailable)?;
    let lon = fix.longitude.ok_or(LocationError::PositionUnavailable)?;
    let coordinate = Coordinate::new(lat, lon).map_err(|_| LocationError::PositionUnavailable)?;

    let label = match (fix.city, fix.country_name) {
        (Some(city), Some(country)) => format!("{}, {}", city, country),
        (Some(city), None) => city,
        _ => format!("{}", coordinate),
    };

    Ok(ResolvedOrigin {
        coordinate,
        label,
        source: LocationSource::Device,
    })
}
