//! Distance, directions and user-location helpers

use std::time::Duration;

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

use crate::models::Coordinates;
use crate::{Result, TravelGuideError};

/// How long the client waits for a position fix before giving up
pub const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Great-circle distance in kilometres (Earth radius 6371 km)
#[must_use]
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let from = HaversineLocation {
        latitude: lat1,
        longitude: lon1,
    };
    let to = HaversineLocation {
        latitude: lat2,
        longitude: lon2,
    };
    distance(from, to, Units::Kilometers)
}

/// Driving directions deep link between two points
#[must_use]
pub fn build_directions_link(from_lat: f64, from_lng: f64, to_lat: f64, to_lng: f64) -> String {
    format!("https://www.google.com/maps/dir/{from_lat},{from_lng}/{to_lat},{to_lng}")
}

/// Static preview image of the map around a destination
#[must_use]
pub fn static_map_url(center: &Coordinates, api_key: &str) -> String {
    let marker = format!("color:red|{},{}", center.latitude, center.longitude);
    format!(
        "https://maps.googleapis.com/maps/api/staticmap?center={},{}&zoom=12&size=800x400&markers={}&key={}",
        center.latitude,
        center.longitude,
        urlencoding::encode(&marker),
        urlencoding::encode(api_key)
    )
}

/// Parse coordinates from a string like "28.6129,77.2295" or "28.6129 77.2295"
pub fn parse_coordinates(input: &str) -> Result<Coordinates> {
    let parts: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    if parts.len() != 2 {
        return Err(TravelGuideError::validation(
            "Coordinates must be in format 'lat,lon'",
        ));
    }

    let lat = parts[0]
        .parse::<f64>()
        .map_err(|_| TravelGuideError::validation(format!("Invalid latitude: {}", parts[0])))?;
    let lon = parts[1]
        .parse::<f64>()
        .map_err(|_| TravelGuideError::validation(format!("Invalid longitude: {}", parts[1])))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(TravelGuideError::validation(format!(
            "Latitude must be between -90 and 90, got: {lat}"
        )));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(TravelGuideError::validation(format!(
            "Longitude must be between -180 and 180, got: {lon}"
        )));
    }

    Ok(Coordinates::new(lat, lon))
}

/// Result of asking the host platform for the user's position.
///
/// Only `Located` yields coordinates; the other outcomes are expected and
/// are surfaced to the user as an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GeolocationOutcome {
    Located(Coordinates),
    Denied,
    TimedOut,
    Unsupported,
}

impl GeolocationOutcome {
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            GeolocationOutcome::Located(coordinates) => Some(*coordinates),
            _ => None,
        }
    }

    /// Message to show instead of directions, if any
    #[must_use]
    pub fn advisory(&self) -> Option<&'static str> {
        match self {
            GeolocationOutcome::Located(_) => None,
            GeolocationOutcome::Denied => {
                Some("Could not access your location. Please enable location services.")
            }
            GeolocationOutcome::TimedOut => {
                Some("Locating you took too long. Please try again or enter your location.")
            }
            GeolocationOutcome::Unsupported => {
                Some("Geolocation is not supported by your browser.")
            }
        }
    }

    /// Interpret the error reason a client reports, e.g. "denied"
    #[must_use]
    pub fn from_failure(reason: &str) -> Self {
        match reason.trim().to_ascii_lowercase().as_str() {
            "denied" | "permission_denied" => GeolocationOutcome::Denied,
            "timeout" | "timed_out" => GeolocationOutcome::TimedOut,
            _ => GeolocationOutcome::Unsupported,
        }
    }
}
