//! Geographic point type and coordinate validation.

use serde::{Deserialize, Serialize};

use crate::error::{GeoSearchError, Result};
use crate::geo::{MAX_LAT, MAX_LON, MIN_LAT, MIN_LON, distance::haversin};

/// A geographical point with longitude and latitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees (-180 to 180)
    pub lon: f64,
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
}

impl GeoPoint {
    /// Create a new geographical point.
    pub fn new(lon: f64, lat: f64) -> Result<Self> {
        check_longitude(lon)?;
        check_latitude(lat)?;
        Ok(GeoPoint { lon, lat })
    }

    /// Calculate the haversine distance to another point in kilometers.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversin(self.lon, self.lat, other.lon, other.lat)
    }
}

/// Validate a longitude in degrees.
pub fn check_longitude(lon: f64) -> Result<()> {
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(GeoSearchError::geometry(format!(
            "invalid longitude: {lon} (must be between -180 and 180)"
        )));
    }
    Ok(())
}

/// Validate a latitude in degrees.
pub fn check_latitude(lat: f64) -> Result<()> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(GeoSearchError::geometry(format!(
            "invalid latitude: {lat} (must be between -90 and 90)"
        )));
    }
    Ok(())
}
