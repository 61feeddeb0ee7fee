//! Great-circle distance and circle bounding rectangles.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{GeoSearchError, Result};
use crate::geo::bbox::BoundingBox;
use crate::geo::point::{check_latitude, check_longitude};

/// Mean Earth radius in meters.
pub const EARTH_MEAN_RADIUS_METERS: f64 = 6_371_008.7714;

const MIN_LAT_RAD: f64 = -FRAC_PI_2;
const MAX_LAT_RAD: f64 = FRAC_PI_2;
const MIN_LON_RAD: f64 = -PI;
const MAX_LON_RAD: f64 = PI;

/// Slack added to the radius so quantized points on the circle stay inside
/// the rectangle.
const RADIUS_SLACK_METERS: f64 = 7e-2;

/// Haversine distance in kilometers between two points given in degrees.
pub fn haversin(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let x1 = lat1.to_radians();
    let x2 = lat2.to_radians();
    let h1 = 1.0 - (x1 - x2).cos();
    let h2 = 1.0 - (lon1 - lon2).to_radians().cos();
    let h = (h1 + x1.cos() * x2.cos() * h2) / 2.0;

    let diameter_km = 2.0 * EARTH_MEAN_RADIUS_METERS / 1000.0;
    diameter_km * h.sqrt().min(1.0).asin()
}

/// Compute the smallest lon/lat rectangle containing every point within
/// `dist` meters of (`lon`, `lat`).
///
/// The returned box wraps the antimeridian (its `bottom_right_lon` is smaller
/// than its `top_left_lon`) when the circle crosses it.
pub fn rect_from_point_distance(lon: f64, lat: f64, dist: f64) -> Result<BoundingBox> {
    check_longitude(lon)?;
    check_latitude(lat)?;
    if !dist.is_finite() || dist < 0.0 {
        return Err(GeoSearchError::geometry(format!(
            "invalid distance: {dist} (must be a finite, non-negative number of meters)"
        )));
    }

    let rad_lon = lon.to_radians();
    let rad_lat = lat.to_radians();
    let rad_distance = (dist + RADIUS_SLACK_METERS) / EARTH_MEAN_RADIUS_METERS;

    let mut min_lat = rad_lat - rad_distance;
    let mut max_lat = rad_lat + rad_distance;

    let (min_lon, max_lon);
    let spread = rad_distance.sin() / rad_lat.cos();
    if min_lat > MIN_LAT_RAD && max_lat < MAX_LAT_RAD && rad_distance < PI && spread < 1.0 {
        let delta_lon = spread.asin();
        let mut lo = rad_lon - delta_lon;
        if lo < MIN_LON_RAD {
            lo += 2.0 * PI;
        }
        let mut hi = rad_lon + delta_lon;
        if hi > MAX_LON_RAD {
            hi -= 2.0 * PI;
        }
        min_lon = lo;
        max_lon = hi;
    } else {
        // a pole is inside the circle, or it spans every meridian
        min_lat = min_lat.max(MIN_LAT_RAD);
        max_lat = max_lat.min(MAX_LAT_RAD);
        min_lon = MIN_LON_RAD;
        max_lon = MAX_LON_RAD;
    }

    Ok(BoundingBox::new(
        min_lon.to_degrees(),
        max_lat.to_degrees(),
        max_lon.to_degrees(),
        min_lat.to_degrees(),
    ))
}
