//! Longitude/latitude bounding boxes and rectangle relations.

use serde::{Deserialize, Serialize};

use crate::geo::{MAX_LON, MIN_LON};

/// An axis-aligned lon/lat rectangle given by its top-left and bottom-right
/// corners.
///
/// A box whose `bottom_right_lon` is smaller than its `top_left_lon` wraps
/// across the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top_left_lon: f64,
    pub top_left_lat: f64,
    pub bottom_right_lon: f64,
    pub bottom_right_lat: f64,
}

impl BoundingBox {
    /// Create a box from its corners.
    pub fn new(
        top_left_lon: f64,
        top_left_lat: f64,
        bottom_right_lon: f64,
        bottom_right_lat: f64,
    ) -> Self {
        BoundingBox {
            top_left_lon,
            top_left_lat,
            bottom_right_lon,
            bottom_right_lat,
        }
    }

    /// Create a non-wrapping box from its min/max extents.
    pub fn from_extents(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        BoundingBox::new(min_lon, max_lat, max_lon, min_lat)
    }

    pub fn min_lon(&self) -> f64 {
        self.top_left_lon
    }

    pub fn max_lon(&self) -> f64 {
        self.bottom_right_lon
    }

    pub fn min_lat(&self) -> f64 {
        self.bottom_right_lat
    }

    pub fn max_lat(&self) -> f64 {
        self.top_left_lat
    }

    /// Whether the box wraps across the antimeridian.
    pub fn crosses_dateline(&self) -> bool {
        self.bottom_right_lon < self.top_left_lon
    }

    /// Split a wrapping box into its western (`-180..bottom_right_lon`) and
    /// eastern (`top_left_lon..180`) halves. Returns `None` for boxes that do
    /// not wrap.
    pub fn split_at_dateline(&self) -> Option<(BoundingBox, BoundingBox)> {
        if !self.crosses_dateline() {
            return None;
        }

        let left = BoundingBox::from_extents(
            MIN_LON,
            self.bottom_right_lat,
            self.bottom_right_lon,
            self.top_left_lat,
        );
        let right = BoundingBox::from_extents(
            self.top_left_lon,
            self.bottom_right_lat,
            MAX_LON,
            self.top_left_lat,
        );
        Some((left, right))
    }

    /// Whether the point lies inside the box, honouring dateline wrap.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        if lat < self.min_lat() || lat > self.max_lat() {
            return false;
        }
        if self.crosses_dateline() {
            lon >= self.top_left_lon || lon <= self.bottom_right_lon
        } else {
            lon >= self.top_left_lon && lon <= self.bottom_right_lon
        }
    }
}

/// Whether rectangle `a` intersects rectangle `b` (both given as
/// min_x, min_y, max_x, max_y).
#[allow(clippy::too_many_arguments)]
pub fn rect_intersects(
    a_min_x: f64,
    a_min_y: f64,
    a_max_x: f64,
    a_max_y: f64,
    b_min_x: f64,
    b_min_y: f64,
    b_max_x: f64,
    b_max_y: f64,
) -> bool {
    !(a_max_x < b_min_x || a_min_x > b_max_x || a_max_y < b_min_y || a_min_y > b_max_y)
}

/// Whether rectangle `a` lies entirely within rectangle `b`.
#[allow(clippy::too_many_arguments)]
pub fn rect_within(
    a_min_x: f64,
    a_min_y: f64,
    a_max_x: f64,
    a_max_y: f64,
    b_min_x: f64,
    b_min_y: f64,
    b_max_x: f64,
    b_max_y: f64,
) -> bool {
    !(a_min_x < b_min_x || a_min_y < b_min_y || a_max_x > b_max_x || a_max_y > b_max_y)
}

/// Whether a point lies inside a non-wrapping rectangle, edges included.
pub fn bounding_box_contains(
    lon: f64,
    lat: f64,
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
) -> bool {
    lon >= min_lon && lon <= max_lon && lat >= min_lat && lat <= max_lat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_at_dateline() {
        let bbox = BoundingBox::new(179.5, 1.0, -179.5, -1.0);
        assert!(bbox.crosses_dateline());

        let (left, right) = bbox.split_at_dateline().unwrap();
        assert_eq!(left, BoundingBox::from_extents(-180.0, -1.0, -179.5, 1.0));
        assert_eq!(right, BoundingBox::from_extents(179.5, -1.0, 180.0, 1.0));
        assert!(!left.crosses_dateline());
        assert!(!right.crosses_dateline());
    }

    #[test]
    fn test_split_covers_wrapped_box() {
        let bbox = BoundingBox::new(170.0, 10.0, -160.0, -10.0);
        let (left, right) = bbox.split_at_dateline().unwrap();

        let mut lon = -180.0;
        while lon <= 180.0 {
            for lat in [-10.0, -3.5, 0.0, 9.99, 10.0] {
                let in_halves = left.contains(lon, lat) || right.contains(lon, lat);
                assert_eq!(in_halves, bbox.contains(lon, lat), "lon {lon} lat {lat}");
                if left.contains(lon, lat) && right.contains(lon, lat) {
                    // the halves only meet at the antimeridian itself
                    assert!(lon == -180.0 || lon == 180.0);
                }
            }
            lon += 0.25;
        }
    }

    #[test]
    fn test_non_wrapping_box_does_not_split() {
        let bbox = BoundingBox::from_extents(-10.0, -5.0, 10.0, 5.0);
        assert!(bbox.split_at_dateline().is_none());
        assert!(bbox.contains(0.0, 0.0));
        assert!(!bbox.contains(11.0, 0.0));
    }

    #[test]
    fn test_rect_relations() {
        assert!(rect_intersects(0.0, 0.0, 2.0, 2.0, 1.0, 1.0, 3.0, 3.0));
        assert!(!rect_intersects(0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0));
        assert!(rect_within(1.0, 1.0, 2.0, 2.0, 0.0, 0.0, 3.0, 3.0));
        assert!(!rect_within(0.0, 0.0, 2.0, 2.0, 1.0, 1.0, 3.0, 3.0));
        assert!(bounding_box_contains(1.0, 1.0, 0.0, 0.0, 1.0, 1.0));
        assert!(!bounding_box_contains(1.1, 1.0, 0.0, 0.0, 1.0, 1.0));
    }
}
