//! Geographic primitives: points, rectangles, Morton codes and distances.

pub mod bbox;
pub mod distance;
pub mod morton;
pub mod point;
pub mod units;

pub use self::bbox::{BoundingBox, bounding_box_contains, rect_intersects, rect_within};
pub use self::distance::{EARTH_MEAN_RADIUS_METERS, haversin, rect_from_point_distance};
pub use self::morton::{GEO_BITS, morton_hash, morton_unhash_lat, morton_unhash_lon};
pub use self::point::{GeoPoint, check_latitude, check_longitude};
pub use self::units::{Distance, DistanceUnit};

/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;
/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;
