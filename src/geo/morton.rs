//! Morton (Z-order) encoding of longitude/latitude pairs.
//!
//! Each axis is quantized to [`GEO_BITS`] bits; longitude bits occupy the even
//! positions of the code and latitude bits the odd positions.

use crate::geo::{MIN_LAT, MIN_LON};
use crate::numeric::{deinterleave, interleave};

/// Bits of precision per axis.
pub const GEO_BITS: u32 = 32;

const LON_SCALE: f64 = ((1u64 << GEO_BITS) - 1) as f64 / 360.0;
const LAT_SCALE: f64 = ((1u64 << GEO_BITS) - 1) as f64 / 180.0;

fn scale_lon(lon: f64) -> u64 {
    ((lon - MIN_LON) * LON_SCALE) as u64
}

fn scale_lat(lat: f64) -> u64 {
    ((lat - MIN_LAT) * LAT_SCALE) as u64
}

fn unscale_lon(lon: u64) -> f64 {
    (lon as f64 / LON_SCALE) + MIN_LON
}

fn unscale_lat(lat: u64) -> f64 {
    (lat as f64 / LAT_SCALE) + MIN_LAT
}

/// Encode a point into a 64-bit Morton code.
pub fn morton_hash(lon: f64, lat: f64) -> u64 {
    interleave(scale_lon(lon), scale_lat(lat))
}

/// Longitude of a Morton code.
pub fn morton_unhash_lon(hash: u64) -> f64 {
    unscale_lon(deinterleave(hash))
}

/// Latitude of a Morton code.
pub fn morton_unhash_lat(hash: u64) -> f64 {
    unscale_lat(deinterleave(hash >> 1))
}
