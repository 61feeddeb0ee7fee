//! Geographical queries.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geo::{BoundingBox, Distance, GeoPoint};
use crate::index::IndexReader;
use crate::query::Query;
use crate::search::{
    GEO_PRECISION_STEP, ScoringParams, Searcher, SearcherOptions, box_searcher,
    new_geo_point_distance_searcher,
};

fn default_boost() -> f64 {
    1.0
}

fn default_precision_step() -> u32 {
    GEO_PRECISION_STEP
}

/// Documents with a geopoint within a distance of a center point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoDistanceQuery {
    /// Field containing geographical coordinates
    field: String,
    /// Center point for the search
    center: GeoPoint,
    /// Maximum distance in meters
    distance_meters: f64,
    /// Boost factor for the query
    #[serde(default = "default_boost")]
    boost: f64,
    /// Precision step the field was indexed with
    #[serde(default = "default_precision_step")]
    precision_step: u32,
}

impl GeoDistanceQuery {
    /// Create a new geo distance query.
    pub fn new<F: Into<String>>(field: F, center: GeoPoint, distance_meters: f64) -> Self {
        GeoDistanceQuery {
            field: field.into(),
            center,
            distance_meters,
            boost: 1.0,
            precision_step: GEO_PRECISION_STEP,
        }
    }

    /// Create a query from a distance string such as `"50km"` or `"10mi"`.
    pub fn from_distance_str<F: Into<String>>(
        field: F,
        center: GeoPoint,
        distance: &str,
    ) -> Result<Self> {
        let distance = Distance::parse(distance)?;
        Ok(Self::new(field, center, distance.to_meters()))
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = boost;
        self
    }

    /// Set the precision step the field was indexed with.
    pub fn with_precision_step(mut self, precision_step: u32) -> Self {
        self.precision_step = precision_step;
        self
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the center point.
    pub fn center(&self) -> GeoPoint {
        self.center
    }

    /// Get the search distance in meters.
    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }
}

impl Query for GeoDistanceQuery {
    fn searcher(
        &self,
        reader: &dyn IndexReader,
        options: &SearcherOptions,
    ) -> Result<Box<dyn Searcher>> {
        new_geo_point_distance_searcher(
            reader,
            self.center.lon,
            self.center.lat,
            self.distance_meters,
            &self.field,
            &ScoringParams::default().with_boost(self.boost),
            options,
            self.precision_step,
        )
    }

    fn boost(&self) -> f64 {
        self.boost
    }

    fn set_boost(&mut self, boost: f64) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        format!(
            "GeoDistanceQuery(field: {}, center: ({}, {}), distance: {}m)",
            self.field, self.center.lon, self.center.lat, self.distance_meters
        )
    }
}

/// Documents with a geopoint inside a bounding box.
///
/// Boxes wrapping the antimeridian are supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoBoundingBoxQuery {
    /// Field containing geographical coordinates
    field: String,
    /// Bounding box for the search
    bounding_box: BoundingBox,
    /// Boost factor for the query
    #[serde(default = "default_boost")]
    boost: f64,
    #[serde(default = "default_precision_step")]
    precision_step: u32,
}

impl GeoBoundingBoxQuery {
    /// Create a new geo bounding box query.
    pub fn new<F: Into<String>>(field: F, bounding_box: BoundingBox) -> Self {
        GeoBoundingBoxQuery {
            field: field.into(),
            bounding_box,
            boost: 1.0,
            precision_step: GEO_PRECISION_STEP,
        }
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = boost;
        self
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Set the precision step the field was indexed with.
    pub fn with_precision_step(mut self, precision_step: u32) -> Self {
        self.precision_step = precision_step;
        self
    }

    /// Get the bounding box.
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }
}

impl Query for GeoBoundingBoxQuery {
    fn searcher(
        &self,
        reader: &dyn IndexReader,
        options: &SearcherOptions,
    ) -> Result<Box<dyn Searcher>> {
        box_searcher(
            reader,
            &self.bounding_box,
            &self.field,
            &ScoringParams::default().with_boost(self.boost),
            options,
            true,
            self.precision_step,
        )
    }

    fn boost(&self) -> f64 {
        self.boost
    }

    fn set_boost(&mut self, boost: f64) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        format!(
            "GeoBoundingBoxQuery(field: {}, bounding_box: {:?})",
            self.field, self.bounding_box
        )
    }
}
