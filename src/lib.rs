//! # sarissa-geo
//!
//! Geopoint distance search over an inverted index.
//!
//! ## Features
//!
//! - Radius search with exact haversine post-filtering
//! - Bounding boxes decomposed into multi-resolution Morton terms
//! - Antimeridian-aware query decomposition
//! - Lazy searchers with explicit resource release
//!
//! ## Example
//!
//! ```
//! use sarissa_geo::prelude::*;
//!
//! let mut index = MemoryIndex::new();
//! index.add_geo_point(0, "location", -179.95, 0.0).unwrap();
//! index.add_geo_point(1, "location", 10.0, 10.0).unwrap();
//!
//! let center = GeoPoint::new(179.9, 0.0).unwrap();
//! let query = GeoDistanceQuery::from_distance_str("location", center, "50km").unwrap();
//! let mut searcher = query.searcher(&index, &SearcherOptions::default()).unwrap();
//!
//! let mut collector = TopDocsCollector::new(10);
//! collect_all(searcher.as_mut(), &mut collector).unwrap();
//! assert_eq!(collector.top_docs().hits[0].doc_id, 0);
//! ```

pub mod cli;
pub mod error;
pub mod geo;
pub mod index;
pub mod numeric;
pub mod query;
pub mod search;

pub mod prelude {
    pub use crate::error::{GeoSearchError, Result};
    pub use crate::geo::{BoundingBox, Distance, DistanceUnit, GeoPoint};
    pub use crate::index::{IndexReader, MemoryIndex};
    pub use crate::query::{GeoBoundingBoxQuery, GeoDistanceQuery, Query};
    pub use crate::search::{
        Collector, ScoreMode, ScoringParams, Searcher, SearcherOptions, TopDocsCollector,
        collect_all, new_geo_point_distance_searcher,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
