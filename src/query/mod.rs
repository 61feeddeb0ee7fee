//! Query types that build searchers against an index reader.

pub mod geo;

use std::fmt::Debug;

use crate::error::Result;
use crate::index::IndexReader;
use crate::search::{SearcherOptions, Searcher};

pub use self::geo::{GeoBoundingBoxQuery, GeoDistanceQuery};

/// Trait for all query types.
pub trait Query: Send + Sync + Debug {
    /// Build a searcher evaluating this query.
    fn searcher(
        &self,
        reader: &dyn IndexReader,
        options: &SearcherOptions,
    ) -> Result<Box<dyn Searcher>>;

    /// Get the boost factor for this query.
    fn boost(&self) -> f64;

    /// Set the boost factor for this query.
    fn set_boost(&mut self, boost: f64);

    /// Get a human-readable description of this query.
    fn description(&self) -> String;
}
