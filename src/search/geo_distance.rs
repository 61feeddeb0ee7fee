//! Distance searcher: documents with a geopoint within a radius of a center.
//!
//! The circle is first bounded by a lon/lat rectangle. A rectangle wrapping
//! the antimeridian is split into a western and an eastern half, each searched
//! independently and combined by a disjunction. Candidates from the rectangle
//! search are then re-checked with the haversine distance of their
//! full-precision points.

use log::{debug, warn};

use crate::error::{GeoSearchError, Result};
use crate::geo::{BoundingBox, rect_from_point_distance};
use crate::index::IndexReader;
use crate::search::disjunction::DisjunctionSearcher;
use crate::search::filter::FilteringSearcher;
use crate::search::geo_bbox::new_geo_bounding_box_searcher;
use crate::search::geo_filter::build_distance_filter;
use crate::search::options::SearcherOptions;
use crate::search::scoring::ScoringParams;
use crate::search::searcher::{OpenedSearchers, Searcher};

/// Build a searcher over a rectangle, splitting it at the antimeridian if it
/// wraps.
///
/// If the eastern half cannot be built after the western half was, the
/// western half is closed before the error is returned.
#[allow(clippy::too_many_arguments)]
pub fn box_searcher(
    reader: &dyn IndexReader,
    bbox: &BoundingBox,
    field: &str,
    scoring: &ScoringParams,
    options: &SearcherOptions,
    check_boundaries: bool,
    precision_step: u32,
) -> Result<Box<dyn Searcher>> {
    let rect_searcher = |rect: &BoundingBox| {
        new_geo_bounding_box_searcher(
            reader,
            rect.min_lon(),
            rect.min_lat(),
            rect.max_lon(),
            rect.max_lat(),
            field,
            scoring,
            options,
            check_boundaries,
            precision_step,
        )
    };

    let Some((left, right)) = bbox.split_at_dateline() else {
        return rect_searcher(bbox);
    };
    debug!("bounding box {bbox:?} crosses the dateline, splitting into {left:?} and {right:?}");

    let mut opened = OpenedSearchers::new();
    opened.push(rect_searcher(&left)?);
    opened.push(rect_searcher(&right)?);

    let disjunction = DisjunctionSearcher::new(opened, 0, options, scoring.composite.clone())?;
    Ok(Box::new(disjunction))
}

/// Build a searcher for documents with a point within `dist` meters of
/// (`center_lon`, `center_lat`).
///
/// # Errors
///
/// * [`GeoSearchError::Query`] for an empty field name or an unsupported
///   precision step.
/// * [`GeoSearchError::Geometry`] for an invalid center or radius.
/// * [`GeoSearchError::IndexAccess`] when the index cannot provide postings,
///   stored values, or a disjunction within the clause limit.
///
/// Every searcher built before a failing step is closed before the error is
/// returned.
#[allow(clippy::too_many_arguments)]
pub fn new_geo_point_distance_searcher(
    reader: &dyn IndexReader,
    center_lon: f64,
    center_lat: f64,
    dist: f64,
    field: &str,
    scoring: &ScoringParams,
    options: &SearcherOptions,
    precision_step: u32,
) -> Result<Box<dyn Searcher>> {
    if field.is_empty() {
        return Err(GeoSearchError::query("geo distance search requires a field"));
    }

    let bbox = rect_from_point_distance(center_lon, center_lat, dist)?;
    debug!("distance {dist}m from ({center_lon}, {center_lat}) bounded by {bbox:?}");

    let mut boxed = box_searcher(
        reader,
        &bbox,
        field,
        scoring,
        options,
        false,
        precision_step,
    )?;

    let dv_reader = match reader.document_value_reader(&[field]) {
        Ok(dv_reader) => dv_reader,
        Err(e) => {
            if let Err(close_err) = boxed.close() {
                warn!("failed to close bounding box searcher: {close_err}");
            }
            return Err(e);
        }
    };
    let filter = build_distance_filter(dv_reader, center_lon, center_lat, dist);

    Ok(Box::new(FilteringSearcher::new(boxed, filter)))
}
