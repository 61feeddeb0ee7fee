//! Bounding-box searcher over prefix-coded Morton terms.
//!
//! The Morton space is halved recursively. Cells lying entirely inside the
//! query box are matched through a single coarse term; cells straddling the
//! box edge are refined down to a detail level and, when boundaries are
//! checked, re-verified against the decoded full-precision points.

use log::debug;

use crate::error::{GeoSearchError, Result};
use crate::geo::{morton_unhash_lat, morton_unhash_lon, rect_intersects, rect_within};
use crate::index::IndexReader;
use crate::numeric::{MAX_SHIFT, PrefixCoded};
use crate::search::disjunction::DisjunctionSearcher;
use crate::search::filter::FilteringSearcher;
use crate::search::geo_filter::build_rect_filter;
use crate::search::multi_term::new_multi_term_searcher;
use crate::search::options::SearcherOptions;
use crate::search::scoring::ScoringParams;
use crate::search::searcher::{EmptySearcher, OpenedSearchers, Searcher};

/// Largest precision step that still leaves a positive detail level.
pub const MAX_GEO_PRECISION_STEP: u32 = 15;

/// Terms covering a query rectangle, split by whether their cell crosses the
/// rectangle edge.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GeoRangeTerms {
    pub on_boundary: Vec<PrefixCoded>,
    pub not_on_boundary: Vec<PrefixCoded>,
}

impl GeoRangeTerms {
    pub fn len(&self) -> usize {
        self.on_boundary.len() + self.not_on_boundary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.on_boundary.is_empty() && self.not_on_boundary.is_empty()
    }
}

struct GeoRangeCollector {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
    precision_step: u32,
    detail_level: u32,
    check_boundaries: bool,
    terms: GeoRangeTerms,
}

impl GeoRangeCollector {
    fn split(&mut self, term: u64, shift: u32) -> Result<()> {
        let split = term | (1u64 << shift);
        let upper_max = if shift < MAX_SHIFT {
            term | ((1u64 << (shift + 1)) - 1)
        } else {
            u64::MAX
        };
        let lower_max = split - 1;

        self.relate(term, lower_max, shift)?;
        self.relate(split, upper_max, shift)
    }

    fn relate(&mut self, start: u64, end: u64, res: u32) -> Result<()> {
        let cell_min_lon = morton_unhash_lon(start);
        let cell_min_lat = morton_unhash_lat(start);
        let cell_max_lon = morton_unhash_lon(end);
        let cell_max_lat = morton_unhash_lat(end);

        let level = (64 - res) >> 1;

        let within = res % self.precision_step == 0
            && rect_within(
                cell_min_lon,
                cell_min_lat,
                cell_max_lon,
                cell_max_lat,
                self.min_lon,
                self.min_lat,
                self.max_lon,
                self.max_lat,
            );
        let intersects = || {
            rect_intersects(
                cell_min_lon,
                cell_min_lat,
                cell_max_lon,
                cell_max_lat,
                self.min_lon,
                self.min_lat,
                self.max_lon,
                self.max_lat,
            )
        };

        if within || (level == self.detail_level && intersects()) {
            let term = PrefixCoded::from_i64(start as i64, res)?;
            if !within && self.check_boundaries {
                self.terms.on_boundary.push(term);
            } else {
                self.terms.not_on_boundary.push(term);
            }
        } else if level < self.detail_level && intersects() {
            self.split(start, res - 1)?;
        }
        Ok(())
    }
}

/// Compute the prefix-coded terms covering a non-wrapping rectangle.
pub fn compute_geo_range(
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
    check_boundaries: bool,
    precision_step: u32,
) -> Result<GeoRangeTerms> {
    if precision_step == 0 || precision_step > MAX_GEO_PRECISION_STEP {
        return Err(GeoSearchError::query(format!(
            "geo precision step must be between 1 and {MAX_GEO_PRECISION_STEP}, got {precision_step}"
        )));
    }

    let mut collector = GeoRangeCollector {
        min_lon,
        min_lat,
        max_lon,
        max_lat,
        precision_step,
        detail_level: (64 - 4 * precision_step) / 2,
        check_boundaries,
        terms: GeoRangeTerms::default(),
    };
    collector.split(0, MAX_SHIFT)?;
    Ok(collector.terms)
}

/// Build a searcher for documents with a point inside a non-wrapping
/// rectangle.
///
/// With `check_boundaries` set, candidates from cells that straddle the
/// rectangle edge are verified against their full-precision points; without
/// it they are returned as is.
#[allow(clippy::too_many_arguments)]
pub fn new_geo_bounding_box_searcher(
    reader: &dyn IndexReader,
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
    field: &str,
    scoring: &ScoringParams,
    options: &SearcherOptions,
    check_boundaries: bool,
    precision_step: u32,
) -> Result<Box<dyn Searcher>> {
    if max_lon < min_lon {
        return Err(GeoSearchError::geometry(format!(
            "bounding box [{min_lon}, {max_lon}] crosses the dateline and must be split"
        )));
    }

    let terms = compute_geo_range(
        min_lon,
        min_lat,
        max_lon,
        max_lat,
        check_boundaries,
        precision_step,
    )?;
    debug!(
        "bounding box [{min_lon}, {min_lat}, {max_lon}, {max_lat}] on {field}: {} boundary terms, {} inner terms",
        terms.on_boundary.len(),
        terms.not_on_boundary.len()
    );

    let mut opened = OpenedSearchers::new();

    if !terms.on_boundary.is_empty() {
        let dv_reader = reader.document_value_reader(&[field])?;
        let raw = new_multi_term_searcher(reader, &terms.on_boundary, field, scoring, options)?;
        let filter = build_rect_filter(dv_reader, min_lon, min_lat, max_lon, max_lat);
        opened.push(Box::new(FilteringSearcher::new(raw, filter)));
    }

    if !terms.not_on_boundary.is_empty() {
        let searcher =
            new_multi_term_searcher(reader, &terms.not_on_boundary, field, scoring, options)?;
        opened.push(searcher);
    }

    match opened.len() {
        0 => Ok(Box::new(EmptySearcher::new())),
        1 => Ok(opened
            .into_inner()
            .pop()
            .unwrap_or_else(|| Box::new(EmptySearcher::new()))),
        _ => Ok(Box::new(DisjunctionSearcher::new(
            opened,
            0,
            options,
            scoring.composite.clone(),
        )?)),
    }
}
