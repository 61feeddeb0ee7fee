//! Predicates checking the exact stored coordinates of a candidate.
//!
//! A geopoint field stores one prefix-coded Morton term per precision step.
//! Only the shift-0 term carries the full coordinate; coarser terms are
//! skipped. Documents may hold several points and match if any point passes.

use std::sync::Arc;

use crate::geo::{bounding_box_contains, haversin, morton_unhash_lat, morton_unhash_lon};
use crate::index::DocumentValueReader;
use crate::numeric::{decode_i64, decode_shift};
use crate::search::filter::FilterFn;
use crate::search::searcher::DocumentMatch;

/// Decode the full-precision points stored for a document.
///
/// Returns `None` when the stored values cannot be visited. Terms that fail
/// to decode are skipped.
pub fn full_precision_points(
    reader: &dyn DocumentValueReader,
    doc_id: u64,
) -> Option<Vec<(f64, f64)>> {
    let values = reader.document_values(doc_id).ok()?;

    let mut points = Vec::new();
    for value in values {
        let (_, term) = value.ok()?;
        if !matches!(decode_shift(term), Ok(0)) {
            continue;
        }
        if let Ok(hash) = decode_i64(term) {
            let hash = hash as u64;
            points.push((morton_unhash_lon(hash), morton_unhash_lat(hash)));
        }
    }
    Some(points)
}

/// Build the predicate accepting documents with a stored point within
/// `max_dist` meters of the center.
pub fn build_distance_filter(
    reader: Arc<dyn DocumentValueReader>,
    center_lon: f64,
    center_lat: f64,
    max_dist: f64,
) -> FilterFn {
    // haversin reports kilometers
    let max_dist_km = max_dist / 1000.0;
    Arc::new(move |d: &DocumentMatch| {
        full_precision_points(reader.as_ref(), d.number).is_some_and(|points| {
            points
                .iter()
                .any(|&(lon, lat)| haversin(lon, lat, center_lon, center_lat) <= max_dist_km)
        })
    })
}

/// Build the predicate accepting documents with a stored point inside a
/// non-wrapping rectangle.
pub fn build_rect_filter(
    reader: Arc<dyn DocumentValueReader>,
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
) -> FilterFn {
    Arc::new(move |d: &DocumentMatch| {
        full_precision_points(reader.as_ref(), d.number).is_some_and(|points| {
            points.iter().any(|&(lon, lat)| {
                bounding_box_contains(lon, lat, min_lon, min_lat, max_lon, max_lat)
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GeoSearchError, Result};
    use crate::geo::morton_hash;
    use crate::index::{DocumentValues, IndexReader, MemoryIndex};
    use crate::numeric::PrefixCoded;

    fn doc(number: u64) -> DocumentMatch {
        DocumentMatch::new(number, 1.0)
    }

    fn distance_filter(index: &MemoryIndex, lon: f64, lat: f64, dist: f64) -> FilterFn {
        let reader = index.document_value_reader(&["location"]).unwrap();
        build_distance_filter(reader, lon, lat, dist)
    }

    #[test]
    fn test_distance_filter_is_existential() {
        let mut index = MemoryIndex::new();
        // one point in range, one far away
        index.add_geo_point(0, "location", 2.35, 48.85).unwrap();
        index.add_geo_point(0, "location", 139.69, 35.68).unwrap();
        // only far away points
        index.add_geo_point(1, "location", -74.0, 40.7).unwrap();
        index.add_geo_point(1, "location", 139.69, 35.68).unwrap();

        let filter = distance_filter(&index, 2.3522, 48.8566, 10_000.0);
        assert!(filter(&doc(0)));
        assert!(!filter(&doc(1)));
        // no stored values at all
        assert!(!filter(&doc(2)));
    }

    #[test]
    fn test_distance_filter_radius_is_inclusive_meters() {
        let mut index = MemoryIndex::new();
        index.add_geo_point(0, "location", 1.0, 0.0).unwrap();

        let actual_km = haversin(
            morton_unhash_lon(morton_hash(1.0, 0.0)),
            morton_unhash_lat(morton_hash(1.0, 0.0)),
            0.0,
            0.0,
        );
        assert!(distance_filter(&index, 0.0, 0.0, actual_km * 1000.0 + 1e-6)(&doc(0)));
        assert!(!distance_filter(&index, 0.0, 0.0, actual_km * 1000.0 - 1.0)(&doc(0)));
        assert!(distance_filter(&index, 0.0, 0.0, 112_000.0)(&doc(0)));
        assert!(!distance_filter(&index, 0.0, 0.0, 110_000.0)(&doc(0)));
    }

    #[test]
    fn test_coarse_terms_never_decoded() {
        let mut index = MemoryIndex::new();
        // a shift-9 term whose value would decode to the query center
        let coarse = PrefixCoded::from_i64(morton_hash(0.0, 0.0) as i64, 9).unwrap();
        index.add_stored_term(0, "location", coarse.into_bytes());
        // a garbage term with a non-zero shift header
        index.add_stored_term(0, "location", vec![0x20 + 5, 0xff]);
        let filter = distance_filter(&index, 0.0, 0.0, 1_000_000.0);
        assert!(!filter(&doc(0)));

        // adding a far shift-0 point does not change the outcome
        index.add_geo_point(0, "location", 90.0, 45.0).unwrap();
        let filter = distance_filter(&index, 0.0, 0.0, 1_000_000.0);
        assert!(!filter(&doc(0)));
    }

    #[test]
    fn test_malformed_full_precision_term_is_skipped() {
        let mut index = MemoryIndex::new();
        index.add_stored_term(0, "location", vec![0x20, 0x01]);
        index.add_geo_point(0, "location", 0.001, 0.001).unwrap();
        assert!(distance_filter(&index, 0.0, 0.0, 1_000.0)(&doc(0)));
    }

    /// Fails outright for doc 0 and midway through the values of other docs.
    #[derive(Debug)]
    struct BrokenValues {
        term: Vec<u8>,
    }

    impl DocumentValueReader for BrokenValues {
        fn document_values(&self, doc_id: u64) -> Result<DocumentValues<'_>> {
            if doc_id == 0 {
                return Err(GeoSearchError::index_access("values unavailable"));
            }
            let values: Vec<Result<(&str, &[u8])>> = vec![
                Ok(("location", self.term.as_slice())),
                Err(GeoSearchError::index_access("truncated")),
            ];
            Ok(Box::new(values.into_iter()))
        }
    }

    #[test]
    fn test_visitation_error_rejects_document() {
        let term = PrefixCoded::from_i64(morton_hash(0.0, 0.0) as i64, 0).unwrap();
        let reader = Arc::new(BrokenValues {
            term: term.into_bytes(),
        });
        let filter = build_distance_filter(reader, 0.0, 0.0, 1_000.0);
        assert!(!filter(&doc(0)));
        // the point decoded before the failure is discarded too
        assert!(!filter(&doc(1)));
    }

    #[test]
    fn test_rect_filter() {
        let mut index = MemoryIndex::new();
        index.add_geo_point(0, "location", 10.0, 10.0).unwrap();
        index.add_geo_point(1, "location", 20.0, 10.0).unwrap();
        let reader = index.document_value_reader(&["location"]).unwrap();

        let filter = build_rect_filter(reader, 5.0, 5.0, 15.0, 15.0);
        assert!(filter(&doc(0)));
        assert!(!filter(&doc(1)));
    }

    #[test]
    fn test_filter_is_shareable_across_threads() {
        use rayon::prelude::*;

        let mut index = MemoryIndex::new();
        for i in 0..100u64 {
            index.add_geo_point(i, "location", i as f64 * 0.01, 0.0).unwrap();
        }
        let filter = distance_filter(&index, 0.0, 0.0, 5_000.0);

        let accepted: Vec<u64> = (0..100u64)
            .into_par_iter()
            .filter(|&i| filter(&doc(i)))
            .collect();
        // 0.01 degrees of longitude is about 1.11 km at the equator
        assert_eq!(accepted, (0..5).collect::<Vec<_>>());
    }
}
