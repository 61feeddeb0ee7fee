//! Integration tests for distance and bounding box search

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sarissa_geo::geo::{
    haversin, morton_hash, morton_unhash_lat, morton_unhash_lon, rect_from_point_distance,
};
use sarissa_geo::numeric::PrefixCoded;
use sarissa_geo::prelude::*;
use sarissa_geo::search::GEO_PRECISION_STEP;

fn search_docs(index: &MemoryIndex, query: &dyn Query) -> Result<Vec<u64>> {
    let mut searcher = query.searcher(index, &SearcherOptions::default())?;
    let mut docs = Vec::new();
    while let Some(m) = searcher.next()? {
        docs.push(m.number);
    }
    searcher.close()?;
    Ok(docs)
}

fn distance_query(lon: f64, lat: f64, meters: f64) -> GeoDistanceQuery {
    GeoDistanceQuery::new("location", GeoPoint::new(lon, lat).unwrap(), meters)
}

#[test]
fn test_dateline_example() -> Result<()> {
    let bbox = rect_from_point_distance(179.9, 0.0, 50_000.0)?;
    assert!(bbox.crosses_dateline());
    let (left, right) = bbox.split_at_dateline().unwrap();
    assert_eq!(left.min_lon(), -180.0);
    assert_eq!(right.max_lon(), 180.0);

    let mut index = MemoryIndex::new();
    index.add_geo_point(0, "location", -179.95, 0.0)?;
    assert_eq!(search_docs(&index, &distance_query(179.9, 0.0, 50_000.0))?, vec![0]);
    Ok(())
}

#[test]
fn test_rect_always_contains_center() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let lon = rng.random_range(-180.0..=180.0);
        let lat = rng.random_range(-90.0..=90.0);
        let dist = rng.random_range(0.0..5_000_000.0);
        let bbox = rect_from_point_distance(lon, lat, dist)?;
        assert!(bbox.contains(lon, lat), "({lon}, {lat}) r={dist} -> {bbox:?}");
    }
    Ok(())
}

#[test]
fn test_dateline_split_covers_wrapped_box() -> Result<()> {
    let bbox = rect_from_point_distance(-179.5, 30.0, 200_000.0)?;
    assert!(bbox.crosses_dateline());
    let (left, right) = bbox.split_at_dateline().unwrap();

    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..2000 {
        let lon = rng.random_range(-180.0..=180.0);
        let lat = rng.random_range(bbox.min_lat()..=bbox.max_lat());
        let in_left = left.contains(lon, lat);
        let in_right = right.contains(lon, lat);
        assert_eq!(bbox.contains(lon, lat), in_left || in_right);
        assert!(!(in_left && in_right));
    }
    Ok(())
}

#[test]
fn test_document_with_any_point_in_range_matches() -> Result<()> {
    let mut index = MemoryIndex::new();
    // Paris and Tokyo
    index.add_geo_point(0, "location", 2.3522, 48.8566)?;
    index.add_geo_point(0, "location", 139.6917, 35.6895)?;
    // New York and Tokyo
    index.add_geo_point(1, "location", -74.006, 40.7128)?;
    index.add_geo_point(1, "location", 139.6917, 35.6895)?;

    let near_paris = distance_query(2.35, 48.85, 10_000.0);
    assert_eq!(search_docs(&index, &near_paris)?, vec![0]);

    let near_tokyo = distance_query(139.7, 35.7, 10_000.0);
    assert_eq!(search_docs(&index, &near_tokyo)?, vec![0, 1]);
    Ok(())
}

#[test]
fn test_coarse_terms_alone_never_match() -> Result<()> {
    let mut index = MemoryIndex::new();
    let hash = morton_hash(10.0, 10.0) as i64;
    // every precision except full precision
    let mut shift = GEO_PRECISION_STEP;
    while shift <= 63 {
        index.add_term(0, "location", PrefixCoded::from_i64(hash, shift)?.into_bytes());
        shift += GEO_PRECISION_STEP;
    }
    index.add_geo_point(1, "location", 10.0, 10.0)?;

    assert_eq!(search_docs(&index, &distance_query(10.0, 10.0, 1_000.0))?, vec![1]);
    Ok(())
}

#[test]
fn test_distance_search_matches_linear_scan() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut index = MemoryIndex::new();
    let mut points = Vec::new();
    for doc in 0..3000u64 {
        let lon = rng.random_range(-180.0..=180.0);
        let lat = rng.random_range(-90.0..=90.0);
        index.add_geo_point(doc, "location", lon, lat)?;
        let hash = morton_hash(lon, lat);
        points.push((doc, morton_unhash_lon(hash), morton_unhash_lat(hash)));
    }

    let centers = [
        (0.0, 0.0, 1_500_000.0),
        (179.5, 10.0, 2_000_000.0),
        (-179.9, -45.0, 800_000.0),
        (20.0, 89.0, 1_000_000.0),
        (-60.0, -88.5, 900_000.0),
    ];
    for (lon, lat, meters) in centers {
        let found = search_docs(&index, &distance_query(lon, lat, meters))?;
        let expected: Vec<u64> = points
            .iter()
            .filter(|&&(_, plon, plat)| haversin(plon, plat, lon, lat) <= meters / 1000.0)
            .map(|&(doc, _, _)| doc)
            .collect();
        assert!(!expected.is_empty(), "no points near ({lon}, {lat})");
        assert_eq!(found, expected, "center ({lon}, {lat}) radius {meters}");
    }
    Ok(())
}

#[test]
fn test_bounding_box_matches_linear_scan() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(3);
    let mut index = MemoryIndex::new();
    let mut points = Vec::new();
    for doc in 0..2000u64 {
        let lon = rng.random_range(-180.0..=180.0);
        let lat = rng.random_range(-90.0..=90.0);
        index.add_geo_point(doc, "location", lon, lat)?;
        let hash = morton_hash(lon, lat);
        points.push((doc, morton_unhash_lon(hash), morton_unhash_lat(hash)));
    }

    let boxes = [
        BoundingBox::new(-30.0, 40.0, 25.0, -12.5),
        // wraps the dateline
        BoundingBox::new(150.0, 60.0, -140.0, 5.0),
    ];
    for bbox in boxes {
        let found = search_docs(&index, &GeoBoundingBoxQuery::new("location", bbox))?;
        let expected: Vec<u64> = points
            .iter()
            .filter(|&&(_, lon, lat)| bbox.contains(lon, lat))
            .map(|&(doc, _, _)| doc)
            .collect();
        assert!(!expected.is_empty());
        assert_eq!(found, expected, "{bbox:?}");
    }
    Ok(())
}

#[test]
fn test_unscored_search() -> Result<()> {
    let mut index = MemoryIndex::new();
    index.add_geo_point(0, "location", 1.0, 1.0)?;

    let query = distance_query(1.0, 1.0, 100.0).with_boost(3.0);
    let options = SearcherOptions::default().with_score_mode(ScoreMode::None);
    let mut searcher = query.searcher(&index, &options)?;
    let m = searcher.next()?.unwrap();
    assert_eq!((m.number, m.score), (0, 0.0));
    searcher.close()?;

    let mut searcher = query.searcher(&index, &SearcherOptions::default())?;
    assert_eq!(searcher.next()?.unwrap().score, 3.0);
    searcher.close()?;
    Ok(())
}
