//! Command implementations for the geosearch CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use ahash::AHashMap;
use log::{debug, info};
use serde::Deserialize;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{GeoSearchError, Result};
use crate::geo::{BoundingBox, GeoPoint, haversin};
use crate::index::{IndexReader, MemoryIndex};
use crate::query::{GeoBoundingBoxQuery, GeoDistanceQuery, Query};
use crate::search::geo_filter::full_precision_points;
use crate::search::{SearcherOptions, TopDocsCollector, collect_all};

/// One line of a points file.
///
/// Either `lon`/`lat` or `points` (a list of `[lon, lat]` pairs) must be
/// given. Without an `id` the zero-based line number is used.
#[derive(Debug, Deserialize)]
struct PointRecord {
    id: Option<u64>,
    name: Option<String>,
    lon: Option<f64>,
    lat: Option<f64>,
    #[serde(default)]
    points: Vec<[f64; 2]>,
}

/// Documents loaded from a points file.
#[derive(Debug)]
pub struct LoadedPoints {
    pub index: MemoryIndex,
    pub names: AHashMap<u64, String>,
}

/// Execute a CLI command.
pub fn execute_command(args: GeoSearchArgs) -> Result<()> {
    let results = match &args.command {
        Command::Search(search_args) => run_distance_search(search_args)?,
        Command::BoundingBox(bbox_args) => run_bounding_box_search(bbox_args)?,
    };
    output_results(&results, &args)
}

/// Load a JSONL points file into an in-memory index encoding points with
/// `precision_step`.
pub fn load_points(path: &Path, field: &str, precision_step: u32) -> Result<LoadedPoints> {
    let mut index = MemoryIndex::with_precision_step(precision_step)?;
    let reader = BufReader::new(File::open(path)?);
    let mut names = AHashMap::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: PointRecord = serde_json::from_str(&line).map_err(|e| {
            GeoSearchError::parse(format!("{}:{}: {e}", path.display(), line_no + 1))
        })?;

        let doc_id = record.id.unwrap_or(line_no as u64);
        let mut coordinates = record.points;
        match (record.lon, record.lat) {
            (Some(lon), Some(lat)) => coordinates.push([lon, lat]),
            (None, None) => {}
            _ => {
                return Err(GeoSearchError::parse(format!(
                    "{}:{}: lon and lat must be given together",
                    path.display(),
                    line_no + 1
                )));
            }
        }
        if coordinates.is_empty() {
            return Err(GeoSearchError::parse(format!(
                "{}:{}: record has no coordinates",
                path.display(),
                line_no + 1
            )));
        }

        for [lon, lat] in coordinates {
            index.add_geo_point(doc_id, field, lon, lat)?;
        }
        if let Some(name) = record.name {
            names.insert(doc_id, name);
        }
    }

    info!(
        "loaded {} documents from {}",
        index.doc_count(),
        path.display()
    );
    Ok(LoadedPoints { index, names })
}

fn searcher_options(args: &IndexArgs) -> SearcherOptions {
    SearcherOptions::default().with_max_clause_count(args.max_clauses)
}

/// Run a distance search.
pub fn run_distance_search(args: &SearchArgs) -> Result<SearchResults> {
    let loaded = load_points(&args.index.points, &args.index.field, args.index.precision_step)?;
    let center = GeoPoint::new(args.lon, args.lat)?;
    let query = GeoDistanceQuery::from_distance_str(&args.index.field, center, &args.distance)?
        .with_precision_step(loaded.index.precision_step());

    let mut results = execute_query(&query, &loaded, &args.index)?;

    let dv_reader = loaded.index.document_value_reader(&[args.index.field.as_str()])?;
    for hit in results.hits.iter_mut() {
        hit.distance_meters = full_precision_points(dv_reader.as_ref(), hit.doc_id).and_then(
            |points| {
                points
                    .iter()
                    .map(|&(lon, lat)| haversin(lon, lat, center.lon, center.lat) * 1000.0)
                    .min_by(f64::total_cmp)
            },
        );
    }
    // equal scores: nearest first
    results.hits.sort_by(|a, b| {
        b.score.total_cmp(&a.score).then_with(|| {
            a.distance_meters
                .unwrap_or(f64::MAX)
                .total_cmp(&b.distance_meters.unwrap_or(f64::MAX))
        })
    });
    results.hits.truncate(args.index.limit);
    Ok(results)
}

/// Run a bounding box search.
pub fn run_bounding_box_search(args: &BoundingBoxArgs) -> Result<SearchResults> {
    let loaded = load_points(&args.index.points, &args.index.field, args.index.precision_step)?;
    let bbox = BoundingBox::new(
        args.top_left_lon,
        args.top_left_lat,
        args.bottom_right_lon,
        args.bottom_right_lat,
    );
    let query = GeoBoundingBoxQuery::new(&args.index.field, bbox)
        .with_precision_step(loaded.index.precision_step());
    let mut results = execute_query(&query, &loaded, &args.index)?;
    results.hits.truncate(args.index.limit);
    Ok(results)
}

fn execute_query(
    query: &dyn Query,
    loaded: &LoadedPoints,
    args: &IndexArgs,
) -> Result<SearchResults> {
    debug!("executing {}", query.description());
    let start = Instant::now();

    let mut searcher = query.searcher(&loaded.index, &searcher_options(args))?;
    // keep every hit; callers order and truncate
    let mut collector = TopDocsCollector::new(loaded.index.doc_count() as usize);
    collect_all(searcher.as_mut(), &mut collector)?;
    let top = collector.top_docs();

    let duration_ms = start.elapsed().as_millis() as u64;
    info!("{} hits in {duration_ms} ms", top.total_hits);

    Ok(SearchResults {
        query: query.description(),
        hits: top
            .hits
            .into_iter()
            .map(|hit| ResultHit {
                doc_id: hit.doc_id,
                score: hit.score,
                name: loaded.names.get(&hit.doc_id).cloned(),
                distance_meters: None,
            })
            .collect(),
        total_hits: top.total_hits,
        indexed_documents: loaded.index.doc_count(),
        duration_ms,
    })
}
