//! In-memory index reader holding pre-encoded terms.
//!
//! `MemoryIndex` backs tests, benchmarks and the CLI. Geo points are stored the
//! way a geopoint field is indexed: one prefix-coded Morton term per precision
//! step, each both searchable and replayable through the document value reader.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use ahash::AHashMap;

use crate::error::{GeoSearchError, Result};
use crate::geo::{GeoPoint, morton_hash};
use crate::index::{DocumentValueReader, DocumentValues, IndexReader, PostingIterator};
use crate::numeric::{MAX_SHIFT, PrefixCoded};
use crate::search::GEO_PRECISION_STEP;
use crate::search::geo_bbox::MAX_GEO_PRECISION_STEP;

type TermPostings = BTreeMap<Vec<u8>, BTreeMap<u64, u64>>;

/// Stored `(field, term)` pairs per document.
#[derive(Debug, Clone, Default)]
struct StoredValues {
    docs: AHashMap<u64, Vec<(String, Vec<u8>)>>,
}

/// An in-memory inverted index over encoded terms.
#[derive(Debug, Clone)]
pub struct MemoryIndex {
    precision_step: u32,
    fields: AHashMap<String, TermPostings>,
    stored: Arc<StoredValues>,
    doc_ids: BTreeSet<u64>,
}

impl Default for MemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryIndex {
    /// Create an empty index using the default geo precision step.
    pub fn new() -> Self {
        MemoryIndex {
            precision_step: GEO_PRECISION_STEP,
            fields: AHashMap::new(),
            stored: Arc::new(StoredValues::default()),
            doc_ids: BTreeSet::new(),
        }
    }

    /// Create an empty index that encodes geo points with `precision_step`.
    pub fn with_precision_step(precision_step: u32) -> Result<Self> {
        if precision_step == 0 || precision_step > MAX_GEO_PRECISION_STEP {
            return Err(GeoSearchError::invalid_argument(format!(
                "precision step must be between 1 and {MAX_GEO_PRECISION_STEP}, got {precision_step}"
            )));
        }
        Ok(MemoryIndex {
            precision_step,
            ..Self::new()
        })
    }

    /// Get the precision step used for geo points.
    pub fn precision_step(&self) -> u32 {
        self.precision_step
    }

    /// Index a geo point for a document. Documents may hold several points
    /// in the same field.
    pub fn add_geo_point(&mut self, doc_id: u64, field: &str, lon: f64, lat: f64) -> Result<()> {
        let point = GeoPoint::new(lon, lat)?;
        let hash = morton_hash(point.lon, point.lat) as i64;

        let mut shift = 0;
        while shift <= MAX_SHIFT {
            let term = PrefixCoded::from_i64(hash, shift)?;
            self.add_term(doc_id, field, term.into_bytes());
            shift += self.precision_step;
        }
        Ok(())
    }

    /// Add a searchable term that is also stored for the document.
    pub fn add_term(&mut self, doc_id: u64, field: &str, term: Vec<u8>) {
        *self
            .fields
            .entry(field.to_string())
            .or_default()
            .entry(term.clone())
            .or_default()
            .entry(doc_id)
            .or_insert(0) += 1;
        self.add_stored_term(doc_id, field, term);
    }

    /// Store a term for the document without making it searchable.
    pub fn add_stored_term(&mut self, doc_id: u64, field: &str, term: Vec<u8>) {
        Arc::make_mut(&mut self.stored)
            .docs
            .entry(doc_id)
            .or_default()
            .push((field.to_string(), term));
        self.doc_ids.insert(doc_id);
    }

    /// Number of distinct terms indexed for a field.
    pub fn term_count(&self, field: &str) -> usize {
        self.fields.get(field).map(|terms| terms.len()).unwrap_or(0)
    }
}

impl IndexReader for MemoryIndex {
    fn doc_count(&self) -> u64 {
        self.doc_ids.len() as u64
    }

    fn postings(&self, field: &str, term: &[u8]) -> Result<Option<Box<dyn PostingIterator>>> {
        let postings = self
            .fields
            .get(field)
            .and_then(|terms| terms.get(term))
            .map(|docs| docs.iter().map(|(&doc, &freq)| (doc, freq)).collect::<Vec<_>>());

        Ok(postings.map(|postings| {
            Box::new(MemoryPostingIterator::new(postings)) as Box<dyn PostingIterator>
        }))
    }

    fn document_value_reader(&self, fields: &[&str]) -> Result<Arc<dyn DocumentValueReader>> {
        Ok(Arc::new(MemoryDocumentValueReader {
            stored: Arc::clone(&self.stored),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }))
    }
}

/// Posting iterator over an in-memory posting list.
#[derive(Debug)]
pub struct MemoryPostingIterator {
    postings: Vec<(u64, u64)>,
    position: Option<usize>,
}

impl MemoryPostingIterator {
    /// Create an iterator over `(doc_id, term_freq)` pairs sorted by doc ID.
    pub fn new(postings: Vec<(u64, u64)>) -> Self {
        MemoryPostingIterator {
            postings,
            position: None,
        }
    }
}

impl PostingIterator for MemoryPostingIterator {
    fn doc_id(&self) -> u64 {
        match self.position {
            Some(pos) if pos < self.postings.len() => self.postings[pos].0,
            _ => u64::MAX,
        }
    }

    fn term_freq(&self) -> u64 {
        match self.position {
            Some(pos) if pos < self.postings.len() => self.postings[pos].1,
            _ => 0,
        }
    }

    fn next(&mut self) -> Result<bool> {
        let pos = self.position.map_or(0, |pos| pos + 1).min(self.postings.len());
        self.position = Some(pos);
        Ok(pos < self.postings.len())
    }

    fn skip_to(&mut self, target: u64) -> Result<bool> {
        if let Some(pos) = self.position {
            if pos >= self.postings.len() {
                return Ok(false);
            }
            if self.postings[pos].0 >= target {
                return Ok(true);
            }
        }

        let start = self.position.unwrap_or(0);
        let pos = start + self.postings[start..].partition_point(|&(doc, _)| doc < target);
        self.position = Some(pos);
        Ok(pos < self.postings.len())
    }

    fn cost(&self) -> u64 {
        self.postings.len() as u64
    }
}

/// Document value reader over the stored terms of a `MemoryIndex`.
#[derive(Debug)]
pub struct MemoryDocumentValueReader {
    stored: Arc<StoredValues>,
    fields: Vec<String>,
}

impl DocumentValueReader for MemoryDocumentValueReader {
    fn document_values(&self, doc_id: u64) -> Result<DocumentValues<'_>> {
        let values = self.stored.docs.get(&doc_id).map(Vec::as_slice).unwrap_or(&[]);
        Ok(Box::new(
            values
                .iter()
                .filter(|(field, _)| self.fields.iter().any(|f| f == field))
                .map(|(field, term)| Ok::<_, GeoSearchError>((field.as_str(), term.as_slice()))),
        ))
    }
}
