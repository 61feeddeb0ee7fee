//! Collector implementations for gathering search results.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::search::searcher::Searcher;

/// A single ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Document ID.
    pub doc_id: u64,
    /// Relevance score.
    pub score: f64,
}

/// Ranked hits together with the number of matching documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopDocs {
    /// Total number of matching documents, including those not kept.
    pub total_hits: u64,
    /// The best hits, highest score first.
    pub hits: Vec<SearchHit>,
}

/// Trait for collecting search results.
pub trait Collector: Send + Debug {
    /// Collect a document hit.
    fn collect(&mut self, doc_id: u64, score: f64) -> Result<()>;

    /// Get the total number of hits collected.
    fn total_hits(&self) -> u64;

    /// Reset the collector for a new search.
    fn reset(&mut self);
}

/// A collector that keeps the top N documents by score.
#[derive(Debug)]
pub struct TopDocsCollector {
    /// Maximum number of documents to collect.
    max_docs: usize,
    /// Collected hits, worst hit on top.
    hits: BinaryHeap<ScoredDoc>,
    /// Total number of documents processed.
    total_hits: u64,
}

/// A scored document for use in the heap.
#[derive(Debug, Clone)]
struct ScoredDoc {
    doc_id: u64,
    score: f64,
}

impl PartialEq for ScoredDoc {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredDoc {}

impl PartialOrd for ScoredDoc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredDoc {
    fn cmp(&self, other: &Self) -> Ordering {
        // Worse hits are greater: lower score, then higher doc ID
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

impl TopDocsCollector {
    /// Create a new top docs collector.
    pub fn new(max_docs: usize) -> Self {
        TopDocsCollector {
            max_docs,
            hits: BinaryHeap::new(),
            total_hits: 0,
        }
    }

    /// Get the maximum number of documents to collect.
    pub fn max_docs(&self) -> usize {
        self.max_docs
    }

    /// Get the collected hits, best first.
    pub fn top_docs(&self) -> TopDocs {
        let mut hits = self.hits.clone().into_sorted_vec();
        hits.truncate(self.max_docs);
        TopDocs {
            total_hits: self.total_hits,
            hits: hits
                .into_iter()
                .map(|doc| SearchHit {
                    doc_id: doc.doc_id,
                    score: doc.score,
                })
                .collect(),
        }
    }
}

impl Collector for TopDocsCollector {
    fn collect(&mut self, doc_id: u64, score: f64) -> Result<()> {
        self.total_hits += 1;

        let scored_doc = ScoredDoc { doc_id, score };

        if self.hits.len() < self.max_docs {
            self.hits.push(scored_doc);
        } else if let Some(mut worst) = self.hits.peek_mut() {
            if scored_doc < *worst {
                *worst = scored_doc;
            }
        }

        Ok(())
    }

    fn total_hits(&self) -> u64 {
        self.total_hits
    }

    fn reset(&mut self) {
        self.hits.clear();
        self.total_hits = 0;
    }
}

/// Feed every match of `searcher` to `collector`, then close the searcher.
///
/// The searcher is closed even when iteration fails; the iteration error
/// takes precedence over a close error.
pub fn collect_all(searcher: &mut dyn Searcher, collector: &mut dyn Collector) -> Result<()> {
    let drained = drive(searcher, collector);
    let closed = searcher.close();
    match (drained, closed) {
        (Err(e), Err(close_err)) => {
            warn!("failed to close searcher after search error: {close_err}");
            Err(e)
        }
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Ok(()), Ok(())) => Ok(()),
    }
}

fn drive(searcher: &mut dyn Searcher, collector: &mut dyn Collector) -> Result<()> {
    while let Some(m) = searcher.next()? {
        collector.collect(m.number, m.score)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering as AtomicOrdering;

    use super::*;
    use crate::error::GeoSearchError;
    use crate::search::searcher::DocumentMatch;
    use crate::search::searcher::testing::StaticSearcher;

    #[test]
    fn test_top_docs_collector() {
        let mut collector = TopDocsCollector::new(3);

        collector.collect(1, 0.5).unwrap();
        collector.collect(2, 0.8).unwrap();
        collector.collect(3, 0.3).unwrap();
        collector.collect(4, 0.9).unwrap();
        collector.collect(5, 0.1).unwrap();

        let top = collector.top_docs();
        assert_eq!(top.total_hits, 5);
        let ids: Vec<u64> = top.hits.iter().map(|h| h.doc_id).collect();
        assert_eq!(ids, vec![4, 2, 1]);
    }

    #[test]
    fn test_ties_prefer_lower_doc_ids() {
        let mut collector = TopDocsCollector::new(2);
        for doc_id in [7, 3, 9, 1] {
            collector.collect(doc_id, 1.0).unwrap();
        }

        let ids: Vec<u64> = collector.top_docs().hits.iter().map(|h| h.doc_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_zero_limit_counts_only() {
        let mut collector = TopDocsCollector::new(0);
        collector.collect(1, 1.0).unwrap();
        let top = collector.top_docs();
        assert_eq!(top.total_hits, 1);
        assert!(top.hits.is_empty());

        collector.reset();
        assert_eq!(collector.total_hits(), 0);
    }

    #[test]
    fn test_collect_all_closes_searcher() {
        let (mut searcher, closes) = StaticSearcher::new(&[(1, 1.0), (4, 2.0)]);
        let mut collector = TopDocsCollector::new(10);

        collect_all(&mut searcher, &mut collector).unwrap();
        assert_eq!(closes.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(
            collector.top_docs().hits,
            vec![
                SearchHit {
                    doc_id: 4,
                    score: 2.0
                },
                SearchHit {
                    doc_id: 1,
                    score: 1.0
                },
            ]
        );
    }

    #[derive(Debug)]
    struct FailingSearcher {
        closed: bool,
    }

    impl Searcher for FailingSearcher {
        fn next(&mut self) -> Result<Option<DocumentMatch>> {
            Err(GeoSearchError::index_access("postings truncated"))
        }

        fn skip_to(&mut self, _target: u64) -> Result<Option<DocumentMatch>> {
            self.next()
        }

        fn cost(&self) -> u64 {
            1
        }

        fn is_exhausted(&self) -> bool {
            false
        }

        fn close(&mut self) -> Result<()> {
            self.closed = true;
            Err(GeoSearchError::other("close failed"))
        }
    }

    #[test]
    fn test_collect_all_keeps_iteration_error() {
        let mut searcher = FailingSearcher { closed: false };
        let mut collector = TopDocsCollector::new(10);

        let err = collect_all(&mut searcher, &mut collector).unwrap_err();
        assert!(err.is_index_access());
        assert!(searcher.closed);
    }
}
