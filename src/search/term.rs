//! Searcher over the postings of a single term.

use std::sync::Arc;

use crate::error::Result;
use crate::index::PostingIterator;
use crate::search::options::SearcherOptions;
use crate::search::scoring::{Scorer, ScoringParams};
use crate::search::searcher::{DocumentMatch, Searcher};

/// A searcher based on a posting iterator.
#[derive(Debug)]
pub struct TermSearcher {
    postings: Box<dyn PostingIterator>,
    scorer: Arc<dyn Scorer>,
    boost: f64,
    scoring_enabled: bool,
    started: bool,
    exhausted: bool,
}

impl TermSearcher {
    /// Create a new term searcher.
    pub fn new(
        postings: Box<dyn PostingIterator>,
        scoring: &ScoringParams,
        options: &SearcherOptions,
    ) -> Self {
        TermSearcher {
            postings,
            scorer: Arc::clone(&scoring.scorer),
            boost: scoring.boost,
            scoring_enabled: options.scoring_enabled(),
            started: false,
            exhausted: false,
        }
    }

    fn current_match(&self) -> DocumentMatch {
        let score = if self.scoring_enabled {
            self.scorer.score(self.postings.term_freq()) * self.boost
        } else {
            0.0
        };
        DocumentMatch::new(self.postings.doc_id(), score)
    }

    fn settle(&mut self, found: bool) -> Option<DocumentMatch> {
        if found {
            Some(self.current_match())
        } else {
            self.exhausted = true;
            None
        }
    }
}

impl Searcher for TermSearcher {
    fn next(&mut self) -> Result<Option<DocumentMatch>> {
        if self.exhausted {
            return Ok(None);
        }
        self.started = true;
        let found = self.postings.next()?;
        Ok(self.settle(found))
    }

    fn skip_to(&mut self, target: u64) -> Result<Option<DocumentMatch>> {
        if self.exhausted {
            return Ok(None);
        }
        // the current document was already returned
        let target = if self.started {
            target.max(self.postings.doc_id().saturating_add(1))
        } else {
            target
        };
        self.started = true;
        let found = self.postings.skip_to(target)?;
        Ok(self.settle(found))
    }

    fn cost(&self) -> u64 {
        self.postings.cost()
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn close(&mut self) -> Result<()> {
        self.postings.close()
    }
}
