//! Searcher that re-checks each candidate against a predicate.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::search::searcher::{DocumentMatch, Searcher};

/// Predicate deciding whether a candidate is a real match.
pub type FilterFn = Arc<dyn Fn(&DocumentMatch) -> bool + Send + Sync>;

/// Wraps a searcher and drops the candidates rejected by a filter.
pub struct FilteringSearcher {
    child: Box<dyn Searcher>,
    filter: FilterFn,
}

impl FilteringSearcher {
    pub fn new(child: Box<dyn Searcher>, filter: FilterFn) -> Self {
        FilteringSearcher { child, filter }
    }

    fn accept(&self, candidate: Option<DocumentMatch>) -> Option<Option<DocumentMatch>> {
        match candidate {
            Some(m) if (self.filter)(&m) => Some(Some(m)),
            Some(_) => None,
            None => Some(None),
        }
    }
}

impl fmt::Debug for FilteringSearcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteringSearcher")
            .field("child", &self.child)
            .finish_non_exhaustive()
    }
}

impl Searcher for FilteringSearcher {
    fn next(&mut self) -> Result<Option<DocumentMatch>> {
        loop {
            let candidate = self.child.next()?;
            if let Some(outcome) = self.accept(candidate) {
                return Ok(outcome);
            }
        }
    }

    fn skip_to(&mut self, target: u64) -> Result<Option<DocumentMatch>> {
        let candidate = self.child.skip_to(target)?;
        match self.accept(candidate) {
            Some(outcome) => Ok(outcome),
            None => self.next(),
        }
    }

    fn cost(&self) -> u64 {
        self.child.cost()
    }

    fn is_exhausted(&self) -> bool {
        self.child.is_exhausted()
    }

    fn close(&mut self) -> Result<()> {
        self.child.close()
    }
}
