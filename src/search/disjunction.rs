//! Disjunction (OR) of several searchers.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use crate::error::Result;
use crate::search::options::SearcherOptions;
use crate::search::scoring::CompositeScorer;
use crate::search::searcher::{DocumentMatch, OpenedSearchers, Searcher, close_all};

/// A helper struct for tracking searchers in the disjunction heap.
#[derive(Debug)]
struct SearcherEntry {
    /// Match produced by `searcher` and not yet consumed by the disjunction.
    current: DocumentMatch,
    searcher: Box<dyn Searcher>,
}

impl PartialEq for SearcherEntry {
    fn eq(&self, other: &Self) -> bool {
        self.current.number == other.current.number
    }
}

impl Eq for SearcherEntry {}

impl PartialOrd for SearcherEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearcherEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: lower doc numbers come first
        other.current.number.cmp(&self.current.number)
    }
}

/// A searcher matching documents produced by at least `min` of its children,
/// scored by combining the children's scores.
#[derive(Debug)]
pub struct DisjunctionSearcher {
    /// Children positioned on a pending match, ordered by doc number.
    heap: BinaryHeap<SearcherEntry>,
    /// Children not advanced yet.
    unstarted: Vec<Box<dyn Searcher>>,
    /// Children with no more matches, kept until `close`.
    finished: Vec<Box<dyn Searcher>>,
    min: usize,
    composite: Arc<dyn CompositeScorer>,
    scoring_enabled: bool,
    cost: u64,
    exhausted: bool,
}

impl DisjunctionSearcher {
    /// Combine the searchers registered in `opened`.
    ///
    /// If the disjunction cannot be built, every searcher in `opened` is
    /// closed before the error is returned.
    pub fn new(
        opened: OpenedSearchers,
        min: usize,
        options: &SearcherOptions,
        composite: Arc<dyn CompositeScorer>,
    ) -> Result<Self> {
        options.check_clause_count(opened.len())?;

        let unstarted = opened.into_inner();
        let cost = unstarted.iter().map(|s| s.cost()).sum();

        Ok(DisjunctionSearcher {
            heap: BinaryHeap::new(),
            unstarted,
            finished: Vec::new(),
            min,
            composite,
            scoring_enabled: options.scoring_enabled(),
            cost,
            exhausted: false,
        })
    }

    /// Put a child back according to the outcome of advancing it.
    fn place(
        &mut self,
        searcher: Box<dyn Searcher>,
        advanced: Result<Option<DocumentMatch>>,
    ) -> Result<()> {
        match advanced {
            Ok(Some(current)) => {
                self.heap.push(SearcherEntry { current, searcher });
                Ok(())
            }
            Ok(None) => {
                self.finished.push(searcher);
                Ok(())
            }
            Err(e) => {
                self.finished.push(searcher);
                Err(e)
            }
        }
    }

    /// Advance children that have not produced a match yet.
    fn start_children(&mut self, target: Option<u64>) -> Result<()> {
        while let Some(mut searcher) = self.unstarted.pop() {
            let advanced = match target {
                Some(target) => searcher.skip_to(target),
                None => searcher.next(),
            };
            self.place(searcher, advanced)?;
        }
        Ok(())
    }

    /// Consume the smallest pending document from every child positioned on
    /// it and produce the combined match.
    fn gather(&mut self) -> Result<Option<DocumentMatch>> {
        loop {
            let number = match self.heap.peek() {
                Some(entry) => entry.current.number,
                None => {
                    self.exhausted = true;
                    return Ok(None);
                }
            };

            let mut constituents = Vec::new();
            while self
                .heap
                .peek()
                .is_some_and(|entry| entry.current.number == number)
            {
                let Some(SearcherEntry {
                    current,
                    mut searcher,
                }) = self.heap.pop()
                else {
                    break;
                };
                constituents.push(current.score);
                let advanced = searcher.next();
                self.place(searcher, advanced)?;
            }

            if constituents.len() < self.min {
                continue;
            }

            let score = if self.scoring_enabled {
                self.composite.score_composite(&constituents)
            } else {
                0.0
            };
            return Ok(Some(DocumentMatch::new(number, score)));
        }
    }
}

impl Searcher for DisjunctionSearcher {
    fn next(&mut self) -> Result<Option<DocumentMatch>> {
        if self.exhausted {
            return Ok(None);
        }
        self.start_children(None)?;
        self.gather()
    }

    fn skip_to(&mut self, target: u64) -> Result<Option<DocumentMatch>> {
        if self.exhausted {
            return Ok(None);
        }
        self.start_children(Some(target))?;

        while self
            .heap
            .peek()
            .is_some_and(|entry| entry.current.number < target)
        {
            let Some(SearcherEntry { mut searcher, .. }) = self.heap.pop() else {
                break;
            };
            let advanced = searcher.skip_to(target);
            self.place(searcher, advanced)?;
        }

        self.gather()
    }

    fn cost(&self) -> u64 {
        self.cost
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn close(&mut self) -> Result<()> {
        self.exhausted = true;
        let mut children: Vec<Box<dyn Searcher>> = self
            .heap
            .drain()
            .map(|entry| entry.searcher)
            .chain(self.unstarted.drain(..))
            .chain(self.finished.drain(..))
            .collect();
        close_all(children.iter_mut())
    }
}
