//! Searcher trait and construction helpers.

use std::fmt::Debug;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A candidate document flowing through a searcher tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentMatch {
    /// The document ordinal.
    pub number: u64,
    /// The relevance score.
    pub score: f64,
}

impl DocumentMatch {
    pub fn new(number: u64, score: f64) -> Self {
        DocumentMatch { number, score }
    }
}

/// Trait for query-evaluation nodes.
///
/// Searchers return documents in strictly increasing `number` order. A fresh
/// searcher is positioned before its first document.
pub trait Searcher: Send + Debug {
    /// Move to the next matching document.
    fn next(&mut self) -> Result<Option<DocumentMatch>>;

    /// Move to the first matching document >= target that has not been
    /// returned yet.
    fn skip_to(&mut self, target: u64) -> Result<Option<DocumentMatch>>;

    /// Get the cost of iterating through this searcher.
    fn cost(&self) -> u64;

    /// Check if this searcher is exhausted.
    fn is_exhausted(&self) -> bool;

    /// Release the index resources held by this searcher and its children.
    fn close(&mut self) -> Result<()>;
}

/// A searcher that matches no documents.
#[derive(Debug, Default)]
pub struct EmptySearcher;

impl EmptySearcher {
    /// Create a new empty searcher.
    pub fn new() -> Self {
        EmptySearcher
    }
}

impl Searcher for EmptySearcher {
    fn next(&mut self) -> Result<Option<DocumentMatch>> {
        Ok(None)
    }

    fn skip_to(&mut self, _target: u64) -> Result<Option<DocumentMatch>> {
        Ok(None)
    }

    fn cost(&self) -> u64 {
        0
    }

    fn is_exhausted(&self) -> bool {
        true
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Searchers opened during a multi-step construction.
///
/// Every searcher still registered when the guard is dropped is closed, so a
/// `?` anywhere in the construction releases what was built so far. On
/// success, [`OpenedSearchers::into_inner`] hands the searchers to their
/// parent.
#[derive(Debug, Default)]
pub struct OpenedSearchers {
    searchers: Vec<Box<dyn Searcher>>,
}

impl OpenedSearchers {
    pub fn new() -> Self {
        OpenedSearchers {
            searchers: Vec::new(),
        }
    }

    /// Register a freshly built searcher.
    pub fn push(&mut self, searcher: Box<dyn Searcher>) {
        self.searchers.push(searcher);
    }

    pub fn len(&self) -> usize {
        self.searchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.searchers.is_empty()
    }

    /// Transfer ownership of the registered searchers to the caller.
    pub fn into_inner(mut self) -> Vec<Box<dyn Searcher>> {
        std::mem::take(&mut self.searchers)
    }
}

impl From<Vec<Box<dyn Searcher>>> for OpenedSearchers {
    fn from(searchers: Vec<Box<dyn Searcher>>) -> Self {
        OpenedSearchers { searchers }
    }
}

impl Drop for OpenedSearchers {
    fn drop(&mut self) {
        for searcher in self.searchers.iter_mut() {
            if let Err(e) = searcher.close() {
                warn!("failed to close searcher during cleanup: {e}");
            }
        }
    }
}

/// Close every searcher, returning the first error after attempting all.
pub(crate) fn close_all<'a, I>(searchers: I) -> Result<()>
where
    I: IntoIterator<Item = &'a mut Box<dyn Searcher>>,
{
    let mut first_err = None;
    for searcher in searchers {
        if let Err(e) = searcher.close() {
            first_err.get_or_insert(e);
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::testing::StaticSearcher;
    use super::*;

    #[test]
    fn test_empty_searcher() {
        let mut searcher = EmptySearcher::new();
        assert!(searcher.is_exhausted());
        assert_eq!(searcher.cost(), 0);
        assert!(searcher.next().unwrap().is_none());
        assert!(searcher.skip_to(5).unwrap().is_none());
    }

    #[test]
    fn test_opened_searchers_close_on_drop() {
        let (a, a_closes) = StaticSearcher::new(&[(1, 1.0)]);
        let (b, b_closes) = StaticSearcher::new(&[(2, 1.0)]);

        let mut opened = OpenedSearchers::new();
        opened.push(Box::new(a));
        opened.push(Box::new(b));
        drop(opened);

        assert_eq!(a_closes.load(Ordering::SeqCst), 1);
        assert_eq!(b_closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_opened_searchers_transfer() {
        let (a, a_closes) = StaticSearcher::new(&[(1, 1.0)]);

        let mut opened = OpenedSearchers::new();
        opened.push(Box::new(a));
        let mut searchers = opened.into_inner();

        assert_eq!(a_closes.load(Ordering::SeqCst), 0);
        close_all(searchers.iter_mut()).unwrap();
        assert_eq!(a_closes.load(Ordering::SeqCst), 1);
    }
}
