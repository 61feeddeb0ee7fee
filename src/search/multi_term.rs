//! Searcher matching any of a list of encoded terms.

use crate::error::Result;
use crate::index::IndexReader;
use crate::search::disjunction::DisjunctionSearcher;
use crate::search::options::SearcherOptions;
use crate::search::scoring::ScoringParams;
use crate::search::searcher::{EmptySearcher, OpenedSearchers, Searcher};
use crate::search::term::TermSearcher;

/// Build a searcher matching documents that contain any of `terms` in `field`.
///
/// Terms absent from the index are skipped. If opening a term fails, the
/// term searchers opened before it are closed.
pub fn new_multi_term_searcher<T: AsRef<[u8]>>(
    reader: &dyn IndexReader,
    terms: &[T],
    field: &str,
    scoring: &ScoringParams,
    options: &SearcherOptions,
) -> Result<Box<dyn Searcher>> {
    let mut opened = OpenedSearchers::new();
    for term in terms {
        if let Some(postings) = reader.postings(field, term.as_ref())? {
            opened.push(Box::new(TermSearcher::new(postings, scoring, options)));
        }
    }

    if opened.len() > 1 {
        let disjunction =
            DisjunctionSearcher::new(opened, 0, options, scoring.composite.clone())?;
        return Ok(Box::new(disjunction));
    }

    Ok(opened
        .into_inner()
        .pop()
        .unwrap_or_else(|| Box::new(EmptySearcher::new())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::MemoryIndex;
    use crate::search::searcher::testing::drain;

    fn index() -> MemoryIndex {
        let mut index = MemoryIndex::new();
        index.add_term(0, "f", b"a".to_vec());
        index.add_term(1, "f", b"b".to_vec());
        index.add_term(2, "f", b"a".to_vec());
        index.add_term(2, "f", b"b".to_vec());
        index.add_term(3, "f", b"c".to_vec());
        index
    }

    #[test]
    fn test_multi_term_union() {
        let index = index();
        let mut searcher = new_multi_term_searcher(
            &index,
            &[b"a".to_vec(), b"b".to_vec(), b"zzz".to_vec()],
            "f",
            &ScoringParams::default(),
            &SearcherOptions::default(),
        )
        .unwrap();

        assert_eq!(drain(searcher.as_mut()), vec![(0, 1.0), (1, 1.0), (2, 2.0)]);
    }

    #[test]
    fn test_multi_term_single_and_none() {
        let index = index();
        let options = SearcherOptions::default().with_max_clause_count(1);

        let mut single = new_multi_term_searcher(
            &index,
            &[b"c".to_vec(), b"missing".to_vec()],
            "f",
            &ScoringParams::default(),
            &options,
        )
        .unwrap();
        assert_eq!(drain(single.as_mut()), vec![(3, 1.0)]);

        let mut none = new_multi_term_searcher(
            &index,
            &[b"missing".to_vec()],
            "f",
            &ScoringParams::default(),
            &options,
        )
        .unwrap();
        assert!(none.next().unwrap().is_none());
    }

    #[test]
    fn test_multi_term_clause_limit() {
        let index = index();
        let result = new_multi_term_searcher(
            &index,
            &[b"a".to_vec(), b"b".to_vec()],
            "f",
            &ScoringParams::default(),
            &SearcherOptions::default().with_max_clause_count(1),
        );
        assert!(result.unwrap_err().is_index_access());
    }
}
