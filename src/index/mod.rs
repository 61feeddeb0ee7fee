//! Index reader capabilities consumed by the searchers.
//!
//! Searchers never touch index storage directly. They ask an [`IndexReader`]
//! for postings of encoded terms and for a [`DocumentValueReader`] that
//! replays the raw terms stored for a document.

pub mod memory;

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::Result;

pub use self::memory::MemoryIndex;

/// Lazy, finite sequence of `(field, term)` pairs stored for one document.
pub type DocumentValues<'a> = Box<dyn Iterator<Item = Result<(&'a str, &'a [u8])>> + 'a>;

/// Trait for index readers.
pub trait IndexReader: Send + Sync + Debug {
    /// Get the number of documents in the index.
    fn doc_count(&self) -> u64;

    /// Get the postings for an encoded term, or `None` if the term is absent.
    fn postings(&self, field: &str, term: &[u8]) -> Result<Option<Box<dyn PostingIterator>>>;

    /// Get a reader replaying the stored terms of the given fields.
    fn document_value_reader(&self, fields: &[&str]) -> Result<Arc<dyn DocumentValueReader>>;
}

/// Iterator over the documents containing a term.
///
/// A fresh iterator is positioned before its first document.
pub trait PostingIterator: Send + Debug {
    /// Current document ID, `u64::MAX` when unpositioned or exhausted.
    fn doc_id(&self) -> u64;

    /// Frequency of the term in the current document.
    fn term_freq(&self) -> u64;

    /// Move to the next document.
    fn next(&mut self) -> Result<bool>;

    /// Move to the first document >= target. Never moves backwards.
    fn skip_to(&mut self, target: u64) -> Result<bool>;

    /// Number of documents in this posting list.
    fn cost(&self) -> u64;

    /// Release the resources held by this iterator.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Access to the raw terms stored per document.
///
/// Implementations must be safe to call concurrently from several threads.
pub trait DocumentValueReader: Send + Sync + Debug {
    /// Visit every stored `(field, term)` pair of a document.
    fn document_values(&self, doc_id: u64) -> Result<DocumentValues<'_>>;
}
