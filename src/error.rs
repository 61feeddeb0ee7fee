//! Error types for the sarissa-geo library.
//!
//! All errors are represented by the [`GeoSearchError`] enum. Searcher
//! construction reports invalid geometry and index access failures through
//! dedicated variants so callers can tell a bad query from a broken index.
//!
//! # Examples
//!
//! ```
//! use sarissa_geo::error::{GeoSearchError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(GeoSearchError::geometry("radius must not be negative"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for sarissa-geo operations.
#[derive(Error, Debug)]
pub enum GeoSearchError {
    /// Invalid center, radius or rectangle.
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// Failure obtaining postings, a value reader or a composite searcher
    /// from the index.
    #[error("Index access error: {0}")]
    IndexAccess(String),

    /// Invalid query parameters (field name, precision step, distance string).
    #[error("Query error: {0}")]
    Query(String),

    /// I/O errors (reading point files in the CLI)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with GeoSearchError.
pub type Result<T> = std::result::Result<T, GeoSearchError>;

impl GeoSearchError {
    /// Create a new geometry error.
    pub fn geometry<S: Into<String>>(msg: S) -> Self {
        GeoSearchError::Geometry(msg.into())
    }

    /// Create a new index access error.
    pub fn index_access<S: Into<String>>(msg: S) -> Self {
        GeoSearchError::IndexAccess(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        GeoSearchError::Query(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        GeoSearchError::Query(msg.into()) // Parse errors are treated as query errors
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        GeoSearchError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        GeoSearchError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Whether this error was caused by the query geometry.
    pub fn is_geometry(&self) -> bool {
        matches!(self, GeoSearchError::Geometry(_))
    }

    /// Whether this error came from the underlying index.
    pub fn is_index_access(&self) -> bool {
        matches!(self, GeoSearchError::IndexAccess(_))
    }
}
