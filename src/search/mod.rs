//! Searchers for evaluating geo queries against an index reader.

pub mod collector;
pub mod disjunction;
pub mod filter;
pub mod geo_bbox;
pub mod geo_distance;
pub mod geo_filter;
pub mod multi_term;
pub mod options;
pub mod scoring;
pub mod searcher;
pub mod term;

pub use self::collector::{Collector, SearchHit, TopDocs, TopDocsCollector, collect_all};
pub use self::disjunction::DisjunctionSearcher;
pub use self::filter::{FilterFn, FilteringSearcher};
pub use self::geo_bbox::new_geo_bounding_box_searcher;
pub use self::geo_distance::{box_searcher, new_geo_point_distance_searcher};
pub use self::geo_filter::{build_distance_filter, build_rect_filter};
pub use self::multi_term::new_multi_term_searcher;
pub use self::options::{ScoreMode, SearcherOptions};
pub use self::scoring::{
    CompositeScorer, CompositeSumScorer, ConstantScorer, Scorer, ScoringParams,
    TermFrequencyScorer,
};
pub use self::searcher::{DocumentMatch, EmptySearcher, OpenedSearchers, Searcher};
pub use self::term::TermSearcher;

/// Precision step used to index geopoint fields.
pub const GEO_PRECISION_STEP: u32 = 9;
