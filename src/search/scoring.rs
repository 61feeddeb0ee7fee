//! Scorers for term matches and for combining sub-scores.

use std::fmt::Debug;
use std::sync::Arc;

/// Trait for per-term scorers.
pub trait Scorer: Send + Sync + Debug {
    /// Score a document containing the term `term_freq` times.
    fn score(&self, term_freq: u64) -> f64;

    /// Get the name of this scorer.
    fn name(&self) -> &'static str;
}

/// Scores every match with the same value.
#[derive(Debug, Clone)]
pub struct ConstantScorer {
    value: f64,
}

impl ConstantScorer {
    pub fn new(value: f64) -> Self {
        ConstantScorer { value }
    }
}

impl Default for ConstantScorer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Scorer for ConstantScorer {
    fn score(&self, _term_freq: u64) -> f64 {
        self.value
    }

    fn name(&self) -> &'static str {
        "constant"
    }
}

/// Classic square-root term frequency.
#[derive(Debug, Clone, Default)]
pub struct TermFrequencyScorer;

impl Scorer for TermFrequencyScorer {
    fn score(&self, term_freq: u64) -> f64 {
        (term_freq as f64).sqrt()
    }

    fn name(&self) -> &'static str {
        "tf"
    }
}

/// Trait for combining the scores of the sub-searchers matching a document.
pub trait CompositeScorer: Send + Sync + Debug {
    fn score_composite(&self, constituents: &[f64]) -> f64;

    fn name(&self) -> &'static str;
}

/// Sums constituent scores.
#[derive(Debug, Clone, Default)]
pub struct CompositeSumScorer;

impl CompositeScorer for CompositeSumScorer {
    fn score_composite(&self, constituents: &[f64]) -> f64 {
        constituents.iter().sum()
    }

    fn name(&self) -> &'static str {
        "sum"
    }
}

/// Scoring parameters handed to every searcher built for a query.
#[derive(Debug, Clone)]
pub struct ScoringParams {
    /// Multiplier applied to term scores.
    pub boost: f64,
    /// Per-term scorer.
    pub scorer: Arc<dyn Scorer>,
    /// Combiner for disjunctions.
    pub composite: Arc<dyn CompositeScorer>,
}

impl Default for ScoringParams {
    fn default() -> Self {
        ScoringParams {
            boost: 1.0,
            scorer: Arc::new(ConstantScorer::default()),
            composite: Arc::new(CompositeSumScorer),
        }
    }
}

impl ScoringParams {
    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = boost;
        self
    }

    /// Replace the per-term scorer.
    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }
}
