//! Searcher construction options.

use serde::{Deserialize, Serialize};

use crate::error::{GeoSearchError, Result};

/// Whether searchers compute scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    /// Score with the configured scorers.
    #[default]
    Default,
    /// Skip scoring; every match scores zero.
    None,
}

/// Options shared by every searcher built for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearcherOptions {
    /// Scoring mode.
    pub score: ScoreMode,
    /// Maximum number of clauses a disjunction may combine (0 = unlimited).
    pub max_clause_count: usize,
}

impl Default for SearcherOptions {
    fn default() -> Self {
        SearcherOptions {
            score: ScoreMode::Default,
            max_clause_count: 0,
        }
    }
}

impl SearcherOptions {
    /// Set the scoring mode.
    pub fn with_score_mode(mut self, score: ScoreMode) -> Self {
        self.score = score;
        self
    }

    /// Set the disjunction clause limit.
    pub fn with_max_clause_count(mut self, max_clause_count: usize) -> Self {
        self.max_clause_count = max_clause_count;
        self
    }

    /// Whether scores should be computed.
    pub fn scoring_enabled(&self) -> bool {
        self.score != ScoreMode::None
    }

    /// Fail if a disjunction over `count` clauses exceeds the limit.
    pub fn check_clause_count(&self, count: usize) -> Result<()> {
        if self.max_clause_count > 0 && count > self.max_clause_count {
            return Err(GeoSearchError::index_access(format!(
                "too many clauses: {count} exceeds the limit of {}",
                self.max_clause_count
            )));
        }
        Ok(())
    }
}
