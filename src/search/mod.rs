//! Fuzzy search over tool names.
//!
//! [`SearchIndex`] is built once per catalog snapshot and precomputes the
//! lowercased names, so a keystroke only pays for scoring. Building it is
//! the caller's (and [`ViewModel`](crate::view::ViewModel)'s) responsibility
//! to do once per catalog, never per query.

mod score;

pub use score::{fuzzy_score, SearchOptions, DEFAULT_DISTANCE, DEFAULT_THRESHOLD};

use crate::model::Tool;
use std::sync::Arc;

/// A search result with its match quality (0.0 is a perfect match).
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub tool: Arc<Tool>,
    pub score: f64,
}

/// Searchable index keyed on tool name.
#[derive(Debug, Clone)]
#[must_use]
pub struct SearchIndex {
    tools: Vec<Arc<Tool>>,
    names_lower: Vec<String>,
    options: SearchOptions,
}

impl SearchIndex {
    /// Build an index over a catalog snapshot with default options.
    pub fn new(tools: &[Arc<Tool>]) -> Self {
        Self::with_options(tools, SearchOptions::default())
    }

    /// Build an index with explicit matching options.
    pub fn with_options(tools: &[Arc<Tool>], options: SearchOptions) -> Self {
        let names_lower = tools.iter().map(|t| t.name.to_lowercase()).collect();
        tracing::debug!(tools = tools.len(), "Built search index");
        Self {
            tools: tools.to_vec(),
            names_lower,
            options,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &SearchOptions {
        &self.options
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Matching tools, best match first.
    ///
    /// A blank query returns the whole catalog in its original order rather
    /// than a score-ordered list.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Arc<Tool>> {
        if query.trim().is_empty() {
            return self.tools.clone();
        }
        self.search_scored(query)
            .into_iter()
            .map(|hit| hit.tool)
            .collect()
    }

    /// Matching tools with their scores, best match first. Equal scores keep
    /// catalog order. A blank query yields no hits.
    #[must_use]
    pub fn search_scored(&self, query: &str) -> Vec<SearchHit> {
        let pattern = query.trim().to_lowercase();
        if pattern.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit> = self
            .names_lower
            .iter()
            .zip(&self.tools)
            .filter_map(|(name, tool)| {
                let score = fuzzy_score(name, &pattern, self.options.distance);
                (score <= self.options.threshold).then(|| SearchHit {
                    tool: Arc::clone(tool),
                    score,
                })
            })
            .collect();

        // sort_by is stable, so ties stay in catalog order
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        tracing::debug!(query = %pattern, hits = hits.len(), "Fuzzy search");
        hits
    }
}
