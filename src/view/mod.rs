//! The preference-derived view pipeline.
//!
//! ```text
//! catalog ──search(query)──▶ filter(dimensions) ──▶ sort(key, order) ──▶ group(field)
//! ```
//!
//! Each stage is a pure function in [`stages`]; [`ViewModel`] chains them
//! and memoizes every stage on the preference fields it reads, so changing
//! the sort order does not re-run the search.

mod memo;
mod stages;
mod view_model;

pub use memo::Memo;
pub use stages::{filter_stage, group_stage, search_stage, sort_stage};
pub use view_model::{MemoStats, ViewModel};

use crate::model::Tool;
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// Label of the single group produced when grouping is off.
pub const NONE_GROUP: &str = "none";

/// Final pipeline output: ordered groups plus the visible-tool count.
///
/// Groups fan out, so a tool may appear in several of them;
/// `number_of_tools` counts each tool once.
///
/// An empty result has no groups at all, even with grouping off: it
/// serializes as `"groups": {}` rather than a lone empty `"none"` group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedView {
    pub groups: IndexMap<String, Vec<Arc<Tool>>>,
    pub number_of_tools: usize,
}

impl GroupedView {
    /// True when no group holds any tool.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    /// Tools in one group, empty for an unknown label.
    #[must_use]
    pub fn group(&self, label: &str) -> &[Arc<Tool>] {
        self.groups.get(label).map(Vec::as_slice).unwrap_or_default()
    }

    /// Group labels in display order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Total group memberships; exceeds `number_of_tools` when tools fan out.
    #[must_use]
    pub fn total_memberships(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
