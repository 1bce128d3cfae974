use super::{filter_stage, group_stage, search_stage, sort_stage, GroupedView, Memo};
use crate::catalog::Catalog;
use crate::model::Tool;
use crate::preferences::{GroupBy, Preferences, SortBy, SortOrder};
use crate::search::{SearchIndex, SearchOptions};
use std::sync::Arc;

type Stage = Arc<Vec<Arc<Tool>>>;

// Stage keys are cumulative: each stage depends on every field its
// upstream stages read, plus the catalog generation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchKey {
    generation: u64,
    query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FilterKey {
    search: SearchKey,
    languages: Vec<String>,
    licenses: Vec<String>,
    drafts: Vec<String>,
    tooling_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SortKey {
    filter: FilterKey,
    sort_by: SortBy,
    sort_order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GroupKey {
    sort: SortKey,
    group_by: GroupBy,
}

/// Hit/miss counters per stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub search_misses: u64,
    pub filter_misses: u64,
    pub sort_misses: u64,
    pub group_misses: u64,
    pub hits: u64,
}

/// Catalog plus memoized pipeline.
///
/// Owns the search index and rebuilds it only when handed a different
/// catalog (by pointer identity) or new search options.
#[derive(Debug)]
pub struct ViewModel {
    catalog: Arc<Catalog>,
    index: SearchIndex,
    generation: u64,
    searched: Memo<SearchKey, Stage>,
    filtered: Memo<FilterKey, Stage>,
    sorted: Memo<SortKey, Stage>,
    grouped: Memo<GroupKey, Arc<GroupedView>>,
}

impl ViewModel {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, options: SearchOptions) -> Self {
        let index = SearchIndex::with_options(catalog.tools(), options);
        Self {
            catalog,
            index,
            generation: 0,
            searched: Memo::default(),
            filtered: Memo::default(),
            sorted: Memo::default(),
            grouped: Memo::default(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub const fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Swap in a catalog snapshot. The same `Arc` is a no-op.
    pub fn set_catalog(&mut self, catalog: Arc<Catalog>) {
        if Arc::ptr_eq(&self.catalog, &catalog) {
            tracing::debug!("Catalog unchanged, keeping search index");
            return;
        }
        let options = *self.index.options();
        self.catalog = catalog;
        self.rebuild_index(options);
    }

    /// Change matching options; rebuilds the index.
    pub fn set_search_options(&mut self, options: SearchOptions) {
        if *self.index.options() != options {
            self.rebuild_index(options);
        }
    }

    fn rebuild_index(&mut self, options: SearchOptions) {
        self.index = SearchIndex::with_options(self.catalog.tools(), options);
        self.generation += 1;
        // Stage results would never match the new generation; release the
        // tools they hold.
        self.searched.clear();
        self.filtered.clear();
        self.sorted.clear();
        self.grouped.clear();
        tracing::debug!(generation = self.generation, "Rebuilt search index");
    }

    /// Run the pipeline for `prefs`, reusing every stage whose inputs are
    /// unchanged since the previous call.
    pub fn view(&mut self, prefs: &Preferences) -> Arc<GroupedView> {
        let search_key = SearchKey {
            generation: self.generation,
            query: prefs.query.clone(),
        };
        let filter_key = FilterKey {
            search: search_key.clone(),
            languages: prefs.languages.clone(),
            licenses: prefs.licenses.clone(),
            drafts: prefs.drafts.clone(),
            tooling_types: prefs.tooling_types.clone(),
        };
        let sort_key = SortKey {
            filter: filter_key.clone(),
            sort_by: prefs.sort_by,
            sort_order: prefs.sort_order,
        };
        let group_key = GroupKey {
            sort: sort_key.clone(),
            group_by: prefs.group_by,
        };

        // Borrow the stage memos separately from the index.
        let Self {
            index,
            searched,
            filtered,
            sorted,
            grouped,
            ..
        } = self;

        let hits_before = grouped.hits();
        let view = grouped.get_or_compute(group_key, || {
            let sorted_tools = sorted.get_or_compute(sort_key, || {
                let filtered_tools = filtered.get_or_compute(filter_key, || {
                    let found = searched
                        .get_or_compute(search_key, || Arc::new(search_stage(index, &prefs.query)));
                    Arc::new(filter_stage(&found, prefs))
                });
                Arc::new(sort_stage(&filtered_tools, prefs.sort_by, prefs.sort_order))
            });
            Arc::new(group_stage(&sorted_tools, prefs.group_by))
        });

        if grouped.hits() > hits_before {
            tracing::debug!("View unchanged, reusing memoized result");
        }
        view
    }

    #[must_use]
    pub fn stats(&self) -> MemoStats {
        MemoStats {
            search_misses: self.searched.misses(),
            filter_misses: self.filtered.misses(),
            sort_misses: self.sorted.misses(),
            group_misses: self.grouped.misses(),
            hits: self.searched.hits() + self.filtered.hits() + self.sorted.hits() + self.grouped.hits(),
        }
    }
}
