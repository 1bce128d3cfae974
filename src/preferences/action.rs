//! Preference transitions.

use super::{FilterDimension, GroupBy, Preferences, SortBy, SortOrder};

/// A user interaction that changes preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceAction {
    /// Replace the search text
    SetQuery(String),
    SetGroupBy(GroupBy),
    /// Set both sort key and order explicitly
    SetSort { sort_by: SortBy, sort_order: SortOrder },
    /// Click on a sortable column header: the active column flips its
    /// order, any other column becomes active in ascending order
    SortColumn(SortBy),
    /// Check or uncheck one filter value
    ToggleFilter { dimension: FilterDimension, value: String },
    /// Replace a dimension's selection wholesale (a submitted filter form)
    SetFilter { dimension: FilterDimension, values: Vec<String> },
    ClearFilter(FilterDimension),
    /// Back to defaults, keeping the grouping
    Reset,
}

/// Compute the next preferences. Pure: `prev` is never modified.
#[must_use]
pub fn reduce(prev: &Preferences, action: PreferenceAction) -> Preferences {
    let mut next = prev.clone();
    match action {
        PreferenceAction::SetQuery(query) => next.query = query,
        PreferenceAction::SetGroupBy(group_by) => next.group_by = group_by,
        PreferenceAction::SetSort {
            sort_by,
            sort_order,
        } => {
            next.sort_by = sort_by;
            next.sort_order = sort_order;
        }
        PreferenceAction::SortColumn(column) => {
            if prev.sort_by == column {
                next.sort_order = prev.sort_order.reversed();
            } else {
                next.sort_by = column;
                next.sort_order = SortOrder::Ascending;
            }
        }
        PreferenceAction::ToggleFilter { dimension, value } => {
            let selected = next.filter_mut(dimension);
            if let Some(pos) = selected.iter().position(|v| *v == value) {
                selected.remove(pos);
            } else {
                selected.push(value);
            }
        }
        PreferenceAction::SetFilter { dimension, values } => {
            *next.filter_mut(dimension) = values;
        }
        PreferenceAction::ClearFilter(dimension) => next.filter_mut(dimension).clear(),
        PreferenceAction::Reset => next = prev.reset(),
    }
    next
}
