//! Filter checkbox lists derived from the unique-value index.

use super::convert_to_title_case;
use crate::extract::UniqueValues;
use crate::preferences::{FilterDimension, Preferences};
use serde::Serialize;

/// One checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub checked: bool,
}

/// A titled checkbox list for one filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterControl {
    pub dimension: FilterDimension,
    /// Field path the options were collected from
    pub field: String,
    /// Heading: the last path segment, title-cased
    pub label: String,
    pub options: Vec<FilterOption>,
}

impl FilterControl {
    /// Values currently checked, in option order.
    pub fn checked(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|o| o.checked)
            .map(|o| o.value.as_str())
    }
}

/// Build the checkbox lists, in the index's field order.
///
/// Fields with no matching filter dimension are skipped, since nothing could
/// store their selection. An option is checked when the preferences select
/// it, ignoring case.
#[must_use]
pub fn filter_controls(uniques: &UniqueValues, prefs: &Preferences) -> Vec<FilterControl> {
    uniques
        .iter()
        .filter_map(|(field, values)| {
            let dimension = FilterDimension::from_field_path(field)?;
            let selected: Vec<String> = prefs
                .filter(dimension)
                .iter()
                .map(|v| v.to_lowercase())
                .collect();
            let last_segment = field.rsplit('.').next().unwrap_or(field);

            Some(FilterControl {
                dimension,
                field: field.to_string(),
                label: convert_to_title_case(last_segment, " ", " "),
                options: values
                    .iter()
                    .map(|value| FilterOption {
                        checked: selected.contains(&value.to_lowercase()),
                        value: value.clone(),
                    })
                    .collect(),
            })
        })
        .collect()
}
