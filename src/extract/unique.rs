//! Unique-value index: the option lists behind the filter checkboxes.

use super::{collation_key, field_value};
use crate::model::{sort_by_draft_order, Tool};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::Display;

/// Per-field values to leave out of the unique-value index.
///
/// Values are stored in string form, so an exclusion written as the number
/// `3` and one written as the string `"3"` are the same exclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions {
    by_field: HashMap<String, HashSet<String>>,
}

impl Exclusions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude `value` from `field`.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Display) {
        self.by_field
            .entry(field.into())
            .or_default()
            .insert(value.to_string());
    }

    /// Builder form of [`insert`](Self::insert) for several values at once.
    #[must_use]
    pub fn with<V: Display>(mut self, field: &str, values: impl IntoIterator<Item = V>) -> Self {
        for value in values {
            self.insert(field, value);
        }
        self
    }

    #[must_use]
    pub fn contains(&self, field: &str, value: &str) -> bool {
        self.by_field
            .get(field)
            .is_some_and(|set| set.contains(value))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_field.values().all(HashSet::is_empty)
    }
}

impl<K, V> FromIterator<(K, V)> for Exclusions
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut exclusions = Self::new();
        for (field, value) in iter {
            exclusions.insert(field, value);
        }
        exclusions
    }
}

/// Sorted distinct values per field, in the order the fields were requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UniqueValues {
    fields: IndexMap<String, Vec<String>>,
}

impl UniqueValues {
    /// Values for a field; empty when the field was not requested.
    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterate `(field, values)` in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Re-sort one field's values by draft release order instead of lexically.
    pub fn sort_field_by_draft_order(&mut self, field: &str) {
        if let Some(values) = self.fields.get_mut(field) {
            sort_by_draft_order(values);
        }
    }
}

/// Collect the distinct stringified values of each field across `tools`.
///
/// List values contribute each element. Records where the path resolves to
/// nothing contribute nothing. Output is sorted case-insensitively, with an
/// exact comparison as tie-breaker so the order is deterministic.
pub fn unique_values_per_field<'a, I>(tools: I, fields: &[&str], exclusions: &Exclusions) -> UniqueValues
where
    I: IntoIterator<Item = &'a Tool>,
{
    let mut collected: IndexMap<String, BTreeSet<String>> = fields
        .iter()
        .map(|field| ((*field).to_string(), BTreeSet::new()))
        .collect();

    for tool in tools {
        for (field, values) in &mut collected {
            let Some(value) = field_value(tool, field) else {
                continue;
            };
            for element in value.into_vec() {
                if !exclusions.contains(field, &element) {
                    values.insert(element);
                }
            }
        }
    }

    let fields: IndexMap<String, Vec<String>> = collected
        .into_iter()
        .map(|(field, values)| {
            let mut sorted: Vec<String> = values.into_iter().collect();
            sorted.sort_by_cached_key(|v| (collation_key(v), v.clone()));
            (field, sorted)
        })
        .collect();

    tracing::debug!(fields = fields.len(), "Built unique-value index");
    UniqueValues { fields }
}
