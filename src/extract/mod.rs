//! Field extraction over catalog records.
//!
//! Records are addressed with dotted paths (`license`,
//! `supportedDialects.draft`, `compliance.config.docs`). The same resolver
//! feeds filter option lists ([`unique_values_per_field`]) and group
//! membership in the view pipeline.

mod collate;
mod unique;

pub use collate::{collation_key, compare_collated};
pub use unique::{unique_values_per_field, Exclusions, UniqueValues};

use crate::model::lenient::{flatten_to_strings, scalar_to_string};
use crate::model::Tool;
use serde_json::Value;

/// Well-known field paths.
pub mod fields {
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const TOOLING_TYPES: &str = "toolingTypes";
    pub const LANGUAGES: &str = "languages";
    pub const ENVIRONMENTS: &str = "environments";
    pub const LICENSE: &str = "license";
    pub const SOURCE: &str = "source";
    pub const HOMEPAGE: &str = "homepage";
    pub const DRAFTS: &str = "supportedDialects.draft";
    pub const BOWTIE_IDENTIFIER: &str = "bowtie.identifier";
    pub const TOOLING_LISTING_NOTES: &str = "toolingListingNotes";
    pub const LAST_UPDATED: &str = "lastUpdated";
    pub const DEPENDS_ON_VALIDATORS: &str = "dependsOnValidators";
}

/// The value found at a field path, already stringified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A single value (string, number or boolean in the source)
    Scalar(String),
    /// A list value, flattened one level; may be empty
    List(Vec<String>),
}

impl FieldValue {
    /// View the value as a slice: a scalar is a one-element slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Scalar(s) => std::slice::from_ref(s),
            Self::List(items) => items,
        }
    }

    /// True for an empty list. Scalars are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Consume into owned values.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Scalar(s) => vec![s],
            Self::List(items) => items,
        }
    }
}

/// Resolve a dotted path against a record.
///
/// Returns `None` when any segment is missing; never panics on absent
/// intermediate keys. Typed fields are read directly, anything else is
/// looked up in the record's extra keys.
#[must_use]
pub fn field_value(tool: &Tool, path: &str) -> Option<FieldValue> {
    let scalar = |v: &Option<String>| v.clone().map(FieldValue::Scalar);
    let list = |v: &Option<Vec<String>>| v.clone().map(FieldValue::List);

    match path {
        fields::NAME => Some(FieldValue::Scalar(tool.name.clone())),
        fields::DESCRIPTION => scalar(&tool.description),
        fields::TOOLING_TYPES => list(&tool.tooling_types),
        fields::LANGUAGES => list(&tool.languages),
        fields::ENVIRONMENTS => list(&tool.environments),
        fields::LICENSE => scalar(&tool.license),
        fields::SOURCE => scalar(&tool.source),
        fields::HOMEPAGE => scalar(&tool.homepage),
        fields::DRAFTS => tool
            .supported_dialects
            .as_ref()
            .and_then(|d| list(&d.draft)),
        fields::BOWTIE_IDENTIFIER => tool.bowtie.as_ref().and_then(|b| scalar(&b.identifier)),
        fields::TOOLING_LISTING_NOTES => scalar(&tool.tooling_listing_notes),
        fields::LAST_UPDATED => scalar(&tool.last_updated),
        fields::DEPENDS_ON_VALIDATORS => list(&tool.depends_on_validators),
        _ => resolve_untyped(tool, path),
    }
}

/// Slow path: walk the serialized record, so nested typed fields
/// (`compliance.config.docs`) and extra keys resolve the same way.
fn resolve_untyped(tool: &Tool, path: &str) -> Option<FieldValue> {
    let mut segments = path.split('.');
    let head = segments.next()?;

    let root = match tool.extra.get(head) {
        Some(value) => value.clone(),
        None => serde_json::to_value(tool).ok()?.get(head)?.clone(),
    };

    let mut current = &root;
    for segment in segments {
        current = step(current, segment)?;
    }
    value_to_field(current)
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn value_to_field(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Array(_) => Some(FieldValue::List(flatten_to_strings(value))),
        other => scalar_to_string(other).map(FieldValue::Scalar),
    }
}
