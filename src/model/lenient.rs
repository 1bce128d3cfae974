//! Lenient deserializers for hand-edited catalog YAML.
//!
//! Catalog files are maintained by hand, so list fields sometimes hold a
//! single scalar and draft identifiers switch between numbers (`7`) and
//! strings (`"2019-09"`). These helpers normalize both shapes to strings
//! instead of rejecting the whole entry.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Stringify a scalar value. Returns `None` for null, objects and arrays.
#[must_use]
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Collect the string elements of a value, flattening arrays one level.
///
/// A scalar yields a single element. Nested arrays contribute their scalar
/// elements, objects and nulls contribute nothing.
#[must_use]
pub fn flatten_to_strings(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .flat_map(|item| match item {
                Value::Array(inner) => inner.iter().filter_map(scalar_to_string).collect(),
                other => scalar_to_string(other).into_iter().collect::<Vec<_>>(),
            })
            .collect(),
        other => scalar_to_string(other).into_iter().collect(),
    }
}

/// Deserialize an optional list of strings, accepting a lone scalar and
/// numeric elements.
pub fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(flatten_to_strings(&v)),
    })
}

/// Deserialize an optional scalar as a string, accepting numbers and bools.
pub fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}
