//! JSON Schema draft identifiers and their release ordering.

use std::cmp::Ordering;

/// Draft identifiers in release order.
///
/// Identifiers are not lexically ordered ("2019-09" sorts before "4" as a
/// string), so anything that displays drafts in a meaningful order goes
/// through this table.
pub const DRAFT_ORDER: &[&str] = &["1", "2", "3", "4", "5", "6", "7", "2019-09", "2020-12"];

/// Drafts hidden from filter option lists by default.
pub const LEGACY_DRAFTS: &[&str] = &["1", "2", "3"];

/// Position of a draft identifier in [`DRAFT_ORDER`].
#[must_use]
pub fn draft_position(draft: &str) -> Option<usize> {
    DRAFT_ORDER.iter().position(|d| *d == draft)
}

/// Compare two draft identifiers by release order.
///
/// Unknown identifiers sort after every known one and compare equal to each
/// other, so a stable sort keeps their relative order.
#[must_use]
pub fn compare_drafts(a: &str, b: &str) -> Ordering {
    match (draft_position(a), draft_position(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort draft identifiers in place by release order (stable).
pub fn sort_by_draft_order(values: &mut [String]) {
    values.sort_by(|a, b| compare_drafts(a, b));
}
