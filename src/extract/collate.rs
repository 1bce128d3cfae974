//! Case- and accent-insensitive ordering for labels and sort keys.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold a string for comparison: decompose, drop combining marks, lowercase.
///
/// `"Élan"` and `"elan"` fold to the same key.
#[must_use]
pub fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Total order on folded keys. Strings that fold equal fall back to their
/// raw form so the order never depends on input position.
#[must_use]
pub fn compare_collated(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}
