//! Approximate substring scoring.
//!
//! A name scores against a pattern by the best alignment of the pattern
//! anywhere inside the name:
//!
//! ```text
//! score = edits / pattern_len + offset / distance
//! ```
//!
//! `edits` is the Damerau-Levenshtein distance between the pattern and the
//! aligned window (so a transposition costs one edit), and `offset` is where
//! the window starts. 0.0 is a perfect prefix match; the score is capped at
//! 1.0.

use serde::{Deserialize, Serialize};
use strsim::damerau_levenshtein;

/// Default match permissiveness; lower is stricter.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Default distance over which a match's offset decays its score.
pub const DEFAULT_DISTANCE: usize = 100;

/// Tuning knobs for fuzzy matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct SearchOptions {
    /// Maximum score (0.0 - 1.0) that still counts as a match
    pub threshold: f64,
    /// Characters after which a match's position costs a full point
    pub distance: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            distance: DEFAULT_DISTANCE,
        }
    }
}

impl SearchOptions {
    /// Strict matching: typos are not forgiven.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            threshold: 0.1,
            distance: DEFAULT_DISTANCE,
        }
    }

    /// Permissive matching for short or misspelled queries.
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            threshold: 0.5,
            distance: 200,
        }
    }
}

/// Score `text` against `pattern`; both are expected to be lowercased.
///
/// Returns the best score in `[0.0, 1.0]`. An empty pattern scores 0.0
/// against everything.
#[must_use]
pub fn fuzzy_score(text: &str, pattern: &str, distance: usize) -> f64 {
    let pattern_chars: Vec<char> = pattern.chars().collect();
    let text_chars: Vec<char> = text.chars().collect();
    let m = pattern_chars.len();
    if m == 0 {
        return 0.0;
    }
    let distance = distance.max(1) as f64;

    if let Some(byte_offset) = text.find(pattern) {
        let offset = text[..byte_offset].chars().count();
        return (offset as f64 / distance).min(1.0);
    }

    let n = text_chars.len();
    if n <= m {
        let edits = damerau_levenshtein(text, pattern);
        return (edits as f64 / m as f64).min(1.0);
    }

    let mut best = 1.0_f64;
    for start in 0..n {
        let position_cost = start as f64 / distance;
        if position_cost >= best {
            break;
        }
        // A window whose length differs from the pattern by `d` costs at
        // least `d` edits, so only lengths within `best * m` can improve.
        let slack = (best * m as f64).ceil() as usize;
        for len in m.saturating_sub(slack).max(1)..=m + slack {
            if start + len > n {
                break;
            }
            let window: String = text_chars[start..start + len].iter().collect();
            let edits = damerau_levenshtein(&window, pattern);
            let score = edits as f64 / m as f64 + position_cost;
            if score < best {
                best = score;
            }
        }
    }
    best.min(1.0)
}
