//! Default values and named presets.

use super::types::{AppConfig, ValuesConfig};
use crate::extract::fields;
use crate::search::SearchOptions;
use std::collections::BTreeMap;

/// Page the preference query string is attached to.
pub const DEFAULT_BASE_URL: &str = "https://json-schema.org/tools";

/// Fields that get filter option lists by default.
pub const DEFAULT_VALUE_FIELDS: &[&str] = &[
    fields::LICENSE,
    fields::DRAFTS,
    fields::LANGUAGES,
    fields::TOOLING_TYPES,
];

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Default matching and the usual filter lists
    Default,
    /// Typos are not forgiven
    Strict,
    /// Looser matching for short or misspelled queries
    Permissive,
    /// Every filterable field, nothing hidden
    Complete,
}

impl ConfigPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::Permissive => "permissive",
            Self::Complete => "complete",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "balanced" => Some(Self::Default),
            "strict" | "exact" => Some(Self::Strict),
            "permissive" | "loose" => Some(Self::Permissive),
            "complete" | "all" => Some(Self::Complete),
            _ => None,
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Balanced fuzzy matching, legacy drafts hidden from filters",
            Self::Strict => "Near-exact name matching",
            Self::Permissive => "Tolerant matching for misspelled queries",
            Self::Complete => "All filterable fields including environments, no exclusions",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::Permissive, Self::Complete]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self {
                search: SearchOptions::strict(),
                ..Self::default()
            },
            ConfigPreset::Permissive => Self {
                search: SearchOptions::permissive(),
                ..Self::default()
            },
            ConfigPreset::Complete => Self {
                values: ValuesConfig {
                    fields: DEFAULT_VALUE_FIELDS
                        .iter()
                        .chain(std::iter::once(&fields::ENVIRONMENTS))
                        .map(ToString::to_string)
                        .collect(),
                    exclusions: BTreeMap::new(),
                    draft_order: true,
                },
                ..Self::default()
            },
        }
    }
}
