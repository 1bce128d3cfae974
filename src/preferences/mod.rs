//! Viewer preferences and their URL round-trip.
//!
//! [`Preferences`] is the whole user-editable state of the catalog view:
//! search text, grouping, sort and four filter dimensions. It is a plain
//! value; every change produces a new one (see [`reduce`]) and a
//! [`PreferenceStore`] mirrors the latest value into the address bar.

mod action;
mod query;
mod store;

pub use action::{reduce, PreferenceAction};
pub use query::keys;
pub use store::{PreferenceStore, RecordingEnvironment, UrlEnvironment, ViewEnvironment};

use crate::extract::fields;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Scalar preference values
// ============================================================================

/// Field the catalog is grouped on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum GroupBy {
    /// A single group holding every match
    #[serde(rename = "none")]
    #[value(name = "none")]
    None,
    #[default]
    #[serde(rename = "toolingTypes")]
    #[value(name = "toolingTypes")]
    ToolingTypes,
    #[serde(rename = "languages")]
    #[value(name = "languages")]
    Languages,
    #[serde(rename = "environments")]
    #[value(name = "environments")]
    Environments,
    #[serde(rename = "supportedDialects.draft")]
    #[value(name = "supportedDialects.draft")]
    Drafts,
}

impl GroupBy {
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::ToolingTypes,
        Self::Languages,
        Self::Environments,
        Self::Drafts,
    ];

    /// Value as written in the URL.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ToolingTypes => fields::TOOLING_TYPES,
            Self::Languages => fields::LANGUAGES,
            Self::Environments => fields::ENVIRONMENTS,
            Self::Drafts => fields::DRAFTS,
        }
    }

    /// Record path whose values become group labels; `None` for no grouping.
    #[must_use]
    pub const fn field_path(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            other => Some(other.as_str()),
        }
    }

    /// Label shown in the group-by selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::ToolingTypes => "Tooling Types",
            Self::Languages => "Languages",
            Self::Environments => "Environments",
            Self::Drafts => "Supported Dialects",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == value)
    }
}

/// Sortable column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    License,
}

impl SortBy {
    pub const ALL: [Self; 2] = [Self::Name, Self::License];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => fields::NAME,
            Self::License => fields::LICENSE,
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ascending" => Some(Self::Ascending),
            "descending" => Some(Self::Descending),
            _ => None,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

display_as_str!(GroupBy, SortBy, SortOrder);

// ============================================================================
// Filter dimensions
// ============================================================================

/// One of the four multi-select filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterDimension {
    Languages,
    Licenses,
    Drafts,
    ToolingTypes,
}

impl FilterDimension {
    /// Dimensions in URL serialization order.
    pub const ALL: [Self; 4] = [
        Self::Languages,
        Self::Licenses,
        Self::Drafts,
        Self::ToolingTypes,
    ];

    /// Repeated query-string key.
    #[must_use]
    pub const fn query_key(self) -> &'static str {
        match self {
            Self::Languages => keys::LANGUAGES,
            Self::Licenses => keys::LICENSE,
            Self::Drafts => keys::DRAFTS,
            Self::ToolingTypes => keys::TOOLING_TYPES,
        }
    }

    /// Record path the dimension filters on.
    #[must_use]
    pub const fn field_path(self) -> &'static str {
        match self {
            Self::Languages => fields::LANGUAGES,
            Self::Licenses => fields::LICENSE,
            Self::Drafts => fields::DRAFTS,
            Self::ToolingTypes => fields::TOOLING_TYPES,
        }
    }

    /// Dimension filtering on `path`, if any.
    #[must_use]
    pub fn from_field_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.field_path() == path)
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_key())
    }
}

// ============================================================================
// Preferences
// ============================================================================

/// User-editable view state.
///
/// Every filter is a list; an empty list means "no constraint on this
/// dimension".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub query: String,
    pub group_by: GroupBy,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub languages: Vec<String>,
    pub licenses: Vec<String>,
    pub drafts: Vec<String>,
    pub tooling_types: Vec<String>,
}

impl Preferences {
    /// Selected values for one filter dimension.
    #[must_use]
    pub fn filter(&self, dimension: FilterDimension) -> &[String] {
        match dimension {
            FilterDimension::Languages => &self.languages,
            FilterDimension::Licenses => &self.licenses,
            FilterDimension::Drafts => &self.drafts,
            FilterDimension::ToolingTypes => &self.tooling_types,
        }
    }

    pub fn filter_mut(&mut self, dimension: FilterDimension) -> &mut Vec<String> {
        match dimension {
            FilterDimension::Languages => &mut self.languages,
            FilterDimension::Licenses => &mut self.licenses,
            FilterDimension::Drafts => &mut self.drafts,
            FilterDimension::ToolingTypes => &mut self.tooling_types,
        }
    }

    /// True when at least one filter dimension is constrained.
    #[must_use]
    pub fn has_filters(&self) -> bool {
        FilterDimension::ALL
            .into_iter()
            .any(|d| !self.filter(d).is_empty())
    }

    /// Defaults, keeping only the current grouping.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self {
            group_by: self.group_by,
            ..Self::default()
        }
    }
}
