//! **Search, filter, group and sort a catalog of JSON Schema tooling.**
//!
//! `tooling-catalog` takes a YAML catalog of tools (validators, code
//! generators, editors and so on) and produces the grouped, ordered view a
//! tooling page shows, driven by a small set of user preferences. Those
//! preferences round-trip through a URL query string, so any view can be
//! shared as a link.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the [`Tool`] record, tolerant of the loose shapes found in
//!   hand-edited YAML (numbers where strings are expected, scalars where lists
//!   are expected).
//! - **[`catalog`]**: loading a catalog document into an immutable, shareable
//!   [`Catalog`].
//! - **[`extract`]**: dotted field-path access and the unique-value index that
//!   feeds filter checkbox lists.
//! - **[`search`]**: fuzzy name matching.
//! - **[`preferences`]**: the preference record, its URL encoding, the pure
//!   reducer and the store that mirrors every change to the address bar.
//! - **[`view`]**: the search → filter → sort → group pipeline, memoized per
//!   stage.
//! - **[`render`]**: tables, CSV, filter controls and the detail view.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use tooling_catalog::{load_catalog, Preferences, SearchOptions, ViewModel};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (catalog, _report) = load_catalog(Path::new("tooling-data.yaml"))?;
//!     let mut view_model = ViewModel::new(Arc::new(catalog), SearchOptions::default());
//!
//!     let prefs = Preferences::from_query("query=ajv&groupBy=languages");
//!     let view = view_model.view(&prefs);
//!     for (label, tools) in &view.groups {
//!         println!("{label}: {}", tools.len());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::unwrap_used)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod preferences;
pub mod render;
pub mod search;
pub mod view;

pub use catalog::{load_catalog, parse_catalog_str, Catalog, LoadReport};
pub use config::AppConfig;
pub use error::{CatalogError, Result};
pub use extract::{unique_values_per_field, Exclusions, UniqueValues};
pub use model::Tool;
pub use preferences::{
    FilterDimension, GroupBy, PreferenceAction, PreferenceStore, Preferences, SortBy, SortOrder,
};
pub use render::{filter_controls, render_csv, render_detail, render_table};
pub use search::{SearchIndex, SearchOptions};
pub use view::{GroupedView, ViewModel};
