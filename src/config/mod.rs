//! Configuration for tooling-catalog.
//!
//! Settings come from a YAML file (discovered or given with `--config`) and
//! are overridden by command-line flags. Every section has defaults, so an
//! absent or partial file is fine.
//!
//! ```yaml
//! catalog:
//!   path: data/tooling-data.yaml
//! search:
//!   threshold: 0.3
//!   distance: 100
//! values:
//!   fields: [license, supportedDialects.draft, languages, toolingTypes]
//!   exclusions:
//!     supportedDialects.draft: [1, 2, 3]
//!   draft_order: true
//! output:
//!   format: auto
//! base_url: https://json-schema.org/tools
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_BASE_URL, DEFAULT_VALUE_FIELDS};
pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};
pub use types::{AppConfig, AppConfigBuilder, CatalogConfig, OutputConfig, ValuesConfig};
pub use validation::{ConfigError, Validatable};

/// JSON Schema for the config file format, for editor validation and
/// autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
