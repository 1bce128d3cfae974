//! Configuration types for tooling-catalog.

use crate::extract::{fields, Exclusions};
use crate::model::lenient::flatten_to_strings;
use crate::pipeline::OutputFormat;
use crate::search::SearchOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration, loaded from a config file and
/// overridden by CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Where the catalog lives
    pub catalog: CatalogConfig,
    /// Fuzzy search tuning
    pub search: SearchOptions,
    /// Unique-value index (filter option lists)
    pub values: ValuesConfig,
    /// Output format and destination
    pub output: OutputConfig,
    /// Page URL that preference query strings are appended to
    pub base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            search: SearchOptions::default(),
            values: ValuesConfig::default(),
            output: OutputConfig::default(),
            base_url: super::defaults::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.catalog.path = Some(path.into());
        self
    }

    pub const fn search(mut self, options: SearchOptions) -> Self {
        self.config.search = options;
        self
    }

    pub const fn search_threshold(mut self, threshold: f64) -> Self {
        self.config.search.threshold = threshold;
        self
    }

    pub fn value_fields(mut self, fields: &[&str]) -> Self {
        self.config.values.fields = fields.iter().map(ToString::to_string).collect();
        self
    }

    pub fn exclude(mut self, field: &str, value: impl ToString) -> Self {
        self.config
            .values
            .exclusions
            .entry(field.to_string())
            .or_default()
            .push(value.to_string());
        self
    }

    pub const fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog YAML file used when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Which fields get filter option lists, and which values to hide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ValuesConfig {
    /// Field paths to index, in display order
    pub fields: Vec<String>,
    /// Values to leave out, per field path. Numbers and strings are
    /// interchangeable: `[1, 2]` equals `["1", "2"]`.
    #[serde(deserialize_with = "lenient_exclusions")]
    pub exclusions: BTreeMap<String, Vec<String>>,
    /// List drafts in release order instead of lexically
    pub draft_order: bool,
}

impl Default for ValuesConfig {
    fn default() -> Self {
        let mut exclusions = BTreeMap::new();
        exclusions.insert(
            fields::DRAFTS.to_string(),
            crate::model::LEGACY_DRAFTS
                .iter()
                .map(ToString::to_string)
                .collect(),
        );
        Self {
            fields: super::defaults::DEFAULT_VALUE_FIELDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            exclusions,
            draft_order: true,
        }
    }
}

impl ValuesConfig {
    /// Exclusion set in the form the unique-value index takes.
    #[must_use]
    pub fn exclusion_set(&self) -> Exclusions {
        self.exclusions
            .iter()
            .flat_map(|(field, values)| values.iter().map(move |v| (field.as_str(), v)))
            .collect()
    }

    /// Field paths as borrowed strings.
    #[must_use]
    pub fn field_refs(&self) -> Vec<&str> {
        self.fields.iter().map(String::as_str).collect()
    }
}

fn lenient_exclusions<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(field, value)| (field, flatten_to_strings(&value)))
        .collect())
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// auto, table, json or csv
    pub format: OutputFormat,
    /// Write to this file instead of stdout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://json-schema.org/tools");
        assert_eq!(
            config.values.fields,
            vec!["license", "supportedDialects.draft", "languages", "toolingTypes"]
        );
        assert!(config.values.draft_order);
        let exclusions = config.values.exclusion_set();
        assert!(exclusions.contains(fields::DRAFTS, "1"));
        assert!(exclusions.contains(fields::DRAFTS, "3"));
        assert!(!exclusions.contains(fields::DRAFTS, "4"));
    }

    #[test]
    fn test_numeric_exclusions_in_yaml() {
        let yaml = "values:\n  exclusions:\n    supportedDialects.draft: [1, 2, \"2019-09\"]\n    license: GPL-3.0\n";
        let config: AppConfig = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(
            config.values.exclusions[fields::DRAFTS],
            vec!["1", "2", "2019-09"]
        );
        assert_eq!(config.values.exclusions[fields::LICENSE], vec!["GPL-3.0"]);
        // Unset siblings keep their defaults
        assert!(config.values.draft_order);
        assert_eq!(config.values.fields.len(), 4);
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .catalog_path("data/tooling-data.yaml")
            .search_threshold(0.2)
            .value_fields(&["languages"])
            .exclude("languages", "COBOL")
            .output_format(OutputFormat::Json)
            .base_url("http://localhost:3000/tools")
            .build();
        assert_eq!(config.catalog.path, Some(PathBuf::from("data/tooling-data.yaml")));
        assert!((config.search.threshold - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.values.fields, vec!["languages"]);
        assert!(config.values.exclusion_set().contains("languages", "COBOL"));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.base_url, "http://localhost:3000/tools");
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = AppConfig::default();
        let yaml = serde_yaml::to_string(&config).expect("serialize");
        let back: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(back, config);
    }
}
