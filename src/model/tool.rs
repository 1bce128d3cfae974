//! The catalog entry record.

use super::lenient::{scalar_string, string_list};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One piece of third-party software listed in the catalog.
///
/// Every field except `name` is optional. Records are loaded once and shared
/// read-only (as `Arc<Tool>`) by every pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Display identity, used as the search and default sort key
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category tags; a tool may carry several
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Option::is_none")]
    pub tooling_types: Option<Vec<String>>,
    /// Implementation languages
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    /// Runtime environments (e.g. "Web (Online)", "Command Line")
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Option::is_none")]
    pub environments: Option<Vec<String>>,
    /// SPDX-style license identifier
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Source repository URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Project homepage URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_dialects: Option<SupportedDialects>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bowtie: Option<Bowtie>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<Compliance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooling_listing_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creators: Option<Vec<Person>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<Vec<Person>>,
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Option::is_none")]
    pub depends_on_validators: Option<Vec<String>>,
    /// Keys this struct does not model, kept verbatim for the detail view
    /// and for dotted-path lookups
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Specification versions a tool supports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportedDialects {
    /// Draft identifiers, normalized to strings
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Option::is_none")]
    pub draft: Option<Vec<String>>,
    /// Non-draft dialects; opaque to the pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional: Option<Value>,
}

/// Link to the tool's Bowtie compliance report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bowtie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compliance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ComplianceConfig>,
}

/// How to configure the tool for standards-compliant behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// A creator or maintainer handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl Person {
    /// "username (platform)", falling back to whichever parts exist.
    #[must_use]
    pub fn display(&self) -> String {
        let handle = self
            .username
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("unknown");
        match &self.platform {
            Some(platform) => format!("{handle} ({platform})"),
            None => handle.to_string(),
        }
    }
}

impl Tool {
    /// Create a tool with only a name set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            tooling_types: None,
            languages: None,
            environments: None,
            license: None,
            source: None,
            homepage: None,
            supported_dialects: None,
            bowtie: None,
            compliance: None,
            tooling_listing_notes: None,
            creators: None,
            maintainers: None,
            last_updated: None,
            depends_on_validators: None,
            extra: BTreeMap::new(),
        }
    }

    /// Supported draft identifiers, if the tool lists any.
    #[must_use]
    pub fn drafts(&self) -> Option<&[String]> {
        self.supported_dialects
            .as_ref()
            .and_then(|d| d.draft.as_deref())
    }

    /// Bowtie report URL, when the tool has a Bowtie identifier.
    #[must_use]
    pub fn bowtie_url(&self) -> Option<String> {
        self.bowtie
            .as_ref()
            .and_then(|b| b.identifier.as_deref())
            .map(|id| format!("https://bowtie.report/#/implementations/{id}"))
    }

    // Builder-style setters, mostly for tests and fixtures.

    #[must_use]
    pub fn with_languages(mut self, languages: &[&str]) -> Self {
        self.languages = Some(to_owned_list(languages));
        self
    }

    #[must_use]
    pub fn with_tooling_types(mut self, types: &[&str]) -> Self {
        self.tooling_types = Some(to_owned_list(types));
        self
    }

    #[must_use]
    pub fn with_environments(mut self, environments: &[&str]) -> Self {
        self.environments = Some(to_owned_list(environments));
        self
    }

    #[must_use]
    pub fn with_license(mut self, license: &str) -> Self {
        self.license = Some(license.to_string());
        self
    }

    #[must_use]
    pub fn with_drafts(mut self, drafts: &[&str]) -> Self {
        let dialects = self.supported_dialects.get_or_insert_with(SupportedDialects::default);
        dialects.draft = Some(to_owned_list(drafts));
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
