//! Configuration validation.

use super::types::{AppConfig, OutputConfig, ValuesConfig};
use crate::search::SearchOptions;
use url::Url;

// ============================================================================
// Configuration Error
// ============================================================================

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.search.validate());
        errors.extend(self.values.validate());
        errors.extend(self.output.validate());

        match Url::parse(&self.base_url) {
            Ok(url) if url.cannot_be_a_base() => errors.push(ConfigError::new(
                "base_url",
                format!("'{}' cannot carry a path and query", self.base_url),
            )),
            Ok(_) => {}
            Err(e) => errors.push(ConfigError::new(
                "base_url",
                format!("'{}' is not a valid URL: {e}", self.base_url),
            )),
        }

        errors
    }
}

impl Validatable for SearchOptions {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(0.0..=1.0).contains(&self.threshold) {
            errors.push(ConfigError::new(
                "search.threshold",
                format!("Threshold must be between 0.0 and 1.0, got {}", self.threshold),
            ));
        }
        if self.distance == 0 {
            errors.push(ConfigError::new("search.distance", "Distance must be greater than 0"));
        }
        errors
    }
}

impl Validatable for ValuesConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.fields.is_empty() {
            errors.push(ConfigError::new("values.fields", "At least one field is required"));
        }
        for field in &self.fields {
            if field.is_empty() || field.split('.').any(str::is_empty) {
                errors.push(ConfigError::new(
                    "values.fields",
                    format!("'{field}' is not a valid dotted field path"),
                ));
            }
        }
        for field in self.exclusions.keys() {
            if !self.fields.contains(field) {
                tracing::debug!(field = %field, "Exclusions for a field that is not indexed");
            }
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(file) = &self.file {
            if file.as_os_str().is_empty() {
                errors.push(ConfigError::new("output.file", "Output file path is empty"));
            }
            if file.is_dir() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("{} is a directory", file.display()),
                ));
            }
        }
        errors
    }
}
