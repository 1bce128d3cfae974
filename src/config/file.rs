//! Configuration file loading and discovery.

use super::types::AppConfig;
use super::validation::{ConfigError, Validatable};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".tooling-catalog.yaml",
    ".tooling-catalog.yml",
    "tooling-catalog.yaml",
    "tooling-catalog.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/tooling-catalog/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!("Config file {} does not exist, searching defaults", path.display());
    }

    let candidates = [
        std::env::current_dir().ok(),
        dirs::config_dir().map(|dir| dir.join("tooling-catalog")),
        dirs::home_dir(),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|dir| find_config_in_dir(&dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {}", format_errors(.0))]
    Invalid(Vec<ConfigError>),
}

fn format_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load and validate an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file is an all-defaults config
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigFileError::Invalid(errors));
    }
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    format!(
        r"# tooling-catalog configuration
# Place this file at .tooling-catalog.yaml in your project root or ~/.config/tooling-catalog/

{}",
        serde_yaml::to_string(&AppConfig::default()).unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::fields;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp.path().join(".tooling-catalog.yaml");
        std::fs::write(&config_path, "search:\n  threshold: 0.2\n").expect("write");

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().expect("tempdir");
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_explicit_path_wins() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("custom.yaml");
        std::fs::write(&path, "base_url: http://localhost/tools\n").expect("write");
        assert_eq!(discover_config_file(Some(&path)), Some(path));
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("config.yaml");
        let yaml = r#"
catalog:
  path: data/tooling-data.yaml
search:
  threshold: 0.2
values:
  exclusions:
    supportedDialects.draft: [1, 2, 3, 4]
output:
  format: csv
"#;
        std::fs::write(&path, yaml).expect("write");

        let config = load_config_file(&path).expect("load");
        assert_eq!(config.catalog.path, Some(PathBuf::from("data/tooling-data.yaml")));
        assert!((config.search.threshold - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.search.distance, 100, "unset key keeps its default");
        assert!(config.values.exclusion_set().contains(fields::DRAFTS, "4"));
        assert_eq!(config.output.format, crate::pipeline::OutputFormat::Csv);
    }

    #[test]
    fn test_empty_file_is_default() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "\n").expect("write");
        assert_eq!(load_config_file(&path).expect("load"), AppConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "search:\n  threshold: 3.0\n").expect("write");
        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigFileError::Invalid(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("search.threshold"));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("broken.yaml");
        std::fs::write(&path, "search: [not, a, map\n").expect("write");
        let (config, loaded_from) = load_or_default(Some(&path));
        assert_eq!(config, AppConfig::default());
        assert_eq!(loaded_from, None);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config_file(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigFileError::NotFound(_)));
    }

    #[test]
    fn test_example_config_parses() {
        let example = generate_example_config();
        let config: AppConfig = serde_yaml::from_str(&example).expect("parse");
        assert_eq!(config, AppConfig::default());
    }
}
