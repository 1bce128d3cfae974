//! Catalog loading for command handlers.

use crate::catalog::{load_catalog, Catalog, LoadReport};
use crate::config::ValuesConfig;
use crate::extract::{fields, unique_values_per_field, UniqueValues};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A loaded catalog with where it came from and what was skipped.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub path: PathBuf,
    pub catalog: Arc<Catalog>,
    pub report: LoadReport,
}

impl LoadedCatalog {
    /// Filter option lists for this catalog.
    #[must_use]
    pub fn unique_values(&self, config: &ValuesConfig) -> UniqueValues {
        build_unique_values(&self.catalog, config)
    }
}

/// Load a catalog with context for error messages
pub fn load_catalog_with_context(path: &Path, quiet: bool) -> Result<LoadedCatalog> {
    if !quiet {
        tracing::info!("Loading catalog: {}", path.display());
    }

    let (catalog, report) = load_catalog(path)
        .with_context(|| format!("Failed to load catalog: {}", path.display()))?;

    if report.has_skipped() && !quiet {
        tracing::warn!(
            "Skipped {} malformed entries in {}",
            report.skipped.len(),
            path.display()
        );
    }

    Ok(LoadedCatalog {
        path: path.to_path_buf(),
        catalog: Arc::new(catalog),
        report,
    })
}

/// Unique values per configured field, excluding configured values.
#[must_use]
pub fn build_unique_values(catalog: &Catalog, config: &ValuesConfig) -> UniqueValues {
    let mut uniques = unique_values_per_field(
        catalog.iter(),
        &config.field_refs(),
        &config.exclusion_set(),
    );
    if config.draft_order {
        uniques.sort_field_by_draft_order(fields::DRAFTS);
    }
    uniques
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tool;

    #[test]
    fn test_load_missing_file_has_context() {
        let err = load_catalog_with_context(Path::new("/nonexistent/tooling-data.yaml"), true)
            .unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load catalog"));
    }

    #[test]
    fn test_load_reports_skipped() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("tooling-data.yaml");
        std::fs::write(&path, "- name: Ajv\n- description: no name\n").expect("write");

        let loaded = load_catalog_with_context(&path, true).expect("load");
        assert_eq!(loaded.catalog.len(), 1);
        assert_eq!(loaded.report.skipped.len(), 1);
        assert_eq!(loaded.report.skipped[0].index, 1);
    }

    #[test]
    fn test_unique_values_use_draft_order_and_exclusions() {
        let catalog = Catalog::from_tools([
            Tool::new("a").with_drafts(&["2020-12", "4", "1"]),
            Tool::new("b").with_drafts(&["7", "2019-09"]),
        ]);
        let uniques = build_unique_values(&catalog, &ValuesConfig::default());
        assert_eq!(uniques.get(fields::DRAFTS), ["4", "7", "2019-09", "2020-12"]);

        let lexical = ValuesConfig {
            draft_order: false,
            ..ValuesConfig::default()
        };
        let uniques = build_unique_values(&catalog, &lexical);
        assert_eq!(uniques.get(fields::DRAFTS), ["2019-09", "2020-12", "4", "7"]);
    }
}
