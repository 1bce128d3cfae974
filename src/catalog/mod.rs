//! Catalog loading.
//!
//! A catalog document is a YAML sequence of tool mappings. Loading is
//! tolerant at the entry level: an entry that fails to deserialize (no
//! `name`, wrong shape) is skipped and reported, and the rest of the catalog
//! still loads. A document whose root is not a sequence is an error.

use crate::error::{CatalogError, ErrorContext, LoadErrorKind, Result};
use crate::model::Tool;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// An immutable snapshot of the catalog.
///
/// Cloning is cheap; records are shared. Replacing the catalog means building
/// a new `Catalog`, which the view layer detects by pointer identity.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Catalog {
    tools: Vec<Arc<Tool>>,
}

impl Catalog {
    pub fn from_tools(tools: impl IntoIterator<Item = Tool>) -> Self {
        Self {
            tools: tools.into_iter().map(Arc::new).collect(),
        }
    }

    /// Shared records in catalog order.
    #[must_use]
    pub fn tools(&self) -> &[Arc<Tool>] {
        &self.tools
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Case-insensitive lookup by exact name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Arc<Tool>> {
        let needle = name.to_lowercase();
        self.tools.iter().find(|t| t.name.to_lowercase() == needle)
    }
}

/// An entry that was dropped while loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    /// Zero-based position in the source sequence
    pub index: usize,
    pub reason: String,
}

/// Outcome of a load beyond the catalog itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl LoadReport {
    #[must_use]
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Parse a catalog from YAML text.
pub fn parse_catalog_str(content: &str) -> Result<(Catalog, LoadReport)> {
    let root: serde_yaml::Value = serde_yaml::from_str(content)?;

    let entries = match root {
        serde_yaml::Value::Sequence(entries) => entries,
        // An empty document is an empty catalog
        serde_yaml::Value::Null => Vec::new(),
        _ => {
            return Err(CatalogError::load(
                "catalog root",
                LoadErrorKind::NotASequence,
            ))
        }
    };

    let mut report = LoadReport::default();
    let mut tools = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        match serde_yaml::from_value::<Tool>(entry) {
            Ok(tool) => tools.push(tool),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed catalog entry");
                report.skipped.push(SkippedEntry {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    report.loaded = tools.len();
    Ok((Catalog::from_tools(tools), report))
}

/// Read and parse a catalog file.
pub fn load_catalog(path: &Path) -> Result<(Catalog, LoadReport)> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    let (catalog, report) =
        parse_catalog_str(&content).with_context(|| format!("{}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "Loaded catalog"
    );
    Ok((catalog, report))
}
