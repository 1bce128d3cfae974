//! Output handling for rendered views.
//!
//! Provides utilities for auto-detecting output format and writing results.

use anyhow::{Context, Result};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

/// How a view is printed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table on a terminal, JSON otherwise
    #[default]
    Auto,
    /// Grouped text table
    Table,
    /// Grouped view as JSON
    Json,
    /// One row per group membership
    Csv,
}

/// Target for output - either stdout or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Check if output is to a terminal
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Resolve `Auto`: a table for interactive terminals, JSON for pipes and files.
#[must_use]
pub fn auto_detect_format(format: OutputFormat, target: &OutputTarget) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if target.is_terminal() {
                OutputFormat::Table
            } else {
                OutputFormat::Json
            }
        }
        other => other,
    }
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Output written to {}", path.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_from_option() {
        assert_eq!(OutputTarget::from_option(None), OutputTarget::Stdout);
        let path = PathBuf::from("/tmp/view.json");
        assert_eq!(
            OutputTarget::from_option(Some(path.clone())),
            OutputTarget::File(path)
        );
    }

    #[test]
    fn test_auto_detect_format_non_auto() {
        let target = OutputTarget::Stdout;
        assert_eq!(auto_detect_format(OutputFormat::Csv, &target), OutputFormat::Csv);
        assert_eq!(auto_detect_format(OutputFormat::Table, &target), OutputFormat::Table);
    }

    #[test]
    fn test_auto_detect_format_file_target() {
        let target = OutputTarget::File(PathBuf::from("/tmp/view.json"));
        // File targets are never terminals
        assert_eq!(auto_detect_format(OutputFormat::Auto, &target), OutputFormat::Json);
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("out.csv");
        write_output("a,b", &OutputTarget::File(path.clone()), true).expect("write");
        assert_eq!(std::fs::read_to_string(path).expect("read"), "a,b");
    }

    #[test]
    fn test_format_serde_names() {
        let format: OutputFormat = serde_yaml::from_str("csv").expect("parse");
        assert_eq!(format, OutputFormat::Csv);
        assert_eq!(
            serde_json::to_string(&OutputFormat::Auto).expect("serialize"),
            "\"auto\""
        );
    }
}
