//! Values command handler.
//!
//! Implements the `values` subcommand: the distinct values per field that
//! filter checkbox lists are built from.

use crate::config::ValuesConfig;
use crate::extract::UniqueValues;
use crate::pipeline::{
    auto_detect_format, exit_codes, load_catalog_with_context, write_output, OutputFormat,
    OutputTarget,
};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::path::PathBuf;

/// Settings for one `values` invocation.
#[derive(Debug, Clone)]
pub struct ValuesCommand {
    pub catalog_path: PathBuf,
    /// Index configuration after CLI overrides
    pub values: ValuesConfig,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
}

/// Run the values command
pub fn run_values(command: ValuesCommand) -> Result<i32> {
    let loaded = load_catalog_with_context(&command.catalog_path, command.quiet)?;
    let uniques = loaded.unique_values(&command.values);
    tracing::debug!(fields = uniques.len(), "Collected unique values");

    let target = OutputTarget::from_option(command.output_file);
    let content = match auto_detect_format(command.format, &target) {
        OutputFormat::Table | OutputFormat::Auto => render_values_text(&uniques),
        OutputFormat::Csv => render_values_csv(&uniques),
        OutputFormat::Json => {
            let map: IndexMap<&str, &[String]> = uniques.iter().collect();
            serde_json::to_string_pretty(&map).context("Failed to serialize values")?
        }
    };
    write_output(&content, &target, command.quiet)?;
    Ok(exit_codes::SUCCESS)
}

fn render_values_text(uniques: &UniqueValues) -> String {
    let mut out = String::new();
    for (field, values) in uniques.iter() {
        out.push_str(&format!("{field} ({})\n", values.len()));
        for value in values {
            out.push_str(&format!("  {value}\n"));
        }
    }
    out
}

fn render_values_csv(uniques: &UniqueValues) -> String {
    let mut out = String::from("Field,Value\n");
    for (field, values) in uniques.iter() {
        for value in values {
            out.push_str(&format!(
                "{},{}\n",
                crate::render::csv_escape(field),
                crate::render::csv_escape(value)
            ));
        }
    }
    out
}
