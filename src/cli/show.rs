//! Show command handler.
//!
//! Implements the `show` subcommand: the detail view of one tool.

use crate::error::CatalogError;
use crate::pipeline::{exit_codes, load_catalog_with_context, write_output, OutputTarget};
use crate::render::DetailSelection;
use anyhow::Result;
use std::path::PathBuf;

/// Settings for one `show` invocation.
#[derive(Debug, Clone)]
pub struct ShowCommand {
    pub catalog_path: PathBuf,
    /// Tool name, matched case-insensitively
    pub name: String,
    pub json: bool,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
}

/// Run the show command
pub fn run_show(command: ShowCommand) -> Result<i32> {
    let loaded = load_catalog_with_context(&command.catalog_path, command.quiet)?;
    let tool = loaded
        .catalog
        .find_by_name(&command.name)
        .cloned()
        .ok_or_else(|| CatalogError::not_found(format!("No tool named '{}'", command.name)))?;

    let content = if command.json {
        serde_json::to_string_pretty(tool.as_ref())?
    } else {
        let mut selection = DetailSelection::new();
        selection.open(tool);
        selection.render().unwrap_or_default()
    };

    write_output(
        &content,
        &OutputTarget::from_option(command.output_file),
        command.quiet,
    )?;
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_file() -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().expect("tempdir");
        std::fs::write(
            dir.path().join("tooling-data.yaml"),
            "- name: Ajv\n  license: MIT\n  toolingTypes: [validator]\n",
        )
        .expect("write");
        dir
    }

    #[test]
    fn test_show_writes_detail() {
        let dir = catalog_file();
        let out = dir.path().join("ajv.txt");
        let code = run_show(ShowCommand {
            catalog_path: dir.path().join("tooling-data.yaml"),
            name: "ajv".to_string(),
            json: false,
            output_file: Some(out.clone()),
            quiet: true,
        })
        .expect("show");
        assert_eq!(code, exit_codes::SUCCESS);
        let detail = std::fs::read_to_string(out).expect("read");
        assert!(detail.starts_with("Ajv\n===\n"));
        assert!(detail.contains("MIT"));
    }

    #[test]
    fn test_show_unknown_tool() {
        let dir = catalog_file();
        let err = run_show(ShowCommand {
            catalog_path: dir.path().join("tooling-data.yaml"),
            name: "nope".to_string(),
            json: false,
            output_file: None,
            quiet: true,
        })
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::NotFound(_))
        ));
    }
}
