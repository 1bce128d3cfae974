//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod show;
mod values;
mod view;

pub use show::{run_show, ShowCommand};
pub use values::{run_values, ValuesCommand};
pub use view::{run_view, PreferenceOverrides, ViewCommand};
