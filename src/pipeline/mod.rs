//! Pipeline orchestration for catalog commands.
//!
//! Shared load and output logic for the `view`, `values` and `show`
//! handlers, so each handler only decides what to render.

mod load;
mod output;

pub use load::{build_unique_values, load_catalog_with_context, LoadedCatalog};
pub use output::{auto_detect_format, write_output, OutputFormat, OutputTarget};

/// Exit codes for scripting
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// The view matched no tools (with --fail-on-empty)
    pub const EMPTY_VIEW: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::EMPTY_VIEW, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
