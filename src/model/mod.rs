//! Catalog data model.
//!
//! [`Tool`] is the record every other module works on. Records are created
//! by the catalog loader and never mutated afterwards; the pipeline shares
//! them as `Arc<Tool>`.

mod draft;
pub mod lenient;
mod tool;

pub use draft::{compare_drafts, draft_position, sort_by_draft_order, DRAFT_ORDER, LEGACY_DRAFTS};
pub use tool::{Bowtie, Compliance, ComplianceConfig, Person, SupportedDialects, Tool};
