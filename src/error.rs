//! Unified error types for tooling-catalog.
//!
//! Only loading and configuration can fail. The view pipeline itself is
//! infallible: missing fields and unknown preference values degrade to
//! "does not participate" or to documented defaults instead of erroring.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tooling-catalog operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CatalogError {
    /// Errors while loading a catalog document
    #[error("Failed to load catalog: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Lookup errors (unknown tool name, unknown field)
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Specific load error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Invalid YAML: {0}")]
    InvalidYaml(String),

    #[error("Expected a sequence of tool entries at the document root")]
    NotASequence,

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

/// Convenient Result type for tooling-catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for CatalogError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::load("YAML deserialization", LoadErrorKind::InvalidYaml(err.to_string()))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::load("JSON deserialization", LoadErrorKind::InvalidJson(err.to_string()))
    }
}

/// Extension trait for adding context to errors.
///
/// Context is prepended to whatever context the error already carries, so a
/// chain reads outermost first: `"loading catalog: reading file: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<CatalogError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: CatalogError, new_ctx: &str) -> CatalogError {
    match err {
        CatalogError::Load {
            context: existing,
            source,
        } => CatalogError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CatalogError::Io {
            path,
            message,
            source,
        } => CatalogError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        CatalogError::Config(msg) => CatalogError::Config(chain_context(new_ctx, &msg)),
        CatalogError::NotFound(msg) => CatalogError::NotFound(chain_context(new_ctx, &msg)),
    }
}

/// Returns "`new`: `existing`", or just `new` when nothing came before.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
