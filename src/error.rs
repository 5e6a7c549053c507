//! Unified error types for lolreg.
//!
//! Normalization, tree building and index building are infallible; errors
//! only arise at the edges: loading record files, reading configuration and
//! looking records up by id.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lolreg operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LolregError {
    /// Errors while loading or parsing record files
    #[error("Failed to load records: {context}")]
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

    /// Two records resolved to the same identifier
    #[error("Duplicate record id '{id}' (from {first:?} and {second:?})")]
    DuplicateId {
        id: String,
        first: Option<PathBuf>,
        second: Option<PathBuf>,
    },

    /// A record id that does not exist in the store
    #[error("No record with id '{0}'")]
    NotFound(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific load error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for lolreg operations
pub type Result<T> = std::result::Result<T, LolregError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl LolregError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create a load error for a missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::load(
            "missing required field",
            LoadErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<serde_yaml_ng::Error> for LolregError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::load(
            "YAML deserialization",
            LoadErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained outermost first, so an error raised while
/// parsing one file inside a directory load reads
/// `"loading data/: parsing run-key.yml: YAML deserialization"`.
///
/// # Example
///
/// ```ignore
/// use lolreg::error::ErrorContext;
///
/// let record = parse_record_str(&id, &content)
///     .with_context(|| format!("parsing {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<LolregError>> ErrorContext<T> for std::result::Result<T, E> {
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

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: LolregError, new_ctx: &str) -> LolregError {
    match err {
        LolregError::Load {
            context: existing,
            source,
        } => LolregError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        LolregError::Io {
            path,
            message,
            source,
        } => LolregError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        LolregError::Config(msg) => LolregError::Config(chain_context(new_ctx, &msg)),
        LolregError::Validation(msg) => LolregError::Validation(chain_context(new_ctx, &msg)),
        other @ (LolregError::DuplicateId { .. } | LolregError::NotFound(_)) => other,
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| LolregError::validation(context))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| LolregError::validation(f()))
    }
}
