//! Unified error types for attack-diff.
//!
//! Fatal conditions (unreadable bundles, duplicate identifiers, report
//! failures) are reported through [`AttackDiffError`]. Per-identifier
//! problems found while classifying are not errors at this level: they are
//! collected as [`Diagnostic`](crate::diff::Diagnostic)s on the result.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for attack-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AttackDiffError {
    /// Errors while reading a STIX bundle
    #[error("Failed to parse bundle: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors while building snapshots or classifying
    #[error("Diff computation failed: {context}")]
    Diff {
        context: String,
        #[source]
        source: DiffErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
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

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Not a STIX bundle: {0}")]
    NotABundle(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Invalid {stix_type} object: {message}")]
    InvalidObject { stix_type: String, message: String },
}

/// Specific diff error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiffErrorKind {
    #[error("Duplicate identifier in snapshot: {id}")]
    DuplicateIdentifier { id: String },

    #[error("No object kinds or domains selected")]
    EmptySelection,
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Layer output expects {expected} file(s), got {actual}")]
    LayerFileCount { expected: usize, actual: usize },

    #[error("Output format not supported for this operation: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Other(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for attack-diff operations
pub type Result<T> = std::result::Result<T, AttackDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl AttackDiffError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for a document that is not a bundle
    pub fn not_a_bundle(reason: impl Into<String>) -> Self {
        Self::parse("reading bundle", ParseErrorKind::NotABundle(reason.into()))
    }

    /// Create a parse error for missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::parse(
            "missing required field",
            ParseErrorKind::MissingField {
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

    /// Create a diff error
    pub fn diff(context: impl Into<String>, source: DiffErrorKind) -> Self {
        Self::Diff {
            context: context.into(),
            source,
        }
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for AttackDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AttackDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<crate::reports::ReportError> for AttackDiffError {
    fn from(err: crate::reports::ReportError) -> Self {
        use crate::reports::ReportError;
        match err {
            ReportError::IoError(e) => Self::from(e),
            ReportError::SerializationError(msg) => Self::report(
                "serializing report",
                ReportErrorKind::JsonSerializationError(msg),
            ),
            ReportError::LayerFileCount { expected, actual } => Self::report(
                "writing layers",
                ReportErrorKind::LayerFileCount { expected, actual },
            ),
            ReportError::UnsupportedFormat(format) => Self::report(
                "selecting reporter",
                ReportErrorKind::UnsupportedFormat(format),
            ),
            other => Self::report("rendering report", ReportErrorKind::Other(other.to_string())),
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The new context is prepended to whatever context the error already
/// carries, so a chain such as `"loading old release: enterprise-attack:
/// reading bundle"` shows the path through the code.
///
/// ```ignore
/// use attack_diff::error::ErrorContext;
///
/// let bundle = parse_bundle_str(&content)
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

impl<T, E: Into<AttackDiffError>> ErrorContext<T> for std::result::Result<T, E> {
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
fn add_context_to_error(err: AttackDiffError, new_ctx: &str) -> AttackDiffError {
    match err {
        AttackDiffError::Parse {
            context: existing,
            source,
        } => AttackDiffError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AttackDiffError::Diff {
            context: existing,
            source,
        } => AttackDiffError::Diff {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AttackDiffError::Report {
            context: existing,
            source,
        } => AttackDiffError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AttackDiffError::Io {
            path,
            message,
            source,
        } => AttackDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        AttackDiffError::Config(msg) => AttackDiffError::Config(chain_context(new_ctx, &msg)),
        AttackDiffError::Validation(msg) => {
            AttackDiffError::Validation(chain_context(new_ctx, &msg))
        }
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
        self.ok_or_else(|| AttackDiffError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| AttackDiffError::Validation(f().into()))
    }
}
