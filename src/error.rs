//! Error types for swift-template.
//!
//! All operations return `Result<T>` which aliases `Result<T, TemplateError>`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from template instantiation.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Invalid package name.
    #[error("Invalid package name '{0}': {1}")]
    InvalidName(String, String),

    /// Template directory is missing or malformed.
    #[error("Invalid template '{0}': {1}")]
    InvalidTemplate(PathBuf, String),

    /// Destination exists and is not an empty directory.
    #[error("Destination already exists and is not empty: {0}")]
    DestinationExists(PathBuf),

    /// Manifest has no `.target(` declaration to rewrite from.
    #[error("Missing target outline in manifest: {0}")]
    MissingTargetMarker(PathBuf),

    /// Template `Sources/` holds no target directories.
    #[error("No targets found in {0}")]
    EmptyTargetSet(PathBuf),

    /// Original package name does not match any discovered target.
    #[error("No target named '{0}' in template sources")]
    NoPrimaryTarget(String),

    /// Run finished but some steps recorded failures.
    #[error("Template instantiated with {0} failed step(s)")]
    Incomplete(usize),

    /// File system operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Regex compilation failed (indicates bug).
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Unexpected error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TemplateError {
    /// Wraps an I/O error with the action and path that produced it.
    pub fn io(action: &str, path: &std::path::Path, err: std::io::Error) -> Self {
        TemplateError::Io(std::io::Error::new(
            err.kind(),
            format!("Failed to {} {}: {}", action, path.display(), err),
        ))
    }
}

/// Result type alias for swift-template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;
