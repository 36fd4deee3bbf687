//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No graph manifest at the given location.
    #[error("Graph manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// The manifest exists but could not be parsed or converted.
    #[error("Invalid graph manifest {path}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    /// Rendering a module failed.
    #[error("Rendering module '{module}' failed: {reason}")]
    RenderingFailed { module: String, reason: String },

    /// Two modules resolve to the same directory.
    #[error("Modules '{first}' and '{second}' both resolve to {path}")]
    PathConflict {
        path: PathBuf,
        first: String,
        second: String,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Lock on shared state was poisoned.
    #[error("Internal state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ManifestNotFound { path } => vec![
                format!("No manifest at {}", path.display()),
                "Run `packgen init` to create a starter manifest".into(),
                "Or pass the manifest path explicitly".into(),
            ],
            Self::ManifestInvalid { reason, .. } => vec![
                format!("Fix the manifest: {reason}"),
                "Run `packgen init` in an empty directory to see a working example".into(),
            ],
            Self::PathConflict { first, second, .. } => vec![
                format!("Give '{first}' or '{second}' a different subpath or path"),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::LockPoisoned => vec!["Try again; a previous operation panicked".into()],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ManifestNotFound { .. } => ErrorCategory::NotFound,
            Self::ManifestInvalid { .. } | Self::PathConflict { .. } => ErrorCategory::Validation,
            Self::RenderingFailed { .. }
            | Self::FilesystemError { .. }
            | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
