//! Unified error handling for packgen core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for packgen core operations.
#[derive(Debug, Error, Clone)]
pub enum PackgenError {
    /// Errors from the domain layer (graph defects, invalid values).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (loading, rendering, writing).
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl PackgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Graph => ErrorCategory::Graph,
            },
            Self::Application(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Graph,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type PackgenResult<T> = Result<T, PackgenError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn domain_categories_are_preserved() {
        let err: PackgenError = DomainError::CyclicDependency {
            vertex: "A:main".into(),
            cycle: vec!["A:main".into(), "A:main".into()],
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Graph);
    }

    #[test]
    fn every_graph_defect_shares_one_category() {
        let defects = [
            DomainError::MissingDependency {
                module: "Screen".into(),
                dependency: "Ghost".into(),
            },
            DomainError::MissingExport {
                module: "Screen".into(),
                export: "Ghost".into(),
            },
            DomainError::ExportNotInDependencies {
                module: "Screen".into(),
                export: "Client".into(),
            },
            DomainError::InvalidTarget {
                module: "Screen".into(),
                target: "Foo".into(),
            },
        ];
        for defect in defects {
            assert_eq!(PackgenError::from(defect).category(), ErrorCategory::Graph);
        }
    }

    #[test]
    fn missing_manifest_is_not_found() {
        let err: PackgenError = ApplicationError::ManifestNotFound {
            path: PathBuf::from("packgen.toml"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("packgen init")));
    }
}
