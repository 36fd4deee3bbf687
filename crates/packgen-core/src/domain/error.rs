// ============================================================================
// domain/error.rs - GRAPH AND MODEL ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so a diagnosis can be reported and kept)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Graph validation failures (one is reported per validation run)
    // ========================================================================
    #[error("module '{module}' depends on '{dependency}', which is not in the graph")]
    MissingDependency { module: String, dependency: String },

    #[error("module '{module}' exports '{export}', which is not in the graph")]
    MissingExport { module: String, export: String },

    #[error("module '{module}' exports '{export}' without depending on it")]
    ExportNotInDependencies { module: String, export: String },

    #[error("module '{module}' declares dependencies for target '{target}', which it does not have")]
    InvalidTarget { module: String, target: String },

    #[error("cyclic dependency detected at '{vertex}': {}", cycle.join(" -> "))]
    CyclicDependency { vertex: String, cycle: Vec<String> },

    // ========================================================================
    // Construction errors
    // ========================================================================
    #[error("module '{name}' appears more than once in the graph")]
    DuplicateModule { name: String },

    #[error("Invalid module: {0}")]
    InvalidModule(String),

    #[error("Invalid platform: {0}")]
    InvalidPlatform(String),

    #[error("Invalid module type: {0}")]
    InvalidModuleType(String),

    #[error("Invalid product kind: {0}")]
    InvalidProductKind(String),

    #[error("Invalid dependency reference: {0}")]
    InvalidDependency(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Rendered structure errors
    // ========================================================================
    #[error("Duplicate path in rendered output: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute path not allowed in rendered output: {path}")]
    AbsolutePathNotAllowed { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingDependency { module, dependency } => vec![
                format!("Add a module named '{dependency}' to the graph"),
                format!("Or remove the dependency from '{module}'"),
                "Check global dependencies in [[global_dependencies]] too".into(),
            ],
            Self::MissingExport { module, export } => vec![
                format!("Add a module named '{export}' to the graph"),
                format!("Or remove '{export}' from the exports of '{module}'"),
            ],
            Self::ExportNotInDependencies { module, export } => vec![
                format!("Add a dependency on '{export}' to one of the targets of '{module}'"),
                format!("Or stop exporting '{export}'"),
            ],
            Self::InvalidTarget { module, target } => vec![
                format!("Add '{target}' to the targets of '{module}'"),
                format!("Or move the dependencies declared for '{target}' to a declared target"),
            ],
            Self::CyclicDependency { cycle, .. } => vec![
                format!("Cycle: {}", cycle.join(" -> ")),
                "Break the cycle by moving shared code into an interface or utility module".into(),
            ],
            Self::DuplicateModule { name } => vec![
                format!("Module names are unique; rename one of the '{name}' modules"),
            ],
            Self::InvalidPlatform(_) => vec![
                "Platforms look like \"iOS 17\" or \"macOS 15.2\"".into(),
                "Known families: macOS, iOS, tvOS, watchOS, visionOS, linux".into(),
            ],
            Self::InvalidModuleType(_) => vec![
                "Known module types: client, coordinator, macro, screen, utility, root".into(),
            ],
            Self::InvalidProductKind(_) => vec![
                "Known products: executable, library, macro, plugin, none".into(),
            ],
            Self::InvalidDependency(_) => vec![
                "Dependencies look like \"Module\" or \"Module:target\"".into(),
            ],
            Self::DuplicatePath { path } => vec![
                format!("Two modules resolve to files at '{path}'"),
                "Give the modules distinct names or locations".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingDependency { .. }
            | Self::MissingExport { .. }
            | Self::ExportNotInDependencies { .. }
            | Self::InvalidTarget { .. }
            | Self::CyclicDependency { .. }
            | Self::DuplicateModule { .. } => ErrorCategory::Graph,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Graph,
}
