//! Application layer for packgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService, GraphService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All graph rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    GenerateOptions, GenerateService, GenerationReport, GraphService, GraphSummary, ModuleInfo,
    ModuleReport, TargetInfo,
};

pub use ports::{Filesystem, GraphDefinition, GraphSource, ModuleRenderer};

pub use error::ApplicationError;
