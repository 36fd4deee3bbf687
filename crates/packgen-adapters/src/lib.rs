//! Infrastructure adapters for packgen.
//!
//! This crate implements the ports defined in `packgen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod graph_loader;
pub mod renderer;
pub mod starter;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use graph_loader::{GraphLoader, GraphManifest, MANIFEST_FILE_NAME};
pub use renderer::PackageManifestRenderer;
pub use starter::starter_manifest;
