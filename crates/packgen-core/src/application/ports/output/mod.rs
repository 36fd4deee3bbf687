//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `packgen-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{ModuleGraph, ModuleNode, PackageConfiguration, ProjectStructure};
use crate::error::PackgenResult;

/// A module graph together with the configuration it resolves against.
#[derive(Debug, Clone)]
pub struct GraphDefinition {
    pub configuration: PackageConfiguration,
    pub graph: ModuleGraph,
}

/// Port for obtaining the graph of one generation run.
///
/// Implemented by:
/// - `packgen_adapters::GraphLoader` (TOML manifests)
#[cfg_attr(test, mockall::automock)]
pub trait GraphSource: Send + Sync {
    /// Load the graph and its configuration. The graph is not validated.
    fn load(&self) -> PackgenResult<GraphDefinition>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `packgen_adapters::filesystem::LocalFilesystem` (production)
/// - `packgen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> PackgenResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> PackgenResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> PackgenResult<()>;
}

/// Port for turning a validated graph into files.
///
/// Implementations must take resolved dependencies from
/// `ModuleNode::dependencies` rather than merging sources themselves.
///
/// Implemented by:
/// - `packgen_adapters::renderer::PackageManifestRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait ModuleRenderer: Send + Sync {
    /// File name of the manifest inside each module directory.
    fn manifest_file_name(&self) -> &'static str;

    /// Render the build manifest of `node`.
    fn render_manifest(
        &self,
        node: &ModuleNode,
        graph: &ModuleGraph,
        configuration: &PackageConfiguration,
    ) -> PackgenResult<String>;

    /// Render placeholder sources and tests, relative to the module path.
    fn render_scaffold(
        &self,
        node: &ModuleNode,
        configuration: &PackageConfiguration,
    ) -> PackgenResult<ProjectStructure>;
}
