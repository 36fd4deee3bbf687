pub mod configuration;
pub mod dependency;
pub mod graph;
pub mod module;
pub mod node;
pub mod project_structure;

pub use crate::domain::DomainError;
pub use configuration::{DirectoryConfiguration, PackageConfiguration, PackageConfigurationBuilder};
pub use dependency::{DependencyKey, ModuleDependency, ModuleTargetType};
pub use graph::ModuleGraph;
pub use module::{ExternalDependency, MacroConfiguration, Module, ModuleLocation};
pub use node::ModuleNode;
pub use project_structure::ProjectStructure;
