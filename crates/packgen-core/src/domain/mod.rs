//! Core domain layer for packgen.
//!
//! This module contains the module graph model and its validator. All I/O
//! and rendering concerns are handled via ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: Services log; entities stay pure
//! - **Immutable entities**: Built once, then only read
//! - **Rich domain model**: Resolution lives on the entities, not in services

pub mod capabilities;
pub mod entities;
pub mod error;
pub mod platform;
pub mod validation;
pub mod value_objects;

pub use entities::{
    configuration::{
        DEFAULT_TOOLS_VERSION, DirectoryConfiguration, PackageConfiguration,
        PackageConfigurationBuilder,
    },
    dependency::{DependencyKey, ModuleDependency, ModuleTargetType},
    graph::ModuleGraph,
    module::{ExternalDependency, MacroConfiguration, Module, ModuleLocation},
    node::ModuleNode,
    project_structure::{FileToWrite, ProjectStructure},
};

pub use error::{DomainError, ErrorCategory};
pub use platform::{Platform, PlatformFamily};
pub use validation::GraphValidator;
pub use value_objects::{ModuleTarget, ModuleType, ProductKind};

#[cfg(test)]
mod tests {
    use super::*;

    /// The scenario from the crate docs, assembled through the re-exports.
    #[test]
    fn graph_can_be_assembled_from_reexports() {
        let config = PackageConfiguration::builder("Shop")
            .base_path("Modules")
            .platform(Platform::Ios(17))
            .global_dependency(
                ModuleType::Screen,
                ModuleTarget::Main,
                [ModuleDependency::named("DesignSystem")],
            )
            .build()
            .unwrap();

        let design = Module::new("DesignSystem", ModuleLocation::typed(ModuleType::Utility));
        let catalog = Module::new("Catalog", ModuleLocation::typed(ModuleType::Screen));

        let graph = ModuleGraph::new([
            ModuleNode::new(design),
            ModuleNode::new(catalog).with_export_named("DesignSystem"),
        ])
        .unwrap();

        assert!(graph.validate(&config).is_ok());
        assert_eq!(
            graph.node("Catalog").unwrap().dependent_modules(&config),
            vec!["DesignSystem", "Catalog"]
        );
    }

    #[test]
    fn domain_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ModuleGraph>();
        assert_send_sync::<PackageConfiguration>();
        assert_send_sync::<DomainError>();
    }
}
