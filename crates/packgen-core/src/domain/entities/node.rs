//! Graph nodes and dependency resolution.
//!
//! [`ModuleNode::dependencies`] is the one place that decides what a target
//! really depends on. Renderers and the validator both call it instead of
//! merging sources themselves.

use std::collections::{BTreeMap, HashSet};

use super::{
    configuration::PackageConfiguration, dependency::ModuleDependency, module::Module,
};
use crate::domain::value_objects::ModuleTarget;

/// A module bound to its explicit per-target edges and its re-exports.
#[derive(Debug, Clone)]
pub struct ModuleNode {
    module: Module,
    dependencies: BTreeMap<ModuleTarget, Vec<ModuleDependency>>,
    exports: Vec<String>,
}

impl ModuleNode {
    pub fn new(module: Module) -> Self {
        Self {
            module,
            dependencies: BTreeMap::new(),
            exports: Vec::new(),
        }
    }

    /// Declare one explicit edge on `target`.
    pub fn with_dependency(mut self, target: ModuleTarget, dependency: ModuleDependency) -> Self {
        self.dependencies.entry(target).or_default().push(dependency);
        self
    }

    pub fn with_dependencies(
        mut self,
        target: ModuleTarget,
        dependencies: impl IntoIterator<Item = ModuleDependency>,
    ) -> Self {
        self.dependencies
            .entry(target)
            .or_default()
            .extend(dependencies);
        self
    }

    /// Re-export `module` through this node.
    pub fn with_export(self, module: &Module) -> Self {
        self.with_export_named(module.name())
    }

    pub fn with_export_named(mut self, name: impl Into<String>) -> Self {
        self.exports.push(name.into());
        self
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn name(&self) -> &str {
        self.module.name()
    }

    /// Explicit edges exactly as declared, keyed by owning target.
    pub fn explicit_dependencies(&self) -> &BTreeMap<ModuleTarget, Vec<ModuleDependency>> {
        &self.dependencies
    }

    pub fn explicit_dependencies_for(&self, target: &ModuleTarget) -> &[ModuleDependency] {
        self.dependencies
            .get(target)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Names of re-exported modules, in declaration order.
    pub fn exports(&self) -> &[String] {
        &self.exports
    }

    /// Resolved edges of `target`: global, then default, then explicit.
    ///
    /// Global edges apply only to typed modules. An edge whose key was
    /// already produced by an earlier source is dropped, so explicit edges
    /// can add to the list but never reorder it.
    pub fn dependencies(
        &self,
        target: &ModuleTarget,
        configuration: &PackageConfiguration,
    ) -> Vec<ModuleDependency> {
        let global = self
            .module
            .module_type()
            .map(|module_type| configuration.global_dependencies_for(module_type, target))
            .unwrap_or_default();
        let defaults = self.module.default_dependencies_for(target);
        let explicit = self.explicit_dependencies_for(target);

        let mut seen = HashSet::new();
        global
            .iter()
            .chain(&defaults)
            .chain(explicit)
            .filter(|dependency| seen.insert(dependency.key()))
            .cloned()
            .collect()
    }

    /// Module names referenced by the resolved edges of every declared
    /// target, first-seen order.
    pub fn dependent_modules(&self, configuration: &PackageConfiguration) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for target in self.module.targets() {
            for dependency in self.dependencies(target, configuration) {
                if seen.insert(dependency.module_name().to_string()) {
                    names.push(dependency.module_name().to_string());
                }
            }
        }
        names
    }

    /// Whether an explicit edge, or with a configuration an applicable
    /// global edge, names `module`.
    pub fn depends_on(&self, module: &Module, configuration: Option<&PackageConfiguration>) -> bool {
        let names_module = |dependency: &ModuleDependency| dependency.module_name() == module.name();

        if self.dependencies.values().flatten().any(names_module) {
            return true;
        }

        match (configuration, self.module.module_type()) {
            (Some(configuration), Some(module_type)) => self.module.targets().iter().any(|target| {
                configuration
                    .global_dependencies_for(module_type, target)
                    .iter()
                    .any(names_module)
            }),
            _ => false,
        }
    }
}
