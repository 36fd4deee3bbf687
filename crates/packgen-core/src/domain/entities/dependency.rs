//! Dependency edges between modules.
//!
//! A [`ModuleDependency`] names another module's dependency surface, either
//! the module as a whole (its `main` target) or one specific target. Edges
//! carry the module *name* rather than the full [`Module`] value; names are
//! the graph's primary key and that is all resolution and validation need.
//!
//! Identity is the explicit [`DependencyKey`] returned by
//! [`ModuleDependency::key`]: (variant, module name, target). Every set or
//! map keyed by dependencies goes through it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::module::Module;
use crate::domain::{
    error::DomainError,
    value_objects::{ModuleTarget, ModuleType},
};

/// A reference to another module's dependency surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModuleDependency {
    /// The module's `main` target.
    Module(String),
    /// One specific target of the module.
    Target(String, ModuleTarget),
}

/// Identity of a [`ModuleDependency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyKey<'a> {
    Module(&'a str),
    Target(&'a str, &'a ModuleTarget),
}

impl ModuleDependency {
    /// Depend on `module`'s main target.
    pub fn module(module: &Module) -> Self {
        Self::Module(module.name().to_string())
    }

    /// Depend on one target of `module`.
    pub fn target(module: &Module, target: ModuleTarget) -> Self {
        Self::Target(module.name().to_string(), target)
    }

    /// Depend on the module called `name`, without holding its value.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Module(name.into())
    }

    pub fn named_target(name: impl Into<String>, target: ModuleTarget) -> Self {
        Self::Target(name.into(), target)
    }

    pub fn module_name(&self) -> &str {
        match self {
            Self::Module(name) | Self::Target(name, _) => name,
        }
    }

    /// The target this edge lands on: `main` for module-level edges.
    pub fn resolved_target(&self) -> ModuleTarget {
        match self {
            Self::Module(_) => ModuleTarget::Main,
            Self::Target(_, target) => target.clone(),
        }
    }

    /// Name of the target this edge lands on, as it appears in manifests.
    pub fn target_name(&self) -> String {
        self.resolved_target().name_in(self.module_name())
    }

    pub fn key(&self) -> DependencyKey<'_> {
        match self {
            Self::Module(name) => DependencyKey::Module(name),
            Self::Target(name, target) => DependencyKey::Target(name, target),
        }
    }
}

impl fmt::Display for ModuleDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module(name) => f.write_str(name),
            Self::Target(name, target) => write!(f, "{name}:{target}"),
        }
    }
}

impl FromStr for ModuleDependency {
    type Err = DomainError;

    /// Parse `"Module"` or `"Module:target"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, target) = match s.split_once(':') {
            Some((name, target)) => (name.trim(), Some(target.trim())),
            None => (s.trim(), None),
        };
        if name.is_empty() {
            return Err(DomainError::InvalidDependency(format!(
                "'{s}': module name is empty"
            )));
        }
        match target {
            None => Ok(Self::named(name)),
            Some("") => Err(DomainError::InvalidDependency(format!(
                "'{s}': target name is empty"
            ))),
            Some(target) => Ok(Self::named_target(name, ModuleTarget::from(target))),
        }
    }
}

impl TryFrom<String> for ModuleDependency {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModuleDependency> for String {
    fn from(dependency: ModuleDependency) -> Self {
        dependency.to_string()
    }
}

/// Key of the global dependency table: every module of `module_type` gets
/// the table's edges on its `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleTargetType {
    pub module_type: ModuleType,
    pub target: ModuleTarget,
}

impl ModuleTargetType {
    pub fn new(module_type: ModuleType, target: ModuleTarget) -> Self {
        Self {
            module_type,
            target,
        }
    }
}

impl fmt::Display for ModuleTargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module_type, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::module::ModuleLocation;

    #[test]
    fn identity_ignores_module_attributes() {
        let plain = Module::new("Client", ModuleLocation::typed(ModuleType::Client));
        let tested = Module::new("Client", ModuleLocation::typed(ModuleType::Utility))
            .with_tests(true);

        let a = ModuleDependency::target(&plain, ModuleTarget::Interface);
        let b = ModuleDependency::target(&tested, ModuleTarget::Interface);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn module_and_main_target_are_distinct_edges() {
        let module = ModuleDependency::named("Client");
        let main = ModuleDependency::named_target("Client", ModuleTarget::Main);
        assert_ne!(module.key(), main.key());
        assert_eq!(module.resolved_target(), main.resolved_target());
    }

    #[test]
    fn parses_module_and_target_forms() {
        assert_eq!(
            "Client".parse::<ModuleDependency>().unwrap(),
            ModuleDependency::named("Client")
        );
        assert_eq!(
            "Client:interface".parse::<ModuleDependency>().unwrap(),
            ModuleDependency::named_target("Client", ModuleTarget::Interface)
        );
        assert_eq!(
            "Client:Fixtures".parse::<ModuleDependency>().unwrap(),
            ModuleDependency::named_target("Client", ModuleTarget::Custom("Fixtures".into()))
        );
        assert!(":views".parse::<ModuleDependency>().is_err());
        assert!("Client:".parse::<ModuleDependency>().is_err());
    }

    #[test]
    fn target_name_uses_dependee_name() {
        let dep = ModuleDependency::named_target("Catalog", ModuleTarget::Views);
        assert_eq!(dep.target_name(), "CatalogViews");
        assert_eq!(ModuleDependency::named("Catalog").target_name(), "Catalog");
    }
}
