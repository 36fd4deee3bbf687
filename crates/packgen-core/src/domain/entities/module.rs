//! The `Module` entity.
//!
//! A module is one logical package with one or more targets. Its identity is
//! its `name`: two `Module` values with the same name are the same module
//! for every equality, hash, set and map operation, whatever their other
//! attributes say.
//!
//! Everything a renderer needs that is *derived* rather than stored (the
//! resolved path, target names, implicit intra-module dependencies, the
//! resolved platform list) is computed here against a
//! [`PackageConfiguration`].

use std::collections::{BTreeMap, HashSet};
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{configuration::PackageConfiguration, dependency::ModuleDependency};
use crate::domain::{
    capabilities,
    error::DomainError,
    platform::Platform,
    value_objects::{ModuleTarget, ModuleType, ProductKind},
};

// ── Location ──────────────────────────────────────────────────────────────────

/// Where a module lives on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleLocation {
    /// An explicit path, used verbatim.
    Path(PathBuf),
    /// A path derived from the module type and the configured directories.
    Typed {
        module_type: ModuleType,
        /// Replaces the configured directory for the type.
        path: Option<PathBuf>,
        /// Grouping directory between the type directory and the module.
        subpath: Option<PathBuf>,
    },
}

impl ModuleLocation {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn typed(module_type: ModuleType) -> Self {
        Self::Typed {
            module_type,
            path: None,
            subpath: None,
        }
    }

    pub fn typed_in(module_type: ModuleType, subpath: impl Into<PathBuf>) -> Self {
        Self::Typed {
            module_type,
            path: None,
            subpath: Some(subpath.into()),
        }
    }

    /// The module type, known only for typed locations.
    pub fn module_type(&self) -> Option<ModuleType> {
        match self {
            Self::Path(_) => None,
            Self::Typed { module_type, .. } => Some(*module_type),
        }
    }
}

// ── Supporting records ────────────────────────────────────────────────────────

/// A dependency outside the graph, passed through to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalDependency {
    /// Product name inside the external package.
    pub product: String,
    /// Package identity.
    pub package: String,
    pub url: Option<String>,
    /// Version requirement, opaque to this crate.
    pub requirement: Option<String>,
}

impl ExternalDependency {
    pub fn new(product: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            package: package.into(),
            url: None,
            requirement: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.requirement = Some(requirement.into());
        self
    }
}

/// Settings specific to macro modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroConfiguration {
    /// Version of the syntax tooling package the implementation builds on.
    pub syntax_version: String,
    /// Whether the implementation target is a compiler plugin.
    pub requires_compiler_plugin: bool,
}

impl Default for MacroConfiguration {
    fn default() -> Self {
        Self {
            syntax_version: "600.0.0".into(),
            requires_compiler_plugin: true,
        }
    }
}

// ── Module ────────────────────────────────────────────────────────────────────

/// One logical package in the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    name: String,
    targets: Vec<ModuleTarget>,
    location: ModuleLocation,
    product: ProductKind,
    has_tests: bool,
    external_dependencies: Vec<ExternalDependency>,
    platforms: Vec<Platform>,
    macro_configuration: Option<MacroConfiguration>,
}

impl Module {
    /// Create a module with the defaults of its location's type.
    ///
    /// Typed locations get the type's default targets and product; explicit
    /// paths get a single `main` library target.
    pub fn new(name: impl Into<String>, location: ModuleLocation) -> Self {
        let (targets, product) = match location.module_type() {
            Some(module_type) => (
                module_type.default_targets().to_vec(),
                capabilities::default_product(module_type),
            ),
            None => (vec![ModuleTarget::Main], ProductKind::Library),
        };
        let macro_configuration =
            (location.module_type() == Some(ModuleType::Macro)).then(MacroConfiguration::default);

        Self {
            name: name.into(),
            targets,
            location,
            product,
            has_tests: false,
            external_dependencies: Vec::new(),
            platforms: Vec::new(),
            macro_configuration,
        }
    }

    pub fn with_targets(mut self, targets: impl IntoIterator<Item = ModuleTarget>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    pub fn with_product(mut self, product: ProductKind) -> Self {
        self.product = product;
        self
    }

    pub fn with_tests(mut self, has_tests: bool) -> Self {
        self.has_tests = has_tests;
        self
    }

    pub fn with_external_dependency(mut self, dependency: ExternalDependency) -> Self {
        self.external_dependencies.push(dependency);
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platforms.push(platform);
        self
    }

    pub fn with_macro_configuration(mut self, configuration: MacroConfiguration) -> Self {
        self.macro_configuration = Some(configuration);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn targets(&self) -> &[ModuleTarget] {
        &self.targets
    }
    pub fn location(&self) -> &ModuleLocation {
        &self.location
    }
    pub fn module_type(&self) -> Option<ModuleType> {
        self.location.module_type()
    }
    pub const fn product(&self) -> ProductKind {
        self.product
    }
    pub const fn has_tests(&self) -> bool {
        self.has_tests
    }
    pub fn external_dependencies(&self) -> &[ExternalDependency] {
        &self.external_dependencies
    }
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }
    pub fn macro_configuration(&self) -> Option<&MacroConfiguration> {
        self.macro_configuration.as_ref()
    }

    pub fn has_target(&self, target: &ModuleTarget) -> bool {
        self.targets.contains(target)
    }

    /// Check the module's own consistency: a non-empty name without path
    /// separators, at least one target, no target listed twice.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "name" });
        }
        if self.name.contains(['/', '\\', ':']) {
            return Err(DomainError::InvalidModule(format!(
                "'{}': name cannot contain '/', '\\' or ':'",
                self.name
            )));
        }
        if self.targets.is_empty() {
            return Err(DomainError::InvalidModule(format!(
                "'{}' declares no targets",
                self.name
            )));
        }
        let mut seen = HashSet::new();
        for target in &self.targets {
            if !seen.insert(target) {
                return Err(DomainError::InvalidModule(format!(
                    "'{}' lists target '{target}' twice",
                    self.name
                )));
            }
        }
        Ok(())
    }

    // ── Derived data ──────────────────────────────────────────────────────────

    /// Directory of this module, relative to the generation root.
    ///
    /// Typed locations combine the type directory (or the explicit
    /// override), the optional subpath and the module name. Root modules
    /// never append their own name.
    pub fn resolved_path(&self, configuration: &PackageConfiguration) -> PathBuf {
        match &self.location {
            ModuleLocation::Path(path) => path.clone(),
            ModuleLocation::Typed {
                module_type,
                path,
                subpath,
            } => {
                let mut resolved = path
                    .clone()
                    .unwrap_or_else(|| configuration.directories().path_for(*module_type));
                if let Some(subpath) = subpath {
                    resolved.push(subpath);
                }
                if *module_type != ModuleType::Root {
                    resolved.push(&self.name);
                }
                resolved
            }
        }
    }

    pub fn target_name(&self, target: &ModuleTarget) -> String {
        target.name_in(&self.name)
    }

    pub fn target_names(&self) -> Vec<String> {
        self.targets.iter().map(|t| self.target_name(t)).collect()
    }

    /// Whether the declared targets are exactly the type's default list.
    pub fn uses_default_targets(&self) -> bool {
        self.module_type()
            .is_some_and(|module_type| self.targets == module_type.default_targets())
    }

    /// Implicit intra-module edges, per target.
    ///
    /// Present only when the module uses its type's default target list; a
    /// customised list opts out of every default.
    pub fn default_dependencies(&self) -> BTreeMap<ModuleTarget, Vec<ModuleDependency>> {
        let mut defaults = BTreeMap::new();
        if !self.uses_default_targets() {
            return defaults;
        }
        let own_target = self
            .module_type()
            .and_then(capabilities::default_dependency_target);
        if let Some(own_target) = own_target {
            defaults.insert(
                ModuleTarget::Main,
                vec![ModuleDependency::target(self, own_target)],
            );
        }
        defaults
    }

    pub fn default_dependencies_for(&self, target: &ModuleTarget) -> Vec<ModuleDependency> {
        self.default_dependencies()
            .remove(target)
            .unwrap_or_default()
    }

    /// Configuration platforms, module platforms and the type's floor,
    /// deduplicated by family.
    pub fn resolved_platforms(&self, configuration: &PackageConfiguration) -> Vec<Platform> {
        let type_floor = self
            .module_type()
            .map(capabilities::default_platforms)
            .unwrap_or_default();
        Platform::deduplicate(
            configuration
                .platforms()
                .iter()
                .chain(&self.platforms)
                .chain(type_floor),
        )
    }
}

impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Module {}

impl Hash for Module {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
