//! TOML graph manifest loader.
//!
//! Reads the package configuration and the module list from `packgen.toml`
//! and converts them into a [`GraphDefinition`]. The graph is built but not
//! validated; validation belongs to the services.
//!
//! # Directory layout expected
//!
//! ```text
//! project/
//! ├── packgen.toml          ← [package], [directories], globals, modules
//! └── modules/              ← optional; one or more [[modules]] per file
//!     ├── clients.toml
//!     └── screens/
//!         └── catalog.toml
//! ```
//!
//! Fragments under `modules/` are read in sorted path order and their
//! modules are appended after the root manifest's own.
//!
//! # `packgen.toml` format
//!
//! ```toml
//! [package]
//! app_name      = "Shop"
//! tools_version = "6.0"                 # optional
//! platforms     = ["iOS 17", "macOS 14"]
//!
//! [directories]
//! base_path = "Modules"
//! [directories.types]
//! screen = "Features"                   # overrides "Screens"
//!
//! [[global_dependencies]]
//! type         = "screen"
//! target       = "main"
//! dependencies = ["DesignSystem"]
//!
//! [[modules]]
//! name    = "Catalog"
//! type    = "screen"                    # or: path = "Custom/Catalog"
//! exports = ["CatalogClient"]
//! [modules.dependencies]
//! main = ["CatalogClient", "CatalogClient:interface"]
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use packgen_core::{
    application::{
        ApplicationError,
        ports::{GraphDefinition, GraphSource},
    },
    domain::{
        ExternalDependency, MacroConfiguration, Module, ModuleDependency, ModuleGraph,
        ModuleLocation, ModuleNode, ModuleTarget, ModuleType, PackageConfiguration, Platform,
        ProductKind,
    },
    error::{PackgenError, PackgenResult},
};

/// Name of the root manifest inside a project directory.
pub const MANIFEST_FILE_NAME: &str = "packgen.toml";

/// Directory of module fragments next to the root manifest.
pub const MODULES_DIR: &str = "modules";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a graph manifest or fragment.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct GraphManifest {
    /// Required in the root manifest, forbidden in fragments.
    pub package: Option<PackageSection>,
    pub directories: Option<DirectoriesSection>,
    #[serde(default)]
    pub global_dependencies: Vec<GlobalDependencyEntry>,
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
}

/// `[package]` section.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    pub app_name: String,
    pub tools_version: Option<String>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub build_settings: Vec<String>,
}

/// `[directories]` section.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct DirectoriesSection {
    pub base_path: Option<PathBuf>,
    /// Per-type directory overrides.
    #[serde(default)]
    pub types: BTreeMap<ModuleType, PathBuf>,
}

/// One entry under `[[global_dependencies]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct GlobalDependencyEntry {
    #[serde(rename = "type")]
    pub module_type: ModuleType,
    pub target: ModuleTarget,
    pub dependencies: Vec<ModuleDependency>,
}

/// One entry under `[[modules]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ModuleEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub module_type: Option<ModuleType>,
    /// Explicit location, or the directory override of a typed module.
    pub path: Option<PathBuf>,
    /// Grouping directory; typed modules only.
    pub subpath: Option<PathBuf>,
    pub targets: Option<Vec<ModuleTarget>>,
    pub product: Option<ProductKind>,
    #[serde(default)]
    pub tests: bool,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub exports: Vec<String>,
    /// Explicit dependencies keyed by owning target.
    #[serde(default)]
    pub dependencies: BTreeMap<String, Vec<ModuleDependency>>,
    #[serde(default)]
    pub external: Vec<ExternalEntry>,
    #[serde(rename = "macro")]
    pub macro_configuration: Option<MacroSection>,
}

/// One entry under `[[modules.external]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ExternalEntry {
    pub product: String,
    pub package: String,
    pub url: Option<String>,
    pub requirement: Option<String>,
}

/// `[modules.macro]` section.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct MacroSection {
    pub syntax_version: Option<String>,
    pub compiler_plugin: Option<bool>,
}

impl ModuleEntry {
    /// Convert into a graph node. Errors are plain reasons; the caller adds
    /// the manifest path.
    fn into_node(self) -> Result<ModuleNode, String> {
        let location = match (self.module_type, self.path) {
            (Some(module_type), path) => ModuleLocation::Typed {
                module_type,
                path,
                subpath: self.subpath,
            },
            (None, Some(path)) => {
                if self.subpath.is_some() {
                    return Err(format!(
                        "module '{}': subpath requires a type",
                        self.name
                    ));
                }
                ModuleLocation::Path(path)
            }
            (None, None) => {
                return Err(format!(
                    "module '{}' needs either a type or a path",
                    self.name
                ));
            }
        };

        let mut module = Module::new(self.name, location).with_tests(self.tests);
        if let Some(targets) = self.targets {
            module = module.with_targets(targets);
        }
        if let Some(product) = self.product {
            module = module.with_product(product);
        }
        for platform in self.platforms {
            module = module.with_platform(platform);
        }
        for external in self.external {
            let mut dependency = ExternalDependency::new(external.product, external.package);
            dependency.url = external.url;
            dependency.requirement = external.requirement;
            module = module.with_external_dependency(dependency);
        }
        if let Some(section) = self.macro_configuration {
            let defaults = module
                .macro_configuration()
                .cloned()
                .unwrap_or_default();
            module = module.with_macro_configuration(MacroConfiguration {
                syntax_version: section.syntax_version.unwrap_or(defaults.syntax_version),
                requires_compiler_plugin: section
                    .compiler_plugin
                    .unwrap_or(defaults.requires_compiler_plugin),
            });
        }

        let mut node = ModuleNode::new(module);
        for (target, dependencies) in self.dependencies {
            node = node.with_dependencies(ModuleTarget::from(target), dependencies);
        }
        for export in self.exports {
            node = node.with_export_named(export);
        }
        Ok(node)
    }
}

impl GraphManifest {
    /// Parse manifest text. `path` is only used in error messages.
    pub fn parse(raw: &str, path: &Path) -> PackgenResult<Self> {
        toml::from_str(raw).map_err(|e| invalid(path, e.to_string()))
    }

    /// Build the configuration and the (unvalidated) graph.
    pub fn into_definition(self, path: &Path) -> PackgenResult<GraphDefinition> {
        let package = self
            .package
            .ok_or_else(|| invalid(path, "missing [package] section"))?;

        let mut builder = PackageConfiguration::builder(package.app_name)
            .platforms(package.platforms);
        if let Some(version) = package.tools_version {
            builder = builder.tools_version(version);
        }
        for setting in package.build_settings {
            builder = builder.build_setting(setting);
        }
        let directories = self.directories.unwrap_or_default();
        if let Some(base_path) = directories.base_path {
            builder = builder.base_path(base_path);
        }
        for (module_type, directory) in directories.types {
            builder = builder.directory(module_type, directory);
        }
        for entry in self.global_dependencies {
            builder = builder.global_dependency(entry.module_type, entry.target, entry.dependencies);
        }
        let configuration = builder.build()?;

        let nodes = self
            .modules
            .into_iter()
            .map(|entry| entry.into_node().map_err(|reason| invalid(path, reason)))
            .collect::<PackgenResult<Vec<_>>>()?;
        let graph = ModuleGraph::new(nodes)?;

        Ok(GraphDefinition {
            configuration,
            graph,
        })
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads a [`GraphDefinition`] from a manifest file or project directory.
///
/// # Example
///
/// ```no_run
/// use packgen_adapters::GraphLoader;
/// use packgen_core::application::ports::GraphSource;
///
/// let definition = GraphLoader::new("./packgen.toml").load()?;
/// println!("Loaded {} modules", definition.graph.len());
/// # Ok::<(), packgen_core::error::PackgenError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GraphLoader {
    location: PathBuf,
}

impl GraphLoader {
    /// Point the loader at a manifest file or a directory holding
    /// `packgen.toml`. Nothing is read until [`GraphSource::load`].
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// Path of the root manifest this loader reads.
    pub fn manifest_path(&self) -> PathBuf {
        if self.location.is_dir() {
            self.location.join(MANIFEST_FILE_NAME)
        } else {
            self.location.clone()
        }
    }

    /// Fragment files under `modules/`, sorted. Empty for file locations.
    fn fragment_paths(&self) -> PackgenResult<Vec<PathBuf>> {
        let modules_dir = self.location.join(MODULES_DIR);
        if !self.location.is_dir() || !modules_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&modules_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| invalid(&modules_dir, format!("directory walk error: {e}")))?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "toml") {
                paths.push(path.to_path_buf());
            }
        }
        Ok(paths)
    }

    fn read_manifest(path: &Path) -> PackgenResult<GraphManifest> {
        if !path.exists() {
            return Err(ApplicationError::ManifestNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| invalid(path, format!("failed to read: {e}")))?;
        GraphManifest::parse(&raw, path)
    }
}

impl GraphSource for GraphLoader {
    #[instrument(skip(self), fields(location = %self.location.display()))]
    fn load(&self) -> PackgenResult<GraphDefinition> {
        let manifest_path = self.manifest_path();
        let mut manifest = Self::read_manifest(&manifest_path)?;

        for fragment_path in self.fragment_paths()? {
            let fragment = Self::read_manifest(&fragment_path)?;
            if fragment.package.is_some()
                || fragment.directories.is_some()
                || !fragment.global_dependencies.is_empty()
            {
                return Err(invalid(
                    &fragment_path,
                    "module fragments may only declare [[modules]]",
                ));
            }
            debug!(
                fragment = %fragment_path.display(),
                modules = fragment.modules.len(),
                "loaded module fragment"
            );
            manifest.modules.extend(fragment.modules);
        }

        let definition = manifest.into_definition(&manifest_path)?;
        debug!(modules = definition.graph.len(), "finished loading graph");
        Ok(definition)
    }
}

fn invalid(path: &Path, reason: impl Into<String>) -> PackgenError {
    ApplicationError::ManifestInvalid {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use packgen_core::domain::DomainError;
    use tempfile::TempDir;

    const SHOP: &str = r#"
[package]
app_name  = "Shop"
platforms = ["iOS 17", "macOS 14"]
build_settings = ["-strict-concurrency=complete"]

[directories]
base_path = "Modules"
[directories.types]
screen = "Features"

[[global_dependencies]]
type = "screen"
target = "main"
dependencies = ["Util"]

[[modules]]
name = "Util"
type = "utility"

[[modules]]
name = "Client"
type = "client"
tests = true
[[modules.external]]
product = "Collections"
package = "swift-collections"
url = "https://github.com/apple/swift-collections"
requirement = "1.1.0"

[[modules]]
name = "Screen"
type = "screen"
subpath = "Shopping"
exports = ["Client"]
[modules.dependencies]
main = ["Client"]
"#;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn loads_configuration_and_modules() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), MANIFEST_FILE_NAME, SHOP);

        let GraphDefinition {
            configuration,
            graph,
        } = GraphLoader::new(temp.path()).load().unwrap();

        assert_eq!(configuration.app_name(), "Shop");
        assert_eq!(configuration.tools_version(), "6.0");
        assert_eq!(
            configuration.platforms(),
            &[Platform::Ios(17), Platform::macos(14)]
        );
        assert_eq!(graph.len(), 3);

        let screen = graph.node("Screen").unwrap();
        assert_eq!(
            screen.module().resolved_path(&configuration),
            PathBuf::from("Modules/Features/Shopping/Screen")
        );
        assert_eq!(
            screen.dependencies(&ModuleTarget::Main, &configuration),
            vec![
                ModuleDependency::named("Util"),
                ModuleDependency::named_target("Screen", ModuleTarget::Views),
                ModuleDependency::named("Client"),
            ]
        );
        assert_eq!(screen.exports(), &["Client".to_string()]);

        let client = graph.node("Client").unwrap().module();
        assert!(client.has_tests());
        assert_eq!(client.external_dependencies()[0].package, "swift-collections");
        assert!(graph.validate(&configuration).is_ok());
    }

    #[test]
    fn fragments_are_appended_in_sorted_order() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), MANIFEST_FILE_NAME, "[package]\napp_name = \"Shop\"\n");
        write(temp.path(), "modules/b.toml", "[[modules]]\nname = \"B\"\ntype = \"utility\"\n");
        write(temp.path(), "modules/a/x.toml", "[[modules]]\nname = \"A\"\ntype = \"utility\"\n");
        write(temp.path(), "modules/notes.md", "ignored");

        let definition = GraphLoader::new(temp.path()).load().unwrap();
        let names: Vec<_> = definition.graph.nodes().iter().map(ModuleNode::name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn fragment_cannot_redefine_package() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), MANIFEST_FILE_NAME, "[package]\napp_name = \"Shop\"\n");
        write(temp.path(), "modules/bad.toml", "[package]\napp_name = \"Other\"\n");

        let err = GraphLoader::new(temp.path()).load().unwrap_err();
        assert!(err.to_string().contains("may only declare [[modules]]"));
    }

    #[test]
    fn missing_manifest_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = GraphLoader::new(temp.path()).load().unwrap_err();
        assert!(matches!(
            err,
            PackgenError::Application(ApplicationError::ManifestNotFound { .. })
        ));
    }

    #[test]
    fn explicit_path_module_and_custom_targets() {
        let raw = r#"
[package]
app_name = "Shop"

[[modules]]
name = "Tool"
path = "Tools/Tool"
targets = ["main", "Fixtures"]
product = "executable"
[modules.dependencies]
Fixtures = ["Tool"]
"#;
        let path = Path::new("packgen.toml");
        let definition = GraphManifest::parse(raw, path)
            .unwrap()
            .into_definition(path)
            .unwrap();
        let tool = definition.graph.node("Tool").unwrap();
        assert_eq!(tool.module().location(), &ModuleLocation::path("Tools/Tool"));
        assert_eq!(tool.module().product(), ProductKind::Executable);
        assert_eq!(
            tool.explicit_dependencies_for(&ModuleTarget::Custom("Fixtures".into())),
            &[ModuleDependency::named("Tool")]
        );
    }

    #[test]
    fn macro_section_overrides_defaults() {
        let raw = r#"
[package]
app_name = "Shop"

[[modules]]
name = "Tokens"
type = "macro"
[modules.macro]
syntax_version = "601.0.0"
"#;
        let path = Path::new("packgen.toml");
        let definition = GraphManifest::parse(raw, path)
            .unwrap()
            .into_definition(path)
            .unwrap();
        let config = definition
            .graph
            .node("Tokens")
            .unwrap()
            .module()
            .macro_configuration()
            .cloned()
            .unwrap();
        assert_eq!(config.syntax_version, "601.0.0");
        assert!(config.requires_compiler_plugin);
    }

    #[test]
    fn module_without_type_or_path_is_invalid() {
        let raw = "[package]\napp_name = \"Shop\"\n[[modules]]\nname = \"A\"\n";
        let path = Path::new("packgen.toml");
        let err = GraphManifest::parse(raw, path)
            .unwrap()
            .into_definition(path)
            .unwrap_err();
        assert!(err.to_string().contains("needs either a type or a path"));
    }

    #[test]
    fn bad_platform_and_unknown_fields_are_parse_errors() {
        let path = Path::new("packgen.toml");
        assert!(GraphManifest::parse("[package]\napp_name = \"S\"\nplatforms = [\"android 14\"]\n", path).is_err());
        assert!(GraphManifest::parse("[package]\napp_name = \"S\"\ncolour = true\n", path).is_err());
    }

    #[test]
    fn duplicate_module_names_surface_as_domain_errors() {
        let raw = r#"
[package]
app_name = "Shop"
[[modules]]
name = "A"
type = "utility"
[[modules]]
name = "A"
path = "Elsewhere"
"#;
        let path = Path::new("packgen.toml");
        let err = GraphManifest::parse(raw, path)
            .unwrap()
            .into_definition(path)
            .unwrap_err();
        assert!(matches!(
            err,
            PackgenError::Domain(DomainError::DuplicateModule { .. })
        ));
    }
}
