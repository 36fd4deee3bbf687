//! Package-wide settings shared by every module of one generation run.
//!
//! A [`PackageConfiguration`] is built once by the caller and then only
//! read. It is passed explicitly to every resolution call; nothing in the
//! domain keeps it in ambient state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::dependency::{ModuleDependency, ModuleTargetType};
use crate::domain::{
    capabilities,
    error::DomainError,
    platform::Platform,
    value_objects::{ModuleTarget, ModuleType},
};

pub const DEFAULT_TOOLS_VERSION: &str = "6.0";

// ── DirectoryConfiguration ────────────────────────────────────────────────────

/// Where typed modules are placed on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryConfiguration {
    /// Root of every typed module directory.
    pub base_path: PathBuf,
    /// Per-type replacement for the registry directory name.
    pub overrides: BTreeMap<ModuleType, PathBuf>,
}

impl DirectoryConfiguration {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            overrides: BTreeMap::new(),
        }
    }

    /// Directory name for `module_type`, relative to the base path.
    pub fn subdirectory(&self, module_type: ModuleType) -> &Path {
        self.overrides
            .get(&module_type)
            .map(PathBuf::as_path)
            .unwrap_or_else(|| Path::new(capabilities::default_directory(module_type)))
    }

    /// Base path joined with the type's subdirectory.
    pub fn path_for(&self, module_type: ModuleType) -> PathBuf {
        let subdirectory = self.subdirectory(module_type);
        if subdirectory.as_os_str().is_empty() {
            self.base_path.clone()
        } else {
            self.base_path.join(subdirectory)
        }
    }
}

// ── PackageConfiguration ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageConfiguration {
    app_name: String,
    tools_version: String,
    platforms: Vec<Platform>,
    build_settings: Vec<String>,
    directories: DirectoryConfiguration,
    global_dependencies: BTreeMap<ModuleTargetType, Vec<ModuleDependency>>,
}

impl PackageConfiguration {
    pub fn builder(app_name: impl Into<String>) -> PackageConfigurationBuilder {
        PackageConfigurationBuilder::new(app_name)
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }
    pub fn tools_version(&self) -> &str {
        &self.tools_version
    }
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }
    pub fn build_settings(&self) -> &[String] {
        &self.build_settings
    }
    pub fn directories(&self) -> &DirectoryConfiguration {
        &self.directories
    }
    pub fn global_dependencies(&self) -> &BTreeMap<ModuleTargetType, Vec<ModuleDependency>> {
        &self.global_dependencies
    }

    /// Edges injected into every `module_type` module on `target`.
    pub fn global_dependencies_for(
        &self,
        module_type: ModuleType,
        target: &ModuleTarget,
    ) -> &[ModuleDependency] {
        self.global_dependencies
            .get(&ModuleTargetType::new(module_type, target.clone()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Builder for [`PackageConfiguration`].
///
/// Only the app name is required; `build()` rejects a blank one.
#[derive(Debug, Clone)]
pub struct PackageConfigurationBuilder {
    app_name: String,
    tools_version: Option<String>,
    platforms: Vec<Platform>,
    build_settings: Vec<String>,
    directories: DirectoryConfiguration,
    global_dependencies: BTreeMap<ModuleTargetType, Vec<ModuleDependency>>,
}

impl PackageConfigurationBuilder {
    fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            tools_version: None,
            platforms: Vec::new(),
            build_settings: Vec::new(),
            directories: DirectoryConfiguration::default(),
            global_dependencies: BTreeMap::new(),
        }
    }

    pub fn tools_version(mut self, version: impl Into<String>) -> Self {
        self.tools_version = Some(version.into());
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platforms.push(platform);
        self
    }

    pub fn platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.platforms.extend(platforms);
        self
    }

    pub fn build_setting(mut self, setting: impl Into<String>) -> Self {
        self.build_settings.push(setting.into());
        self
    }

    pub fn base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.directories.base_path = base_path.into();
        self
    }

    /// Place modules of `module_type` under `directory` instead of the
    /// registry default.
    pub fn directory(mut self, module_type: ModuleType, directory: impl Into<PathBuf>) -> Self {
        self.directories
            .overrides
            .insert(module_type, directory.into());
        self
    }

    /// Append edges to the global table (accumulates per key).
    pub fn global_dependency(
        mut self,
        module_type: ModuleType,
        target: ModuleTarget,
        dependencies: impl IntoIterator<Item = ModuleDependency>,
    ) -> Self {
        self.global_dependencies
            .entry(ModuleTargetType::new(module_type, target))
            .or_default()
            .extend(dependencies);
        self
    }

    /// # Errors
    ///
    /// - `MissingRequiredField` if the app name or tools version is blank
    pub fn build(self) -> Result<PackageConfiguration, DomainError> {
        if self.app_name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "app_name" });
        }
        let tools_version = self
            .tools_version
            .unwrap_or_else(|| DEFAULT_TOOLS_VERSION.to_string());
        if tools_version.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "tools_version",
            });
        }

        Ok(PackageConfiguration {
            app_name: self.app_name,
            tools_version,
            platforms: self.platforms,
            build_settings: self.build_settings,
            directories: self.directories,
            global_dependencies: self.global_dependencies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let config = PackageConfiguration::builder("Shop").build().unwrap();
        assert_eq!(config.app_name(), "Shop");
        assert_eq!(config.tools_version(), DEFAULT_TOOLS_VERSION);
        assert!(config.platforms().is_empty());
        assert_eq!(config.directories().base_path, PathBuf::new());
    }

    #[test]
    fn blank_app_name_is_rejected() {
        let err = PackageConfiguration::builder("  ").build().unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredField { field: "app_name" });
    }

    #[test]
    fn directory_overrides_replace_registry_names() {
        let config = PackageConfiguration::builder("Shop")
            .base_path("Modules")
            .directory(ModuleType::Screen, "Features")
            .build()
            .unwrap();
        let dirs = config.directories();
        assert_eq!(dirs.path_for(ModuleType::Screen), Path::new("Modules/Features"));
        assert_eq!(dirs.path_for(ModuleType::Client), Path::new("Modules/Clients"));
        assert_eq!(dirs.path_for(ModuleType::Root), Path::new("Modules"));
    }

    #[test]
    fn global_dependencies_accumulate_per_key() {
        let config = PackageConfiguration::builder("Shop")
            .global_dependency(
                ModuleType::Screen,
                ModuleTarget::Main,
                [ModuleDependency::named("DesignSystem")],
            )
            .global_dependency(
                ModuleType::Screen,
                ModuleTarget::Main,
                [ModuleDependency::named("Analytics")],
            )
            .build()
            .unwrap();

        assert_eq!(
            config.global_dependencies_for(ModuleType::Screen, &ModuleTarget::Main),
            &[
                ModuleDependency::named("DesignSystem"),
                ModuleDependency::named("Analytics")
            ]
        );
        assert!(config
            .global_dependencies_for(ModuleType::Screen, &ModuleTarget::Views)
            .is_empty());
        assert!(config
            .global_dependencies_for(ModuleType::Client, &ModuleTarget::Main)
            .is_empty());
    }
}
