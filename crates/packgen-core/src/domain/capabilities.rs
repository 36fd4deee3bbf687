//! Module type registry.
//!
//! Every per-type default is described exactly once by a [`ModuleTypeDef`]:
//! the target list a module of that type gets, the product it publishes, the
//! platform floor it imposes and the directory it is placed in. All lookups
//! are O(n) scans over [`MODULE_TYPE_REGISTRY`].
//!
//! # Adding a New Module Type
//!
//! 1. Add a variant to `ModuleType` in `value_objects.rs`
//! 2. Add one [`ModuleTypeDef`] entry to [`MODULE_TYPE_REGISTRY`]
//! 3. If the type implies intra-module dependencies, add an arm to
//!    [`default_dependency_target`]

use crate::domain::platform::Platform;
use crate::domain::value_objects::{ModuleTarget, ModuleType, ProductKind};

/// Describes the defaults of one module type.
#[derive(Debug, Clone, Copy)]
pub struct ModuleTypeDef {
    /// The type this definition describes.
    pub module_type: ModuleType,

    /// Targets a module of this type has unless it declares its own list.
    ///
    /// A module whose target list differs from this one opts out of
    /// implicit default dependencies entirely.
    pub default_targets: &'static [ModuleTarget],

    /// Product published by a module of this type.
    pub default_product: ProductKind,

    /// Platform floor every module of this type must meet.
    pub default_platforms: &'static [Platform],

    /// Directory, relative to the configured base path, that holds modules
    /// of this type. Empty means the base path itself.
    pub directory: &'static str,
}

/// Single source of truth for module type defaults.
pub static MODULE_TYPE_REGISTRY: &[ModuleTypeDef] = &[
    ModuleTypeDef {
        module_type: ModuleType::Client,
        default_targets: &[ModuleTarget::Main, ModuleTarget::Interface],
        default_product: ProductKind::Library,
        default_platforms: &[],
        directory: "Clients",
    },
    ModuleTypeDef {
        module_type: ModuleType::Coordinator,
        default_targets: &[ModuleTarget::Main, ModuleTarget::Views],
        default_product: ProductKind::Library,
        default_platforms: &[],
        directory: "Coordinators",
    },
    ModuleTypeDef {
        module_type: ModuleType::Macro,
        default_targets: &[ModuleTarget::Main, ModuleTarget::MacroImplementation],
        default_product: ProductKind::Library,
        default_platforms: &[Platform::macos_minor(10, 15)],
        directory: "Macros",
    },
    ModuleTypeDef {
        module_type: ModuleType::Screen,
        default_targets: &[ModuleTarget::Main, ModuleTarget::Views],
        default_product: ProductKind::Library,
        default_platforms: &[],
        directory: "Screens",
    },
    ModuleTypeDef {
        module_type: ModuleType::Utility,
        default_targets: &[ModuleTarget::Main],
        default_product: ProductKind::Library,
        default_platforms: &[],
        directory: "Utilities",
    },
    ModuleTypeDef {
        module_type: ModuleType::Root,
        default_targets: &[ModuleTarget::Main],
        default_product: ProductKind::None,
        default_platforms: &[],
        directory: "",
    },
];

/// Look up the definition for a module type.
///
/// # Panics
/// Panics if the registry is missing an entry, which the
/// `every_type_is_registered` test rules out.
pub fn find_module_type(module_type: ModuleType) -> &'static ModuleTypeDef {
    MODULE_TYPE_REGISTRY
        .iter()
        .find(|def| def.module_type == module_type)
        .unwrap_or_else(|| panic!("module type '{module_type}' missing from registry"))
}

pub fn default_targets(module_type: ModuleType) -> &'static [ModuleTarget] {
    find_module_type(module_type).default_targets
}

pub fn default_product(module_type: ModuleType) -> ProductKind {
    find_module_type(module_type).default_product
}

pub fn default_platforms(module_type: ModuleType) -> &'static [Platform] {
    find_module_type(module_type).default_platforms
}

pub fn default_directory(module_type: ModuleType) -> &'static str {
    find_module_type(module_type).directory
}

/// The own target that `main` implicitly depends on for a module type.
pub fn default_dependency_target(module_type: ModuleType) -> Option<ModuleTarget> {
    match module_type {
        ModuleType::Client => Some(ModuleTarget::Interface),
        ModuleType::Coordinator | ModuleType::Screen => Some(ModuleTarget::Views),
        ModuleType::Macro => Some(ModuleTarget::MacroImplementation),
        ModuleType::Utility | ModuleType::Root => None,
    }
}
