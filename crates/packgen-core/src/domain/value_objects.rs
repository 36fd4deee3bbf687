//! Domain value objects: ModuleType, ModuleTarget, ProductKind.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity.
//! They hold NO registry logic. Per-type defaults (targets, platforms,
//! directories) live in `capabilities.rs`. This file's only job is to define
//! the types, their string representations, and their `FromStr` parsers.
//!
//! # Adding a New Module Type
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add a `ModuleTypeDef` entry in `capabilities.rs`
//! 4. Done, nothing else changes

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ModuleType ───────────────────────────────────────────────────────────────

/// The category of a module.
///
/// The category decides the module's default targets, its default product,
/// its platform floor and the directory it is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    Client,
    Coordinator,
    Macro,
    Screen,
    Utility,
    Root,
}

impl ModuleType {
    pub const ALL: [ModuleType; 6] = [
        Self::Client,
        Self::Coordinator,
        Self::Macro,
        Self::Screen,
        Self::Utility,
        Self::Root,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Coordinator => "coordinator",
            Self::Macro => "macro",
            Self::Screen => "screen",
            Self::Utility => "utility",
            Self::Root => "root",
        }
    }

    /// Targets a module of this type has unless it declares its own.
    ///
    /// Delegates to `capabilities::default_targets`.
    pub fn default_targets(self) -> &'static [ModuleTarget] {
        crate::domain::capabilities::default_targets(self)
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "coordinator" => Ok(Self::Coordinator),
            "macro" => Ok(Self::Macro),
            "screen" => Ok(Self::Screen),
            "utility" | "util" => Ok(Self::Utility),
            "root" => Ok(Self::Root),
            other => Err(DomainError::InvalidModuleType(format!(
                "unknown module type: {other}"
            ))),
        }
    }
}

// ── ModuleTarget ─────────────────────────────────────────────────────────────

/// A compilable sub-unit of a module.
///
/// `Main` is the primary target: depending on a module without naming a
/// target always means depending on its `Main`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModuleTarget {
    Main,
    Interface,
    Views,
    MacroImplementation,
    Custom(String),
}

impl ModuleTarget {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Main => "main",
            Self::Interface => "interface",
            Self::Views => "views",
            Self::MacroImplementation => "macro-implementation",
            Self::Custom(name) => name,
        }
    }

    /// Name of this target inside a module called `module_name`.
    pub fn name_in(&self, module_name: &str) -> String {
        match self {
            Self::Main => module_name.to_string(),
            Self::Interface => format!("{module_name}Interface"),
            Self::Views => format!("{module_name}Views"),
            Self::MacroImplementation => format!("{module_name}Implementation"),
            Self::Custom(name) => name.clone(),
        }
    }

    pub const fn is_main(&self) -> bool {
        matches!(self, Self::Main)
    }
}

impl fmt::Display for ModuleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Parsing never fails: anything that is not a known target is a custom one.
impl From<&str> for ModuleTarget {
    fn from(s: &str) -> Self {
        match s {
            "main" => Self::Main,
            "interface" => Self::Interface,
            "views" => Self::Views,
            "macro-implementation" | "implementation" => Self::MacroImplementation,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for ModuleTarget {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ModuleTarget> for String {
    fn from(target: ModuleTarget) -> Self {
        match target {
            ModuleTarget::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

// ── ProductKind ──────────────────────────────────────────────────────────────

/// What a module publishes to its consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Executable,
    Library,
    Macro,
    Plugin,
    None,
}

impl ProductKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Executable => "executable",
            Self::Library => "library",
            Self::Macro => "macro",
            Self::Plugin => "plugin",
            Self::None => "none",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "executable" | "exe" => Ok(Self::Executable),
            "library" | "lib" => Ok(Self::Library),
            "macro" => Ok(Self::Macro),
            "plugin" => Ok(Self::Plugin),
            "none" => Ok(Self::None),
            other => Err(DomainError::InvalidProductKind(format!(
                "unknown product kind: {other}"
            ))),
        }
    }
}
