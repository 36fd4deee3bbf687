//! `Package.swift` renderer.
//!
//! Each module becomes an independent package. Its own targets reference
//! each other by name; targets of other modules are referenced as products
//! of a local package found by relative path.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use packgen_core::{
    application::{ApplicationError, ports::ModuleRenderer},
    domain::{
        Module, ModuleDependency, ModuleGraph, ModuleNode, ModuleTarget, PackageConfiguration,
        Platform, ProductKind, ProjectStructure,
    },
    error::PackgenResult,
};
use tracing::instrument;

/// Package that macro implementations build against.
pub const SWIFT_SYNTAX_URL: &str = "https://github.com/swiftlang/swift-syntax.git";

const MANIFEST_FILE_NAME: &str = "Package.swift";
const INDENT: &str = "    ";

/// Renders `Package.swift` manifests and placeholder sources.
#[derive(Debug, Default, Clone, Copy)]
pub struct PackageManifestRenderer;

impl PackageManifestRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ModuleRenderer for PackageManifestRenderer {
    fn manifest_file_name(&self) -> &'static str {
        MANIFEST_FILE_NAME
    }

    #[instrument(skip_all, fields(module = node.name()))]
    fn render_manifest(
        &self,
        node: &ModuleNode,
        graph: &ModuleGraph,
        configuration: &PackageConfiguration,
    ) -> PackgenResult<String> {
        let module = node.module();
        let mut arguments = vec![format!("{INDENT}name: {}", quoted(module.name()))];

        let platforms: Vec<String> = module
            .resolved_platforms(configuration)
            .iter()
            .filter_map(Platform::render)
            .collect();
        if !platforms.is_empty() {
            arguments.push(list(1, "platforms", &platforms));
        }

        arguments.push(list(1, "products", &products(module)));
        let packages =
            packages(node, graph, configuration).map_err(|reason| failed(module, reason))?;
        arguments.push(list(1, "dependencies", &packages));
        arguments.push(list(1, "targets", &targets(node, graph, configuration)));

        let mut out = String::new();
        let _ = writeln!(out, "// swift-tools-version: {}", configuration.tools_version());
        out.push_str("import PackageDescription\n\n");
        out.push_str("let package = Package(\n");
        out.push_str(&arguments.join(",\n"));
        out.push_str("\n)\n");
        Ok(out)
    }

    #[instrument(skip_all, fields(module = node.name()))]
    fn render_scaffold(
        &self,
        node: &ModuleNode,
        _configuration: &PackageConfiguration,
    ) -> PackgenResult<ProjectStructure> {
        let module = node.module();
        let mut structure = ProjectStructure::new();

        for target in module.targets() {
            let name = module.target_name(target);
            structure.add_file(
                Path::new("Sources").join(&name).join(format!("{name}.swift")),
                placeholder_source(module, target, &name),
            );
        }

        if module.has_tests() {
            let name = format!("{}Tests", module.name());
            structure.add_file(
                Path::new("Tests").join(&name).join(format!("{name}.swift")),
                format!(
                    "import XCTest\n@testable import {}\n\nfinal class {name}: XCTestCase {{\n}}\n",
                    module.name()
                ),
            );
        }

        Ok(structure)
    }
}

fn products(module: &Module) -> Vec<String> {
    let main = module.target_name(&ModuleTarget::Main);
    match module.product() {
        ProductKind::None => Vec::new(),
        ProductKind::Executable => vec![format!(
            ".executable(name: {}, targets: [{}])",
            quoted(&main),
            quoted(&main)
        )],
        ProductKind::Plugin => vec![format!(
            ".plugin(name: {}, targets: [{}])",
            quoted(&main),
            quoted(&main)
        )],
        // Every non-implementation target is importable on its own.
        ProductKind::Library | ProductKind::Macro => module
            .targets()
            .iter()
            .filter(|target| **target != ModuleTarget::MacroImplementation)
            .map(|target| {
                let name = module.target_name(target);
                format!(".library(name: {}, targets: [{}])", quoted(&name), quoted(&name))
            })
            .collect(),
    }
}

/// Package references: external packages, swift-syntax for macros, then
/// every other module this one depends on, by relative path.
fn packages(
    node: &ModuleNode,
    graph: &ModuleGraph,
    configuration: &PackageConfiguration,
) -> Result<Vec<String>, String> {
    let module = node.module();
    let mut seen = BTreeSet::new();
    let mut lines = Vec::new();

    for external in module.external_dependencies() {
        if !seen.insert(external.package.clone()) {
            continue;
        }
        let line = match (&external.url, &external.requirement) {
            (Some(url), Some(requirement)) => {
                format!(".package(url: {}, from: {})", quoted(url), quoted(requirement))
            }
            (Some(url), None) => format!(".package(url: {}, branch: \"main\")", quoted(url)),
            (None, _) => format!(".package(path: {})", quoted(&format!("../{}", external.package))),
        };
        lines.push(line);
    }

    if let Some(macro_configuration) = module.macro_configuration() {
        if seen.insert("swift-syntax".to_string()) {
            lines.push(format!(
                ".package(url: {}, from: {})",
                quoted(SWIFT_SYNTAX_URL),
                quoted(&macro_configuration.syntax_version)
            ));
        }
    }

    let here = module.resolved_path(configuration);
    for name in node.dependent_modules(configuration) {
        if name == module.name() {
            continue;
        }
        let other = graph
            .node(&name)
            .ok_or_else(|| format!("dependency '{name}' is not in the graph"))?;
        let there = other.module().resolved_path(configuration);
        let relative = relative_path(&here, &there);
        lines.push(format!(".package(path: {})", quoted(&relative)));
    }

    Ok(lines)
}

fn targets(
    node: &ModuleNode,
    graph: &ModuleGraph,
    configuration: &PackageConfiguration,
) -> Vec<String> {
    let module = node.module();
    let mut rendered = Vec::new();

    for target in module.targets() {
        let name = module.target_name(target);
        // A module edge and an edge to that module's main target are distinct
        // in the graph but name the same product here.
        let mut seen = BTreeSet::new();
        let mut dependencies: Vec<String> = node
            .dependencies(target, configuration)
            .iter()
            .map(|dependency| target_dependency(module, dependency, graph, configuration))
            .filter(|rendered| seen.insert(rendered.clone()))
            .collect();

        let is_macro_implementation =
            *target == ModuleTarget::MacroImplementation && module.macro_configuration().is_some();
        if is_macro_implementation {
            dependencies.push(syntax_product("SwiftSyntaxMacros"));
            if module
                .macro_configuration()
                .is_some_and(|config| config.requires_compiler_plugin)
            {
                dependencies.push(syntax_product("SwiftCompilerPlugin"));
            }
        }
        if target.is_main() {
            dependencies.extend(module.external_dependencies().iter().map(|external| {
                format!(
                    ".product(name: {}, package: {})",
                    quoted(&external.product),
                    quoted(&external.package)
                )
            }));
        }

        let kind = if is_macro_implementation {
            "macro"
        } else if target.is_main() && module.product() == ProductKind::Executable {
            "executableTarget"
        } else {
            "target"
        };

        let indent = INDENT.repeat(3);
        let mut arguments = vec![
            format!("{indent}name: {}", quoted(&name)),
            format!("{indent}dependencies: [{}]", dependencies.join(", ")),
        ];
        if !configuration.build_settings().is_empty() {
            let flags: Vec<String> = configuration
                .build_settings()
                .iter()
                .map(|flag| quoted(flag))
                .collect();
            arguments.push(format!(
                "{indent}swiftSettings: [.unsafeFlags([{}])]",
                flags.join(", ")
            ));
        }
        rendered.push(format!(
            ".{kind}(\n{}\n{})",
            arguments.join(",\n"),
            INDENT.repeat(2)
        ));
    }

    if module.has_tests() {
        let main = module.target_name(&ModuleTarget::Main);
        rendered.push(format!(
            ".testTarget(\n{i3}name: {},\n{i3}dependencies: [{}]\n{i2})",
            quoted(&format!("{}Tests", module.name())),
            quoted(&main),
            i3 = INDENT.repeat(3),
            i2 = INDENT.repeat(2),
        ));
    }

    rendered
}

fn target_dependency(
    module: &Module,
    dependency: &ModuleDependency,
    graph: &ModuleGraph,
    configuration: &PackageConfiguration,
) -> String {
    if dependency.module_name() == module.name() {
        return quoted(&dependency.target_name());
    }
    let package = graph
        .node(dependency.module_name())
        .map(|other| package_identity(other.module(), configuration))
        .unwrap_or_else(|| dependency.module_name().to_string());
    format!(
        ".product(name: {}, package: {})",
        quoted(&dependency.target_name()),
        quoted(&package)
    )
}

/// SwiftPM names a local package after the last component of its path,
/// not after the `name:` in its manifest.
fn package_identity(module: &Module, configuration: &PackageConfiguration) -> String {
    module
        .resolved_path(configuration)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| module.name().to_string())
}

fn syntax_product(name: &str) -> String {
    format!(".product(name: {}, package: \"swift-syntax\")", quoted(name))
}

fn placeholder_source(module: &Module, target: &ModuleTarget, name: &str) -> String {
    match target {
        ModuleTarget::MacroImplementation if module.macro_configuration().is_some() => format!(
            "import SwiftCompilerPlugin\nimport SwiftSyntaxMacros\n\n@main\nstruct {name}Plugin: CompilerPlugin {{\n{INDENT}let providingMacros: [Macro.Type] = []\n}}\n"
        ),
        _ => format!("// {name}\n"),
    }
}

/// Path from one module directory to another, with `/` separators.
fn relative_path(from: &Path, to: &Path) -> String {
    let relative = pathdiff::diff_paths(to, from).unwrap_or_else(|| PathBuf::from(to));
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// `label: [...]` argument with one item per line. Swift before 6.1 rejects
/// a trailing comma in an argument list, so none is written.
fn list(depth: usize, label: &str, items: &[String]) -> String {
    let indent = INDENT.repeat(depth);
    if items.is_empty() {
        return format!("{indent}{label}: []");
    }
    let items: Vec<String> = items
        .iter()
        .map(|item| format!("{indent}{INDENT}{item}"))
        .collect();
    format!("{indent}{label}: [\n{}\n{indent}]", items.join(",\n"))
}

fn failed(module: &Module, reason: impl ToString) -> ApplicationError {
    ApplicationError::RenderingFailed {
        module: module.name().to_string(),
        reason: reason.to_string(),
    }
}
