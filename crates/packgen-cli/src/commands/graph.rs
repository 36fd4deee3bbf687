//! `packgen graph`: print resolved dependencies per module and target.
//!
//! The graph is described without being validated, so a graph that fails
//! `validate` can still be inspected here.

use std::fmt::Write as _;

use tracing::instrument;

use packgen_core::application::{GraphService, ModuleInfo};

use crate::{
    cli::{GraphArgs, GraphFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(format = ?args.format))]
pub fn execute(args: GraphArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = GraphService::new(Box::new(super::loader(&args.source, &config)));
    let modules = service.describe()?;

    match args.format {
        GraphFormat::Json => output.json(&modules)?,
        GraphFormat::List => output.data(render_list(&modules).trim_end())?,
        GraphFormat::Dot => output.data(render_dot(&modules).trim_end())?,
        GraphFormat::Table => {
            for module in &modules {
                output.header(&module_heading(module))?;
                for target in &module.targets {
                    let deps = if target.dependencies.is_empty() {
                        "-".to_string()
                    } else {
                        target.dependencies.join(", ")
                    };
                    output.print(&format!("  {:<28} -> {deps}", target.name))?;
                }
                if !module.exports.is_empty() {
                    output.detail(&format!("  exports: {}", module.exports.join(", ")))?;
                }
            }
        }
    }
    Ok(())
}

fn module_heading(module: &ModuleInfo) -> String {
    let kind = module.module_type.as_deref().unwrap_or("path");
    format!("{} [{kind}] {}", module.name, module.path.display())
}

/// One edge per line, `Module:target -> Dependency`.
fn render_list(modules: &[ModuleInfo]) -> String {
    let mut out = String::new();
    for module in modules {
        for target in &module.targets {
            for dep in &target.dependencies {
                let _ = writeln!(out, "{}:{} -> {dep}", module.name, target.target);
            }
        }
    }
    out
}

/// Graphviz digraph with one cluster per module and one node per target.
fn render_dot(modules: &[ModuleInfo]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph packgen {{");
    let _ = writeln!(out, "    rankdir=LR;");
    let _ = writeln!(out, "    node [shape=box, fontname=\"Helvetica\"];");

    for (index, module) in modules.iter().enumerate() {
        let _ = writeln!(out, "    subgraph cluster_{index} {{");
        let _ = writeln!(out, "        label=\"{}\";", escape(&module.name));
        for target in &module.targets {
            let _ = writeln!(
                out,
                "        \"{}\" [label=\"{}\"];",
                escape(&vertex(&module.name, &target.target)),
                escape(&target.name)
            );
        }
        let _ = writeln!(out, "    }}");
    }

    for module in modules {
        for target in &module.targets {
            for dep in &target.dependencies {
                let to = if dep.contains(':') {
                    dep.clone()
                } else {
                    vertex(dep, "main")
                };
                let _ = writeln!(
                    out,
                    "    \"{}\" -> \"{}\";",
                    escape(&vertex(&module.name, &target.target)),
                    escape(&to)
                );
            }
        }
    }

    let _ = writeln!(out, "}}");
    out
}

fn vertex(module: &str, target: &str) -> String {
    format!("{module}:{target}")
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use packgen_core::application::TargetInfo;
    use std::path::PathBuf;

    fn screen() -> ModuleInfo {
        ModuleInfo {
            name: "Screen".into(),
            module_type: Some("screen".into()),
            path: PathBuf::from("Modules/Screens/Screen"),
            product: "library".into(),
            platforms: vec![],
            targets: vec![
                TargetInfo {
                    target: "main".into(),
                    name: "Screen".into(),
                    dependencies: vec!["Screen:views".into(), "Client".into()],
                },
                TargetInfo {
                    target: "views".into(),
                    name: "ScreenViews".into(),
                    dependencies: vec![],
                },
            ],
            exports: vec!["Client".into()],
            has_tests: false,
        }
    }

    #[test]
    fn list_has_one_line_per_edge() {
        assert_eq!(
            render_list(&[screen()]),
            "Screen:main -> Screen:views\nScreen:main -> Client\n"
        );
    }

    #[test]
    fn dot_points_bare_dependencies_at_main() {
        let dot = render_dot(&[screen()]);
        assert!(dot.starts_with("digraph packgen {"));
        assert!(dot.contains("\"Screen:views\" [label=\"ScreenViews\"];"));
        assert!(dot.contains("\"Screen:main\" -> \"Client:main\";"));
        assert!(dot.contains("\"Screen:main\" -> \"Screen:views\";"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn heading_marks_path_modules() {
        let mut module = screen();
        module.module_type = None;
        assert_eq!(module_heading(&module), "Screen [path] Modules/Screens/Screen");
    }
}
