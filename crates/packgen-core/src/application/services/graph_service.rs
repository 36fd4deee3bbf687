//! Graph Service - read-only graph queries.
//!
//! Loads, validates and describes a graph without writing anything.
//! Separated from GenerateService for single responsibility.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::ports::{GraphDefinition, GraphSource},
    domain::{ModuleNode, PackageConfiguration},
    error::PackgenResult,
};

/// Resolved view of one module for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleInfo {
    pub name: String,
    /// Module type, absent for explicit-path modules.
    #[serde(rename = "type")]
    pub module_type: Option<String>,
    pub path: PathBuf,
    pub product: String,
    pub platforms: Vec<String>,
    pub targets: Vec<TargetInfo>,
    pub exports: Vec<String>,
    pub has_tests: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetInfo {
    /// Target kind as written in manifests (`main`, `views`, ...).
    pub target: String,
    /// Target name inside the module (`CatalogViews`, ...).
    pub name: String,
    /// Resolved dependencies as `Module` or `Module:target`.
    pub dependencies: Vec<String>,
}

/// Counts reported after a successful validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub modules: usize,
    pub targets: usize,
    pub edges: usize,
}

/// Service for graph queries.
pub struct GraphService {
    source: Box<dyn GraphSource>,
}

impl GraphService {
    /// Create a new graph service.
    pub fn new(source: Box<dyn GraphSource>) -> Self {
        Self { source }
    }

    /// Load the graph without validating it.
    pub fn load(&self) -> PackgenResult<GraphDefinition> {
        self.source.load()
    }

    /// Load and validate the graph.
    #[instrument(skip_all)]
    pub fn validate(&self) -> PackgenResult<GraphSummary> {
        let GraphDefinition {
            configuration,
            graph,
        } = self.source.load()?;
        graph.validate(&configuration)?;

        let mut summary = GraphSummary {
            modules: graph.len(),
            targets: 0,
            edges: 0,
        };
        for node in graph.nodes() {
            for target in node.module().targets() {
                summary.targets += 1;
                summary.edges += node.dependencies(target, &configuration).len();
            }
        }
        debug!(?summary, "Graph is valid");
        Ok(summary)
    }

    /// Describe every module with its resolved dependencies, in graph order.
    ///
    /// The graph is not validated first, so a broken graph can still be
    /// inspected.
    #[instrument(skip_all)]
    pub fn describe(&self) -> PackgenResult<Vec<ModuleInfo>> {
        let GraphDefinition {
            configuration,
            graph,
        } = self.source.load()?;
        Ok(graph
            .nodes()
            .iter()
            .map(|node| describe_node(node, &configuration))
            .collect())
    }
}

fn describe_node(node: &ModuleNode, configuration: &PackageConfiguration) -> ModuleInfo {
    let module = node.module();
    ModuleInfo {
        name: module.name().to_string(),
        module_type: module.module_type().map(|t| t.to_string()),
        path: module.resolved_path(configuration),
        product: module.product().to_string(),
        platforms: module
            .resolved_platforms(configuration)
            .iter()
            .map(ToString::to_string)
            .collect(),
        targets: module
            .targets()
            .iter()
            .map(|target| TargetInfo {
                target: target.to_string(),
                name: module.target_name(target),
                dependencies: node
                    .dependencies(target, configuration)
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            })
            .collect(),
        exports: node.exports().to_vec(),
        has_tests: module.has_tests(),
    }
}
