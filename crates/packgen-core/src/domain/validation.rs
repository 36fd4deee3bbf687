//! Graph validation.
//!
//! [`GraphValidator`] runs four checks in a fixed order and stops at the
//! first failure:
//!
//! 1. every resolved dependency and every export names a module in the graph
//! 2. every export is among the node's dependent modules
//! 3. every explicit dependency is declared on one of the module's targets
//! 4. the resolved (module, target) graph is acyclic
//!
//! Earlier checks guard later ones, so a missing module is reported before
//! any cycle it might appear to cause.

use std::collections::HashMap;
use std::fmt;

use crate::domain::{
    entities::{configuration::PackageConfiguration, graph::ModuleGraph},
    error::DomainError,
    value_objects::ModuleTarget,
};

pub struct GraphValidator<'a> {
    graph: &'a ModuleGraph,
    configuration: &'a PackageConfiguration,
}

impl<'a> GraphValidator<'a> {
    pub fn new(graph: &'a ModuleGraph, configuration: &'a PackageConfiguration) -> Self {
        Self {
            graph,
            configuration,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.check_references()?;
        self.check_exports()?;
        self.check_targets()?;
        self.check_cycles()
    }

    fn check_references(&self) -> Result<(), DomainError> {
        for node in self.graph.nodes() {
            for target in node.module().targets() {
                for dependency in node.dependencies(target, self.configuration) {
                    if !self.graph.contains(dependency.module_name()) {
                        return Err(DomainError::MissingDependency {
                            module: node.name().to_string(),
                            dependency: dependency.module_name().to_string(),
                        });
                    }
                }
            }
            if let Some(export) = node.exports().iter().find(|e| !self.graph.contains(e)) {
                return Err(DomainError::MissingExport {
                    module: node.name().to_string(),
                    export: export.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_exports(&self) -> Result<(), DomainError> {
        for node in self.graph.nodes() {
            if node.exports().is_empty() {
                continue;
            }
            let dependent = node.dependent_modules(self.configuration);
            if let Some(export) = node.exports().iter().find(|e| !dependent.contains(e)) {
                return Err(DomainError::ExportNotInDependencies {
                    module: node.name().to_string(),
                    export: export.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_targets(&self) -> Result<(), DomainError> {
        for node in self.graph.nodes() {
            let undeclared = node
                .explicit_dependencies()
                .keys()
                .find(|target| !node.module().has_target(target));
            if let Some(target) = undeclared {
                return Err(DomainError::InvalidTarget {
                    module: node.name().to_string(),
                    target: target.to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_cycles(&self) -> Result<(), DomainError> {
        match CycleDetector::new(self.graph, self.configuration).find_cycle() {
            Some((vertex, cycle)) => Err(DomainError::CyclicDependency {
                vertex: vertex.to_string(),
                cycle: cycle.iter().map(Vertex::to_string).collect(),
            }),
            None => Ok(()),
        }
    }
}

// ── Cycle detection ───────────────────────────────────────────────────────────

/// One (module, target) pair of the resolved graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Vertex {
    module: String,
    target: ModuleTarget,
}

impl Vertex {
    fn new(module: impl Into<String>, target: ModuleTarget) -> Self {
        Self {
            module: module.into(),
            target,
        }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.target)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum VisitState {
    Visiting,
    Visited,
}

/// Depth-first search over resolved edges.
///
/// Visit state is shared across start vertices: a vertex that finished
/// without a cycle cannot reach any vertex still on the stack, so skipping
/// it never changes the verdict or the reported vertex.
struct CycleDetector<'a> {
    graph: &'a ModuleGraph,
    configuration: &'a PackageConfiguration,
    stack: Vec<Vertex>,
    states: HashMap<Vertex, VisitState>,
}

impl<'a> CycleDetector<'a> {
    fn new(graph: &'a ModuleGraph, configuration: &'a PackageConfiguration) -> Self {
        Self {
            graph,
            configuration,
            stack: Vec::new(),
            states: HashMap::new(),
        }
    }

    /// The vertex whose revisit closed a cycle, and the cycle itself.
    fn find_cycle(mut self) -> Option<(Vertex, Vec<Vertex>)> {
        let starts: Vec<Vertex> = self
            .graph
            .nodes()
            .iter()
            .flat_map(|node| {
                node.module()
                    .targets()
                    .iter()
                    .map(|target| Vertex::new(node.name(), target.clone()))
            })
            .collect();

        starts.into_iter().find_map(|start| self.visit(start))
    }

    fn edges(&self, vertex: &Vertex) -> Vec<Vertex> {
        let Some(node) = self.graph.node(&vertex.module) else {
            return Vec::new();
        };
        node.dependencies(&vertex.target, self.configuration)
            .iter()
            .map(|dependency| Vertex::new(dependency.module_name(), dependency.resolved_target()))
            .collect()
    }

    fn visit(&mut self, vertex: Vertex) -> Option<(Vertex, Vec<Vertex>)> {
        match self.states.get(&vertex) {
            Some(VisitState::Visited) => return None,
            Some(VisitState::Visiting) => {
                let idx = self.stack.iter().position(|v| v == &vertex).unwrap_or(0);
                let mut cycle: Vec<Vertex> = self.stack[idx..].to_vec();
                cycle.push(vertex.clone());
                return Some((vertex, cycle));
            }
            None => {
                self.states.insert(vertex.clone(), VisitState::Visiting);
            }
        }

        self.stack.push(vertex.clone());
        for next in self.edges(&vertex) {
            if let Some(found) = self.visit(next) {
                return Some(found);
            }
        }
        self.stack.pop();
        self.states.insert(vertex, VisitState::Visited);
        None
    }
}
