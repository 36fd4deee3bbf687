use std::collections::HashMap;

use super::{configuration::PackageConfiguration, node::ModuleNode};
use crate::domain::{error::DomainError, validation::GraphValidator};

/// The ordered node list of one generation run.
///
/// Construction guarantees every module name appears once and every module
/// is internally consistent. [`ModuleGraph::validate`] proves the rest.
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    nodes: Vec<ModuleNode>,
    index: HashMap<String, usize>,
}

impl ModuleGraph {
    /// # Errors
    ///
    /// - `DuplicateModule` if two nodes share a module name
    /// - any error from `Module::validate`
    pub fn new(nodes: impl IntoIterator<Item = ModuleNode>) -> Result<Self, DomainError> {
        let nodes: Vec<ModuleNode> = nodes.into_iter().collect();
        let mut index = HashMap::with_capacity(nodes.len());

        for (position, node) in nodes.iter().enumerate() {
            node.module().validate()?;
            if index.insert(node.name().to_string(), position).is_some() {
                return Err(DomainError::DuplicateModule {
                    name: node.name().to_string(),
                });
            }
        }

        Ok(Self { nodes, index })
    }

    /// Nodes in graph order.
    pub fn nodes(&self) -> &[ModuleNode] {
        &self.nodes
    }

    pub fn node(&self, name: &str) -> Option<&ModuleNode> {
        self.index.get(name).map(|&position| &self.nodes[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Run every graph check; the first failure is returned.
    pub fn validate(&self, configuration: &PackageConfiguration) -> Result<(), DomainError> {
        GraphValidator::new(self, configuration).validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::module::{Module, ModuleLocation},
        value_objects::{ModuleTarget, ModuleType},
    };

    #[test]
    fn duplicate_names_are_rejected_even_if_modules_differ() {
        let a = Module::new("Api", ModuleLocation::typed(ModuleType::Client));
        let b = Module::new("Api", ModuleLocation::path("Elsewhere")).with_tests(true);

        let err = ModuleGraph::new([ModuleNode::new(a), ModuleNode::new(b)]).unwrap_err();
        assert_eq!(err, DomainError::DuplicateModule { name: "Api".into() });
    }

    #[test]
    fn invalid_module_is_rejected_at_construction() {
        let broken = Module::new("Api", ModuleLocation::typed(ModuleType::Client))
            .with_targets([ModuleTarget::Main, ModuleTarget::Main]);
        assert!(matches!(
            ModuleGraph::new([ModuleNode::new(broken)]),
            Err(DomainError::InvalidModule(_))
        ));
    }

    #[test]
    fn lookup_preserves_graph_order() {
        let graph = ModuleGraph::new([
            ModuleNode::new(Module::new("B", ModuleLocation::typed(ModuleType::Utility))),
            ModuleNode::new(Module::new("A", ModuleLocation::typed(ModuleType::Utility))),
        ])
        .unwrap();

        let names: Vec<_> = graph.nodes().iter().map(ModuleNode::name).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(graph.node("A").map(ModuleNode::name), Some("A"));
        assert!(graph.node("C").is_none());
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn empty_graph_is_valid() {
        let graph = ModuleGraph::new([]).unwrap();
        let config = PackageConfiguration::builder("Shop").build().unwrap();
        assert!(graph.is_empty());
        assert!(graph.validate(&config).is_ok());
    }
}
