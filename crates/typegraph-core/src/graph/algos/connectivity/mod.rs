//! Connected components
//!
//! - `weak`: components of the graph with every edge taken as undirected
//! - `strong`: strongly connected components (Gabow's path-based algorithm)
//! - `components`: the read-only result view
//!
//! A run may persist its result as an integer node attribute, which
//! `ConnectedComponents::from_materialized` reads back later.

mod components;
mod strong;
mod weak;

#[cfg(test)]
mod tests;

pub use components::ConnectedComponents;
pub use strong::StrongConnectivityGabow;
pub use weak::WeakConnectivityDfs;

use crate::bail_invalid;
use crate::error::{GraphError, Result};
use crate::graph::algos::shared::AlgorithmScope;
use crate::graph::{AttrKind, AttrOwner, AttrScope, GraphStore, NodeSet, ObjectId, Value};

/// Whole-graph component computation
pub trait Connectivity {
    /// Persist the result of `run` in a new node attribute called `name`
    fn set_materialized_attribute(&mut self, name: &str) -> Result<()>;

    /// Compute the components; callable once
    fn run(&mut self) -> Result<()>;

    /// Result of `run`
    fn connected_components(&self) -> Result<&ConnectedComponents>;
}

/// State shared by both connectivity algorithms
struct ConnectivityCore<'a> {
    graph: &'a mut dyn GraphStore,
    scope: AlgorithmScope<'a>,
    materialize: Option<String>,
    result: Option<ConnectedComponents>,
}

impl<'a> ConnectivityCore<'a> {
    fn new(graph: &'a mut dyn GraphStore, algorithm: &'static str) -> Self {
        Self {
            graph,
            scope: AlgorithmScope::new(algorithm),
            materialize: None,
            result: None,
        }
    }

    fn set_materialized_attribute(&mut self, name: &str) -> Result<()> {
        self.scope.ensure_configuring("set materialized attribute")?;
        if name.trim().is_empty() {
            bail_invalid!("materialized attribute name", "(empty)");
        }
        if self.graph.find_attribute(name).is_some() {
            return Err(GraphError::AttributeInUse {
                name: name.to_string(),
            });
        }
        self.materialize = Some(name.to_string());
        Ok(())
    }

    /// Every allowed, non-excluded node
    fn seed(&self) -> Result<NodeSet> {
        let graph = &*self.graph;
        let mut nodes = NodeSet::new();
        for node_type in self.scope.filter().node_types() {
            nodes.extend(
                graph
                    .nodes_of_type(node_type)?
                    .into_iter()
                    .filter(|node| !self.scope.is_node_excluded(*node)),
            );
        }
        Ok(nodes)
    }

    /// Store the result, writing it to the materialized attribute if requested
    fn complete(&mut self, mut components: ConnectedComponents) -> Result<()> {
        if let Some(name) = self.materialize.as_deref() {
            let attr = self.graph.create_attribute(
                Some(name),
                AttrKind::Integer,
                AttrOwner::AllNodes,
                AttrScope::Persistent,
            )?;
            for (id, nodes) in components.iter() {
                for node in nodes {
                    self.graph.set_attribute_value(
                        ObjectId::Node(node),
                        attr,
                        Value::Integer(id as i64),
                    )?;
                }
            }
            components.set_attribute(name);
            tracing::debug!(attribute = name, "components_materialized");
        }
        self.result = Some(components);
        Ok(())
    }

    fn components(&self) -> Result<&ConnectedComponents> {
        self.scope.ensure_done()?;
        self.result.as_ref().ok_or(GraphError::NotRun {
            algorithm: self.scope.algorithm(),
        })
    }
}
