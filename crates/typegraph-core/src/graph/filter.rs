use std::collections::{BTreeMap, BTreeSet};

use crate::error::{GraphError, Result};
use crate::graph::provider::GraphProvider;
use crate::graph::types::{Direction, NodeId, TypeId};

/// Allowed node types, and allowed edge types with their navigation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter {
    node_types: BTreeSet<TypeId>,
    edge_types: BTreeMap<TypeId, Direction>,
}

impl TypeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow a node type; it must be a node type of `graph`
    pub fn add_node_type<G: GraphProvider + ?Sized>(&mut self, graph: &G, t: TypeId) -> Result<()> {
        if !graph.is_node_type(t) {
            return Err(GraphError::TypeNotFound { kind: "node", id: t.0 });
        }
        self.node_types.insert(t);
        Ok(())
    }

    pub fn add_all_node_types<G: GraphProvider + ?Sized>(&mut self, graph: &G) {
        self.node_types.extend(graph.node_types());
    }

    /// Allow an edge type navigated in `direction`; re-adding replaces the direction
    pub fn add_edge_type<G: GraphProvider + ?Sized>(
        &mut self,
        graph: &G,
        t: TypeId,
        direction: Direction,
    ) -> Result<()> {
        if !graph.is_edge_type(t) {
            return Err(GraphError::TypeNotFound { kind: "edge", id: t.0 });
        }
        self.edge_types.insert(t, direction);
        Ok(())
    }

    pub fn add_all_edge_types<G: GraphProvider + ?Sized>(&mut self, graph: &G, direction: Direction) {
        for t in graph.edge_types() {
            self.edge_types.insert(t, direction);
        }
    }

    pub fn has_node_types(&self) -> bool {
        !self.node_types.is_empty()
    }

    pub fn has_edge_types(&self) -> bool {
        !self.edge_types.is_empty()
    }

    pub fn allows_node_type(&self, t: TypeId) -> bool {
        self.node_types.contains(&t)
    }

    /// Direction an edge type is navigated in, if allowed
    pub fn edge_direction(&self, t: TypeId) -> Option<Direction> {
        self.edge_types.get(&t).copied()
    }

    pub fn node_types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.node_types.iter().copied()
    }

    /// Allowed edge types with their direction, in type order
    pub fn edge_types(&self) -> impl Iterator<Item = (TypeId, Direction)> + '_ {
        self.edge_types.iter().map(|(t, d)| (*t, *d))
    }

    /// Whether a live node has an allowed type
    pub fn allows_node<G: GraphProvider + ?Sized>(&self, graph: &G, node: NodeId) -> Result<bool> {
        Ok(self.allows_node_type(graph.node_type(node)?))
    }
}
