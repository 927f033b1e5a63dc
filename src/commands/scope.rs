//! Resolve scope flags against a loaded graph

use crate::cli::ScopeArgs;
use typegraph_core::error::{GraphError, Result};
use typegraph_core::graph::algos::{DirectedScope, HopBounded, ScopedAlgorithm};
use typegraph_core::graph::{Direction, GraphProvider, NodeSet, TypeId};
use typegraph_core::store::LoadedGraph;

/// Scope flags with every name resolved to a graph id
#[derive(Debug, Clone)]
pub struct ResolvedScope {
    /// `None` allows every node type
    pub node_types: Option<Vec<TypeId>>,
    /// `None` allows every edge type in `direction`
    pub edge_types: Option<Vec<(TypeId, Direction)>>,
    pub direction: Direction,
    pub excluded_nodes: NodeSet,
}

impl ResolvedScope {
    pub fn resolve(graph: &LoadedGraph, args: &ScopeArgs) -> Result<Self> {
        let node_types = if args.node_types.is_empty() {
            None
        } else {
            let types = args
                .node_types
                .iter()
                .map(|name| node_type(graph, name))
                .collect::<Result<Vec<_>>>()?;
            Some(types)
        };

        let edge_types = if args.edge_types.is_empty() {
            None
        } else {
            let types = args
                .edge_types
                .iter()
                .map(|arg| {
                    let t = edge_type(graph, &arg.name)?;
                    Ok((t, arg.direction.unwrap_or(args.direction)))
                })
                .collect::<Result<Vec<_>>>()?;
            Some(types)
        };

        let excluded_nodes = args
            .excluded_nodes
            .iter()
            .map(|key| graph.node(key))
            .collect::<Result<NodeSet>>()?;

        Ok(Self {
            node_types,
            edge_types,
            direction: args.direction,
            excluded_nodes,
        })
    }

    /// Apply node types and exclusions
    pub fn apply_nodes<'a, A: ScopedAlgorithm<'a>>(&'a self, algorithm: &mut A) -> Result<()> {
        match &self.node_types {
            None => algorithm.add_all_node_types()?,
            Some(types) => {
                for t in types {
                    algorithm.add_node_type(*t)?;
                }
            }
        }
        if !self.excluded_nodes.is_empty() {
            algorithm.exclude_nodes(&self.excluded_nodes)?;
        }
        Ok(())
    }

    /// Apply edge types with their directions
    pub fn apply_edges<'a, A: DirectedScope<'a>>(&self, algorithm: &mut A) -> Result<()> {
        match &self.edge_types {
            None => algorithm.add_all_edge_types(self.direction),
            Some(types) => types
                .iter()
                .try_for_each(|(t, direction)| algorithm.add_edge_type(*t, *direction)),
        }
    }

    /// Node types, edge types, exclusions and hop bound in one go
    pub fn configure<'a, A>(&'a self, algorithm: &mut A, max_hops: u32) -> Result<()>
    where
        A: DirectedScope<'a> + HopBounded<'a>,
    {
        self.apply_nodes(algorithm)?;
        self.apply_edges(algorithm)?;
        algorithm.set_maximum_hops(max_hops)
    }
}

/// Resolve a node type by name
pub fn node_type(graph: &LoadedGraph, name: &str) -> Result<TypeId> {
    graph
        .store
        .find_type(name)
        .filter(|t| graph.store.is_node_type(*t))
        .ok_or_else(|| GraphError::not_found("node type", name))
}

/// Resolve an edge type by name
pub fn edge_type(graph: &LoadedGraph, name: &str) -> Result<TypeId> {
    graph
        .store
        .find_type(name)
        .filter(|t| graph.store.is_edge_type(*t))
        .ok_or_else(|| GraphError::not_found("edge type", name))
}

/// Name of a type, or its numeric id
pub fn type_label(graph: &LoadedGraph, t: TypeId) -> String {
    graph
        .store
        .type_name(t)
        .map(str::to_string)
        .unwrap_or_else(|| t.to_string())
}
