use crate::error::{GraphError, Result};
use crate::graph::filter::TypeFilter;
use crate::graph::objects::{EdgeSet, NodeSet};
use crate::graph::provider::GraphProvider;
use crate::graph::types::{Direction, EdgeId, NodeId, TypeId};

/// One-shot algorithm lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Accepting configuration
    Configuring,
    /// Run or iteration in progress; configuration is frozen
    Running,
    /// Finished (successfully or not); cannot run again
    Done,
}

/// Configuration and lifecycle shared by every algorithm
#[derive(Debug)]
pub struct AlgorithmScope<'a> {
    algorithm: &'static str,
    filter: TypeFilter,
    excluded_nodes: Option<&'a NodeSet>,
    excluded_edges: Option<&'a EdgeSet>,
    max_hops: u32,
    lifecycle: Lifecycle,
}

impl<'a> AlgorithmScope<'a> {
    pub fn new(algorithm: &'static str) -> Self {
        Self {
            algorithm,
            filter: TypeFilter::new(),
            excluded_nodes: None,
            excluded_edges: None,
            max_hops: 0,
            lifecycle: Lifecycle::Configuring,
        }
    }

    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn filter(&self) -> &TypeFilter {
        &self.filter
    }

    pub fn max_hops(&self) -> u32 {
        self.max_hops
    }

    /// Fail unless configuration is still open
    pub fn ensure_configuring(&self, operation: &'static str) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Configuring => Ok(()),
            _ => Err(GraphError::ConfigurationFrozen {
                algorithm: self.algorithm,
                operation,
            }),
        }
    }

    /// Freeze configuration and start running
    ///
    /// Fails if the algorithm already ran, or if no node or edge type is allowed.
    pub fn begin(&mut self) -> Result<()> {
        if self.lifecycle != Lifecycle::Configuring {
            return Err(GraphError::AlreadyRun {
                algorithm: self.algorithm,
            });
        }
        if !self.filter.has_node_types() {
            return Err(GraphError::MissingNodeTypes {
                algorithm: self.algorithm,
            });
        }
        if !self.filter.has_edge_types() {
            return Err(GraphError::MissingEdgeTypes {
                algorithm: self.algorithm,
            });
        }
        self.lifecycle = Lifecycle::Running;
        Ok(())
    }

    pub fn finish(&mut self) {
        self.lifecycle = Lifecycle::Done;
    }

    /// Fail unless the algorithm has completed
    pub fn ensure_done(&self) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Done => Ok(()),
            _ => Err(GraphError::NotRun {
                algorithm: self.algorithm,
            }),
        }
    }

    pub fn add_node_type<G: GraphProvider + ?Sized>(&mut self, graph: &G, t: TypeId) -> Result<()> {
        self.ensure_configuring("add node type")?;
        self.filter.add_node_type(graph, t)
    }

    pub fn add_all_node_types<G: GraphProvider + ?Sized>(&mut self, graph: &G) -> Result<()> {
        self.ensure_configuring("add node types")?;
        self.filter.add_all_node_types(graph);
        Ok(())
    }

    pub fn add_edge_type<G: GraphProvider + ?Sized>(
        &mut self,
        graph: &G,
        t: TypeId,
        direction: Direction,
    ) -> Result<()> {
        self.ensure_configuring("add edge type")?;
        self.filter.add_edge_type(graph, t, direction)
    }

    pub fn add_all_edge_types<G: GraphProvider + ?Sized>(
        &mut self,
        graph: &G,
        direction: Direction,
    ) -> Result<()> {
        self.ensure_configuring("add edge types")?;
        self.filter.add_all_edge_types(graph, direction);
        Ok(())
    }

    /// Replace the excluded node set
    pub fn exclude_nodes(&mut self, nodes: &'a NodeSet) -> Result<()> {
        self.ensure_configuring("exclude nodes")?;
        self.excluded_nodes = Some(nodes);
        Ok(())
    }

    /// Replace the excluded edge set
    pub fn exclude_edges(&mut self, edges: &'a EdgeSet) -> Result<()> {
        self.ensure_configuring("exclude edges")?;
        self.excluded_edges = Some(edges);
        Ok(())
    }

    /// 0 means unlimited
    pub fn set_maximum_hops(&mut self, hops: u32) -> Result<()> {
        self.ensure_configuring("set maximum hops")?;
        self.max_hops = hops;
        Ok(())
    }

    /// Whether a node reached at `depth` may be expanded further
    pub fn can_expand(&self, depth: u32) -> bool {
        self.max_hops == 0 || depth < self.max_hops
    }

    pub fn is_node_excluded(&self, node: NodeId) -> bool {
        self.excluded_nodes.is_some_and(|set| set.contains(node))
    }

    pub fn is_edge_excluded(&self, edge: EdgeId) -> bool {
        self.excluded_edges.is_some_and(|set| set.contains(edge))
    }

    /// Allowed type and not excluded
    pub fn accepts_node<G: GraphProvider + ?Sized>(&self, graph: &G, node: NodeId) -> Result<bool> {
        Ok(!self.is_node_excluded(node) && self.filter.allows_node(graph, node)?)
    }
}

/// One allowed hop out of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub edge: EdgeId,
    pub node: NodeId,
}

/// Every allowed, non-excluded hop from `node` to an accepted neighbor
pub fn expand<G: GraphProvider + ?Sized>(
    graph: &G,
    scope: &AlgorithmScope<'_>,
    node: NodeId,
) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (edge_type, direction) in scope.filter().edge_types() {
        for edge in &graph.incident_edges(node, edge_type, direction)? {
            if scope.is_edge_excluded(edge) {
                continue;
            }
            let other = graph.other_endpoint(edge, node)?;
            if scope.accepts_node(graph, other)? {
                steps.push(Step { edge, node: other });
            }
        }
    }
    Ok(steps)
}

/// Distinct accepted neighbors of `node`
pub fn allowed_neighbors<G: GraphProvider + ?Sized>(
    graph: &G,
    scope: &AlgorithmScope<'_>,
    node: NodeId,
) -> Result<NodeSet> {
    Ok(expand(graph, scope, node)?
        .into_iter()
        .map(|step| step.node)
        .collect())
}

/// Fail with `NodeNotFound` unless `node` is live
pub fn assert_node<G: GraphProvider + ?Sized>(graph: &G, node: NodeId) -> Result<()> {
    if graph.node_exists(node) {
        Ok(())
    } else {
        Err(GraphError::NodeNotFound { id: node.0 })
    }
}

/// Configuration common to every algorithm family
pub trait ScopedAlgorithm<'a> {
    type Graph: GraphProvider + ?Sized;

    /// Borrow the graph and the mutable scope at once
    fn parts(&mut self) -> (&Self::Graph, &mut AlgorithmScope<'a>);

    /// Allow nodes of type `t`
    fn add_node_type(&mut self, t: TypeId) -> Result<()> {
        let (graph, scope) = self.parts();
        scope.add_node_type(graph, t)
    }

    /// Allow every node type of the graph
    fn add_all_node_types(&mut self) -> Result<()> {
        let (graph, scope) = self.parts();
        scope.add_all_node_types(graph)
    }

    /// Nodes never visited, whatever their type; replaces any previous set
    fn exclude_nodes(&mut self, nodes: &'a NodeSet) -> Result<()> {
        self.parts().1.exclude_nodes(nodes)
    }

    /// Edges never navigated, whatever their type; replaces any previous set
    fn exclude_edges(&mut self, edges: &'a EdgeSet) -> Result<()> {
        self.parts().1.exclude_edges(edges)
    }
}

/// Edge types navigated in a caller-chosen direction
pub trait DirectedScope<'a>: ScopedAlgorithm<'a> {
    fn add_edge_type(&mut self, t: TypeId, direction: Direction) -> Result<()> {
        let (graph, scope) = self.parts();
        scope.add_edge_type(graph, t, direction)
    }

    fn add_all_edge_types(&mut self, direction: Direction) -> Result<()> {
        let (graph, scope) = self.parts();
        scope.add_all_edge_types(graph, direction)
    }
}

/// Algorithms bounded by a number of hops from their source
pub trait HopBounded<'a>: ScopedAlgorithm<'a> {
    /// 0, the default, means unlimited
    fn set_maximum_hops(&mut self, hops: u32) -> Result<()> {
        self.parts().1.set_maximum_hops(hops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn line() -> (MemoryStore, TypeId, TypeId, Vec<NodeId>, Vec<EdgeId>) {
        let mut store = MemoryStore::new();
        let node = store.new_node_type("n").unwrap();
        let edge = store.new_edge_type("e").unwrap();
        let nodes: Vec<NodeId> = (0..3).map(|_| store.new_node(node).unwrap()).collect();
        let edges = vec![
            store.new_edge(edge, nodes[0], nodes[1]).unwrap(),
            store.new_edge(edge, nodes[1], nodes[2]).unwrap(),
        ];
        (store, node, edge, nodes, edges)
    }

    #[test]
    fn test_begin_requires_types() {
        let (store, node, edge, _, _) = line();
        let mut scope = AlgorithmScope::new("test");
        assert!(matches!(
            scope.begin(),
            Err(GraphError::MissingNodeTypes { .. })
        ));
        scope.add_node_type(&store, node).unwrap();
        assert!(matches!(
            scope.begin(),
            Err(GraphError::MissingEdgeTypes { .. })
        ));
        scope.add_edge_type(&store, edge, Direction::Out).unwrap();
        scope.begin().unwrap();
        assert_eq!(scope.lifecycle(), Lifecycle::Running);
    }

    #[test]
    fn test_lifecycle_transitions() {
        let (store, node, edge, _, _) = line();
        let mut scope = AlgorithmScope::new("test");
        scope.add_node_type(&store, node).unwrap();
        scope.add_edge_type(&store, edge, Direction::Out).unwrap();
        assert!(matches!(scope.ensure_done(), Err(GraphError::NotRun { .. })));

        scope.begin().unwrap();
        assert!(matches!(
            scope.set_maximum_hops(2),
            Err(GraphError::ConfigurationFrozen { .. })
        ));
        scope.finish();
        scope.ensure_done().unwrap();
        assert!(matches!(scope.begin(), Err(GraphError::AlreadyRun { .. })));
    }

    #[test]
    fn test_expand_respects_direction_and_exclusions() {
        let (store, node, edge, nodes, edges) = line();
        let mut scope = AlgorithmScope::new("test");
        scope.add_node_type(&store, node).unwrap();
        scope.add_edge_type(&store, edge, Direction::Both).unwrap();

        let steps = expand(&store, &scope, nodes[1]).unwrap();
        assert_eq!(steps.len(), 2);

        let excluded = EdgeSet::from([edges[0]]);
        scope.exclude_edges(&excluded).unwrap();
        let steps = expand(&store, &scope, nodes[1]).unwrap();
        assert_eq!(
            steps,
            vec![Step {
                edge: edges[1],
                node: nodes[2]
            }]
        );
    }

    #[test]
    fn test_exclusions_replace_not_merge() {
        let (store, node, edge, nodes, _) = line();
        let first = NodeSet::from([nodes[0]]);
        let second = NodeSet::from([nodes[2]]);
        let mut scope = AlgorithmScope::new("test");
        scope.add_node_type(&store, node).unwrap();
        scope.add_edge_type(&store, edge, Direction::Both).unwrap();
        scope.exclude_nodes(&first).unwrap();
        scope.exclude_nodes(&second).unwrap();

        assert!(!scope.is_node_excluded(nodes[0]));
        assert!(scope.is_node_excluded(nodes[2]));
        assert_eq!(
            allowed_neighbors(&store, &scope, nodes[1]).unwrap().to_vec(),
            vec![nodes[0]]
        );
    }

    #[test]
    fn test_can_expand_with_hop_bound() {
        let mut scope = AlgorithmScope::new("test");
        assert!(scope.can_expand(1_000));
        scope.set_maximum_hops(2).unwrap();
        assert!(scope.can_expand(1));
        assert!(!scope.can_expand(2));
    }

    #[test]
    fn test_assert_node() {
        let (store, _, _, nodes, _) = line();
        assert!(assert_node(&store, nodes[0]).is_ok());
        assert!(matches!(
            assert_node(&store, NodeId(404)),
            Err(GraphError::NodeNotFound { id: 404 })
        ));
    }
}
