use std::collections::HashMap;

use crate::error::Result;
use crate::graph::algos::shared::{
    expand, AlgorithmScope, DirectedScope, HopBounded, ScopedAlgorithm,
};
use crate::graph::{EdgeId, GraphProvider, NodeId, NodeSet};

use super::{reconstruct, FoundPath, PathCore, ShortestPath, SinglePairShortestPath};

const ALGORITHM: &str = "SinglePairShortestPathBfs";

/// Unweighted shortest path: the fewest hops from source to destination
pub struct SinglePairShortestPathBfs<'a> {
    core: PathCore<'a>,
}

impl<'a> SinglePairShortestPathBfs<'a> {
    /// Both endpoints must be live nodes
    pub fn new(graph: &'a dyn GraphProvider, source: NodeId, destination: NodeId) -> Result<Self> {
        Ok(Self {
            core: PathCore::new(graph, source, destination, ALGORITHM)?,
        })
    }
}

/// Level-synchronous BFS that stops as soon as the destination is discovered
fn search(core: &PathCore<'_>) -> Result<Option<FoundPath>> {
    let (source, destination) = (core.source, core.destination);
    if !core.endpoints_in_scope()? {
        return Ok(None);
    }
    if source == destination {
        return reconstruct(&HashMap::new(), source, destination, 0.0).map(Some);
    }

    let mut visited = NodeSet::from([source]);
    let mut predecessors: HashMap<NodeId, (NodeId, EdgeId)> = HashMap::new();
    let mut frontier = vec![source];
    let mut level = 0u32;

    while !frontier.is_empty() && core.scope.can_expand(level) {
        let mut next_level = Vec::new();
        for node in frontier {
            for step in expand(core.graph, &core.scope, node)? {
                if !visited.insert(step.node) {
                    continue;
                }
                predecessors.insert(step.node, (node, step.edge));
                if step.node == destination {
                    let hops = f64::from(level + 1);
                    return reconstruct(&predecessors, source, destination, hops).map(Some);
                }
                next_level.push(step.node);
            }
        }
        frontier = next_level;
        level += 1;
    }
    tracing::trace!(levels = level, visited = visited.len(), "bfs_path_search_exhausted");
    Ok(None)
}

impl ShortestPath for SinglePairShortestPathBfs<'_> {
    #[tracing::instrument(skip(self), fields(algorithm = ALGORITHM, source = %self.core.source, destination = %self.core.destination))]
    fn run(&mut self) -> Result<()> {
        self.core.run_with(search)
    }

    fn exists(&self) -> Result<bool> {
        self.core.exists()
    }

    fn cost(&self) -> Result<Option<f64>> {
        self.core.cost()
    }

    fn path_as_nodes(&self) -> Result<Vec<NodeId>> {
        self.core.path_as_nodes()
    }

    fn path_as_edges(&self) -> Result<Vec<EdgeId>> {
        self.core.path_as_edges()
    }
}

impl SinglePairShortestPath for SinglePairShortestPathBfs<'_> {
    fn source(&self) -> NodeId {
        self.core.source
    }

    fn destination(&self) -> NodeId {
        self.core.destination
    }
}

impl<'a> ScopedAlgorithm<'a> for SinglePairShortestPathBfs<'a> {
    type Graph = dyn GraphProvider + 'a;

    fn parts(&mut self) -> (&Self::Graph, &mut AlgorithmScope<'a>) {
        (self.core.graph, &mut self.core.scope)
    }
}

impl<'a> DirectedScope<'a> for SinglePairShortestPathBfs<'a> {}

impl<'a> HopBounded<'a> for SinglePairShortestPathBfs<'a> {}
