//! Single-pair shortest paths
//!
//! - `bfs`: fewest hops
//! - `dijkstra`: least total weight, over a Fibonacci heap (`heap`)

mod bfs;
mod dijkstra;
mod heap;

#[cfg(test)]
mod tests;

pub use bfs::SinglePairShortestPathBfs;
pub use dijkstra::SinglePairShortestPathDijkstra;
pub use heap::{FibonacciHeap, HeapHandle, ONE_OVER_LOG_PHI};

use std::collections::HashMap;

use crate::error::{GraphError, Result};
use crate::graph::algos::shared::{assert_node, AlgorithmScope};
use crate::graph::{EdgeId, GraphProvider, NodeId};

/// Results of a one-shot path computation
pub trait ShortestPath {
    /// Compute the path; callable once
    fn run(&mut self) -> Result<()>;

    /// Whether the destination was reached
    fn exists(&self) -> Result<bool>;

    /// Hop count or total weight; `None` when no path exists
    fn cost(&self) -> Result<Option<f64>>;

    /// Nodes from source to destination; empty when no path exists
    fn path_as_nodes(&self) -> Result<Vec<NodeId>>;

    /// Edges from source to destination; empty when no path exists
    fn path_as_edges(&self) -> Result<Vec<EdgeId>>;
}

/// A shortest path between one fixed source and one fixed destination
pub trait SinglePairShortestPath: ShortestPath {
    fn source(&self) -> NodeId;
    fn destination(&self) -> NodeId;
}

/// A path found by a run
#[derive(Debug, Clone, PartialEq)]
struct FoundPath {
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
    cost: f64,
}

/// Walk predecessor links back from `destination` to `source`
fn reconstruct(
    predecessors: &HashMap<NodeId, (NodeId, EdgeId)>,
    source: NodeId,
    destination: NodeId,
    cost: f64,
) -> Result<FoundPath> {
    let mut nodes = vec![destination];
    let mut edges = Vec::new();
    let mut node = destination;
    while node != source {
        let Some(&(previous, edge)) = predecessors.get(&node) else {
            return Err(GraphError::Other(format!(
                "no predecessor recorded for node {}",
                node
            )));
        };
        nodes.push(previous);
        edges.push(edge);
        node = previous;
    }
    nodes.reverse();
    edges.reverse();
    Ok(FoundPath { nodes, edges, cost })
}

/// Endpoints, scope and outcome shared by both path algorithms
struct PathCore<'a> {
    graph: &'a dyn GraphProvider,
    source: NodeId,
    destination: NodeId,
    scope: AlgorithmScope<'a>,
    /// `None` until a run completes; `Some(None)` when no path exists
    outcome: Option<Option<FoundPath>>,
}

impl<'a> PathCore<'a> {
    fn new(
        graph: &'a dyn GraphProvider,
        source: NodeId,
        destination: NodeId,
        algorithm: &'static str,
    ) -> Result<Self> {
        assert_node(graph, source)?;
        assert_node(graph, destination)?;
        Ok(Self {
            graph,
            source,
            destination,
            scope: AlgorithmScope::new(algorithm),
            outcome: None,
        })
    }

    /// Run `compute` once; a failed run leaves no result behind
    fn run_with(
        &mut self,
        compute: impl FnOnce(&Self) -> Result<Option<FoundPath>>,
    ) -> Result<()> {
        self.scope.begin()?;
        let outcome = compute(self);
        self.scope.finish();
        let found = outcome?;

        match &found {
            Some(path) => tracing::debug!(
                source = %self.source,
                destination = %self.destination,
                hops = path.edges.len(),
                cost = path.cost,
                "shortest_path_found"
            ),
            None => tracing::debug!(
                source = %self.source,
                destination = %self.destination,
                "shortest_path_not_found"
            ),
        }
        self.outcome = Some(found);
        Ok(())
    }

    fn found(&self) -> Result<Option<&FoundPath>> {
        self.scope.ensure_done()?;
        match &self.outcome {
            Some(found) => Ok(found.as_ref()),
            None => Err(GraphError::NotRun {
                algorithm: self.scope.algorithm(),
            }),
        }
    }

    fn exists(&self) -> Result<bool> {
        Ok(self.found()?.is_some())
    }

    fn cost(&self) -> Result<Option<f64>> {
        Ok(self.found()?.map(|path| path.cost))
    }

    fn path_as_nodes(&self) -> Result<Vec<NodeId>> {
        Ok(self
            .found()?
            .map(|path| path.nodes.clone())
            .unwrap_or_default())
    }

    fn path_as_edges(&self) -> Result<Vec<EdgeId>> {
        Ok(self
            .found()?
            .map(|path| path.edges.clone())
            .unwrap_or_default())
    }

    /// Both endpoints pass the type filter and exclusions
    fn endpoints_in_scope(&self) -> Result<bool> {
        Ok(self.scope.accepts_node(self.graph, self.source)?
            && self.scope.accepts_node(self.graph, self.destination)?)
    }
}
