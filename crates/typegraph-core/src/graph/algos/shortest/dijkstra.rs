use std::collections::HashMap;
use std::time::Instant;

use crate::bail_invalid;
use crate::error::{GraphError, Result};
use crate::graph::algos::shared::{
    expand, AlgorithmScope, DirectedScope, HopBounded, ScopedAlgorithm,
};
use crate::graph::{
    AttrHandle, AttrOwner, Direction, EdgeId, GraphProvider, NodeId, NodeSet, TypeId,
};
use crate::trace_time;

use super::heap::{FibonacciHeap, HeapHandle};
use super::{reconstruct, FoundPath, PathCore, ShortestPath, SinglePairShortestPath};

const ALGORITHM: &str = "SinglePairShortestPathDijkstra";

/// Default cost of an edge with no weight attribute
const DEFAULT_EDGE_COST: f64 = 1.0;

/// Weighted shortest path over non-negative edge weights
///
/// Edge types bound to a numeric attribute with `add_weighted_edge_type`
/// cost that attribute's value; every other allowed edge, and weighted edges
/// with no value set, cost the unweighted edge cost.
pub struct SinglePairShortestPathDijkstra<'a> {
    core: PathCore<'a>,
    weights: HashMap<TypeId, AttrHandle>,
    unweighted_cost: f64,
}

/// Per-run weight lookup
struct Weights<'w> {
    graph: &'w dyn GraphProvider,
    attributes: &'w HashMap<TypeId, AttrHandle>,
    unweighted_cost: f64,
}

impl Weights<'_> {
    fn cost(&self, edge: EdgeId) -> Result<f64> {
        let edge_type = self.graph.edge_type(edge)?;
        let Some(attr) = self.attributes.get(&edge_type) else {
            return Ok(self.unweighted_cost);
        };
        match self.graph.numeric_value(edge, *attr)? {
            None => Ok(self.unweighted_cost),
            Some(weight) if weight >= 0.0 => Ok(weight),
            Some(weight) => Err(GraphError::NegativeWeight {
                edge: edge.0,
                weight,
            }),
        }
    }
}

impl<'a> SinglePairShortestPathDijkstra<'a> {
    /// Both endpoints must be live nodes
    pub fn new(graph: &'a dyn GraphProvider, source: NodeId, destination: NodeId) -> Result<Self> {
        Ok(Self {
            core: PathCore::new(graph, source, destination, ALGORITHM)?,
            weights: HashMap::new(),
            unweighted_cost: DEFAULT_EDGE_COST,
        })
    }

    /// Allow edge type `t` in `direction`, weighted by the numeric attribute `attr`
    ///
    /// `attr` must be a numeric attribute common to all edges or owned by `t`.
    pub fn add_weighted_edge_type(
        &mut self,
        t: TypeId,
        direction: Direction,
        attr: AttrHandle,
    ) -> Result<()> {
        self.core.scope.ensure_configuring("add weighted edge type")?;
        let info = self.core.graph.attribute_info(attr)?;
        if !info.kind.is_numeric() {
            return Err(GraphError::AttributeTypeMismatch {
                name: info.display_name(),
                expected: "numeric".to_string(),
                found: info.kind.to_string(),
            });
        }
        if info.owner != AttrOwner::AllEdges && info.owner != AttrOwner::Type(t) {
            return Err(GraphError::not_found(
                &format!("attribute {} on edge type", info.display_name()),
                t,
            ));
        }
        self.core.scope.add_edge_type(self.core.graph, t, direction)?;
        self.weights.insert(t, attr);
        Ok(())
    }

    /// Cost of edges without a weight; must be finite and non-negative
    pub fn set_unweighted_edge_cost(&mut self, cost: f64) -> Result<()> {
        self.core.scope.ensure_configuring("set unweighted edge cost")?;
        if !cost.is_finite() || cost < 0.0 {
            bail_invalid!("unweighted edge cost", cost);
        }
        self.unweighted_cost = cost;
        Ok(())
    }

    pub fn unweighted_edge_cost(&self) -> f64 {
        self.unweighted_cost
    }
}

/// Tentative state of a node reached but not yet settled
#[derive(Clone, Copy)]
struct Tentative {
    handle: HeapHandle,
    distance: f64,
}

fn search(core: &PathCore<'_>, weights: &Weights<'_>) -> Result<Option<FoundPath>> {
    let (source, destination) = (core.source, core.destination);
    if !core.endpoints_in_scope()? {
        return Ok(None);
    }

    let mut heap = FibonacciHeap::new();
    let mut tentative: HashMap<NodeId, Tentative> = HashMap::new();
    let mut hops: HashMap<NodeId, u32> = HashMap::from([(source, 0)]);
    let mut predecessors: HashMap<NodeId, (NodeId, EdgeId)> = HashMap::new();
    let mut settled = NodeSet::new();

    let handle = heap.insert(source, 0.0);
    tentative.insert(source, Tentative { handle, distance: 0.0 });

    while let Some((node, distance)) = heap.remove_min() {
        if node == destination {
            return reconstruct(&predecessors, source, destination, distance).map(Some);
        }
        settled.insert(node);
        let level = hops.get(&node).copied().unwrap_or_default();
        if !core.scope.can_expand(level) {
            continue;
        }

        for step in expand(core.graph, &core.scope, node)? {
            if settled.contains(step.node) {
                continue;
            }
            let candidate = distance + weights.cost(step.edge)?;
            match tentative.get(&step.node).copied() {
                Some(known) if candidate >= known.distance => continue,
                Some(known) => {
                    heap.decrease_key(known.handle, candidate);
                    tentative.insert(step.node, Tentative { distance: candidate, ..known });
                }
                None => {
                    let handle = heap.insert(step.node, candidate);
                    tentative.insert(step.node, Tentative { handle, distance: candidate });
                }
            }
            hops.insert(step.node, level + 1);
            predecessors.insert(step.node, (node, step.edge));
        }
    }
    tracing::trace!(settled = settled.len(), "dijkstra_heap_exhausted");
    Ok(None)
}

impl ShortestPath for SinglePairShortestPathDijkstra<'_> {
    #[tracing::instrument(skip(self), fields(algorithm = ALGORITHM, source = %self.core.source, destination = %self.core.destination, unweighted_cost = self.unweighted_cost))]
    fn run(&mut self) -> Result<()> {
        let start = Instant::now();
        let weights = Weights {
            graph: self.core.graph,
            attributes: &self.weights,
            unweighted_cost: self.unweighted_cost,
        };
        let outcome = self.core.run_with(|core| search(core, &weights));
        trace_time!(start, "dijkstra");
        outcome
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

impl SinglePairShortestPath for SinglePairShortestPathDijkstra<'_> {
    fn source(&self) -> NodeId {
        self.core.source
    }

    fn destination(&self) -> NodeId {
        self.core.destination
    }
}

impl<'a> ScopedAlgorithm<'a> for SinglePairShortestPathDijkstra<'a> {
    type Graph = dyn GraphProvider + 'a;

    fn parts(&mut self) -> (&Self::Graph, &mut AlgorithmScope<'a>) {
        (self.core.graph, &mut self.core.scope)
    }
}

impl<'a> DirectedScope<'a> for SinglePairShortestPathDijkstra<'a> {}

impl<'a> HopBounded<'a> for SinglePairShortestPathDijkstra<'a> {}
