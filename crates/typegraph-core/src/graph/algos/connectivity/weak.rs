use std::time::Instant;

use crate::error::Result;
use crate::graph::algos::shared::{allowed_neighbors, AlgorithmScope, ScopedAlgorithm};
use crate::graph::{Direction, GraphStore, NodeSet, TypeId};
use crate::trace_time;

use super::{ConnectedComponents, Connectivity, ConnectivityCore};

const ALGORITHM: &str = "WeakConnectivityDfs";

/// Weakly connected components by repeated depth-first search
///
/// Every allowed edge type is navigated in both directions.
pub struct WeakConnectivityDfs<'a> {
    core: ConnectivityCore<'a>,
}

impl<'a> WeakConnectivityDfs<'a> {
    pub fn new(graph: &'a mut dyn GraphStore) -> Self {
        Self {
            core: ConnectivityCore::new(graph, ALGORITHM),
        }
    }

    /// Allow edges of type `t`, navigated both ways
    pub fn add_edge_type(&mut self, t: TypeId) -> Result<()> {
        let (graph, scope) = self.parts();
        scope.add_edge_type(graph, t, Direction::Both)
    }

    pub fn add_all_edge_types(&mut self) -> Result<()> {
        let (graph, scope) = self.parts();
        scope.add_all_edge_types(graph, Direction::Both)
    }

    fn compute(&self) -> Result<ConnectedComponents> {
        let graph = &*self.core.graph;
        let scope = &self.core.scope;
        let mut not_visited = self.core.seed()?;
        let mut members = Vec::new();

        while let Some(start) = not_visited.pop_first() {
            let mut component = NodeSet::from([start]);
            let mut stack = vec![start];
            while let Some(node) = stack.pop() {
                for neighbor in &allowed_neighbors(graph, scope, node)? {
                    if not_visited.remove(neighbor) {
                        component.insert(neighbor);
                        stack.push(neighbor);
                    }
                }
            }
            members.push(component);
        }

        Ok(ConnectedComponents::from_members(members))
    }
}

impl Connectivity for WeakConnectivityDfs<'_> {
    fn set_materialized_attribute(&mut self, name: &str) -> Result<()> {
        self.core.set_materialized_attribute(name)
    }

    #[tracing::instrument(skip(self), fields(algorithm = ALGORITHM))]
    fn run(&mut self) -> Result<()> {
        self.core.scope.begin()?;
        let start = Instant::now();
        let outcome = self
            .compute()
            .and_then(|components| self.core.complete(components));
        self.core.scope.finish();

        if let Some(components) = &self.core.result {
            tracing::debug!(count = components.count(), "weak_components_found");
        }
        trace_time!(start, "weak_connectivity");
        outcome
    }

    fn connected_components(&self) -> Result<&ConnectedComponents> {
        self.core.components()
    }
}

impl<'a> ScopedAlgorithm<'a> for WeakConnectivityDfs<'a> {
    type Graph = dyn GraphStore + 'a;

    fn parts(&mut self) -> (&Self::Graph, &mut AlgorithmScope<'a>) {
        (&*self.core.graph, &mut self.core.scope)
    }
}
