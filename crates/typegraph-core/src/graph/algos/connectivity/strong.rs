use std::collections::{btree_set, HashMap};
use std::time::Instant;

use crate::error::Result;
use crate::graph::algos::shared::{
    allowed_neighbors, AlgorithmScope, DirectedScope, ScopedAlgorithm,
};
use crate::graph::{GraphStore, NodeId, NodeSet};
use crate::trace_time;

use super::{ConnectedComponents, Connectivity, ConnectivityCore};

const ALGORITHM: &str = "StrongConnectivityGabow";

/// A node whose successors are being explored
struct Frame {
    node: NodeId,
    successors: btree_set::IntoIter<NodeId>,
}

/// Working state of one Gabow run
///
/// `path` holds the nodes of the current DFS path not yet assigned to a
/// component; `roots` holds the preorder indices of the candidate component
/// roots on that path.
#[derive(Default)]
struct GabowState {
    preorder: HashMap<NodeId, usize>,
    counter: usize,
    path: Vec<NodeId>,
    roots: Vec<usize>,
    frames: Vec<Frame>,
    assigned: NodeSet,
    members: Vec<NodeSet>,
}

/// Strongly connected components by Gabow's path-based algorithm
///
/// Edge types are navigated in their configured direction; two nodes share a
/// component iff each reaches the other.
pub struct StrongConnectivityGabow<'a> {
    core: ConnectivityCore<'a>,
}

impl<'a> StrongConnectivityGabow<'a> {
    pub fn new(graph: &'a mut dyn GraphStore) -> Self {
        Self {
            core: ConnectivityCore::new(graph, ALGORITHM),
        }
    }

    fn compute(&self) -> Result<ConnectedComponents> {
        let mut state = GabowState::default();
        for root in &self.core.seed()? {
            if !state.preorder.contains_key(&root) {
                self.explore(&mut state, root)?;
            }
        }
        Ok(ConnectedComponents::from_members(state.members))
    }

    /// Number a node and push it on the path with a frame for its successors
    fn enter(&self, state: &mut GabowState, node: NodeId) -> Result<()> {
        let successors = allowed_neighbors(&*self.core.graph, &self.core.scope, node)?;
        state.preorder.insert(node, state.counter);
        state.roots.push(state.counter);
        state.counter += 1;
        state.path.push(node);
        state.frames.push(Frame {
            node,
            successors: successors.into_iter(),
        });
        Ok(())
    }

    /// Iterative DFS from `root`, emitting every component it closes
    fn explore(&self, state: &mut GabowState, root: NodeId) -> Result<()> {
        self.enter(state, root)?;
        while let Some(frame) = state.frames.last_mut() {
            let node = frame.node;
            match frame.successors.next() {
                Some(next) => match state.preorder.get(&next).copied() {
                    None => self.enter(state, next)?,
                    Some(index) if !state.assigned.contains(next) => {
                        // next is on the path: collapse the cycle
                        while state.roots.last().is_some_and(|&top| top > index) {
                            state.roots.pop();
                        }
                    }
                    Some(_) => {}
                },
                None => {
                    state.frames.pop();
                    Self::close(state, node);
                }
            }
        }
        Ok(())
    }

    /// Finish a node; if it is the top candidate root, pop its component
    fn close(state: &mut GabowState, node: NodeId) {
        let index = state.preorder.get(&node).copied();
        if state.roots.last().copied() != index {
            return;
        }
        state.roots.pop();
        let mut component = NodeSet::new();
        while let Some(member) = state.path.pop() {
            component.insert(member);
            state.assigned.insert(member);
            if member == node {
                break;
            }
        }
        state.members.push(component);
    }
}

impl Connectivity for StrongConnectivityGabow<'_> {
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
            tracing::debug!(count = components.count(), "strong_components_found");
        }
        trace_time!(start, "strong_connectivity");
        outcome
    }

    fn connected_components(&self) -> Result<&ConnectedComponents> {
        self.core.components()
    }
}

impl<'a> ScopedAlgorithm<'a> for StrongConnectivityGabow<'a> {
    type Graph = dyn GraphStore + 'a;

    fn parts(&mut self) -> (&Self::Graph, &mut AlgorithmScope<'a>) {
        (&*self.core.graph, &mut self.core.scope)
    }
}

impl<'a> DirectedScope<'a> for StrongConnectivityGabow<'a> {}
