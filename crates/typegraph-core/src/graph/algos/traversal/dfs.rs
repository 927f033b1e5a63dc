use std::collections::btree_set;

use crate::error::{GraphError, Result};
use crate::graph::algos::shared::{
    allowed_neighbors, assert_node, AlgorithmScope, DirectedScope, HopBounded, Lifecycle,
    ScopedAlgorithm,
};
use crate::graph::{GraphProvider, NodeId, NodeSet};

use super::Traversal;

const ALGORITHM: &str = "TraversalDfs";

/// Neighbors still to try for one node on the DFS path
struct Frame {
    neighbors: btree_set::IntoIter<NodeId>,
    depth: u32,
}

/// Depth-first walk in pre-order, with an explicit stack of neighbor frames
pub struct TraversalDfs<'a> {
    graph: &'a dyn GraphProvider,
    source: NodeId,
    scope: AlgorithmScope<'a>,
    visited: NodeSet,
    stack: Vec<Frame>,
    pending: Option<(NodeId, u32)>,
    depth: u32,
}

impl<'a> TraversalDfs<'a> {
    /// Start from `source`, which must be a live node
    pub fn new(graph: &'a dyn GraphProvider, source: NodeId) -> Result<Self> {
        assert_node(graph, source)?;
        Ok(Self {
            graph,
            source,
            scope: AlgorithmScope::new(ALGORITHM),
            visited: NodeSet::new(),
            stack: Vec::new(),
            pending: None,
            depth: 0,
        })
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    fn start(&mut self) -> Result<()> {
        self.scope.begin()?;
        if self.scope.accepts_node(self.graph, self.source)? {
            self.visited.insert(self.source);
            self.pending = Some((self.source, 0));
        }
        tracing::debug!(source = %self.source, max_hops = self.scope.max_hops(), "dfs_started");
        Ok(())
    }

    /// Pop frames until an unvisited neighbor turns up
    fn advance(&mut self) -> Option<(NodeId, u32)> {
        while let Some(frame) = self.stack.last_mut() {
            match frame.neighbors.next() {
                Some(node) if self.visited.insert(node) => return Some((node, frame.depth + 1)),
                Some(_) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }

    /// Push a frame for a node just produced, unless it sits at the hop bound
    fn descend(&mut self, node: NodeId, depth: u32) -> Result<()> {
        if !self.scope.can_expand(depth) {
            return Ok(());
        }
        let mut neighbors = allowed_neighbors(self.graph, &self.scope, node)?;
        neighbors.retain(|n| !self.visited.contains(n));
        if !neighbors.is_empty() {
            self.stack.push(Frame {
                neighbors: neighbors.into_iter(),
                depth,
            });
        }
        Ok(())
    }
}

impl Traversal for TraversalDfs<'_> {
    fn has_next(&mut self) -> Result<bool> {
        match self.scope.lifecycle() {
            Lifecycle::Configuring => self.start()?,
            Lifecycle::Running => {}
            Lifecycle::Done => return Ok(false),
        }
        if self.pending.is_none() {
            self.pending = self.advance();
        }
        if self.pending.is_none() {
            tracing::debug!(visited = self.visited.len(), "dfs_exhausted");
            self.scope.finish();
        }
        Ok(self.pending.is_some())
    }

    fn next(&mut self) -> Result<NodeId> {
        let Some((node, depth)) = self.has_next()?.then(|| self.pending.take()).flatten() else {
            return Err(GraphError::NoSuchElement {
                algorithm: ALGORITHM,
            });
        };
        if let Err(e) = self.descend(node, depth) {
            self.scope.finish();
            return Err(e);
        }
        self.depth = depth;
        Ok(node)
    }

    fn current_depth(&self) -> u32 {
        self.depth
    }
}

impl<'a> ScopedAlgorithm<'a> for TraversalDfs<'a> {
    type Graph = dyn GraphProvider + 'a;

    fn parts(&mut self) -> (&Self::Graph, &mut AlgorithmScope<'a>) {
        (self.graph, &mut self.scope)
    }
}

impl<'a> DirectedScope<'a> for TraversalDfs<'a> {}

impl<'a> HopBounded<'a> for TraversalDfs<'a> {}
