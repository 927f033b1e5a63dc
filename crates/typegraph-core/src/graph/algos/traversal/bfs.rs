use std::collections::btree_set;
use std::mem;

use crate::error::{GraphError, Result};
use crate::graph::algos::shared::{
    assert_node, expand, AlgorithmScope, DirectedScope, HopBounded, Lifecycle, ScopedAlgorithm,
};
use crate::graph::{GraphProvider, NodeId, NodeSet};

use super::Traversal;

const ALGORITHM: &str = "TraversalBfs";

/// Breadth-first walk, level by level
///
/// Nodes are marked visited when discovered, so the next-level frontier never
/// holds a node already produced or queued.
pub struct TraversalBfs<'a> {
    graph: &'a dyn GraphProvider,
    source: NodeId,
    scope: AlgorithmScope<'a>,
    visited: NodeSet,
    current: btree_set::IntoIter<NodeId>,
    next_level: NodeSet,
    level: u32,
    pending: Option<(NodeId, u32)>,
    depth: u32,
}

impl<'a> TraversalBfs<'a> {
    /// Start from `source`, which must be a live node
    pub fn new(graph: &'a dyn GraphProvider, source: NodeId) -> Result<Self> {
        assert_node(graph, source)?;
        Ok(Self {
            graph,
            source,
            scope: AlgorithmScope::new(ALGORITHM),
            visited: NodeSet::new(),
            current: NodeSet::new().into_iter(),
            next_level: NodeSet::new(),
            level: 0,
            pending: None,
            depth: 0,
        })
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    fn start(&mut self) -> Result<()> {
        self.scope.begin()?;
        let mut first = NodeSet::new();
        if self.scope.accepts_node(self.graph, self.source)? {
            first.insert(self.source);
            self.visited.insert(self.source);
        }
        self.current = first.into_iter();
        tracing::debug!(source = %self.source, max_hops = self.scope.max_hops(), "bfs_started");
        Ok(())
    }

    /// Move to the next node of the current level, switching levels as needed
    fn advance(&mut self) -> Option<(NodeId, u32)> {
        loop {
            if let Some(node) = self.current.next() {
                return Some((node, self.level));
            }
            if self.next_level.is_empty() {
                return None;
            }
            self.current = mem::take(&mut self.next_level).into_iter();
            self.level += 1;
        }
    }

    /// Queue the unvisited neighbors of a node just produced
    fn discover(&mut self, node: NodeId, depth: u32) -> Result<()> {
        if !self.scope.can_expand(depth) {
            return Ok(());
        }
        for step in expand(self.graph, &self.scope, node)? {
            if self.visited.insert(step.node) {
                self.next_level.insert(step.node);
            }
        }
        Ok(())
    }

    fn fail(&mut self, err: GraphError) -> GraphError {
        self.scope.finish();
        err
    }
}

impl Traversal for TraversalBfs<'_> {
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
            tracing::debug!(visited = self.visited.len(), levels = self.level, "bfs_exhausted");
            self.scope.finish();
        }
        Ok(self.pending.is_some())
    }

    fn next(&mut self) -> Result<NodeId> {
        if !self.has_next()? {
            return Err(GraphError::NoSuchElement {
                algorithm: ALGORITHM,
            });
        }
        let Some((node, depth)) = self.pending.take() else {
            return Err(GraphError::NoSuchElement {
                algorithm: ALGORITHM,
            });
        };
        if let Err(e) = self.discover(node, depth) {
            return Err(self.fail(e));
        }
        self.depth = depth;
        Ok(node)
    }

    fn current_depth(&self) -> u32 {
        self.depth
    }
}

impl<'a> ScopedAlgorithm<'a> for TraversalBfs<'a> {
    type Graph = dyn GraphProvider + 'a;

    fn parts(&mut self) -> (&Self::Graph, &mut AlgorithmScope<'a>) {
        (self.graph, &mut self.scope)
    }
}

impl<'a> DirectedScope<'a> for TraversalBfs<'a> {}

impl<'a> HopBounded<'a> for TraversalBfs<'a> {}
