//! Single-source node walks
//!
//! Both walks produce the source first at depth 0, then every node reachable
//! through allowed, non-excluded edges exactly once. Configuration is frozen
//! by the first `has_next`/`next` call.

mod bfs;
mod dfs;


pub use bfs::TraversalBfs;
pub use dfs::TraversalDfs;

use crate::error::Result;
use crate::graph::NodeId;

/// Pull-based node iteration
pub trait Traversal {
    /// Whether another node can be produced
    fn has_next(&mut self) -> Result<bool>;

    /// Next node; `NoSuchElement` once exhausted
    fn next(&mut self) -> Result<NodeId>;

    /// Hop depth of the node last returned by `next`
    fn current_depth(&self) -> u32;

    /// Iterate the remaining nodes as `(node, depth)` pairs
    fn walk(&mut self) -> Walk<'_, Self>
    where
        Self: Sized,
    {
        Walk {
            traversal: self,
            failed: false,
        }
    }
}

/// Iterator adapter returned by [`Traversal::walk`]
///
/// Stops after yielding the first error.
pub struct Walk<'t, T: ?Sized> {
    traversal: &'t mut T,
    failed: bool,
}

impl<T: Traversal + ?Sized> Iterator for Walk<'_, T> {
    type Item = Result<(NodeId, u32)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let step = match self.traversal.has_next() {
            Ok(false) => return None,
            Ok(true) => self
                .traversal
                .next()
                .map(|node| (node, self.traversal.current_depth())),
            Err(e) => Err(e),
        };
        self.failed = step.is_err();
        Some(step)
    }
}
