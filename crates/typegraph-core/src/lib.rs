//! Typegraph Core Library
//!
//! Graph algorithms over a typed property graph: BFS/DFS traversal,
//! weak and strong connectivity, and single-pair shortest paths.

pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod store;

pub use error::{GraphError, Result};
