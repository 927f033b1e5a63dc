//! Graph algorithm implementations
//!
//! - `traversal`: BFS and DFS node iterators
//! - `connectivity`: weak and strong connected components
//! - `shortest`: single-pair shortest paths (BFS and Dijkstra)
//! - `shared`: configuration scope and lifecycle common to all of them

pub mod connectivity;
pub mod shared;
pub mod shortest;
pub mod traversal;

pub use connectivity::{
    ConnectedComponents, Connectivity, StrongConnectivityGabow, WeakConnectivityDfs,
};
pub use shared::{AlgorithmScope, DirectedScope, HopBounded, Lifecycle, ScopedAlgorithm};
pub use shortest::{
    FibonacciHeap, ShortestPath, SinglePairShortestPath, SinglePairShortestPathBfs,
    SinglePairShortestPathDijkstra,
};
pub use traversal::{Traversal, TraversalBfs, TraversalDfs};
