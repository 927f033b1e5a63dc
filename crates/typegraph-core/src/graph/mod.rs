//! Typed graph model and the algorithms run over it
//!
//! - `types` / `objects`: identifiers, attribute metadata, ordered id sets
//! - `provider`: the read (and attribute write) surface algorithms consume
//! - `filter`: allowed node and edge types
//! - `algos`: traversal, connectivity and shortest-path algorithms

pub mod algos;
pub mod filter;
pub mod objects;
pub mod provider;
pub mod types;

pub use filter::TypeFilter;
pub use objects::{EdgeSet, NodeSet, ObjectSet};
pub use provider::{GraphProvider, GraphStore};
pub use types::{
    AttrHandle, AttrKind, AttrOwner, AttrScope, AttributeInfo, Direction, EdgeId, NodeId, ObjectId,
    TypeId, Value,
};
