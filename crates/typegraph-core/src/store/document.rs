//! JSON graph documents
//!
//! A document names its types, attributes, nodes (by string key) and edges,
//! and loads into a fresh `MemoryStore`:
//!
//! ```json
//! {
//!   "node_types": ["city"],
//!   "edge_types": [{ "name": "road" }],
//!   "attributes": [{ "name": "km", "kind": "double", "owner": "road" }],
//!   "nodes": [{ "key": "A", "type": "city" }, { "key": "B", "type": "city" }],
//!   "edges": [{ "type": "road", "from": "A", "to": "B", "attrs": { "km": 1.5 } }]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::graph::{
    AttrHandle, AttrKind, AttrOwner, GraphProvider, GraphStore, NodeId, ObjectId, Value,
};
use crate::store::MemoryStore;

/// Owner keyword for attributes common to every node type
pub const OWNER_ALL_NODES: &str = "nodes";
/// Owner keyword for attributes common to every edge type
pub const OWNER_ALL_EDGES: &str = "edges";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub node_types: Vec<String>,
    #[serde(default)]
    pub edge_types: Vec<EdgeTypeDoc>,
    #[serde(default)]
    pub attributes: Vec<AttributeDoc>,
    #[serde(default)]
    pub nodes: Vec<NodeDoc>,
    #[serde(default)]
    pub edges: Vec<EdgeDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeTypeDoc {
    pub name: String,
    #[serde(default = "default_directed")]
    pub directed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeDoc {
    pub name: String,
    pub kind: AttrKind,
    /// `nodes`, `edges`, or a type name
    pub owner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDoc {
    pub key: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeDoc {
    #[serde(rename = "type")]
    pub edge_type: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, Value>,
}

fn default_directed() -> bool {
    true
}

/// A loaded store plus the node key mapping
#[derive(Debug)]
pub struct LoadedGraph {
    pub store: MemoryStore,
    keys: HashMap<String, NodeId>,
    names: HashMap<NodeId, String>,
}

impl LoadedGraph {
    /// Resolve a node key from the document
    pub fn node(&self, key: &str) -> Result<NodeId> {
        self.keys
            .get(key)
            .copied()
            .ok_or_else(|| GraphError::not_found("node key", key))
    }

    /// Document key of a node, if it came from the document
    pub fn key_of(&self, node: NodeId) -> Option<&str> {
        self.names.get(&node).map(String::as_str)
    }

    /// Key of a node, or its numeric id
    pub fn label(&self, node: NodeId) -> String {
        self.key_of(node)
            .map(str::to_string)
            .unwrap_or_else(|| node.to_string())
    }
}

impl GraphDocument {
    /// Read a document from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| GraphError::io_operation("read graph", path.display(), e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Build a `MemoryStore` holding this document
    pub fn load(&self) -> Result<LoadedGraph> {
        let mut store = MemoryStore::new();

        for name in &self.node_types {
            store.new_node_type(name)?;
        }
        for edge_type in &self.edge_types {
            if edge_type.directed {
                store.new_edge_type(&edge_type.name)?;
            } else {
                store.new_undirected_edge_type(&edge_type.name)?;
            }
        }

        let mut attributes: HashMap<&str, AttrHandle> = HashMap::new();
        for attr in &self.attributes {
            let owner = match attr.owner.as_str() {
                OWNER_ALL_NODES => AttrOwner::AllNodes,
                OWNER_ALL_EDGES => AttrOwner::AllEdges,
                type_name => AttrOwner::Type(resolve_type(&store, type_name)?),
            };
            let handle = store.new_attribute(&attr.name, attr.kind, owner)?;
            attributes.insert(attr.name.as_str(), handle);
        }

        let mut keys = HashMap::new();
        let mut names = HashMap::new();
        for node in &self.nodes {
            if keys.contains_key(&node.key) {
                return Err(GraphError::already_exists("node key", &node.key));
            }
            let node_type = resolve_type(&store, &node.node_type)?;
            let id = store.new_node(node_type)?;
            set_attrs(&mut store, &attributes, ObjectId::Node(id), &node.attrs)?;
            keys.insert(node.key.clone(), id);
            names.insert(id, node.key.clone());
        }

        let lookup = |key: &str| {
            keys.get(key)
                .copied()
                .ok_or_else(|| GraphError::not_found("node key", key))
        };
        for edge in &self.edges {
            let edge_type = resolve_type(&store, &edge.edge_type)?;
            let id = store.new_edge(edge_type, lookup(&edge.from)?, lookup(&edge.to)?)?;
            set_attrs(&mut store, &attributes, ObjectId::Edge(id), &edge.attrs)?;
        }

        tracing::debug!(
            nodes = store.node_count(),
            edges = store.edge_count(),
            "graph_document_loaded"
        );
        Ok(LoadedGraph { store, keys, names })
    }
}

impl GraphDocument {
    /// Copy a node attribute created on `graph` back into this document
    ///
    /// `graph` must have been loaded from this document. The attribute must be
    /// common to all nodes and not already declared here; nodes without a
    /// value stay without one.
    pub fn capture_node_attribute(&mut self, graph: &LoadedGraph, name: &str) -> Result<()> {
        let attr = graph
            .store
            .find_attribute(name)
            .ok_or_else(|| GraphError::AttributeNotFound {
                name: name.to_string(),
            })?;
        let info = graph.store.attribute_info(attr)?;
        if info.owner != AttrOwner::AllNodes {
            return Err(GraphError::invalid_value("node attribute owner", name));
        }
        if self.attributes.iter().any(|doc| doc.name == name) {
            return Err(GraphError::already_exists("attribute", name));
        }

        let mut captured = 0usize;
        for node in &mut self.nodes {
            let id = graph.node(&node.key)?;
            if let Some(value) = graph.store.attribute_value(ObjectId::Node(id), attr)? {
                node.attrs.insert(name.to_string(), value);
                captured += 1;
            }
        }
        self.attributes.push(AttributeDoc {
            name: name.to_string(),
            kind: info.kind,
            owner: OWNER_ALL_NODES.to_string(),
        });
        tracing::debug!(attribute = name, nodes = captured, "node_attribute_captured");
        Ok(())
    }

    /// Write the document as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .map_err(|e| GraphError::io_operation("write graph", path.display(), e))?;
        Ok(())
    }
}

fn resolve_type(store: &MemoryStore, name: &str) -> Result<crate::graph::TypeId> {
    store
        .find_type(name)
        .ok_or_else(|| GraphError::not_found("type", name))
}

fn set_attrs(
    store: &mut MemoryStore,
    attributes: &HashMap<&str, AttrHandle>,
    object: ObjectId,
    values: &BTreeMap<String, Value>,
) -> Result<()> {
    for (name, value) in values {
        let handle = attributes
            .get(name.as_str())
            .copied()
            .ok_or_else(|| GraphError::AttributeNotFound { name: name.clone() })?;
        store.set_attribute_value(object, handle, value.clone())?;
    }
    Ok(())
}
