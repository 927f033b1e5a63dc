//! In-memory reference Store
//!
//! `MemoryStore` implements the read and attribute-write surfaces the
//! algorithms consume. It holds a type schema, nodes, edges, and attributes
//! that are either persistent or transient. `reopen` models closing and
//! opening the Store again: transient attributes do not survive it.

pub mod document;

use std::collections::{BTreeMap, HashMap};

use crate::error::{GraphError, Result};
use crate::graph::{
    AttrHandle, AttrKind, AttrOwner, AttrScope, AttributeInfo, Direction, EdgeId, EdgeSet,
    GraphProvider, GraphStore, NodeId, NodeSet, ObjectId, TypeId, Value,
};

pub use document::{GraphDocument, LoadedGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeKind {
    Node,
    Edge { directed: bool },
}

#[derive(Debug, Clone)]
struct TypeDef {
    name: String,
    kind: TypeKind,
}

#[derive(Debug, Clone, Copy)]
struct EdgeRecord {
    edge_type: TypeId,
    tail: NodeId,
    head: NodeId,
}

/// In-memory typed property graph
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    types: BTreeMap<TypeId, TypeDef>,
    type_names: HashMap<String, TypeId>,
    nodes: BTreeMap<NodeId, TypeId>,
    edges: BTreeMap<EdgeId, EdgeRecord>,
    outgoing: HashMap<NodeId, Vec<EdgeId>>,
    ingoing: HashMap<NodeId, Vec<EdgeId>>,
    attributes: BTreeMap<AttrHandle, AttributeInfo>,
    attribute_names: HashMap<String, AttrHandle>,
    values: HashMap<AttrHandle, HashMap<ObjectId, Value>>,
    next_oid: u64,
    next_type: u32,
    next_attr: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a node type
    pub fn new_node_type(&mut self, name: &str) -> Result<TypeId> {
        self.declare_type(name, TypeKind::Node)
    }

    /// Declare a directed edge type
    pub fn new_edge_type(&mut self, name: &str) -> Result<TypeId> {
        self.declare_type(name, TypeKind::Edge { directed: true })
    }

    /// Declare an edge type navigable in both directions whatever the request
    pub fn new_undirected_edge_type(&mut self, name: &str) -> Result<TypeId> {
        self.declare_type(name, TypeKind::Edge { directed: false })
    }

    fn declare_type(&mut self, name: &str, kind: TypeKind) -> Result<TypeId> {
        if self.type_names.contains_key(name) {
            return Err(GraphError::already_exists("type", name));
        }
        let id = TypeId(self.next_type);
        self.next_type += 1;
        self.types.insert(
            id,
            TypeDef {
                name: name.to_string(),
                kind,
            },
        );
        self.type_names.insert(name.to_string(), id);
        Ok(id)
    }

    /// Resolve a type by name
    pub fn find_type(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    pub fn type_name(&self, t: TypeId) -> Option<&str> {
        self.types.get(&t).map(|def| def.name.as_str())
    }

    /// Create a node of a declared node type
    pub fn new_node(&mut self, node_type: TypeId) -> Result<NodeId> {
        if !self.is_node_type(node_type) {
            return Err(GraphError::TypeNotFound {
                kind: "node",
                id: node_type.0,
            });
        }
        let id = NodeId(self.next_object_id());
        self.nodes.insert(id, node_type);
        Ok(id)
    }

    /// Create an edge from `tail` to `head`
    pub fn new_edge(&mut self, edge_type: TypeId, tail: NodeId, head: NodeId) -> Result<EdgeId> {
        if !self.is_edge_type(edge_type) {
            return Err(GraphError::TypeNotFound {
                kind: "edge",
                id: edge_type.0,
            });
        }
        for node in [tail, head] {
            if !self.node_exists(node) {
                return Err(GraphError::NodeNotFound { id: node.0 });
            }
        }
        let id = EdgeId(self.next_object_id());
        self.edges.insert(
            id,
            EdgeRecord {
                edge_type,
                tail,
                head,
            },
        );
        self.outgoing.entry(tail).or_default().push(id);
        self.ingoing.entry(head).or_default().push(id);
        Ok(id)
    }

    fn next_object_id(&mut self) -> u64 {
        // Nodes and edges share one counter so ids never collide
        self.next_oid += 1;
        self.next_oid
    }

    /// Define a persistent named attribute
    pub fn new_attribute(&mut self, name: &str, kind: AttrKind, owner: AttrOwner) -> Result<AttrHandle> {
        self.create_attribute(Some(name), kind, owner, AttrScope::Persistent)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Close and open the Store again, dropping transient attributes
    pub fn reopen(mut self) -> Self {
        let transient: Vec<AttrHandle> = self
            .attributes
            .values()
            .filter(|info| info.scope == AttrScope::Transient)
            .map(|info| info.handle)
            .collect();
        for attr in transient {
            self.drop_attribute(attr);
        }
        self
    }

    fn drop_attribute(&mut self, attr: AttrHandle) -> Option<AttributeInfo> {
        let info = self.attributes.remove(&attr)?;
        if let Some(name) = &info.name {
            self.attribute_names.remove(name);
        }
        self.values.remove(&attr);
        Some(info)
    }

    fn edge_record(&self, edge: EdgeId) -> Result<&EdgeRecord> {
        self.edges
            .get(&edge)
            .ok_or(GraphError::EdgeNotFound { id: edge.0 })
    }

    fn object_type(&self, object: ObjectId) -> Result<TypeId> {
        match object {
            ObjectId::Node(node) => self.node_type(node),
            ObjectId::Edge(edge) => self.edge_type(edge),
        }
    }

    fn check_owner(&self, info: &AttributeInfo, object: ObjectId) -> Result<()> {
        let object_type = self.object_type(object)?;
        let allowed = match (info.owner, object) {
            (AttrOwner::AllNodes, ObjectId::Node(_)) => true,
            (AttrOwner::AllEdges, ObjectId::Edge(_)) => true,
            (AttrOwner::Type(t), _) => t == object_type,
            _ => false,
        };
        if allowed {
            Ok(())
        } else {
            Err(GraphError::invalid_value(
                &format!("object for attribute {}", info.display_name()),
                object.raw(),
            ))
        }
    }
}

impl GraphProvider for MemoryStore {
    fn node_exists(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn edge_exists(&self, edge: EdgeId) -> bool {
        self.edges.contains_key(&edge)
    }

    fn node_type(&self, node: NodeId) -> Result<TypeId> {
        self.nodes
            .get(&node)
            .copied()
            .ok_or(GraphError::NodeNotFound { id: node.0 })
    }

    fn edge_type(&self, edge: EdgeId) -> Result<TypeId> {
        Ok(self.edge_record(edge)?.edge_type)
    }

    fn node_types(&self) -> Vec<TypeId> {
        self.types
            .iter()
            .filter(|(_, def)| def.kind == TypeKind::Node)
            .map(|(id, _)| *id)
            .collect()
    }

    fn edge_types(&self) -> Vec<TypeId> {
        self.types
            .iter()
            .filter(|(_, def)| matches!(def.kind, TypeKind::Edge { .. }))
            .map(|(id, _)| *id)
            .collect()
    }

    fn is_node_type(&self, t: TypeId) -> bool {
        self.types
            .get(&t)
            .is_some_and(|def| def.kind == TypeKind::Node)
    }

    fn is_edge_type(&self, t: TypeId) -> bool {
        self.types
            .get(&t)
            .is_some_and(|def| matches!(def.kind, TypeKind::Edge { .. }))
    }

    fn nodes_of_type(&self, t: TypeId) -> Result<NodeSet> {
        if !self.is_node_type(t) {
            return Err(GraphError::TypeNotFound { kind: "node", id: t.0 });
        }
        Ok(self
            .nodes
            .iter()
            .filter(|(_, node_type)| **node_type == t)
            .map(|(id, _)| *id)
            .collect())
    }

    fn neighbors(&self, node: NodeId, edge_type: TypeId, direction: Direction) -> Result<NodeSet> {
        let edges = self.incident_edges(node, edge_type, direction)?;
        edges
            .iter()
            .map(|edge| self.other_endpoint(edge, node))
            .collect()
    }

    fn incident_edges(
        &self,
        node: NodeId,
        edge_type: TypeId,
        direction: Direction,
    ) -> Result<EdgeSet> {
        if !self.node_exists(node) {
            return Err(GraphError::NodeNotFound { id: node.0 });
        }
        let directed = match self.types.get(&edge_type).map(|def| def.kind) {
            Some(TypeKind::Edge { directed }) => directed,
            _ => {
                return Err(GraphError::TypeNotFound {
                    kind: "edge",
                    id: edge_type.0,
                })
            }
        };
        let direction = if directed { direction } else { Direction::Both };

        let mut result = EdgeSet::new();
        let mut collect = |adjacency: &HashMap<NodeId, Vec<EdgeId>>| {
            for edge in adjacency.get(&node).into_iter().flatten() {
                if self.edges[edge].edge_type == edge_type {
                    result.insert(*edge);
                }
            }
        };
        if direction != Direction::In {
            collect(&self.outgoing);
        }
        if direction != Direction::Out {
            collect(&self.ingoing);
        }
        Ok(result)
    }

    fn edge_endpoints(&self, edge: EdgeId) -> Result<(NodeId, NodeId)> {
        let record = self.edge_record(edge)?;
        Ok((record.tail, record.head))
    }

    fn find_attribute(&self, name: &str) -> Option<AttrHandle> {
        self.attribute_names.get(name).copied()
    }

    fn attribute_info(&self, attr: AttrHandle) -> Result<AttributeInfo> {
        self.attributes
            .get(&attr)
            .cloned()
            .ok_or_else(|| GraphError::AttributeNotFound {
                name: format!("#{}", attr.0),
            })
    }

    fn attribute_value(&self, object: ObjectId, attr: AttrHandle) -> Result<Option<Value>> {
        let info = self.attribute_info(attr)?;
        self.check_owner(&info, object)?;
        Ok(self
            .values
            .get(&attr)
            .and_then(|values| values.get(&object))
            .cloned())
    }
}

impl GraphStore for MemoryStore {
    fn create_attribute(
        &mut self,
        name: Option<&str>,
        kind: AttrKind,
        owner: AttrOwner,
        scope: AttrScope,
    ) -> Result<AttrHandle> {
        if let Some(name) = name {
            if self.attribute_names.contains_key(name) {
                return Err(GraphError::AttributeInUse {
                    name: name.to_string(),
                });
            }
        }
        if let AttrOwner::Type(t) = owner {
            if !self.types.contains_key(&t) {
                return Err(GraphError::TypeNotFound { kind: "owner", id: t.0 });
            }
        }

        let handle = AttrHandle(self.next_attr);
        self.next_attr += 1;
        self.attributes.insert(
            handle,
            AttributeInfo {
                handle,
                name: name.map(str::to_string),
                kind,
                owner,
                scope,
            },
        );
        if let Some(name) = name {
            self.attribute_names.insert(name.to_string(), handle);
        }
        tracing::trace!(attr = handle.0, ?name, %kind, ?scope, "create_attribute");
        Ok(handle)
    }

    fn set_attribute_value(
        &mut self,
        object: ObjectId,
        attr: AttrHandle,
        value: Value,
    ) -> Result<()> {
        let info = self.attribute_info(attr)?;
        self.check_owner(&info, object)?;

        let value = match (info.kind, value) {
            (AttrKind::Double, Value::Integer(v)) => Value::Double(v as f64),
            (kind, value) if value.kind() == kind => value,
            (kind, value) => {
                return Err(GraphError::AttributeTypeMismatch {
                    name: info.display_name(),
                    expected: kind.to_string(),
                    found: value.kind().to_string(),
                })
            }
        };

        self.values.entry(attr).or_default().insert(object, value);
        Ok(())
    }

    fn remove_attribute(&mut self, attr: AttrHandle) -> Result<()> {
        self.drop_attribute(attr)
            .map(|_| ())
            .ok_or_else(|| GraphError::AttributeNotFound {
                name: format!("#{}", attr.0),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (MemoryStore, TypeId, TypeId, [NodeId; 3]) {
        let mut store = MemoryStore::new();
        let person = store.new_node_type("person").unwrap();
        let knows = store.new_edge_type("knows").unwrap();
        let a = store.new_node(person).unwrap();
        let b = store.new_node(person).unwrap();
        let c = store.new_node(person).unwrap();
        store.new_edge(knows, a, b).unwrap();
        store.new_edge(knows, c, a).unwrap();
        (store, person, knows, [a, b, c])
    }

    #[test]
    fn test_duplicate_type_name_rejected() {
        let mut store = MemoryStore::new();
        store.new_node_type("person").unwrap();
        let err = store.new_edge_type("person").unwrap_err();
        assert!(matches!(err, GraphError::AlreadyExists { .. }));
    }

    #[test]
    fn test_node_and_edge_ids_do_not_collide() {
        let (store, _, _, [a, b, c]) = sample();
        let edges: Vec<u64> = store.edges.keys().map(|e| e.0).collect();
        for node in [a, b, c] {
            assert!(!edges.contains(&node.0));
        }
    }

    #[test]
    fn test_neighbors_by_direction() {
        let (store, _, knows, [a, b, c]) = sample();
        assert_eq!(
            store.neighbors(a, knows, Direction::Out).unwrap().to_vec(),
            vec![b]
        );
        assert_eq!(
            store.neighbors(a, knows, Direction::In).unwrap().to_vec(),
            vec![c]
        );
        assert_eq!(store.neighbors(a, knows, Direction::Both).unwrap().len(), 2);
    }

    #[test]
    fn test_undirected_type_ignores_direction() {
        let mut store = MemoryStore::new();
        let person = store.new_node_type("person").unwrap();
        let sibling = store.new_undirected_edge_type("sibling").unwrap();
        let a = store.new_node(person).unwrap();
        let b = store.new_node(person).unwrap();
        store.new_edge(sibling, a, b).unwrap();
        assert_eq!(
            store.neighbors(b, sibling, Direction::Out).unwrap().to_vec(),
            vec![a]
        );
    }

    #[test]
    fn test_edge_with_missing_endpoint_rejected() {
        let (mut store, _, knows, [a, _, _]) = sample();
        let err = store.new_edge(knows, a, NodeId(999)).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound { id: 999 }));
    }

    #[test]
    fn test_node_of_edge_type_rejected() {
        let (mut store, _, knows, _) = sample();
        let err = store.new_node(knows).unwrap_err();
        assert!(matches!(err, GraphError::TypeNotFound { kind: "node", .. }));
    }

    #[test]
    fn test_attribute_roundtrip_and_kind_check() {
        let (mut store, _, knows, [a, b, _]) = sample();
        let edge = store.incident_edges(a, knows, Direction::Out).unwrap().to_vec()[0];
        let weight = store
            .new_attribute("weight", AttrKind::Double, AttrOwner::Type(knows))
            .unwrap();
        store
            .set_attribute_value(ObjectId::Edge(edge), weight, Value::Integer(2))
            .unwrap();
        assert_eq!(store.numeric_value(edge, weight).unwrap(), Some(2.0));

        let err = store
            .set_attribute_value(ObjectId::Edge(edge), weight, Value::String("x".into()))
            .unwrap_err();
        assert!(matches!(err, GraphError::AttributeTypeMismatch { .. }));

        let err = store
            .set_attribute_value(ObjectId::Node(b), weight, Value::Double(1.0))
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidValue { .. }));
    }

    #[test]
    fn test_numeric_value_on_string_attribute_fails() {
        let (mut store, _, knows, [a, _, _]) = sample();
        let edge = store.incident_edges(a, knows, Direction::Out).unwrap().to_vec()[0];
        let label = store
            .new_attribute("label", AttrKind::String, AttrOwner::AllEdges)
            .unwrap();
        let err = store.numeric_value(edge, label).unwrap_err();
        assert!(matches!(err, GraphError::AttributeTypeMismatch { .. }));
    }

    #[test]
    fn test_attribute_name_in_use() {
        let (mut store, _, _, _) = sample();
        store
            .new_attribute("cc", AttrKind::Integer, AttrOwner::AllNodes)
            .unwrap();
        let err = store
            .new_attribute("cc", AttrKind::Integer, AttrOwner::AllNodes)
            .unwrap_err();
        assert!(matches!(err, GraphError::AttributeInUse { .. }));
    }

    #[test]
    fn test_reopen_drops_transient_attributes() {
        let (mut store, _, _, [a, _, _]) = sample();
        let kept = store
            .new_attribute("kept", AttrKind::Integer, AttrOwner::AllNodes)
            .unwrap();
        let scratch = store
            .create_attribute(
                Some("scratch"),
                AttrKind::Integer,
                AttrOwner::AllNodes,
                AttrScope::Transient,
            )
            .unwrap();
        store
            .set_attribute_value(ObjectId::Node(a), kept, Value::Integer(1))
            .unwrap();
        store
            .set_attribute_value(ObjectId::Node(a), scratch, Value::Integer(2))
            .unwrap();

        let store = store.reopen();
        assert_eq!(store.find_attribute("kept"), Some(kept));
        assert_eq!(store.find_attribute("scratch"), None);
        assert_eq!(
            store.attribute_value(ObjectId::Node(a), kept).unwrap(),
            Some(Value::Integer(1))
        );
        assert!(store.attribute_info(scratch).is_err());
    }

    #[test]
    fn test_remove_attribute() {
        let (mut store, _, _, _) = sample();
        let attr = store
            .new_attribute("tmp", AttrKind::Boolean, AttrOwner::AllNodes)
            .unwrap();
        store.remove_attribute(attr).unwrap();
        assert_eq!(store.find_attribute("tmp"), None);
        assert!(matches!(
            store.remove_attribute(attr),
            Err(GraphError::AttributeNotFound { .. })
        ));
    }
}
