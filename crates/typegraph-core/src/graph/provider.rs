use crate::error::{GraphError, Result};
use crate::graph::objects::{EdgeSet, NodeSet};
use crate::graph::types::{
    AttrHandle, AttrKind, AttrOwner, AttrScope, AttributeInfo, Direction, EdgeId, NodeId, ObjectId,
    TypeId, Value,
};

/// Read access to a typed property graph
///
/// This is the whole surface the algorithms consume from a Store.
pub trait GraphProvider {
    fn node_exists(&self, node: NodeId) -> bool;
    fn edge_exists(&self, edge: EdgeId) -> bool;

    /// Type of a live node, `NodeNotFound` otherwise
    fn node_type(&self, node: NodeId) -> Result<TypeId>;
    /// Type of a live edge, `EdgeNotFound` otherwise
    fn edge_type(&self, edge: EdgeId) -> Result<TypeId>;

    /// All node types declared in the schema
    fn node_types(&self) -> Vec<TypeId>;
    /// All edge types declared in the schema
    fn edge_types(&self) -> Vec<TypeId>;

    fn is_node_type(&self, t: TypeId) -> bool;
    fn is_edge_type(&self, t: TypeId) -> bool;

    /// Every node of the given node type
    fn nodes_of_type(&self, t: TypeId) -> Result<NodeSet>;

    /// Nodes adjacent to `node` through edges of `edge_type` navigated in `direction`
    fn neighbors(&self, node: NodeId, edge_type: TypeId, direction: Direction)
        -> Result<NodeSet>;

    /// Edges of `edge_type` incident to `node` in `direction`
    fn incident_edges(
        &self,
        node: NodeId,
        edge_type: TypeId,
        direction: Direction,
    ) -> Result<EdgeSet>;

    /// `(tail, head)` of an edge
    fn edge_endpoints(&self, edge: EdgeId) -> Result<(NodeId, NodeId)>;

    /// Look up a named attribute
    fn find_attribute(&self, name: &str) -> Option<AttrHandle>;

    fn attribute_info(&self, attr: AttrHandle) -> Result<AttributeInfo>;

    /// Value of `attr` on `object`; `None` when unset
    fn attribute_value(&self, object: ObjectId, attr: AttrHandle) -> Result<Option<Value>>;

    /// Numeric value of `attr` on `edge`
    ///
    /// Fails with `AttributeTypeMismatch` if the attribute is not numeric.
    fn numeric_value(&self, edge: EdgeId, attr: AttrHandle) -> Result<Option<f64>> {
        let info = self.attribute_info(attr)?;
        if !info.kind.is_numeric() {
            return Err(GraphError::AttributeTypeMismatch {
                name: info.display_name(),
                expected: "numeric".to_string(),
                found: info.kind.to_string(),
            });
        }
        Ok(self
            .attribute_value(ObjectId::Edge(edge), attr)?
            .and_then(|v| v.as_f64()))
    }

    /// The node on the other side of `edge` when standing on `node`
    fn other_endpoint(&self, edge: EdgeId, node: NodeId) -> Result<NodeId> {
        let (tail, head) = self.edge_endpoints(edge)?;
        Ok(if tail == node { head } else { tail })
    }
}

/// Attribute writes, the only mutations the algorithms perform
pub trait GraphStore: GraphProvider {
    /// Define a new attribute; named attributes must have unique names
    fn create_attribute(
        &mut self,
        name: Option<&str>,
        kind: AttrKind,
        owner: AttrOwner,
        scope: AttrScope,
    ) -> Result<AttrHandle>;

    fn set_attribute_value(&mut self, object: ObjectId, attr: AttrHandle, value: Value)
        -> Result<()>;

    /// Drop an attribute and all its values
    fn remove_attribute(&mut self, attr: AttrHandle) -> Result<()>;
}
