use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node in the Store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Identifier of an edge in the Store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node or an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectId {
    Node(NodeId),
    Edge(EdgeId),
}

impl ObjectId {
    /// Raw 64-bit identifier
    pub fn raw(&self) -> u64 {
        match self {
            ObjectId::Node(n) => n.0,
            ObjectId::Edge(e) => e.0,
        }
    }
}

impl From<NodeId> for ObjectId {
    fn from(node: NodeId) -> Self {
        ObjectId::Node(node)
    }
}

impl From<EdgeId> for ObjectId {
    fn from(edge: EdgeId) -> Self {
        ObjectId::Edge(edge)
    }
}

/// Identifier of a node or edge type in the Store schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to an attribute defined in the Store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttrHandle(pub u32);

/// Direction for edge navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Outgoing edges only (tail is the current node)
    Out,
    /// Ingoing edges only (head is the current node)
    In,
    #[default]
    /// Both directions
    Both,
}

impl Direction {
    /// The opposite navigation
    pub fn reversed(self) -> Self {
        match self {
            Direction::Out => Direction::In,
            Direction::In => Direction::Out,
            Direction::Both => Direction::Both,
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "out" | "outgoing" => Ok(Direction::Out),
            "in" | "ingoing" => Ok(Direction::In),
            "both" | "any" => Ok(Direction::Both),
            other => Err(format!(
                "unknown direction '{}' (expected: out, in, both)",
                other
            )),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Out => write!(f, "out"),
            Direction::In => write!(f, "in"),
            Direction::Both => write!(f, "both"),
        }
    }
}

/// Value kind an attribute holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrKind {
    Boolean,
    Integer,
    Double,
    String,
}

impl AttrKind {
    /// Integer and double attributes can weight edges
    pub fn is_numeric(self) -> bool {
        matches!(self, AttrKind::Integer | AttrKind::Double)
    }
}

impl fmt::Display for AttrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrKind::Boolean => write!(f, "boolean"),
            AttrKind::Integer => write!(f, "integer"),
            AttrKind::Double => write!(f, "double"),
            AttrKind::String => write!(f, "string"),
        }
    }
}

/// An attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
}

impl Value {
    pub fn kind(&self) -> AttrKind {
        match self {
            Value::Boolean(_) => AttrKind::Boolean,
            Value::Integer(_) => AttrKind::Integer,
            Value::Double(_) => AttrKind::Double,
            Value::String(_) => AttrKind::String,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

/// What objects an attribute is defined on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrOwner {
    /// Common to every node type
    AllNodes,
    /// Common to every edge type
    AllEdges,
    /// Specific to one node or edge type
    Type(TypeId),
}

/// Whether an attribute survives a Store close/open cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrScope {
    Persistent,
    Transient,
}

/// Attribute metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeInfo {
    pub handle: AttrHandle,
    /// `None` for anonymous transient attributes
    pub name: Option<String>,
    pub kind: AttrKind,
    pub owner: AttrOwner,
    pub scope: AttrScope,
}

impl AttributeInfo {
    /// Name used in error messages
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("#{}", self.handle.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse_aliases() {
        assert_eq!("out".parse::<Direction>().unwrap(), Direction::Out);
        assert_eq!("Outgoing".parse::<Direction>().unwrap(), Direction::Out);
        assert_eq!("ingoing".parse::<Direction>().unwrap(), Direction::In);
        assert_eq!("any".parse::<Direction>().unwrap(), Direction::Both);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_reversed() {
        assert_eq!(Direction::Out.reversed(), Direction::In);
        assert_eq!(Direction::In.reversed(), Direction::Out);
        assert_eq!(Direction::Both.reversed(), Direction::Both);
    }

    #[test]
    fn test_value_numeric_conversions() {
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::Double(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::String("x".into()).as_f64(), None);
        assert_eq!(Value::Double(2.5).as_i64(), None);
    }

    #[test]
    fn test_object_id_raw() {
        assert_eq!(ObjectId::from(NodeId(4)).raw(), 4);
        assert_eq!(ObjectId::from(EdgeId(9)).raw(), 9);
    }

    #[test]
    fn test_attr_kind_numeric() {
        assert!(AttrKind::Integer.is_numeric());
        assert!(AttrKind::Double.is_numeric());
        assert!(!AttrKind::String.is_numeric());
    }
}
