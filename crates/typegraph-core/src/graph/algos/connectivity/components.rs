use std::collections::{BTreeMap, HashMap};

use crate::error::{GraphError, Result};
use crate::graph::{AttrKind, AttrOwner, GraphProvider, NodeId, NodeSet, ObjectId};

/// Node to component mapping produced by a connectivity run
///
/// Component ids are contiguous in `[0, count)`. The view is immutable once
/// built, either from a fresh run or from a materialized node attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectedComponents {
    component_of: HashMap<NodeId, u64>,
    members: Vec<NodeSet>,
    attribute: Option<String>,
}

impl ConnectedComponents {
    /// Build from member sets; the position of each set is its component id
    pub(crate) fn from_members(members: Vec<NodeSet>) -> Self {
        let mut component_of = HashMap::new();
        for (id, nodes) in members.iter().enumerate() {
            for node in nodes {
                component_of.insert(node, id as u64);
            }
        }
        Self {
            component_of,
            members,
            attribute: None,
        }
    }

    pub(crate) fn set_attribute(&mut self, name: &str) {
        self.attribute = Some(name.to_string());
    }

    /// Re-read components stored in a node attribute by an earlier run
    ///
    /// The attribute must exist, be an integer attribute common to all nodes,
    /// and hold non-negative ids forming a contiguous range `[0, N)`.
    pub fn from_materialized<G: GraphProvider + ?Sized>(graph: &G, name: &str) -> Result<Self> {
        let handle = graph
            .find_attribute(name)
            .ok_or_else(|| GraphError::AttributeNotFound {
                name: name.to_string(),
            })?;
        let info = graph.attribute_info(handle)?;
        if info.kind != AttrKind::Integer {
            return Err(malformed(name, format!("holds {} values", info.kind)));
        }
        if info.owner != AttrOwner::AllNodes {
            return Err(malformed(name, "is not common to all node types"));
        }

        let mut grouped: BTreeMap<u64, NodeSet> = BTreeMap::new();
        for node_type in graph.node_types() {
            for node in &graph.nodes_of_type(node_type)? {
                let Some(value) = graph.attribute_value(ObjectId::Node(node), handle)? else {
                    continue;
                };
                let id = value
                    .as_i64()
                    .and_then(|v| u64::try_from(v).ok())
                    .ok_or_else(|| malformed(name, format!("node {} holds {:?}", node, value)))?;
                grouped.entry(id).or_default().insert(node);
            }
        }

        if let Some((expected, found)) = grouped
            .keys()
            .enumerate()
            .find(|(expected, found)| *expected as u64 != **found)
        {
            return Err(malformed(
                name,
                format!("component {} missing before {}", expected, found),
            ));
        }

        let mut components = Self::from_members(grouped.into_values().collect());
        components.set_attribute(name);
        tracing::debug!(attribute = name, count = components.count(), "components_reloaded");
        Ok(components)
    }

    /// Component of a node visited by the run
    pub fn component_of(&self, node: NodeId) -> Result<u64> {
        self.component_of
            .get(&node)
            .copied()
            .ok_or(GraphError::NotInScope { id: node.0 })
    }

    pub fn count(&self) -> u64 {
        self.members.len() as u64
    }

    pub fn nodes(&self, component: u64) -> Result<&NodeSet> {
        usize::try_from(component)
            .ok()
            .and_then(|index| self.members.get(index))
            .ok_or_else(|| GraphError::not_found("component", component))
    }

    pub fn size(&self, component: u64) -> Result<u64> {
        Ok(self.nodes(component)?.count())
    }

    /// Components in id order
    pub fn iter(&self) -> impl Iterator<Item = (u64, &NodeSet)> + '_ {
        self.members
            .iter()
            .enumerate()
            .map(|(id, nodes)| (id as u64, nodes))
    }

    /// Biggest component; the lowest id wins ties
    pub fn largest(&self) -> Option<(u64, &NodeSet)> {
        self.iter()
            .max_by(|a, b| a.1.len().cmp(&b.1.len()).then(b.0.cmp(&a.0)))
    }

    /// Name of the node attribute holding these components, if any
    pub fn materialized_attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }
}

fn malformed(name: &str, reason: impl Into<String>) -> GraphError {
    GraphError::MalformedComponents {
        name: name.to_string(),
        reason: reason.into(),
    }
}
