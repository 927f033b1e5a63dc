//! Ordered sets of object identifiers
//!
//! Used for exclusion lists, visited sets, frontiers and component membership.
//! Iteration order is ascending by identifier, which keeps every algorithm
//! deterministic for a given Store.

use std::collections::btree_set;
use std::collections::BTreeSet;

use crate::graph::types::{EdgeId, NodeId};

/// A set of node or edge identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSet<T: Ord> {
    items: BTreeSet<T>,
}

/// Set of node identifiers
pub type NodeSet = ObjectSet<NodeId>;
/// Set of edge identifiers
pub type EdgeSet = ObjectSet<EdgeId>;

impl<T: Ord + Copy> ObjectSet<T> {
    pub fn new() -> Self {
        Self {
            items: BTreeSet::new(),
        }
    }

    /// Insert an identifier, returning false if it was already present
    pub fn insert(&mut self, id: T) -> bool {
        self.items.insert(id)
    }

    pub fn remove(&mut self, id: T) -> bool {
        self.items.remove(&id)
    }

    pub fn contains(&self, id: T) -> bool {
        self.items.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of elements as a 64-bit count
    pub fn count(&self) -> u64 {
        self.items.len() as u64
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.items.iter().copied()
    }

    /// Smallest identifier, if any
    pub fn first(&self) -> Option<T> {
        self.items.first().copied()
    }

    /// Remove and return the smallest identifier
    pub fn pop_first(&mut self) -> Option<T> {
        self.items.pop_first()
    }

    /// Add every element of `other` to this set
    pub fn union_with(&mut self, other: &ObjectSet<T>) {
        self.items.extend(other.items.iter().copied());
    }

    /// Remove every element of `other` from this set
    pub fn difference_with(&mut self, other: &ObjectSet<T>) {
        for id in &other.items {
            self.items.remove(id);
        }
    }

    /// Drop elements for which `keep` returns false
    pub fn retain(&mut self, mut keep: impl FnMut(T) -> bool) {
        self.items.retain(|id| keep(*id));
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().copied().collect()
    }
}

impl<T: Ord + Copy> Default for ObjectSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Copy> FromIterator<T> for ObjectSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T: Ord + Copy> Extend<T> for ObjectSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T: Ord + Copy, const N: usize> From<[T; N]> for ObjectSet<T> {
    fn from(ids: [T; N]) -> Self {
        ids.into_iter().collect()
    }
}

impl<T: Ord> IntoIterator for ObjectSet<T> {
    type Item = T;
    type IntoIter = btree_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'s, T: Ord + Copy> IntoIterator for &'s ObjectSet<T> {
    type Item = T;
    type IntoIter = std::iter::Copied<btree_set::Iter<'s, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut set = NodeSet::new();
        assert!(set.insert(NodeId(3)));
        assert!(!set.insert(NodeId(3)));
        assert!(set.contains(NodeId(3)));
        assert!(!set.contains(NodeId(4)));
        assert_eq!(set.count(), 1);
    }

    #[test]
    fn test_iteration_is_ascending() {
        let set = NodeSet::from([NodeId(9), NodeId(1), NodeId(5)]);
        assert_eq!(set.to_vec(), vec![NodeId(1), NodeId(5), NodeId(9)]);
    }

    #[test]
    fn test_union_and_difference() {
        let mut a = EdgeSet::from([EdgeId(1), EdgeId(2)]);
        let b = EdgeSet::from([EdgeId(2), EdgeId(3)]);
        a.union_with(&b);
        assert_eq!(a.len(), 3);
        a.difference_with(&EdgeSet::from([EdgeId(1), EdgeId(3)]));
        assert_eq!(a.to_vec(), vec![EdgeId(2)]);
    }

    #[test]
    fn test_pop_first_drains_in_order() {
        let mut set = NodeSet::from([NodeId(2), NodeId(1)]);
        assert_eq!(set.pop_first(), Some(NodeId(1)));
        assert_eq!(set.pop_first(), Some(NodeId(2)));
        assert_eq!(set.pop_first(), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_retain() {
        let mut set: NodeSet = (0..6).map(NodeId).collect();
        set.retain(|n| n.0 % 2 == 0);
        assert_eq!(set.to_vec(), vec![NodeId(0), NodeId(2), NodeId(4)]);
    }
}
