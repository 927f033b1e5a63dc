//! Fibonacci heap keyed by `f64`
//!
//! Nodes live in an arena and refer to each other by index. Each heap level is
//! a circular doubly linked sibling list through `left`/`right`; `min` always
//! points at the smallest root. Removed nodes stay in the arena until `clear`.

/// 1 / ln(phi); bounds the degree of any node by `log_phi(n)`
pub const ONE_OVER_LOG_PHI: f64 = 2.078_086_921_235_027_3;

/// Stable reference to an inserted entry, used by `decrease_key`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapHandle(usize);

#[derive(Debug)]
struct HeapNode<T> {
    key: f64,
    data: T,
    degree: usize,
    mark: bool,
    parent: Option<usize>,
    child: Option<usize>,
    left: usize,
    right: usize,
    in_heap: bool,
}

/// Min-priority queue with amortized O(1) `insert`/`decrease_key` and
/// O(log n) `remove_min`
#[derive(Debug)]
pub struct FibonacciHeap<T> {
    nodes: Vec<HeapNode<T>>,
    min: Option<usize>,
    len: usize,
}

impl<T: Copy> Default for FibonacciHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> FibonacciHeap<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            min: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every entry; outstanding handles become meaningless
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.min = None;
        self.len = 0;
    }

    /// Add `data` as a new singleton root
    pub fn insert(&mut self, data: T, key: f64) -> HeapHandle {
        let index = self.nodes.len();
        self.nodes.push(HeapNode {
            key,
            data,
            degree: 0,
            mark: false,
            parent: None,
            child: None,
            left: index,
            right: index,
            in_heap: true,
        });
        self.add_root(index);
        self.len += 1;
        HeapHandle(index)
    }

    /// Smallest entry as `(data, key)`
    pub fn min(&self) -> Option<(T, f64)> {
        self.min.map(|m| (self.nodes[m].data, self.nodes[m].key))
    }

    /// Current key of a live entry
    pub fn key(&self, handle: HeapHandle) -> Option<f64> {
        self.nodes
            .get(handle.0)
            .filter(|node| node.in_heap)
            .map(|node| node.key)
    }

    /// Remove and return the smallest entry
    pub fn remove_min(&mut self) -> Option<(T, f64)> {
        let z = self.min?;

        let children = self.siblings(self.nodes[z].child);
        for child in children {
            self.unlink(child);
            self.nodes[child].parent = None;
            self.splice_after(z, child);
        }
        self.nodes[z].child = None;

        let next = self.nodes[z].right;
        self.unlink(z);
        self.nodes[z].in_heap = false;
        self.len -= 1;

        if next == z {
            self.min = None;
        } else {
            self.min = Some(next);
            self.consolidate();
        }
        Some((self.nodes[z].data, self.nodes[z].key))
    }

    /// Lower the key of a live entry
    ///
    /// Returns false, leaving the heap untouched, when the handle is stale or
    /// `key` is not smaller than the current key.
    pub fn decrease_key(&mut self, handle: HeapHandle, key: f64) -> bool {
        let x = handle.0;
        match self.nodes.get(x) {
            Some(node) if node.in_heap && key < node.key => {}
            _ => return false,
        }
        self.nodes[x].key = key;

        if let Some(parent) = self.nodes[x].parent {
            if key < self.nodes[parent].key {
                self.cut(x, parent);
                self.cascading_cut(parent);
            }
        }
        if self.min.is_some_and(|m| key < self.nodes[m].key) {
            self.min = Some(x);
        }
        true
    }

    /// Indices of a sibling ring, starting at `start`
    fn siblings(&self, start: Option<usize>) -> Vec<usize> {
        let mut ring = Vec::new();
        if let Some(start) = start {
            let mut current = start;
            loop {
                ring.push(current);
                current = self.nodes[current].right;
                if current == start {
                    break;
                }
            }
        }
        ring
    }

    /// Detach a node from its sibling ring, leaving it a ring of one
    fn unlink(&mut self, x: usize) {
        let (left, right) = (self.nodes[x].left, self.nodes[x].right);
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        self.nodes[x].left = x;
        self.nodes[x].right = x;
    }

    /// Insert a detached node to the right of `anchor`
    fn splice_after(&mut self, anchor: usize, x: usize) {
        let right = self.nodes[anchor].right;
        self.nodes[x].left = anchor;
        self.nodes[x].right = right;
        self.nodes[anchor].right = x;
        self.nodes[right].left = x;
    }

    fn add_root(&mut self, x: usize) {
        self.nodes[x].parent = None;
        match self.min {
            Some(m) => {
                self.splice_after(m, x);
                if self.nodes[x].key < self.nodes[m].key {
                    self.min = Some(x);
                }
            }
            None => self.min = Some(x),
        }
    }

    /// Merge roots of equal degree until every degree is unique
    fn consolidate(&mut self) {
        let bound = ((self.len as f64).ln() * ONE_OVER_LOG_PHI).floor() as usize + 2;
        let mut by_degree: Vec<Option<usize>> = vec![None; bound];
        let roots = self.siblings(self.min);

        for root in roots {
            let mut x = root;
            let mut degree = self.nodes[x].degree;
            while let Some(y) = by_degree.get(degree).copied().flatten() {
                let (parent, child) = if self.nodes[y].key < self.nodes[x].key {
                    (y, x)
                } else {
                    (x, y)
                };
                self.link(child, parent);
                by_degree[degree] = None;
                x = parent;
                degree += 1;
            }
            if degree >= by_degree.len() {
                by_degree.resize(degree + 1, None);
            }
            by_degree[degree] = Some(x);
        }

        self.min = None;
        for root in by_degree.into_iter().flatten() {
            if self.min.is_none_or(|m| self.nodes[root].key < self.nodes[m].key) {
                self.min = Some(root);
            }
        }
        tracing::trace!(len = self.len, "heap_consolidated");
    }

    /// Make root `y` a child of root `x`
    fn link(&mut self, y: usize, x: usize) {
        self.unlink(y);
        match self.nodes[x].child {
            Some(child) => self.splice_after(child, y),
            None => self.nodes[x].child = Some(y),
        }
        self.nodes[y].parent = Some(x);
        self.nodes[y].mark = false;
        self.nodes[x].degree += 1;
    }

    /// Move `x` from the children of `parent` to the root list
    fn cut(&mut self, x: usize, parent: usize) {
        if self.nodes[parent].child == Some(x) {
            let right = self.nodes[x].right;
            self.nodes[parent].child = (right != x).then_some(right);
        }
        self.unlink(x);
        self.nodes[parent].degree -= 1;
        self.nodes[x].mark = false;
        self.add_root(x);
    }

    /// Cut marked ancestors up to the first unmarked one, which gets marked
    fn cascading_cut(&mut self, mut y: usize) {
        while let Some(parent) = self.nodes[y].parent {
            if !self.nodes[y].mark {
                self.nodes[y].mark = true;
                return;
            }
            self.cut(y, parent);
            y = parent;
        }
    }
}
