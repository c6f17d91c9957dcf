//! Disjoint-set (union-find) over a fixed element set.
//!
//! `find` uses full path compression: after locating the root, every node on
//! the walked chain is re-pointed directly at it. `union` is by rank; on equal
//! ranks the first argument's root stays root and the second's becomes its
//! child, so merge order (and therefore Kruskal's output) is reproducible.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{GraphError, Result};

/// Union-find structure with full path compression and union by rank.
#[derive(Debug, Clone)]
pub struct DisjointSet<T> {
    /// Element -> slot in `parent`/`rank`.
    index: FxHashMap<T, usize>,
    elements: Vec<T>,
    parent: Vec<usize>,
    rank: Vec<u32>,
    set_count: usize,
}

impl<T> DisjointSet<T>
where
    T: Clone + Eq + Hash + Debug,
{
    /// Builds singleton sets, one per distinct element (`parent[v] = v`,
    /// `rank[v] = 0`).
    pub fn new<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut index = FxHashMap::default();
        let mut stored = Vec::new();
        for element in elements {
            if index.contains_key(&element) {
                continue;
            }
            index.insert(element.clone(), stored.len());
            stored.push(element);
        }
        let n = stored.len();
        Self {
            index,
            elements: stored,
            parent: (0..n).collect(),
            rank: vec![0; n],
            set_count: n,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of disjoint sets currently tracked.
    pub fn set_count(&self) -> usize {
        self.set_count
    }

    /// Returns the representative of the set containing `x`.
    pub fn find(&mut self, x: &T) -> Result<T> {
        let slot = self.slot(x)?;
        let root = self.find_root(slot);
        Ok(self.elements[root].clone())
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// Returns `false` when both were already in the same set.
    pub fn union(&mut self, x: &T, y: &T) -> Result<bool> {
        let x_slot = self.slot(x)?;
        let y_slot = self.slot(y)?;
        let x_root = self.find_root(x_slot);
        let y_root = self.find_root(y_slot);

        if x_root == y_root {
            return Ok(false);
        }

        match self.rank[x_root].cmp(&self.rank[y_root]) {
            std::cmp::Ordering::Less => {
                self.parent[x_root] = y_root;
            }
            std::cmp::Ordering::Greater => {
                self.parent[y_root] = x_root;
            }
            std::cmp::Ordering::Equal => {
                self.parent[y_root] = x_root;
                self.rank[x_root] += 1;
            }
        }
        self.set_count -= 1;
        Ok(true)
    }

    /// Whether `x` and `y` share a representative.
    pub fn connected(&mut self, x: &T, y: &T) -> Result<bool> {
        let x_slot = self.slot(x)?;
        let y_slot = self.slot(y)?;
        Ok(self.find_root(x_slot) == self.find_root(y_slot))
    }

    fn slot(&self, x: &T) -> Result<usize> {
        self.index
            .get(x)
            .copied()
            .ok_or_else(|| GraphError::InvalidVertexSet(format!("{:?}", x)))
    }

    fn find_root(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Second pass: point the whole chain at the root.
        let mut current = slot;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }
}
