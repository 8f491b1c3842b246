//! Union-find over an arbitrary key universe.
//!
//! [`DisjointSet`] maps each distinct key to a dense integer id once, at
//! construction, and runs union-by-rank with path compression on plain
//! integer arrays. The same structure therefore serves vertex indices,
//! canonical faces and oriented faces alike.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{MeshError, Result};

/// A partition of a fixed key universe into disjoint components.
///
/// # Example
///
/// ```
/// use knitmesh::algo::DisjointSet;
///
/// let mut set = DisjointSet::new(["a", "b", "c"]);
/// assert_eq!(set.component_count(), 3);
///
/// set.union(&"a", &"b").unwrap();
/// assert_eq!(set.component_count(), 2);
/// assert_eq!(set.component_size(&"b").unwrap(), 2);
/// assert!(set.find(&"z").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DisjointSet<K> {
    /// Dense id for every distinct key, in first-seen order.
    ids: HashMap<K, usize>,
    parent: Vec<usize>,
    rank: Vec<u32>,
    /// Component size, only meaningful at roots.
    size: Vec<usize>,
    /// Live component count.
    count: usize,
}

impl<K: Eq + Hash + Debug> DisjointSet<K> {
    /// Build a partition where every distinct key is its own component.
    ///
    /// Duplicate keys are ignored after their first occurrence.
    pub fn new<T: IntoIterator<Item = K>>(keys: T) -> Self {
        let mut ids = HashMap::new();
        for key in keys {
            let next = ids.len();
            ids.entry(key).or_insert(next);
        }

        let n = ids.len();
        Self {
            ids,
            parent: (0..n).collect(),
            rank: vec![0; n],
            size: vec![1; n],
            count: n,
        }
    }

    /// Number of keys in the universe.
    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Check if the universe is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Check whether a key belongs to the universe.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.ids.contains_key(key)
    }

    /// Current number of components.
    #[inline]
    pub fn component_count(&self) -> usize {
        self.count
    }

    /// Representative id of the component containing `key`.
    pub fn find(&mut self, key: &K) -> Result<usize> {
        let id = self.id(key)?;
        Ok(self.find_root(id))
    }

    /// Merge the components containing `a` and `b`.
    ///
    /// Returns `true` if two distinct components were merged and `false` if
    /// the keys were already connected.
    pub fn union(&mut self, a: &K, b: &K) -> Result<bool> {
        let a = self.id(a)?;
        let b = self.id(b)?;
        Ok(self.union_ids(a, b))
    }

    /// Check whether two keys are in the same component.
    pub fn connected(&mut self, a: &K, b: &K) -> Result<bool> {
        Ok(self.find(a)? == self.find(b)?)
    }

    /// Number of keys in the component containing `key`.
    pub fn component_size(&mut self, key: &K) -> Result<usize> {
        let root = self.find(key)?;
        Ok(self.size[root])
    }

    fn id(&self, key: &K) -> Result<usize> {
        self.ids.get(key).copied().ok_or_else(|| MeshError::UnknownKey {
            key: format!("{:?}", key),
        })
    }

    /// Resolve the root of `x`, then point every node on the way at it.
    fn find_root(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut cur = x;
        while cur != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union_ids(&mut self, x: usize, y: usize) -> bool {
        let a = self.find_root(x);
        let b = self.find_root(y);
        if a == b {
            return false;
        }
        self.count -= 1;

        // Equal ranks attach `b` under `a` and grow `a`.
        let (root, child) = if self.rank[a] < self.rank[b] { (b, a) } else { (a, b) };
        if self.rank[a] == self.rank[b] {
            self.rank[root] += 1;
        }
        self.parent[child] = root;
        self.size[root] += self.size[child];
        true
    }
}
