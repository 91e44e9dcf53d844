//! Lock-guarded splay tree for use across threads
//!
//! Even a lookup rewrites node links, so there is no read-only path: every
//! operation takes the one exclusive lock for its whole duration.

use parking_lot::Mutex;

use crate::splay::SplayTree;

/// Splay tree behind a single exclusive lock
pub struct SharedSplayTree<K, V> {
    inner: Mutex<SplayTree<K, V>>,
}

impl<K: Ord, V> Default for SharedSplayTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> SharedSplayTree<K, V> {
    /// Create an empty shared tree
    pub fn new() -> Self {
        Self::from_tree(SplayTree::new())
    }

    /// Wrap an existing tree
    pub fn from_tree(tree: SplayTree<K, V>) -> Self {
        Self {
            inner: Mutex::new(tree),
        }
    }

    /// Insert a key-value pair
    pub fn insert(&self, key: K, value: V) {
        self.inner.lock().insert(key, value);
    }

    /// Look up a key, splaying on a hit, and clone the value out
    pub fn find(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().find(key).cloned()
    }

    /// Run `f` with the lock held across all of its tree operations
    pub fn with_tree<R>(&self, f: impl FnOnce(&mut SplayTree<K, V>) -> R) -> R {
        let mut tree = self.inner.lock();
        f(&mut tree)
    }

    /// Number of stored nodes
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Unwrap the tree
    pub fn into_inner(self) -> SplayTree<K, V> {
        self.inner.into_inner()
    }
}
