//! Self-adjusting binary search tree
//!
//! Nodes live in a single arena and link to each other by index. A node
//! knows its parent, which is what the bottom-up splay walks along, and
//! the arena keeps that back-reference from becoming an ownership cycle.

use std::cmp::Ordering;

/// Index of a node in the arena
type NodeId = usize;

/// Node in the splay tree arena
struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Splay tree storing `(key, value)` pairs
///
/// Keys in a left subtree are strictly less than the node's key. Keys in a
/// right subtree are greater than or equal to it. Equal keys are never
/// merged: inserting a key twice stores two nodes, and `find` returns the
/// first one its descent reaches. Rotations can lift a later duplicate above
/// an earlier one, after which `find` returns the later value; only the
/// non-decreasing in-order sequence holds across equal keys.
///
/// Successful lookups splay the found node to the root. Inserts do no
/// rebalancing, so the shape can degrade until the next `find`.
pub struct SplayTree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: Option<NodeId>,
}

impl<K, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }
}

impl<K: Ord, V> SplayTree<K, V> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    /// Number of stored nodes, duplicates included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert a key-value pair as a new leaf
    ///
    /// Descends left on strictly-less and right otherwise, so a duplicate key
    /// lands in the right subtree of the existing one. Never splays.
    pub fn insert(&mut self, key: K, value: V) {
        let idx = self.nodes.len();
        let mut parent = None;
        let mut go_left = false;
        let mut cursor = self.root;

        while let Some(current) = cursor {
            parent = Some(current);
            go_left = key < self.nodes[current].key;
            cursor = if go_left {
                self.nodes[current].left
            } else {
                self.nodes[current].right
            };
        }

        self.nodes.push(Node {
            key,
            value,
            parent,
            left: None,
            right: None,
        });

        match parent {
            None => self.root = Some(idx),
            Some(p) if go_left => self.nodes[p].left = Some(idx),
            Some(p) => self.nodes[p].right = Some(idx),
        }
    }

    /// Look up a key, splaying the hit to the root
    ///
    /// A miss returns `None` and leaves the tree untouched.
    pub fn find(&mut self, key: &K) -> Option<&V> {
        let idx = self.locate(key)?;
        self.splay(idx);
        Some(&self.nodes[idx].value)
    }

    /// Key currently at the root
    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|idx| &self.nodes[idx].key)
    }

    /// Depth of the node `find` would return, without splaying
    pub fn depth(&self, key: &K) -> Option<usize> {
        let mut depth = 0;
        let mut cursor = self.root;

        while let Some(current) = cursor {
            match key.cmp(&self.nodes[current].key) {
                Ordering::Less => cursor = self.nodes[current].left,
                Ordering::Greater => cursor = self.nodes[current].right,
                Ordering::Equal => return Some(depth),
            }
            depth += 1;
        }

        None
    }

    /// In-order iterator over `(key, value)` pairs
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: self,
            stack: Vec::new(),
            cursor: self.root,
        }
    }

    /// Verify parent links and key order
    ///
    /// Checks that every child points back at its parent, that the root has
    /// no parent, that every arena node is reachable, and that the in-order
    /// key sequence is non-decreasing.
    pub fn is_consistent(&self) -> bool {
        if let Some(root) = self.root {
            if self.nodes[root].parent.is_some() {
                return false;
            }
        } else {
            return self.nodes.is_empty();
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            for child in [node.left, node.right].into_iter().flatten() {
                if self.nodes[child].parent != Some(idx) {
                    return false;
                }
            }
            if let Some(parent) = node.parent {
                let p = &self.nodes[parent];
                if p.left != Some(idx) && p.right != Some(idx) {
                    return false;
                }
            }
        }

        let mut count = 0;
        let mut prev: Option<&K> = None;
        for (key, _) in self.iter() {
            if prev.is_some_and(|p| p > key) {
                return false;
            }
            prev = Some(key);
            count += 1;
        }

        count == self.nodes.len()
    }

    fn locate(&self, key: &K) -> Option<NodeId> {
        let mut cursor = self.root;

        while let Some(current) = cursor {
            match key.cmp(&self.nodes[current].key) {
                Ordering::Less => cursor = self.nodes[current].left,
                Ordering::Greater => cursor = self.nodes[current].right,
                Ordering::Equal => return Some(current),
            }
        }

        None
    }

    /// Rotate `node` up until it becomes the root
    fn splay(&mut self, node: NodeId) {
        while let Some(parent) = self.nodes[node].parent {
            let node_is_left = self.is_left_child(node, parent);

            match self.nodes[parent].parent {
                // Zig
                None => {
                    if node_is_left {
                        self.rotate_right(parent);
                    } else {
                        self.rotate_left(parent);
                    }
                }
                Some(grandparent) => {
                    let parent_is_left = self.is_left_child(parent, grandparent);

                    match (node_is_left, parent_is_left) {
                        // Zig-zig: grandparent first, then parent
                        (true, true) => {
                            self.rotate_right(grandparent);
                            self.rotate_right(parent);
                        }
                        (false, false) => {
                            self.rotate_left(grandparent);
                            self.rotate_left(parent);
                        }
                        // Zig-zag: parent first, then the former grandparent
                        (true, false) => {
                            self.rotate_right(parent);
                            self.rotate_left(grandparent);
                        }
                        (false, true) => {
                            self.rotate_left(parent);
                            self.rotate_right(grandparent);
                        }
                    }
                }
            }
        }
    }

    fn is_left_child(&self, child: NodeId, parent: NodeId) -> bool {
        self.nodes[parent].left == Some(child)
    }

    /// Lift `node`'s left child into its place; no-op without one
    fn rotate_right(&mut self, node: NodeId) {
        let Some(pivot) = self.nodes[node].left else {
            return;
        };

        let inner = self.nodes[pivot].right;
        self.nodes[node].left = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(node);
        }

        let parent = self.nodes[node].parent;
        self.nodes[pivot].parent = parent;
        self.replace_child(parent, node, pivot);

        self.nodes[pivot].right = Some(node);
        self.nodes[node].parent = Some(pivot);
    }

    /// Lift `node`'s right child into its place; no-op without one
    fn rotate_left(&mut self, node: NodeId) {
        let Some(pivot) = self.nodes[node].right else {
            return;
        };

        let inner = self.nodes[pivot].left;
        self.nodes[node].right = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(node);
        }

        let parent = self.nodes[node].parent;
        self.nodes[pivot].parent = parent;
        self.replace_child(parent, node, pivot);

        self.nodes[pivot].left = Some(node);
        self.nodes[node].parent = Some(pivot);
    }

    /// Point whichever slot held `old` (a child slot of `parent`, or the root) at `new`
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        match parent {
            None => {
                assert_eq!(
                    self.root,
                    Some(old),
                    "parentless node {} is not the root",
                    old
                );
                self.root = Some(new);
            }
            Some(p) => {
                let slot = &mut self.nodes[p];
                if slot.left == Some(old) {
                    slot.left = Some(new);
                } else {
                    assert_eq!(
                        slot.right,
                        Some(old),
                        "node {} is not a child of its parent {}",
                        old,
                        p
                    );
                    slot.right = Some(new);
                }
            }
        }
    }
}

/// In-order iterator over a [`SplayTree`]
pub struct Iter<'a, K, V> {
    tree: &'a SplayTree<K, V>,
    stack: Vec<NodeId>,
    cursor: Option<NodeId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.cursor {
            self.stack.push(current);
            self.cursor = self.tree.nodes[current].left;
        }

        let idx = self.stack.pop()?;
        let node = &self.tree.nodes[idx];
        self.cursor = node.right;
        Some((&node.key, &node.value))
    }
}
