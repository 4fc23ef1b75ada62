use alloc::vec::Vec;
use core::cmp::Ordering;

use compare::Compare;
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};

/// The red-black tree backing `RBTreeMap`.
///
/// All nodes live in `nodes`; the tree shape is given by the child links starting at `root`.
pub(crate) struct RawRBTreeMap<K, V, C> {
    /// Arena owning every node of the tree.
    pub(super) nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    pub(super) root: Option<Handle>,
    /// Total number of key-value pairs in the tree.
    pub(super) len: usize,
    /// Orders the keys. Travels with the tree on copy.
    pub(super) cmp: C,
}

/// Outcome of a descent from the root.
pub(crate) enum Descent {
    /// A node with an equivalent key exists.
    Found(Handle),
    /// No equivalent key; a new node would hang off `parent` on `side` (or become the root).
    Vacant { parent: Option<Handle>, side: Side },
}

/// Explicit stack for whole-tree walks. Red-black height is logarithmic, so this rarely spills.
type Stack<T> = SmallVec<[T; 32]>;

impl<K, V, C> RawRBTreeMap<K, V, C> {
    /// Creates a new, empty tree ordered by `cmp`.
    pub(crate) const fn new(cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            cmp,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, cmp: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            cmp,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the capacity of the node arena.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn cmp(&self) -> &C {
        &self.cmp
    }

    /// Releases every node.
    ///
    /// Handles issued before the clear stay invalid forever, even once their slots are reused.
    pub(crate) fn clear(&mut self) {
        log::debug!("clearing red-black tree of {} nodes", self.len);
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns true if `handle` refers to a node currently in this tree.
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.nodes.contains(handle)
    }

    /// Returns a reference to a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    /// Returns a mutable reference to a node by handle.
    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    pub(super) fn parent(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).parent()
    }

    /// Follows `side` links from `handle` as far as they go.
    pub(super) fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.nodes.get(handle).child(side) {
            handle = child;
        }
        handle
    }

    /// The node with the smallest key.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Left))
    }

    /// The node with the largest key.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Right))
    }

    /// Moves one position in key order: `Side::Right` for the successor, `Side::Left` for the
    /// predecessor. Returns `None` when `handle` is already the last node in that direction.
    pub(crate) fn step(&self, handle: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.nodes.get(handle).child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        let mut current = handle;
        while let Some(parent) = self.parent(current) {
            if self.nodes.get(parent).child(side.opposite()) == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    #[inline]
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Right)
    }

    #[inline]
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Left)
    }

    /// Handles of every node, in key order.
    pub(crate) fn handles_in_order(&self) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(handle) = current {
            handles.push(handle);
            current = self.successor(handle);
        }
        handles
    }

    /// Mutable views of every entry, in key order.
    pub(crate) fn entries_mut_in_order(&mut self) -> Vec<(&K, &mut V)> {
        let order = self.handles_in_order();
        let mut slots: Vec<Option<(&K, &mut V)>> = self.nodes.slots_mut().map(|slot| slot.map(Node::entry_mut)).collect();
        order
            .into_iter()
            .map(|handle| {
                slots[handle.to_index()]
                    .take()
                    .expect("`RawRBTreeMap::entries_mut_in_order()` - node visited twice!")
            })
            .collect()
    }

    /// Moves every key-value pair out in key order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let order = self.handles_in_order();
        let entries = order.into_iter().map(|handle| self.nodes.take(handle).into_entry()).collect();
        self.clear();
        entries
    }

    /// Rebuilds `source`'s nodes in this (empty) tree, preserving shape and colors.
    ///
    /// Uses an explicit stack, so the copy never recurses regardless of tree height.
    fn copy_nodes_from(&mut self, source: &Self)
    where
        K: Clone,
        V: Clone,
    {
        debug_assert!(self.root.is_none(), "`RawRBTreeMap::copy_nodes_from()` - target is not empty!");
        let Some(source_root) = source.root else {
            return;
        };
        log::debug!("deep copying red-black tree of {} nodes", source.len);

        let root = self.nodes.alloc(source.node(source_root).detached_clone());
        let mut stack: Stack<(Handle, Handle)> = SmallVec::new();
        stack.push((source_root, root));

        while let Some((from, to)) = stack.pop() {
            for side in [Side::Left, Side::Right] {
                if let Some(from_child) = source.node(from).child(side) {
                    let to_child = self.nodes.alloc(source.node(from_child).detached_clone());
                    self.nodes.get_mut(to_child).set_parent(Some(to));
                    self.nodes.get_mut(to).set_child(side, Some(to_child));
                    stack.push((from_child, to_child));
                }
            }
        }

        self.root = Some(root);
        self.len = source.len;
    }
}

impl<K, V, C> RawRBTreeMap<K, V, C> {
    /// Walks down from the root looking for `key`.
    pub(crate) fn descend<Q>(&self, key: &Q) -> Descent
    where
        Q: ?Sized,
        C: Compare<Q, K>,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            side = match self.cmp.compare(key, node.key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Descent::Found(handle),
            };
            parent = Some(handle);
            current = node.child(side);
        }

        Descent::Vacant { parent, side }
    }

    /// Finds the node holding a key equivalent to `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        Q: ?Sized,
        C: Compare<Q, K>,
    {
        match self.descend(key) {
            Descent::Found(handle) => Some(handle),
            Descent::Vacant { .. } => None,
        }
    }

    /// Finds the node for `key`, inserting one if there is none.
    ///
    /// Returns the node and whether it was created. `make_value` only runs, and a node is only
    /// allocated, when the key is absent.
    pub(crate) fn insert_with<F>(&mut self, key: K, make_value: F) -> (Handle, bool)
    where
        C: Compare<K>,
        F: FnOnce() -> V,
    {
        let (parent, side) = match self.descend(&key) {
            Descent::Found(handle) => return (handle, false),
            Descent::Vacant { parent, side } => (parent, side),
        };

        let handle = self.nodes.alloc(Node::new(key, make_value()));
        self.nodes.get_mut(handle).set_parent(parent);
        match parent {
            Some(parent) => self.nodes.get_mut(parent).set_child(side, Some(handle)),
            None => self.root = Some(handle),
        }
        self.len += 1;

        self.insert_fixup(handle);
        (handle, true)
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for RawRBTreeMap<K, V, C> {
    fn clone(&self) -> Self {
        let mut raw = Self::with_capacity(self.len, self.cmp.clone());
        raw.copy_nodes_from(self);
        raw
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.cmp.clone_from(&source.cmp);
        self.copy_nodes_from(source);
    }
}
