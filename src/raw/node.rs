use super::handle::Handle;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child slot of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A red-black tree node.
///
/// `left` and `right` define the tree: a node is reachable exactly through its parent's child
/// slot. `parent` only points back up for navigation and never decides what gets freed or copied.
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    color: Color,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
}

impl<K, V> Node<K, V> {
    /// Creates a detached red node, the state every node is inserted in.
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            left: None,
            right: None,
            parent: None,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Splits the borrow so the key stays read-only while the value is handed out mutably.
    #[inline]
    pub(crate) fn entry_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }

    #[inline]
    pub(crate) fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    /// Copies key, value and color, but none of the links.
    pub(crate) fn detached_clone(&self) -> Self
    where
        K: Clone,
        V: Clone,
    {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            color: self.color,
            left: None,
            right: None,
            parent: None,
        }
    }
}
