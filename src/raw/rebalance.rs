//! Rotations and the red-black repair passes run after structural changes.

use super::handle::Handle;
use super::node::{Color, Side};
use super::raw_rbtree_map::RawRBTreeMap;

impl<K, V, C> RawRBTreeMap<K, V, C> {
    /// Absent children count as black.
    #[inline]
    fn is_red(&self, handle: Option<Handle>) -> bool {
        handle.is_some_and(|h| self.nodes.get(h).color() == Color::Red)
    }

    #[inline]
    fn is_black(&self, handle: Option<Handle>) -> bool {
        !self.is_red(handle)
    }

    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        self.nodes.get_mut(handle).set_color(color);
    }

    /// Which child of its parent `handle` is. `handle` must not be the root.
    fn side_of(&self, handle: Handle) -> Side {
        let parent = self.parent(handle).expect("`RawRBTreeMap::side_of()` - node has no parent!");
        if self.nodes.get(parent).right() == Some(handle) {
            Side::Right
        } else {
            Side::Left
        }
    }

    /// Promotes `x` above its parent, keeping the in-order sequence intact.
    ///
    /// `x` takes the parent's place under the grandparent (or becomes the root), the parent
    /// becomes `x`'s child on the far side, and `x`'s inner subtree moves across to the parent.
    pub(super) fn rotate(&mut self, x: Handle) {
        let side = self.side_of(x);
        let parent = self.parent(x).expect("`RawRBTreeMap::rotate()` - node has no parent!");
        let grandparent = self.parent(parent);

        match grandparent {
            Some(g) => {
                let parent_side = self.side_of(parent);
                self.nodes.get_mut(g).set_child(parent_side, Some(x));
            }
            None => self.root = Some(x),
        }
        self.nodes.get_mut(x).set_parent(grandparent);

        let inner = self.nodes.get(x).child(side.opposite());
        self.nodes.get_mut(parent).set_child(side, inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).set_parent(Some(parent));
        }

        self.nodes.get_mut(x).set_child(side.opposite(), Some(parent));
        self.nodes.get_mut(parent).set_parent(Some(x));
    }

    /// Restores the red-black invariants after `x` was linked in as a red leaf.
    ///
    /// The only possible violation on entry is `x` and its parent both being red.
    pub(super) fn insert_fixup(&mut self, mut x: Handle) {
        while let Some(parent) = self.parent(x).filter(|&p| self.is_red(Some(p))) {
            // A red node is never the root, so a red parent always has a parent.
            let grandparent = self.parent(parent).expect("`RawRBTreeMap::insert_fixup()` - red root!");
            let parent_side = self.side_of(parent);
            let uncle = self.nodes.get(grandparent).child(parent_side.opposite());

            if let Some(uncle) = uncle.filter(|&u| self.is_red(Some(u))) {
                log::trace!("insert fixup: red uncle, recolor and continue at grandparent");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                x = grandparent;
                continue;
            }

            if self.side_of(x) == parent_side {
                log::trace!("insert fixup: black uncle, outer child, single rotation");
                self.rotate(parent);
                self.set_color(parent, Color::Black);
            } else {
                log::trace!("insert fixup: black uncle, inner child, double rotation");
                self.rotate(x);
                self.rotate(x);
                self.set_color(x, Color::Black);
            }
            self.set_color(grandparent, Color::Red);
            break;
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Puts `v` (possibly absent) where `u` hangs. Only the link from `u`'s parent and `v`'s
    /// parent link change; `u`'s own links are left for the caller.
    fn transplant(&mut self, u: Handle, v: Option<Handle>) {
        let parent = self.parent(u);
        match parent {
            None => self.root = v,
            Some(p) => {
                let side = self.side_of(u);
                self.nodes.get_mut(p).set_child(side, v);
            }
        }
        if let Some(v) = v {
            self.nodes.get_mut(v).set_parent(parent);
        }
    }

    /// Unlinks `z` from the tree, frees its slot and returns its key and value.
    pub(crate) fn remove_node(&mut self, z: Handle) -> (K, V) {
        let z_node = self.nodes.get(z);
        let (z_left, z_right, z_color) = (z_node.left(), z_node.right(), z_node.color());

        // `x` moves into the vacated position; `x_parent` is tracked separately because `x`
        // may be absent.
        let (x, x_parent, removed_color) = match (z_left, z_right) {
            (None, child) | (child, None) => {
                let parent = self.parent(z);
                self.transplant(z, child);
                (child, parent, z_color)
            }
            (Some(z_left), Some(z_right)) => {
                let y = self.extreme(z_right, Side::Left);
                let y_color = self.nodes.get(y).color();
                let x = self.nodes.get(y).right();

                let x_parent = if self.parent(y) == Some(z) {
                    y
                } else {
                    let y_parent = self.parent(y).expect("`RawRBTreeMap::remove_node()` - successor has no parent!");
                    self.transplant(y, x);
                    self.nodes.get_mut(y).set_child(Side::Right, Some(z_right));
                    self.nodes.get_mut(z_right).set_parent(Some(y));
                    y_parent
                };

                self.transplant(z, Some(y));
                self.nodes.get_mut(y).set_child(Side::Left, Some(z_left));
                self.nodes.get_mut(z_left).set_parent(Some(y));
                self.set_color(y, z_color);

                (x, Some(x_parent), y_color)
            }
        };

        let entry = self.nodes.take(z).into_entry();
        self.len -= 1;
        debug_assert_eq!(self.nodes.len(), self.len, "`RawRBTreeMap::remove_node()` - arena out of step!");

        if removed_color == Color::Black {
            self.remove_fixup(x, x_parent);
        }
        entry
    }

    /// Restores the red-black invariants after a black node left the path through `x`.
    ///
    /// The subtree at `x` (child of `parent`, possibly absent) is one black node short of its
    /// sibling subtree.
    fn remove_fixup(&mut self, mut x: Option<Handle>, mut parent: Option<Handle>) {
        while x != self.root && self.is_black(x) {
            let p = parent.expect("`RawRBTreeMap::remove_fixup()` - non-root position without parent!");
            // The side the sibling is on. Compared against the right slot since `x` may be absent.
            let far = if self.nodes.get(p).right() == x {
                Side::Left
            } else {
                Side::Right
            };
            let sibling_of = |tree: &Self| {
                tree.nodes
                    .get(p)
                    .child(far)
                    .expect("`RawRBTreeMap::remove_fixup()` - short subtree without sibling!")
            };
            let mut sibling = sibling_of(self);

            if self.is_red(Some(sibling)) {
                log::trace!("remove fixup: red sibling, rotate it above the parent");
                self.rotate(sibling);
                self.set_color(sibling, Color::Black);
                self.set_color(p, Color::Red);
                sibling = sibling_of(self);
            }

            let near_child = self.nodes.get(sibling).child(far.opposite());
            let far_child = self.nodes.get(sibling).child(far);

            if self.is_black(near_child) && self.is_black(far_child) {
                log::trace!("remove fixup: black sibling with black children, push deficit up");
                self.set_color(sibling, Color::Red);
                x = Some(p);
                parent = self.parent(p);
                continue;
            }

            if self.is_black(far_child) {
                log::trace!("remove fixup: red near nephew, rotate it above the sibling");
                let near = near_child.expect("`RawRBTreeMap::remove_fixup()` - red near nephew is absent!");
                self.rotate(near);
                self.set_color(sibling, Color::Red);
                self.set_color(near, Color::Black);
                sibling = near;
            }

            log::trace!("remove fixup: red far nephew, rotate sibling above the parent");
            self.rotate(sibling);
            let parent_color = self.nodes.get(p).color();
            self.set_color(sibling, parent_color);
            self.set_color(p, Color::Black);
            if let Some(far_child) = self.nodes.get(sibling).child(far) {
                self.set_color(far_child, Color::Black);
            }
            x = self.root;
            break;
        }

        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }
}
