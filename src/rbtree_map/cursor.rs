use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

use super::RBTreeMap;
use crate::Error;
use crate::raw::Handle;

/// Identity of one map instance. Clones get their own.
///
/// Ids come from a global `AtomicUsize` bumped with `fetch_add`, which needs atomic
/// read-modify-write support for pointer-sized integers on the target.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct MapId(usize);

impl MapId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        MapId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A checked reference to one entry of one map, or to that map's past-the-end spot.
///
/// Positions are plain `Copy` values: they do not borrow the map, so they can be stored and used
/// later. Every map operation taking a position verifies it first and fails with
/// [`Error::InvalidIterator`] when the position
///
/// - belongs to a different map (clones included),
/// - refers to an entry that has since been removed, or by a map that has since been cleared or
///   assigned over,
/// - is past-the-end where an entry is needed.
///
/// Two positions are equal when they belong to the same map and refer to the same entry, or are
/// both past-the-end.
///
/// Removed entries are told apart from later ones by a per-slot generation counter that never
/// wraps: a storage slot that has used up its generations is retired instead of being reused, so
/// a stale position can never start matching a new entry.
///
/// # Examples
///
/// ```
/// use rb_tree_map::{Error, RBTreeMap};
///
/// let mut map = RBTreeMap::from([(1, "a"), (2, "b"), (3, "c")]);
/// let two = map.find(&2);
///
/// map.erase(map.find(&1))?;
/// // Removing other entries does not disturb `two`.
/// assert_eq!(map.get_at(two), Ok((&2, &"b")));
///
/// map.erase(two)?;
/// assert_eq!(map.get_at(two), Err(Error::InvalidIterator));
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    node: Option<Handle>,
    owner: MapId,
}

impl Position {
    /// Returns `true` for a past-the-end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    pub(super) const fn position_of(&self, node: Option<Handle>) -> Position {
        Position { node, owner: self.id }
    }

    /// Checks that `position` is ours and still live. `Ok(None)` is past-the-end.
    fn resolve(&self, position: Position) -> Result<Option<Handle>, Error> {
        if position.owner != self.id {
            return Err(Error::InvalidIterator);
        }
        match position.node {
            None => Ok(None),
            Some(handle) if self.raw.contains(handle) => Ok(Some(handle)),
            Some(_) => Err(Error::InvalidIterator),
        }
    }

    fn entry_handle(&self, position: Position) -> Result<Handle, Error> {
        self.resolve(position)?.ok_or(Error::InvalidIterator)
    }

    /// Returns the position of the smallest entry, or [`end`](RBTreeMap::end) when the map is
    /// empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn begin(&self) -> Position {
        self.position_of(self.raw.first())
    }

    /// Returns the past-the-end position. It never refers to an entry, and stays equal to itself
    /// for the lifetime of the map.
    #[must_use]
    pub const fn end(&self) -> Position {
        self.position_of(None)
    }

    /// Returns the position following `position` in key order; the last entry is followed by
    /// [`end`](RBTreeMap::end).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if `position` is past-the-end or otherwise invalid (see
    /// [`Position`]).
    ///
    /// # Complexity
    ///
    /// O(log n) worst case, amortized O(1) over a full walk.
    pub fn next_position(&self, position: Position) -> Result<Position, Error> {
        let handle = self.entry_handle(position)?;
        Ok(self.position_of(self.raw.successor(handle)))
    }

    /// Returns the position preceding `position` in key order. Stepping back from
    /// [`end`](RBTreeMap::end) reaches the largest entry.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if `position` is invalid (see [`Position`]), if it is the
    /// smallest entry, or if it is `end` of an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::{Error, RBTreeMap};
    ///
    /// let map = RBTreeMap::from([(1, 'x'), (2, 'y')]);
    /// let last = map.prev_position(map.end())?;
    /// assert_eq!(map.get_at(last), Ok((&2, &'y')));
    /// assert_eq!(map.prev_position(map.begin()), Err(Error::InvalidIterator));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn prev_position(&self, position: Position) -> Result<Position, Error> {
        let previous = match self.resolve(position)? {
            Some(handle) => self.raw.predecessor(handle),
            None => self.raw.last(),
        };
        previous.map(|handle| self.position_of(Some(handle))).ok_or(Error::InvalidIterator)
    }

    /// Returns the entry at `position`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if `position` is past-the-end or otherwise invalid.
    pub fn get_at(&self, position: Position) -> Result<(&K, &V), Error> {
        let node = self.raw.node(self.entry_handle(position)?);
        Ok((node.key(), node.value()))
    }

    /// Returns the entry at `position` with its value mutable.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if `position` is past-the-end or otherwise invalid.
    pub fn get_at_mut(&mut self, position: Position) -> Result<(&K, &mut V), Error> {
        let handle = self.entry_handle(position)?;
        Ok(self.raw.node_mut(handle).entry_mut())
    }

    /// Removes the entry at `position` and returns it.
    ///
    /// Only `position` (and copies of it) become invalid; positions of the remaining entries
    /// keep referring to the same entries.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if `position` is past-the-end or otherwise invalid. The map is
    /// left unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn erase(&mut self, position: Position) -> Result<(K, V), Error> {
        let handle = self.entry_handle(position)?;
        Ok(self.raw.remove_node(handle))
    }

    /// Returns a read-only cursor at `position`. The position is checked when the cursor is used.
    pub fn cursor(&self, position: Position) -> Cursor<'_, K, V, C> {
        Cursor { map: self, position }
    }

    /// Returns a cursor at `position` that can modify values and remove entries.
    pub fn cursor_mut(&mut self, position: Position) -> CursorMut<'_, K, V, C> {
        CursorMut { map: self, position }
    }
}

/// A read-only cursor over an [`RBTreeMap`].
///
/// A cursor pairs a [`Position`] with a borrow of its map, so it can be stepped and read through
/// without passing the map each time. Created by [`RBTreeMap::cursor`].
///
/// # Examples
///
/// ```
/// use rb_tree_map::RBTreeMap;
///
/// let map = RBTreeMap::from([(1, "a"), (2, "b"), (3, "c")]);
/// let mut cursor = map.cursor(map.begin());
/// let mut seen = Vec::new();
/// while let Ok(key) = cursor.key() {
///     seen.push(*key);
///     cursor.move_next()?;
/// }
/// assert_eq!(seen, [1, 2, 3]);
/// assert!(cursor.position().is_end());
/// # Ok::<(), rb_tree_map::Error>(())
/// ```
pub struct Cursor<'a, K, V, C> {
    map: &'a RBTreeMap<K, V, C>,
    position: Position,
}

impl<'a, K, V, C> Cursor<'a, K, V, C> {
    /// Returns the position the cursor is at.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the entry under the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if the cursor is past-the-end or its position is invalid.
    pub fn key_value(&self) -> Result<(&'a K, &'a V), Error> {
        self.map.get_at(self.position)
    }

    /// Returns the key under the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if the cursor is past-the-end or its position is invalid.
    pub fn key(&self) -> Result<&'a K, Error> {
        self.key_value().map(|(k, _)| k)
    }

    /// Returns the value under the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if the cursor is past-the-end or its position is invalid.
    pub fn value(&self) -> Result<&'a V, Error> {
        self.key_value().map(|(_, v)| v)
    }

    /// Moves to the next entry, or to past-the-end after the last one.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] as for [`RBTreeMap::next_position`]. The cursor does not move.
    pub fn move_next(&mut self) -> Result<(), Error> {
        self.position = self.map.next_position(self.position)?;
        Ok(())
    }

    /// Moves to the previous entry. From past-the-end this is the largest entry; there is nothing
    /// before the smallest one.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] as for [`RBTreeMap::prev_position`]. The cursor does not move.
    pub fn move_prev(&mut self) -> Result<(), Error> {
        self.position = self.map.prev_position(self.position)?;
        Ok(())
    }
}

impl<K, V, C> Clone for Cursor<'_, K, V, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, C> Copy for Cursor<'_, K, V, C> {}

impl<K, V, C> PartialEq for Cursor<'_, K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<K, V, C> Eq for Cursor<'_, K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Cursor<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.key_value().ok()).finish()
    }
}

/// A cursor over an [`RBTreeMap`] with mutable access to values.
///
/// Besides everything [`Cursor`] does, it can update the value under it and remove the entry
/// under it. Created by [`RBTreeMap::cursor_mut`].
///
/// # Examples
///
/// ```
/// use rb_tree_map::RBTreeMap;
///
/// let mut map: RBTreeMap<i32, i32> = (1..=6).map(|k| (k, k * k)).collect();
/// let start = map.begin();
/// let mut cursor = map.cursor_mut(start);
/// while !cursor.position().is_end() {
///     let (key, value) = cursor.key_value_mut()?;
///     if key % 2 == 0 {
///         cursor.remove_current()?;
///     } else {
///         *value += 1;
///         cursor.move_next()?;
///     }
/// }
/// assert!(map.into_iter().eq([(1, 2), (3, 10), (5, 26)]));
/// # Ok::<(), rb_tree_map::Error>(())
/// ```
pub struct CursorMut<'a, K, V, C> {
    map: &'a mut RBTreeMap<K, V, C>,
    position: Position,
}

impl<K, V, C> CursorMut<'_, K, V, C> {
    /// Returns the position the cursor is at.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns a read-only cursor at the same position, borrowing from this one.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, K, V, C> {
        self.map.cursor(self.position)
    }

    /// Returns the entry under the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if the cursor is past-the-end or its position is invalid.
    pub fn key_value(&self) -> Result<(&K, &V), Error> {
        self.map.get_at(self.position)
    }

    /// Returns the entry under the cursor with its value mutable.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if the cursor is past-the-end or its position is invalid.
    pub fn key_value_mut(&mut self) -> Result<(&K, &mut V), Error> {
        self.map.get_at_mut(self.position)
    }

    /// Returns the key under the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if the cursor is past-the-end or its position is invalid.
    pub fn key(&self) -> Result<&K, Error> {
        self.key_value().map(|(k, _)| k)
    }

    /// Returns the value under the cursor, mutably.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if the cursor is past-the-end or its position is invalid.
    pub fn value_mut(&mut self) -> Result<&mut V, Error> {
        self.key_value_mut().map(|(_, v)| v)
    }

    /// Moves to the next entry, or to past-the-end after the last one.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] as for [`RBTreeMap::next_position`]. The cursor does not move.
    pub fn move_next(&mut self) -> Result<(), Error> {
        self.position = self.map.next_position(self.position)?;
        Ok(())
    }

    /// Moves to the previous entry.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] as for [`RBTreeMap::prev_position`]. The cursor does not move.
    pub fn move_prev(&mut self) -> Result<(), Error> {
        self.position = self.map.prev_position(self.position)?;
        Ok(())
    }

    /// Removes the entry under the cursor and returns it. The cursor moves on to the following
    /// entry (or past-the-end).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if the cursor is past-the-end or its position is invalid. The
    /// map is left unchanged.
    pub fn remove_current(&mut self) -> Result<(K, V), Error> {
        let handle = self.map.entry_handle(self.position)?;
        let next = self.map.raw.successor(handle);
        let entry = self.map.raw.remove_node(handle);
        self.position = self.map.position_of(next);
        Ok(entry)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for CursorMut<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.key_value().ok()).finish()
    }
}
