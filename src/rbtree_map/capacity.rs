use super::RBTreeMap;
use super::cursor::MapId;
use crate::raw::RawRBTreeMap;

impl<K: Ord, V> RBTreeMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries before the node storage
    /// reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let map: RBTreeMap<i32, i32> = RBTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RBTreeMap::with_capacity_and_cmp(capacity, compare::natural())
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Creates an empty map ordered by `cmp`, with room for at least `capacity` entries.
    ///
    /// Like [`with_cmp`](RBTreeMap::with_cmp), this places no bound on `C`; inserting and
    /// looking up keys is what needs `C: Compare<K>`.
    pub fn with_capacity_and_cmp(capacity: usize, cmp: C) -> Self {
        RBTreeMap {
            raw: RawRBTreeMap::with_capacity(capacity, cmp),
            id: MapId::fresh(),
        }
    }

    /// Returns how many entries the map can hold without reallocating its node storage.
    ///
    /// Removing entries does not release storage; freed slots are reused by later insertions.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
