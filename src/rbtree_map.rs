use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use compare::{Compare, Natural};

use crate::Error;
use crate::raw::{Handle, RawRBTreeMap};

mod capacity;
mod cursor;

pub use cursor::{Cursor, CursorMut, Position};

use cursor::MapId;

/// An ordered map based on a [red-black tree].
///
/// Entries are kept sorted by key under a comparator `C`. By default that is the key type's
/// [`Ord`] implementation ([`compare::Natural`]); [`RBTreeMap::with_cmp`] accepts any
/// [`compare::Compare`], closures included. Two keys are equivalent when the comparator returns
/// [`Ordering::Equal`] for them, and the map never holds two equivalent keys.
///
/// Lookups, insertions and removals take O(log n) comparisons. The tree stays balanced after
/// every mutation: no path from the root to an empty child is more than twice as long as any
/// other.
///
/// Besides the usual iterators, the map hands out [`Position`]s: small `Copy` tokens naming one
/// entry (or the past-the-end spot) of one particular map. A position can be stepped, read
/// through and erased by, and every such use is checked. A position from another map, a position
/// whose entry has been removed, or stepping past either end yields [`Error::InvalidIterator`]
/// instead of touching the tree.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative to any
/// other key changes while it is in the map. The behavior resulting from such a logic error is
/// not specified, but will be encapsulated to the `RBTreeMap` that observed it and not result in
/// undefined behavior.
///
/// # Examples
///
/// ```
/// use rb_tree_map::RBTreeMap;
///
/// let mut movie_reviews = RBTreeMap::new();
///
/// movie_reviews.insert("Office Space", "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction", "Masterpiece.");
/// movie_reviews.insert("The Godfather", "Very enjoyable.");
/// movie_reviews.insert("The Blues Brothers", "Eye lyked it a lot.");
///
/// // check for a specific one.
/// if !movie_reviews.contains_key(&"Les Miserables") {
///     println!("We've got {} reviews, but Les Miserables ain't one.",
///              movie_reviews.len());
/// }
///
/// // oops, this review has a lot of spelling mistakes, let's delete it.
/// let position = movie_reviews.find(&"The Blues Brothers");
/// movie_reviews.erase(position).unwrap();
///
/// // look up the values associated with some keys.
/// for movie in ["Up!", "Office Space"] {
///     match movie_reviews.at(&movie) {
///         Ok(review) => println!("{movie}: {review}"),
///         Err(_) => println!("{movie} is unreviewed."),
///     }
/// }
///
/// // iterate over everything.
/// for (movie, review) in &movie_reviews {
///     println!("{movie}: \"{review}\"");
/// }
/// ```
///
/// Walking with positions:
///
/// ```
/// use rb_tree_map::{Error, RBTreeMap};
///
/// let map = RBTreeMap::from([(1, "a"), (2, "b")]);
///
/// let mut position = map.begin();
/// assert_eq!(map.get_at(position), Ok((&1, &"a")));
/// position = map.next_position(position)?;
/// position = map.next_position(position)?;
/// assert_eq!(position, map.end());
/// assert_eq!(map.next_position(position), Err(Error::InvalidIterator));
/// # Ok::<(), Error>(())
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct RBTreeMap<K, V, C = Natural<K>> {
    raw: RawRBTreeMap<K, V, C>,
    id: MapId,
}

/// An iterator over the entries of an `RBTreeMap`.
///
/// This `struct` is created by the [`iter`] method on [`RBTreeMap`]. See its
/// documentation for more.
///
/// [`iter`]: RBTreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V, C> {
    tree: &'a RawRBTreeMap<K, V, C>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// A mutable iterator over the entries of an `RBTreeMap`.
///
/// This `struct` is created by the [`iter_mut`] method on [`RBTreeMap`]. See its
/// documentation for more.
///
/// [`iter_mut`]: RBTreeMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    inner: alloc::vec::IntoIter<(&'a K, &'a mut V)>,
}

/// An owning iterator over the entries of an `RBTreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`RBTreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of an `RBTreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`RBTreeMap`].
///
/// [`keys`]: RBTreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V, C> {
    inner: Iter<'a, K, V, C>,
}

/// An iterator over the values of an `RBTreeMap`.
///
/// This `struct` is created by the [`values`] method on [`RBTreeMap`].
///
/// [`values`]: RBTreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V, C> {
    inner: Iter<'a, K, V, C>,
}

/// A mutable iterator over the values of an `RBTreeMap`.
///
/// This `struct` is created by the [`values_mut`] method on [`RBTreeMap`].
///
/// [`values_mut`]: RBTreeMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

/// An owning iterator over the keys of an `RBTreeMap`.
///
/// This `struct` is created by the [`into_keys`] method on [`RBTreeMap`].
///
/// [`into_keys`]: RBTreeMap::into_keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

/// An owning iterator over the values of an `RBTreeMap`.
///
/// This `struct` is created by the [`into_values`] method on [`RBTreeMap`].
///
/// [`into_values`]: RBTreeMap::into_values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K: Ord, V> RBTreeMap<K, V> {
    /// Makes a new, empty `RBTreeMap` ordered by the keys' [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        RBTreeMap::with_cmp(compare::natural())
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Makes a new, empty `RBTreeMap` ordered by `cmp`.
    ///
    /// The comparator is part of the map's value: it is cloned along with the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::with_cmp(|a: &i32, b: &i32| b.cmp(a));
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    ///
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, [3, 2, 1]);
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        RBTreeMap {
            raw: RawRBTreeMap::new(cmp),
            id: MapId::fresh(),
        }
    }

    /// Returns a reference to the map's comparator.
    ///
    /// Named apart from [`Ord::cmp`], which compares whole maps.
    pub fn comparator(&self) -> &C {
        self.raw.cmp()
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all elements.
    ///
    /// Positions taken before the call no longer refer to anything; using them fails with
    /// [`Error::InvalidIterator`].
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the first key-value pair in the map.
    /// The key in this pair is the minimum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.first()?);
        Some((node.key(), node.value()))
    }

    /// Returns the last key-value pair in the map.
    /// The key in this pair is the maximum key in the map.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.last()?);
        Some((node.key(), node.value()))
    }

    /// Removes and returns the first element in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// while let Some((key, _val)) = map.pop_first() {
    ///     assert!(map.iter().all(|(k, _v)| *k > key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.raw.first()?;
        Some(self.raw.remove_node(first))
    }

    /// Removes and returns the last element in the map.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.raw.last()?;
        Some(self.raw.remove_node(last))
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all pairs `(k, v)` for which `f(&k, &mut v)` returns `false`.
    /// The elements are visited in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map: RBTreeMap<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// // Keep only the elements with even-numbered keys.
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert!(map.into_iter().eq(vec![(0, 0), (2, 20), (4, 40), (6, 60)]));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        // Handles survive unrelated removals, so decide first and unlink afterwards.
        let doomed: Vec<Handle> = self
            .raw
            .handles_in_order()
            .into_iter()
            .filter(|&handle| {
                let (key, value) = self.raw.node_mut(handle).entry_mut();
                !f(key, value)
            })
            .collect();

        for handle in doomed {
            self.raw.remove_node(handle);
        }
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; amortized O(1) per step.
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            tree: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// Only the values can be changed; keys stay shared.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([("a", 1), ("b", 2), ("c", 3)]);
    ///
    /// // add 10 to the value if the key isn't "a"
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), [1, 12, 13]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) to create the iterator, which gathers the entries up front; O(1) per step.
    ///
    /// Unlike [`iter`](Self::iter), this allocates: the iterator owns a vector of `n` entry
    /// references, and building it briefly needs two more vectors, one of `n` handles and one
    /// sized to the map's [`capacity`](Self::capacity). Prefer `iter` (or positions) when only
    /// reading.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.raw.entries_mut_in_order().into_iter(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// let keys: Vec<_> = a.keys().cloned().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V, C> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// a.insert(1, String::from("hello"));
    /// a.insert(2, String::from("goodbye"));
    ///
    /// for value in a.values_mut() {
    ///     value.push_str("!");
    /// }
    ///
    /// let values: Vec<String> = a.values().cloned().collect();
    /// assert_eq!(values, [String::from("hello!"), String::from("goodbye!")]);
    /// ```
    ///
    /// # Complexity
    ///
    /// As for [`iter_mut`](Self::iter_mut): O(n) time and O(n) extra memory to create, O(1) per
    /// step.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys { inner: self.into_iter() }
    }

    /// Creates a consuming iterator visiting all the values, in order by key.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues { inner: self.into_iter() }
    }
}

impl<K, V, C: Compare<K>> RBTreeMap<K, V, C> {
    /// Inserts a key-value pair unless an equivalent key is already present.
    ///
    /// Returns the position of the entry holding the key and whether it was newly created. When
    /// the key was already present the map is left unchanged: the stored key and value are kept
    /// and the arguments are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// let (position, inserted) = map.insert(37, "a");
    /// assert!(inserted);
    /// assert_eq!(map.get_at(position), Ok((&37, &"a")));
    ///
    /// let (again, inserted) = map.insert(37, "b");
    /// assert!(!inserted);
    /// assert_eq!(again, position);
    /// assert_eq!(map[&37], "a");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        let (handle, inserted) = self.raw.insert_with(key, || value);
        (self.position_of(Some(handle)), inserted)
    }

    /// Returns the value for `key`, inserting the result of `make_value` first if the key is
    /// absent. `make_value` is not called when the key is present.
    pub fn get_or_insert_with<F>(&mut self, key: K, make_value: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let (handle, _) = self.raw.insert_with(key, make_value);
        self.raw.node_mut(handle).value_mut()
    }

    /// Returns the value for `key`, inserting `V::default()` first if the key is absent.
    ///
    /// This is the map's subscript-with-insert access.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut letters: RBTreeMap<char, i32> = RBTreeMap::new();
    /// for ch in "a short treatise on fungi".chars() {
    ///     *letters.get_or_insert_default(ch) += 1;
    /// }
    /// assert_eq!(letters[&'s'], 2);
    /// assert_eq!(letters[&'t'], 3);
    /// assert_eq!(letters.get(&'y'), None);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized,
        C: Compare<Q, K>,
    {
        self.raw.search(key).map(|handle| self.raw.node(handle).value())
    }

    /// Returns the stored key-value pair corresponding to the supplied key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        Q: ?Sized,
        C: Compare<Q, K>,
    {
        let node = self.raw.node(self.raw.search(key)?);
        Some((node.key(), node.value()))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: ?Sized,
        C: Compare<Q, K>,
    {
        let handle = self.raw.search(key)?;
        Some(self.raw.node_mut(handle).value_mut())
    }

    /// Returns a reference to the value corresponding to the key, or [`Error::NotFound`].
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no equivalent key is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::{Error, RBTreeMap};
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.at(&1), Ok(&"a"));
    /// assert_eq!(map.at(&2), Err(Error::NotFound));
    /// ```
    pub fn at<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        Q: ?Sized,
        C: Compare<Q, K>,
    {
        self.get(key).ok_or(Error::NotFound)
    }

    /// Mutable counterpart of [`at`](RBTreeMap::at).
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no equivalent key is present.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        Q: ?Sized,
        C: Compare<Q, K>,
    {
        self.get_mut(key).ok_or(Error::NotFound)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized,
        C: Compare<Q, K>,
    {
        self.raw.search(key).is_some()
    }

    /// Returns the number of entries with a key equivalent to `key`: either 0 or 1.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized,
        C: Compare<Q, K>,
    {
        usize::from(self.contains_key(key))
    }

    /// Returns the position of the entry for `key`, or [`end`](RBTreeMap::end) if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.get_at(map.find(&2)), Ok((&2, &"b")));
    /// assert_eq!(map.find(&3), map.end());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Position
    where
        Q: ?Sized,
        C: Compare<Q, K>,
    {
        self.position_of(self.raw.search(key))
    }

    /// Removes a key from the map, returning the value at the key if the key was previously in
    /// the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: ?Sized,
        C: Compare<Q, K>,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the key was previously
    /// in the map.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        Q: ?Sized,
        C: Compare<Q, K>,
    {
        let handle = self.raw.search(key)?;
        Some(self.raw.remove_node(handle))
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for RBTreeMap<K, V, C> {
    /// Makes an independent deep copy. The copy is a different map: positions of one are
    /// foreign to the other.
    fn clone(&self) -> Self {
        RBTreeMap {
            raw: self.raw.clone(),
            id: MapId::fresh(),
        }
    }

    /// Replaces the contents of `self` with a deep copy of `source`, comparator included.
    ///
    /// `self` keeps its identity, so [`end`](RBTreeMap::end) still compares equal to earlier
    /// `end` positions, while positions of the replaced entries become invalid.
    fn clone_from(&mut self, source: &Self) {
        // Assigning a map to itself leaves it untouched.
        if self.id == source.id {
            return;
        }
        self.raw.clone_from(&source.raw);
    }
}

impl<K: Hash, V: Hash, C> Hash for RBTreeMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for RBTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq, C> Eq for RBTreeMap<K, V, C> {}

impl<K: PartialOrd, V: PartialOrd, C> PartialOrd for RBTreeMap<K, V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord, C> Ord for RBTreeMap<K, V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RBTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> Default for RBTreeMap<K, V> {
    fn default() -> Self {
        RBTreeMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RBTreeMap<K, V> {
    /// Builds a map from `(key, value)` pairs. When a key repeats, the first pair wins, as with
    /// [`RBTreeMap::insert`].
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = RBTreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for RBTreeMap<K, V, C> {
    /// Inserts every pair whose key is not yet present. Existing entries are left unchanged.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Copy, V: Copy, C: Compare<K>> Extend<(&'a K, &'a V)> for RBTreeMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a RBTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Iter<'a, K, V, C> {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut RBTreeMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, C> IntoIterator for RBTreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, Q, V, C> Index<&Q> for RBTreeMap<K, V, C>
where
    Q: ?Sized,
    C: Compare<Q, K>,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map. Use [`RBTreeMap::at`] to get an
    /// [`Error::NotFound`] instead.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RBTreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.front?;
        let tree = self.tree;
        self.remaining -= 1;
        self.front = tree.successor(handle);

        let node = tree.node(handle);
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for Iter<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.back?;
        let tree = self.tree;
        self.remaining -= 1;
        self.back = tree.predecessor(handle);

        let node = tree.node(handle);
        Some((node.key(), node.value()))
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, C> FusedIterator for Iter<'_, K, V, C> {}

impl<K, V, C> Clone for Iter<'_, K, V, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K, V, C> fmt::Debug for Iter<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K, V> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("remaining", &self.inner.len()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    /// Creates an empty `rbtree_map::IntoIter`.
    ///
    /// ```
    /// # use rb_tree_map::rbtree_map;
    /// let iter: rbtree_map::IntoIter<u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: Vec::new().into_iter(),
        }
    }
}

impl<'a, K, V, C> Iterator for Keys<'a, K, V, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Keys<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V, C> ExactSizeIterator for Keys<'_, K, V, C> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, C> FusedIterator for Keys<'_, K, V, C> {}

impl<K, V, C> Clone for Keys<'_, K, V, C> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V, C> fmt::Debug for Keys<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, C> Iterator for Values<'a, K, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Values<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V, C> ExactSizeIterator for Values<'_, K, V, C> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, C> FusedIterator for Values<'_, K, V, C> {}

impl<K, V, C> Clone for Values<'_, K, V, C> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug, C> fmt::Debug for Values<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K, V> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuesMut").field("remaining", &self.inner.len()).finish()
    }
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K: fmt::Debug, V> fmt::Debug for IntoKeys<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(k, _)| k)).finish()
    }
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoValues<K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for IntoValues<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(_, v)| v)).finish()
    }
}
