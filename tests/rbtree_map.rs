use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use proptest::prelude::*;
use rb_tree_map::rbtree_map;
use rb_tree_map::{Error, Position, RBTreeMap};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 10_000;

/// Generates keys in a range small enough to cause collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -20_000i64..20_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn entries_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    EraseFound(i64),
    Get(i64),
    At(i64),
    Count(i64),
    GetOrInsertDefault(i64),
    FirstKeyValue,
    LastKeyValue,
    PopFirst,
    PopLast,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        2 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::EraseFound),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::At),
        1 => key_strategy().prop_map(MapOp::Count),
        1 => key_strategy().prop_map(MapOp::GetOrInsertDefault),
        1 => Just(MapOp::FirstKeyValue),
        1 => Just(MapOp::LastKeyValue),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
    ]
}

/// Builds both maps from the same entries. Later duplicates are ignored by both.
fn build(entries: &[(i64, i64)]) -> (RBTreeMap<i64, i64>, BTreeMap<i64, i64>) {
    let rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();
    let mut bt_map = BTreeMap::new();
    for &(k, v) in entries {
        bt_map.entry(k).or_insert(v);
    }
    (rb_map, bt_map)
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both RBTreeMap and BTreeMap and asserts
    /// identical results at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut rb_map: RBTreeMap<i64, i64> = RBTreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    let (position, inserted) = rb_map.insert(*k, *v);
                    let bt_inserted = !bt_map.contains_key(k);
                    let bt_value = *bt_map.entry(*k).or_insert(*v);
                    prop_assert_eq!(inserted, bt_inserted, "insert({}, {})", k, v);
                    prop_assert_eq!(rb_map.get_at(position), Ok((k, &bt_value)), "insert({}, {}) position", k, v);
                }
                MapOp::Remove(k) => {
                    let rb_result = rb_map.remove(k);
                    let bt_result = bt_map.remove(k);
                    prop_assert_eq!(rb_result, bt_result, "remove({})", k);
                }
                MapOp::EraseFound(k) => {
                    let position = rb_map.find(k);
                    let rb_result = rb_map.erase(position);
                    match bt_map.remove_entry(k) {
                        Some(entry) => prop_assert_eq!(rb_result, Ok(entry), "erase(find({}))", k),
                        None => {
                            prop_assert_eq!(position, rb_map.end(), "find({})", k);
                            prop_assert_eq!(rb_result, Err(Error::InvalidIterator), "erase(end())");
                        }
                    }
                    prop_assert_eq!(rb_map.find(k), rb_map.end(), "find({}) after erase", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(rb_map.get(k), bt_map.get(k), "get({})", k);
                }
                MapOp::At(k) => {
                    prop_assert_eq!(rb_map.at(k), bt_map.get(k).ok_or(Error::NotFound), "at({})", k);
                }
                MapOp::Count(k) => {
                    prop_assert_eq!(rb_map.count(k), usize::from(bt_map.contains_key(k)), "count({})", k);
                }
                MapOp::GetOrInsertDefault(k) => {
                    let rb_value = *rb_map.get_or_insert_default(*k);
                    let bt_value = *bt_map.entry(*k).or_default();
                    prop_assert_eq!(rb_value, bt_value, "get_or_insert_default({})", k);
                }
                MapOp::FirstKeyValue => {
                    prop_assert_eq!(rb_map.first_key_value(), bt_map.first_key_value(), "first_key_value");
                }
                MapOp::LastKeyValue => {
                    prop_assert_eq!(rb_map.last_key_value(), bt_map.last_key_value(), "last_key_value");
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(rb_map.pop_first(), bt_map.pop_first(), "pop_first");
                }
                MapOp::PopLast => {
                    prop_assert_eq!(rb_map.pop_last(), bt_map.pop_last(), "pop_last");
                }
            }
            prop_assert_eq!(rb_map.len(), bt_map.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(rb_map.is_empty(), bt_map.is_empty(), "is_empty mismatch after {:?}", op);
        }

        let rb_items: Vec<_> = rb_map.iter().map(|(&k, &v)| (k, v)).collect();
        let bt_items: Vec<_> = bt_map.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(rb_items, bt_items);
    }

    /// Tests that iteration order matches BTreeMap after random insertions.
    #[test]
    fn iter_matches_btreemap(entries in entries_strategy()) {
        let (rb_map, bt_map) = build(&entries);

        // Forward iteration
        let rb_items: Vec<_> = rb_map.iter().map(|(&k, &v)| (k, v)).collect();
        let bt_items: Vec<_> = bt_map.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&rb_items, &bt_items, "iter() mismatch");

        // Reverse iteration
        let rb_rev: Vec<_> = rb_map.iter().rev().map(|(&k, &v)| (k, v)).collect();
        let bt_rev: Vec<_> = bt_map.iter().rev().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&rb_rev, &bt_rev, "iter().rev() mismatch");

        // Keys
        let rb_keys: Vec<_> = rb_map.keys().copied().collect();
        let bt_keys: Vec<_> = bt_map.keys().copied().collect();
        prop_assert_eq!(&rb_keys, &bt_keys, "keys() mismatch");

        // Values
        let rb_vals: Vec<_> = rb_map.values().rev().copied().collect();
        let bt_vals: Vec<_> = bt_map.values().rev().copied().collect();
        prop_assert_eq!(&rb_vals, &bt_vals, "values().rev() mismatch");

        // into_iter
        let rb_into: Vec<_> = rb_map.clone().into_iter().collect();
        let bt_into: Vec<_> = bt_map.clone().into_iter().collect();
        prop_assert_eq!(&rb_into, &bt_into, "into_iter() mismatch");

        // into_keys
        let rb_into_keys: Vec<_> = rb_map.clone().into_keys().collect();
        let bt_into_keys: Vec<_> = bt_map.clone().into_keys().collect();
        prop_assert_eq!(&rb_into_keys, &bt_into_keys, "into_keys() mismatch");

        // into_values
        let rb_into_vals: Vec<_> = rb_map.into_values().collect();
        let bt_into_vals: Vec<_> = bt_map.into_values().collect();
        prop_assert_eq!(&rb_into_vals, &bt_into_vals, "into_values() mismatch");
    }

    /// Tests ExactSizeIterator and DoubleEndedIterator behavior.
    #[test]
    fn iter_size_and_double_ended(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();

        prop_assert_eq!(rb_map.iter().len(), rb_map.len(), "ExactSizeIterator len mismatch");

        // Alternating front/back should yield all elements exactly once
        let mut from_front = Vec::new();
        let mut from_back = Vec::new();
        let mut iter = rb_map.iter();
        let mut toggle = true;
        loop {
            if toggle {
                if let Some(item) = iter.next() {
                    from_front.push(*item.0);
                } else {
                    break;
                }
            } else if let Some(item) = iter.next_back() {
                from_back.push(*item.0);
            } else {
                break;
            }
            toggle = !toggle;
        }
        prop_assert_eq!(iter.next(), None, "iterator not fused");
        from_back.reverse();
        from_front.extend(from_back);
        let keys: Vec<_> = rb_map.keys().copied().collect();
        prop_assert_eq!(from_front, keys);
    }

    /// Walking positions from `begin()` to `end()` visits exactly what `iter()` does, and walking
    /// back from `end()` visits it in reverse.
    #[test]
    fn position_walks_match_iter(entries in entries_strategy()) {
        let (rb_map, bt_map) = build(&entries);
        let bt_keys: Vec<_> = bt_map.keys().copied().collect();

        let mut forward = Vec::new();
        let mut position = rb_map.begin();
        while position != rb_map.end() {
            forward.push(*rb_map.get_at(position).unwrap().0);
            position = rb_map.next_position(position).unwrap();
        }
        prop_assert_eq!(&forward, &bt_keys);
        prop_assert_eq!(rb_map.next_position(rb_map.end()), Err(Error::InvalidIterator));

        let mut backward = Vec::new();
        let mut position = rb_map.end();
        while let Ok(previous) = rb_map.prev_position(position) {
            backward.push(*rb_map.get_at(previous).unwrap().0);
            position = previous;
        }
        backward.reverse();
        prop_assert_eq!(&backward, &bt_keys);
        prop_assert_eq!(position, rb_map.begin());
    }

    /// Erasing some entries leaves the positions of all the others usable, while the erased
    /// positions are refused.
    #[test]
    fn positions_survive_unrelated_erases(
        entries in entries_strategy(),
        victims in proptest::collection::vec(key_strategy(), 0..TEST_SIZE),
    ) {
        let (mut rb_map, mut bt_map) = build(&entries);
        let positions: Vec<(i64, Position)> = bt_map.keys().map(|&k| (k, rb_map.find(&k))).collect();

        for k in &victims {
            rb_map.remove(k);
            bt_map.remove(k);
        }

        for (k, position) in positions {
            match bt_map.get(&k) {
                Some(v) => prop_assert_eq!(rb_map.get_at(position), Ok((&k, v))),
                None => {
                    prop_assert_eq!(rb_map.get_at(position), Err(Error::InvalidIterator));
                    prop_assert_eq!(rb_map.erase(position), Err(Error::InvalidIterator));
                }
            }
        }
        prop_assert_eq!(rb_map.len(), bt_map.len());
    }

    /// Erasing through a cursor while walking removes exactly the chosen entries.
    #[test]
    fn cursor_removal_matches_retain(entries in entries_strategy()) {
        let (mut rb_map, mut bt_map) = build(&entries);

        let start = rb_map.begin();
        let mut cursor = rb_map.cursor_mut(start);
        while !cursor.position().is_end() {
            let (&k, v) = cursor.key_value_mut().unwrap();
            if k % 3 == 0 {
                cursor.remove_current().unwrap();
            } else {
                *v = v.wrapping_add(1);
                cursor.move_next().unwrap();
            }
        }
        bt_map.retain(|k, v| {
            *v = v.wrapping_add(1);
            k % 3 != 0
        });

        let rb_items: Vec<_> = rb_map.into_iter().collect();
        let bt_items: Vec<_> = bt_map.into_iter().collect();
        prop_assert_eq!(rb_items, bt_items);
    }

    #[test]
    fn retain_matches_btreemap(entries in entries_strategy()) {
        let (mut rb_map, mut bt_map) = build(&entries);
        rb_map.retain(|k, _| k % 2 == 0);
        bt_map.retain(|k, _| k % 2 == 0);
        prop_assert!(rb_map.iter().eq(bt_map.iter()));
    }

    #[test]
    fn iter_mut_and_values_mut_match(entries in entries_strategy()) {
        let (mut rb_map, mut bt_map) = build(&entries);

        for (k, v) in &mut rb_map {
            *v = v.wrapping_mul(3).wrapping_add(*k);
        }
        for (k, v) in &mut bt_map {
            *v = v.wrapping_mul(3).wrapping_add(*k);
        }
        prop_assert!(rb_map.iter().eq(bt_map.iter()));

        for v in rb_map.values_mut().rev() {
            *v = v.wrapping_neg();
        }
        for v in bt_map.values_mut() {
            *v = v.wrapping_neg();
        }
        prop_assert!(rb_map.iter().eq(bt_map.iter()));
    }

    #[test]
    fn get_mut_and_at_mut_match(
        entries in entries_strategy(),
        keys in proptest::collection::vec(key_strategy(), 0..1_000),
    ) {
        let (mut rb_map, mut bt_map) = build(&entries);
        for k in &keys {
            match (rb_map.at_mut(k), bt_map.get_mut(k)) {
                (Ok(rb_v), Some(bt_v)) => {
                    *rb_v = rb_v.wrapping_add(7);
                    *bt_v = bt_v.wrapping_add(7);
                }
                (Err(e), None) => prop_assert_eq!(e, Error::NotFound),
                (rb, bt) => prop_assert!(false, "at_mut({}) = {:?}, get_mut = {:?}", k, rb, bt),
            }
            prop_assert_eq!(rb_map.get_mut(k).map(|v| *v), bt_map.get(k).copied());
        }
        prop_assert!(rb_map.iter().eq(bt_map.iter()));
    }

    #[test]
    fn clone_is_equal_and_independent(entries in entries_strategy(), victim in key_strategy()) {
        let (mut rb_map, _) = build(&entries);
        let snapshot: Vec<_> = rb_map.iter().map(|(&k, &v)| (k, v)).collect();
        let copy = rb_map.clone();
        prop_assert_eq!(&copy, &rb_map);
        prop_assert_eq!(hash_of(&copy), hash_of(&rb_map));

        rb_map.remove(&victim);
        rb_map.insert(victim + 40_000, 0);
        let copied: Vec<_> = copy.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(copied, snapshot);
    }

    #[test]
    fn ord_matches_btreemap(a in entries_strategy(), b in entries_strategy()) {
        let (rb_a, bt_a) = build(&a);
        let (rb_b, bt_b) = build(&b);
        prop_assert_eq!(Ord::cmp(&rb_a, &rb_b), bt_a.cmp(&bt_b));
        prop_assert_eq!(rb_a == rb_b, bt_a == bt_b);
    }

    #[test]
    fn index_by_key_matches_btreemap(entries in entries_strategy()) {
        let (rb_map, bt_map) = build(&entries);
        for (k, v) in &bt_map {
            prop_assert_eq!(&rb_map[k], v);
        }
    }

    #[test]
    fn extend_keeps_first_value(
        entries in entries_strategy(),
        more in proptest::collection::vec((key_strategy(), value_strategy()), 0..1_000),
    ) {
        let (mut rb_map, mut bt_map) = build(&entries);
        rb_map.extend(more.iter().map(|(k, v)| (k, v)));
        for &(k, v) in &more {
            bt_map.entry(k).or_insert(v);
        }
        prop_assert!(rb_map.iter().eq(bt_map.iter()));
    }

    #[test]
    fn clear_empties_map_and_invalidates_positions(entries in entries_strategy()) {
        let (mut rb_map, _) = build(&entries);
        let first = rb_map.begin();
        rb_map.clear();
        prop_assert!(rb_map.is_empty());
        prop_assert_eq!(rb_map.begin(), rb_map.end());
        prop_assert_eq!(rb_map.iter().next(), None);
        if !first.is_end() {
            prop_assert_eq!(rb_map.get_at(first), Err(Error::InvalidIterator));
        }
    }
}

// ─── Concrete scenarios ──────────────────────────────────────────────────────

mod scenarios {
    use super::*;
    use pretty_assertions::assert_eq;

    fn digits() -> RBTreeMap<i32, i32> {
        let mut map = RBTreeMap::new();
        for k in [5, 3, 8, 1, 4, 7, 9, 2, 6, 0] {
            map.insert(k, k * 10);
        }
        map
    }

    #[test]
    fn insert_sequence_iterates_in_order() {
        let map = digits();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), (0..=9).collect::<Vec<_>>());
        assert_eq!(map.len(), 10);
    }

    #[test]
    fn erase_node_with_two_children() {
        let mut map = digits();
        assert_eq!(map.erase(map.find(&5)), Ok((5, 50)));
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [0, 1, 2, 3, 4, 6, 7, 8, 9]);
        assert_eq!(map.find(&5), map.end());
        assert_eq!(map.count(&5), 0);
    }

    #[test]
    fn erase_end_is_refused() {
        let mut map = digits();
        assert_eq!(map.erase(map.end()), Err(Error::InvalidIterator));
        assert_eq!(map.len(), 10);
    }

    #[test]
    fn new_map_begin_equals_end() {
        let map: RBTreeMap<i32, i32> = RBTreeMap::new();
        assert_eq!(map.begin(), map.end());
        assert!(map.is_empty());
        assert_eq!(map.get_at(map.end()), Err(Error::InvalidIterator));
        assert_eq!(map.next_position(map.begin()), Err(Error::InvalidIterator));
    }

    #[test]
    fn at_missing_then_subscript_inserts_default() {
        let mut map: RBTreeMap<i32, String> = RBTreeMap::new();
        assert_eq!(map.at(&42), Err(Error::NotFound));
        assert_eq!(map.get_or_insert_default(42), "");
        assert_eq!(map.count(&42), 1);
        map.get_or_insert_default(42).push_str("answer");
        assert_eq!(map.at(&42).map(String::as_str), Ok("answer"));
    }

    #[test]
    fn copies_do_not_share_entries() {
        let mut a = RBTreeMap::new();
        a.insert(1, "one");
        let mut b = a.clone();
        assert_eq!(b.erase(b.find(&1)), Ok((1, "one")));
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 0);
    }

    #[test]
    fn insert_of_present_key_keeps_value() {
        let mut map = digits();
        let (position, inserted) = map.insert(3, -1);
        assert!(!inserted);
        assert_eq!(map.get_at(position), Ok((&3, &30)));
        assert_eq!(map.len(), 10);
    }

    #[test]
    fn prev_from_begin_is_refused() {
        let map = digits();
        assert_eq!(map.prev_position(map.begin()), Err(Error::InvalidIterator));
        let last = map.prev_position(map.end()).unwrap();
        assert_eq!(map.get_at(last), Ok((&9, &90)));
    }

    #[test]
    fn positions_of_distinct_maps_never_match() {
        let a = digits();
        let b = digits();
        assert_ne!(a.end(), b.end());
        assert_ne!(a.find(&3), b.find(&3));
        assert_eq!(a.get_at(b.find(&3)), Err(Error::InvalidIterator));
    }

    #[test]
    fn clone_from_replaces_contents_and_comparator() {
        let descending = |a: &i32, b: &i32| b.cmp(a);
        let mut source = RBTreeMap::with_cmp(descending);
        source.extend([(1, 'a'), (2, 'b'), (3, 'c')]);

        let mut target = RBTreeMap::with_cmp(descending);
        target.insert(9, 'z');
        let end = target.end();
        target.clone_from(&source);

        assert_eq!(target.keys().copied().collect::<Vec<_>>(), [3, 2, 1]);
        assert_eq!(target.end(), end);
        assert_ne!(target.end(), source.end());
    }

    #[test]
    fn into_iter_default_and_debug() {
        let iter: rbtree_map::IntoIter<i32, i32> = Default::default();
        assert_eq!(iter.len(), 0);

        let map = RBTreeMap::from([(2, 'b'), (1, 'a')]);
        assert_eq!(format!("{map:?}"), "{1: 'a', 2: 'b'}");
        assert_eq!(format!("{:?}", map.clone().into_values()), "['a', 'b']");
    }

    #[test]
    #[should_panic(expected = "no entry found for key")]
    fn index_missing_key_panics() {
        let map = digits();
        let _value = map[&42];
    }

    #[test]
    fn errors_display() {
        assert_eq!(Error::NotFound.to_string(), "no entry found for key");
        let boxed: Box<dyn std::error::Error> = Box::new(Error::InvalidIterator);
        assert_eq!(boxed.to_string(), "position does not refer to an entry of this map");
    }
}
