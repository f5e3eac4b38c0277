use std::collections::BTreeMap;
use std::ops::Bound;

use aa_tree::AATreeMap;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Generates keys in a range narrow enough to force collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn entries<C>(map: &AATreeMap<i64, i64, C>) -> Vec<(i64, i64)> {
    map.iter().map(|(k, v)| (*k, *v)).collect()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    Get(i64),
    ContainsKey(i64),
    FirstKeyValue,
    LastKeyValue,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => Just(MapOp::FirstKeyValue),
        1 => Just(MapOp::LastKeyValue),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both AATreeMap and BTreeMap
    /// and asserts identical results and a valid tree at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut aa_map: AATreeMap<i64, i64> = AATreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    aa_map = aa_map.insert(*k, *v);
                    bt_map.insert(*k, *v);
                }
                MapOp::Remove(k) => {
                    aa_map = aa_map.remove(k);
                    bt_map.remove(k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(aa_map.get(k), bt_map.get(k), "get({})", k);
                    prop_assert_eq!(aa_map.get_key_value(k), bt_map.get_key_value(k));
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(aa_map.contains_key(k), bt_map.contains_key(k));
                }
                MapOp::FirstKeyValue => {
                    prop_assert_eq!(aa_map.first_key_value(), bt_map.first_key_value());
                }
                MapOp::LastKeyValue => {
                    prop_assert_eq!(aa_map.last_key_value(), bt_map.last_key_value());
                }
            }
            prop_assert_eq!(aa_map.len(), bt_map.len());
            prop_assert_eq!(aa_map.validate(), Ok(()), "after {:?}", op);
        }

        prop_assert!(aa_map.iter().eq(bt_map.iter()));
        prop_assert!(aa_map.keys().eq(bt_map.keys()));
        prop_assert!(aa_map.values().eq(bt_map.values()));
    }

    /// Replacing a value keeps the tree's shape and every older version.
    #[test]
    fn insert_replaces_existing_values(
        keys in proptest::collection::btree_set(key_strategy(), 1..300),
        value in value_strategy(),
    ) {
        let map: AATreeMap<i64, i64> = keys.iter().map(|k| (*k, 0)).collect();
        for k in &keys {
            let updated = map.insert(*k, value);
            prop_assert_eq!(updated.len(), map.len());
            prop_assert_eq!(updated.height(), map.height());
            prop_assert_eq!(updated.get(k), Some(&value));
            prop_assert_eq!(map.get(k), Some(&0));
        }
    }
}

// ─── Persistence ─────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn earlier_versions_are_unchanged(ops in proptest::collection::vec(map_op_strategy(), 300)) {
        let mut versions = vec![AATreeMap::<i64, i64>::new()];
        let mut snapshots = vec![Vec::new()];
        let mut model = BTreeMap::new();

        for op in &ops {
            let current = versions.last().cloned().unwrap_or_default();
            let next = match op {
                MapOp::Insert(k, v) => {
                    model.insert(*k, *v);
                    current.insert(*k, *v)
                }
                MapOp::Remove(k) => {
                    model.remove(k);
                    current.remove(k)
                }
                _ => continue,
            };
            versions.push(next);
            snapshots.push(model.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>());
        }

        for (version, snapshot) in versions.iter().zip(&snapshots) {
            prop_assert_eq!(&entries(version), snapshot);
        }
    }
}

// ─── Cursor ──────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// A cursor's neighbours agree with BTreeMap range queries.
    #[test]
    fn cursor_neighbours_match_btreemap_ranges(
        keys in proptest::collection::vec(key_strategy(), 0..300),
        probes in proptest::collection::vec(key_strategy(), 50),
    ) {
        let map: AATreeMap<i64, i64> = keys.iter().map(|k| (*k, k * 10)).collect();
        let model: BTreeMap<i64, i64> = keys.iter().map(|k| (*k, k * 10)).collect();

        for probe in &probes {
            let cursor = map.select(*probe);
            prop_assert_eq!(cursor.is_found(), model.contains_key(probe));
            prop_assert_eq!(cursor.value(), model.get(probe));

            let next = cursor.next().map(|c| (*c.key(), c.value().copied()));
            let expected_next = model
                .range((Bound::Excluded(probe), Bound::Unbounded))
                .next()
                .map(|(k, v)| (*k, Some(*v)));
            prop_assert_eq!(next, expected_next);

            let previous = cursor.previous().map(|c| *c.key());
            let expected_previous = model.range(..probe).next_back().map(|(k, _)| *k);
            prop_assert_eq!(previous, expected_previous);
        }
    }
}

#[test]
fn cursor_insert_and_remove() {
    let map = AATreeMap::from([(1, "one"), (3, "three"), (5, "five")]);

    let vacant = map.select(4);
    assert!(!vacant.is_found());
    assert_eq!(vacant.value(), None);
    let grown = vacant.insert("four");
    assert_eq!(grown.keys().copied().collect::<Vec<_>>(), [1, 3, 4, 5]);
    assert_eq!(grown.validate(), Ok(()));

    let on_three = map.select(5).previous().expect("3 precedes 5");
    assert_eq!(on_three.value(), Some(&"three"));
    let replaced = on_three.insert("THREE");
    assert_eq!(replaced.get(&3), Some(&"THREE"));
    assert_eq!(replaced.len(), 3);

    let shrunk = map.select(1).remove();
    assert_eq!(shrunk.keys().copied().collect::<Vec<_>>(), [3, 5]);
    assert!(map.select(2).remove().ptr_eq(&map));

    assert_eq!(map.get(&3), Some(&"three"));
    assert_eq!(map.len(), 3);
}

// ─── Comparators and traits ──────────────────────────────────────────────────

#[test]
fn case_insensitive_keys() {
    let map = AATreeMap::with_comparator(|a: &String, b: &String| {
        a.to_lowercase().cmp(&b.to_lowercase())
    })
    .insert("Apple".to_owned(), 1)
    .insert("banana".to_owned(), 2)
    .insert("APPLE".to_owned(), 3);

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&"apple".to_owned()), Some(&3));
    assert_eq!(map.keys().cloned().collect::<Vec<_>>(), ["Apple", "banana"]);
    assert_eq!(map.validate(), Ok(()));
}

#[test]
fn extend_and_compare() {
    let mut map = AATreeMap::from([(2, 20)]);
    let before = map.clone();
    map.extend([(1, 10), (2, 21)]);

    assert_eq!(entries(&map), [(1, 10), (2, 21)]);
    assert_eq!(entries(&before), [(2, 20)]);
    assert_eq!(map, AATreeMap::from([(2, 21), (1, 10)]));
    assert_ne!(map, before);

    let mut sum = 0;
    for (k, v) in &map {
        sum += k * v;
    }
    assert_eq!(sum, 52);
}

// ─── Thread Safety Tests ──────────────────────────────────────────────────────

mod send_sync_tests {
    use aa_tree::AATreeMap;
    use aa_tree::aatree_map::{Cursor, Iter, Keys, Values};

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn map_is_send_sync() {
        assert_send::<AATreeMap<i64, i64>>();
        assert_sync::<AATreeMap<i64, i64>>();
    }

    #[test]
    fn iterators_are_send_sync() {
        assert_send::<Iter<'_, i64, i64>>();
        assert_sync::<Iter<'_, i64, i64>>();
        assert_send::<Keys<'_, i64, i64>>();
        assert_sync::<Keys<'_, i64, i64>>();
        assert_send::<Values<'_, i64, i64>>();
        assert_sync::<Values<'_, i64, i64>>();
        assert_send::<Cursor<'_, i64, i64>>();
        assert_sync::<Cursor<'_, i64, i64>>();
    }
}
