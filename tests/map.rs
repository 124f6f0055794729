// Map unit test suite.
//
// The core invariants exercised:
// - Key identity: pairs are equal iff their keys are; re-adding a key
//   replaces the value and keeps len unchanged.
// - Absence: get/key_exists report absence; remove of an absent key is
//   NotFound and propagates to the caller.
// - Views: keyset()/values() never exceed len(); values() collapses equal
//   values held under distinct keys.
// - Traversal: iteration yields pairs; cursors fail fast after mutation.
use chained_collections::{Map, Pair, TableError};
use std::collections::BTreeMap;

// Test: replacement by key.
// Verifies: add(K, V1); add(K, V2) => len 1, get(K) == V2.
#[test]
fn second_add_replaces() {
    let mut m = Map::new();
    m.add("K", "V1");
    assert_eq!(m.add("K", "V2"), Some("V1"));
    assert_eq!(m.len(), 1);
    assert_eq!(m.get(&"K"), Some(&"V2"));
}

// Test: remove propagates NotFound.
#[test]
fn remove_absent_key_errors() {
    let mut m: Map<String, u32> = Map::new();
    m.add("a".to_string(), 1);
    match m.remove("b") {
        Err(TableError::NotFound) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(m.remove("a"), Ok(1));
    assert_eq!(m.get("a"), None);
}

// Test: views never exceed len and collapse duplicate values.
#[test]
fn views_sizes() {
    let mut m: Map<u32, &'static str> = Map::new();
    m.add(1, "same");
    m.add(2, "same");
    m.add(3, "other");
    assert_eq!(m.len(), 3);
    assert_eq!(m.keyset().len(), 3);
    assert_eq!(m.values().len(), 2);
    assert!(m.values().len() <= m.len());

    let mut distinct: Map<u32, u32> = Map::new();
    for i in 0..10 {
        distinct.add(i, i + 100);
    }
    assert_eq!(distinct.values().len(), distinct.len());
}

// Test: views are independent of the map afterwards.
#[test]
fn views_are_fresh_sets() {
    let mut m: Map<u32, u32> = Map::new();
    m.add(1, 10);
    let mut keys = m.keyset();
    keys.add(99);
    assert!(!m.key_exists(&99));
    m.add(2, 20);
    assert_eq!(keys.len(), 2);
    assert!(!keys.contains(&2));
}

// Test: value_exists is a scan over stored values.
#[test]
fn value_exists_follows_replacement() {
    let mut m = Map::new();
    m.add("k", 1);
    assert!(m.value_exists(&1));
    m.add("k", 2);
    assert!(!m.value_exists(&1));
    assert!(m.value_exists(&2));
}

// Test: many keys across several resizes.
// Verifies: every key maps to its latest value after growth.
#[test]
fn many_keys_survive_growth() {
    let mut m: Map<String, usize> = Map::new();
    let mut model = BTreeMap::new();
    for i in 0..500 {
        let k = format!("k{}", i % 300);
        m.add(k.clone(), i);
        model.insert(k, i);
    }
    assert_eq!(m.len(), model.len());
    assert!(m.table().bucket_count() > 10);
    for (k, v) in &model {
        assert_eq!(m.get(k.as_str()), Some(v));
    }
}

// Test: iteration over pairs.
#[test]
fn iterate_pairs() {
    let m: Map<u32, u32> = [(1, 2), (3, 4), (1, 5)].into_iter().collect();
    let mut seen: Vec<(u32, u32)> = m.iter().map(|p| (*p.key(), *p.value())).collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![(1, 5), (3, 4)]);

    let pairs: Vec<&Pair<u32, u32>> = (&m).into_iter().collect();
    assert_eq!(pairs.len(), 2);
}

// Test: fail-fast cursor over a map.
// Verifies: a value replacement (remove + add) invalidates the cursor, while
// get_mut does not.
#[test]
fn cursor_over_map() {
    let mut m: Map<u32, u32> = Map::new();
    m.add(1, 1);
    m.add(2, 2);

    let mut c = m.cursor();
    if let Some(v) = m.get_mut(&1) {
        *v = 11;
    }
    let first = c.next(m.table()).unwrap().map(|p| *p.key());
    assert!(first.is_some());

    m.add(2, 22);
    assert!(matches!(
        c.next(m.table()),
        Err(TableError::ConcurrentModification { .. })
    ));
    assert_eq!(m.get(&1), Some(&11));
}

#[test]
fn clear_empties() {
    let mut m = Map::new();
    m.extend([(1, 'a'), (2, 'b')]);
    m.clear();
    assert!(m.is_empty());
    assert_eq!(m.get(&1), None);
    assert_eq!(m.keyset().len(), 0);
}
