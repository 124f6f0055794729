#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can reach the
// test hashers and crate-private accessors.

use crate::cursor::Cursor;
use crate::error::TableError;
use crate::hash_table::test_hashers::ConstBuildHasher;
use crate::hash_table::HashTable;
use core::hash::BuildHasher;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Add(usize),
    Remove(usize),
    Get(usize),
    Contains(String),
    Clear,
    StartCursor,
    StepCursor,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => idx.clone().prop_map(OpI::Add),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => "[a-z]{0,4}".prop_map(OpI::Contains),
            1 => Just(OpI::Clear),
            1 => Just(OpI::StartCursor),
            3 => Just(OpI::StepCursor),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Live cursor plus what the model expects of it.
struct Tracked {
    cursor: Cursor<Key>,
    valid: bool,
    seen: BTreeSet<Key>,
}

fn run<S: BuildHasher>(
    mut sut: HashTable<Key, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashSet<Key> = HashSet::new();
    let mut tracked: Option<Tracked> = None;
    let mut max_buckets = sut.bucket_count();

    for op in ops {
        let before = sut.generation();
        match op {
            OpI::Add(i) => {
                let k = Key(pool[i].clone());
                let inserted = sut.add(k.clone());
                prop_assert_eq!(inserted, model.insert(k));
            }
            OpI::Remove(i) => {
                let k = Key(pool[i].clone());
                match sut.remove(&k) {
                    Ok(removed) => {
                        prop_assert_eq!(&removed, &k);
                        prop_assert!(model.remove(&k));
                    }
                    Err(TableError::NotFound) => prop_assert!(!model.contains(&k)),
                    Err(e) => prop_assert!(false, "unexpected error {:?}", e),
                }
                prop_assert!(!sut.contains(&k));
            }
            OpI::Get(i) => {
                let k = Key(pool[i].clone());
                prop_assert_eq!(sut.get(&k), model.get(&k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains(s.as_str()), model.contains(s.as_str()));
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.bucket_count(), sut.config().initial_buckets);
                max_buckets = sut.bucket_count();
            }
            OpI::StartCursor => {
                tracked = Some(Tracked {
                    cursor: sut.cursor(),
                    valid: true,
                    seen: BTreeSet::new(),
                });
            }
            OpI::StepCursor => {
                if let Some(t) = tracked.as_mut() {
                    let step = t.cursor.next(&sut);
                    if t.valid {
                        match step {
                            Ok(Some(k)) => {
                                prop_assert!(model.contains(k));
                                prop_assert!(t.seen.insert(k.clone()), "cursor repeated {:?}", k);
                            }
                            Ok(None) => {
                                let all: BTreeSet<Key> = model.iter().cloned().collect();
                                prop_assert_eq!(&t.seen, &all);
                            }
                            Err(e) => prop_assert!(false, "valid cursor failed: {:?}", e),
                        }
                    } else {
                        let stale = matches!(step, Err(TableError::ConcurrentModification { .. }));
                        prop_assert!(stale, "stale cursor must fail fast");
                    }
                }
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<_> = sut.iter().cloned().collect();
                let m_keys: BTreeSet<_> = model.iter().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
                prop_assert_eq!(sut.iter().len(), model.len());
            }
        }

        // Any structural change invalidates the outstanding cursor.
        if sut.generation() != before {
            if let Some(t) = tracked.as_mut() {
                t.valid = false;
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.bucket_count() >= max_buckets, "table never shrinks outside clear");
        max_buckets = sut.bucket_count();
        prop_assert!(sut.len() as f64 <= sut.config().max_load_factor * sut.bucket_count() as f64 + 1.0);
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashSet.
// Invariants exercised across random operation sequences:
// - Duplicate adds return false and change nothing; fresh adds return true.
// - `remove` returns the stored element or `NotFound` exactly when the model lacks it.
// - `get`/`contains` parity with the model, including borrowed `&str` lookups.
// - `iter` yields each element exactly once.
// - A cursor yields each element once while valid and fails fast after any
//   structural change, including growth.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(HashTable::new(), &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run(HashTable::with_hasher(ConstBuildHasher), &pool, ops)?;
    }
}
