//! Key-value pair whose identity is its key.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};

/// A key with a value carried along.
///
/// `PartialEq`, `Eq` and `Hash` look at the key only: two pairs with equal
/// keys are the same table element whatever their values. `Map` relies on
/// this to find, replace and remove pairs by key.
#[derive(Clone)]
pub struct Pair<K, V> {
    key: K,
    pub(crate) value: V,
}

impl<K, V> Pair<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: PartialEq, V> PartialEq for Pair<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for Pair<K, V> {}

impl<K: Hash, V> Hash for Pair<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

// Sound because `Eq` and `Hash` agree with the key's.
impl<K, V> Borrow<K> for Pair<K, V> {
    fn borrow(&self) -> &K {
        &self.key
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Pair<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {:?}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_table::HashTable;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{BuildHasher, BuildHasherDefault};

    /// Invariant: equality and hash ignore the value.
    #[test]
    fn identity_is_key_only() {
        let a = Pair::new("k", 1);
        let b = Pair::new("k", 2);
        let c = Pair::new("j", 1);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let s = BuildHasherDefault::<DefaultHasher>::default();
        assert_eq!(s.hash_one(&a), s.hash_one(&b));
        assert_eq!(s.hash_one(&a), s.hash_one("k"));
    }

    #[test]
    fn accessors() {
        let mut p = Pair::new(String::from("k"), 1);
        *p.value_mut() += 1;
        assert_eq!(p.key(), "k");
        assert_eq!(*p.value(), 2);
        assert_eq!(format!("{:?}", p), "\"k\": 2");
        assert_eq!(p.into_parts(), (String::from("k"), 2));
    }

    /// Invariant: a table of pairs is searchable by a bare key.
    #[test]
    fn table_of_pairs_found_by_key() {
        let mut t: HashTable<Pair<String, i32>> = HashTable::new();
        t.add(Pair::new("a".to_string(), 1));
        t.add(Pair::new("b".to_string(), 2));

        let key = "b".to_string();
        assert_eq!(t.get(&key).map(Pair::value), Some(&2));
        assert!(t.contains(&"a".to_string()));
        assert!(!t.contains(&"z".to_string()));
        assert_eq!(t.remove(&key).map(Pair::into_value), Ok(2));
        assert_eq!(t.len(), 1);
    }
}
