//! Map: key-value pairs stored in a HashTable, found by key.
//!
//! Each entry is a [`Pair`], whose identity is its key. Lookups do not build
//! a throwaway pair; they go through `KeyQuery`, which hashes like the key and
//! compares against a stored pair's key.

use crate::config::TableConfig;
use crate::cursor::Cursor;
use crate::error::{ConfigError, TableError};
use crate::hash_table::{DefaultHashBuilder, HashTable, Iter};
use crate::pair::Pair;
use crate::set::Set;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash, Hasher};
use hashbrown::Equivalent;

struct KeyQuery<'q, Q: ?Sized>(&'q Q);

impl<Q: ?Sized + Hash> Hash for KeyQuery<'_, Q> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<Q, K, V> Equivalent<Pair<K, V>> for KeyQuery<'_, Q>
where
    Q: ?Sized + Eq,
    K: Borrow<Q>,
{
    fn equivalent(&self, pair: &Pair<K, V>) -> bool {
        self.0 == pair.key().borrow()
    }
}

pub struct Map<K, V, S = DefaultHashBuilder> {
    table: HashTable<Pair<K, V>, S>,
}

impl<K, V> Map<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            table: HashTable::new(),
        }
    }
}

impl<K, V, S> Default for Map<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self {
            table: HashTable::default(),
        }
    }
}

impl<K, V, S> Map<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            table: HashTable::with_hasher(hasher),
        }
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self, ConfigError> {
        Ok(Self {
            table: HashTable::with_config_and_hasher(config, hasher)?,
        })
    }

    /// The backing table of pairs, e.g. to step a [`Cursor`] over this map.
    pub fn table(&self) -> &HashTable<Pair<K, V>, S> {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Pair<K, V>> {
        self.table.iter()
    }

    pub fn cursor(&self) -> Cursor<Pair<K, V>> {
        self.table.cursor()
    }

    /// True if some pair stores `value`. Values are not indexed: O(n).
    pub fn value_exists(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|pair| pair.value() == value)
    }
}

impl<K, V, S> Map<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Associate `value` with `key`, returning the value it replaced.
    ///
    /// An existing pair for `key` is removed before the new pair is added,
    /// so a replacement is two structural changes.
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        let previous = match self.table.remove(&KeyQuery(&key)) {
            Ok(pair) => Some(pair.into_value()),
            // Table removal fails only with NotFound.
            Err(_) => None,
        };
        self.table.add(Pair::new(key, value));
        previous
    }

    /// Remove `key`, returning its value; `NotFound` if it is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.remove(&KeyQuery(key)).map(Pair::into_value)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get(&KeyQuery(key)).map(Pair::value)
    }

    /// In-place value update; not a structural change.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get_mut(&KeyQuery(key)).map(Pair::value_mut)
    }

    pub fn key_exists<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.contains(&KeyQuery(key))
    }

    pub fn clear(&mut self) {
        self.table.clear()
    }
}

// Views. Both return fresh sets sharing this map's hasher and growth policy.
impl<K, V, S> Map<K, V, S>
where
    S: BuildHasher + Clone,
{
    /// Every distinct key.
    pub fn keyset(&self) -> Set<K, S>
    where
        K: Eq + Hash + Clone,
    {
        let mut keys = Set::from_table(self.table.empty_like());
        for pair in self.iter() {
            keys.add(pair.key().clone());
        }
        keys
    }

    /// Every distinct value. Equal values stored under different keys
    /// collapse into one element.
    pub fn values(&self) -> Set<V, S>
    where
        V: Eq + Hash + Clone,
    {
        let mut values = Set::from_table(self.table.empty_like());
        for pair in self.iter() {
            values.add(pair.value().clone());
        }
        values
    }
}

impl<K, V, S> fmt::Debug for Map<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|pair| (pair.key(), pair.value())))
            .finish()
    }
}

impl<K, V, S> Extend<(K, V)> for Map<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.add(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for Map<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a Map<K, V, S> {
    type Item = &'a Pair<K, V>;
    type IntoIter = Iter<'a, Pair<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
