//! Set: unordered collection of distinct elements stored directly in a HashTable.

use crate::config::TableConfig;
use crate::cursor::Cursor;
use crate::error::{ConfigError, TableError};
use crate::hash_table::{DefaultHashBuilder, HashTable, Iter};
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::Equivalent;

pub struct Set<T, S = DefaultHashBuilder> {
    table: HashTable<T, S>,
}

impl<T> Set<T>
where
    T: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            table: HashTable::new(),
        }
    }
}

impl<T, S> Default for Set<T, S>
where
    S: Default,
{
    fn default() -> Self {
        Self {
            table: HashTable::default(),
        }
    }
}

impl<T, S> Set<T, S> {
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

    pub(crate) fn from_table(table: HashTable<T, S>) -> Self {
        Self { table }
    }

    /// The backing table, e.g. to step a [`Cursor`] over this set.
    pub fn table(&self) -> &HashTable<T, S> {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Same as [`is_empty`](Self::is_empty).
    pub fn is_empty_set(&self) -> bool {
        self.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.table.iter()
    }

    pub fn cursor(&self) -> Cursor<T> {
        self.table.cursor()
    }

    fn empty_like(&self) -> Self
    where
        S: Clone,
    {
        Self::from_table(self.table.empty_like())
    }
}

impl<T, S> Set<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Returns `false`, and leaves the set untouched, if an equal element is
    /// already present.
    pub fn add(&mut self, element: T) -> bool {
        self.table.add(element)
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Result<T, TableError>
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.table.remove(q)
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.table.contains(q)
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&T>
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.table.get(q)
    }

    pub fn clear(&mut self) {
        self.table.clear()
    }

    /// True iff every element of `other` is contained in `self`.
    ///
    /// Note the orientation: the receiver is the superset candidate, so
    /// `big.is_subset(&small)` asks whether `small` sits inside `big`.
    pub fn is_subset<S2>(&self, other: &Set<T, S2>) -> bool {
        other.iter().all(|e| self.contains(e))
    }

    /// True iff no element of `other` is contained in `self`.
    pub fn is_disjoint<S2>(&self, other: &Set<T, S2>) -> bool {
        !other.iter().any(|e| self.contains(e))
    }
}

// Set algebra. Both operands are left untouched; results share `self`'s
// hasher and growth policy.
impl<T, S> Set<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    /// Every element of either set.
    pub fn union<S2>(&self, other: &Set<T, S2>) -> Self {
        let mut out = self.empty_like();
        for e in self.iter().chain(other.iter()) {
            out.add(e.clone());
        }
        out
    }

    /// Every element of `self` that is also in `other`.
    pub fn intersection<S2>(&self, other: &Set<T, S2>) -> Self
    where
        S2: BuildHasher,
    {
        let mut out = self.empty_like();
        for e in self.iter().filter(|e| other.contains(*e)) {
            out.add(e.clone());
        }
        out
    }

    /// Every element of `self` that is absent from `other`.
    pub fn difference<S2>(&self, other: &Set<T, S2>) -> Self
    where
        S2: BuildHasher,
    {
        let mut out = self.empty_like();
        for e in self.iter().filter(|e| !other.contains(*e)) {
            out.add(e.clone());
        }
        out
    }
}

impl<T, S, S2> PartialEq<Set<T, S2>> for Set<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Set<T, S2>) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<T, S> Eq for Set<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}

impl<T, S> fmt::Debug for Set<T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> Extend<T> for Set<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.table.extend(iter)
    }
}

impl<T, S> FromIterator<T> for Set<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_table(iter.into_iter().collect())
    }
}

impl<'a, T, S> IntoIterator for &'a Set<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(items: &[i32]) -> Set<i32> {
        items.iter().copied().collect()
    }

    fn sorted(s: &Set<i32>) -> Vec<i32> {
        s.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
    }

    #[test]
    fn union_collapses_duplicates() {
        let u = set(&[1, 2, 3]).union(&set(&[3, 4]));
        assert_eq!(sorted(&u), vec![1, 2, 3, 4]);
        assert_eq!(u.len(), 4);
    }

    #[test]
    fn intersection_keeps_common() {
        let i = set(&[1, 2, 3]).intersection(&set(&[2, 3, 4]));
        assert_eq!(sorted(&i), vec![2, 3]);
        assert!(set(&[1, 2]).intersection(&set(&[3])).is_empty_set());
    }

    #[test]
    fn difference_keeps_only_left() {
        let d = set(&[1, 2, 3]).difference(&set(&[2]));
        assert_eq!(sorted(&d), vec![1, 3]);
        assert_eq!(sorted(&set(&[1]).difference(&set(&[]))), vec![1]);
    }

    /// Invariant: the receiver is the superset candidate.
    #[test]
    fn subset_orientation() {
        let big = set(&[1, 2, 3]);
        let small = set(&[2, 3]);
        assert!(big.is_subset(&small));
        assert!(!small.is_subset(&big));
        assert!(big.is_subset(&set(&[])));
        assert!(big.is_subset(&big));
    }

    #[test]
    fn disjoint() {
        let a = set(&[1, 2]);
        assert!(a.is_disjoint(&set(&[3, 4])));
        assert!(!a.is_disjoint(&set(&[2, 5])));
        assert!(a.is_disjoint(&set(&[])));
    }

    /// Invariant: set algebra never mutates its operands.
    #[test]
    fn algebra_is_read_only() {
        let a = set(&[1, 2, 3]);
        let b = set(&[3, 4]);
        let (ga, gb) = (a.table().generation(), b.table().generation());
        let _ = a.union(&b);
        let _ = a.intersection(&b);
        let _ = a.difference(&b);
        let _ = a.is_subset(&b);
        let _ = a.is_disjoint(&b);
        assert_eq!(a.table().generation(), ga);
        assert_eq!(b.table().generation(), gb);
        assert_eq!(sorted(&a), vec![1, 2, 3]);
        assert_eq!(sorted(&b), vec![3, 4]);
    }

    #[test]
    fn delegation_and_borrowed_lookup() {
        let mut s: Set<String> = Set::new();
        assert!(s.is_empty_set());
        assert!(s.add("a".to_string()));
        assert!(!s.add("a".to_string()));
        assert!(s.contains("a"));
        assert_eq!(s.get("a").map(String::as_str), Some("a"));
        assert_eq!(s.remove("b"), Err(TableError::NotFound));
        assert_eq!(s.remove("a"), Ok("a".to_string()));
        assert!(!s.contains("a"));
        s.add("x".to_string());
        s.clear();
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn equality_ignores_order_and_hasher_state() {
        assert_eq!(set(&[1, 2, 3]), set(&[3, 2, 1]));
        assert_ne!(set(&[1, 2]), set(&[1, 2, 3]));
        assert_ne!(set(&[1, 4]), set(&[1, 2]));
    }

    #[test]
    fn debug_formats_as_set() {
        let s = set(&[7]);
        assert_eq!(format!("{:?}", s), "{7}");
    }
}
