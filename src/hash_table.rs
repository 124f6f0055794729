//! HashTable: separate chaining with proactive growth and a generation counter.

use crate::config::TableConfig;
use crate::cursor::Cursor;
use crate::error::{ConfigError, TableError};
use core::fmt;
use core::hash::{BuildHasher, BuildHasherDefault, Hash};
use core::iter::{successors, FusedIterator};
use core::mem;
use core::sync::atomic::{AtomicU64, Ordering};
use hashbrown::Equivalent;
use std::collections::hash_map::DefaultHasher;
use tracing::{debug, trace};

/// Unkeyed SipHash: the same element always lands in the same bucket.
pub type DefaultHashBuilder = BuildHasherDefault<DefaultHasher>;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// One element of a chain; exclusively owns the rest of its chain.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) next: Link<T>,
}

pub struct HashTable<T, S = DefaultHashBuilder> {
    hasher: S,
    buckets: Vec<Link<T>>,
    len: usize,
    // Bumped on every structural change; cursors compare against it.
    generation: u64,
    // Process-unique; binds cursors to the table that created them.
    id: u64,
    config: TableConfig,
}

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(0);

fn empty_buckets<T>(n: usize) -> Vec<Link<T>> {
    core::iter::repeat_with(|| None).take(n).collect()
}

// Unlink node by node so that long chains never drop recursively.
fn drop_chains<T>(buckets: Vec<Link<T>>) {
    for mut head in buckets {
        while let Some(mut node) = head {
            head = node.next.take();
        }
    }
}

fn chain<T>(head: &Link<T>) -> impl Iterator<Item = &T> {
    successors(head.as_deref(), |node| node.next.as_deref()).map(|node| &node.value)
}

impl<T> HashTable<T>
where
    T: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<T, S> Default for HashTable<T, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T, S> HashTable<T, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_parts(TableConfig::default(), hasher)
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, hasher))
    }

    fn from_parts(config: TableConfig, hasher: S) -> Self {
        Self {
            hasher,
            buckets: empty_buckets(config.initial_buckets),
            len: 0,
            generation: 0,
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
            config,
        }
    }

    /// An empty table sharing this table's hasher and growth policy.
    pub(crate) fn empty_like<U>(&self) -> HashTable<U, S>
    where
        S: Clone,
    {
        HashTable::from_parts(self.config, self.hasher.clone())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current length of the bucket array.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Structural modification counter. Only ever grows (wrapping).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub(crate) fn buckets(&self) -> &[Link<T>] {
        &self.buckets
    }

    /// Borrowing iterator: buckets in array order, then chain order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
            remaining: self.len,
        }
    }

    /// Detached, fail-fast traversal. See [`Cursor`].
    pub fn cursor(&self) -> Cursor<T> {
        Cursor::new(self)
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn needs_growth(&self) -> bool {
        self.load_factor() >= self.config.max_load_factor
    }

    fn append(mut slot: &mut Link<T>, node: Box<Node<T>>) {
        while let Some(existing) = slot {
            slot = &mut existing.next;
        }
        *slot = Some(node);
    }
}

impl<T, S> HashTable<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn bucket_index<Q>(&self, q: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(q) % self.buckets.len() as u64) as usize
    }

    /// Insert `element` at the tail of its chain.
    ///
    /// Adding an element equal to one already stored is a silent no-op and
    /// returns `false`. The load factor is checked before the lookup, so a
    /// full table grows even when the element turns out to be a duplicate.
    pub fn add(&mut self, element: T) -> bool {
        if self.needs_growth() {
            self.resize();
        }
        let index = self.bucket_index(&element);
        let mut slot = &mut self.buckets[index];
        while let Some(node) = slot {
            if node.value == element {
                trace!(bucket = index, "duplicate insert ignored");
                return false;
            }
            slot = &mut node.next;
        }
        *slot = Some(Box::new(Node {
            value: element,
            next: None,
        }));
        self.len += 1;
        self.bump();
        true
    }

    // All-at-once rehash into a larger array. Nodes are relinked rather than
    // reallocated; chain order is preserved because every node is appended.
    fn resize(&mut self) {
        let new_len = self.config.grown_len(self.buckets.len());
        let old = mem::replace(&mut self.buckets, empty_buckets(new_len));
        debug!(
            old_buckets = old.len(),
            new_buckets = new_len,
            len = self.len,
            "growing chained table"
        );
        for mut head in old {
            while let Some(mut node) = head {
                head = node.next.take();
                let index = self.bucket_index(&node.value);
                Self::append(&mut self.buckets[index], node);
            }
        }
        self.bump();
    }

    /// Unlink and return the stored element equal to `q`.
    pub fn remove<Q>(&mut self, q: &Q) -> Result<T, TableError>
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        let index = self.bucket_index(q);
        let mut slot = &mut self.buckets[index];
        while matches!(slot, Some(node) if !q.equivalent(&node.value)) {
            if let Some(node) = slot {
                slot = &mut node.next;
            }
        }
        let Some(mut node) = slot.take() else {
            trace!(bucket = index, "remove of absent element");
            return Err(TableError::NotFound);
        };
        *slot = node.next.take();
        self.len -= 1;
        self.bump();
        Ok(node.value)
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.get(q).is_some()
    }

    /// The stored element equal to `q`, if any. Never modifies the chain.
    pub fn get<Q>(&self, q: &Q) -> Option<&T>
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        let index = self.bucket_index(q);
        chain(&self.buckets[index]).find(|stored| q.equivalent(*stored))
    }

    /// Mutable access for fields that do not take part in `Hash`/`Eq`.
    pub(crate) fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut T>
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        let index = self.bucket_index(q);
        let mut link = self.buckets[index].as_deref_mut();
        while let Some(node) = link {
            if q.equivalent(&node.value) {
                return Some(&mut node.value);
            }
            link = node.next.as_deref_mut();
        }
        None
    }

    /// Drop every element and return to the initial bucket length.
    pub fn clear(&mut self) {
        let old = mem::replace(
            &mut self.buckets,
            empty_buckets(self.config.initial_buckets),
        );
        debug!(len = self.len, buckets = old.len(), "clearing chained table");
        drop_chains(old);
        self.len = 0;
        self.bump();
    }
}

impl<T, S> Drop for HashTable<T, S> {
    fn drop(&mut self) {
        drop_chains(mem::take(&mut self.buckets));
    }
}

impl<T, S> fmt::Debug for HashTable<T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chains: Vec<Vec<&T>> = self
            .buckets
            .iter()
            .map(|h| chain(h).collect::<Vec<_>>())
            .collect();
        f.debug_struct("HashTable")
            .field("buckets", &chains)
            .field("len", &self.len)
            .field("generation", &self.generation)
            .finish()
    }
}

impl<T, S> Extend<T> for HashTable<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T, S> FromIterator<T> for HashTable<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

/// Iterator over the elements of a [`HashTable`].
pub struct Iter<'a, T> {
    buckets: core::slice::Iter<'a, Link<T>>,
    current: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.current {
                self.current = node.next.as_deref();
                self.remaining -= 1;
                return Some(&node.value);
            }
            self.current = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T, S> IntoIterator for &'a HashTable<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
