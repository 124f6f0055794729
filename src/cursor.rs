//! Cursor: fail-fast traversal that does not hold a borrow of the table.
//!
//! A `Cursor` records the table's generation when it is created and the
//! position of the next element (bucket index plus depth in that chain).
//! Every `has_next`/`next` call compares the recorded generation with the
//! live table first; any structural change in between (add, remove, clear,
//! resize) makes the call fail with `TableError::ConcurrentModification`,
//! even when the set of stored elements is unchanged. A cursor is also bound
//! to the table that created it: stepping it against any other table fails the
//! same way, whatever that table's generation.
//!
//! Only the depth is stored, so each step walks the current chain from its
//! head. A full traversal costs O(L^2) for a chain of length L; under the
//! default load factor chains stay short, but a very large
//! `max_load_factor` makes cursors quadratic where `iter` stays linear.

use crate::error::TableError;
use crate::hash_table::{HashTable, Link, Node};
use core::fmt;
use core::iter::successors;
use core::marker::PhantomData;

pub struct Cursor<T> {
    table_id: u64,
    generation: u64,
    // `bucket == buckets.len()` once exhausted.
    bucket: usize,
    depth: usize,
    _pd: PhantomData<fn() -> T>,
}

fn first_occupied<T>(buckets: &[Link<T>], from: usize) -> usize {
    buckets
        .iter()
        .skip(from)
        .position(Option::is_some)
        .map_or(buckets.len(), |i| from + i)
}

fn nth_node<T>(head: &Link<T>, depth: usize) -> Option<&Node<T>> {
    successors(head.as_deref(), |node| node.next.as_deref()).nth(depth)
}

impl<T> Cursor<T> {
    pub(crate) fn new<S>(table: &HashTable<T, S>) -> Self {
        Self {
            table_id: table.id(),
            generation: table.generation(),
            bucket: first_occupied(table.buckets(), 0),
            depth: 0,
            _pd: PhantomData,
        }
    }

    /// Generation of the table this cursor was created from.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn check<S>(&self, table: &HashTable<T, S>) -> Result<(), TableError> {
        let found = table.generation();
        if table.id() == self.table_id && found == self.generation {
            Ok(())
        } else {
            Err(TableError::ConcurrentModification {
                expected: self.generation,
                found,
            })
        }
    }

    pub fn has_next<S>(&self, table: &HashTable<T, S>) -> Result<bool, TableError> {
        self.check(table)?;
        Ok(self.bucket < table.buckets().len())
    }

    /// Step to the next element; `Ok(None)` once the traversal is done.
    pub fn next<'a, S>(&mut self, table: &'a HashTable<T, S>) -> Result<Option<&'a T>, TableError> {
        self.check(table)?;
        let buckets = table.buckets();
        let Some(node) = buckets
            .get(self.bucket)
            .and_then(|head| nth_node(head, self.depth))
        else {
            return Ok(None);
        };
        if node.next.is_some() {
            self.depth += 1;
        } else {
            self.bucket = first_occupied(buckets, self.bucket + 1);
            self.depth = 0;
        }
        Ok(Some(&node.value))
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("table_id", &self.table_id)
            .field("generation", &self.generation)
            .field("bucket", &self.bucket)
            .field("depth", &self.depth)
            .finish()
    }
}
