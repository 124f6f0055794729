//! chained-collections: a separate-chaining hash table with fail-fast
//! cursors, plus a Set and a Map that store everything in it.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one table owns all storage and all growth decisions; the
//!   collection types above it only decide *what* they store.
//! - Layers:
//!   - HashTable<T, S>: array of singly-linked chains. Tail-append inserts,
//!     silent rejection of duplicates, proactive growth, and a generation
//!     counter bumped on every structural change.
//!   - Set<T, S>: stores elements directly; adds set algebra.
//!   - Map<K, V, S>: stores `Pair<K, V>` whose identity is the key; lookups
//!     go by key without building a pair.
//!
//! Constraints
//! - Single-threaded; no interior mutability, no atomics.
//! - Each chain node exclusively owns the next one. No back-references.
//! - Grows only. `clear()` returns to the initial bucket length; removals
//!   never shrink the array.
//! - Lookups never modify a chain.
//!
//! Growth policy
//! - Before each `add`, if `len / buckets >= max_load_factor` (2.5 by
//!   default) the whole table is rehashed into `floor(buckets * 1.5)`
//!   buckets at once. Nodes are relinked, not reallocated.
//!
//! Traversal
//! - `iter()` borrows the table, so the borrow checker already rules out
//!   mutation while it is alive.
//! - `cursor()` does not borrow. It snapshots the generation and re-checks
//!   it on every `has_next`/`next`, failing with
//!   `TableError::ConcurrentModification` after any structural change,
//!   including a resize that leaves the elements unchanged. It also records
//!   which table created it and fails against any other.
//! - Both visit buckets in array order, then each chain in insertion order.
//!
//! Errors
//! - `remove` of an absent element is `TableError::NotFound`.
//! - Adding a duplicate is not an error; `add` reports it by returning false.
//! - Absent lookups return `None`.
//!
//! Hashing
//! - Any `BuildHasher` may be supplied; the default is unkeyed SipHash so
//!   placement is deterministic. Lookups accept any `Q: Hash + Equivalent<T>`.

mod config;
mod cursor;
mod error;
mod hash_table;
mod hash_table_proptest;
mod map;
mod pair;
mod set;

// Public surface
pub use config::{TableConfig, DEFAULT_BUCKETS, DEFAULT_GROWTH_FACTOR, DEFAULT_MAX_LOAD_FACTOR};
pub use cursor::Cursor;
pub use error::{ConfigError, TableError};
pub use hash_table::{DefaultHashBuilder, HashTable, Iter};
pub use hashbrown::Equivalent;
pub use map::Map;
pub use pair::Pair;
pub use set::Set;
