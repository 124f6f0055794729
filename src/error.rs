//! Error types shared by the table, set and map layers.

use thiserror::Error;

/// Failure of a table operation.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum TableError {
    /// `remove` was asked for an element (or key) that is not stored.
    #[error("element not found")]
    NotFound,
    /// The table was structurally modified after a cursor was created.
    ///
    /// This guards against programmer error; callers are expected to let it
    /// propagate rather than retry.
    #[error("table modified during traversal (cursor generation {expected}, table generation {found})")]
    ConcurrentModification { expected: u64, found: u64 },
}

/// Rejected [`TableConfig`](crate::TableConfig) values.
#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    #[error("initial bucket count must be at least 1")]
    ZeroBuckets,
    #[error("max load factor must be finite and positive, got {0}")]
    LoadFactor(f64),
    #[error("growth factor must be finite and greater than 1, got {0}")]
    GrowthFactor(f64),
}
