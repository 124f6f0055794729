//! Growth policy knobs for [`HashTable`](crate::HashTable).

use crate::error::ConfigError;

/// Bucket length of a freshly created (or cleared) table.
pub const DEFAULT_BUCKETS: usize = 10;
/// A table resizes before an insert once `len / buckets >= MAX_LOAD_FACTOR`.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 2.5;
/// Each resize scales the bucket length by this factor (rounded down).
pub const DEFAULT_GROWTH_FACTOR: f64 = 1.5;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TableConfig {
    pub initial_buckets: usize,
    pub max_load_factor: f64,
    pub growth_factor: f64,
}

impl TableConfig {
    pub const fn new() -> Self {
        Self {
            initial_buckets: DEFAULT_BUCKETS,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }

    pub fn with_initial_buckets(mut self, buckets: usize) -> Self {
        self.initial_buckets = buckets;
        self
    }

    pub fn with_max_load_factor(mut self, lf: f64) -> Self {
        self.max_load_factor = lf;
        self
    }

    pub fn with_growth_factor(mut self, factor: f64) -> Self {
        self.growth_factor = factor;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_buckets == 0 {
            return Err(ConfigError::ZeroBuckets);
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(ConfigError::LoadFactor(self.max_load_factor));
        }
        if !self.growth_factor.is_finite() || self.growth_factor <= 1.0 {
            return Err(ConfigError::GrowthFactor(self.growth_factor));
        }
        Ok(())
    }

    /// Bucket length after one resize from `len`. Always strictly larger.
    pub(crate) fn grown_len(&self, len: usize) -> usize {
        let scaled = (len as f64 * self.growth_factor) as usize;
        scaled.max(len + 1)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}
