//! Range-sum queries over a caller-owned array, memoized in a [`BoundedCache`]
//!
//! The array is never stored here. Reads borrow it per call, writes borrow
//! it mutably. Since any cached sum may cover a written element, every
//! write drops the whole cache.

use splaymemo::{Error, Result};
use tracing::debug;

use crate::lru::{BoundedCache, DEFAULT_CAPACITY};
use crate::stats::CacheStats;

/// Inclusive `(left, right)` bounds of a range query
pub type RangeKey = (usize, usize);

fn check_range(array: &[u32], left: usize, right: usize) -> Result<()> {
    if left > right || right >= array.len() {
        return Err(Error::InvalidRange {
            left,
            right,
            len: array.len(),
        });
    }
    Ok(())
}

fn check_index(array: &[u32], index: usize) -> Result<()> {
    if index >= array.len() {
        return Err(Error::IndexOutOfBounds {
            index,
            len: array.len(),
        });
    }
    Ok(())
}

/// Sum `array[left..=right]` directly
pub fn range_sum_uncached(array: &[u32], left: usize, right: usize) -> Result<u64> {
    check_range(array, left, right)?;
    Ok(array[left..=right].iter().map(|&v| u64::from(v)).sum())
}

/// Write `array[index] = value` directly
pub fn update_uncached(array: &mut [u32], index: usize, value: u32) -> Result<()> {
    check_index(array, index)?;
    array[index] = value;
    Ok(())
}

/// Memoized range sums with whole-cache invalidation on writes
pub struct RangeSumCache {
    cache: BoundedCache<RangeKey, u64>,
    stats: CacheStats,
}

impl Default for RangeSumCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RangeSumCache {
    /// Create a range-sum cache holding at most `capacity` sums
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: BoundedCache::new(capacity),
            stats: CacheStats::new(),
        }
    }

    /// Sum `array[left..=right]`, serving repeats from the cache
    pub fn range_sum(&mut self, array: &[u32], left: usize, right: usize) -> Result<u64> {
        check_range(array, left, right)?;

        let key = (left, right);
        if let Some(&sum) = self.cache.get(&key) {
            self.stats.record_hit();
            return Ok(sum);
        }

        self.stats.record_miss();
        let sum = range_sum_uncached(array, left, right)?;
        if let Some((evicted, _)) = self.cache.put(key, sum) {
            debug!(left = evicted.0, right = evicted.1, "evicted range sum");
            self.stats.record_eviction();
        }
        self.stats.record_insert();

        Ok(sum)
    }

    /// Write `array[index] = value` and invalidate every cached sum
    ///
    /// An out-of-bounds index leaves both the array and the cache untouched.
    pub fn update(&mut self, array: &mut [u32], index: usize, value: u32) -> Result<()> {
        update_uncached(array, index, value)?;
        self.invalidate_all();
        Ok(())
    }

    /// Drop every cached sum
    pub fn invalidate_all(&mut self) {
        debug!(entries = self.cache.len(), "invalidating range-sum cache");
        self.cache.invalidate_all();
        self.stats.record_invalidation();
    }

    /// Check whether a sum for `(left, right)` is cached
    pub fn is_cached(&self, left: usize, right: usize) -> bool {
        self.cache.contains(&(left, right))
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current number of cached sums
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if no sums are cached
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }
}
