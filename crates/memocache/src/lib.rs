//! # memocache
//!
//! Fixed-capacity LRU memoization, the bounded counterpart to `splaymemo`.
//!
//! ## Architecture
//! - **HashMap**: AHash for fast key lookups (O(1))
//! - **LRU List**: index-linked recency list for eviction (O(1))
//! - **Range sums**: cached `(left, right)` sums, dropped wholesale on any write
//! - **Fibonacci**: the shared memoized recurrence with the LRU as memo table

#![warn(missing_docs)]

mod fib;
mod lru;
mod range;
mod stats;

pub use fib::fibonacci_lru;
pub use lru::{BoundedCache, DEFAULT_CAPACITY};
pub use range::{range_sum_uncached, update_uncached, RangeKey, RangeSumCache};
pub use stats::{CacheStats, StatsSnapshot};
pub use splaymemo::{Error, Result};
