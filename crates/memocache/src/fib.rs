//! Fibonacci memoized in a bounded LRU cache

use splaymemo::{fibonacci_memoized, Memo, Result};

use crate::lru::BoundedCache;

impl Memo for BoundedCache<u64, u128> {
    fn lookup(&mut self, n: u64) -> Option<u128> {
        self.get(&n).copied()
    }

    fn store(&mut self, n: u64, value: u128) {
        self.put(n, value);
    }
}

/// Compute `fib(n)` using `cache` as the memo table
///
/// Any capacity gives the right answer. A cache smaller than `n + 1` entries
/// evicts subresults and pays for it in recomputation.
pub fn fibonacci_lru(n: u64, cache: &mut BoundedCache<u64, u128>) -> Result<u128> {
    fibonacci_memoized(n, cache)
}
