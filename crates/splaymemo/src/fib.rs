//! Top-down memoized Fibonacci over a pluggable memo table
//!
//! The recurrence runs on an explicit work stack instead of the call stack,
//! so arguments in the thousands do not exhaust a thread's stack before the
//! first memo hit. Lookups and inserts happen in the same order as the plain
//! recursive definition: `fib(n - 1)` is fully resolved before `fib(n - 2)`
//! is looked up, and every computed value, base cases included, is stored.

use crate::error::{Error, Result};
use crate::splay::SplayTree;

/// Largest argument whose Fibonacci value fits in a `u128`
pub const MAX_FIB_ARG: u64 = 186;

/// Memo table consulted by [`fibonacci_memoized`]
pub trait Memo {
    /// Return the cached value for `n`, if any
    fn lookup(&mut self, n: u64) -> Option<u128>;

    /// Record the value computed for `n`
    fn store(&mut self, n: u64, value: u128);
}

impl Memo for SplayTree<u64, u128> {
    fn lookup(&mut self, n: u64) -> Option<u128> {
        self.find(&n).copied()
    }

    fn store(&mut self, n: u64, value: u128) {
        self.insert(n, value);
    }
}

enum Frame {
    /// Look `n` up, or schedule its subproblems
    Enter(u64),
    /// Both subresults are on the value stack
    Combine(u64),
}

/// Compute `fib(n)`, filling and reusing `memo` along the way
///
/// Arguments past `MAX_FIB_ARG + 1` are computed only up to that point,
/// which fills the memo and fails with `Overflow { n: MAX_FIB_ARG + 1 }`,
/// so the work stack stays bounded for any `u64`.
pub fn fibonacci_memoized<M: Memo + ?Sized>(n: u64, memo: &mut M) -> Result<u128> {
    let mut frames = vec![Frame::Enter(n.min(MAX_FIB_ARG + 1))];
    let mut values: Vec<u128> = Vec::new();

    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Enter(k) => {
                if let Some(cached) = memo.lookup(k) {
                    values.push(cached);
                } else if k < 2 {
                    memo.store(k, u128::from(k));
                    values.push(u128::from(k));
                } else {
                    frames.push(Frame::Combine(k));
                    frames.push(Frame::Enter(k - 2));
                    frames.push(Frame::Enter(k - 1));
                }
            }
            Frame::Combine(k) => {
                let second = values.pop();
                let first = values.pop();
                let (Some(first), Some(second)) = (first, second) else {
                    unreachable!("combine frame for {} without two operands", k);
                };
                let sum = first.checked_add(second).ok_or(Error::Overflow { n: k })?;
                memo.store(k, sum);
                values.push(sum);
            }
        }
    }

    match values.as_slice() {
        [result] => Ok(*result),
        _ => unreachable!("work stack finished with {} values", values.len()),
    }
}

/// Compute `fib(n)` using `tree` as the memo table
///
/// The caller owns the tree; pass a fresh one to measure a cold run, or reuse
/// one to serve later calls from the splayed cache.
pub fn fibonacci_via_splay(n: u64, tree: &mut SplayTree<u64, u128>) -> Result<u128> {
    fibonacci_memoized(n, tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Memo that records every call, for checking the access order
    #[derive(Default)]
    struct Recorder {
        inner: SplayTree<u64, u128>,
        log: Vec<String>,
    }

    impl Memo for Recorder {
        fn lookup(&mut self, n: u64) -> Option<u128> {
            let hit = self.inner.lookup(n);
            let outcome = if hit.is_some() { "hit" } else { "miss" };
            self.log.push(format!("find {} {}", n, outcome));
            hit
        }

        fn store(&mut self, n: u64, value: u128) {
            self.log.push(format!("insert {}", n));
            self.inner.store(n, value);
        }
    }

    #[test]
    fn test_known_values() {
        for (n, expected) in [(0, 0), (1, 1), (2, 1), (10, 55), (30, 832040)] {
            let mut tree = SplayTree::new();
            assert_eq!(fibonacci_via_splay(n, &mut tree).unwrap(), expected);
        }
    }

    #[test]
    fn test_tree_holds_every_argument() {
        let mut tree = SplayTree::new();
        fibonacci_via_splay(20, &mut tree).unwrap();

        let keys: Vec<u64> = tree.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, (0..=20).collect::<Vec<_>>());
        assert!(tree.is_consistent());
    }

    #[test]
    fn test_reused_tree_serves_from_root() {
        let mut tree = SplayTree::new();
        fibonacci_via_splay(50, &mut tree).unwrap();
        let size = tree.len();

        assert_eq!(fibonacci_via_splay(50, &mut tree).unwrap(), 12_586_269_025);
        assert_eq!(tree.len(), size);
        assert_eq!(tree.root_key(), Some(&50));
    }

    #[test]
    fn test_access_order_matches_recursion() {
        let mut memo = Recorder::default();
        fibonacci_memoized(3, &mut memo).unwrap();

        assert_eq!(
            memo.log,
            vec![
                "find 3 miss",
                "find 2 miss",
                "find 1 miss",
                "insert 1",
                "find 0 miss",
                "insert 0",
                "insert 2",
                "find 1 hit",
                "insert 3",
            ]
        );
    }

    #[test]
    fn test_largest_representable() {
        let mut tree = SplayTree::new();
        let value = fibonacci_via_splay(MAX_FIB_ARG, &mut tree).unwrap();
        assert_eq!(value, 332_825_110_087_067_562_321_196_029_789_634_457_848);
    }

    #[test]
    fn test_overflow() {
        let mut tree = SplayTree::new();
        let err = fibonacci_via_splay(MAX_FIB_ARG + 1, &mut tree).unwrap_err();
        assert_eq!(err, Error::Overflow { n: MAX_FIB_ARG + 1 });
    }

    #[test]
    fn test_deep_argument_does_not_recurse() {
        let mut tree = SplayTree::new();
        let err = fibonacci_via_splay(100_000, &mut tree).unwrap_err();

        // Every argument up to the overflow point got memoized on the way down
        assert_eq!(err, Error::Overflow { n: MAX_FIB_ARG + 1 });
        assert_eq!(tree.len(), (MAX_FIB_ARG + 1) as usize);
    }

    #[test]
    fn test_huge_argument_fails_fast() {
        let mut tree = SplayTree::new();
        let err = fibonacci_via_splay(u64::MAX, &mut tree).unwrap_err();

        assert_eq!(err, Error::Overflow { n: MAX_FIB_ARG + 1 });
        assert_eq!(tree.len(), (MAX_FIB_ARG + 1) as usize);
        assert!(tree.is_consistent());

        // The filled memo still serves in-range arguments
        assert_eq!(fibonacci_via_splay(30, &mut tree).unwrap(), 832040);
        assert_eq!(tree.len(), (MAX_FIB_ARG + 1) as usize);
    }
}
