//! # splaymemo
//!
//! Splay tree used as an unbounded, self-adjusting memoization cache.
//!
//! ## Design
//! - **Arena**: nodes in one `Vec`, linked by index (parent, left, right)
//! - **Splay**: bottom-up zig / zig-zig / zig-zag on every successful `find`
//! - **Inserts**: plain BST leaf insertion, duplicates kept on the right
//! - **Memoization**: Fibonacci on an explicit work stack, memo table pluggable
//!   through [`Memo`]
//!
//! Nothing is ever removed from the tree. Single-owner use goes through
//! `&mut SplayTree`; [`SharedSplayTree`] adds one exclusive lock for callers
//! that need to share a tree between threads.

#![warn(missing_docs)]

mod error;
mod fib;
mod shared;
mod splay;

pub use error::{Error, Result};
pub use fib::{fibonacci_memoized, fibonacci_via_splay, Memo, MAX_FIB_ARG};
pub use shared::SharedSplayTree;
pub use splay::{Iter, SplayTree};
