//! An ordered multiset backed by a Red-Black tree.
//!
//! This crate provides [`RBTree`], a binary search tree that keeps itself balanced
//! with the classic red-black coloring scheme:
//!
//! - [`insert`](RBTree::insert) - O(log n), at most two rotations, duplicates kept
//! - [`search`](RBTree::search), [`contains`](RBTree::contains) - O(log n) lookup
//! - [`iter`](RBTree::iter) - lazy, restartable, double-ended in-order traversal
//! - [`minimum`](RBTree::minimum), [`maximum`](RBTree::maximum) and
//!   [`NodeRef::successor`]/[`NodeRef::predecessor`] navigation
//!
//! # Example
//!
//! ```
//! use redblack_tree::RBTree;
//!
//! let mut tree = RBTree::new();
//! for key in [1, 4, 5, 0, 2, 10, 3] {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [0, 1, 2, 3, 4, 5, 10]);
//!
//! for key in [20, 18, 21, 23, 7] {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [0, 1, 2, 3, 4, 5, 7, 10, 18, 20, 21, 23]);
//! assert_eq!(tree.check_invariants(), Ok(()));
//! ```
//!
//! # Ordering
//!
//! Keys are ordered by a [`Comparator`], a strict less-than predicate. Closures of
//! type `Fn(&K, &K) -> bool` work directly; [`NaturalOrder`] uses [`Ord`] and
//! [`Reverse`] flips any comparator.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc` unless `graphviz` is enabled
//! - **`graphviz`** - Renders a [`Snapshot`] of the tree to DOT and collects Graphviz
//!   drawings into an HTML report
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other by index. Index 0 is a black
//! sentinel shared by every absent child and by the parent of the root, so
//! rotations and the insertion fixup never special-case missing children.

#![no_std]
#![forbid(unsafe_code)]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;
#[cfg(feature = "graphviz")]
extern crate std;

mod comparator;
mod config;
mod error;
mod raw;

pub mod rbtree;

#[cfg(feature = "graphviz")]
pub mod graphviz;

pub use comparator::{Comparator, NaturalOrder, Reverse};
pub use config::Config;
pub use error::InvariantViolation;
pub use raw::Color;
pub use rbtree::{NodeId, NodeRef, NodeSnapshot, RBTree, Snapshot};
