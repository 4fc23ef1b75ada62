//! A red-black tree ordered map for Rust.
//!
//! This crate provides [`RBTreeMap`], an ordered map keeping unique keys sorted under a
//! comparator, together with checked [`Position`]s into it:
//!
//! - [`insert`](RBTreeMap::insert), [`find`](RBTreeMap::find) and [`erase`](RBTreeMap::erase)
//!   in O(log n)
//! - [`at`](RBTreeMap::at) - bounds-checked lookup returning [`Error::NotFound`]
//! - [`begin`](RBTreeMap::begin)/[`end`](RBTreeMap::end) with
//!   [`next_position`](RBTreeMap::next_position)/[`prev_position`](RBTreeMap::prev_position)
//!   for bidirectional in-order traversal
//!
//! # Example
//!
//! ```
//! use rb_tree_map::{Error, RBTreeMap};
//!
//! let mut scores = RBTreeMap::new();
//! scores.insert("Carol", 92);
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//!
//! assert_eq!(scores.at(&"Bob"), Ok(&85));
//! assert_eq!(scores.at(&"Dave"), Err(Error::NotFound));
//!
//! // In-order walk with positions.
//! let mut names = Vec::new();
//! let mut position = scores.begin();
//! while position != scores.end() {
//!     names.push(*scores.get_at(position)?.0);
//!     position = scores.next_position(position)?;
//! }
//! assert_eq!(names, ["Alice", "Bob", "Carol"]);
//!
//! // A position from another map is refused rather than followed.
//! let copy = scores.clone();
//! assert_eq!(scores.erase(copy.find(&"Bob")), Err(Error::InvalidIterator));
//! assert_eq!(scores.len(), 3);
//! # Ok::<(), Error>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency. Each map
//!   draws its identity from a pointer-sized atomic counter, so the target must support atomic
//!   compare-and-swap (`target_has_atomic = "ptr"`)
//! - **No unsafe code** - Nodes live in a generational arena and link to each other by handle
//! - **Checked positions** - Stale, foreign and past-the-end positions yield
//!   [`Error::InvalidIterator`]
//! - **Custom ordering** - Any [`compare::Compare`] (closures included) can order the keys
//!
//! # Implementation
//!
//! The map is a classic red-black tree: every node is red or black, the root is black, no red
//! node has a red child, and every root-to-leaf path crosses the same number of black nodes.
//! Insertions and removals restore these rules with at most a handful of rotations, keeping the
//! height within twice the optimum.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;
#[cfg(test)]
extern crate std;

#[cfg(not(target_has_atomic = "ptr"))]
compile_error!("rb_tree_map needs pointer-sized atomic read-modify-write operations");

mod error;
mod raw;

pub mod rbtree_map;

pub use error::Error;
pub use rbtree_map::{Position, RBTreeMap};
