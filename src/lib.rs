//! Persistent AA-tree collections for Rust.
//!
//! This crate provides [`AATreeSet`] and [`AATreeMap`], ordered collections
//! whose every update returns a new version while all earlier versions stay
//! valid and unchanged:
//!
//! - [`add`](AATreeSet::add) / [`remove`](AATreeSet::remove) - O(log n), sharing
//!   every untouched subtree with the previous version
//! - [`select`](AATreeSet::select) - a cursor at a key, or between two keys,
//!   that steps to its [`next`](aatree_set::Cursor::next) and
//!   [`previous`](aatree_set::Cursor::previous) neighbours without searching
//!   again from the root
//! - [`keys`](AATreeSet::keys) - lazy in-order traversal
//!
//! # Example
//!
//! ```
//! use aa_tree::AATreeSet;
//!
//! let v1 = AATreeSet::new().insert([5, 3, 8, 1, 4]);
//! let v2 = v1.remove(&3);
//!
//! // Both versions remain usable.
//! assert_eq!(v1.keys().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
//! assert_eq!(v2.keys().copied().collect::<Vec<_>>(), [1, 4, 5, 8]);
//!
//! // A cursor at a missing key sits between its neighbours.
//! let cursor = v1.select(6);
//! assert!(!cursor.is_found());
//! assert_eq!(cursor.next().map(|c| *c.key()), Some(8));
//! assert_eq!(cursor.previous().map(|c| *c.key()), Some(5));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Persistent** - Versions share structure through reference counting and
//!   may be read from any number of threads
//! - **Custom orders** - Any [`Comparator`], including plain closures, can
//!   order a collection
//!
//! # Implementation
//!
//! The collections are AA-trees: binary search trees that keep one integer
//! *level* per node and restore balance with two local rotations, skew and
//! split. Updates walk a zipper-style path from the changed position back to
//! the root, copying only the nodes on that path.

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

mod compare;
mod error;
mod raw;

pub mod aatree_map;
pub mod aatree_set;

pub use aatree_map::AATreeMap;
pub use aatree_set::AATreeSet;
pub use compare::{Comparator, Natural};
pub use error::InvariantError;
