#![doc(test(attr(deny(warnings))))]

//! How much does the quality of a hash function matter?
//!
//! This crate measures it on vehicle registration plates (like `AB123C77`). It contains:
//!
//! * The [`VehiclePlate`] key type, with total ordering and its textual form.
//! * The [`PlateGenerator`], producing random but reproducible valid plates.
//! * Several plate [hash strategies][hashing], from terrible to good, all implementing the
//!   [`KeyHasher`] trait.
//! * The [`HashTrieSet`], a hash set that takes any [`KeyHasher`]. It is a hash trie, so a bad
//!   hasher turns it into deep chains of nodes and long collision lists, which is visible through
//!   its [`shape`][HashTrieSet::shape].
//! * The [benchmark] driver, comparing the hash set with the standard [`BTreeSet`].
//!
//! ```rust
//! use std::collections::BTreeSet;
//!
//! use platebench::{HashTrieSet, PlateGenerator, Strategy};
//!
//! let mut generator = PlateGenerator::new();
//! let fill = generator.batch(1000);
//! let find = generator.batch(1000);
//!
//! let mut hashed = HashTrieSet::with_hasher(Strategy::Polynomial);
//! hashed.extend(fill.iter().cloned());
//! let ordered = fill.iter().cloned().collect::<BTreeSet<_>>();
//!
//! let found_hashed = find.iter().filter(|p| hashed.contains(*p)).count();
//! let found_ordered = find.iter().filter(|p| ordered.contains(*p)).count();
//! assert_eq!(found_hashed, found_ordered);
//! ```
//!
//! [`BTreeSet`]: std::collections::BTreeSet

pub mod benchmark;
pub mod generator;
pub mod hashing;
pub mod plate;
pub mod raw;
pub mod set;

pub use crate::generator::PlateGenerator;
pub use crate::hashing::{KeyHasher, Strategy};
pub use crate::plate::VehiclePlate;
pub use crate::set::HashTrieSet;
