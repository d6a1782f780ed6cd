//! The core implementation of the hash trie data structure.
//!
//! This module contains the [`Raw`][crate::raw::Raw] type, which is the engine behind the
//! [`HashTrieSet`][crate::HashTrieSet]. It is exposed to allow wrapping it into further APIs, but
//! is probably not the best thing for general use.

use std::borrow::Borrow;
use std::mem;

use smallvec::SmallVec;

use crate::hashing::KeyHasher;

pub mod debug;
pub mod iterator;

// All directly written, some things are not const fn yet :-(. But tested below.
pub(crate) const LEVEL_BITS: usize = 4;
pub(crate) const LEVEL_MASK: u64 = 0b1111;
pub(crate) const LEVEL_CELLS: usize = 16;
pub(crate) const HASH_BITS: usize = mem::size_of::<u64>() * 8;
pub(crate) const MAX_LEVELS: usize = HASH_BITS / LEVEL_BITS;

/// An inner branching node of the trie.
///
/// Each cell corresponds to one value of the next [`LEVEL_BITS`] bits of the hash.
pub(crate) struct Inner<T>(pub(crate) [Option<Node<T>>; LEVEL_CELLS]);

impl<T> Default for Inner<T> {
    fn default() -> Self {
        Inner(Default::default())
    }
}

impl<T> Inner<T> {
    fn cell(&mut self, hash: u64, shift: usize) -> &mut Option<Node<T>> {
        &mut self.0[((hash >> shift) & LEVEL_MASK) as usize]
    }
}

// Instead of distinguishing the very common case of single leaf and collision list in our code, we
// just handle everything as a list, possibly with 1 element.
//
// As the case with 1 element is much more probable, we don't want the Vec indirection there, so we
// let SmallVec to handle it by not spilling in that case.
pub(crate) type Data<T> = SmallVec<[T; 2]>;

pub(crate) enum Node<T> {
    Inner(Box<Inner<T>>),
    /// A leaf with the values.
    ///
    /// Never empty. It holds more than one value only if they have the very same hash and we ran
    /// out of the bits to split them by.
    Data(Data<T>),
}

fn leaf<T>(value: T) -> Node<T> {
    let mut data = Data::new();
    data.push(value);
    Node::Data(data)
}

/// What is left in a slot after removing something from below it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum PruneResult {
    /// Nothing left, the slot is empty now.
    Null,
    /// A data leaf (either the original one or one contracted from below).
    Singleton,
    /// An inner node, as several things still hang below it.
    Keep,
}

/// Removes or contracts an inner node that no longer needs to exist.
///
/// * If there's nothing below it, it is replaced by `None`.
/// * If there's exactly one value below it (in a data leaf directly in one of its cells), the leaf
///   is moved up into its place. That's fine, because the data is found by walking the bits of the
///   hash until a leaf is met, it doesn't need to be at any particular depth. A collision leaf
///   with multiple values must not move, because it could not be split again higher up.
fn prune<T>(slot: &mut Option<Node<T>>) -> PruneResult {
    let inner = match slot {
        Some(Node::Inner(inner)) => inner,
        _ => unreachable!("Only inner nodes get pruned"),
    };

    let mut allow_contract = true;
    let mut child_cnt = 0;
    let mut last_leaf = None;
    for (idx, cell) in inner.0.iter().enumerate() {
        match cell {
            None => (),
            Some(Node::Data(data)) => {
                last_leaf = Some(idx);
                child_cnt += data.len();
            }
            Some(Node::Inner(_)) => {
                // If we have an inner node here, multiple leaves hang somewhere below there. More
                // importantly, we can't contract the edge.
                allow_contract = false;
                child_cnt += 1;
            }
        }
    }

    match (allow_contract, child_cnt, last_leaf) {
        (true, 1, Some(idx)) => {
            let lone = inner.0[idx].take();
            *slot = lone;
            PruneResult::Singleton
        }
        (_, 0, None) => {
            *slot = None;
            PruneResult::Null
        }
        _ => PruneResult::Keep,
    }
}

/// The raw hash trie data structure.
///
/// The trie branches [`LEVEL_CELLS`] ways at each level, by consecutive [`LEVEL_BITS`] bits of the
/// hash of the value, starting with the least significant ones. A leaf is placed as high as
/// possible, it is pushed a level lower only when another value with a different hash needs to go
/// through the same cell. Values with identical hashes share a single leaf at the very bottom.
///
/// This makes the shape of the trie a direct picture of the quality of the hash function. A good
/// one produces a shallow and balanced trie with one value per leaf, a bad one long chains of
/// inner nodes and fat leaves that need to be searched linearly.
///
/// The hashes are provided by the `S` type parameter. The trie is always kept pruned (there are
/// no empty inner nodes and no inner nodes with only a single leaf below them).
///
/// For details of the internal implementation and correctness arguments, see the comments in
/// source code (they probably don't belong into API documentation).
pub struct Raw<T, S> {
    hash_builder: S,
    root: Option<Node<T>>,
    len: usize,
}

impl<T, S> Raw<T, S> {
    /// Constructs an empty instance from the given hasher.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            hash_builder,
            root: None,
            len: 0,
        }
    }

    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Number of values stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks for emptiness.
    pub fn is_empty(&self) -> bool {
        // This relies on proper branch pruning.
        self.root.is_none()
    }

    /// Removes all the values, keeping the hasher.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns an iterator through all the values, in no particular order.
    pub fn iter(&self) -> iterator::Iter<'_, T> {
        iterator::Iter::new(self)
    }
}

impl<T, S> Raw<T, S>
where
    T: Eq,
    S: KeyHasher<T>,
{
    /// Inserts a new value, replacing and returning any previously held equal value.
    pub fn insert(&mut self, value: T) -> Option<T> {
        let hash = self.hash_builder.hash_key(&value);
        let previous = Self::insert_at(&self.hash_builder, &mut self.root, hash, 0, value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    fn insert_at(
        hasher: &S,
        slot: &mut Option<Node<T>>,
        hash: u64,
        shift: usize,
        value: T,
    ) -> Option<T> {
        match slot {
            None => {
                // Not found, create it.
                *slot = Some(leaf(value));
                None
            }
            Some(Node::Inner(inner)) => {
                // An inner node, go one level deeper.
                let cell = inner.cell(hash, shift);
                Self::insert_at(hasher, cell, hash, shift + LEVEL_BITS, value)
            }
            Some(Node::Data(data)) if shift < HASH_BITS && data[0] != value => {
                debug_assert_eq!(data.len(), 1, "Collision node not deep enough");
                // There's one data node at this place, but we want to place a different one
                // here too. So we create a new level and push the old one down. Note that we
                // check both that we are adding something else & that we still have some more
                // bits to distinguish by.
                //
                // There *still* might be a collision on the new level. Therefore, we just add the
                // level and try again, we either place the value in an empty cell there or split
                // once more.
                let other_hash = hasher.hash_key(&data[0]);
                let mut inner = Box::new(Inner::default());
                *inner.cell(other_hash, shift) = slot.take();
                *slot = Some(Node::Inner(inner));
                Self::insert_at(hasher, slot, hash, shift, value)
            }
            Some(Node::Data(data)) => {
                // All the other cases:
                // * It has the same value.
                // * There's already a collision on this level (because we've already run out of
                //   bits previously).
                match data.iter().position(|v| *v == value) {
                    Some(pos) => Some(mem::replace(&mut data[pos], value)),
                    None => {
                        data.push(value);
                        None
                    }
                }
            }
        }
    }

    /// Looks up a value.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        Q: ?Sized + Eq,
        T: Borrow<Q>,
        S: KeyHasher<Q>,
    {
        let mut current = self.root.as_ref();
        let mut hash = self.hash_builder.hash_key(key);
        loop {
            match current? {
                Node::Data(data) => return data.iter().find(|v| (*v).borrow() == key),
                Node::Inner(inner) => {
                    let bits = hash & LEVEL_MASK;
                    hash >>= LEVEL_BITS;
                    current = inner.0[bits as usize].as_ref();
                }
            }
        }
    }

    /// Removes a value identified by the key from the trie, returning it if it was found.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        Q: ?Sized + Eq,
        T: Borrow<Q>,
        S: KeyHasher<Q>,
    {
        let hash = self.hash_builder.hash_key(key);
        let (removed, _) = Self::remove_at(&mut self.root, key, hash, 0)?;
        self.len -= 1;
        Some(removed)
    }

    fn remove_at<Q>(
        slot: &mut Option<Node<T>>,
        key: &Q,
        hash: u64,
        shift: usize,
    ) -> Option<(T, PruneResult)>
    where
        Q: ?Sized + Eq,
        T: Borrow<Q>,
    {
        let removed = match slot {
            // Nothing to delete, so just give up (without pruning).
            None => return None,
            Some(Node::Data(data)) => {
                let pos = data.iter().position(|v| v.borrow() == key)?;
                let removed = data.remove(pos);
                let left = if data.is_empty() {
                    *slot = None;
                    PruneResult::Null
                } else {
                    PruneResult::Singleton
                };
                return Some((removed, left));
            }
            Some(Node::Inner(inner)) => {
                let cell = inner.cell(hash, shift);
                match Self::remove_at(cell, key, hash, shift + LEVEL_BITS)? {
                    // There's still an inner node below us, so there's no way we could prune
                    // anything at this level or higher up.
                    (removed, PruneResult::Keep) => return Some((removed, PruneResult::Keep)),
                    (removed, _) => removed,
                }
            }
        };

        // Something got removed from below this inner node, so it might be unnecessary now.
        Some((removed, prune(slot)))
    }
}
