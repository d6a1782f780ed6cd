//! The [`HashTrieSet`] and other related structures.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::hash::Hash;
use std::iter::FromIterator;

use crate::hashing::KeyHasher;
use crate::raw::debug::Shape;
use crate::raw::{self, Raw};

/// A set backed by a hash trie.
///
/// The hashes come from the `S` [`KeyHasher`], which can be any of the plate
/// [strategies][crate::Strategy] or a general purpose [`RandomState`].
///
/// ```rust
/// use platebench::{HashTrieSet, Strategy, VehiclePlate};
///
/// let mut set = HashTrieSet::with_hasher(Strategy::Polynomial);
///
/// set.insert(VehiclePlate::new('A', 'B', 123, 'C', 77));
/// set.insert(VehiclePlate::new('X', 'Y', 123, 'K', 777));
///
/// assert!(set.contains(&VehiclePlate::new('A', 'B', 123, 'C', 77)));
/// assert!(!set.contains(&VehiclePlate::new('A', 'B', 123, 'C', 78)));
/// assert_eq!(2, set.len());
/// ```
///
/// ```rust
/// use platebench::HashTrieSet;
/// let mut set: HashTrieSet<usize> = HashTrieSet::new();
///
/// set.insert(0);
/// set.insert(1);
///
/// assert!(set.contains(&1));
///
/// set.remove(&1);
/// assert!(!set.contains(&1));
///
/// set.remove(&0);
/// assert!(set.is_empty());
/// ```
pub struct HashTrieSet<T, S = RandomState> {
    raw: Raw<T, S>,
}

impl<T> HashTrieSet<T, RandomState>
where
    T: Hash + Eq,
{
    /// Creates a new empty set.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::default())
    }
}

impl<T, S> HashTrieSet<T, S> {
    /// Creates a new empty set with the given hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            raw: Raw::with_hasher(hasher),
        }
    }

    pub fn hasher(&self) -> &S {
        self.raw.hasher()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn clear(&mut self) {
        self.raw.clear()
    }

    /// Returns an iterator through the elements of the set, in no particular order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.raw.iter(),
        }
    }

    /// Describes how the underlying trie looks like.
    ///
    /// Useful for judging how well the hasher spreads the values.
    pub fn shape(&self) -> Shape {
        self.raw.shape()
    }

    #[cfg(test)]
    pub(crate) fn assert_pruned(&self) {
        self.raw.assert_pruned()
    }
}

impl<T, S> HashTrieSet<T, S>
where
    T: Eq,
    S: KeyHasher<T>,
{
    /// Inserts a new value into the set.
    ///
    /// If an equal value was already present, it gets replaced and returned.
    pub fn insert(&mut self, value: T) -> Option<T> {
        self.raw.insert(value)
    }

    /// Looks up a value in the set.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        Q: ?Sized + Eq,
        T: Borrow<Q>,
        S: KeyHasher<Q>,
    {
        self.raw.get(key)
    }

    /// Checks if a value identified by the given key is present in the set.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Eq,
        T: Borrow<Q>,
        S: KeyHasher<Q>,
    {
        self.raw.get(key).is_some()
    }

    /// Removes an element identified by the given key, returning it.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        Q: ?Sized + Eq,
        T: Borrow<Q>,
        S: KeyHasher<Q>,
    {
        self.raw.remove(key)
    }
}

impl<T, S> Default for HashTrieSet<T, S>
where
    T: Eq,
    S: KeyHasher<T> + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T: Debug, S> Debug for HashTrieSet<T, S> {
    fn fmt(&self, fmt: &mut Formatter) -> FmtResult {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

/// The iterator of the [`HashTrieSet`].
///
/// See the [`iter`][HashTrieSet::iter] method for details.
pub struct Iter<'a, T> {
    inner: raw::iterator::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T, S> IntoIterator for &'a HashTrieSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> Extend<T> for HashTrieSet<T, S>
where
    T: Eq,
    S: KeyHasher<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for n in iter {
            self.insert(n);
        }
    }
}

impl<T, S> FromIterator<T> for HashTrieSet<T, S>
where
    T: Eq,
    S: KeyHasher<T> + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut me = HashTrieSet::default();
        me.extend(iter);
        me
    }
}
