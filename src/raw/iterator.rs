use std::iter::FusedIterator;
use std::slice;

use arrayvec::ArrayVec;

use super::{Node, Raw, MAX_LEVELS};

enum Level<'a, T> {
    Inner(slice::Iter<'a, Option<Node<T>>>),
    Data(slice::Iter<'a, T>),
}

/// Iterator through the values stored in a [`Raw`] trie.
///
/// It walks the trie depth first. The path is kept on a stack, which can't be deeper than the
/// number of levels in the trie plus the data leaf at the bottom.
pub struct Iter<'a, T> {
    levels: ArrayVec<[Level<'a, T>; MAX_LEVELS + 1]>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub fn new<S>(map: &'a Raw<T, S>) -> Self {
        let mut iter = Iter {
            levels: ArrayVec::new(),
            remaining: map.len(),
        };
        if let Some(root) = &map.root {
            iter.descend(root);
        }
        iter
    }

    fn descend(&mut self, node: &'a Node<T>) {
        let level = match node {
            Node::Inner(inner) => Level::Inner(inner.0.iter()),
            Node::Data(data) => Level::Data(data.iter()),
        };
        self.levels.push(level);
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            let below = match self.levels.last_mut()? {
                Level::Data(values) => match values.next() {
                    Some(value) => {
                        self.remaining -= 1;
                        return Some(value);
                    }
                    None => None,
                },
                Level::Inner(cells) => match cells.next() {
                    Some(Some(node)) => Some(node),
                    Some(None) => continue,
                    None => None,
                },
            };

            match below {
                Some(node) => self.descend(node),
                None => {
                    self.levels.pop();
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
