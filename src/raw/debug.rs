//! A module containing few debug utilities.
//!
//! In general, they are meant for looking at the *trie itself*, which is how the quality of the
//! hash function becomes visible.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use super::{Node, Raw};
#[cfg(test)]
use super::MAX_LEVELS;

/// Statistics about the shape of a trie.
///
/// The depth of a leaf is the number of inner nodes above it, so a lone value directly in the
/// root has depth 0.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Shape {
    /// Number of values stored.
    pub values: usize,
    /// Number of data leaves.
    pub leaves: usize,
    pub inner_nodes: usize,
    /// Depth of the deepest leaf.
    pub max_depth: usize,
    /// Number of values in the biggest leaf.
    pub largest_leaf: usize,
    /// Values that share a leaf with some other value (their hashes are exactly the same).
    pub colliding_values: usize,
    depth_sum: usize,
}

impl Shape {
    /// Average depth of a value, which is the number of inner nodes a lookup walks through.
    pub fn mean_depth(&self) -> f64 {
        if self.values == 0 {
            0.0
        } else {
            self.depth_sum as f64 / self.values as f64
        }
    }

    fn add<T>(&mut self, node: &Node<T>, depth: usize) {
        match node {
            Node::Data(data) => {
                self.values += data.len();
                self.leaves += 1;
                self.max_depth = self.max_depth.max(depth);
                self.largest_leaf = self.largest_leaf.max(data.len());
                self.depth_sum += depth * data.len();
                if data.len() > 1 {
                    self.colliding_values += data.len();
                }
            }
            Node::Inner(inner) => {
                self.inner_nodes += 1;
                for sub in inner.0.iter().flatten() {
                    self.add(sub, depth + 1);
                }
            }
        }
    }
}

impl<T, S> Raw<T, S> {
    /// Walks the whole trie and computes its [`Shape`].
    pub fn shape(&self) -> Shape {
        let mut shape = Shape::default();
        if let Some(root) = &self.root {
            shape.add(root, 0);
        }
        shape
    }

    /// Panics if the trie is not in consistent state and pruned well.
    #[cfg(test)]
    pub(crate) fn assert_pruned(&self) {
        fn check_node<T>(node: &Node<T>, depth: usize) -> usize {
            match node {
                Node::Data(data) => {
                    assert!(!data.is_empty(), "Empty data nodes should not exist");
                    assert!(
                        data.len() == 1 || depth == MAX_LEVELS,
                        "Collision leaf at depth {}",
                        depth
                    );
                    data.len()
                }
                Node::Inner(inner) => {
                    let mut data_cnt = 0;
                    let mut seen_inner = false;
                    let mut total = 0;
                    for sub in inner.0.iter().flatten() {
                        let cnt = check_node(sub, depth + 1);
                        total += cnt;
                        match sub {
                            Node::Data(_) => data_cnt += cnt,
                            Node::Inner(_) => seen_inner = true,
                        }
                    }
                    assert!(
                        data_cnt > 1 || seen_inner,
                        "This node should have been pruned"
                    );
                    total
                }
            }
        }

        let total = self.root.as_ref().map(|root| check_node(root, 0)).unwrap_or(0);
        assert_eq!(self.len, total, "Length doesn't match the content");
    }

    fn print_shape_node(node: Option<&Node<T>>, fmt: &mut Formatter) -> FmtResult
    where
        T: Debug,
    {
        match node {
            None => write!(fmt, "-"),
            Some(Node::Data(data)) => write!(fmt, "{:?}", &data[..]),
            Some(Node::Inner(inner)) => {
                write!(fmt, "(")?;
                for (idx, sub) in inner.0.iter().enumerate() {
                    write!(fmt, " {:X}:", idx)?;
                    Self::print_shape_node(sub.as_ref(), fmt)?;
                }
                write!(fmt, " )")
            }
        }
    }
}

/// A pretty-printing wrapper around the raw trie.
///
/// The structure of the trie, including the empty cells, is printed if this is used to wrap the
/// raw trie.
pub struct PrintShape<'a, T, S>(pub &'a Raw<T, S>);

impl<T, S> Display for PrintShape<'_, T, S>
where
    T: Debug,
{
    fn fmt(&self, fmt: &mut Formatter) -> FmtResult {
        Raw::<T, S>::print_shape_node(self.0.root.as_ref(), fmt)
    }
}
