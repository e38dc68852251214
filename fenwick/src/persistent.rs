//! Persistent Fenwick tree.
//!
//! The cells of a Fenwick tree over `size` positions are laid out as the in-order numbering of a
//! perfect binary tree with `span - 1 >= size` nodes, `span` a power of two. The node numbered
//! `label` (one-based) owns position `label - 1` and stores:
//! - `value`: the slot assigned to its position,
//! - `cell`: the Fenwick cell, the combination of its left subtree and its own value,
//! - `total`: the combination of its whole subtree.
//!
//! Missing children stand for subtrees where every slot is the identity, so an empty tree owns no
//! nodes at all. Nodes live in a [`FenwickArena`] and are never modified once pushed; an update
//! copies the root-to-position path and shares every other node with the version it started from.

use crate::error::{FenwickError, Result};

type NodeId = usize;

#[derive(Debug, Clone)]
struct FenwickNode<T> {
    value: T,
    cell: T,
    total: T,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// One version of a persistent Fenwick tree.
///
/// A version is a handle into the [`FenwickArena`] that created it and is only meaningful
/// together with that arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FenwickTree {
    root: Option<NodeId>,
    size: usize,
}

impl FenwickTree {
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// One-based label of the root and the distance from the root to its children.
    fn root_label(&self) -> (usize, usize) {
        let span = (self.size + 1).next_power_of_two();
        (span / 2, span / 4)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.size {
            Ok(())
        } else {
            Err(FenwickError::IndexOutOfRange { index, size: self.size })
        }
    }
}

/// Node storage shared by all versions built from it.
///
/// `combine` must be associative and `identity` must be neutral for it; neither is checked.
///
/// ```
/// use fenwick::FenwickArena;
///
/// let mut arena = FenwickArena::new(|a: &u64, b: &u64| a + b, 0);
/// let empty = arena.empty(5);
/// let first = arena.update(empty, 1, 10).unwrap();
/// let second = arena.update(first, 3, 5).unwrap();
/// assert_eq!(arena.prefix_combine(second, 4).unwrap(), 15);
/// assert_eq!(arena.prefix_combine(first, 4).unwrap(), 10);
/// assert_eq!(arena.prefix_combine(empty, 4).unwrap(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct FenwickArena<T, Combine> {
    nodes: Vec<FenwickNode<T>>,
    combine: Combine,
    identity: T,
}

impl<T, Combine> FenwickArena<T, Combine>
where
    T: Clone,
    Combine: Fn(&T, &T) -> T,
{
    pub fn new(combine: Combine, identity: T) -> Self {
        FenwickArena {
            nodes: Vec::new(),
            combine,
            identity,
        }
    }

    pub fn identity(&self) -> &T {
        &self.identity
    }

    /// Number of nodes allocated by all versions so far.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// A tree of `size` slots, all equal to the identity. Allocates nothing.
    #[must_use]
    pub fn empty(&self, size: usize) -> FenwickTree {
        FenwickTree { root: None, size }
    }

    /// A tree holding `values`, built by successive updates of an empty tree.
    ///
    /// # Errors
    /// Never fails in practice; the error type is shared with [`FenwickArena::update`].
    pub fn from_values(&mut self, values: &[T]) -> Result<FenwickTree> {
        values
            .iter()
            .enumerate()
            .try_fold(self.empty(values.len()), |tree, (index, value)| {
                self.update(tree, index, value.clone())
            })
    }

    /// New version of `tree` where slot `index` holds `value`.
    ///
    /// Allocates one node per level between the root and the slot; `tree` is left unchanged.
    ///
    /// # Errors
    /// Returns [`FenwickError::IndexOutOfRange`] unless `index < tree.len()`.
    pub fn update(&mut self, tree: FenwickTree, index: usize, value: T) -> Result<FenwickTree> {
        tree.check_index(index)?;
        let (label, step) = tree.root_label();
        let root = self.assign(tree.root, label, step, index + 1, value);
        Ok(FenwickTree {
            root: Some(root),
            size: tree.size,
        })
    }

    /// New version of `tree` where slot `index` holds `combine(previous, value)`.
    ///
    /// # Errors
    /// Returns [`FenwickError::IndexOutOfRange`] unless `index < tree.len()`.
    pub fn accumulate(&mut self, tree: FenwickTree, index: usize, value: &T) -> Result<FenwickTree> {
        let previous = self.get(tree, index)?;
        let combined = (self.combine)(&previous, value);
        self.update(tree, index, combined)
    }

    /// Current value of slot `index`.
    ///
    /// # Errors
    /// Returns [`FenwickError::IndexOutOfRange`] unless `index < tree.len()`.
    pub fn get(&self, tree: FenwickTree, index: usize) -> Result<T> {
        tree.check_index(index)?;
        let target = index + 1;
        let (mut label, mut step) = tree.root_label();
        let mut current = tree.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            if target == label {
                return Ok(node.value.clone());
            }
            if target < label {
                current = node.left;
                label -= step;
            } else {
                current = node.right;
                label += step;
            }
            step /= 2;
        }
        Ok(self.identity.clone())
    }

    /// Combination of slots `0..=index`, left to right.
    ///
    /// # Errors
    /// Returns [`FenwickError::IndexOutOfRange`] unless `index < tree.len()`.
    pub fn prefix_combine(&self, tree: FenwickTree, index: usize) -> Result<T> {
        tree.check_index(index)?;
        Ok(self.prefix(tree, index + 1))
    }

    /// Combination of slots `0..end`; `end == 0` yields the identity, also for an empty tree.
    ///
    /// # Errors
    /// Returns [`FenwickError::EndOutOfRange`] if `end > tree.len()`.
    pub fn combine_before(&self, tree: FenwickTree, end: usize) -> Result<T> {
        if end > tree.size {
            return Err(FenwickError::EndOutOfRange { end, size: tree.size });
        }
        Ok(self.prefix(tree, end))
    }

    /// Combination of all slots.
    pub fn total(&self, tree: FenwickTree) -> T {
        tree.root
            .map_or_else(|| self.identity.clone(), |id| self.nodes[id].total.clone())
    }

    /// All slots of `tree` in order.
    pub fn values(&self, tree: FenwickTree) -> Vec<T> {
        let mut values = vec![self.identity.clone(); tree.size];
        let (label, step) = tree.root_label();
        self.collect_values(tree.root, label, step, &mut values);
        values
    }

    fn collect_values(&self, node: Option<NodeId>, label: usize, step: usize, values: &mut [T]) {
        let Some(id) = node else {
            return;
        };
        let node = &self.nodes[id];
        if label <= values.len() {
            values[label - 1] = node.value.clone();
        }
        if step > 0 {
            self.collect_values(node.left, label - step, step / 2, values);
            self.collect_values(node.right, label + step, step / 2, values);
        }
    }

    /// Fenwick query for the one-based prefix `1..=target` as a root-to-node descent: every
    /// right turn passes a cell that ends exactly where the already combined prefix ends.
    fn prefix(&self, tree: FenwickTree, target: usize) -> T {
        let mut accumulated = self.identity.clone();
        if target == 0 {
            return accumulated;
        }
        let (mut label, mut step) = tree.root_label();
        let mut current = tree.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            if target < label {
                current = node.left;
                label -= step;
            } else {
                accumulated = (self.combine)(&accumulated, &node.cell);
                if target == label {
                    break;
                }
                current = node.right;
                label += step;
            }
            step /= 2;
        }
        accumulated
    }

    fn assign(&mut self, node: Option<NodeId>, label: usize, step: usize, target: usize, value: T) -> NodeId {
        let (previous, left, right) = match node {
            Some(id) => {
                let node = &self.nodes[id];
                (node.value.clone(), node.left, node.right)
            }
            None => (self.identity.clone(), None, None),
        };
        if target == label {
            self.push(value, left, right)
        } else if target < label {
            let left = self.assign(left, label - step, step / 2, target, value);
            self.push(previous, Some(left), right)
        } else {
            let right = self.assign(right, label + step, step / 2, target, value);
            self.push(previous, left, Some(right))
        }
    }

    fn push(&mut self, value: T, left: Option<NodeId>, right: Option<NodeId>) -> NodeId {
        let cell = match left {
            Some(id) => (self.combine)(&self.nodes[id].total, &value),
            None => value.clone(),
        };
        let total = match right {
            Some(id) => (self.combine)(&cell, &self.nodes[id].total),
            None => cell.clone(),
        };
        self.nodes.push(FenwickNode {
            value,
            cell,
            total,
            left,
            right,
        });
        self.nodes.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat(left: &String, right: &String) -> String {
        format!("{left}{right}")
    }

    #[test]
    fn empty_tree_allocates_nothing() {
        let arena = FenwickArena::new(concat, String::new());
        let tree = arena.empty(10);
        assert_eq!(arena.node_count(), 0);
        assert_eq!(arena.total(tree), "");
        assert_eq!(arena.prefix_combine(tree, 9).unwrap(), "");
    }

    #[test]
    fn zero_sized_tree_supports_only_vacuous_prefix() {
        let arena = FenwickArena::new(concat, String::new());
        let tree = arena.empty(0);
        assert_eq!(arena.combine_before(tree, 0).unwrap(), "");
        assert_eq!(
            arena.prefix_combine(tree, 0),
            Err(FenwickError::IndexOutOfRange { index: 0, size: 0 })
        );
        assert_eq!(
            arena.combine_before(tree, 1),
            Err(FenwickError::EndOutOfRange { end: 1, size: 0 })
        );
    }

    #[test]
    fn non_commutative_combine_keeps_order() {
        let mut arena = FenwickArena::new(concat, String::new());
        let letters: Vec<String> = "abcdefg".chars().map(String::from).collect();
        let tree = arena.from_values(&letters).unwrap();
        for index in 0..letters.len() {
            assert_eq!(arena.prefix_combine(tree, index).unwrap(), letters[..=index].concat());
        }
        assert_eq!(arena.total(tree), "abcdefg");
    }

    #[test]
    fn update_assigns_rather_than_accumulates() {
        let mut arena = FenwickArena::new(|a: &i64, b: &i64| a + b, 0);
        let tree = arena.empty(4);
        let tree = arena.update(tree, 2, 5).unwrap();
        let tree = arena.update(tree, 2, 7).unwrap();
        assert_eq!(arena.get(tree, 2).unwrap(), 7);
        assert_eq!(arena.total(tree), 7);
        let tree = arena.accumulate(tree, 2, &3).unwrap();
        assert_eq!(arena.get(tree, 2).unwrap(), 10);
    }

    #[test]
    fn update_allocates_one_node_per_level() {
        let mut arena = FenwickArena::new(|a: &i64, b: &i64| a + b, 0);
        let size = 100;
        let depth = (size + 1usize).next_power_of_two().trailing_zeros() as usize;
        let mut tree = arena.empty(size);
        for index in 0..size {
            let before = arena.node_count();
            tree = arena.update(tree, index, 1).unwrap();
            assert!(arena.node_count() - before <= depth);
        }
        assert_eq!(arena.total(tree), 100);
    }

    #[test]
    fn out_of_range_update_is_rejected() {
        let mut arena = FenwickArena::new(|a: &i64, b: &i64| a + b, 0);
        let tree = arena.empty(3);
        assert_eq!(
            arena.update(tree, 3, 1),
            Err(FenwickError::IndexOutOfRange { index: 3, size: 3 })
        );
        assert_eq!(arena.node_count(), 0);
    }
}
