//! Encodings read off rooted trees with at most three children per node.
//!
//! Every node is a mode and a qubit. The child in position 0, 1, 2 hangs from the node's X, Y, Z
//! leg. A Majorana string follows the root-to-node path, writing on every ancestor the label of the
//! leg that leads towards the node, then leaves the node through its X leg (`c`) or Y leg (`d`) and
//! keeps taking Z legs until it falls off the tree. Distinct strings end on distinct free legs, so
//! they anticommute whatever the labelling of the nodes.

use crate::error::{EncodingError, Result, TreeError};
use crate::ladder::MajoranaPair;
use paulimer::{PauliLabel, PauliRegister, Phase};
use std::collections::{BTreeMap, BTreeSet};

pub const MAX_CHILDREN: usize = 3;

const LEG_LABELS: [PauliLabel; MAX_CHILDREN] = [PauliLabel::X, PauliLabel::Y, PauliLabel::Z];

/// A mode and the subtrees hanging from its legs, in leg order.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeNode {
    label: usize,
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(label: usize) -> Self {
        TreeNode {
            label,
            children: Vec::new(),
        }
    }

    pub fn new(label: usize, children: Vec<TreeNode>) -> Self {
        TreeNode { label, children }
    }

    /// Tree rooted at `root` where `children[&label]` lists the children of `label` in leg order.
    ///
    /// Labels absent from `children` are leaves.
    ///
    /// # Errors
    /// Returns [`TreeError::Cycle`] if a node is reachable from itself and
    /// [`TreeError::DuplicateLabel`] if a node is reachable along two paths.
    pub fn from_children(root: usize, children: &BTreeMap<usize, Vec<usize>>) -> std::result::Result<Self, TreeError> {
        let mut on_path = BTreeSet::new();
        let mut visited = BTreeSet::new();
        build_subtree(root, children, &mut on_path, &mut visited)
    }

    #[must_use]
    pub fn label(&self) -> usize {
        self.label
    }

    #[must_use]
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Number of edges on the longest root-to-leaf path.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Labels in pre-order.
    #[must_use]
    pub fn labels(&self) -> Vec<usize> {
        let mut labels = Vec::with_capacity(self.node_count());
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            labels.push(node.label);
            stack.extend(node.children.iter().rev());
        }
        labels
    }

    /// Checks that the tree labels each of `mode_count` modes exactly once and that no node has
    /// more than three children.
    ///
    /// # Errors
    /// Returns the first [`TreeError`] found.
    pub fn validate(&self, mode_count: usize) -> std::result::Result<(), TreeError> {
        let mut seen = vec![false; mode_count];
        let mut stack = vec![self];
        let mut node_count = 0;
        while let Some(node) = stack.pop() {
            node_count += 1;
            if node.children.len() > MAX_CHILDREN {
                return Err(TreeError::TooManyChildren {
                    label: node.label,
                    count: node.children.len(),
                });
            }
            let slot = seen.get_mut(node.label).ok_or(TreeError::LabelOutOfRange {
                label: node.label,
                mode_count,
            })?;
            if std::mem::replace(slot, true) {
                return Err(TreeError::DuplicateLabel { label: node.label });
            }
            stack.extend(&node.children);
        }
        if node_count == mode_count {
            Ok(())
        } else {
            Err(TreeError::ModeCountMismatch {
                expected: mode_count,
                found: node_count,
            })
        }
    }
}

fn build_subtree(
    label: usize,
    children: &BTreeMap<usize, Vec<usize>>,
    on_path: &mut BTreeSet<usize>,
    visited: &mut BTreeSet<usize>,
) -> std::result::Result<TreeNode, TreeError> {
    if on_path.contains(&label) {
        return Err(TreeError::Cycle { label });
    }
    if !visited.insert(label) {
        return Err(TreeError::DuplicateLabel { label });
    }
    on_path.insert(label);
    let mut subtrees = Vec::new();
    for &child in children.get(&label).map_or(&[][..], Vec::as_slice) {
        subtrees.push(build_subtree(child, children, on_path, visited)?);
    }
    on_path.remove(&label);
    Ok(TreeNode::new(label, subtrees))
}

/// Complete binary tree in heap order: node `k` has children `2k + 1` and `2k + 2`.
///
/// Its depth is `⌊log₂ n⌋`, the least possible for a binary tree on `n` nodes.
pub fn balanced_binary_tree(mode_count: usize) -> Option<TreeNode> {
    heap_tree(mode_count, 2)
}

/// Complete ternary tree in heap order: node `k` has children `3k + 1`, `3k + 2` and `3k + 3`.
///
/// ```
/// use fockmap::tree::balanced_ternary_tree;
///
/// let tree = balanced_ternary_tree(13).unwrap();
/// assert_eq!(tree.depth(), 2);
/// assert_eq!(tree.children().len(), 3);
/// assert!(balanced_ternary_tree(0).is_none());
/// ```
pub fn balanced_ternary_tree(mode_count: usize) -> Option<TreeNode> {
    heap_tree(mode_count, 3)
}

fn heap_tree(mode_count: usize, arity: usize) -> Option<TreeNode> {
    (mode_count > 0).then(|| heap_subtree(0, mode_count, arity))
}

fn heap_subtree(index: usize, mode_count: usize, arity: usize) -> TreeNode {
    let children = (arity * index + 1..=arity * index + arity)
        .take_while(|&child| child < mode_count)
        .map(|child| heap_subtree(child, mode_count, arity))
        .collect();
    TreeNode::new(index, children)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct FlatNode {
    /// Parent mode and the leg of the parent this node hangs from.
    parent: Option<(usize, usize)>,
    legs: [Option<usize>; MAX_CHILDREN],
}

/// A validated tree flattened into per-mode nodes, with the Majorana strings of every mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEncoding {
    name: String,
    root: usize,
    nodes: Vec<FlatNode>,
    majoranas: Vec<MajoranaPair>,
}

impl TreeEncoding {
    /// # Errors
    /// Returns [`EncodingError::Tree`] if `tree` fails [`TreeNode::validate`].
    pub fn new(tree: &TreeNode, mode_count: usize) -> Result<Self> {
        tree.validate(mode_count)?;
        let mut nodes = vec![FlatNode::default(); mode_count];
        let mut stack = vec![tree];
        while let Some(node) = stack.pop() {
            for (leg, child) in node.children.iter().enumerate() {
                nodes[node.label].legs[leg] = Some(child.label);
                nodes[child.label].parent = Some((node.label, leg));
                stack.push(child);
            }
        }
        let mut encoding = TreeEncoding {
            name: "tree".to_owned(),
            root: tree.label,
            nodes,
            majoranas: Vec::new(),
        };
        encoding.majoranas = (0..mode_count)
            .map(|mode| MajoranaPair {
                c: encoding.leg_string(mode, 0),
                d: encoding.leg_string(mode, 1),
            })
            .collect();
        log::debug!(
            "flattened tree of {mode_count} modes rooted at {} with depth {}",
            encoding.root,
            tree.depth()
        );
        Ok(encoding)
    }

    /// # Errors
    /// Returns [`TreeError::Empty`] for zero modes.
    pub fn balanced_binary(mode_count: usize) -> Result<Self> {
        let tree = balanced_binary_tree(mode_count).ok_or(TreeError::Empty)?;
        Ok(Self::new(&tree, mode_count)?.with_name("balanced binary tree"))
    }

    /// # Errors
    /// Returns [`TreeError::Empty`] for zero modes.
    pub fn balanced_ternary(mode_count: usize) -> Result<Self> {
        let tree = balanced_ternary_tree(mode_count).ok_or(TreeError::Empty)?;
        Ok(Self::new(&tree, mode_count)?.with_name("balanced ternary tree"))
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        name.clone_into(&mut self.name);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn mode_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn root(&self) -> usize {
        self.root
    }

    /// # Errors
    /// Returns [`EncodingError::ModeOutOfRange`].
    pub fn parent(&self, mode: usize) -> Result<Option<usize>> {
        Ok(self.node(mode)?.parent.map(|(parent, _)| parent))
    }

    /// # Errors
    /// Returns [`EncodingError::ModeOutOfRange`].
    pub fn children(&self, mode: usize) -> Result<Vec<usize>> {
        Ok(self.node(mode)?.legs.iter().flatten().copied().collect())
    }

    #[must_use]
    pub fn majorana_pairs(&self) -> &[MajoranaPair] {
        &self.majoranas
    }

    fn node(&self, mode: usize) -> Result<&FlatNode> {
        self.nodes.get(mode).ok_or(EncodingError::ModeOutOfRange {
            mode,
            mode_count: self.mode_count(),
        })
    }

    fn leg_string(&self, mode: usize, leg: usize) -> PauliRegister {
        let mut labels = vec![PauliLabel::I; self.nodes.len()];
        let mut current = self.nodes[mode].parent;
        while let Some((parent, parent_leg)) = current {
            labels[parent] = LEG_LABELS[parent_leg];
            current = self.nodes[parent].parent;
        }
        labels[mode] = LEG_LABELS[leg];
        let mut next = self.nodes[mode].legs[leg];
        while let Some(node) = next {
            labels[node] = PauliLabel::Z;
            next = self.nodes[node].legs[2];
        }
        PauliRegister::new(labels, Phase::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_trees() {
        let binary = balanced_binary_tree(7).unwrap();
        assert_eq!(binary.depth(), 2);
        assert_eq!(binary.labels(), vec![0, 1, 3, 4, 2, 5, 6]);
        let ternary = balanced_ternary_tree(4).unwrap();
        assert_eq!(ternary.depth(), 1);
        assert_eq!(ternary.labels(), vec![0, 1, 2, 3]);
        assert_eq!(balanced_binary_tree(1).unwrap(), TreeNode::leaf(0));
        assert!(balanced_binary_tree(0).is_none());
    }

    #[test]
    fn from_children_detects_cycles_and_sharing() {
        let tree = TreeNode::from_children(2, &BTreeMap::from([(2, vec![0, 1])])).unwrap();
        assert_eq!(tree, TreeNode::new(2, vec![TreeNode::leaf(0), TreeNode::leaf(1)]));
        assert_eq!(
            TreeNode::from_children(0, &BTreeMap::from([(0, vec![1]), (1, vec![0])])),
            Err(TreeError::Cycle { label: 0 })
        );
        assert_eq!(
            TreeNode::from_children(0, &BTreeMap::from([(0, vec![1, 2]), (1, vec![3]), (2, vec![3])])),
            Err(TreeError::DuplicateLabel { label: 3 })
        );
    }

    #[test]
    fn validation_errors() {
        let wide = TreeNode::new(0, (1..5).map(TreeNode::leaf).collect());
        assert_eq!(wide.validate(5), Err(TreeError::TooManyChildren { label: 0, count: 4 }));
        let duplicated = TreeNode::new(0, vec![TreeNode::leaf(1), TreeNode::leaf(1)]);
        assert_eq!(duplicated.validate(3), Err(TreeError::DuplicateLabel { label: 1 }));
        let small = TreeNode::new(0, vec![TreeNode::leaf(1)]);
        assert_eq!(small.validate(3), Err(TreeError::ModeCountMismatch { expected: 3, found: 2 }));
        assert_eq!(small.validate(1), Err(TreeError::LabelOutOfRange { label: 1, mode_count: 1 }));
    }

    #[test]
    fn single_node_is_one_qubit() {
        let encoding = TreeEncoding::new(&TreeNode::leaf(0), 1).unwrap();
        let pair = &encoding.majorana_pairs()[0];
        assert_eq!(pair.c.to_string(), "X");
        assert_eq!(pair.d.to_string(), "Y");
    }

    #[test]
    fn strings_follow_path_and_z_descent() {
        // 0 hangs 3, 4, 1 from its X, Y, Z legs; 1 hangs 5, 6, 2
        let chain = TreeNode::new(
            0,
            vec![
                TreeNode::leaf(3),
                TreeNode::leaf(4),
                TreeNode::new(1, vec![TreeNode::leaf(5), TreeNode::leaf(6), TreeNode::leaf(2)]),
            ],
        );
        let encoding = TreeEncoding::new(&chain, 7).unwrap();
        assert_eq!(encoding.parent(2).unwrap(), Some(1));
        assert_eq!(encoding.children(1).unwrap(), vec![5, 6, 2]);
        // d₁ leaves node 1 through its Y leg and ends on the Z leg of leaf 6
        assert_eq!(encoding.majorana_pairs()[1].d.to_string(), "ZYIIIIZ");
        assert_eq!(encoding.majorana_pairs()[2].c.to_string(), "ZZXIIII");
    }

    #[test]
    fn binary_tree_strings() {
        let encoding = TreeEncoding::balanced_binary(3).unwrap();
        let strings: Vec<(String, String)> = encoding
            .majorana_pairs()
            .iter()
            .map(|pair| (pair.c.to_string(), pair.d.to_string()))
            .collect();
        assert_eq!(
            strings,
            [("XZI", "YIZ"), ("XXI", "XYI"), ("YIX", "YIY")].map(|(c, d)| (c.to_owned(), d.to_owned()))
        );
        assert_eq!(encoding.name(), "balanced binary tree");
        assert!(matches!(
            TreeEncoding::balanced_binary(0),
            Err(EncodingError::Tree(TreeError::Empty))
        ));
    }
}
