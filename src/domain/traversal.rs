//! Stack-based pre-order traversal.

use std::iter::FusedIterator;

use tracing::{instrument, trace};

use crate::domain::arena::{DecisionTree, NodeId};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;

/// Depth-first iterator yielding each node before its children, children left to right.
///
/// Single pass: once exhausted it stays exhausted, build a new one to walk again.
/// Borrowing the tree for the whole walk keeps it from being mutated underneath.
pub struct PreOrderIter<'a> {
    tree: &'a DecisionTree,
    stack: Vec<NodeId>,
}

impl<'a> PreOrderIter<'a> {
    #[instrument(level = "trace", skip(tree))]
    pub fn new(tree: &'a DecisionTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }

    #[instrument(level = "trace", skip(tree))]
    pub fn from_node(tree: &'a DecisionTree, start: NodeId) -> Self {
        Self {
            tree,
            stack: vec![start],
        }
    }

    /// Like `next`, but reports exhaustion as [`DomainError::Exhausted`].
    pub fn try_next(&mut self) -> DomainResult<(NodeId, &'a Node)> {
        self.next().ok_or(DomainError::Exhausted)
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children().iter().rev() {
                    self.stack.push(child);
                }
                trace!(name = node.name(), pending = self.stack.len(), "Visiting node");
                return Some((current_idx, node));
            }
        }
        None
    }
}

impl FusedIterator for PreOrderIter<'_> {}
