//! Visitors: operations over a whole tree, dispatched per node variant.

use tracing::trace;

use crate::domain::arena::DecisionTree;
use crate::domain::node::{DecisionNode, LeafNode};

/// One method per node variant; [`Node::accept`](crate::domain::Node::accept) picks the method.
///
/// Visitors keep their results as internal state, read once the walk has
/// returned. The tree is passed along so a visitor can resolve child handles
/// and drive its own descent.
pub trait NodeVisitor {
    fn visit_decision_node(&mut self, tree: &DecisionTree, node: &DecisionNode);
    fn visit_leaf_node(&mut self, tree: &DecisionTree, node: &LeafNode);
}

/// Maximum depth in edges, root at depth 0.
#[derive(Debug, Default)]
pub struct DepthVisitor {
    current_depth: usize,
    max_depth: usize,
}

impl DepthVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_depth(&self) -> usize {
        self.current_depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl NodeVisitor for DepthVisitor {
    fn visit_decision_node(&mut self, tree: &DecisionTree, node: &DecisionNode) {
        self.max_depth = self.max_depth.max(self.current_depth);
        trace!(name = node.name(), depth = self.current_depth, "Entering decision node");

        self.current_depth += 1;
        for &child in node.children() {
            if let Some(child) = tree.get_node(child) {
                child.accept(tree, self);
            }
        }
        self.current_depth -= 1;
    }

    fn visit_leaf_node(&mut self, _tree: &DecisionTree, node: &LeafNode) {
        self.max_depth = self.max_depth.max(self.current_depth);
        trace!(name = node.name(), depth = self.current_depth, "Reached leaf");
    }
}

#[derive(Debug, Default)]
pub struct CountLeavesVisitor {
    count: usize,
}

impl CountLeavesVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl NodeVisitor for CountLeavesVisitor {
    fn visit_decision_node(&mut self, tree: &DecisionTree, node: &DecisionNode) {
        for &child in node.children() {
            if let Some(child) = tree.get_node(child) {
                child.accept(tree, self);
            }
        }
    }

    fn visit_leaf_node(&mut self, _tree: &DecisionTree, node: &LeafNode) {
        self.count += 1;
        trace!(name = node.name(), count = self.count, "Counted leaf");
    }
}
