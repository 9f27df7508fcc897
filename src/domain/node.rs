//! Node variants of a decision tree.
//!
//! `Node` is the capability set shared by internal and terminal nodes. The
//! structural operations (`add_child`, `remove_child`, `get_children`) live on
//! [`DecisionTree`], which owns every node; this module only carries the
//! per-node payload and the visitor entry point.

use std::fmt;

use crate::domain::arena::{DecisionTree, NodeId};
use crate::domain::visitor::NodeVisitor;

/// Internal node: a split condition and an ordered list of owned children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionNode {
    name: String,
    condition: String,
    pub(crate) children: Vec<NodeId>,
}

impl DecisionNode {
    pub fn new(name: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: condition.into(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opaque description of the split, never interpreted.
    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Terminal node carrying a prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    name: String,
    prediction: String,
}

impl LeafNode {
    pub fn new(name: impl Into<String>, prediction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prediction: prediction.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prediction(&self) -> &str {
        &self.prediction
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Decision(DecisionNode),
    Leaf(LeafNode),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Decision(decision) => decision.name(),
            Node::Leaf(leaf) => leaf.name(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Condition for decision nodes, prediction for leaves.
    pub fn label(&self) -> &str {
        match self {
            Node::Decision(decision) => decision.condition(),
            Node::Leaf(leaf) => leaf.prediction(),
        }
    }

    /// Snapshot of the children; always empty for a leaf.
    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Decision(decision) => decision.children(),
            Node::Leaf(_) => &[],
        }
    }

    /// Double dispatch into the visitor method matching this variant.
    pub fn accept<V: NodeVisitor + ?Sized>(&self, tree: &DecisionTree, visitor: &mut V) {
        match self {
            Node::Decision(decision) => visitor.visit_decision_node(tree, decision),
            Node::Leaf(leaf) => visitor.visit_leaf_node(tree, leaf),
        }
    }
}

impl From<DecisionNode> for Node {
    fn from(node: DecisionNode) -> Self {
        Node::Decision(node)
    }
}

impl From<LeafNode> for Node {
    fn from(node: LeafNode) -> Self {
        Node::Leaf(node)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Decision(decision) => write!(f, "{} [{}]", decision.name(), decision.condition()),
            Node::Leaf(leaf) => write!(f, "{} => {}", leaf.name(), leaf.prediction()),
        }
    }
}
