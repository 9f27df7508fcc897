//! Labeled decision tree with three independent ways to operate on it:
//! pre-order traversal, visitors computing over the whole tree, and a phased
//! builder driven by a replaceable state.
//!
//! ```
//! use dectree::domain::{sample_tree, CountLeavesVisitor, DepthVisitor};
//!
//! let tree = sample_tree().unwrap();
//! let names: Vec<_> = tree.iter().map(|(_, node)| node.name()).collect();
//! assert_eq!(names[0], "root");
//!
//! let mut depth = DepthVisitor::new();
//! tree.accept(&mut depth);
//! assert_eq!(depth.max_depth(), 2);
//!
//! let mut leaves = CountLeavesVisitor::new();
//! tree.accept(&mut leaves);
//! assert_eq!(leaves.count(), 3);
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use domain::{
    BuildState, CountLeavesVisitor, DecisionNode, DecisionTree, DepthVisitor, DomainError,
    DomainResult, LeafNode, Node, NodeId, NodeVisitor, PreOrderIter, TreeBuilder,
};
