//! Domain layer: tree structure, traversal, visitors and the phased builder
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod node;
pub mod sample;
pub mod traversal;
pub mod visitor;

pub use arena::{DecisionTree, NodeId};
pub use builder::{BuildState, TreeBuilder};
pub use error::{DomainError, DomainResult};
pub use node::{DecisionNode, LeafNode, Node};
pub use sample::sample_tree;
pub use traversal::PreOrderIter;
pub use visitor::{CountLeavesVisitor, DepthVisitor, NodeVisitor};
