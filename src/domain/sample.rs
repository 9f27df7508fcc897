//! Built-in example tree.
//!
//! ```text
//! root [feature_x <= 10]
//! ├── left_leaf => Class A
//! └── right_decision [feature_y > 5]
//!     ├── right_left_leaf => Class B
//!     └── right_right_leaf => Class C
//! ```

use tracing::{debug, instrument};

use crate::domain::arena::DecisionTree;
use crate::domain::error::DomainResult;
use crate::domain::node::{DecisionNode, LeafNode};

#[instrument(level = "debug")]
pub fn sample_tree() -> DomainResult<DecisionTree> {
    let mut tree = DecisionTree::new();

    let root = tree.insert_root(DecisionNode::new("root", "feature_x <= 10"));
    tree.attach(root, LeafNode::new("left_leaf", "Class A"))?;
    let right = tree.attach(root, DecisionNode::new("right_decision", "feature_y > 5"))?;
    tree.attach(right, LeafNode::new("right_left_leaf", "Class B"))?;
    tree.attach(right, LeafNode::new("right_right_leaf", "Class C"))?;

    debug!(nodes = tree.len(), "Built sample tree");
    Ok(tree)
}
