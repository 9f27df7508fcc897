/*
Rendering of decision trees as indented text trees (termtree).
Kept outside the domain layer: presentation only.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::{DecisionTree, Node, NodeId};

pub trait TreeNodeConvert {
    /// `labels` appends the condition or prediction to each node name.
    fn to_tree_string(&self, labels: bool) -> Tree<String>;
}

/// Node name, optionally followed by its condition or prediction.
pub fn node_text(node: &Node, labels: bool) -> String {
    if labels {
        node.to_string()
    } else {
        node.name().to_string()
    }
}

impl TreeNodeConvert for DecisionTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, labels: bool) -> Tree<String> {
        fn build_tree(tree: &DecisionTree, node_idx: NodeId, labels: bool) -> Option<Tree<String>> {
            let node = tree.get_node(node_idx)?;
            let leaves: Vec<_> = node
                .children()
                .iter()
                .filter_map(|&child| build_tree(tree, child, labels))
                .collect();
            Some(Tree::new(node_text(node, labels)).with_leaves(leaves))
        }

        self.root()
            .and_then(|root| build_tree(self, root, labels))
            .unwrap_or_else(|| Tree::new("Empty tree".to_string()))
    }
}
