//! Tests for visitor dispatch and the concrete visitors

use rstest::rstest;

use dectree::domain::{
    sample_tree, CountLeavesVisitor, DecisionNode, DecisionTree, DepthVisitor, LeafNode,
    NodeVisitor,
};
use dectree::util::testing;

/// Records which visitor method each node was dispatched to.
#[derive(Default)]
struct DispatchRecorder {
    calls: Vec<String>,
}

impl NodeVisitor for DispatchRecorder {
    fn visit_decision_node(&mut self, _tree: &DecisionTree, node: &DecisionNode) {
        self.calls.push(format!("decision:{}", node.name()));
    }

    fn visit_leaf_node(&mut self, _tree: &DecisionTree, node: &LeafNode) {
        self.calls.push(format!("leaf:{}", node.name()));
    }
}

#[test]
fn given_sample_tree_when_measuring_depth_then_two() {
    testing::init_test_setup();
    let tree = sample_tree().unwrap();
    let mut visitor = DepthVisitor::new();

    tree.accept(&mut visitor);

    assert_eq!(visitor.max_depth(), 2);
    assert_eq!(visitor.current_depth(), 0, "enter/exit must balance");
}

#[test]
fn given_sample_tree_when_counting_leaves_then_three() {
    let tree = sample_tree().unwrap();
    let mut visitor = CountLeavesVisitor::new();

    tree.accept(&mut visitor);

    assert_eq!(visitor.count(), 3);
}

#[test]
fn given_nodes_when_accepting_then_dispatches_by_variant() {
    let tree = sample_tree().unwrap();
    let root = tree.root().unwrap();
    let leaf = tree.find("left_leaf").unwrap();
    let mut recorder = DispatchRecorder::default();

    tree.accept_at(root, &mut recorder).unwrap();
    tree.accept_at(leaf, &mut recorder).unwrap();

    // The recorder does not descend, so only the accepted nodes are seen
    assert_eq!(recorder.calls, vec!["decision:root", "leaf:left_leaf"]);
}

#[test]
fn given_inner_node_when_measuring_from_it_then_depth_is_relative() {
    let tree = sample_tree().unwrap();
    let right = tree.find("right_decision").unwrap();
    let mut depth = DepthVisitor::new();
    let mut leaves = CountLeavesVisitor::new();

    tree.accept_at(right, &mut depth).unwrap();
    tree.accept_at(right, &mut leaves).unwrap();

    assert_eq!(depth.max_depth(), 1);
    assert_eq!(leaves.count(), 2);
}

/// Chain of `length` decision nodes ending in a single leaf.
fn chain(length: usize) -> DecisionTree {
    let mut tree = DecisionTree::new();
    let mut current = tree.insert_root(DecisionNode::new("d0", "c"));
    for i in 1..length {
        current = tree
            .attach(current, DecisionNode::new(format!("d{i}"), "c"))
            .unwrap();
    }
    tree.attach(current, LeafNode::new("leaf", "p")).unwrap();
    tree
}

#[rstest]
#[case(1, 1)]
#[case(2, 2)]
#[case(6, 6)]
fn given_chain_when_measuring_then_depth_counts_edges(
    #[case] length: usize,
    #[case] expected: usize,
) {
    let tree = chain(length);

    assert_eq!(tree.max_depth(), expected);
    assert_eq!(tree.leaf_count(), 1);
}

#[test]
fn given_decision_without_children_when_visiting_then_depth_zero_no_leaves() {
    let mut tree = DecisionTree::new();
    tree.insert_root(DecisionNode::new("bare", "c"));

    assert_eq!(tree.max_depth(), 0);
    assert_eq!(tree.leaf_count(), 0);
}

#[test]
fn given_traversal_and_visitor_when_counting_leaves_then_agree() {
    let tree = sample_tree().unwrap();

    let by_iterator = tree.iter().filter(|(_, node)| node.is_leaf()).count();

    assert_eq!(by_iterator, tree.leaf_count());
}
