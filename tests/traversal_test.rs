//! Tests for the pre-order iterator

use rstest::rstest;

use dectree::domain::{
    sample_tree, DecisionNode, DecisionTree, DomainError, LeafNode, PreOrderIter,
};
use dectree::util::testing;

fn preorder_names(iter: PreOrderIter<'_>) -> Vec<&str> {
    iter.map(|(_, node)| node.name()).collect()
}

#[test]
fn given_sample_tree_when_iterating_then_yields_exact_preorder() {
    testing::init_test_setup();
    let tree = sample_tree().unwrap();

    assert_eq!(
        preorder_names(tree.iter()),
        vec![
            "root",
            "left_leaf",
            "right_decision",
            "right_left_leaf",
            "right_right_leaf"
        ]
    );
}

/// Builds a tree with `branches` decision nodes under the root, each with `leaves` leaves.
fn wide_tree(branches: usize, leaves: usize) -> DecisionTree {
    let mut tree = DecisionTree::new();
    let root = tree.insert_root(DecisionNode::new("root", "r"));
    for b in 0..branches {
        let branch = tree
            .attach(root, DecisionNode::new(format!("b{b}"), "c"))
            .unwrap();
        for l in 0..leaves {
            tree.attach(branch, LeafNode::new(format!("b{b}l{l}"), "p"))
                .unwrap();
        }
    }
    tree
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(3, 2)]
#[case(5, 0)]
fn given_tree_when_iterating_then_every_node_once_root_first(
    #[case] branches: usize,
    #[case] leaves: usize,
) {
    let tree = wide_tree(branches, leaves);

    let visited: Vec<_> = tree.iter().map(|(idx, _)| idx).collect();

    assert_eq!(visited.len(), tree.len());
    assert_eq!(visited.first().copied(), tree.root());
    let mut unique = visited.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), visited.len());
}

#[test]
fn given_wide_tree_when_iterating_then_subtrees_complete_before_siblings() {
    let tree = wide_tree(2, 2);

    assert_eq!(
        preorder_names(tree.iter()),
        vec!["root", "b0", "b0l0", "b0l1", "b1", "b1l0", "b1l1"]
    );
}

#[test]
fn given_inner_node_when_iterating_from_it_then_only_subtree() {
    let tree = sample_tree().unwrap();
    let right = tree.find("right_decision").unwrap();

    assert_eq!(
        preorder_names(tree.iter_from(right)),
        vec!["right_decision", "right_left_leaf", "right_right_leaf"]
    );
}

#[test]
fn given_exhausted_iterator_when_pulling_then_exhausted() {
    let tree = sample_tree().unwrap();
    let mut iter = tree.iter();

    for _ in 0..5 {
        assert!(iter.try_next().is_ok());
    }

    assert_eq!(iter.try_next().err(), Some(DomainError::Exhausted));
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn given_empty_tree_when_iterating_then_nothing() {
    let tree = DecisionTree::new();

    assert_eq!(tree.iter().count(), 0);
    assert_eq!(tree.iter().try_next().err(), Some(DomainError::Exhausted));
}

#[test]
fn given_detached_nodes_when_iterating_then_not_reached() {
    let mut tree = sample_tree().unwrap();
    tree.insert(LeafNode::new("floating", "Class Z"));

    assert_eq!(tree.iter().count(), 5);
    assert_eq!(tree.len(), 6);
}

#[test]
fn given_new_iterator_when_walking_again_then_restarts() {
    let tree = sample_tree().unwrap();

    let first: Vec<_> = tree.iter().collect();
    let second: Vec<_> = tree.iter().collect();

    assert_eq!(first, second);
}
