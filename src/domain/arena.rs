use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;
use crate::domain::traversal::PreOrderIter;
use crate::domain::visitor::{CountLeavesVisitor, DepthVisitor, NodeVisitor};

/// Handle of a node inside a [`DecisionTree`].
///
/// Generational: once a node is discarded its handle never resolves again,
/// even if the slot is reused.
pub type NodeId = Index;

/// Arena slot: the node payload plus its parent link.
#[derive(Debug)]
struct TreeNode {
    node: Node,
    /// None for the root and for detached nodes
    parent: Option<NodeId>,
}

/// Arena-based decision tree.
///
/// The arena exclusively owns every node. Children are referenced by index from
/// their (single) parent, so the structure stays tree-shaped: `add_child`
/// refuses nodes that already have a parent and nodes that would close a cycle.
/// Nodes can exist detached (inserted but not yet attached) until they are
/// added under a parent or discarded.
#[derive(Debug)]
pub struct DecisionTree {
    arena: Arena<TreeNode>,
    /// Index of the root node, None for empty trees
    root: Option<NodeId>,
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Inserts `node` as the new root. A previous root is released with its subtree.
    #[instrument(level = "debug", skip(self, node))]
    pub fn insert_root(&mut self, node: impl Into<Node>) -> NodeId {
        if let Some(old_root) = self.root.take() {
            let released = self.release_subtree(old_root);
            debug!(released, "Released previous root subtree");
        }
        let root = self.insert(node);
        self.root = Some(root);
        root
    }

    /// Inserts a detached node.
    #[instrument(level = "trace", skip(self, node))]
    pub fn insert(&mut self, node: impl Into<Node>) -> NodeId {
        let node = node.into();
        trace!(name = node.name(), "Inserting node");
        self.arena.insert(TreeNode { node, parent: None })
    }

    /// Inserts `node` and adds it as the last child of `parent`.
    ///
    /// A leaf parent ignores the child, which then stays detached.
    #[instrument(level = "debug", skip(self, node))]
    pub fn attach(&mut self, parent: NodeId, node: impl Into<Node>) -> DomainResult<NodeId> {
        if !self.arena.contains(parent) {
            return Err(DomainError::NodeNotFound(parent));
        }
        let child = self.insert(node);
        self.add_child(parent, child)?;
        Ok(child)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: NodeId) -> Option<&Node> {
        self.arena.get(idx).map(|slot| &slot.node)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn parent(&self, idx: NodeId) -> Option<NodeId> {
        self.arena.get(idx).and_then(|slot| slot.parent)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of nodes held by the arena, detached ones included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// First node in pre-order carrying `name`.
    #[instrument(level = "debug", skip(self))]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.name() == name)
            .map(|(idx, _)| idx)
    }

    /// Appends `child` to the children of `parent`.
    ///
    /// Leaves ignore the call. Fails if either handle is stale, if `child`
    /// already has a parent (or is the root), or if `child` is `parent` itself
    /// or one of its ancestors.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> DomainResult<()> {
        let parent_slot = self.slot(parent)?;
        let child_slot = self.slot(child)?;

        if parent_slot.node.is_leaf() {
            trace!(
                parent = parent_slot.node.name(),
                "Leaf node cannot have children, ignoring add_child"
            );
            return Ok(());
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(DomainError::CycleDetected {
                parent: parent_slot.node.name().to_string(),
                child: child_slot.node.name().to_string(),
            });
        }
        if child_slot.parent.is_some() || self.root == Some(child) {
            return Err(DomainError::AlreadyAttached(
                child_slot.node.name().to_string(),
            ));
        }

        if let Some(TreeNode {
            node: Node::Decision(decision),
            ..
        }) = self.arena.get_mut(parent)
        {
            decision.children.push(child);
            debug!(parent = decision.name(), children = decision.children.len(), "Added child");
        }
        if let Some(slot) = self.arena.get_mut(child) {
            slot.parent = Some(parent);
        }
        Ok(())
    }

    /// Removes the first occurrence of `child` from the children of `parent`.
    ///
    /// The removed node stays in the arena, detached. Leaves ignore the call.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomainResult<()> {
        let slot = self.slot(parent)?;
        let Node::Decision(decision) = &slot.node else {
            trace!(
                parent = slot.node.name(),
                "Leaf node has no children, ignoring remove_child"
            );
            return Ok(());
        };
        let Some(position) = decision.children.iter().position(|&idx| idx == child) else {
            return Err(DomainError::ChildNotFound {
                parent: decision.name().to_string(),
                child: self.name_of(child),
            });
        };

        if let Some(TreeNode {
            node: Node::Decision(decision),
            ..
        }) = self.arena.get_mut(parent)
        {
            decision.children.remove(position);
            debug!(parent = decision.name(), children = decision.children.len(), "Removed child");
        }
        if let Some(slot) = self.arena.get_mut(child) {
            slot.parent = None;
        }
        Ok(())
    }

    /// Snapshot of the children of `idx` in insertion order (empty for leaves).
    #[instrument(level = "trace", skip(self))]
    pub fn get_children(&self, idx: NodeId) -> DomainResult<Vec<NodeId>> {
        Ok(self.slot(idx)?.node.children().to_vec())
    }

    /// Detaches `idx` from its parent and releases it together with its subtree.
    ///
    /// Returns the number of released nodes.
    #[instrument(level = "debug", skip(self))]
    pub fn discard(&mut self, idx: NodeId) -> DomainResult<usize> {
        if let Some(parent) = self.slot(idx)?.parent {
            self.remove_child(parent, idx)?;
        }
        if self.root == Some(idx) {
            self.root = None;
        }
        Ok(self.release_subtree(idx))
    }

    /// Runs `visitor` from the root; an empty tree is not visited.
    #[instrument(level = "debug", skip_all)]
    pub fn accept<V: NodeVisitor + ?Sized>(&self, visitor: &mut V) {
        if let Some(node) = self.root.and_then(|root| self.get_node(root)) {
            node.accept(self, visitor);
        }
    }

    /// Runs `visitor` from an arbitrary node.
    #[instrument(level = "debug", skip(self, visitor))]
    pub fn accept_at<V: NodeVisitor + ?Sized>(
        &self,
        idx: NodeId,
        visitor: &mut V,
    ) -> DomainResult<()> {
        self.slot(idx)?.node.accept(self, visitor);
        Ok(())
    }

    /// Pre-order iterator starting at the root.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Pre-order iterator over the subtree rooted at `idx`.
    #[instrument(level = "trace", skip(self))]
    pub fn iter_from(&self, idx: NodeId) -> PreOrderIter<'_> {
        PreOrderIter::from_node(self, idx)
    }

    /// Depth in edges of the deepest node below the root.
    #[instrument(level = "debug", skip(self))]
    pub fn max_depth(&self) -> usize {
        let mut visitor = DepthVisitor::new();
        self.accept(&mut visitor);
        visitor.max_depth()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn leaf_count(&self) -> usize {
        let mut visitor = CountLeavesVisitor::new();
        self.accept(&mut visitor);
        visitor.count()
    }

    fn slot(&self, idx: NodeId) -> DomainResult<&TreeNode> {
        self.arena.get(idx).ok_or(DomainError::NodeNotFound(idx))
    }

    fn name_of(&self, idx: NodeId) -> String {
        self.get_node(idx)
            .map(|node| node.name().to_string())
            .unwrap_or_else(|| format!("{idx:?}"))
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, idx: NodeId) -> bool {
        let mut current = Some(idx);
        while let Some(node_idx) = current {
            if node_idx == ancestor {
                return true;
            }
            current = self.parent(node_idx);
        }
        false
    }

    fn release_subtree(&mut self, idx: NodeId) -> usize {
        let doomed: Vec<NodeId> = self.iter_from(idx).map(|(node_idx, _)| node_idx).collect();
        for node_idx in &doomed {
            self.arena.remove(*node_idx);
        }
        doomed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::{DecisionNode, LeafNode};

    fn small_tree() -> (DecisionTree, NodeId, NodeId, NodeId) {
        let mut tree = DecisionTree::new();
        let root = tree.insert_root(DecisionNode::new("root", "x <= 1"));
        let inner = tree.attach(root, DecisionNode::new("inner", "y > 2")).unwrap();
        let leaf = tree.attach(inner, LeafNode::new("leaf", "Class A")).unwrap();
        (tree, root, inner, leaf)
    }

    #[test]
    fn given_child_of_other_parent_when_adding_then_already_attached() {
        let (mut tree, root, _inner, leaf) = small_tree();

        let result = tree.add_child(root, leaf);

        assert_eq!(result, Err(DomainError::AlreadyAttached("leaf".into())));
        assert_eq!(tree.get_children(root).unwrap().len(), 1);
    }

    #[test]
    fn given_ancestor_when_adding_below_descendant_then_cycle_detected() {
        let (mut tree, root, inner, _leaf) = small_tree();
        tree.remove_child(root, inner).unwrap();
        let below = tree.attach(inner, DecisionNode::new("below", "z")).unwrap();

        let result = tree.add_child(below, inner);

        assert!(matches!(result, Err(DomainError::CycleDetected { .. })));
    }

    #[test]
    fn given_decision_node_when_adding_itself_then_cycle_detected() {
        let mut tree = DecisionTree::new();
        let lonely = tree.insert(DecisionNode::new("lonely", "c"));

        let result = tree.add_child(lonely, lonely);

        assert!(matches!(result, Err(DomainError::CycleDetected { .. })));
    }

    #[test]
    fn given_root_when_adding_under_detached_node_then_already_attached() {
        let (mut tree, root, _, _) = small_tree();
        let detached = tree.insert(DecisionNode::new("detached", "c"));

        let result = tree.add_child(detached, root);

        assert_eq!(result, Err(DomainError::AlreadyAttached("root".into())));
    }

    #[test]
    fn given_subtree_when_discarding_then_handles_go_stale() {
        let (mut tree, root, inner, leaf) = small_tree();

        let released = tree.discard(inner).unwrap();

        assert_eq!(released, 2);
        assert_eq!(tree.len(), 1);
        assert!(tree.get_node(inner).is_none());
        assert!(tree.get_node(leaf).is_none());
        assert!(tree.get_children(root).unwrap().is_empty());
        assert_eq!(tree.get_children(leaf), Err(DomainError::NodeNotFound(leaf)));
    }

    #[test]
    fn given_root_when_discarding_then_tree_is_empty() {
        let (mut tree, root, _, _) = small_tree();

        assert_eq!(tree.discard(root).unwrap(), 3);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn given_existing_root_when_inserting_new_root_then_old_subtree_released() {
        let (mut tree, old_root, _, _) = small_tree();

        let new_root = tree.insert_root(LeafNode::new("solo", "Class Z"));

        assert_eq!(tree.root(), Some(new_root));
        assert_eq!(tree.len(), 1);
        assert!(tree.get_node(old_root).is_none());
    }

    #[test]
    fn given_name_when_finding_then_returns_first_preorder_match() {
        let (tree, _, inner, _) = small_tree();

        assert_eq!(tree.find("inner"), Some(inner));
        assert_eq!(tree.find("missing"), None);
        assert_eq!(tree.parent(inner), tree.root());
    }
}
