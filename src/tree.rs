//! Arena-backed search tree mirroring an algorithm's exploration.
//!
//! Nodes are addressed by [`NodeId`] indices into the arena; each node keeps
//! its parent index and an ordered list of child indices, so parent/child are
//! plain index relations and the arena is the single owner. A node's position
//! among its siblings is stable once set: children are only appended, and
//! removed only when the addition that created them is undone.
//!
//! Replacing the root (an IDDFS pass restart) leaves the detached subtree in
//! the arena so the replacement can be reversed; slots are only vacated by
//! [`SearchTree::remove_leaf`] and reclaimed wholesale by
//! [`SearchTree::clear`].
//!
//! Change notification is a monotonic [`revision`](SearchTree::revision)
//! counter bumped on every structural or attribute mutation; rendering layers
//! poll it instead of subscribing to events.

use std::rc::Rc;

use crate::{Error, Result, puzzle::PuzzleState, types::NodeKind};

/// Index of a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node {
    state: Rc<PuzzleState>,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The search tree: an arena of nodes plus the current root reference.
#[derive(Debug, Default)]
pub struct SearchTree {
    slots: Vec<Option<Node>>,
    root: Option<NodeId>,
    revision: u64,
}

impl SearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current root node, if the tree is non-empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Replace the root reference. The previous root's subtree stays in the
    /// arena (unreachable from the new root) so the swap can be undone.
    pub fn set_root(&mut self, root: Option<NodeId>) -> Result<()> {
        if let Some(id) = root {
            self.node(id)?;
        }
        self.root = root;
        self.revision += 1;
        Ok(())
    }

    /// Create a node for `state` and, when a parent is given, append it to
    /// the parent's child sequence. A parentless node is detached until the
    /// caller makes it the root.
    pub fn insert(
        &mut self,
        state: Rc<PuzzleState>,
        kind: NodeKind,
        parent: Option<NodeId>,
    ) -> Result<NodeId> {
        if let Some(parent_id) = parent {
            self.node(parent_id)?;
        }
        let id = NodeId(self.slots.len());
        self.slots.push(Some(Node {
            state,
            kind,
            parent,
            children: Vec::new(),
        }));
        if let Some(parent_id) = parent {
            self.node_mut(parent_id)?.children.push(id);
        }
        self.revision += 1;
        Ok(id)
    }

    /// Remove a childless node, detaching it from its parent and vacating
    /// its arena slot.
    pub fn remove_leaf(&mut self, id: NodeId) -> Result<()> {
        let node = self.node(id)?;
        if !node.children.is_empty() {
            return Err(Error::NodeHasChildren { index: id.index() });
        }
        let parent = node.parent;
        if let Some(parent_id) = parent {
            let children = &mut self.node_mut(parent_id)?.children;
            children.retain(|&child| child != id);
        }
        if self.root == Some(id) {
            self.root = None;
        }
        self.slots[id.index()] = None;
        self.revision += 1;
        Ok(())
    }

    /// Drop every node and the root reference.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.root = None;
        self.revision += 1;
    }

    /// Monotonic change counter; bumps on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn state(&self, id: NodeId) -> Result<&Rc<PuzzleState>> {
        Ok(&self.node(id)?.state)
    }

    pub fn kind(&self, id: NodeId) -> Result<NodeKind> {
        Ok(self.node(id)?.kind)
    }

    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) -> Result<NodeKind> {
        let node = self.node_mut(id)?;
        let previous = node.kind;
        node.kind = kind;
        self.revision += 1;
        Ok(previous)
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    pub fn child_count(&self, id: NodeId) -> Result<usize> {
        Ok(self.node(id)?.children.len())
    }

    pub fn child_at(&self, id: NodeId, index: usize) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.children.get(index).copied())
    }

    pub fn index_of_child(&self, parent: NodeId, child: NodeId) -> Result<Option<usize>> {
        Ok(self.node(parent)?.children.iter().position(|&c| c == child))
    }

    pub fn is_leaf(&self, id: NodeId) -> Result<bool> {
        Ok(self.node(id)?.children.is_empty())
    }

    pub fn left_sibling(&self, id: NodeId) -> Result<Option<NodeId>> {
        self.sibling(id, |index| index.checked_sub(1))
    }

    pub fn right_sibling(&self, id: NodeId) -> Result<Option<NodeId>> {
        self.sibling(id, |index| index.checked_add(1))
    }

    fn sibling(
        &self,
        id: NodeId,
        step: impl Fn(usize) -> Option<usize>,
    ) -> Result<Option<NodeId>> {
        let Some(parent_id) = self.node(id)?.parent else {
            return Ok(None);
        };
        let children = &self.node(parent_id)?.children;
        let Some(index) = children.iter().position(|&c| c == id) else {
            return Ok(None);
        };
        Ok(step(index).and_then(|i| children.get(i).copied()))
    }

    /// Iterate over all occupied node ids, including subtrees detached by a
    /// root replacement.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|_| NodeId(index)))
    }

    /// Number of occupied arena slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.slots
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(Error::UnknownNode { index: id.index() })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownNode { index: id.index() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rc_state(tiles: [u8; 9]) -> Rc<PuzzleState> {
        Rc::new(PuzzleState::from_tiles(tiles).unwrap())
    }

    fn small_tree() -> (SearchTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = SearchTree::new();
        let root = tree
            .insert(rc_state([0, 2, 3, 1, 4, 5, 8, 7, 6]), NodeKind::Normal, None)
            .unwrap();
        tree.set_root(Some(root)).unwrap();
        let a = tree
            .insert(rc_state([2, 0, 3, 1, 4, 5, 8, 7, 6]), NodeKind::Normal, Some(root))
            .unwrap();
        let b = tree
            .insert(rc_state([1, 2, 3, 0, 4, 5, 8, 7, 6]), NodeKind::Normal, Some(root))
            .unwrap();
        let c = tree
            .insert(rc_state([2, 3, 0, 1, 4, 5, 8, 7, 6]), NodeKind::Normal, Some(a))
            .unwrap();
        (tree, root, a, b, c)
    }

    #[test]
    fn navigation_matches_insertion_order() {
        let (tree, root, a, b, c) = small_tree();
        assert_eq!(tree.child_count(root).unwrap(), 2);
        assert_eq!(tree.child_at(root, 0).unwrap(), Some(a));
        assert_eq!(tree.child_at(root, 1).unwrap(), Some(b));
        assert_eq!(tree.index_of_child(root, b).unwrap(), Some(1));
        assert_eq!(tree.left_sibling(b).unwrap(), Some(a));
        assert_eq!(tree.right_sibling(a).unwrap(), Some(b));
        assert_eq!(tree.left_sibling(a).unwrap(), None);
        assert_eq!(tree.right_sibling(b).unwrap(), None);
        assert_eq!(tree.left_sibling(root).unwrap(), None);
        assert_eq!(tree.parent(c).unwrap(), Some(a));
        assert!(tree.is_leaf(c).unwrap());
        assert!(!tree.is_leaf(root).unwrap());
    }

    #[test]
    fn remove_leaf_detaches_and_vacates() {
        let (mut tree, root, a, b, _c) = small_tree();
        assert!(matches!(
            tree.remove_leaf(a),
            Err(Error::NodeHasChildren { .. })
        ));
        tree.remove_leaf(b).unwrap();
        assert_eq!(tree.child_count(root).unwrap(), 1);
        assert!(matches!(tree.kind(b), Err(Error::UnknownNode { .. })));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn root_replacement_keeps_the_old_subtree() {
        let (mut tree, root, ..) = small_tree();
        let replacement = tree
            .insert(rc_state([0, 2, 3, 1, 4, 5, 8, 7, 6]), NodeKind::Normal, None)
            .unwrap();
        tree.set_root(Some(replacement)).unwrap();
        assert_eq!(tree.root(), Some(replacement));
        // Old nodes survive for undo.
        assert_eq!(tree.kind(root).unwrap(), NodeKind::Normal);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn mutations_bump_the_revision() {
        let (mut tree, root, a, ..) = small_tree();
        let before = tree.revision();
        tree.set_kind(a, NodeKind::Explored).unwrap();
        assert!(tree.revision() > before);
        let before = tree.revision();
        tree.set_root(Some(root)).unwrap();
        assert!(tree.revision() > before);
        let before = tree.revision();
        tree.clear();
        assert!(tree.revision() > before);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }
}
