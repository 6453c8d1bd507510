//! The grouped usage tree.
//!
//! A [`GroupTree`] owns every node in a flat arena. Nodes refer to each other
//! through [`NodeId`] indices: each node owns the ordered list of its
//! children's ids, and the parent id is a plain back-reference used only for
//! navigation.
//!
//! # Structure
//!
//! - The root is always [`NodeId`] 0 and has no label.
//! - Group nodes carry a [`Dimension`] and one [`Label`] segment. Under a given
//!   parent there is at most one group per `(dimension, label)` pair.
//! - Leaf nodes borrow exactly one [`Occurrence`] from the caller's input.
//!
//! Every node's occurrence count is kept up to date while leaves are
//! inserted, so [`GroupTree::occurrence_count`] is a field read.

use std::collections::HashMap;

use usage_view_core::{dimension::Dimension, label::Label, occurrence::Occurrence};

/// Index of a node within its [`GroupTree`].
///
/// Ids are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'o> {
    Root,
    Group { dimension: Dimension, label: Label },
    Leaf(&'o Occurrence),
}

/// A single node of a [`GroupTree`].
#[derive(Debug)]
pub struct Node<'o> {
    kind: NodeKind<'o>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    occurrence_count: usize,
}

impl<'o> Node<'o> {
    fn new(kind: NodeKind<'o>, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            occurrence_count: 0,
        }
    }

    pub fn kind(&self) -> NodeKind<'o> {
        self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn occurrence_count(&self) -> usize {
        self.occurrence_count
    }
}

/// Lookup key for an existing group under a parent.
type GroupKey = (NodeId, Dimension, Label);

/// Sibling sort key used by [`GroupTree::sort_alphabetically`].
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SiblingKey {
    Group { folded: String, exact: String },
    Leaf { line: u32 },
}

/// Grouped occurrences, borrowed from the caller for `'o`.
#[derive(Debug)]
pub struct GroupTree<'o> {
    nodes: Vec<Node<'o>>,
    groups: HashMap<GroupKey, NodeId>,
}

impl Default for GroupTree<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'o> GroupTree<'o> {
    /// Creates a tree holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root, None)],
            groups: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node<'o> {
        &self.nodes[id.0]
    }

    /// Returns the ordered children of `id`.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Number of occurrences at or below `id`.
    pub fn occurrence_count(&self, id: NodeId) -> usize {
        self.node(id).occurrence_count
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Leaf(_))
    }

    /// Returns the occurrence wrapped by a leaf, or `None` for other nodes.
    pub fn occurrence(&self, id: NodeId) -> Option<&'o Occurrence> {
        match self.node(id).kind {
            NodeKind::Leaf(occurrence) => Some(occurrence),
            _ => None,
        }
    }

    /// Returns the label of a group node.
    pub fn label(&self, id: NodeId) -> Option<Label> {
        match self.node(id).kind {
            NodeKind::Group { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Returns the dimension of a group node.
    pub fn dimension(&self, id: NodeId) -> Option<Dimension> {
        match self.node(id).kind {
            NodeKind::Group { dimension, .. } => Some(dimension),
            _ => None,
        }
    }

    /// Finds the group for `(dimension, label)` directly under `parent`.
    pub fn find_group(
        &self,
        parent: NodeId,
        dimension: Dimension,
        label: impl Into<Label>,
    ) -> Option<NodeId> {
        self.groups.get(&(parent, dimension, label.into())).copied()
    }

    /// Follows a chain of group labels from the root, ignoring dimensions.
    ///
    /// Returns the first matching child at each step. Mostly useful for
    /// tests and lookups by displayed path.
    pub fn find_path<S: AsRef<str>>(&self, labels: &[S]) -> Option<NodeId> {
        labels.iter().try_fold(self.root(), |current, wanted| {
            self.children(current)
                .iter()
                .copied()
                .find(|&child| {
                    self.label(child)
                        .is_some_and(|label| label == wanted.as_ref())
                })
        })
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when no occurrence has been inserted.
    pub fn is_empty(&self) -> bool {
        self.occurrence_count(self.root()) == 0
    }

    /// Iterates all node ids in depth-first pre-order.
    pub fn depth_first(&self) -> DepthFirst<'_, 'o> {
        DepthFirst {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// Iterates the leaves in depth-first order.
    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &'o Occurrence)> + '_ {
        self.depth_first()
            .filter_map(|id| self.occurrence(id).map(|occurrence| (id, occurrence)))
    }

    /// Returns the group for `(dimension, label)` under `parent`, creating it
    /// at the end of the parent's children if absent.
    pub(crate) fn group_child(&mut self, parent: NodeId, dimension: Dimension, label: Label) -> NodeId {
        if let Some(&existing) = self.groups.get(&(parent, dimension, label)) {
            return existing;
        }

        let id = self.push(parent, NodeKind::Group { dimension, label });
        self.groups.insert((parent, dimension, label), id);
        id
    }

    /// Appends a leaf for `occurrence` under `parent` and bumps the count of
    /// every node from `parent` up to the root.
    pub(crate) fn add_leaf(&mut self, parent: NodeId, occurrence: &'o Occurrence) -> NodeId {
        let id = self.push(parent, NodeKind::Leaf(occurrence));
        self.nodes[id.0].occurrence_count = 1;

        let mut current = Some(parent);
        while let Some(ancestor) = current {
            let node = &mut self.nodes[ancestor.0];
            node.occurrence_count += 1;
            current = node.parent;
        }
        id
    }

    /// Reorders every child list: groups first, by case-insensitive label
    /// then exact label, followed by leaves by line number. Ties keep their
    /// encounter order.
    pub(crate) fn sort_alphabetically(&mut self) {
        for index in 0..self.nodes.len() {
            let mut children = std::mem::take(&mut self.nodes[index].children);
            children.sort_by_cached_key(|&child| self.sibling_key(child));
            self.nodes[index].children = children;
        }
    }

    fn sibling_key(&self, id: NodeId) -> SiblingKey {
        match self.node(id).kind {
            NodeKind::Leaf(occurrence) => SiblingKey::Leaf {
                line: occurrence.item().line(),
            },
            NodeKind::Group { label, .. } => {
                let exact = label.as_string();
                SiblingKey::Group {
                    folded: exact.to_lowercase(),
                    exact,
                }
            }
            NodeKind::Root => SiblingKey::Leaf { line: 0 },
        }
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind<'o>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }
}

/// Depth-first pre-order iterator over a [`GroupTree`].
#[derive(Debug)]
pub struct DepthFirst<'t, 'o> {
    tree: &'t GroupTree<'o>,
    stack: Vec<NodeId>,
}

impl Iterator for DepthFirst<'_, '_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use usage_view_core::occurrence::{LocatedItem, OccurrenceId};

    use super::*;

    fn occurrence(id: usize, line: u32) -> Occurrence {
        Occurrence::new(OccurrenceId::new(id), LocatedItem::new("a/B.txt", line, "text"))
    }

    #[test]
    fn test_new_tree() {
        let tree = GroupTree::new();

        assert_eq!(tree.len(), 1);
        assert!(tree.is_empty());
        assert_eq!(tree.node(tree.root()).kind(), NodeKind::Root);
        assert_eq!(tree.parent(tree.root()), None);
        assert!(tree.children(tree.root()).is_empty());
    }

    #[test]
    fn test_group_child_reuses_existing() {
        let mut tree = GroupTree::new();
        let root = tree.root();

        let first = tree.group_child(root, Dimension::Module, Label::new("main"));
        let second = tree.group_child(root, Dimension::Module, Label::new("main"));
        let other_dimension = tree.group_child(root, Dimension::Package, Label::new("main"));

        assert_eq!(first, second);
        assert_ne!(first, other_dimension);
        assert_eq!(tree.children(root), &[first, other_dimension]);
        assert_eq!(tree.find_group(root, Dimension::Module, "main"), Some(first));
        assert_eq!(tree.find_group(root, Dimension::File, "main"), None);
    }

    #[test]
    fn test_same_label_under_different_parents() {
        let mut tree = GroupTree::new();
        let root = tree.root();

        let a = tree.group_child(root, Dimension::Module, Label::new("a"));
        let b = tree.group_child(root, Dimension::Module, Label::new("b"));
        let under_a = tree.group_child(a, Dimension::File, Label::new("X.txt"));
        let under_b = tree.group_child(b, Dimension::File, Label::new("X.txt"));

        assert_ne!(under_a, under_b);
        assert_eq!(tree.parent(under_a), Some(a));
        assert_eq!(tree.parent(under_b), Some(b));
    }

    #[test]
    fn test_add_leaf_updates_ancestor_counts() {
        let first = occurrence(0, 1);
        let second = occurrence(1, 2);
        let mut tree = GroupTree::new();
        let root = tree.root();
        let module = tree.group_child(root, Dimension::Module, Label::new("main"));
        let file = tree.group_child(module, Dimension::File, Label::new("B.txt"));

        let leaf = tree.add_leaf(file, &first);
        tree.add_leaf(module, &second);

        assert!(tree.is_leaf(leaf));
        assert_eq!(tree.occurrence(leaf), Some(&first));
        assert_eq!(tree.occurrence_count(leaf), 1);
        assert_eq!(tree.occurrence_count(file), 1);
        assert_eq!(tree.occurrence_count(module), 2);
        assert_eq!(tree.occurrence_count(root), 2);
        assert_eq!(tree.occurrence(module), None);
        assert_eq!(tree.label(module), Some(Label::new("main")));
        assert_eq!(tree.dimension(file), Some(Dimension::File));
    }

    #[test]
    fn test_depth_first_order() {
        let first = occurrence(0, 1);
        let second = occurrence(1, 2);
        let mut tree = GroupTree::new();
        let root = tree.root();
        let a = tree.group_child(root, Dimension::Module, Label::new("a"));
        let b = tree.group_child(root, Dimension::Module, Label::new("b"));
        let leaf_b = tree.add_leaf(b, &second);
        let leaf_a = tree.add_leaf(a, &first);

        let order: Vec<_> = tree.depth_first().collect();
        assert_eq!(order, vec![root, a, leaf_a, b, leaf_b]);

        let leaves: Vec<_> = tree.leaves().map(|(_, occurrence)| occurrence.id()).collect();
        assert_eq!(leaves, vec![OccurrenceId::new(0), OccurrenceId::new(1)]);
    }

    #[test]
    fn test_find_path() {
        let mut tree = GroupTree::new();
        let root = tree.root();
        let xxx = tree.group_child(root, Dimension::Module, Label::new("xxx"));
        let main = tree.group_child(xxx, Dimension::Module, Label::new("main"));

        assert_eq!(tree.find_path(&["xxx", "main"]), Some(main));
        assert_eq!(tree.find_path::<&str>(&[]), Some(root));
        assert_eq!(tree.find_path(&["main"]), None);
    }

    #[test]
    fn test_sort_alphabetically() {
        let late = occurrence(0, 9);
        let early = occurrence(1, 3);
        let mut tree = GroupTree::new();
        let root = tree.root();
        tree.add_leaf(root, &late);
        let beta = tree.group_child(root, Dimension::Module, Label::new("beta"));
        let upper = tree.group_child(root, Dimension::Module, Label::new("Alpha"));
        let lower = tree.group_child(root, Dimension::Package, Label::new("alpha"));
        tree.add_leaf(root, &early);

        tree.sort_alphabetically();

        let children = tree.children(root);
        assert_eq!(&children[..3], &[upper, lower, beta]);
        assert_eq!(tree.occurrence(children[3]), Some(&early));
        assert_eq!(tree.occurrence(children[4]), Some(&late));
        assert_eq!(tree.occurrence_count(root), 2);
    }
}
