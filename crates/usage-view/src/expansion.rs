//! Presentation-only expand/collapse state.
//!
//! [`ExpansionState`] is a side map keyed by [`NodeId`]. It never touches the
//! tree, so toggling nodes cannot change counts or structure. The state is
//! tied to the ids of one tree; after a rebuild start from a fresh state.

use std::collections::HashMap;

use crate::tree::{GroupTree, NodeId};

/// Which nodes are expanded.
///
/// A node not mentioned explicitly follows the default, which is collapsed
/// for [`ExpansionState::collapsed`] and expanded after
/// [`ExpansionState::expand_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded_by_default: bool,
    overrides: HashMap<NodeId, bool>,
}

impl ExpansionState {
    /// Everything collapsed: only the root line is shown.
    pub fn collapsed() -> Self {
        Self::default()
    }

    /// Everything expanded.
    pub fn expanded() -> Self {
        Self {
            expanded_by_default: true,
            overrides: HashMap::new(),
        }
    }

    pub fn expand_all(&mut self) {
        self.expanded_by_default = true;
        self.overrides.clear();
    }

    pub fn collapse_all(&mut self) {
        self.expanded_by_default = false;
        self.overrides.clear();
    }

    pub fn expand(&mut self, node: NodeId) {
        self.overrides.insert(node, true);
    }

    pub fn collapse(&mut self, node: NodeId) {
        self.overrides.insert(node, false);
    }

    /// Expands `node` and all of its ancestors so it becomes visible.
    pub fn reveal(&mut self, tree: &GroupTree<'_>, node: NodeId) {
        let mut current = Some(node);
        while let Some(id) = current {
            self.expand(id);
            current = tree.parent(id);
        }
    }

    pub fn is_expanded(&self, node: NodeId) -> bool {
        self.overrides
            .get(&node)
            .copied()
            .unwrap_or(self.expanded_by_default)
    }
}
