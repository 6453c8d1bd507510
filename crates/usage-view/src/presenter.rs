//! Canonical text rendering of usage trees.
//!
//! The [`Presenter`] walks a [`GroupTree`] depth-first in pre-order and emits
//! one line per visible node:
//!
//! - groups print `<label> (N usage)` or `<label> (N usages)`;
//! - the root prints the configured root label the same way;
//! - leaves print the line number immediately followed by the line text;
//! - each level below the root adds one leading space.
//!
//! Children of a collapsed node are omitted. The same tree and expansion
//! state always render to the same bytes.
//!
//! # Example
//!
//! ```
//! use usage_view::{
//!     expansion::ExpansionState,
//!     occurrence::{LocatedItem, Occurrence, OccurrenceId},
//!     policy::GroupingPolicy,
//!     presenter::Presenter,
//!     TreeBuilder,
//! };
//!
//! let occurrences = vec![Occurrence::new(OccurrenceId::new(0), LocatedItem::new("A.txt", 3, "hello"))];
//! let mut policy = GroupingPolicy::default();
//! policy.enable_dimension(usage_view::dimension::Dimension::UsageKind, false);
//!
//! let tree = TreeBuilder::new(&policy).build(&occurrences);
//! let text = Presenter::new("Usage").render(&tree, &ExpansionState::expanded());
//! assert_eq!(text, "Usage (1 usage)\n A.txt (1 usage)\n  3hello\n");
//! ```

use usage_view_core::occurrence::Occurrence;

use crate::{
    expansion::ExpansionState,
    tree::{GroupTree, NodeId, NodeKind},
};

/// Line number and text shown for a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafText {
    pub line: u32,
    pub text: String,
}

/// Supplies the display line number and content for an occurrence.
pub trait LeafTextProvider {
    fn leaf_text(&self, occurrence: &Occurrence) -> LeafText;
}

/// Reads the line number and text stored on the occurrence itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineText;

impl LeafTextProvider for InlineText {
    fn leaf_text(&self, occurrence: &Occurrence) -> LeafText {
        LeafText {
            line: occurrence.item().line(),
            text: occurrence.item().text().to_string(),
        }
    }
}

/// Renders trees to indented text.
#[derive(Debug, Clone)]
pub struct Presenter<P = InlineText> {
    root_label: String,
    text_provider: P,
}

impl Presenter {
    /// Creates a presenter that reads leaf text from the occurrences.
    pub fn new(root_label: impl Into<String>) -> Self {
        Self::with_text_provider(root_label, InlineText)
    }
}

impl<P: LeafTextProvider> Presenter<P> {
    pub fn with_text_provider(root_label: impl Into<String>, text_provider: P) -> Self {
        Self {
            root_label: root_label.into(),
            text_provider,
        }
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    /// Renders the visible part of `tree`.
    pub fn render(&self, tree: &GroupTree<'_>, expansion: &ExpansionState) -> String {
        let mut out = String::new();
        self.render_node(tree, expansion, tree.root(), 0, &mut out);
        out
    }

    /// Returns the text of a single node, without indentation or newline.
    pub fn node_text(&self, tree: &GroupTree<'_>, node: NodeId) -> String {
        match tree.node(node).kind() {
            NodeKind::Root => counted(&self.root_label, tree.occurrence_count(node)),
            NodeKind::Group { label, .. } => {
                label.with_str(|label| counted(label, tree.occurrence_count(node)))
            }
            NodeKind::Leaf(occurrence) => {
                let LeafText { line, text } = self.text_provider.leaf_text(occurrence);
                format!("{line}{}", first_line(&text))
            }
        }
    }

    fn render_node(
        &self,
        tree: &GroupTree<'_>,
        expansion: &ExpansionState,
        node: NodeId,
        depth: usize,
        out: &mut String,
    ) {
        out.extend(std::iter::repeat_n(' ', depth));
        out.push_str(&self.node_text(tree, node));
        out.push('\n');

        if !expansion.is_expanded(node) {
            return;
        }
        for &child in tree.children(node) {
            self.render_node(tree, expansion, child, depth + 1, out);
        }
    }
}

/// Formats `label (N usage)` / `label (N usages)`.
fn counted(label: &str, count: usize) -> String {
    let noun = if count == 1 { "usage" } else { "usages" };
    format!("{label} ({count} {noun})")
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use usage_view_core::{
        dimension::Dimension,
        label::Label,
        occurrence::{LocatedItem, OccurrenceId},
    };

    use super::*;

    struct FixedText;

    impl LeafTextProvider for FixedText {
        fn leaf_text(&self, occurrence: &Occurrence) -> LeafText {
            LeafText {
                line: occurrence.id().get() as u32 + 100,
                text: "fixed".to_string(),
            }
        }
    }

    fn occurrence(id: usize, text: &str) -> Occurrence {
        Occurrence::new(OccurrenceId::new(id), LocatedItem::new("main/A.txt", 1, text))
    }

    #[test]
    fn test_counted() {
        assert_eq!(counted("main", 1), "main (1 usage)");
        assert_eq!(counted("main", 2), "main (2 usages)");
        assert_eq!(counted("Usage", 0), "Usage (0 usages)");
    }

    #[test]
    fn test_empty_tree() {
        let tree = GroupTree::new();
        let text = Presenter::new("Usage").render(&tree, &ExpansionState::expanded());

        assert_eq!(text, "Usage (0 usages)\n");
    }

    #[test]
    fn test_render_groups_and_leaves() {
        let first = occurrence(0, "hello");
        let second = occurrence(1, "world\nsecond line");
        let mut tree = GroupTree::new();
        let module = tree.group_child(tree.root(), Dimension::Module, Label::new("main"));
        tree.add_leaf(module, &first);
        tree.add_leaf(module, &second);

        let text = Presenter::new("Usage").render(&tree, &ExpansionState::expanded());

        assert_eq!(text, "Usage (2 usages)\n main (2 usages)\n  1hello\n  1world\n");
    }

    #[test]
    fn test_collapsed_subtree_is_omitted() {
        let first = occurrence(0, "hello");
        let mut tree = GroupTree::new();
        let module = tree.group_child(tree.root(), Dimension::Module, Label::new("main"));
        tree.add_leaf(module, &first);
        let mut expansion = ExpansionState::expanded();
        expansion.collapse(module);

        let presenter = Presenter::new("Usage");

        assert_eq!(
            presenter.render(&tree, &expansion),
            "Usage (1 usage)\n main (1 usage)\n"
        );
        assert_eq!(
            presenter.render(&tree, &ExpansionState::collapsed()),
            "Usage (1 usage)\n"
        );
        assert_eq!(tree.occurrence_count(module), 1);
    }

    #[test]
    fn test_custom_text_provider() {
        let first = occurrence(7, "ignored");
        let mut tree = GroupTree::new();
        tree.add_leaf(tree.root(), &first);

        let text = Presenter::with_text_provider("Found", FixedText)
            .render(&tree, &ExpansionState::expanded());

        assert_eq!(text, "Found (1 usage)\n 107fixed\n");
    }

    #[test]
    fn test_render_is_deterministic() {
        let first = occurrence(0, "hello");
        let mut tree = GroupTree::new();
        let module = tree.group_child(tree.root(), Dimension::Module, Label::new("main"));
        tree.add_leaf(module, &first);
        let presenter = Presenter::new("Usage");
        let expansion = ExpansionState::expanded();

        assert_eq!(
            presenter.render(&tree, &expansion),
            presenter.render(&tree, &expansion)
        );
    }
}
