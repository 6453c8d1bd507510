//! Tree construction from occurrences and a grouping policy.
//!
//! [`TreeBuilder::build`] inserts occurrences one at a time in the order the
//! caller supplies them. For each occurrence it walks the enabled dimensions
//! of the policy, descending through (and creating as needed) one group per
//! label segment, then attaches a leaf to the deepest group reached.
//!
//! Building is total: a dimension that yields no labels is skipped, and an
//! occurrence no dimension applies to lands directly under the root.

use log::{debug, info, trace, warn};

use usage_view_core::{
    label::Label,
    occurrence::Occurrence,
    provider::{GroupKeyProvider, LabelPath},
};

use crate::{policy::GroupingPolicy, tree::GroupTree};

/// Joins the segments of a malformed path when the provider has no separator.
const FALLBACK_JOINER: char = '/';

/// Builds [`GroupTree`]s according to a [`GroupingPolicy`].
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder<'p> {
    policy: &'p GroupingPolicy,
}

impl<'p> TreeBuilder<'p> {
    pub fn new(policy: &'p GroupingPolicy) -> Self {
        Self { policy }
    }

    /// Groups `occurrences` into a new tree.
    ///
    /// The tree borrows the occurrences; every one of them ends up as exactly
    /// one leaf.
    pub fn build<'o, I>(&self, occurrences: I) -> GroupTree<'o>
    where
        I: IntoIterator<Item = &'o Occurrence>,
    {
        let providers = self.policy.providers();
        info!(dimensions = providers.len(); "Building usage tree");

        let mut tree = GroupTree::new();
        for occurrence in occurrences {
            let mut parent = tree.root();
            for provider in &providers {
                for label in label_path(provider.as_ref(), occurrence) {
                    parent = tree.group_child(parent, provider.dimension(), label);
                }
            }
            let leaf = tree.add_leaf(parent, occurrence);
            trace!(occurrence:% = occurrence.id(), leaf = leaf.index(); "Occurrence inserted");
        }

        if self.policy.sort_alphabetically() {
            tree.sort_alphabetically();
        }

        debug!(
            occurrences = tree.occurrence_count(tree.root()),
            nodes = tree.len();
            "Usage tree built"
        );
        tree
    }
}

/// Classifies `occurrence` and interns the resulting segments.
///
/// A path with no segments, or only empty ones, yields no labels. A path
/// with an empty segment, or with a segment containing the provider's
/// separator, is collapsed into a single segment.
fn label_path(provider: &dyn GroupKeyProvider, occurrence: &Occurrence) -> Vec<Label> {
    let path = provider.classify(occurrence);
    if path.iter().all(String::is_empty) {
        return Vec::new();
    }

    let separator = provider.separator();
    if !is_malformed(&path, separator) {
        return path.iter().map(|segment| Label::new(segment)).collect();
    }

    let joiner = separator.unwrap_or(FALLBACK_JOINER).to_string();
    let joined = path.join(joiner.as_str());
    warn!(
        dimension:% = provider.dimension(),
        occurrence:% = occurrence.id(),
        path:? = path;
        "Malformed group path, using it as a single segment"
    );

    vec![Label::new(&joined)]
}

fn is_malformed(path: &LabelPath, separator: Option<char>) -> bool {
    path.iter().any(|segment| {
        segment.is_empty() || separator.is_some_and(|separator| segment.contains(separator))
    })
}
