//! Usage View - groups found occurrences into configurable trees.
//!
//! Occurrences (search or usage results) are filed into a hierarchy along an
//! ordered list of grouping dimensions such as usage kind, module, package and
//! file. The resulting tree can be navigated and rendered as indented text.
//!
//! Data flows as occurrences + [`policy::GroupingPolicy`] →
//! [`TreeBuilder`] → [`tree::GroupTree`] → [`presenter::Presenter`] → text.

pub mod config;
pub mod expansion;
pub mod policy;
pub mod presenter;
pub mod settings;
pub mod tree;

mod builder;
mod error;

pub use usage_view_core::{dimension, label, occurrence, provider};

pub use builder::TreeBuilder;
pub use error::UsageViewError;

use log::{debug, info};

use config::AppConfig;
use expansion::ExpansionState;
use occurrence::Occurrence;
use policy::GroupingPolicy;
use presenter::Presenter;
use tree::GroupTree;

/// Builder for grouping and rendering usage trees.
///
/// This ties a [`GroupingPolicy`] and a [`Presenter`] to one configuration.
///
/// # Examples
///
/// ```rust
/// use usage_view::{
///     UsageViewBuilder,
///     config::{AppConfig, ViewSettings},
///     occurrence::{LocatedItem, Occurrence, OccurrenceId, UsageKind},
/// };
///
/// let occurrences = vec![
///     Occurrence::new(OccurrenceId::new(0), LocatedItem::new("main/A.txt", 1, "hello"))
///         .with_kind(UsageKind::NonCode)
///         .with_module("main"),
/// ];
///
/// let grouping = ViewSettings {
///     group_by_usage_type: false,
///     group_by_package: false,
///     group_by_file_structure: false,
///     ..ViewSettings::default()
/// };
/// let config = AppConfig::new(grouping, Default::default());
/// let builder = UsageViewBuilder::new(config).expect("valid grouping order");
///
/// let tree = builder.build(&occurrences);
/// assert_eq!(
///     builder.render_text(&tree),
///     "Usage (1 usage)\n Non-code usages (1 usage)\n  main (1 usage)\n   A.txt (1 usage)\n    1hello\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct UsageViewBuilder {
    config: AppConfig,
    policy: GroupingPolicy,
    presenter: Presenter,
}

impl Default for UsageViewBuilder {
    fn default() -> Self {
        Self::with_policy(AppConfig::default(), GroupingPolicy::default())
    }
}

impl UsageViewBuilder {
    /// Create a new usage view builder with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UsageViewError::Policy`] if the configured dimension order
    /// names an unknown dimension or repeats one.
    pub fn new(config: AppConfig) -> Result<Self, UsageViewError> {
        let policy = GroupingPolicy::from_settings(config.grouping())?;
        Ok(Self::with_policy(config, policy))
    }

    /// Create a builder with an explicit policy, ignoring the grouping
    /// section of `config`.
    pub fn with_policy(config: AppConfig, policy: GroupingPolicy) -> Self {
        let presenter = Presenter::new(config.presentation().root_label());
        Self {
            config,
            policy,
            presenter,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn policy(&self) -> &GroupingPolicy {
        &self.policy
    }

    /// Group `occurrences` into a new tree.
    ///
    /// Every call produces a fresh tree; nothing is shared with earlier builds.
    pub fn build<'o, I>(&self, occurrences: I) -> GroupTree<'o>
    where
        I: IntoIterator<Item = &'o Occurrence>,
    {
        TreeBuilder::new(&self.policy).build(occurrences)
    }

    /// The expansion state the configuration asks for.
    pub fn initial_expansion(&self) -> ExpansionState {
        if self.config.presentation().expand_all() {
            ExpansionState::expanded()
        } else {
            ExpansionState::collapsed()
        }
    }

    /// Render `tree` using the configured initial expansion.
    pub fn render_text(&self, tree: &GroupTree<'_>) -> String {
        self.render_with(tree, &self.initial_expansion())
    }

    /// Render `tree` with an explicit expansion state.
    pub fn render_with(&self, tree: &GroupTree<'_>, expansion: &ExpansionState) -> String {
        info!(nodes = tree.len(); "Rendering usage tree");
        let text = self.presenter.render(tree, expansion);
        debug!(bytes = text.len(); "Usage tree rendered");
        text
    }
}
