//! Grouping policy: which dimensions are active and in what order.
//!
//! A [`GroupingPolicy`] is the contract that decides the shape of a usage
//! tree. It holds every [`Dimension`] exactly once, in nesting order, each
//! with an enabled flag, plus the [`GroupingOptions`] that tune individual
//! providers.
//!
//! Trees are never patched after a policy change; build a new one instead.
//!
//! # Example
//!
//! ```
//! use usage_view::{dimension::Dimension, policy::GroupingPolicy};
//!
//! let mut policy = GroupingPolicy::default();
//! policy.enable_dimension(Dimension::UsageType, false);
//! policy
//!     .set_dimension_order(&[Dimension::File, Dimension::Module])
//!     .unwrap();
//!
//! let enabled: Vec<_> = policy.enabled_dimensions().collect();
//! assert_eq!(enabled[0], Dimension::File);
//! assert_eq!(enabled[1], Dimension::Module);
//! assert!(!enabled.contains(&Dimension::UsageType));
//! ```

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use usage_view_core::{
    dimension::{Dimension, ParseDimensionError},
    provider::{GroupKeyProvider, GroupingOptions, provider_for},
};

use crate::settings::ViewSettings;

/// Errors raised while constructing or reordering a policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error(transparent)]
    UnknownDimension(#[from] ParseDimensionError),

    #[error("dimension `{0}` appears more than once in the grouping order")]
    DuplicateDimension(Dimension),
}

/// Ordered, toggleable list of grouping dimensions.
///
/// Two policies are equal only when they list the dimensions in the same
/// order with the same flags.
#[derive(Debug, Clone)]
pub struct GroupingPolicy {
    dimensions: IndexMap<Dimension, bool>,
    options: GroupingOptions,
    sort_alphabetically: bool,
}

impl PartialEq for GroupingPolicy {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality ignores entry order
        self.dimensions.iter().eq(other.dimensions.iter())
            && self.options == other.options
            && self.sort_alphabetically == other.sort_alphabetically
    }
}

impl Eq for GroupingPolicy {}

impl Default for GroupingPolicy {
    fn default() -> Self {
        let settings = ViewSettings::default();
        let dimensions = Dimension::ALL
            .into_iter()
            .map(|dimension| (dimension, settings.is_grouped_by(dimension)))
            .collect();

        Self {
            dimensions,
            options: settings.grouping_options(),
            sort_alphabetically: settings.sort_alphabetically,
        }
    }
}

impl GroupingPolicy {
    /// Builds a policy from a persisted settings snapshot.
    ///
    /// Dimensions missing from `settings.dimension_order` keep their default
    /// relative order after the listed ones.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] if the order names an unknown dimension or
    /// names a dimension twice.
    pub fn from_settings(settings: &ViewSettings) -> Result<Self, PolicyError> {
        let mut policy = Self {
            dimensions: Dimension::ALL
                .into_iter()
                .map(|dimension| (dimension, settings.is_grouped_by(dimension)))
                .collect(),
            options: settings.grouping_options(),
            sort_alphabetically: settings.sort_alphabetically,
        };

        if !settings.dimension_order.is_empty() {
            policy.set_dimension_order_by_name(&settings.dimension_order)?;
        }

        debug!(policy:?; "Grouping policy loaded from settings");
        Ok(policy)
    }

    /// Returns the settings snapshot equivalent to this policy.
    ///
    /// The snapshot always lists the full dimension order, so
    /// `GroupingPolicy::from_settings(&policy.to_settings())` reproduces the
    /// policy.
    pub fn to_settings(&self) -> ViewSettings {
        let mut settings = ViewSettings {
            flatten_modules: self.options.flatten_modules,
            qualified_module_names: self.options.qualified_module_names,
            flatten_packages: self.options.flatten_packages,
            sort_alphabetically: self.sort_alphabetically,
            dimension_order: self
                .dimensions
                .keys()
                .map(|dimension| dimension.name().to_string())
                .collect(),
            ..ViewSettings::default()
        };
        for (&dimension, &enabled) in &self.dimensions {
            settings.set_grouped_by(dimension, enabled);
        }
        settings
    }

    /// Turns grouping along `dimension` on or off.
    pub fn enable_dimension(&mut self, dimension: Dimension, enabled: bool) {
        self.dimensions.insert(dimension, enabled);
    }

    /// Returns `true` when `dimension` takes part in grouping.
    pub fn is_enabled(&self, dimension: Dimension) -> bool {
        self.dimensions.get(&dimension).copied().unwrap_or(false)
    }

    /// Moves the listed dimensions to the front, in the given order.
    ///
    /// Unlisted dimensions keep their current relative order after the listed
    /// ones. Enabled flags are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::DuplicateDimension`] if a dimension is listed
    /// more than once; the policy is left unchanged.
    pub fn set_dimension_order(&mut self, order: &[Dimension]) -> Result<(), PolicyError> {
        let mut reordered = IndexMap::with_capacity(self.dimensions.len());
        for &dimension in order {
            let enabled = self.is_enabled(dimension);
            if reordered.insert(dimension, enabled).is_some() {
                return Err(PolicyError::DuplicateDimension(dimension));
            }
        }
        for (&dimension, &enabled) in &self.dimensions {
            reordered.entry(dimension).or_insert(enabled);
        }

        self.dimensions = reordered;
        Ok(())
    }

    /// Same as [`set_dimension_order`](Self::set_dimension_order) but takes
    /// dimension names as used in settings files.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::UnknownDimension`] for a name that is not a
    /// dimension, or [`PolicyError::DuplicateDimension`] for repeats.
    pub fn set_dimension_order_by_name<S: AsRef<str>>(
        &mut self,
        names: &[S],
    ) -> Result<(), PolicyError> {
        let order = names
            .iter()
            .map(|name| name.as_ref().trim().parse::<Dimension>())
            .collect::<Result<Vec<_>, _>>()?;
        self.set_dimension_order(&order)
    }

    /// Iterates every dimension in order with its enabled flag.
    pub fn dimensions(&self) -> impl Iterator<Item = (Dimension, bool)> + '_ {
        self.dimensions
            .iter()
            .map(|(&dimension, &enabled)| (dimension, enabled))
    }

    /// Iterates the enabled dimensions in order.
    pub fn enabled_dimensions(&self) -> impl Iterator<Item = Dimension> + '_ {
        self.dimensions()
            .filter_map(|(dimension, enabled)| enabled.then_some(dimension))
    }

    pub fn options(&self) -> GroupingOptions {
        self.options
    }

    pub fn set_options(&mut self, options: GroupingOptions) {
        self.options = options;
    }

    pub fn sort_alphabetically(&self) -> bool {
        self.sort_alphabetically
    }

    pub fn set_sort_alphabetically(&mut self, sort: bool) {
        self.sort_alphabetically = sort;
    }

    /// Creates the providers for the enabled dimensions, in order.
    pub fn providers(&self) -> Vec<Box<dyn GroupKeyProvider>> {
        self.enabled_dimensions()
            .map(|dimension| provider_for(dimension, self.options))
            .collect()
    }
}
