//! Configuration types for the usage view.
//!
//! This module provides configuration structures that control how occurrences
//! are grouped and how trees are presented. All types implement
//! [`serde::Deserialize`] and [`serde::Serialize`] so they can be loaded from
//! and written back to external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining grouping and presentation settings.
//! - [`ViewSettings`] - Which dimensions group occurrences, in what order, with which options.
//! - [`PresentationConfig`] - Root label and initial expansion of rendered trees.
//!
//! # Example
//!
//! ```
//! # use usage_view::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.presentation().root_label(), "Usage");
//! assert!(config.grouping().group_by_module);
//! ```

use serde::{Deserialize, Serialize};

pub use crate::settings::ViewSettings;

/// Top-level configuration combining grouping and presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Grouping configuration section.
    #[serde(default)]
    grouping: ViewSettings,

    /// Presentation configuration section.
    #[serde(default)]
    presentation: PresentationConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    ///
    /// # Arguments
    ///
    /// * `grouping` - Grouping dimensions and options.
    /// * `presentation` - Rendering options.
    pub fn new(grouping: ViewSettings, presentation: PresentationConfig) -> Self {
        Self {
            grouping,
            presentation,
        }
    }

    /// Returns the grouping configuration.
    pub fn grouping(&self) -> &ViewSettings {
        &self.grouping
    }

    /// Returns the grouping configuration for modification.
    pub fn grouping_mut(&mut self) -> &mut ViewSettings {
        &mut self.grouping
    }

    /// Returns the presentation configuration.
    pub fn presentation(&self) -> &PresentationConfig {
        &self.presentation
    }
}

/// How rendered trees look.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Text of the root line.
    root_label: String,

    /// Whether rendering starts with every node expanded.
    expand_all: bool,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            root_label: "Usage".to_string(),
            expand_all: true,
        }
    }
}

impl PresentationConfig {
    pub fn new(root_label: impl Into<String>, expand_all: bool) -> Self {
        Self {
            root_label: root_label.into(),
            expand_all,
        }
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    pub fn expand_all(&self) -> bool {
        self.expand_all
    }
}
