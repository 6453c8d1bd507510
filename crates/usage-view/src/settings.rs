//! Persisted view settings and snapshot stores.
//!
//! [`ViewSettings`] is the flat table of flags a settings file holds. Missing
//! keys take their defaults and unknown keys are ignored, so older and newer
//! files keep loading.
//!
//! A [`SettingsStore`] exposes the current snapshot through `get`/`set`.
//! [`SettingsStore::scoped`] returns a [`SettingsGuard`] that puts the prior
//! snapshot back when it is dropped, including during a panic unwind.
//!
//! # Example
//!
//! ```
//! use usage_view::settings::{MemorySettings, SettingsStore, ViewSettings};
//!
//! let mut store = MemorySettings::default();
//! {
//!     let mut scoped = store.scoped();
//!     let mut settings = scoped.get();
//!     settings.group_by_package = false;
//!     scoped.set(settings);
//!     assert!(!scoped.get().group_by_package);
//! }
//! assert_eq!(store.get(), ViewSettings::default());
//! ```

use std::{
    ops::{Deref, DerefMut},
    sync::{Arc, RwLock},
};

use log::trace;
use serde::{Deserialize, Serialize};

use usage_view_core::{dimension::Dimension, provider::GroupingOptions};

use crate::policy::{GroupingPolicy, PolicyError};

/// Flat, persisted form of a grouping policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewSettings {
    pub group_by_usage_kind: bool,
    pub group_by_scope: bool,
    pub group_by_usage_type: bool,
    pub group_by_module: bool,
    pub group_by_package: bool,
    pub group_by_file: bool,
    pub group_by_file_structure: bool,
    pub flatten_modules: bool,
    pub qualified_module_names: bool,
    pub flatten_packages: bool,
    pub sort_alphabetically: bool,
    /// Dimension names, outermost first. Empty means the default order.
    pub dimension_order: Vec<String>,
}

impl Default for ViewSettings {
    fn default() -> Self {
        let options = GroupingOptions::default();
        Self {
            group_by_usage_kind: true,
            group_by_scope: false,
            group_by_usage_type: true,
            group_by_module: true,
            group_by_package: true,
            group_by_file: true,
            group_by_file_structure: true,
            flatten_modules: options.flatten_modules,
            qualified_module_names: options.qualified_module_names,
            flatten_packages: options.flatten_packages,
            sort_alphabetically: false,
            dimension_order: Vec::new(),
        }
    }
}

impl ViewSettings {
    /// Returns the flag that enables grouping along `dimension`.
    pub fn is_grouped_by(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::UsageKind => self.group_by_usage_kind,
            Dimension::Scope => self.group_by_scope,
            Dimension::UsageType => self.group_by_usage_type,
            Dimension::Module => self.group_by_module,
            Dimension::Package => self.group_by_package,
            Dimension::File => self.group_by_file,
            Dimension::FileStructure => self.group_by_file_structure,
        }
    }

    /// Sets the flag that enables grouping along `dimension`.
    pub fn set_grouped_by(&mut self, dimension: Dimension, enabled: bool) {
        let flag = match dimension {
            Dimension::UsageKind => &mut self.group_by_usage_kind,
            Dimension::Scope => &mut self.group_by_scope,
            Dimension::UsageType => &mut self.group_by_usage_type,
            Dimension::Module => &mut self.group_by_module,
            Dimension::Package => &mut self.group_by_package,
            Dimension::File => &mut self.group_by_file,
            Dimension::FileStructure => &mut self.group_by_file_structure,
        };
        *flag = enabled;
    }

    pub fn grouping_options(&self) -> GroupingOptions {
        GroupingOptions {
            flatten_modules: self.flatten_modules,
            qualified_module_names: self.qualified_module_names,
            flatten_packages: self.flatten_packages,
        }
    }
}

/// Source of the current settings snapshot.
pub trait SettingsStore {
    /// Returns a copy of the current snapshot.
    fn get(&self) -> ViewSettings;

    /// Replaces the current snapshot.
    fn set(&mut self, settings: ViewSettings);

    /// Builds a policy from the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] if the snapshot's dimension order is invalid.
    fn policy(&self) -> Result<GroupingPolicy, PolicyError> {
        GroupingPolicy::from_settings(&self.get())
    }

    /// Saves the current snapshot and returns a guard that restores it on drop.
    fn scoped(&mut self) -> SettingsGuard<'_, Self>
    where
        Self: Sized,
    {
        SettingsGuard::new(self)
    }
}

/// Settings held in memory by a single owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySettings {
    settings: ViewSettings,
}

impl MemorySettings {
    pub fn new(settings: ViewSettings) -> Self {
        Self { settings }
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self) -> ViewSettings {
        self.settings.clone()
    }

    fn set(&mut self, settings: ViewSettings) {
        self.settings = settings;
    }
}

/// Settings shared between threads.
///
/// Clones share one snapshot. Readers take a shared lock; every write goes
/// through the single write lock.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<RwLock<ViewSettings>>,
}

impl SharedSettings {
    pub fn new(settings: ViewSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Applies `f` to the snapshot under the write lock.
    pub fn update(&self, f: impl FnOnce(&mut ViewSettings)) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard);
    }
}

impl SettingsStore for SharedSettings {
    fn get(&self) -> ViewSettings {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&mut self, settings: ViewSettings) {
        self.update(|current| *current = settings);
    }
}

/// Restores a saved settings snapshot when dropped.
///
/// Dereferences to the underlying store so it can be read and changed while
/// the guard is alive.
#[derive(Debug)]
pub struct SettingsGuard<'a, S: SettingsStore> {
    store: &'a mut S,
    saved: Option<ViewSettings>,
}

impl<'a, S: SettingsStore> SettingsGuard<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        let saved = Some(store.get());
        Self { store, saved }
    }

    /// The snapshot that will be restored.
    pub fn saved(&self) -> Option<&ViewSettings> {
        self.saved.as_ref()
    }
}

impl<S: SettingsStore> Deref for SettingsGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        self.store
    }
}

impl<S: SettingsStore> DerefMut for SettingsGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.store
    }
}

impl<S: SettingsStore> Drop for SettingsGuard<'_, S> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            trace!("Restoring saved view settings");
            self.store.set(saved);
        }
    }
}
