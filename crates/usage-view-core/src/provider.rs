//! Group key providers, one per [`Dimension`].
//!
//! A provider maps an [`Occurrence`] to the label path it should be filed
//! under for its dimension. An empty path means the occurrence is not grouped
//! along that dimension and falls through to the next one.
//!
//! Providers are pure functions of the occurrence and the
//! [`GroupingOptions`] they were created with.
//!
//! # Example
//!
//! ```
//! use usage_view_core::{
//!     dimension::Dimension,
//!     occurrence::{LocatedItem, Occurrence, OccurrenceId},
//!     provider::{GroupingOptions, provider_for},
//! };
//!
//! let occurrence = Occurrence::new(OccurrenceId::new(0), LocatedItem::new("xxx.main/A.txt", 1, "hello"))
//!     .with_module("xxx.main");
//!
//! let options = GroupingOptions {
//!     flatten_modules: false,
//!     qualified_module_names: true,
//!     ..GroupingOptions::default()
//! };
//! let provider = provider_for(Dimension::Module, options);
//! assert_eq!(provider.classify(&occurrence), vec!["xxx", "main"]);
//! ```

use serde::{Deserialize, Serialize};

use crate::{dimension::Dimension, occurrence::Occurrence};

/// Ordered label segments produced by a provider, most general first.
pub type LabelPath = Vec<String>;

/// Options that change how individual providers split their labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GroupingOptions {
    /// Show each module as a single group even if its name is qualified.
    pub flatten_modules: bool,
    /// Treat `.` in module names as a hierarchy separator.
    pub qualified_module_names: bool,
    /// Show each package as a single group instead of one level per segment.
    pub flatten_packages: bool,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            flatten_modules: true,
            qualified_module_names: false,
            flatten_packages: false,
        }
    }
}

/// Classifies occurrences along one dimension.
pub trait GroupKeyProvider {
    /// The dimension this provider classifies.
    fn dimension(&self) -> Dimension;

    /// Returns the label path for `occurrence`, or an empty path if the
    /// occurrence is not grouped along this dimension.
    fn classify(&self, occurrence: &Occurrence) -> LabelPath;

    /// Character that must not appear inside a single segment.
    ///
    /// A path with an empty segment, or with a segment containing this
    /// character, is malformed.
    fn separator(&self) -> Option<char> {
        None
    }
}

/// Creates the provider for `dimension`.
pub fn provider_for(dimension: Dimension, options: GroupingOptions) -> Box<dyn GroupKeyProvider> {
    match dimension {
        Dimension::UsageKind => Box::new(UsageKindProvider),
        Dimension::Scope => Box::new(ScopeProvider),
        Dimension::UsageType => Box::new(UsageTypeProvider),
        Dimension::Module => Box::new(ModuleProvider {
            split: options.qualified_module_names && !options.flatten_modules,
        }),
        Dimension::Package => Box::new(PackageProvider {
            split: !options.flatten_packages,
        }),
        Dimension::File => Box::new(FileProvider),
        Dimension::FileStructure => Box::new(FileStructureProvider),
    }
}

fn single(label: Option<&str>) -> LabelPath {
    label
        .filter(|label| !label.is_empty())
        .map(|label| vec![label.to_string()])
        .unwrap_or_default()
}

fn dotted(name: Option<&str>, split: bool) -> LabelPath {
    match name {
        Some(name) if split && !name.is_empty() => name.split('.').map(str::to_string).collect(),
        name => single(name),
    }
}

/// Groups by [`UsageKind`](crate::occurrence::UsageKind).
#[derive(Debug, Clone, Copy, Default)]
pub struct UsageKindProvider;

impl GroupKeyProvider for UsageKindProvider {
    fn dimension(&self) -> Dimension {
        Dimension::UsageKind
    }

    fn classify(&self, occurrence: &Occurrence) -> LabelPath {
        vec![occurrence.kind().title().to_string()]
    }
}

/// Groups by [`Scope`](crate::occurrence::Scope); unscoped occurrences are not grouped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeProvider;

impl GroupKeyProvider for ScopeProvider {
    fn dimension(&self) -> Dimension {
        Dimension::Scope
    }

    fn classify(&self, occurrence: &Occurrence) -> LabelPath {
        single(occurrence.scope().map(|scope| scope.title()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UsageTypeProvider;

impl GroupKeyProvider for UsageTypeProvider {
    fn dimension(&self) -> Dimension {
        Dimension::UsageType
    }

    fn classify(&self, occurrence: &Occurrence) -> LabelPath {
        single(occurrence.usage_type())
    }
}

/// Groups by module name.
///
/// With `split` set, `xxx.main` becomes the two levels `xxx` and `main`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleProvider {
    split: bool,
}

impl GroupKeyProvider for ModuleProvider {
    fn dimension(&self) -> Dimension {
        Dimension::Module
    }

    fn classify(&self, occurrence: &Occurrence) -> LabelPath {
        dotted(occurrence.module(), self.split)
    }

    fn separator(&self) -> Option<char> {
        self.split.then_some('.')
    }
}

/// Groups by dotted package name, one level per segment unless flattened.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageProvider {
    split: bool,
}

impl GroupKeyProvider for PackageProvider {
    fn dimension(&self) -> Dimension {
        Dimension::Package
    }

    fn classify(&self, occurrence: &Occurrence) -> LabelPath {
        dotted(occurrence.package(), self.split)
    }

    fn separator(&self) -> Option<char> {
        self.split.then_some('.')
    }
}

/// Groups by the file name of the located item.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileProvider;

impl GroupKeyProvider for FileProvider {
    fn dimension(&self) -> Dimension {
        Dimension::File
    }

    fn classify(&self, occurrence: &Occurrence) -> LabelPath {
        single(occurrence.item().file_name())
    }

    fn separator(&self) -> Option<char> {
        Some('/')
    }
}

/// Groups by enclosing declarations, outermost first.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStructureProvider;

impl GroupKeyProvider for FileStructureProvider {
    fn dimension(&self) -> Dimension {
        Dimension::FileStructure
    }

    fn classify(&self, occurrence: &Occurrence) -> LabelPath {
        occurrence.structure().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occurrence::{LocatedItem, OccurrenceId, Scope, UsageKind};

    fn occurrence() -> Occurrence {
        Occurrence::new(OccurrenceId::new(0), LocatedItem::new("src/com/foo/Bar.java", 12, "bar();"))
    }

    fn split_modules() -> GroupingOptions {
        GroupingOptions {
            flatten_modules: false,
            qualified_module_names: true,
            flatten_packages: false,
        }
    }

    #[test]
    fn test_every_dimension_has_a_provider() {
        for dimension in Dimension::ALL {
            let provider = provider_for(dimension, GroupingOptions::default());
            assert_eq!(provider.dimension(), dimension);
        }
    }

    #[test]
    fn test_usage_kind_always_classifies() {
        let provider = provider_for(Dimension::UsageKind, GroupingOptions::default());

        assert_eq!(provider.classify(&occurrence()), vec!["Code usages"]);
        assert_eq!(
            provider.classify(&occurrence().with_kind(UsageKind::Generated)),
            vec!["Usages in generated code"]
        );
    }

    #[test]
    fn test_scope_is_optional() {
        let provider = provider_for(Dimension::Scope, GroupingOptions::default());

        assert!(provider.classify(&occurrence()).is_empty());
        assert_eq!(provider.classify(&occurrence().with_scope(Scope::Test)), vec!["Test"]);
    }

    #[test]
    fn test_usage_type_ignores_empty_label() {
        let provider = provider_for(Dimension::UsageType, GroupingOptions::default());

        assert!(provider.classify(&occurrence().with_usage_type("")).is_empty());
        assert_eq!(
            provider.classify(&occurrence().with_usage_type("Method call")),
            vec!["Method call"]
        );
    }

    #[test]
    fn test_module_flattened_by_default() {
        let provider = provider_for(Dimension::Module, GroupingOptions::default());

        assert_eq!(provider.classify(&occurrence().with_module("xxx.main")), vec!["xxx.main"]);
        assert_eq!(provider.separator(), None);
    }

    #[test]
    fn test_module_qualified_names_need_unflattened_modules() {
        let options = GroupingOptions {
            qualified_module_names: true,
            ..GroupingOptions::default()
        };
        let provider = provider_for(Dimension::Module, options);

        assert_eq!(provider.classify(&occurrence().with_module("xxx.main")), vec!["xxx.main"]);
    }

    #[test]
    fn test_module_split() {
        let provider = provider_for(Dimension::Module, split_modules());

        assert_eq!(
            provider.classify(&occurrence().with_module("xxx.main")),
            vec!["xxx", "main"]
        );
        assert_eq!(provider.classify(&occurrence().with_module("main")), vec!["main"]);
        assert!(provider.classify(&occurrence()).is_empty());
        assert_eq!(provider.separator(), Some('.'));
    }

    #[test]
    fn test_package_split_and_flattened() {
        let nested = provider_for(Dimension::Package, GroupingOptions::default());
        let flat = provider_for(
            Dimension::Package,
            GroupingOptions {
                flatten_packages: true,
                ..GroupingOptions::default()
            },
        );
        let occurrence = occurrence().with_package("com.foo");

        assert_eq!(nested.classify(&occurrence), vec!["com", "foo"]);
        assert_eq!(flat.classify(&occurrence), vec!["com.foo"]);
    }

    #[test]
    fn test_file_uses_file_name() {
        let provider = provider_for(Dimension::File, GroupingOptions::default());

        assert_eq!(provider.classify(&occurrence()), vec!["Bar.java"]);
    }

    #[test]
    fn test_file_structure() {
        let provider = provider_for(Dimension::FileStructure, GroupingOptions::default());

        assert!(provider.classify(&occurrence()).is_empty());
        assert_eq!(
            provider.classify(&occurrence().with_structure(["Bar", "run()"])),
            vec!["Bar", "run()"]
        );
    }
}
