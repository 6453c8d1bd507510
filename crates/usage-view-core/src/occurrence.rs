//! Found occurrences and the attributes they are classified by.
//!
//! An [`Occurrence`] is one search or usage result. It carries a
//! [`LocatedItem`] (where the hit is and what the line says) plus the
//! attributes that group key providers read: usage kind, scope, usage type,
//! module, package and enclosing structure.
//!
//! Occurrences are built once with the `with_*` methods and never change
//! afterwards. Two occurrences with identical attributes are still distinct
//! results and end up as two leaves.
//!
//! # Example
//!
//! ```
//! use usage_view_core::occurrence::{LocatedItem, Occurrence, OccurrenceId, UsageKind};
//!
//! let occurrence = Occurrence::new(OccurrenceId::new(0), LocatedItem::new("main/A.txt", 1, "hello"))
//!     .with_kind(UsageKind::NonCode)
//!     .with_module("main");
//!
//! assert_eq!(occurrence.item().file_name(), Some("A.txt"));
//! assert_eq!(occurrence.module(), Some("main"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-assigned identity of an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OccurrenceId(usize);

impl OccurrenceId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for OccurrenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The place an occurrence points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedItem {
    path: String,
    line: u32,
    text: String,
}

impl LocatedItem {
    /// Creates a located item.
    ///
    /// # Arguments
    ///
    /// * `path` - Slash separated path of the containing file.
    /// * `line` - 1-based line number of the hit.
    /// * `text` - Text of the line containing the hit.
    pub fn new(path: impl Into<String>, line: u32, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line,
            text: text.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the last path component, or `None` for an empty name.
    pub fn file_name(&self) -> Option<&str> {
        self.path
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty())
    }
}

/// Whether an occurrence is in code, outside code, or in generated code.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageKind {
    #[default]
    Code,
    NonCode,
    Generated,
}

impl UsageKind {
    /// Returns the group title shown for this kind.
    pub fn title(self) -> &'static str {
        match self {
            UsageKind::Code => "Code usages",
            UsageKind::NonCode => "Non-code usages",
            UsageKind::Generated => "Usages in generated code",
        }
    }
}

/// Which part of the project an occurrence belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Production,
    Test,
    Library,
}

impl Scope {
    /// Returns the group title shown for this scope.
    pub fn title(self) -> &'static str {
        match self {
            Scope::Production => "Production",
            Scope::Test => "Test",
            Scope::Library => "Libraries",
        }
    }
}

/// One found occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    id: OccurrenceId,
    item: LocatedItem,
    kind: UsageKind,
    scope: Option<Scope>,
    usage_type: Option<String>,
    module: Option<String>,
    package: Option<String>,
    structure: Vec<String>,
}

impl Occurrence {
    /// Creates a code occurrence with no grouping attributes set.
    pub fn new(id: OccurrenceId, item: LocatedItem) -> Self {
        Self {
            id,
            item,
            kind: UsageKind::default(),
            scope: None,
            usage_type: None,
            module: None,
            package: None,
            structure: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: UsageKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_usage_type(mut self, usage_type: impl Into<String>) -> Self {
        self.usage_type = Some(usage_type.into());
        self
    }

    /// Sets the owning module name. Qualified names use `.` separators.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Sets the dotted package name.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Sets the enclosing declarations, outermost first.
    pub fn with_structure<I, S>(mut self, structure: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.structure = structure.into_iter().map(Into::into).collect();
        self
    }

    pub fn id(&self) -> OccurrenceId {
        self.id
    }

    pub fn item(&self) -> &LocatedItem {
        &self.item
    }

    pub fn kind(&self) -> UsageKind {
        self.kind
    }

    pub fn scope(&self) -> Option<Scope> {
        self.scope
    }

    pub fn usage_type(&self) -> Option<&str> {
        self.usage_type.as_deref()
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn structure(&self) -> &[String] {
        &self.structure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(LocatedItem::new("xxx.main/A.txt", 1, "").file_name(), Some("A.txt"));
        assert_eq!(LocatedItem::new("A.txt", 1, "").file_name(), Some("A.txt"));
        assert_eq!(LocatedItem::new("src\\lib.rs", 1, "").file_name(), Some("lib.rs"));
        assert_eq!(LocatedItem::new("src/", 1, "").file_name(), None);
        assert_eq!(LocatedItem::new("", 1, "").file_name(), None);
    }

    #[test]
    fn test_defaults() {
        let occurrence = Occurrence::new(OccurrenceId::new(3), LocatedItem::new("a.rs", 2, "x"));

        assert_eq!(occurrence.id(), OccurrenceId::new(3));
        assert_eq!(occurrence.kind(), UsageKind::Code);
        assert_eq!(occurrence.scope(), None);
        assert_eq!(occurrence.module(), None);
        assert!(occurrence.structure().is_empty());
    }

    #[test]
    fn test_identical_attributes_are_distinct() {
        let item = LocatedItem::new("main/A.txt", 1, "hello");
        let first = Occurrence::new(OccurrenceId::new(0), item.clone()).with_module("main");
        let second = Occurrence::new(OccurrenceId::new(1), item).with_module("main");

        assert_ne!(first, second);
    }

    #[test]
    fn test_titles() {
        assert_eq!(UsageKind::NonCode.title(), "Non-code usages");
        assert_eq!(Scope::Library.title(), "Libraries");
    }
}
