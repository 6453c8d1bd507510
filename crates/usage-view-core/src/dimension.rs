//! Grouping dimensions.
//!
//! A [`Dimension`] names one axis along which occurrences can be grouped.
//! The set is closed: supporting a new axis means adding a variant here and a
//! matching provider in [`crate::provider`].

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a dimension name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown grouping dimension `{0}`")]
pub struct ParseDimensionError(pub String);

/// A named axis of grouping.
///
/// Variants are listed in their default nesting order, outermost first.
///
/// # Examples
///
/// ```
/// use usage_view_core::dimension::Dimension;
///
/// let dimension: Dimension = "file_structure".parse().unwrap();
/// assert_eq!(dimension, Dimension::FileStructure);
/// assert_eq!(dimension.to_string(), "file_structure");
/// assert!("bogus".parse::<Dimension>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Code, non-code and generated-code usages.
    UsageKind,
    /// Production, test and library scopes.
    Scope,
    /// Semantic usage type such as a call or a read access.
    UsageType,
    /// Owning module, optionally split on qualified-name separators.
    Module,
    /// Package or namespace path.
    Package,
    /// Containing file.
    File,
    /// Enclosing declarations inside the file.
    FileStructure,
}

impl Dimension {
    /// Every dimension in default nesting order.
    pub const ALL: [Dimension; 7] = [
        Dimension::UsageKind,
        Dimension::Scope,
        Dimension::UsageType,
        Dimension::Module,
        Dimension::Package,
        Dimension::File,
        Dimension::FileStructure,
    ];

    /// Returns the snake_case name used in settings files and on the command line.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl FromStr for Dimension {
    type Err = ParseDimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "usage_kind" => Ok(Self::UsageKind),
            "scope" => Ok(Self::Scope),
            "usage_type" => Ok(Self::UsageType),
            "module" => Ok(Self::Module),
            "package" => Ok(Self::Package),
            "file" => Ok(Self::File),
            "file_structure" => Ok(Self::FileStructure),
            _ => Err(ParseDimensionError(s.to_string())),
        }
    }
}

impl From<Dimension> for &'static str {
    fn from(val: Dimension) -> Self {
        match val {
            Dimension::UsageKind => "usage_kind",
            Dimension::Scope => "scope",
            Dimension::UsageType => "usage_type",
            Dimension::Module => "module",
            Dimension::Package => "package",
            Dimension::File => "file",
            Dimension::FileStructure => "file_structure",
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}
