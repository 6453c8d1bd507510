//! Occurrence list parsing.
//!
//! The input file is TOML with one `[[occurrence]]` table per result:
//!
//! ```toml
//! [[occurrence]]
//! path = "main/A.txt"
//! line = 1
//! text = "hello"
//! kind = "non_code"
//! module = "main"
//! ```
//!
//! Only `path` and `line` are required, and lines are 1-based. Ids are
//! assigned in file order.

use std::num::NonZeroU32;

use log::debug;
use serde::Deserialize;

use usage_view::{
    UsageViewError,
    occurrence::{LocatedItem, Occurrence, OccurrenceId, Scope, UsageKind},
};

#[derive(Debug, Deserialize)]
struct InputFile {
    #[serde(default, rename = "occurrence")]
    occurrences: Vec<OccurrenceRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OccurrenceRecord {
    path: String,
    line: NonZeroU32,
    #[serde(default)]
    text: String,
    #[serde(default)]
    kind: UsageKind,
    scope: Option<Scope>,
    usage_type: Option<String>,
    module: Option<String>,
    package: Option<String>,
    #[serde(default)]
    structure: Vec<String>,
}

impl OccurrenceRecord {
    fn into_occurrence(self, id: usize) -> Occurrence {
        let mut occurrence = Occurrence::new(
            OccurrenceId::new(id),
            LocatedItem::new(self.path, self.line.get(), self.text),
        )
        .with_kind(self.kind)
        .with_structure(self.structure);

        if let Some(scope) = self.scope {
            occurrence = occurrence.with_scope(scope);
        }
        if let Some(usage_type) = self.usage_type {
            occurrence = occurrence.with_usage_type(usage_type);
        }
        if let Some(module) = self.module {
            occurrence = occurrence.with_module(module);
        }
        if let Some(package) = self.package {
            occurrence = occurrence.with_package(package);
        }
        occurrence
    }
}

/// Parses an occurrence list.
///
/// # Errors
///
/// Returns [`UsageViewError::Input`] carrying the source text and the span
/// of the offending TOML when the file does not match the expected shape.
pub fn parse_occurrences(source: &str) -> Result<Vec<Occurrence>, UsageViewError> {
    let file: InputFile = toml::from_str(source).map_err(|err| {
        UsageViewError::new_input_error(err.message().trim_end(), err.span(), source)
    })?;

    let occurrences: Vec<_> = file
        .occurrences
        .into_iter()
        .enumerate()
        .map(|(id, record)| record.into_occurrence(id))
        .collect();

    debug!(count = occurrences.len(); "Occurrences parsed");
    Ok(occurrences)
}
