//! Group labels backed by string interning.
//!
//! Every group node in a usage tree is keyed by a [`Label`]. The same module,
//! package or file name shows up once per occurrence, so labels are interned
//! and compared as integers during tree construction.

use std::{
    cmp::Ordering,
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for label storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// One segment of a group path, such as `xxx`, `main` or `A.txt`.
///
/// Equality and hashing work on the interned symbol. Ordering compares the
/// underlying text so that sorted output does not depend on interning order.
///
/// # Examples
///
/// ```
/// use usage_view_core::label::Label;
///
/// let module = Label::new("main");
/// assert_eq!(module, Label::new("main"));
/// assert_eq!(module, "main");
/// assert_eq!(module.to_string(), "main");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(DefaultSymbol);

impl Label {
    /// Interns `text` and returns its label.
    pub fn new(text: &str) -> Self {
        Self(interner().get_or_intern(text))
    }

    /// Returns an owned copy of the label text.
    pub fn as_string(&self) -> String {
        interner()
            .resolve(self.0)
            .map(str::to_owned)
            .unwrap_or_default()
    }

    /// Runs `f` against the label text without allocating.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        f(interner.resolve(self.0).unwrap_or_default())
    }

    /// Returns `true` when the label text is empty.
    pub fn is_empty(&self) -> bool {
        self.with_str(str::is_empty)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Resolve first so the interner lock is not held while formatting.
        let text = self.as_string();
        f.write_str(&text)
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Self::new(&text)
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|text| text == other)
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }
        let interner = interner();
        let lhs = interner.resolve(self.0).unwrap_or_default();
        let rhs = interner.resolve(other.0).unwrap_or_default();
        lhs.cmp(rhs)
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn interning_preserves_text(text in ".{0,24}") {
            let label = Label::new(&text);
            prop_assert_eq!(label.as_string(), text.clone());
            prop_assert_eq!(label, Label::new(&text));
        }

        #[test]
        fn ordering_matches_text(lhs in "[a-z]{0,6}", rhs in "[a-z]{0,6}") {
            prop_assert_eq!(Label::new(&lhs).cmp(&Label::new(&rhs)), lhs.cmp(&rhs));
        }
    }
}
