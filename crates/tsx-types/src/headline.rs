//! The annotated word stream and the match locations extracted from it.

use serde::{Deserialize, Serialize};

/// One unit of a document as annotated by the headline generator.
///
/// Entries are read-only once produced. `len` is measured in the same units
/// the annotator uses for document positions (characters, not bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WordEntry {
    /// Length of this unit in the original document.
    pub len: i32,
    /// This occurrence satisfies the query.
    #[serde(default)]
    pub selected: bool,
    /// Structural noise: never reported and, under the canonical policy,
    /// never counted toward the character offset.
    #[serde(default)]
    pub skip: bool,
    /// Duplicate of a lexeme occurrence that was already reported.
    #[serde(default)]
    pub repeated: bool,
}

impl WordEntry {
    /// An unannotated unit of `len` characters.
    #[must_use]
    pub const fn new(len: i32) -> Self {
        Self {
            len,
            selected: false,
            skip: false,
            repeated: false,
        }
    }

    #[must_use]
    pub const fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    #[must_use]
    pub const fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    #[must_use]
    pub const fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }
}

/// A reportable match: `len` characters starting at `offset` (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchLocation {
    pub offset: i32,
    pub len: i32,
}

impl MatchLocation {
    #[must_use]
    pub const fn new(offset: i32, len: i32) -> Self {
        Self { offset, len }
    }

    /// One past the last character of the match.
    #[must_use]
    pub const fn end(&self) -> i64 {
        self.offset as i64 + self.len as i64
    }
}

impl From<(i32, i32)> for MatchLocation {
    fn from((offset, len): (i32, i32)) -> Self {
        Self { offset, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_entry_builders() {
        let w = WordEntry::new(4).selected().repeated();
        assert_eq!(w.len, 4);
        assert!(w.selected);
        assert!(w.repeated);
        assert!(!w.skip);
        assert!(WordEntry::new(1).skipped().skip);
    }

    #[test]
    fn test_word_entry_flags_default_when_absent() {
        let w: WordEntry = serde_json::from_str(r#"{"len": 3, "selected": true}"#).unwrap();
        assert_eq!(w, WordEntry::new(3).selected());
    }

    #[test]
    fn test_match_location_end() {
        let m = MatchLocation::new(i32::MAX, 2);
        assert_eq!(m.end(), i64::from(i32::MAX) + 2);
        assert_eq!(MatchLocation::from((5, 3)).end(), 8);
    }
}
