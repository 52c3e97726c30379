//! The extraction cursor: a left-to-right walk over annotated words that
//! yields one [`MatchLocation`] per reportable entry.
//!
//! Offsets are the sum of the lengths of every earlier entry that the active
//! [`ExclusionPolicy`] lets advance the cursor. The walk never reorders, so
//! offsets come out non-decreasing.

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use tsx_error::{Result, TsError};
use tsx_types::{MatchLocation, WordEntry};

/// How `skip` and `repeated` annotations affect the offset and reporting.
///
/// | policy | `skip` | `repeated` | reported |
/// |---|---|---|---|
/// | `Canonical` | holds offset, never reported | advances, never reported | selected |
/// | `AdvanceThroughSkip` | advances | advances | selected, flags ignored |
/// | `HoldRepeated` | holds offset, never reported | holds offset, never reported | selected |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExclusionPolicy {
    /// Skipped units contribute nothing; repeated occurrences still take up
    /// their width but are not reported twice.
    #[default]
    Canonical,
    /// Every unit advances the offset and only `selected` is consulted.
    AdvanceThroughSkip,
    /// Neither skipped nor repeated units advance the offset.
    HoldRepeated,
}

impl ExclusionPolicy {
    pub const ALL: [Self; 3] = [Self::Canonical, Self::AdvanceThroughSkip, Self::HoldRepeated];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Canonical => "canonical",
            Self::AdvanceThroughSkip => "advance-through-skip",
            Self::HoldRepeated => "hold-repeated",
        }
    }

    /// Whether `word` moves the character offset forward by its length.
    #[must_use]
    pub const fn advances(self, word: &WordEntry) -> bool {
        match self {
            Self::Canonical => !word.skip,
            Self::AdvanceThroughSkip => true,
            Self::HoldRepeated => !word.skip && !word.repeated,
        }
    }

    /// Whether `word` is reported as a match.
    #[must_use]
    pub const fn reports(self, word: &WordEntry) -> bool {
        match self {
            Self::Canonical | Self::HoldRepeated => word.selected && !word.skip && !word.repeated,
            Self::AdvanceThroughSkip => word.selected,
        }
    }
}

impl fmt::Display for ExclusionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExclusionPolicy {
    type Err = TsError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|p| p.name() == lower)
            .ok_or_else(|| TsError::invalid_option("policy", format!("unknown value '{}'", s.trim())))
    }
}

/// Check a whole word sequence before extraction starts.
///
/// Rejects negative lengths, zero-length entries the policy would report and
/// sequences whose running offset would not fit the 32-bit result columns.
/// Zero-length entries the policy never reports are accepted. Running
/// this up front means a malformed sequence never yields partial results.
pub fn validate_words(words: &[WordEntry], policy: ExclusionPolicy) -> Result<()> {
    let mut total: i32 = 0;
    for (index, word) in words.iter().enumerate() {
        if word.len < 0 {
            return Err(TsError::malformed_word(
                index,
                format!("negative length {}", word.len),
            ));
        }
        if word.len == 0 && policy.reports(word) {
            return Err(TsError::malformed_word(index, "reported entry has zero length"));
        }
        if policy.advances(word) {
            total = total.checked_add(word.len).ok_or_else(|| {
                TsError::malformed_word(index, "character offset exceeds 32-bit range")
            })?;
        }
    }
    Ok(())
}

/// Position of an extraction within its word sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractionCursor {
    current_index: usize,
    character_offset: i32,
}

impl ExtractionCursor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current_index: 0,
            character_offset: 0,
        }
    }

    /// Index of the next entry to examine.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    /// Document characters consumed so far.
    #[must_use]
    pub const fn character_offset(&self) -> i32 {
        self.character_offset
    }

    #[must_use]
    pub const fn is_exhausted(&self, words: &[WordEntry]) -> bool {
        self.current_index >= words.len()
    }

    /// Walk forward to the next reportable entry and return its location,
    /// or `None` once every entry has been examined.
    ///
    /// `words` must have passed [`validate_words`] under the same policy.
    pub fn advance(
        &mut self,
        words: &[WordEntry],
        policy: ExclusionPolicy,
    ) -> Option<MatchLocation> {
        while let Some(word) = words.get(self.current_index) {
            let offset = self.character_offset;
            self.current_index += 1;
            if policy.advances(word) {
                self.character_offset = self.character_offset.saturating_add(word.len);
            }
            if policy.reports(word) {
                return Some(MatchLocation::new(offset, word.len));
            }
        }
        None
    }
}

/// A resumable extraction that owns its word sequence.
///
/// Each call to [`next_match`](Self::next_match) picks up where the last one
/// stopped and returns at most one location. The word sequence is released
/// as soon as the stream reports exhaustion; after that every call returns
/// `None`. Dropping a stream early is always fine.
#[derive(Debug)]
pub struct MatchStream {
    words: Vec<WordEntry>,
    cursor: ExtractionCursor,
    policy: ExclusionPolicy,
    yielded: usize,
    exhausted: bool,
}

impl MatchStream {
    /// Validate `words` and start a stream over them.
    pub fn new(words: Vec<WordEntry>, policy: ExclusionPolicy) -> Result<Self> {
        validate_words(&words, policy)?;
        debug!(words = words.len(), %policy, "match stream opened");
        Ok(Self {
            words,
            cursor: ExtractionCursor::new(),
            policy,
            yielded: 0,
            exhausted: false,
        })
    }

    /// The next match, or `None` once the sequence is exhausted.
    pub fn next_match(&mut self) -> Option<MatchLocation> {
        if self.exhausted {
            return None;
        }
        if let Some(found) = self.cursor.advance(&self.words, self.policy) {
            self.yielded += 1;
            return Some(found);
        }
        self.exhausted = true;
        self.words = Vec::new();
        debug!(matches = self.yielded, "match stream exhausted");
        None
    }

    #[must_use]
    pub const fn policy(&self) -> ExclusionPolicy {
        self.policy
    }

    /// Matches returned so far.
    #[must_use]
    pub const fn yielded(&self) -> usize {
        self.yielded
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Entries not yet examined; zero once the stream is exhausted.
    #[must_use]
    pub fn remaining_words(&self) -> usize {
        self.words.len().saturating_sub(self.cursor.current_index())
    }
}

impl Iterator for MatchStream {
    type Item = MatchLocation;

    fn next(&mut self) -> Option<MatchLocation> {
        self.next_match()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining_words()))
    }
}

impl FusedIterator for MatchStream {}
