//! Indexed documents (`tsvector`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest word position a `tsvector` records; later positions are clamped.
pub const MAX_POSITION: u16 = (1 << 14) - 1;

/// A lexeme and the word positions it occurs at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsVectorEntry {
    pub lexeme: String,
    /// 1-based, strictly increasing.
    pub positions: Vec<u16>,
}

/// A set of unique lexemes stored in ascending byte order.
///
/// Construction normalizes its input: duplicate lexemes are merged, their
/// positions sorted, deduplicated and clamped to [`MAX_POSITION`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TsVector {
    entries: Vec<TsVectorEntry>,
}

impl TsVector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(lexeme, position)` pairs in any order.
    pub fn from_occurrences<I, S>(occurrences: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut pairs: Vec<(String, u16)> = occurrences
            .into_iter()
            .map(|(lexeme, pos)| (lexeme.into(), clamp_position(pos)))
            .collect();
        pairs.sort();
        pairs.dedup();

        let mut entries: Vec<TsVectorEntry> = Vec::new();
        for (lexeme, pos) in pairs {
            match entries.last_mut() {
                Some(last) if last.lexeme == lexeme => last.positions.push(pos),
                _ => entries.push(TsVectorEntry {
                    lexeme,
                    positions: vec![pos],
                }),
            }
        }
        Self { entries }
    }

    /// Build from lexemes without positional information.
    pub fn from_lexemes<I, S>(lexemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lexemes: Vec<String> = lexemes.into_iter().map(Into::into).collect();
        lexemes.sort();
        lexemes.dedup();
        Self {
            entries: lexemes
                .into_iter()
                .map(|lexeme| TsVectorEntry {
                    lexeme,
                    positions: Vec::new(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[TsVectorEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TsVectorEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, lexeme: &str) -> bool {
        self.entries
            .binary_search_by(|e| e.lexeme.as_str().cmp(lexeme))
            .is_ok()
    }
}

fn clamp_position(pos: u32) -> u16 {
    u16::try_from(pos).map_or(MAX_POSITION, |p| p.clamp(1, MAX_POSITION))
}

impl<'a> IntoIterator for &'a TsVector {
    type Item = &'a TsVectorEntry;
    type IntoIter = std::slice::Iter<'a, TsVectorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for TsVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "'{}'", entry.lexeme.replace('\'', "''"))?;
            for (j, pos) in entry.positions.iter().enumerate() {
                f.write_str(if j == 0 { ":" } else { "," })?;
                write!(f, "{pos}")?;
            }
        }
        Ok(())
    }
}
