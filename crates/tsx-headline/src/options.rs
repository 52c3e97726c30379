//! Headline options, in the `Name=value, Name=value` option string format.

use tracing::warn;
use tsx_error::{Result, TsError};

/// Default fragment width when `HighlightAll` is off.
pub const DEFAULT_MAX_WORDS: usize = 35;

/// Options that steer how the annotator selects words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlineOptions {
    highlight_all: bool,
    max_words: usize,
    unique_matches: bool,
}

impl HeadlineOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            highlight_all: true,
            max_words: DEFAULT_MAX_WORDS,
            unique_matches: false,
        }
    }

    /// Parse an option string such as `"HighlightAll=false, MaxWords=10"`.
    ///
    /// Option names are case-insensitive. An empty string yields the
    /// defaults.
    pub fn parse(options: &str) -> Result<Self> {
        let mut parsed = Self::new();
        for item in options.split(',') {
            if item.trim().is_empty() {
                continue;
            }
            parsed.apply(item)?;
        }
        Ok(parsed)
    }

    /// Apply one `Name=value` option.
    pub fn apply(&mut self, option: &str) -> Result<()> {
        let trimmed = option.trim();
        let Some((raw_key, raw_value)) = trimmed.split_once('=') else {
            warn!(option = trimmed, "headline option without value");
            return Err(TsError::invalid_option(trimmed, "expected Name=value"));
        };

        let key = raw_key.trim().to_ascii_lowercase();
        match key.as_str() {
            "highlightall" => self.highlight_all = bool_option(&key, raw_value)?,
            "uniquematches" => self.unique_matches = bool_option(&key, raw_value)?,
            "maxwords" => {
                let value = raw_value.trim();
                self.max_words = match value.parse::<usize>() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        warn!(option = %key, value, "invalid MaxWords");
                        return Err(TsError::invalid_option(
                            &key,
                            format!("MaxWords must be a positive integer, got '{value}'"),
                        ));
                    }
                };
            }
            _ => {
                warn!(option = %key, "unrecognized headline option");
                return Err(TsError::invalid_option(&key, "unrecognized headline option"));
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn with_highlight_all(mut self, on: bool) -> Self {
        self.highlight_all = on;
        self
    }

    #[must_use]
    pub const fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    #[must_use]
    pub const fn with_unique_matches(mut self, on: bool) -> Self {
        self.unique_matches = on;
        self
    }

    /// Select matches anywhere in the document rather than in one fragment.
    #[must_use]
    pub const fn highlight_all(self) -> bool {
        self.highlight_all
    }

    /// Fragment width in words when [`highlight_all`](Self::highlight_all)
    /// is off.
    #[must_use]
    pub const fn max_words(self) -> usize {
        self.max_words
    }

    /// Annotate later occurrences of an already selected lexeme as repeated.
    #[must_use]
    pub const fn unique_matches(self) -> bool {
        self.unique_matches
    }
}

impl Default for HeadlineOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn bool_option(key: &str, raw: &str) -> Result<bool> {
    parse_bool_like(raw).ok_or_else(|| {
        warn!(option = key, value = raw.trim(), "invalid boolean option");
        TsError::invalid_option(key, format!("expected a boolean, got '{}'", raw.trim()))
    })
}

pub(crate) fn parse_bool_like(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}
