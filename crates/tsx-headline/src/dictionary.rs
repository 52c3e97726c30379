//! Dictionaries: turn a surface word into a normalized lexeme.
//!
//! No stemming happens here; a dictionary only case-folds and, optionally,
//! drops stopwords.

use rustc_hash::FxHashSet;
use stop_words::{LANGUAGE, get};

/// Trait for lexeme dictionaries.
pub trait Dictionary: Send + Sync {
    /// Return the dictionary name.
    fn name(&self) -> &str;

    /// Normalize `word`, or `None` if it is a stopword and yields no lexeme.
    fn lexize(&self, word: &str) -> Option<String>;
}

/// Lowercases every word; never drops anything.
#[derive(Debug, Default)]
pub struct SimpleDictionary;

impl Dictionary for SimpleDictionary {
    fn name(&self) -> &str {
        "simple"
    }

    fn lexize(&self, word: &str) -> Option<String> {
        Some(word.to_lowercase())
    }
}

/// Lowercases words and drops those on a stopword list.
#[derive(Debug, Clone)]
pub struct StopwordDictionary {
    name: String,
    stopwords: FxHashSet<String>,
}

impl StopwordDictionary {
    /// Stopword dictionary for a language (`"en"`, `"english"`, `"de"`, ...).
    ///
    /// Unknown languages fall back to English.
    #[must_use]
    pub fn for_language(language: &str) -> Self {
        let (name, lang) = match language.to_lowercase().as_str() {
            "de" | "german" => ("german", LANGUAGE::German),
            "fr" | "french" => ("french", LANGUAGE::French),
            "es" | "spanish" => ("spanish", LANGUAGE::Spanish),
            "it" | "italian" => ("italian", LANGUAGE::Italian),
            "nl" | "dutch" => ("dutch", LANGUAGE::Dutch),
            "pt" | "portuguese" => ("portuguese", LANGUAGE::Portuguese),
            "ru" | "russian" => ("russian", LANGUAGE::Russian),
            _ => ("english", LANGUAGE::English),
        };
        let stopwords = get(lang).iter().map(|s| s.to_lowercase()).collect();
        Self {
            name: name.to_owned(),
            stopwords,
        }
    }

    /// Stopword dictionary over a custom list.
    #[must_use]
    pub fn from_list(name: &str, words: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

impl Dictionary for StopwordDictionary {
    fn name(&self) -> &str {
        &self.name
    }

    fn lexize(&self, word: &str) -> Option<String> {
        let lower = word.to_lowercase();
        if self.stopwords.contains(&lower) {
            None
        } else {
            Some(lower)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_lowercases() {
        assert_eq!(SimpleDictionary.lexize("FAT"), Some("fat".to_owned()));
        assert_eq!(SimpleDictionary.lexize("The"), Some("the".to_owned()));
    }

    #[test]
    fn test_english_drops_stopwords() {
        let dict = StopwordDictionary::for_language("english");
        assert_eq!(dict.name(), "english");
        assert!(!dict.is_empty());
        assert_eq!(dict.lexize("The"), None);
        assert_eq!(dict.lexize("the"), None);
        assert_eq!(dict.lexize("Rats"), Some("rats".to_owned()));
    }

    #[test]
    fn test_custom_list() {
        let dict = StopwordDictionary::from_list("tiny", &["A", "an"]);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.lexize("a"), None);
        assert_eq!(dict.lexize("AN"), None);
        assert_eq!(dict.lexize("ant"), Some("ant".to_owned()));
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let dict = StopwordDictionary::for_language("klingon");
        assert_eq!(dict.name(), "english");
    }
}
