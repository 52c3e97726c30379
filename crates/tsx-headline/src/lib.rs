//! The producer side of match extraction.
//!
//! Parses documents into units, normalizes words through dictionaries,
//! resolves text search configurations and annotates a document against a
//! query, yielding the [`WordEntry`](tsx_types::WordEntry) sequence that the
//! match extractor consumes.
//!
//! - [`TextParser`] / [`DefaultParser`]: word, separator and tag units.
//! - [`Dictionary`]: `simple` lowercasing and stopword-dropping dictionaries.
//! - [`TextSearchCatalog`]: named configurations and the current default.
//! - [`annotate`]: the headline annotator.
#![allow(clippy::unnecessary_literal_bound)]

pub mod annotate;
pub mod config;
pub mod dictionary;
pub mod options;
pub mod parser;

pub use annotate::annotate;
pub use config::{
    ConfigRef, ENGLISH_CONFIG_ID, SIMPLE_CONFIG_ID, TextSearchCatalog, TextSearchConfig,
};
pub use dictionary::{Dictionary, SimpleDictionary, StopwordDictionary};
pub use options::{DEFAULT_MAX_WORDS, HeadlineOptions};
pub use parser::{DefaultParser, ParsedUnit, TextParser, UnitKind};
