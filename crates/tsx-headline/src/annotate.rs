//! Headline annotation: turn a document and a query into [`WordEntry`]s.
//!
//! One entry is produced per parsed unit, so the entry lengths sum to the
//! document's character count. Markup tags are annotated `skip`; words whose
//! lexeme satisfies a positive query operand are `selected`.

use rustc_hash::FxHashSet;
use tracing::debug;
use tsx_error::{Result, TsError};
use tsx_types::{TsQuery, WordEntry};

use crate::config::TextSearchConfig;
use crate::options::HeadlineOptions;
use crate::parser::UnitKind;

/// Annotate `document` against `query` using `config`'s parser and
/// dictionary.
///
/// With `HighlightAll` off, only matches inside a window of `MaxWords` words
/// starting at the first match stay selected. With `UniqueMatches` on, every
/// later occurrence of an already selected lexeme is marked `repeated`.
pub fn annotate(
    config: &TextSearchConfig,
    document: &str,
    query: &TsQuery,
    options: &HeadlineOptions,
) -> Result<Vec<WordEntry>> {
    let operands = query.positive_operands();
    let units = config.parser().parse(document);

    let mut entries = Vec::with_capacity(units.len());
    let mut lexemes: Vec<Option<String>> = Vec::with_capacity(units.len());
    let mut word_index: Vec<Option<usize>> = Vec::with_capacity(units.len());
    let mut words = 0_usize;

    for (index, unit) in units.iter().enumerate() {
        let len = i32::try_from(unit.char_len).map_err(|_| TsError::OutOfRange {
            what: format!("length of unit {index}"),
            value: unit.char_len.to_string(),
        })?;
        let mut entry = WordEntry::new(len);
        let mut lexeme = None;
        let mut ordinal = None;
        match unit.kind {
            UnitKind::Tag => entry = entry.skipped(),
            UnitKind::Space => {}
            UnitKind::Word => {
                ordinal = Some(words);
                words += 1;
                if let Some(lex) = config.dictionary().lexize(unit.text) {
                    if operands.iter().any(|op| op.matches(&lex)) {
                        entry = entry.selected();
                    }
                    lexeme = Some(lex);
                }
            }
        }
        entries.push(entry);
        lexemes.push(lexeme);
        word_index.push(ordinal);
    }

    if !options.highlight_all() {
        let first = entries
            .iter()
            .zip(&word_index)
            .find_map(|(e, w)| if e.selected { *w } else { None });
        if let Some(first) = first {
            let end = first.saturating_add(options.max_words());
            for (entry, w) in entries.iter_mut().zip(&word_index) {
                if matches!(w, Some(w) if *w >= end) {
                    entry.selected = false;
                }
            }
        }
    }

    if options.unique_matches() {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for (entry, lexeme) in entries.iter_mut().zip(&lexemes) {
            if let (true, Some(lex)) = (entry.selected, lexeme.as_deref()) {
                if !seen.insert(lex) {
                    entry.repeated = true;
                }
            }
        }
    }

    debug!(
        config = config.name(),
        units = entries.len(),
        words,
        selected = entries.iter().filter(|e| e.selected).count(),
        "headline annotated"
    );
    Ok(entries)
}
